use crate::interpreter::{
    evaluator::core::{Context, EvalResult},
    value::core::Value,
};

/// Appends one output line built from the arguments.
///
/// Each argument is stringified and the results are joined with single
/// spaces into one entry of the run's output sequence. Output is captured
/// in the context, not written to the process's standard output; the host
/// receives it in the result record.
///
/// Returns null.
pub fn print(context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let line = args.iter()
                   .map(std::string::ToString::to_string)
                   .collect::<Vec<_>>()
                   .join(" ");

    context.push_output(line);
    Ok(Value::Null)
}
