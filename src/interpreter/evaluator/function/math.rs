use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Generates a one-argument numeric builtin.
///
/// The argument is coerced with the standard numeric rule and the named
/// `f64` method is applied.
macro_rules! numeric_builtin {
    ($fname:ident, $method:ident) => {
        /// Applies `
        #[doc = stringify!($method)]
        /// ` to the numeric coercion of the argument.
        pub fn $fname(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
            Ok(Value::Number(args[0].to_number()?.$method()))
        }
    };
}

numeric_builtin!(abs, abs);
numeric_builtin!(floor, floor);
numeric_builtin!(ceil, ceil);
numeric_builtin!(round, round);
numeric_builtin!(sqrt, sqrt);
numeric_builtin!(sin, sin);
numeric_builtin!(cos, cos);
numeric_builtin!(tan, tan);
numeric_builtin!(log, ln);
numeric_builtin!(log10, log10);
numeric_builtin!(exp, exp);

/// Raises the first argument to the power of the second.
pub fn pow(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(args[0].to_number()?.powf(args[1].to_number()?)))
}

/// Returns the smallest of the arguments. A single array argument compares
/// its elements instead.
pub fn min(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    fold_extremum(args, f64::min)
}

/// Returns the largest of the arguments. A single array argument compares
/// its elements instead.
pub fn max(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    fold_extremum(args, f64::max)
}

/// Folds `min`/`max` over either the argument list or, for a single array
/// argument, the array's elements.
fn fold_extremum(args: &[Value], pick: fn(f64, f64) -> f64) -> EvalResult<Value> {
    let candidates: Vec<&Value> = match args {
        [Value::Array(values)] => values.iter().collect(),
        _ => args.iter().collect(),
    };

    let mut result: Option<f64> = None;
    for candidate in candidates {
        let n = candidate.to_number()?;
        result = Some(match result {
            Some(current) => pick(current, n),
            None => n,
        });
    }

    result.map(Value::Number)
          .ok_or_else(|| RuntimeError::InvalidArgument { details: "cannot take the extremum of an empty array".to_string(), })
}
