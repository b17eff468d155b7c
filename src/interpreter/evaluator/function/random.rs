use rand::Rng;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Returns a uniformly random number in `[0, 1)`.
pub fn random(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let _ = args;
    Ok(Value::Number(rand::thread_rng().r#gen::<f64>()))
}

/// Returns a uniformly random integer between the two arguments,
/// inclusive on both ends.
pub fn random_int(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let low = args[0].to_number()?.trunc() as i64;
    let high = args[1].to_number()?.trunc() as i64;

    if low > high {
        return Err(RuntimeError::InvalidArgument { details: format!("randomInt lower bound {low} is greater than upper bound {high}"), });
    }

    let picked = rand::thread_rng().gen_range(low..=high);
    Ok(Value::Number(picked as f64))
}

/// Returns a freshly generated RFC 4122 version-4 UUID in its textual
/// form.
pub fn random_uuid(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let _ = args;
    Ok(Value::Str(uuid::Uuid::new_v4().to_string()))
}
