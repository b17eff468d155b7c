use crate::interpreter::{
    evaluator::core::{Context, EvalResult},
    value::core::Value,
};

/// Stringifies any value using the same rule as printing and string
/// concatenation.
///
/// # Example
/// ```
/// use kodiscript::evaluate;
/// use kodiscript::interpreter::value::core::Value;
///
/// assert_eq!(evaluate("toString(14)").unwrap(), Value::Str("14".into()));
/// assert_eq!(evaluate("toString(null)").unwrap(), Value::Str("null".into()));
/// ```
pub fn to_string(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Str(args[0].to_string()))
}

/// Coerces any convertible value to a number: null becomes 0, booleans
/// become 0 or 1, and strings parse after trimming (defaulting to 0).
pub fn to_number(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(args[0].to_number()?))
}

/// Returns the type name of the argument: one of `"null"`, `"boolean"`,
/// `"number"`, `"string"`, `"array"`, `"object"`, or `"function"`.
pub fn type_of(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Str(args[0].type_name().to_string()))
}

/// Tests whether the argument is null.
pub fn is_null(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Bool(args[0].is_null()))
}

/// Tests whether the argument is a number.
pub fn is_number(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Bool(matches!(args[0], Value::Number(_))))
}

/// Tests whether the argument is a string.
pub fn is_string(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Bool(matches!(args[0], Value::Str(_))))
}

/// Tests whether the argument is a boolean.
pub fn is_bool(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Bool(matches!(args[0], Value::Bool(_))))
}
