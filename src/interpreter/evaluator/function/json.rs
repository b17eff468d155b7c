use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Parses a JSON document into a runtime value.
///
/// Object key order is preserved. JSON numbers become language numbers
/// (doubles).
///
/// # Errors
/// `InvalidArgument` when the input is not valid JSON.
pub fn json_parse(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let text = args[0].as_str()?;

    let parsed: serde_json::Value =
        serde_json::from_str(text).map_err(|e| RuntimeError::InvalidArgument { details: format!("invalid JSON: {e}"), })?;

    Ok(json_to_value(&parsed))
}

/// Serializes a runtime value to a JSON string with Unicode preserved.
///
/// Function values and non-finite numbers serialize as JSON `null`.
pub fn json_stringify(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let json = value_to_json(&args[0]);

    let text =
        serde_json::to_string(&json).map_err(|e| RuntimeError::InvalidArgument { details: format!("cannot serialize value: {e}"), })?;

    Ok(Value::Str(text))
}

/// Converts a parsed JSON tree into a runtime value.
fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::Str(s.clone()),
        serde_json::Value::Array(items) => {
            Value::Array(Rc::new(items.iter().map(json_to_value).collect()))
        },
        serde_json::Value::Object(entries) => {
            Value::Object(Rc::new(entries.iter()
                                         .map(|(k, v)| (k.clone(), json_to_value(v)))
                                         .collect()))
        },
    }
}

/// Converts a runtime value into a JSON tree. Function values and numbers
/// without a JSON representation become `null`.
fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null | Value::Function(_) | Value::Builtin(_) | Value::HostFn(_) => {
            serde_json::Value::Null
        },
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => {
            // Integral doubles serialize without a trailing ".0".
            if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64 {
                serde_json::Value::Number(serde_json::Number::from(*n as i64))
            } else {
                serde_json::Number::from_f64(*n).map_or(serde_json::Value::Null,
                                                        serde_json::Value::Number)
            }
        },
        Value::Str(s) => serde_json::Value::String(s.clone()),
        Value::Array(values) => {
            serde_json::Value::Array(values.iter().map(value_to_json).collect())
        },
        Value::Object(entries) => {
            serde_json::Value::Object(entries.iter()
                                             .map(|(k, v)| (k.clone(), value_to_json(v)))
                                             .collect())
        },
    }
}
