use base64::Engine;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Encodes a string as standard base64.
pub fn base64_encode(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let encoded = base64::engine::general_purpose::STANDARD.encode(args[0].as_str()?);
    Ok(Value::Str(encoded))
}

/// Decodes standard base64 into a UTF-8 string.
///
/// # Errors
/// `InvalidArgument` when the input is not valid base64 or does not decode
/// to UTF-8.
pub fn base64_decode(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let bytes =
        base64::engine::general_purpose::STANDARD.decode(args[0].as_str()?)
                                                 .map_err(|e| RuntimeError::InvalidArgument { details: format!("invalid base64: {e}"), })?;

    let text =
        String::from_utf8(bytes).map_err(|_| RuntimeError::InvalidArgument { details: "base64 input does not decode to UTF-8".to_string(), })?;

    Ok(Value::Str(text))
}

/// Percent-encodes a string for use in a URL component.
pub fn url_encode(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Str(urlencoding::encode(args[0].as_str()?).into_owned()))
}

/// Decodes a percent-encoded URL component.
///
/// # Errors
/// `InvalidArgument` when the input contains malformed percent escapes.
pub fn url_decode(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let decoded =
        urlencoding::decode(args[0].as_str()?).map_err(|e| RuntimeError::InvalidArgument { details: format!("invalid URL encoding: {e}"), })?;

    Ok(Value::Str(decoded.into_owned()))
}
