use md5::Digest;

use crate::interpreter::{
    evaluator::core::{Context, EvalResult},
    value::core::Value,
};

/// Returns the lowercase hex MD5 digest of the string argument.
pub fn md5(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let digest = md5::Md5::digest(args[0].as_str()?.as_bytes());
    Ok(Value::Str(hex_string(&digest)))
}

/// Returns the lowercase hex SHA-1 digest of the string argument.
pub fn sha1(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let digest = sha1::Sha1::digest(args[0].as_str()?.as_bytes());
    Ok(Value::Str(hex_string(&digest)))
}

/// Returns the lowercase hex SHA-256 digest of the string argument.
pub fn sha256(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let digest = sha2::Sha256::digest(args[0].as_str()?.as_bytes());
    Ok(Value::Str(hex_string(&digest)))
}

/// Formats a digest as lowercase hex.
fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
