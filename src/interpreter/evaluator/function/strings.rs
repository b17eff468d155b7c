use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Returns the element count of a string (characters), array, or object.
/// Registered both as `length` and as `size`.
pub fn length(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let count = match &args[0] {
        Value::Str(s) => s.chars().count(),
        Value::Array(values) => values.len(),
        Value::Object(entries) => entries.len(),
        other => {
            return Err(RuntimeError::InvalidArgument { details: format!("cannot take the length of a value of type {}",
                                                                        other.type_name()), });
        },
    };

    Ok(Value::Number(count as f64))
}

/// Extracts the characters from `start` (inclusive) to `end` (exclusive).
///
/// Indices are character positions, clamped to the string's bounds; with
/// the third argument omitted the substring extends to the end.
pub fn substring(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let s = args[0].as_str()?;
    let chars: Vec<char> = s.chars().collect();

    let start = (args[1].to_number()?.trunc().max(0.0) as usize).min(chars.len());
    let end = match args.get(2) {
        Some(v) => (v.to_number()?.trunc().max(0.0) as usize).min(chars.len()),
        None => chars.len(),
    };

    let text: String = if start < end {
        chars[start..end].iter().collect()
    } else {
        String::new()
    };

    Ok(Value::Str(text))
}

/// Uppercases the string.
pub fn to_upper_case(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Str(args[0].as_str()?.to_uppercase()))
}

/// Lowercases the string.
pub fn to_lower_case(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Str(args[0].as_str()?.to_lowercase()))
}

/// Strips leading and trailing whitespace.
pub fn trim(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Str(args[0].as_str()?.trim().to_string()))
}

/// Replaces every occurrence of a substring. An empty search string leaves
/// the input unchanged.
pub fn replace(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let s = args[0].as_str()?;
    let from = args[1].as_str()?;
    let to = args[2].as_str()?;

    if from.is_empty() {
        return Ok(Value::Str(s.to_string()));
    }

    Ok(Value::Str(s.replace(from, to)))
}

/// Splits a string on a separator into an array of strings. An empty
/// separator splits into individual characters.
pub fn split(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let s = args[0].as_str()?;
    let separator = args[1].as_str()?;

    let parts: Vec<Value> = if separator.is_empty() {
        s.chars().map(|c| Value::Str(c.to_string())).collect()
    } else {
        s.split(separator).map(|p| Value::Str(p.to_string())).collect()
    };

    Ok(parts.into())
}

/// Joins the elements of an array with a separator, stringifying each
/// element.
pub fn join(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let values = args[0].as_array()?;
    let separator = args[1].as_str()?;

    let joined = values.iter()
                       .map(std::string::ToString::to_string)
                       .collect::<Vec<_>>()
                       .join(separator);

    Ok(Value::Str(joined))
}

/// Tests whether the string contains the given substring.
pub fn contains(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Bool(args[0].as_str()?.contains(args[1].as_str()?)))
}

/// Tests whether the string starts with the given prefix.
pub fn starts_with(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Bool(args[0].as_str()?.starts_with(args[1].as_str()?)))
}

/// Tests whether the string ends with the given suffix.
pub fn ends_with(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Bool(args[0].as_str()?.ends_with(args[1].as_str()?)))
}

/// Returns the character position of the first occurrence of a substring,
/// or -1 when it does not occur. A match at the start of the string
/// reports position 0.
pub fn index_of(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let s = args[0].as_str()?;
    let needle = args[1].as_str()?;

    let position = s.find(needle)
                    .map_or(-1.0, |byte_offset| s[..byte_offset].chars().count() as f64);

    Ok(Value::Number(position))
}

/// Repeats the string the given number of times; a non-positive count
/// yields the empty string.
pub fn repeat(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let s = args[0].as_str()?;
    let count = args[1].to_number()?.trunc().max(0.0) as usize;

    Ok(Value::Str(s.repeat(count)))
}

/// Pads the string on the left up to the target character length. The pad
/// string (default a single space) repeats and is cut to fit.
pub fn pad_left(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let (s, padding) = build_padding(args)?;
    Ok(Value::Str(format!("{padding}{s}")))
}

/// Pads the string on the right up to the target character length. The pad
/// string (default a single space) repeats and is cut to fit.
pub fn pad_right(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let (s, padding) = build_padding(args)?;
    Ok(Value::Str(format!("{s}{padding}")))
}

/// Computes the filler both pad directions share: the original string and
/// the repeated-then-cut pad text needed to reach the target length.
fn build_padding(args: &[Value]) -> EvalResult<(String, String)> {
    let s = args[0].as_str()?;
    let target = args[1].to_number()?.trunc().max(0.0) as usize;
    let pad = match args.get(2) {
        Some(v) => v.as_str()?.to_string(),
        None => " ".to_string(),
    };

    let current = s.chars().count();
    if current >= target || pad.is_empty() {
        return Ok((s.to_string(), String::new()));
    }

    let missing = target - current;
    let padding: String = pad.chars().cycle().take(missing).collect();

    Ok((s.to_string(), padding))
}
