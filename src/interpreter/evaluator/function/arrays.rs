use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Returns the first element of an array, or null when it is empty.
pub fn first(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(args[0].as_array()?.first().cloned().unwrap_or(Value::Null))
}

/// Returns the last element of an array, or null when it is empty.
pub fn last(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(args[0].as_array()?.last().cloned().unwrap_or(Value::Null))
}

/// Returns a new array with the elements in reverse order.
pub fn reverse(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let mut values = args[0].as_array()?.clone();
    values.reverse();
    Ok(values.into())
}

/// Copies the elements from `start` (inclusive) to `end` (exclusive).
/// Indices are clamped to the array's bounds; with the third argument
/// omitted the slice extends to the end.
pub fn slice(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let values = args[0].as_array()?;

    let start = (args[1].to_number()?.trunc().max(0.0) as usize).min(values.len());
    let end = match args.get(2) {
        Some(v) => (v.to_number()?.trunc().max(0.0) as usize).min(values.len()),
        None => values.len(),
    };

    let copied: Vec<Value> = if start < end {
        values[start..end].to_vec()
    } else {
        Vec::new()
    };

    Ok(copied.into())
}

/// Sorts an array into a new array.
///
/// The second argument selects the direction, `"asc"` (the default) or
/// `"desc"`. Elements of mixed types order by type rank; numbers use a
/// total float ordering and strings compare lexicographically. The sort is
/// stable.
pub fn sort(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let mut values = args[0].as_array()?.clone();
    let descending = parse_direction(args.get(1))?;

    values.sort_by(compare_values);
    if descending {
        values.reverse();
    }

    Ok(values.into())
}

/// Sorts an array of objects by the named field into a new array.
///
/// Elements that are not objects or lack the field sort with a null key,
/// which orders before every other key type. The optional third argument
/// selects `"asc"` (default) or `"desc"`. The sort is stable.
pub fn sort_by(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let values = args[0].as_array()?;
    let field = args[1].as_str()?;
    let descending = parse_direction(args.get(2))?;

    let mut keyed: Vec<(Value, Value)> =
        values.iter()
              .map(|element| {
                  let key = element.lookup(field).cloned().unwrap_or(Value::Null);
                  (key, element.clone())
              })
              .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_values(a, b));
    if descending {
        keyed.reverse();
    }

    Ok(keyed.into_iter().map(|(_, element)| element).collect::<Vec<_>>().into())
}

/// Keeps the elements for which the function argument returns a truthy
/// value.
pub fn filter(context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let values = args[0].as_array()?.clone();

    let mut kept = Vec::new();
    for element in values {
        if context.apply_function(&args[1], std::slice::from_ref(&element))?.is_truthy() {
            kept.push(element);
        }
    }

    Ok(kept.into())
}

/// Applies the function argument to every element, collecting the results.
pub fn map(context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let values = args[0].as_array()?.clone();

    let mut mapped = Vec::with_capacity(values.len());
    for element in values {
        mapped.push(context.apply_function(&args[1], &[element])?);
    }

    Ok(mapped.into())
}

/// Folds the array left to right: the function receives the accumulator
/// and the current element, starting from the given initial value.
pub fn reduce(context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let values = args[0].as_array()?.clone();

    let mut accumulator = args[2].clone();
    for element in values {
        accumulator = context.apply_function(&args[1], &[accumulator, element])?;
    }

    Ok(accumulator)
}

/// Returns the first element for which the function argument returns a
/// truthy value, or null when none matches.
pub fn find(context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let values = args[0].as_array()?.clone();

    for element in values {
        if context.apply_function(&args[1], std::slice::from_ref(&element))?.is_truthy() {
            return Ok(element);
        }
    }

    Ok(Value::Null)
}

/// Returns the index of the first element for which the function argument
/// returns a truthy value, or -1 when none matches.
pub fn find_index(context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let values = args[0].as_array()?.clone();

    for (index, element) in values.into_iter().enumerate() {
        if context.apply_function(&args[1], std::slice::from_ref(&element))?.is_truthy() {
            return Ok(Value::Number(index as f64));
        }
    }

    Ok(Value::Number(-1.0))
}

/// Reads an optional sort-direction argument: `"asc"` or `"desc"`.
fn parse_direction(arg: Option<&Value>) -> EvalResult<bool> {
    match arg {
        None => Ok(false),
        Some(value) => match value.as_str()? {
            "asc" => Ok(false),
            "desc" => Ok(true),
            other => {
                Err(RuntimeError::InvalidArgument { details: format!("sort direction must be \"asc\" or \"desc\", found \"{other}\""), })
            },
        },
    }
}

/// Total ordering over values used by `sort` and `sortBy`.
///
/// Values of different kinds order by type rank (null, boolean, number,
/// string, array, object, function); within a kind, booleans put false
/// first, numbers use a total float ordering, strings compare
/// lexicographically, and the remaining kinds tie.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    const fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::Str(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
            Value::Function(_) | Value::Builtin(_) | Value::HostFn(_) => 6,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => OrderedFloat(*x).cmp(&OrderedFloat(*y)),
        (Value::Str(x), Value::Str(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
