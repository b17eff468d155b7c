use chrono::{
    DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
    format::{Item, StrftimeItems},
};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Milliseconds per day, the unit shared by `addDays` and `diffDays`.
const MS_PER_DAY: f64 = 86_400_000.0;
/// Milliseconds per hour.
const MS_PER_HOUR: f64 = 3_600_000.0;

/// Returns the current time as milliseconds since the Unix epoch.
///
/// All date built-ins exchange timestamps in this form and interpret them
/// in UTC.
pub fn now(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let _ = args;
    Ok(Value::Number(Utc::now().timestamp_millis() as f64))
}

/// Formats a timestamp (default: now) as `YYYY-MM-DD`.
pub fn date(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Str(optional_timestamp(args)?.format("%Y-%m-%d").to_string()))
}

/// Formats a timestamp (default: now) as `HH:MM:SS`.
pub fn time(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Str(optional_timestamp(args)?.format("%H:%M:%S").to_string()))
}

/// Formats a timestamp (default: now) as `YYYY-MM-DD HH:MM:SS`.
pub fn datetime(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Str(optional_timestamp(args)?.format("%Y-%m-%d %H:%M:%S").to_string()))
}

/// Converts a date string to a millisecond timestamp; with no argument,
/// returns the current timestamp.
///
/// Accepted inputs are `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD` (midnight),
/// both read as UTC.
pub fn timestamp(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let Some(arg) = args.first() else {
        return Ok(Value::Number(Utc::now().timestamp_millis() as f64));
    };

    let text = arg.as_str()?;
    let parsed = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN))
        })
        .map_err(|_| RuntimeError::InvalidArgument { details: format!("cannot parse \"{text}\" as a date"), })?;

    Ok(Value::Number(parsed.and_utc().timestamp_millis() as f64))
}

/// Formats a timestamp with a strftime-style format string, defaulting to
/// `%Y-%m-%d %H:%M:%S`.
///
/// # Errors
/// `InvalidArgument` when the format string contains an unknown specifier.
pub fn format_date(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let moment = ms_to_datetime(args[0].to_number()?)?;
    let format = match args.get(1) {
        Some(v) => v.as_str()?,
        None => "%Y-%m-%d %H:%M:%S",
    };

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(RuntimeError::InvalidArgument { details: format!("invalid date format \"{format}\""), });
    }

    Ok(Value::Str(moment.format(format).to_string()))
}

/// Extracts the calendar year of a timestamp (default: now).
pub fn year(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(f64::from(optional_timestamp(args)?.year())))
}

/// Extracts the calendar month (1-12) of a timestamp (default: now).
pub fn month(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(f64::from(optional_timestamp(args)?.month())))
}

/// Extracts the day of the month (1-31) of a timestamp (default: now).
pub fn day(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(f64::from(optional_timestamp(args)?.day())))
}

/// Extracts the hour (0-23) of a timestamp (default: now).
pub fn hour(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(f64::from(optional_timestamp(args)?.hour())))
}

/// Extracts the minute (0-59) of a timestamp (default: now).
pub fn minute(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(f64::from(optional_timestamp(args)?.minute())))
}

/// Extracts the second (0-59) of a timestamp (default: now).
pub fn second(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(f64::from(optional_timestamp(args)?.second())))
}

/// Extracts the day of the week of a timestamp (default: now), counted
/// from Sunday as 0 through Saturday as 6.
pub fn day_of_week(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let weekday = optional_timestamp(args)?.weekday();
    Ok(Value::Number(f64::from(weekday.num_days_from_sunday())))
}

/// Adds a (possibly fractional or negative) number of days to a
/// timestamp.
pub fn add_days(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(args[0].to_number()? + args[1].to_number()? * MS_PER_DAY))
}

/// Adds a (possibly fractional or negative) number of hours to a
/// timestamp.
pub fn add_hours(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(args[0].to_number()? + args[1].to_number()? * MS_PER_HOUR))
}

/// Returns the whole-day difference between two timestamps, truncated
/// toward zero.
pub fn diff_days(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let difference = (args[0].to_number()? - args[1].to_number()?) / MS_PER_DAY;
    Ok(Value::Number(difference.trunc()))
}

/// Reads the optional leading timestamp argument, defaulting to now.
fn optional_timestamp(args: &[Value]) -> EvalResult<DateTime<Utc>> {
    match args.first() {
        Some(value) => ms_to_datetime(value.to_number()?),
        None => Ok(Utc::now()),
    }
}

/// Converts a millisecond timestamp into a UTC date-time.
fn ms_to_datetime(ms: f64) -> EvalResult<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms.trunc() as i64)
       .single()
       .ok_or_else(|| RuntimeError::InvalidArgument { details: format!("timestamp {ms} is out of range"), })
}
