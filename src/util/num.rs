/// Converts a numeric index into a container position.
///
/// Returns `None` for negative, non-finite, or absurdly large values, which
/// index operations treat as out of bounds. The fractional part is
/// truncated, so `arr[1.9]` reads position 1.
///
/// # Example
/// ```
/// use kodiscript::util::num::f64_to_index;
///
/// assert_eq!(f64_to_index(2.0), Some(2));
/// assert_eq!(f64_to_index(2.9), Some(2));
/// assert_eq!(f64_to_index(-1.0), None);
/// assert_eq!(f64_to_index(f64::NAN), None);
/// ```
#[must_use]
pub fn f64_to_index(value: f64) -> Option<usize> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let truncated = value.trunc();
    if truncated > usize::MAX as f64 {
        return None;
    }

    Some(truncated as usize)
}
