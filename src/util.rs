/// Numeric conversion helpers.
///
/// This module provides safe conversions from the language's doubles to the
/// container positions used by index, slice, and substring operations,
/// without panics on negative or non-finite input.
pub mod num;
