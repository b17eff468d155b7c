/// Array built-ins, including the higher-order family (`map`, `filter`,
/// `reduce`, `find`, `findIndex`) and the sorts.
pub mod arrays;
/// Date and time built-ins. Timestamps are milliseconds since the Unix
/// epoch, interpreted in UTC.
pub mod datetime;
/// Base64 and URL encoding built-ins.
pub mod encoding;
/// Cryptographic hash built-ins producing hex digests.
pub mod hash;
/// JSON parsing and serialization built-ins.
pub mod json;
/// Math built-ins over doubles.
pub mod math;
/// The `print` built-in, which appends to the run's captured output.
pub mod print;
/// Random number, integer, and UUID built-ins.
pub mod random;
/// String built-ins. Positions and lengths count characters, not bytes.
pub mod strings;
/// Type inspection and conversion built-ins.
pub mod types;

/// The registry and dispatch core: the builtin table with arity checking,
/// call-expression evaluation, and the `apply_function` bridge that lets
/// higher-order builtins invoke function values.
pub mod core;
