/// Binary operator parsing.
///
/// Implements the precedence ladder from logical OR down to
/// multiplication, all left-associative, by recursive descent.
pub mod binary;

/// Block parsing.
///
/// Parses brace-delimited statement sequences shared by blocks, loop
/// bodies, and function bodies.
pub mod block;

/// Core parsing entry points.
///
/// Contains the program and expression entry points, including the
/// lowest-precedence elvis level.
pub mod core;

/// Statement parsing.
///
/// Dispatches on the leading token to the statement forms: `let`,
/// assignment, `if`, `for`, `while`, `return`, blocks, and expression
/// statements.
pub mod statement;

/// String template expansion.
///
/// Splits a template literal's body into literal and `${...}` expression
/// parts, re-parsing each embedded fragment.
pub mod template;

/// Unary, postfix, and primary parsing.
///
/// Handles prefix operators, the postfix chain (calls, member access,
/// indexing), and all primary forms including array, object, and function
/// literals.
pub mod unary;

/// Shared parsing utilities.
///
/// Comma-separated lists, identifier and required-token consumption, and
/// semicolon absorption.
pub mod utils;
