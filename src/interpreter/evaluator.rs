/// Member, index, and elvis evaluation.
///
/// Handles property access (plain and null-safe), indexing of arrays,
/// objects, and strings, and the null-coalescing elvis operator.
pub mod access;

/// Binary operator evaluation.
///
/// Implements evaluation for all binary operations, including arithmetic
/// with string concatenation, strict equality, ordering, and the logical
/// operators.
pub mod binary;

/// Core evaluation logic and context management.
///
/// Contains the evaluation context, statement and expression dispatch, the
/// return-flow discriminant, and limit enforcement.
pub mod core;

/// Function evaluation.
///
/// Handles user-defined function activation, host-function invocation, the
/// built-in registry, and the built-ins themselves.
pub mod function;

/// Loop evaluation.
///
/// Implements `for`-in iteration over arrays, objects, and strings, and
/// `while` loops, with `return` propagation out of loop bodies.
pub mod loops;

/// Unary operator evaluation.
///
/// Handles numeric negation and logical not.
pub mod unary;

/// Utility evaluations for the remaining node kinds.
///
/// Identifier resolution, string templates, array/object literals, and
/// function-literal closure capture.
pub mod utils;
