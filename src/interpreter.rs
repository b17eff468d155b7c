/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// manages the variables map and captured output, applies user and host
/// functions, and enforces the configured execution limits. It is the core
/// execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Implements closures, function application, and non-local `return`.
/// - Reports runtime errors such as undefined variables or division by
///   zero.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as
/// numbers, strings, identifiers, operators, delimiters, and keywords. This
/// is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source lines.
/// - Decodes string escapes and detects interpolation markers.
/// - Reports lexical errors with line and column.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST that represents the syntactic structure of expressions
/// and statements. This enables the evaluator to execute user code.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Implements the operator-precedence hierarchy by recursive descent.
/// - Validates grammar, reporting expected/actual token mismatches.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation:
/// null, booleans, numbers, strings, arrays, objects, and the three
/// function-like kinds. It also provides truthiness, numeric coercion,
/// strict equality, and the shared stringification rule.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements coercion, equality, and display behaviour.
/// - Carries user-function closures and host callables.
pub mod value;
