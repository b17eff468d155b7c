/// Parsing errors.
///
/// Defines all error types that can occur while lexing and parsing source
/// code: unexpected characters, unterminated strings, token mismatches, and
/// malformed templates. These are the only errors that carry source
/// positions.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: unresolved
/// names, type errors, division by zero, limit violations, and failures
/// reported by host-registered functions.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error a script run can produce, parse-time or run-time.
///
/// The value-only entry point returns this sum; the record-producing entry
/// points convert it into the `errors` list of a run result.
#[derive(Debug)]
pub enum Error {
    /// The source failed to lex or parse.
    Parse(ParseError),
    /// The program failed during evaluation.
    Runtime(RuntimeError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}
