#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// Encountered a byte the lexer cannot classify.
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
        /// The source column where the error occurred.
        column:    usize,
    },
    /// A string literal was still open when the input ended.
    UnterminatedString {
        /// The line of the opening quote.
        line:   usize,
        /// The column of the opening quote.
        column: usize,
    },
    /// Found a token other than the one the grammar requires.
    Expected {
        /// Description of the expected token kind.
        expected: String,
        /// Description of the token actually found.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Found a token that cannot start the current construct.
    UnexpectedToken {
        /// Description of the token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input before the construct was complete.
    UnexpectedEndOfInput {
        /// The last line seen before the input ended.
        line: usize,
    },
    /// An interpolation marker inside a template could not be parsed.
    InvalidTemplate {
        /// Details about the malformed marker.
        details: String,
        /// The line of the template literal.
        line:    usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character,
                                        line,
                                        column, } => {
                write!(f, "Error on line {line}, column {column}: Unexpected character '{character}'.")
            },
            Self::UnterminatedString { line, column } => write!(f,
                                                               "Error on line {line}, column {column}: Unterminated string literal."),
            Self::Expected { expected,
                             found,
                             line, } => {
                write!(f, "Error on line {line}: Expected {expected}, found {found}.")
            },
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },
            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },
            Self::InvalidTemplate { details, line } => {
                write!(f, "Error on line {line}: Invalid string template: {details}.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
