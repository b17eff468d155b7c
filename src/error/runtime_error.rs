#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
///
/// The AST carries no source positions, so runtime errors name the semantic
/// condition rather than a line.
pub enum RuntimeError {
    /// Tried to read a name that is not a variable, host function, or
    /// built-in.
    UndefinedVariable {
        /// The unresolved name.
        name: String,
    },
    /// Tried to call a value that is not callable.
    NotCallable {
        /// The type name of the value that was called.
        kind: &'static str,
    },
    /// Tried to access a property on a value without properties.
    PropertyAccess {
        /// The type name of the receiver.
        kind: &'static str,
    },
    /// Tried to index a value that supports no index operation.
    NotIndexable {
        /// The type name of the receiver.
        kind: &'static str,
    },
    /// A `for` loop was given a value it cannot iterate.
    NotIterable {
        /// The type name of the iterable.
        kind: &'static str,
    },
    /// Attempted division (or modulo) by zero.
    DivisionByZero,
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
    },
    /// A built-in was called with the wrong number of arguments.
    ArgumentCountMismatch {
        /// The built-in's name.
        name: &'static str,
    },
    /// A built-in argument was invalid or out of range.
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
    },
    /// The configured operation budget was exhausted.
    OperationLimitExceeded {
        /// The configured maximum.
        limit: u64,
    },
    /// The configured wall-clock deadline passed during evaluation.
    Timeout,
    /// A host-registered function reported a failure. The message is kept
    /// verbatim.
    HostFunction {
        /// The failing function's name.
        name:    String,
        /// The host's error message.
        message: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "Undefined variable '{name}'."),
            Self::NotCallable { kind } => write!(f, "Cannot call a value of type {kind}."),
            Self::PropertyAccess { kind } => {
                write!(f, "Cannot access a property on a value of type {kind}.")
            },
            Self::NotIndexable { kind } => write!(f, "Cannot index a value of type {kind}."),
            Self::NotIterable { kind } => write!(f, "Cannot iterate a value of type {kind}."),
            Self::DivisionByZero => write!(f, "Division by zero."),
            Self::TypeError { details } => write!(f, "Type error: {details}."),
            Self::ArgumentCountMismatch { name } => {
                write!(f, "Wrong number of arguments for '{name}'.")
            },
            Self::InvalidArgument { details } => write!(f, "Invalid argument: {details}."),
            Self::OperationLimitExceeded { limit } => {
                write!(f, "Maximum operation count of {limit} exceeded.")
            },
            Self::Timeout => write!(f, "Execution timed out."),
            Self::HostFunction { name, message } => {
                write!(f, "Host function '{name}' failed: {message}")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
