//! # kodiscript
//!
//! kodiscript is an embeddable scripting language written in Rust.
//! A host application injects variables, registers functions, executes a
//! short script, and receives back a value plus any captured output and
//! errors. The runtime is a lexer, a recursive-descent parser, and a
//! tree-walking evaluator with lexical closures, a standard library of
//! built-ins, and configurable execution limits.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::collections::HashMap;

use log::debug;

use crate::interpreter::{evaluator::core::Context, parser::core::parse_source};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Stmt` enums and related types that
/// represent the syntactic structure of source code as a tree. The AST is
/// built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Keeps nodes purely structural and immutable once created.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing,
/// parsing, or evaluating code. It standardizes error reporting and carries
/// detailed information about failures.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line/column information where the source position is known.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, error handling, and all supporting infrastructure to
/// provide a complete runtime for source code evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides the building blocks behind the public entry points.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert the language's doubles into container positions.
pub mod util;

pub use crate::{
    error::Error,
    interpreter::value::core::{HostCallable, HostFunction, Value},
};

/// The record returned to the host after a run.
///
/// `value` is the program's final value (null when `errors` is non-empty),
/// `output` collects one string per `print` call in order, and `errors`
/// holds human-readable failure messages — an empty list means the run
/// completed.
#[derive(Debug)]
pub struct RunResult {
    /// The final value of the program.
    pub value:  Value,
    /// Lines captured from `print`, in call order.
    pub output: Vec<String>,
    /// Failure messages; non-empty means the run did not complete.
    pub errors: Vec<String>,
}

/// Evaluates a source string and returns only its value.
///
/// No variables are injected and no limits apply. Errors — parse-time or
/// run-time — are propagated to the caller rather than folded into a
/// result record.
///
/// # Errors
/// Returns an [`Error`] if the source fails to lex, parse, or evaluate.
///
/// # Examples
/// ```
/// use kodiscript::{Value, evaluate};
///
/// let value = evaluate("2 + 3 * 4").unwrap();
/// assert_eq!(value, Value::Number(14.0));
///
/// // Unknown names are an error.
/// assert!(evaluate("undefined_variable").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Value, Error> {
    let program = parse_source(source)?;
    let mut context = Context::new();
    Ok(context.run_program(&program)?)
}

/// Runs a source string with optional injected variables and returns the
/// full result record.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// use kodiscript::{Value, run};
///
/// let mut variables = HashMap::new();
/// variables.insert("x".to_string(), Value::Number(41.0));
///
/// let result = run("x + 1", Some(variables));
/// assert_eq!(result.value, Value::Number(42.0));
/// assert!(result.errors.is_empty());
/// ```
#[must_use]
pub fn run(source: &str, variables: Option<HashMap<String, Value>>) -> RunResult {
    let mut runner = Runner::new();
    if let Some(variables) = variables {
        runner = runner.variables(variables);
    }
    runner.execute(source)
}

/// Builds one configured script execution.
///
/// A runner accepts variables (individually or in bulk), host functions,
/// an operation cap, and a timeout, then executes a source exactly once.
/// `execute` consumes the runner.
///
/// # Examples
/// ```
/// use std::rc::Rc;
///
/// use kodiscript::{Runner, Value};
///
/// let result = Runner::new()
///     .variable("name", Value::Str("PHP".to_string()))
///     .function("greet", Rc::new(|args: &[Value]| {
///         Ok(Value::Str(format!("Hello, {}!", args[0])))
///     }))
///     .execute("greet(name)");
///
/// assert_eq!(result.value, Value::Str("Hello, PHP!".to_string()));
/// ```
#[derive(Default)]
pub struct Runner {
    variables:      HashMap<String, Value>,
    functions:      Vec<HostFunction>,
    max_operations: Option<u64>,
    timeout_ms:     Option<i64>,
}

impl Runner {
    /// Creates an empty runner: no variables, no host functions, no
    /// limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Injects one variable.
    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    /// Injects a map of variables, overriding earlier values for the same
    /// names.
    #[must_use]
    pub fn variables(mut self, variables: HashMap<String, Value>) -> Self {
        self.variables.extend(variables);
        self
    }

    /// Registers a host function under the given name. Host functions are
    /// resolved after variables and before built-ins.
    #[must_use]
    pub fn function(mut self, name: impl Into<String>, callable: HostCallable) -> Self {
        self.functions.push(HostFunction::new(name, callable));
        self
    }

    /// Caps the number of AST nodes the run may evaluate. Exceeding the
    /// cap terminates the run with a limit error.
    #[must_use]
    pub const fn max_operations(mut self, limit: u64) -> Self {
        self.max_operations = Some(limit);
        self
    }

    /// Gives the run a wall-clock budget in milliseconds, measured from
    /// the moment `execute` starts.
    #[must_use]
    pub const fn timeout_ms(mut self, timeout: i64) -> Self {
        self.timeout_ms = Some(timeout);
        self
    }

    /// Executes a source string once, producing the full result record.
    ///
    /// Any error — lexical, syntactic, or runtime — terminates the run and
    /// lands as a message in the record's `errors`; output captured before
    /// the error is preserved.
    #[must_use]
    pub fn execute(self, source: &str) -> RunResult {
        debug!("executing script of {} bytes", source.len());

        let program = match parse_source(source) {
            Ok(program) => program,
            Err(e) => {
                return RunResult { value:  Value::Null,
                                   output: Vec::new(),
                                   errors: vec![e.to_string()], };
            },
        };

        let mut context = Context::new();
        for (name, value) in self.variables {
            context.insert_variable(name, value);
        }
        for function in self.functions {
            context.register_function(function);
        }
        if let Some(limit) = self.max_operations {
            context.set_max_operations(limit);
        }
        if let Some(timeout) = self.timeout_ms {
            context.set_deadline(chrono::Utc::now().timestamp_millis() + timeout);
        }

        match context.run_program(&program) {
            Ok(value) => RunResult { value,
                                     output: context.take_output(),
                                     errors: Vec::new(), },
            Err(e) => {
                debug!("run terminated with error: {e}");
                RunResult { value:  Value::Null,
                            output: context.take_output(),
                            errors: vec![e.to_string()], }
            },
        }
    }
}
