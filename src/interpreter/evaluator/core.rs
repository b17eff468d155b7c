use std::collections::HashMap;

use log::debug;

use crate::{
    ast::{Expr, Program, Stmt},
    error::RuntimeError,
    interpreter::value::core::{HostFunction, Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Outcome of evaluating a statement.
///
/// `return` propagates as the `Return` discriminant through blocks, branch
/// arms, and loop bodies until a function activation (or the program top
/// level) absorbs it. Everything else flows as `Normal`.
#[derive(Debug)]
pub enum Flow {
    /// Ordinary completion carrying the statement's value.
    Normal(Value),
    /// A `return` travelling to the nearest enclosing function activation.
    Return(Value),
}

impl Flow {
    /// Collapses the flow into its carried value. Used at function
    /// activation boundaries, where a normal completion yields the last
    /// statement's value and a return yields the signalled value.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Normal(value) | Self::Return(value) => value,
        }
    }
}

/// Stores the runtime evaluation context.
///
/// A `Context` holds the variables map, the host-function registry, the
/// captured output lines, and the configured execution limits. One context
/// serves exactly one program run; concurrent runs need independent
/// contexts.
///
/// Name resolution order is: variables, host-registered functions,
/// built-ins.
pub struct Context {
    /// The active name-to-value mapping. Function activation saves and
    /// restores this map wholesale, so names bound inside a call do not
    /// leak out.
    pub variables:  HashMap<String, Value>,
    host_functions: HashMap<String, HostFunction>,
    output:         Vec<String>,
    operations:     u64,
    max_operations: Option<u64>,
    deadline_ms:    Option<i64>,
}

#[allow(clippy::new_without_default)]
impl Context {
    /// Creates a new evaluation context with no variables, no host
    /// functions, and no limits.
    #[must_use]
    pub fn new() -> Self {
        Self { variables:      HashMap::new(),
               host_functions: HashMap::new(),
               output:         Vec::new(),
               operations:     0,
               max_operations: None,
               deadline_ms:    None, }
    }

    /// Seeds a variable before the run starts.
    pub fn insert_variable(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Registers a host function, consulted after variables and before
    /// built-ins.
    pub fn register_function(&mut self, function: HostFunction) {
        self.host_functions.insert(function.name.clone(), function);
    }

    /// Caps the number of AST nodes the run may evaluate.
    pub fn set_max_operations(&mut self, limit: u64) {
        self.max_operations = Some(limit);
    }

    /// Sets the absolute wall-clock deadline (epoch milliseconds) the run
    /// must not cross.
    pub fn set_deadline(&mut self, epoch_ms: i64) {
        self.deadline_ms = Some(epoch_ms);
    }

    /// Looks up a registered host function by name.
    #[must_use]
    pub fn host_function(&self, name: &str) -> Option<&HostFunction> {
        self.host_functions.get(name)
    }

    /// Appends one line to the captured output. Used by the `print`
    /// built-in.
    pub fn push_output(&mut self, line: String) {
        self.output.push(line);
    }

    /// Takes the output captured so far, leaving the buffer empty.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Charges one operation and enforces the configured limits.
    ///
    /// Called once at the start of every node evaluation, which bounds how
    /// far any loop can run past its budget or deadline.
    fn tick(&mut self) -> EvalResult<()> {
        self.operations += 1;

        if let Some(limit) = self.max_operations
           && self.operations > limit
        {
            debug!("operation limit of {limit} exceeded");
            return Err(RuntimeError::OperationLimitExceeded { limit });
        }

        if let Some(deadline) = self.deadline_ms
           && chrono::Utc::now().timestamp_millis() > deadline
        {
            debug!("wall-clock deadline crossed after {} operations", self.operations);
            return Err(RuntimeError::Timeout);
        }

        Ok(())
    }

    /// Runs a parsed program to completion.
    ///
    /// Statements evaluate in order. A top-level `return` terminates the
    /// program with its value; otherwise the program's value is the last
    /// statement's value, or null for an empty program.
    ///
    /// # Errors
    /// Any runtime error aborts the run immediately; output captured before
    /// the error remains in the context.
    pub fn run_program(&mut self, program: &Program) -> EvalResult<Value> {
        self.tick()?;

        let mut last = Value::Null;
        for statement in &program.statements {
            match self.eval_statement(statement)? {
                Flow::Normal(value) => last = value,
                Flow::Return(value) => return Ok(value),
            }
        }

        Ok(last)
    }

    /// Evaluates a single statement.
    ///
    /// `let` and plain assignment both write the name into the current
    /// variables map and yield the assigned value; there is no separate
    /// declaration semantic. Loops yield null, `if` yields the taken
    /// branch's value, and blocks yield their last statement's value.
    pub fn eval_statement(&mut self, statement: &Stmt) -> EvalResult<Flow> {
        self.tick()?;

        match statement {
            Stmt::Let { name, value } | Stmt::Assign { name, value } => {
                let value = self.eval_expr(value)?;
                self.variables.insert(name.clone(), value.clone());
                Ok(Flow::Normal(value))
            },
            Stmt::If { condition,
                       then_branch,
                       else_branch, } => {
                if self.eval_expr(condition)?.is_truthy() {
                    self.eval_statement(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.eval_statement(else_branch)
                } else {
                    Ok(Flow::Normal(Value::Null))
                }
            },
            Stmt::ForIn { variable,
                          iterable,
                          body, } => self.eval_for_in(variable, iterable, body),
            Stmt::While { condition, body } => self.eval_while(condition, body),
            Stmt::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            },
            Stmt::Block(statements) => self.eval_block(statements),
            Stmt::Expression(expr) => Ok(Flow::Normal(self.eval_expr(expr)?)),
        }
    }

    /// Evaluates the statements of a block in order.
    ///
    /// The block's value is the last statement's value, or null when the
    /// block is empty. A `Return` flow passes through untouched.
    pub fn eval_block(&mut self, statements: &[Stmt]) -> EvalResult<Flow> {
        let mut last = Value::Null;
        for statement in statements {
            match self.eval_statement(statement)? {
                Flow::Normal(value) => last = value,
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }
        }
        Ok(Flow::Normal(last))
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The
    /// evaluator dispatches based on expression variant: literals,
    /// identifiers, unary and binary operations, calls, member and index
    /// access, the elvis operator, literals for arrays, objects, and
    /// functions, and string templates.
    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        self.tick()?;

        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Template(parts) => self.eval_template(parts),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Null => Ok(Value::Null),
            Expr::Identifier(name) => self.eval_identifier(name),
            Expr::Binary { op, left, right } => self.eval_binary(*op, left, right),
            Expr::Unary { op, expr } => self.eval_unary(*op, expr),
            Expr::Call { callee, arguments } => self.eval_call(callee, arguments),
            Expr::Member { object, property } => self.eval_member(object, property, false),
            Expr::SafeMember { object, property } => self.eval_member(object, property, true),
            Expr::Elvis { left, right } => self.eval_elvis(left, right),
            Expr::Array(elements) => self.eval_array_literal(elements),
            Expr::Object(pairs) => self.eval_object_literal(pairs),
            Expr::Index { object, index } => self.eval_index(object, index),
            Expr::Function { params, body } => Ok(self.eval_function_literal(params, body)),
        }
    }
}
