use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::Stmt,
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
};

/// The callable signature of a host-registered function.
///
/// Host functions receive already-evaluated arguments and report failures
/// as plain strings, which the evaluator captures verbatim.
pub type HostCallable = Rc<dyn Fn(&[Value]) -> Result<Value, String>>;

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations. There is no
/// integer type at the value level; every number is an IEEE-754 double.
#[derive(Debug, Clone)]
pub enum Value {
    /// The null value.
    Null,
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A Unicode string.
    Str(String),
    /// An ordered array of values.
    Array(Rc<Vec<Self>>),
    /// An insertion-ordered mapping from string keys to values. Keys are
    /// unique; construction keeps the last write.
    Object(Rc<Vec<(String, Self)>>),
    /// A user-defined function together with its captured environment.
    Function(Rc<FunctionValue>),
    /// A built-in function, identified by its registry name.
    Builtin(&'static str),
    /// A function registered by the embedding host.
    HostFn(HostFunction),
}

/// A user-defined function value: parameters, body, and the snapshot of the
/// variables map taken when the function literal was evaluated.
#[derive(Debug, Clone)]
pub struct FunctionValue {
    /// Parameter names in order. Missing arguments bind to null; extras are
    /// ignored.
    pub params:   Vec<String>,
    /// The statements of the function body.
    pub body:     Vec<Stmt>,
    /// Variables captured at creation time. Resolution still consults the
    /// caller's map first at call time, which is what makes
    /// `let f = fn(n) { ... f(n - 1) ... }` recursive.
    pub captured: HashMap<String, Value>,
}

/// A named callable provided by the embedding host.
#[derive(Clone)]
pub struct HostFunction {
    /// The name the function is registered under.
    pub name: String,
    callable: HostCallable,
}

impl HostFunction {
    /// Wraps a host callable under the given registration name.
    pub fn new(name: impl Into<String>, callable: HostCallable) -> Self {
        Self { name: name.into(),
               callable }
    }

    /// Invokes the host callable, converting its failure message into a
    /// runtime error verbatim.
    pub fn call(&self, args: &[Value]) -> EvalResult<Value> {
        (self.callable)(args).map_err(|message| RuntimeError::HostFunction { name: self.name
                                                                                       .clone(),
                                                                             message })
    }
}

impl std::fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HostFunction").field(&self.name).finish()
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl PartialEq for Value {
    /// Strict equality: values of different kinds are never equal, so
    /// `1 == "1"` is false. Arrays and objects compare element-wise;
    /// function-like values compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => a == b,
            (Self::HostFn(a), Self::HostFn(b)) => {
                a.name == b.name && Rc::ptr_eq(&a.callable, &b.callable)
            },
            _ => false,
        }
    }
}

impl Value {
    /// Returns the language-level type name of the value, as reported by
    /// the `typeOf` built-in.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Function(_) | Self::Builtin(_) | Self::HostFn(_) => "function",
        }
    }

    /// Applies the truthiness rule: `null`, `false`, numeric `0`, and the
    /// empty string are false; everything else (including empty arrays,
    /// empty objects, and any function) is true.
    ///
    /// # Example
    /// ```
    /// use kodiscript::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::Str(String::new()).is_truthy());
    /// assert!(Value::Array(vec![].into()).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Coerces the value to a number.
    ///
    /// Null becomes 0, booleans become 0 or 1, and strings are parsed after
    /// trimming, defaulting to 0 when they do not parse. Arrays, objects,
    /// and functions do not convert.
    ///
    /// # Errors
    /// `TypeError` for arrays, objects, and function values.
    pub fn to_number(&self) -> EvalResult<f64> {
        match self {
            Self::Null => Ok(0.0),
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Number(n) => Ok(*n),
            Self::Str(s) => Ok(s.trim().parse().unwrap_or(0.0)),
            _ => Err(RuntimeError::TypeError { details: format!("cannot convert a value of type {} to a number",
                                                                self.type_name()), }),
        }
    }

    /// Borrows the value as a string slice, or reports which type was
    /// found instead.
    pub fn as_str(&self) -> EvalResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            _ => Err(RuntimeError::InvalidArgument { details: format!("expected a string, found {}",
                                                                      self.type_name()), }),
        }
    }

    /// Borrows the value as an array, or reports which type was found
    /// instead.
    pub fn as_array(&self) -> EvalResult<&Vec<Self>> {
        match self {
            Self::Array(values) => Ok(values),
            _ => Err(RuntimeError::InvalidArgument { details: format!("expected an array, found {}",
                                                                      self.type_name()), }),
        }
    }

    /// Looks up a key on an object value. Returns `None` for missing keys
    /// and for non-object receivers.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(entries) => entries.iter()
                                            .find(|(k, _)| k == key)
                                            .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Returns `true` if the value is [`Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Builds an object value from key/value pairs, keeping the last value
    /// for any duplicated key while preserving first-insertion order.
    #[must_use]
    pub fn object_from_pairs(pairs: Vec<(String, Self)>) -> Self {
        let mut entries: Vec<(String, Self)> = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            if let Some(existing) = entries.iter_mut().find(|(k, _)| *k == key) {
                existing.1 = value;
            } else {
                entries.push((key, value));
            }
        }
        Self::Object(Rc::new(entries))
    }
}

/// Writes a value in its nested, JSON-like form: strings gain quotes and
/// escapes, arrays and objects recurse, and other values use their plain
/// stringification.
fn write_nested(f: &mut std::fmt::Formatter<'_>, value: &Value) -> std::fmt::Result {
    match value {
        Value::Str(s) => {
            write!(f, "\"")?;
            for c in s.chars() {
                match c {
                    '"' => write!(f, "\\\"")?,
                    '\\' => write!(f, "\\\\")?,
                    '\n' => write!(f, "\\n")?,
                    '\t' => write!(f, "\\t")?,
                    '\r' => write!(f, "\\r")?,
                    _ => write!(f, "{c}")?,
                }
            }
            write!(f, "\"")
        },
        _ => write!(f, "{value}"),
    }
}

impl std::fmt::Display for Value {
    /// Stringification for printing and string concatenation: `null`,
    /// booleans, and numbers use their literal spelling, strings print as
    /// themselves, and arrays and objects use a JSON-like form with Unicode
    /// preserved. Function values print as `<fn>`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Array(values) => {
                write!(f, "[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, ",")?;
                    }
                    write_nested(f, value)?;
                }
                write!(f, "]")
            },
            Self::Object(entries) => {
                write!(f, "{{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "\"{key}\":")?;
                    write_nested(f, value)?;
                }
                write!(f, "}}")
            },
            Self::Function(_) | Self::Builtin(_) | Self::HostFn(_) => write!(f, "<fn>"),
        }
    }
}
