use std::rc::Rc;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::{
                arrays, datetime, encoding, hash, json, math, print, random, strings, types,
            },
        },
        value::core::{FunctionValue, Value},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluation context and a slice of already
/// evaluated argument values. The context doubles as the evaluator handle
/// that higher-order builtins (`map`, `filter`, `reduce`, ...) use to apply
/// function-valued arguments; builtins must not enter the evaluator any
/// other way.
pub type BuiltinFn = fn(&mut Context, &[Value]) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means the builtin accepts `n` or more arguments.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every builtin, in registry order.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"        => { arity: Arity::AtLeast(0),       func: print::print },
    "toString"     => { arity: Arity::Exact(1),         func: types::to_string },
    "toNumber"     => { arity: Arity::Exact(1),         func: types::to_number },
    "typeOf"       => { arity: Arity::Exact(1),         func: types::type_of },
    "isNull"       => { arity: Arity::Exact(1),         func: types::is_null },
    "isNumber"     => { arity: Arity::Exact(1),         func: types::is_number },
    "isString"     => { arity: Arity::Exact(1),         func: types::is_string },
    "isBool"       => { arity: Arity::Exact(1),         func: types::is_bool },
    "length"       => { arity: Arity::Exact(1),         func: strings::length },
    "substring"    => { arity: Arity::OneOf(&[2, 3]),   func: strings::substring },
    "toUpperCase"  => { arity: Arity::Exact(1),         func: strings::to_upper_case },
    "toLowerCase"  => { arity: Arity::Exact(1),         func: strings::to_lower_case },
    "trim"         => { arity: Arity::Exact(1),         func: strings::trim },
    "replace"      => { arity: Arity::Exact(3),         func: strings::replace },
    "split"        => { arity: Arity::Exact(2),         func: strings::split },
    "join"         => { arity: Arity::Exact(2),         func: strings::join },
    "contains"     => { arity: Arity::Exact(2),         func: strings::contains },
    "startsWith"   => { arity: Arity::Exact(2),         func: strings::starts_with },
    "endsWith"     => { arity: Arity::Exact(2),         func: strings::ends_with },
    "indexOf"      => { arity: Arity::Exact(2),         func: strings::index_of },
    "repeat"       => { arity: Arity::Exact(2),         func: strings::repeat },
    "padLeft"      => { arity: Arity::OneOf(&[2, 3]),   func: strings::pad_left },
    "padRight"     => { arity: Arity::OneOf(&[2, 3]),   func: strings::pad_right },
    "abs"          => { arity: Arity::Exact(1),         func: math::abs },
    "floor"        => { arity: Arity::Exact(1),         func: math::floor },
    "ceil"         => { arity: Arity::Exact(1),         func: math::ceil },
    "round"        => { arity: Arity::Exact(1),         func: math::round },
    "sqrt"         => { arity: Arity::Exact(1),         func: math::sqrt },
    "sin"          => { arity: Arity::Exact(1),         func: math::sin },
    "cos"          => { arity: Arity::Exact(1),         func: math::cos },
    "tan"          => { arity: Arity::Exact(1),         func: math::tan },
    "log"          => { arity: Arity::Exact(1),         func: math::log },
    "log10"        => { arity: Arity::Exact(1),         func: math::log10 },
    "exp"          => { arity: Arity::Exact(1),         func: math::exp },
    "min"          => { arity: Arity::AtLeast(1),       func: math::min },
    "max"          => { arity: Arity::AtLeast(1),       func: math::max },
    "pow"          => { arity: Arity::Exact(2),         func: math::pow },
    "random"       => { arity: Arity::Exact(0),         func: random::random },
    "randomInt"    => { arity: Arity::Exact(2),         func: random::random_int },
    "randomUUID"   => { arity: Arity::Exact(0),         func: random::random_uuid },
    "size"         => { arity: Arity::Exact(1),         func: strings::length },
    "first"        => { arity: Arity::Exact(1),         func: arrays::first },
    "last"         => { arity: Arity::Exact(1),         func: arrays::last },
    "reverse"      => { arity: Arity::Exact(1),         func: arrays::reverse },
    "slice"        => { arity: Arity::OneOf(&[2, 3]),   func: arrays::slice },
    "sort"         => { arity: Arity::OneOf(&[1, 2]),   func: arrays::sort },
    "sortBy"       => { arity: Arity::OneOf(&[2, 3]),   func: arrays::sort_by },
    "filter"       => { arity: Arity::Exact(2),         func: arrays::filter },
    "map"          => { arity: Arity::Exact(2),         func: arrays::map },
    "reduce"       => { arity: Arity::Exact(3),         func: arrays::reduce },
    "find"         => { arity: Arity::Exact(2),         func: arrays::find },
    "findIndex"    => { arity: Arity::Exact(2),         func: arrays::find_index },
    "jsonParse"    => { arity: Arity::Exact(1),         func: json::json_parse },
    "jsonStringify" => { arity: Arity::Exact(1),        func: json::json_stringify },
    "base64Encode" => { arity: Arity::Exact(1),         func: encoding::base64_encode },
    "base64Decode" => { arity: Arity::Exact(1),         func: encoding::base64_decode },
    "urlEncode"    => { arity: Arity::Exact(1),         func: encoding::url_encode },
    "urlDecode"    => { arity: Arity::Exact(1),         func: encoding::url_decode },
    "md5"          => { arity: Arity::Exact(1),         func: hash::md5 },
    "sha1"         => { arity: Arity::Exact(1),         func: hash::sha1 },
    "sha256"       => { arity: Arity::Exact(1),         func: hash::sha256 },
    "now"          => { arity: Arity::Exact(0),         func: datetime::now },
    "date"         => { arity: Arity::OneOf(&[0, 1]),   func: datetime::date },
    "time"         => { arity: Arity::OneOf(&[0, 1]),   func: datetime::time },
    "datetime"     => { arity: Arity::OneOf(&[0, 1]),   func: datetime::datetime },
    "timestamp"    => { arity: Arity::OneOf(&[0, 1]),   func: datetime::timestamp },
    "formatDate"   => { arity: Arity::OneOf(&[1, 2]),   func: datetime::format_date },
    "year"         => { arity: Arity::OneOf(&[0, 1]),   func: datetime::year },
    "month"        => { arity: Arity::OneOf(&[0, 1]),   func: datetime::month },
    "day"          => { arity: Arity::OneOf(&[0, 1]),   func: datetime::day },
    "hour"         => { arity: Arity::OneOf(&[0, 1]),   func: datetime::hour },
    "minute"       => { arity: Arity::OneOf(&[0, 1]),   func: datetime::minute },
    "second"       => { arity: Arity::OneOf(&[0, 1]),   func: datetime::second },
    "dayOfWeek"    => { arity: Arity::OneOf(&[0, 1]),   func: datetime::day_of_week },
    "addDays"      => { arity: Arity::Exact(2),         func: datetime::add_days },
    "addHours"     => { arity: Arity::Exact(2),         func: datetime::add_hours },
    "diffDays"     => { arity: Arity::Exact(2),         func: datetime::diff_days },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity
    /// constraint.
    fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= *m,
        }
    }
}

/// Returns the canonical registry name for a builtin, or `None` when no
/// builtin is registered under the given name. The returned reference is
/// the table's own static string, suitable for storing in a value.
#[must_use]
pub fn builtin_name(name: &str) -> Option<&'static str> {
    BUILTIN_TABLE.iter().find(|b| b.name == name).map(|b| b.name)
}

/// Invokes a builtin by name after verifying its arity.
fn call_builtin(context: &mut Context, name: &str, args: &[Value]) -> EvalResult<Value> {
    let builtin =
        BUILTIN_TABLE.iter()
                     .find(|b| b.name == name)
                     .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string() })?;

    if !builtin.arity.check(args.len()) {
        return Err(RuntimeError::ArgumentCountMismatch { name: builtin.name });
    }

    (builtin.func)(context, args)
}

impl Context {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the arguments in source order,
    /// and the result is applied through [`Context::apply_function`].
    pub(crate) fn eval_call(&mut self, callee: &Expr, arguments: &[Expr]) -> EvalResult<Value> {
        let callee_value = self.eval_expr(callee)?;

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(self.eval_expr(argument)?);
        }

        self.apply_function(&callee_value, &args)
    }

    /// Applies any callable value to already-evaluated arguments.
    ///
    /// This is the bridge between the evaluator and the builtin layer:
    /// higher-order builtins receive function values as ordinary arguments
    /// and re-enter evaluation exclusively through this method.
    ///
    /// # Errors
    /// `NotCallable` when the value is not a function, host function, or
    /// builtin.
    pub fn apply_function(&mut self, callee: &Value, args: &[Value]) -> EvalResult<Value> {
        match callee {
            Value::Function(func) => self.call_function_value(func, args),
            Value::Builtin(name) => call_builtin(self, name, args),
            Value::HostFn(host) => host.call(args),
            other => Err(RuntimeError::NotCallable { kind: other.type_name() }),
        }
    }

    /// Activates a user-defined function.
    ///
    /// The caller's variables map is saved whole, the function's captured
    /// snapshot and the parameter bindings are overlaid onto it, and the
    /// body runs. Missing arguments bind to null and extra arguments are
    /// ignored. On exit the caller's map is restored entirely, so nothing
    /// bound inside the call leaks out.
    fn call_function_value(&mut self,
                           func: &Rc<FunctionValue>,
                           args: &[Value])
                           -> EvalResult<Value> {
        let saved = self.variables.clone();

        for (name, value) in &func.captured {
            self.variables.insert(name.clone(), value.clone());
        }
        for (index, param) in func.params.iter().enumerate() {
            let value = args.get(index).cloned().unwrap_or(Value::Null);
            self.variables.insert(param.clone(), value);
        }

        let flow = self.eval_block(&func.body);
        self.variables = saved;

        Ok(flow?.into_value())
    }
}
