use std::rc::Rc;

use crate::{
    ast::{Expr, Stmt, TemplatePart},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::core::builtin_name,
        },
        value::core::{FunctionValue, Value},
    },
};

impl Context {
    /// Resolves an identifier.
    ///
    /// Lookup order: the variables map, then host-registered functions,
    /// then built-ins. Host functions and built-ins resolve to callable
    /// values, so they can be passed around like any other value.
    ///
    /// # Errors
    /// `UndefinedVariable` when no source supplies the name.
    pub(crate) fn eval_identifier(&mut self, name: &str) -> EvalResult<Value> {
        if let Some(value) = self.variables.get(name) {
            return Ok(value.clone());
        }
        if let Some(host) = self.host_function(name) {
            return Ok(Value::HostFn(host.clone()));
        }
        if let Some(builtin) = builtin_name(name) {
            return Ok(Value::Builtin(builtin));
        }

        Err(RuntimeError::UndefinedVariable { name: name.to_string() })
    }

    /// Evaluates a string template by concatenating its parts.
    ///
    /// Literal parts pass through unchanged; expression parts are evaluated
    /// and stringified with the same rule string `+` uses. A template whose
    /// parts are all literals behaves exactly like a plain string.
    pub(crate) fn eval_template(&mut self, parts: &[TemplatePart]) -> EvalResult<Value> {
        let mut text = String::new();

        for part in parts {
            match part {
                TemplatePart::Literal(s) => text.push_str(s),
                TemplatePart::Expr(expr) => {
                    let value = self.eval_expr(expr)?;
                    text.push_str(&value.to_string());
                },
            }
        }

        Ok(Value::Str(text))
    }

    /// Evaluates an array literal, element by element in source order.
    pub(crate) fn eval_array_literal(&mut self, elements: &[Expr]) -> EvalResult<Value> {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            values.push(self.eval_expr(element)?);
        }
        Ok(Value::Array(Rc::new(values)))
    }

    /// Evaluates an object literal. Values are evaluated in declaration
    /// order; a duplicated key keeps the last value.
    pub(crate) fn eval_object_literal(&mut self, pairs: &[(String, Expr)]) -> EvalResult<Value> {
        let mut entries = Vec::with_capacity(pairs.len());
        for (key, expr) in pairs {
            entries.push((key.clone(), self.eval_expr(expr)?));
        }
        Ok(Value::object_from_pairs(entries))
    }

    /// Evaluates a function literal into a function value.
    ///
    /// The current variables map is captured by snapshot. Later mutations
    /// of the caller's variables are not observed through the snapshot;
    /// recursion still works because names are resolved through the
    /// caller's map at call time.
    pub(crate) fn eval_function_literal(&mut self, params: &[String], body: &[Stmt]) -> Value {
        Value::Function(Rc::new(FunctionValue { params:   params.to_vec(),
                                                body:     body.to_vec(),
                                                captured: self.variables.clone(), }))
    }
}
