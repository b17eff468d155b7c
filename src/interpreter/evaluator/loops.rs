use crate::{
    ast::{Expr, Stmt},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a `for (name in iterable) { ... }` loop.
    ///
    /// Arrays iterate their elements, objects their values, and strings
    /// their characters, all in insertion/source order. The loop variable
    /// is written into the variables map for each element and, like any
    /// binding, remains visible after the loop. A `return` inside the body
    /// propagates outward; otherwise the loop yields null.
    pub(crate) fn eval_for_in(&mut self,
                              variable: &str,
                              iterable: &Expr,
                              body: &[Stmt])
                              -> EvalResult<Flow> {
        let iterated = self.eval_expr(iterable)?;

        let items: Vec<Value> = match iterated {
            Value::Array(values) => values.iter().cloned().collect(),
            Value::Object(entries) => entries.iter().map(|(_, v)| v.clone()).collect(),
            Value::Str(s) => s.chars().map(|c| Value::Str(c.to_string())).collect(),
            other => return Err(RuntimeError::NotIterable { kind: other.type_name() }),
        };

        for item in items {
            self.variables.insert(variable.to_string(), item);

            if let Flow::Return(value) = self.eval_block(body)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal(Value::Null))
    }

    /// Evaluates a `while (condition) { ... }` loop.
    ///
    /// The condition is re-evaluated before every turn, which also charges
    /// the operation counter, so a busy loop still terminates under a
    /// configured limit or deadline.
    pub(crate) fn eval_while(&mut self, condition: &Expr, body: &[Stmt]) -> EvalResult<Flow> {
        while self.eval_expr(condition)?.is_truthy() {
            if let Flow::Return(value) = self.eval_block(body)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal(Value::Null))
    }
}
