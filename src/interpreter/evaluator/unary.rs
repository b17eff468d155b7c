use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a unary operation.
    ///
    /// `-` coerces the operand to a number and negates it; `!`/`not`
    /// inverts the operand's truthiness.
    pub(crate) fn eval_unary(&mut self, op: UnaryOperator, expr: &Expr) -> EvalResult<Value> {
        let value = self.eval_expr(expr)?;

        match op {
            UnaryOperator::Negate => Ok(Value::Number(-value.to_number()?)),
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}
