use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation.
    ///
    /// Both operands are always evaluated, in source order, before the
    /// operator is applied; `&&` and `||` are not short-circuiting.
    ///
    /// Operator semantics:
    /// - `+` concatenates when either side is a string (both sides are
    ///   stringified), otherwise adds numerically.
    /// - `-`, `*`, `%` coerce both sides to numbers. `/` and `%` fail on a
    ///   zero right-hand side.
    /// - `==` / `!=` use strict equality: values of different kinds are
    ///   never equal, so `1 == "1"` is false.
    /// - `<`, `<=`, `>`, `>=` compare lexicographically when both sides are
    ///   strings and numerically otherwise.
    /// - `&&` / `||` combine the operands' truthiness into a boolean.
    pub(crate) fn eval_binary(&mut self,
                              op: BinaryOperator,
                              left: &Expr,
                              right: &Expr)
                              -> EvalResult<Value> {
        let lhs = self.eval_expr(left)?;
        let rhs = self.eval_expr(right)?;

        match op {
            BinaryOperator::Add => {
                if matches!(lhs, Value::Str(_)) || matches!(rhs, Value::Str(_)) {
                    Ok(Value::Str(format!("{lhs}{rhs}")))
                } else {
                    Ok(Value::Number(lhs.to_number()? + rhs.to_number()?))
                }
            },
            BinaryOperator::Sub => Ok(Value::Number(lhs.to_number()? - rhs.to_number()?)),
            BinaryOperator::Mul => Ok(Value::Number(lhs.to_number()? * rhs.to_number()?)),
            BinaryOperator::Div => {
                let divisor = rhs.to_number()?;
                if divisor == 0.0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                Ok(Value::Number(lhs.to_number()? / divisor))
            },
            BinaryOperator::Mod => {
                let divisor = rhs.to_number()?;
                if divisor == 0.0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                Ok(Value::Number(lhs.to_number()? % divisor))
            },
            BinaryOperator::Equal => Ok(Value::Bool(lhs == rhs)),
            BinaryOperator::NotEqual => Ok(Value::Bool(lhs != rhs)),
            BinaryOperator::Less => Self::eval_ordering(&lhs, &rhs, op),
            BinaryOperator::LessEqual => Self::eval_ordering(&lhs, &rhs, op),
            BinaryOperator::Greater => Self::eval_ordering(&lhs, &rhs, op),
            BinaryOperator::GreaterEqual => Self::eval_ordering(&lhs, &rhs, op),
            BinaryOperator::And => Ok(Value::Bool(lhs.is_truthy() && rhs.is_truthy())),
            BinaryOperator::Or => Ok(Value::Bool(lhs.is_truthy() || rhs.is_truthy())),
        }
    }

    /// Applies a relational operator, choosing lexicographic comparison for
    /// a pair of strings and numeric comparison for everything else.
    fn eval_ordering(lhs: &Value, rhs: &Value, op: BinaryOperator) -> EvalResult<Value> {
        let result = if let (Value::Str(a), Value::Str(b)) = (lhs, rhs) {
            match op {
                BinaryOperator::Less => a < b,
                BinaryOperator::LessEqual => a <= b,
                BinaryOperator::Greater => a > b,
                BinaryOperator::GreaterEqual => a >= b,
                _ => unreachable!(),
            }
        } else {
            let a = lhs.to_number()?;
            let b = rhs.to_number()?;
            match op {
                BinaryOperator::Less => a < b,
                BinaryOperator::LessEqual => a <= b,
                BinaryOperator::Greater => a > b,
                BinaryOperator::GreaterEqual => a >= b,
                _ => unreachable!(),
            }
        };

        Ok(Value::Bool(result))
    }
}
