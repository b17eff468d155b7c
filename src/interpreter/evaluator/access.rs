use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::f64_to_index,
};

impl Context {
    /// Evaluates a member access: `object.name` or `object?.name`.
    ///
    /// On an object, a missing key yields null. With `safe` set, a null
    /// receiver yields null instead of failing; otherwise any non-object
    /// receiver is a property-access error.
    pub(crate) fn eval_member(&mut self,
                              object: &Expr,
                              property: &str,
                              safe: bool)
                              -> EvalResult<Value> {
        let receiver = self.eval_expr(object)?;

        if safe && receiver.is_null() {
            return Ok(Value::Null);
        }

        match receiver {
            Value::Object(_) => Ok(receiver.lookup(property).cloned().unwrap_or(Value::Null)),
            other => Err(RuntimeError::PropertyAccess { kind: other.type_name() }),
        }
    }

    /// Evaluates the elvis operator: the left value unless it is null, in
    /// which case the right expression is evaluated and yielded. This is a
    /// null test, not a truthiness test: `0 ?: 1` is `0`.
    pub(crate) fn eval_elvis(&mut self, left: &Expr, right: &Expr) -> EvalResult<Value> {
        let value = self.eval_expr(left)?;
        if value.is_null() {
            self.eval_expr(right)
        } else {
            Ok(value)
        }
    }

    /// Evaluates an index expression.
    ///
    /// - Array with a numeric index: the element at that integer position,
    ///   or null when out of bounds.
    /// - Object with any index: lookup by the index's string form.
    /// - String with a numeric index: the character at that position as a
    ///   one-character string, or null when out of bounds.
    pub(crate) fn eval_index(&mut self, object: &Expr, index: &Expr) -> EvalResult<Value> {
        let receiver = self.eval_expr(object)?;
        let index_value = self.eval_expr(index)?;

        match receiver {
            Value::Array(values) => {
                let position = index_value.to_number()?;
                Ok(f64_to_index(position).and_then(|i| values.get(i).cloned())
                                         .unwrap_or(Value::Null))
            },
            Value::Object(_) => {
                let key = index_value.to_string();
                Ok(receiver.lookup(&key).cloned().unwrap_or(Value::Null))
            },
            Value::Str(s) => {
                let position = index_value.to_number()?;
                Ok(f64_to_index(position).and_then(|i| s.chars().nth(i))
                                         .map_or(Value::Null, |c| Value::Str(c.to_string())))
            },
            other => Err(RuntimeError::NotIndexable { kind: other.type_name() }),
        }
    }
}
