//! Logical operators. `&&` and `||` yield one of their operands, not a
//! boolean, and evaluate the right operand only when it decides the result.

use crate::error::EvalError;
use crate::types::Value;
use crate::util::is_truthy;

pub fn and(
    left: Value,
    right: impl FnOnce() -> Result<Value, EvalError>,
) -> Result<Value, EvalError> {
    if is_truthy(&left) {
        right()
    } else {
        Ok(left)
    }
}

pub fn or(
    left: Value,
    right: impl FnOnce() -> Result<Value, EvalError>,
) -> Result<Value, EvalError> {
    if is_truthy(&left) {
        Ok(left)
    } else {
        right()
    }
}

pub fn not(operand: &Value) -> Value {
    Value::Bool(!is_truthy(operand))
}
