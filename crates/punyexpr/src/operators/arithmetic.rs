//! Arithmetic operators.

use crate::types::Value;
use crate::util::{to_number, to_primitive, to_string};

/// `+`: concatenation when either primitive operand is a string, numeric
/// addition otherwise.
pub fn add(left: &Value, right: &Value) -> Value {
    let left = to_primitive(left);
    let right = to_primitive(right);
    if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
        let mut text = to_string(&left);
        text.push_str(&to_string(&right));
        return Value::from(text);
    }
    Value::Number(to_number(&left) + to_number(&right))
}

pub fn sub(left: &Value, right: &Value) -> Value {
    Value::Number(to_number(left) - to_number(right))
}

pub fn mul(left: &Value, right: &Value) -> Value {
    Value::Number(to_number(left) * to_number(right))
}

/// Division by zero yields an infinity or NaN, never an error.
pub fn div(left: &Value, right: &Value) -> Value {
    Value::Number(to_number(left) / to_number(right))
}

/// `%` truncates toward zero; the sign follows the dividend.
pub fn rem(left: &Value, right: &Value) -> Value {
    Value::Number(to_number(left) % to_number(right))
}

pub fn pow(base: &Value, exponent: &Value) -> Value {
    let base = to_number(base);
    let exponent = to_number(exponent);
    // powf treats 1 ** NaN and 1 ** Infinity as 1.
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        return Value::Number(f64::NAN);
    }
    Value::Number(base.powf(exponent))
}

pub fn plus(operand: &Value) -> Value {
    Value::Number(to_number(operand))
}

pub fn minus(operand: &Value) -> Value {
    Value::Number(-to_number(operand))
}
