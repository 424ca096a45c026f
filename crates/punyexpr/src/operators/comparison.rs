//! Relational and equality operators.

use crate::types::Value;
use crate::util;
use std::cmp::Ordering;

pub fn lt(left: &Value, right: &Value) -> Value {
    Value::Bool(util::compare(left, right) == Some(Ordering::Less))
}

pub fn gt(left: &Value, right: &Value) -> Value {
    Value::Bool(util::compare(left, right) == Some(Ordering::Greater))
}

pub fn lte(left: &Value, right: &Value) -> Value {
    Value::Bool(matches!(
        util::compare(left, right),
        Some(Ordering::Less | Ordering::Equal)
    ))
}

pub fn gte(left: &Value, right: &Value) -> Value {
    Value::Bool(matches!(
        util::compare(left, right),
        Some(Ordering::Greater | Ordering::Equal)
    ))
}

pub fn eq(left: &Value, right: &Value) -> Value {
    Value::Bool(util::loose_equals(left, right))
}

pub fn ne(left: &Value, right: &Value) -> Value {
    Value::Bool(!util::loose_equals(left, right))
}

pub fn strict_eq(left: &Value, right: &Value) -> Value {
    Value::Bool(util::strict_equals(left, right))
}

pub fn strict_ne(left: &Value, right: &Value) -> Value {
    Value::Bool(!util::strict_equals(left, right))
}
