//! Operator tables for the parser and per-operator runtime semantics.

pub mod arithmetic;
pub mod array;
pub mod comparison;
pub mod logical;
pub mod member;
pub mod regex;
pub mod string;
pub mod type_ops;

use crate::ast::{BinaryOp, UnaryOp};
use crate::error::EvalError;
use crate::types::Value;

/// Operator spellings accepted at one precedence level.
pub type OperatorTable = &'static [(&'static str, BinaryOp)];

pub const LOGICAL_OR: OperatorTable = &[("||", BinaryOp::Or)];

pub const LOGICAL_AND: OperatorTable = &[("&&", BinaryOp::And)];

pub const EQUALITY: OperatorTable = &[
    ("==", BinaryOp::Eq),
    ("!=", BinaryOp::Neq),
    ("===", BinaryOp::StrictEq),
    ("!==", BinaryOp::StrictNeq),
];

pub const RELATIONAL: OperatorTable = &[
    ("<", BinaryOp::Lt),
    (">", BinaryOp::Gt),
    ("<=", BinaryOp::Lte),
    (">=", BinaryOp::Gte),
];

pub const ADDITIVE: OperatorTable = &[("+", BinaryOp::Add), ("-", BinaryOp::Sub)];

pub const MULTIPLICATIVE: OperatorTable = &[
    ("*", BinaryOp::Mul),
    ("/", BinaryOp::Div),
    ("%", BinaryOp::Rem),
];

pub const EXPONENTIAL: OperatorTable = &[("**", BinaryOp::Exp)];

/// Left-associative levels, loosest first.
pub const BINARY_LEVELS: &[OperatorTable] = &[
    LOGICAL_OR,
    LOGICAL_AND,
    EQUALITY,
    RELATIONAL,
    ADDITIVE,
    MULTIPLICATIVE,
];

/// Length of the longest operator spelling.
pub const MAX_OPERATOR_LEN: usize = 3;

/// Applies a binary operator. `right` is evaluated only when `op` needs it,
/// which for `&&` and `||` depends on `left`.
pub fn apply_binary(
    op: BinaryOp,
    left: Value,
    right: impl FnOnce() -> Result<Value, EvalError>,
) -> Result<Value, EvalError> {
    let strict: fn(&Value, &Value) -> Value = match op {
        BinaryOp::And => return logical::and(left, right),
        BinaryOp::Or => return logical::or(left, right),
        BinaryOp::Add => arithmetic::add,
        BinaryOp::Sub => arithmetic::sub,
        BinaryOp::Mul => arithmetic::mul,
        BinaryOp::Div => arithmetic::div,
        BinaryOp::Rem => arithmetic::rem,
        BinaryOp::Exp => arithmetic::pow,
        BinaryOp::Lt => comparison::lt,
        BinaryOp::Gt => comparison::gt,
        BinaryOp::Lte => comparison::lte,
        BinaryOp::Gte => comparison::gte,
        BinaryOp::Eq => comparison::eq,
        BinaryOp::Neq => comparison::ne,
        BinaryOp::StrictEq => comparison::strict_eq,
        BinaryOp::StrictNeq => comparison::strict_ne,
    };
    Ok(strict(&left, &right()?))
}

pub fn apply_unary(op: UnaryOp, operand: &Value) -> Value {
    match op {
        UnaryOp::Plus => arithmetic::plus(operand),
        UnaryOp::Minus => arithmetic::minus(operand),
        UnaryOp::Not => logical::not(operand),
        UnaryOp::TypeOf => type_ops::type_of(operand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_operator_len() {
        let longest = BINARY_LEVELS
            .iter()
            .chain([EXPONENTIAL].iter())
            .flat_map(|table| table.iter())
            .map(|(text, _)| text.len())
            .max();
        assert_eq!(longest, Some(MAX_OPERATOR_LEN));
    }

    #[test]
    fn test_apply_binary_defers_right_operand() {
        let skipped = apply_binary(BinaryOp::Or, Value::from(1), || panic!("right operand evaluated"));
        assert_eq!(skipped, Ok(Value::from(1)));
        let failed = apply_binary(BinaryOp::Add, Value::from(1), || Err(EvalError::Thrown("boom".into())));
        assert_eq!(failed, Err(EvalError::Thrown("boom".into())));
        assert_eq!(
            apply_binary(BinaryOp::Rem, Value::from(7), || Ok(Value::from(4))),
            Ok(Value::from(3))
        );
    }
}
