//! `typeof`.

use crate::types::Value;
use crate::util;

pub fn type_of(operand: &Value) -> Value {
    Value::from(util::type_of(operand))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_of() {
        assert_eq!(type_of(&Value::Null), Value::from("object"));
        assert_eq!(type_of(&Value::Undefined), Value::from("undefined"));
        assert_eq!(type_of(&Value::function(|_, _| Ok(Value::Null))), Value::from("function"));
        assert_eq!(type_of(&Value::array([])), Value::from("object"));
    }
}
