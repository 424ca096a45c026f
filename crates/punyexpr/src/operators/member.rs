//! Property access and calls.

use crate::error::EvalError;
use crate::operators::{array, regex, string};
use crate::types::Value;
use crate::util;

/// Reads `key` from `object`.
///
/// A callable result is bound to `object`, so a later call sees it as the
/// receiver. Reading from `undefined` or `null` fails.
pub fn get_property(object: &Value, key: &Value) -> Result<Value, EvalError> {
    let value = match object {
        Value::Undefined | Value::Null => {
            return Err(EvalError::NullProperty {
                base: if object.is_undefined() { "undefined" } else { "null" },
                key: util::to_string(key),
            })
        }
        Value::Object(entries) => entries
            .get(util::to_string(key).as_str())
            .cloned()
            .unwrap_or_default(),
        Value::Array(items) => array::member(items, key),
        Value::String(text) => string::member(text, key),
        Value::Regex(re) => regex::member(re, key),
        Value::Bool(_) | Value::Number(_) | Value::Function(_) => Value::Undefined,
    };
    Ok(match value {
        Value::Function(f) => Value::Function(f.bind(object.clone())),
        other => other,
    })
}

/// Invokes `callee` with `args`. `describe` names the callee in the error
/// raised when it is not a function.
pub fn call(
    callee: &Value,
    args: &[Value],
    describe: impl FnOnce() -> String,
) -> Result<Value, EvalError> {
    match callee {
        Value::Function(f) => f.call(args),
        _ => Err(EvalError::NotCallable { callee: describe() }),
    }
}
