//! Built-in members of array values.

use crate::error::EvalError;
use crate::types::{Function, Value};
use crate::util::{self, relative_index, strict_equals, to_string};

type ArrayMethod = fn(&[Value], &[Value]) -> Result<Value, EvalError>;

/// Resolves `key` on `items`: an element, `length`, or a method.
pub fn member(items: &[Value], key: &Value) -> Value {
    if let Some(index) = util::array_index(key) {
        return items.get(index).cloned().unwrap_or_default();
    }
    let method: ArrayMethod = match to_string(key).as_str() {
        "length" => return Value::from(items.len()),
        "concat" => concat,
        "includes" => includes,
        "indexOf" => index_of,
        "join" => join,
        "slice" => slice,
        _ => return Value::Undefined,
    };
    Value::Function(Function::new(move |this, args| match this {
        Value::Array(items) => method(items, args),
        _ => method(&[], args),
    }))
}

fn concat(items: &[Value], args: &[Value]) -> Result<Value, EvalError> {
    let mut result = items.to_vec();
    for arg in args {
        match arg {
            Value::Array(more) => result.extend(more.iter().cloned()),
            other => result.push(other.clone()),
        }
    }
    Ok(Value::from(result))
}

/// Like `indexOf`, except that NaN finds NaN.
fn includes(items: &[Value], args: &[Value]) -> Result<Value, EvalError> {
    let needle = args.first().cloned().unwrap_or_default();
    let found = items.iter().any(|item| match (item, &needle) {
        (Value::Number(a), Value::Number(b)) if a.is_nan() && b.is_nan() => true,
        _ => strict_equals(item, &needle),
    });
    Ok(Value::Bool(found))
}

fn index_of(items: &[Value], args: &[Value]) -> Result<Value, EvalError> {
    let needle = args.first().cloned().unwrap_or_default();
    let position = items
        .iter()
        .position(|item| strict_equals(item, &needle))
        .map_or(-1.0, |index| index as f64);
    Ok(Value::Number(position))
}

fn join(items: &[Value], args: &[Value]) -> Result<Value, EvalError> {
    let separator = match args.first() {
        None | Some(Value::Undefined) => ",".to_string(),
        Some(separator) => to_string(separator),
    };
    let text = items
        .iter()
        .map(|item| if item.is_nullish() { String::new() } else { to_string(item) })
        .collect::<Vec<_>>()
        .join(&separator);
    Ok(Value::from(text))
}

fn slice(items: &[Value], args: &[Value]) -> Result<Value, EvalError> {
    let start = relative_index(args.first(), items.len(), 0);
    let end = relative_index(args.get(1), items.len(), items.len());
    Ok(Value::from(items[start..end.max(start)].to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Value {
        Value::array(values.iter().map(|n| Value::from(*n)))
    }

    fn invoke(items: &Value, name: &str, args: &[Value]) -> Value {
        let Value::Array(list) = items else {
            panic!("not an array");
        };
        let method = member(list, &Value::from(name));
        method.as_function().expect("array method").bind(items.clone()).call(args).unwrap()
    }

    #[test]
    fn test_index_and_length() {
        let Value::Array(items) = numbers(&[1.0, 2.0]) else {
            unreachable!()
        };
        assert_eq!(member(&items, &Value::from(1)), Value::from(2));
        assert_eq!(member(&items, &Value::from("0")), Value::from(1));
        assert_eq!(member(&items, &Value::from(2)), Value::Undefined);
        assert_eq!(member(&items, &Value::from("length")), Value::from(2));
    }

    #[test]
    fn test_methods() {
        let items = numbers(&[1.0, 2.0, 3.0]);
        assert_eq!(invoke(&items, "join", &[Value::from("-")]), Value::from("1-2-3"));
        assert_eq!(invoke(&items, "join", &[]), Value::from("1,2,3"));
        assert_eq!(invoke(&items, "indexOf", &[Value::from(3)]), Value::from(2));
        assert_eq!(invoke(&items, "indexOf", &[Value::from("3")]), Value::from(-1));
        assert_eq!(invoke(&items, "includes", &[Value::from(2)]), Value::Bool(true));
        assert_eq!(invoke(&items, "slice", &[Value::from(1)]), numbers(&[2.0, 3.0]));
        assert_eq!(invoke(&items, "slice", &[Value::from(2), Value::from(1)]), numbers(&[]));
        assert_eq!(
            invoke(&items, "concat", &[numbers(&[4.0]), Value::from(5)]),
            numbers(&[1.0, 2.0, 3.0, 4.0, 5.0])
        );
    }

    #[test]
    fn test_includes_finds_nan() {
        let items = numbers(&[f64::NAN]);
        assert_eq!(invoke(&items, "includes", &[Value::Number(f64::NAN)]), Value::Bool(true));
        assert_eq!(invoke(&items, "indexOf", &[Value::Number(f64::NAN)]), Value::from(-1));
    }
}
