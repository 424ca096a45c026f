//! Built-in members of string values. Positions count Unicode scalar values.

use crate::error::EvalError;
use crate::types::{Function, Value};
use crate::util::{self, relative_index, to_integer, to_string};

type StringMethod = fn(&str, &[Value]) -> Result<Value, EvalError>;

/// Resolves `key` on the string `text`: an index, `length`, or a method.
pub fn member(text: &str, key: &Value) -> Value {
    if let Some(index) = util::array_index(key) {
        return text
            .chars()
            .nth(index)
            .map(|c| Value::from(c.to_string()))
            .unwrap_or_default();
    }
    let method: StringMethod = match to_string(key).as_str() {
        "length" => return Value::from(text.chars().count()),
        "charAt" => char_at,
        "concat" => concat,
        "endsWith" => ends_with,
        "includes" => includes,
        "indexOf" => index_of,
        "slice" => slice,
        "split" => split,
        "startsWith" => starts_with,
        "toLowerCase" => |s, _| Ok(Value::from(s.to_lowercase())),
        "toUpperCase" => |s, _| Ok(Value::from(s.to_uppercase())),
        "trim" => |s, _| Ok(Value::from(s.trim())),
        _ => return Value::Undefined,
    };
    Value::Function(Function::new(move |this, args| method(&to_string(this), args)))
}

fn arg_string(args: &[Value], index: usize) -> String {
    args.get(index).map(to_string).unwrap_or_else(|| "undefined".to_string())
}

fn char_at(s: &str, args: &[Value]) -> Result<Value, EvalError> {
    let index = args.first().map(to_integer).unwrap_or(0.0);
    if index < 0.0 {
        return Ok(Value::from(""));
    }
    Ok(s.chars()
        .nth(index as usize)
        .map(|c| Value::from(c.to_string()))
        .unwrap_or_else(|| Value::from("")))
}

fn concat(s: &str, args: &[Value]) -> Result<Value, EvalError> {
    let mut text = s.to_string();
    for arg in args {
        text.push_str(&to_string(arg));
    }
    Ok(Value::from(text))
}

fn includes(s: &str, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(s.contains(arg_string(args, 0).as_str())))
}

fn starts_with(s: &str, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(s.starts_with(arg_string(args, 0).as_str())))
}

fn ends_with(s: &str, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(s.ends_with(arg_string(args, 0).as_str())))
}

fn index_of(s: &str, args: &[Value]) -> Result<Value, EvalError> {
    let position = match s.find(arg_string(args, 0).as_str()) {
        Some(byte) => s[..byte].chars().count() as f64,
        None => -1.0,
    };
    Ok(Value::Number(position))
}

fn slice(s: &str, args: &[Value]) -> Result<Value, EvalError> {
    let len = s.chars().count();
    let start = relative_index(args.first(), len, 0);
    let end = relative_index(args.get(1), len, len);
    Ok(Value::from(
        s.chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect::<String>(),
    ))
}

/// Splits on a string or regex separator; no separator yields `[s]`.
fn split(s: &str, args: &[Value]) -> Result<Value, EvalError> {
    let parts: Vec<Value> = match args.first() {
        None | Some(Value::Undefined) => vec![Value::from(s)],
        Some(Value::Regex(re)) => re.regex.split(s).map(Value::from).collect(),
        Some(separator) => {
            let separator = to_string(separator);
            if separator.is_empty() {
                s.chars().map(|c| Value::from(c.to_string())).collect()
            } else {
                s.split(separator.as_str()).map(Value::from).collect()
            }
        }
    };
    Ok(Value::from(parts))
}
