//! Coercion helpers reproducing the dynamic-typing rules of the expression
//! language: `ToNumber`, `ToString`, `ToPrimitive`, truthiness, `typeof`,
//! loose and strict equality, and relational comparison.
//!
//! Strings are measured and compared by Unicode scalar value.

use crate::types::Value;
use std::cmp::Ordering;
use std::mem::discriminant;
use std::sync::Arc;

// ----------------------------------------------------------------- Conversions

/// `ToNumber`.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => *n,
        Value::String(s) => string_to_number(s),
        Value::Array(_) => string_to_number(&to_string(value)),
        Value::Object(_) | Value::Function(_) | Value::Regex(_) => f64::NAN,
    }
}

/// Parses numeric text the way string-to-number coercion does: surrounding
/// whitespace is ignored, the empty string is zero, and anything that is not
/// a complete decimal, `0x`/`0o`/`0b` integer or `Infinity` is NaN.
pub fn string_to_number(s: &str) -> f64 {
    let text = s.trim();
    if text.is_empty() {
        return 0.0;
    }
    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }
    let decimal = text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal {
        return f64::NAN;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

/// `ToString`.
pub fn to_string(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(*n),
        Value::String(s) => s.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                if item.is_nullish() {
                    String::new()
                } else {
                    to_string(item)
                }
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Function(_) => "function () { [native code] }".to_string(),
        Value::Regex(re) => re.to_string(),
    }
}

/// Formats a number the way `Number.prototype.toString()` does: integers
/// without a fractional part, exponent notation outside `[1e-6, 1e21)`.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{}", n);
    }
    let formatted = format!("{:e}", n);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// `ToPrimitive`: reference values collapse to their string form.
pub fn to_primitive(value: &Value) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) | Value::Function(_) | Value::Regex(_) => {
            Value::String(Arc::from(to_string(value)))
        }
        other => other.clone(),
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) | Value::Function(_) | Value::Regex(_) => true,
    }
}

/// The `typeof` tag of a value.
pub fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Undefined => "undefined",
        Value::Null => "object",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) | Value::Object(_) | Value::Regex(_) => "object",
        Value::Function(_) => "function",
    }
}

/// `ToIntegerOrInfinity`: NaN becomes zero, fractions truncate.
pub fn to_integer(value: &Value) -> f64 {
    let n = to_number(value);
    if n.is_nan() {
        0.0
    } else {
        n.trunc()
    }
}

/// Resolves a `slice`-style position against `len`: negative values count
/// from the end, results are clamped to `0..=len`.
pub fn relative_index(value: Option<&Value>, len: usize, default: usize) -> usize {
    let n = match value {
        None | Some(Value::Undefined) => return default,
        Some(v) => to_integer(v),
    };
    if n < 0.0 {
        (len as f64 + n).max(0.0) as usize
    } else {
        n.min(len as f64) as usize
    }
}

/// Interprets a property key as an array index, if it is one.
pub fn array_index(key: &Value) -> Option<usize> {
    match key {
        Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 && n.is_finite() => Some(*n as usize),
        Value::String(s) => {
            let index = s.parse::<usize>().ok()?;
            (index.to_string() == **s).then_some(index)
        }
        _ => None,
    }
}

// -------------------------------------------------------------- Comparison

/// `===`: no coercion, reference values compare by identity.
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => Arc::ptr_eq(x, y),
        (Value::Object(x), Value::Object(y)) => Arc::ptr_eq(x, y),
        (Value::Function(x), Value::Function(y)) => x.ptr_eq(y),
        (Value::Regex(x), Value::Regex(y)) => Arc::ptr_eq(x, y),
        _ => false,
    }
}

/// `==`: the abstract equality algorithm.
pub fn loose_equals(a: &Value, b: &Value) -> bool {
    if discriminant(a) == discriminant(b) {
        return strict_equals(a, b);
    }
    match (a, b) {
        (x, y) if x.is_nullish() && y.is_nullish() => true,
        (x, y) if x.is_nullish() || y.is_nullish() => false,
        (Value::Number(x), Value::String(_)) => *x == to_number(b),
        (Value::String(_), Value::Number(y)) => to_number(a) == *y,
        (Value::Bool(_), _) => loose_equals(&Value::Number(to_number(a)), b),
        (_, Value::Bool(_)) => loose_equals(a, &Value::Number(to_number(b))),
        (Value::Number(_) | Value::String(_), _) if is_reference(b) => {
            loose_equals(a, &to_primitive(b))
        }
        (_, Value::Number(_) | Value::String(_)) if is_reference(a) => {
            loose_equals(&to_primitive(a), b)
        }
        _ => false,
    }
}

fn is_reference(value: &Value) -> bool {
    matches!(
        value,
        Value::Array(_) | Value::Object(_) | Value::Function(_) | Value::Regex(_)
    )
}

/// Relational comparison: two strings compare lexicographically, anything
/// else numerically. `None` when either side is NaN.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    let pa = to_primitive(a);
    let pb = to_primitive(b);
    if let (Value::String(x), Value::String(y)) = (&pa, &pb) {
        return Some(x.cmp(y));
    }
    to_number(&pa).partial_cmp(&to_number(&pb))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&Value::from(" 12.5 ")), 12.5);
        assert_eq!(to_number(&Value::from("")), 0.0);
        assert_eq!(to_number(&Value::from("0x10")), 16.0);
        assert_eq!(to_number(&Value::from("-Infinity")), f64::NEG_INFINITY);
        assert!(to_number(&Value::from("inf")).is_nan());
        assert!(to_number(&Value::from("12px")).is_nan());
        assert!(to_number(&Value::Undefined).is_nan());
        assert_eq!(to_number(&Value::Null), 0.0);
        assert_eq!(to_number(&Value::array([Value::from(7)])), 7.0);
        assert_eq!(to_number(&Value::array([])), 0.0);
    }

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(1.0), "1");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1.5e-7), "1.5e-7");
        assert_eq!(number_to_string(123456789.0), "123456789");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_to_string_array() {
        let value = Value::array([Value::from(1), Value::Null, Value::from("a")]);
        assert_eq!(to_string(&value), "1,,a");
    }

    #[test]
    fn test_loose_equals() {
        assert!(loose_equals(&Value::from(1), &Value::from("1")));
        assert!(loose_equals(&Value::Null, &Value::Undefined));
        assert!(!loose_equals(&Value::Null, &Value::from(0)));
        assert!(loose_equals(&Value::Bool(true), &Value::from("1")));
        assert!(loose_equals(&Value::array([Value::from(2)]), &Value::from(2)));
        assert!(!loose_equals(&Value::Number(f64::NAN), &Value::Number(f64::NAN)));
    }

    #[test]
    fn test_strict_equals() {
        let items = Value::array([Value::from(1)]);
        assert!(strict_equals(&items, &items.clone()));
        assert!(!strict_equals(&items, &Value::array([Value::from(1)])));
        assert!(!strict_equals(&Value::from(1), &Value::from("1")));
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare(&Value::from("10"), &Value::from("9")), Some(Ordering::Less));
        assert_eq!(compare(&Value::from(10), &Value::from("9")), Some(Ordering::Greater));
        assert_eq!(compare(&Value::Undefined, &Value::from(1)), None);
    }

    #[test]
    fn test_array_index() {
        assert_eq!(array_index(&Value::from(2)), Some(2));
        assert_eq!(array_index(&Value::from("2")), Some(2));
        assert_eq!(array_index(&Value::from("02")), None);
        assert_eq!(array_index(&Value::from(1.5)), None);
    }
}
