//! Integration tests for `tokenize`.

use punyexpr::{tokenize, ParseError, TokenKind, TokenValue, Value};
use serde_json::{json, Value as Json};

fn tokens_json(input: &str) -> Json {
    let tokens = tokenize(input).unwrap_or_else(|e| panic!("tokenize({:?}) failed: {}", input, e));
    serde_json::to_value(tokens).unwrap()
}

fn check_err(input: &str, expected: ParseError) {
    assert_eq!(tokenize(input), Err(expected), "input: {:?}", input);
}

// ------------------------------------------------------------------ Shapes

#[test]
fn test_empty_input() {
    assert_eq!(tokenize("").unwrap(), vec![]);
    assert_eq!(tokenize("  \t\n ").unwrap(), vec![]);
}

#[test]
fn test_simple_sum() {
    assert_eq!(
        tokens_json("a + 1"),
        json!([
            {"kind": "identifier", "value": "a", "offset": 0, "length": 1},
            {"kind": "symbol", "value": "+", "offset": 2, "length": 1},
            {"kind": "literal", "value": 1, "offset": 4, "length": 1},
        ])
    );
}

#[test]
fn test_multi_char_operators_are_split() {
    let kinds: Vec<_> = tokenize("a===b").unwrap().iter().map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Symbol,
            TokenKind::Symbol,
            TokenKind::Symbol,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn test_member_chain() {
    assert_eq!(
        tokens_json("o.name[0]"),
        json!([
            {"kind": "identifier", "value": "o", "offset": 0, "length": 1},
            {"kind": "symbol", "value": ".", "offset": 1, "length": 1},
            {"kind": "identifier", "value": "name", "offset": 2, "length": 4},
            {"kind": "symbol", "value": "[", "offset": 6, "length": 1},
            {"kind": "literal", "value": 0, "offset": 7, "length": 1},
            {"kind": "symbol", "value": "]", "offset": 8, "length": 1},
        ])
    );
}

// ---------------------------------------------------------------- Literals

#[test]
fn test_reserved_literals() {
    let values: Vec<_> = tokenize("true false null undefined")
        .unwrap()
        .into_iter()
        .map(|t| t.value)
        .collect();
    assert_eq!(
        values,
        vec![
            TokenValue::Literal(Value::Bool(true)),
            TokenValue::Literal(Value::Bool(false)),
            TokenValue::Literal(Value::Null),
            TokenValue::Literal(Value::Undefined),
        ]
    );
    let tokens = tokenize("NaN Infinity").unwrap();
    assert!(matches!(&tokens[0].value, TokenValue::Literal(Value::Number(n)) if n.is_nan()));
    assert_eq!(tokens[1].value, TokenValue::Literal(Value::Number(f64::INFINITY)));
}

#[test]
fn test_strings() {
    assert_eq!(
        tokens_json(r#"'it\'s' "say \"hi\"""#),
        json!([
            {"kind": "literal", "value": "it's", "offset": 0, "length": 7},
            {"kind": "literal", "value": "say \"hi\"", "offset": 8, "length": 12},
        ])
    );
    let tokens = tokenize(r#"'a\nb' 'c\\d' 'e\"f'"#).unwrap();
    assert_eq!(tokens[0].value, TokenValue::Literal(Value::from(r"a\nb")));
    assert_eq!(tokens[1].value, TokenValue::Literal(Value::from(r"c\\d")));
    assert_eq!(tokens[2].value, TokenValue::Literal(Value::from(r#"e\"f"#)));
}

#[test]
fn test_offsets_are_bytes() {
    let tokens = tokenize("'é' + x").unwrap();
    assert_eq!((tokens[0].offset, tokens[0].length), (0, 4));
    assert_eq!(tokens[1].offset, 5);
    assert_eq!(tokens[2].offset, 7);
}

#[test]
fn test_regex_literal() {
    assert_eq!(
        tokens_json("/a+b/gi"),
        json!([{"kind": "regex", "value": ["a+b", "gi"], "offset": 0, "length": 7}])
    );
    assert_eq!(tokenize("x && /a/").unwrap()[3].kind(), TokenKind::Regex);
    assert_eq!(tokenize("(a) / b / c").unwrap()[3].kind(), TokenKind::Symbol);
}

// ------------------------------------------------------------------ Errors

#[test]
fn test_invalid_characters() {
    check_err("@", ParseError::InvalidToken { offset: 0 });
    check_err("a # b", ParseError::InvalidToken { offset: 2 });
    check_err("1 + ~2", ParseError::InvalidToken { offset: 4 });
}

#[test]
fn test_unterminated_string() {
    check_err("\"", ParseError::InvalidToken { offset: 0 });
    check_err("x + 'abc", ParseError::InvalidToken { offset: 4 });
}

#[test]
fn test_reserved_word() {
    check_err("if", ParseError::InvalidToken { offset: 0 });
    check_err("a.b + this", ParseError::InvalidToken { offset: 6 });
}

#[test]
fn test_exponent_notation_is_rejected() {
    check_err("2e3", ParseError::InvalidToken { offset: 1 });
    check_err("x + 1e-3", ParseError::InvalidToken { offset: 5 });
}

#[test]
fn test_full_reserved_word_list() {
    let words = [
        "abstract", "arguments", "boolean", "byte", "char", "double", "eval", "final", "float",
        "goto", "int", "long", "native", "short", "synchronized", "throws", "transient", "volatile",
    ];
    for word in words {
        check_err(word, ParseError::InvalidToken { offset: 0 });
    }
    check_err("a + eval", ParseError::InvalidToken { offset: 4 });
}

#[test]
fn test_glued_operands() {
    check_err("1abc", ParseError::InvalidToken { offset: 1 });
    check_err("'x'y", ParseError::InvalidToken { offset: 3 });
}
