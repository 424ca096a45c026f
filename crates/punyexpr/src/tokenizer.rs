//! Source text to token sequence.
//!
//! Symbols are emitted one character at a time; the parser reassembles
//! multi-character operators. Offsets and lengths are in bytes.

use crate::error::ParseError;
use crate::types::Value;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::trace;

/// Characters emitted as single-character `Symbol` tokens.
pub const SYMBOLS: &str = "+-*/[].?:%<=>!&|(),";

/// Words that can never name a context value. `typeof` is absent because it
/// is the unary operator.
pub const RESERVED_WORDS: &[&str] = &[
    "abstract",
    "arguments",
    "await",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "double",
    "else",
    "enum",
    "eval",
    "export",
    "extends",
    "final",
    "finally",
    "float",
    "for",
    "function",
    "goto",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "int",
    "interface",
    "let",
    "long",
    "native",
    "new",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "try",
    "var",
    "void",
    "volatile",
    "while",
    "with",
    "yield",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Literal,
    Identifier,
    Regex,
    Symbol,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Literal => "literal",
            TokenKind::Identifier => "identifier",
            TokenKind::Regex => "regex",
            TokenKind::Symbol => "symbol",
        }
    }
}

/// Decoded payload of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Literal(Value),
    Identifier(String),
    /// `(pattern, flags)`
    Regex(String, String),
    Symbol(char),
}

impl TokenValue {
    pub fn kind(&self) -> TokenKind {
        match self {
            TokenValue::Literal(_) => TokenKind::Literal,
            TokenValue::Identifier(_) => TokenKind::Identifier,
            TokenValue::Regex(..) => TokenKind::Regex,
            TokenValue::Symbol(_) => TokenKind::Symbol,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub value: TokenValue,
    pub offset: usize,
    pub length: usize,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        self.value.kind()
    }

    pub fn symbol(&self) -> Option<char> {
        match self.value {
            TokenValue::Symbol(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_symbol(&self, c: char) -> bool {
        self.symbol() == Some(c)
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Token", 4)?;
        state.serialize_field("kind", self.kind().name())?;
        match &self.value {
            TokenValue::Literal(v) => state.serialize_field("value", v)?,
            TokenValue::Identifier(name) => state.serialize_field("value", name)?,
            TokenValue::Regex(pattern, flags) => state.serialize_field("value", &(pattern, flags))?,
            TokenValue::Symbol(c) => state.serialize_field("value", c)?,
        }
        state.serialize_field("offset", &self.offset)?;
        state.serialize_field("length", &self.length)?;
        state.end()
    }
}

/// Splits `input` into tokens.
///
/// Fails with `InvalidToken` on an unscannable character, a reserved word, or
/// two literal/identifier tokens glued together without a separator.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokenizer = Tokenizer {
        input,
        pos: 0,
        tokens: Vec::new(),
        glued_operand: false,
    };
    tokenizer.run()?;
    trace!(count = tokenizer.tokens.len(), "tokenized expression");
    Ok(tokenizer.tokens)
}

struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    tokens: Vec<Token>,
    /// The previous token is a literal or identifier and nothing separated it
    /// from the current position.
    glued_operand: bool,
}

impl Tokenizer<'_> {
    fn run(&mut self) -> Result<(), ParseError> {
        while let Some(c) = self.char_at(self.pos) {
            let start = self.pos;
            if c.is_whitespace() {
                self.pos += c.len_utf8();
                self.glued_operand = false;
                continue;
            }
            let scanned = match c {
                '\'' | '"' => self.scan_string(start, c),
                '0'..='9' => self.scan_number(start),
                '.' if matches!(self.char_at(start + 1), Some('0'..='9')) => self.scan_number(start),
                '/' if self.regex_allowed() => self
                    .scan_regex(start)
                    .or(Some((TokenValue::Symbol('/'), start + 1))),
                'A'..='Z' | 'a'..='z' | '_' => Some(self.scan_word(start)?),
                c if SYMBOLS.contains(c) => Some((TokenValue::Symbol(c), start + 1)),
                _ => None,
            };
            let (value, end) = scanned.ok_or(ParseError::InvalidToken { offset: start })?;
            self.push(value, start, end)?;
        }
        Ok(())
    }

    fn push(&mut self, value: TokenValue, start: usize, end: usize) -> Result<(), ParseError> {
        let operand = matches!(value.kind(), TokenKind::Literal | TokenKind::Identifier);
        if operand && self.glued_operand {
            return Err(ParseError::InvalidToken { offset: start });
        }
        self.glued_operand = operand;
        self.tokens.push(Token {
            value,
            offset: start,
            length: end - start,
        });
        self.pos = end;
        Ok(())
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.input.get(pos..)?.chars().next()
    }

    /// A `/` opens a regex only where an operand may start: at the beginning,
    /// after `typeof`, or after a symbol other than a closing bracket.
    fn regex_allowed(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(token) => match token.value {
                TokenValue::Symbol(c) => c != ')' && c != ']',
                TokenValue::Identifier(ref name) => name == "typeof",
                _ => false,
            },
        }
    }

    /// Only the enclosing quote is unescaped; other backslash pairs are kept
    /// as written.
    fn scan_string(&self, start: usize, quote: char) -> Option<(TokenValue, usize)> {
        let mut pos = start + 1;
        let mut text = String::new();
        loop {
            let c = self.char_at(pos)?;
            pos += c.len_utf8();
            match c {
                '\\' => {
                    let escaped = self.char_at(pos)?;
                    pos += escaped.len_utf8();
                    if escaped != quote {
                        text.push('\\');
                    }
                    text.push(escaped);
                }
                c if c == quote => break,
                c => text.push(c),
            }
        }
        Some((TokenValue::Literal(Value::from(text)), pos))
    }

    fn scan_number(&self, start: usize) -> Option<(TokenValue, usize)> {
        let bytes = self.input.as_bytes();
        let digits_from = |mut pos: usize| {
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            pos
        };
        let mut pos = digits_from(start);
        if bytes.get(pos) == Some(&b'.') {
            pos = digits_from(pos + 1);
        }
        let n = self.input[start..pos].parse::<f64>().ok()?;
        Some((TokenValue::Literal(Value::Number(n)), pos))
    }

    fn scan_word(&self, start: usize) -> Result<(TokenValue, usize), ParseError> {
        let end = self.input[start..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .map_or(self.input.len(), |len| start + len);
        let word = &self.input[start..end];
        let value = match word {
            "true" => TokenValue::Literal(Value::Bool(true)),
            "false" => TokenValue::Literal(Value::Bool(false)),
            "null" => TokenValue::Literal(Value::Null),
            "undefined" => TokenValue::Literal(Value::Undefined),
            "NaN" => TokenValue::Literal(Value::Number(f64::NAN)),
            "Infinity" => TokenValue::Literal(Value::Number(f64::INFINITY)),
            _ if RESERVED_WORDS.contains(&word) => {
                return Err(ParseError::InvalidToken { offset: start })
            }
            _ => TokenValue::Identifier(word.to_string()),
        };
        Ok((value, end))
    }

    /// Scans `/pattern/flags`. The pattern ends at the first unescaped `/`
    /// outside a character class and may not be empty or span lines.
    fn scan_regex(&self, start: usize) -> Option<(TokenValue, usize)> {
        let mut pos = start + 1;
        let mut in_class = false;
        loop {
            let c = self.char_at(pos)?;
            match c {
                '\n' | '\r' => return None,
                '\\' => {
                    let escaped = self.char_at(pos + 1)?;
                    pos += 1 + escaped.len_utf8();
                    continue;
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
            pos += c.len_utf8();
        }
        if pos == start + 1 {
            return None;
        }
        let pattern = self.input[start + 1..pos].to_string();
        let flags_start = pos + 1;
        let flags_end = self.input[flags_start..]
            .find(|c: char| !c.is_ascii_alphabetic())
            .map_or(self.input.len(), |len| flags_start + len);
        let flags = self.input[flags_start..flags_end].to_string();
        Some((TokenValue::Regex(pattern, flags), flags_end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(input: &str) -> Vec<TokenValue> {
        tokenize(input).unwrap().into_iter().map(|t| t.value).collect()
    }

    #[test]
    fn test_sign_is_not_part_of_number() {
        assert_eq!(
            values("-1"),
            vec![TokenValue::Symbol('-'), TokenValue::Literal(Value::Number(1.0))]
        );
    }

    #[test]
    fn test_number_forms() {
        for (text, expected) in [("1", 1.0), ("1.", 1.0), ("1.25", 1.25), (".5", 0.5), ("007", 7.0)] {
            assert_eq!(values(text), vec![TokenValue::Literal(Value::Number(expected))], "{text}");
        }
    }

    #[test]
    fn test_division_is_not_regex() {
        assert_eq!(
            values("a / b / c"),
            vec![
                TokenValue::Identifier("a".into()),
                TokenValue::Symbol('/'),
                TokenValue::Identifier("b".into()),
                TokenValue::Symbol('/'),
                TokenValue::Identifier("c".into()),
            ]
        );
    }

    #[test]
    fn test_regex_with_class_and_escape() {
        assert_eq!(
            values(r"/[/]\/x/gi"),
            vec![TokenValue::Regex(r"[/]\/x".into(), "gi".into())]
        );
    }

    #[test]
    fn test_glued_operands() {
        assert_eq!(tokenize("12abc"), Err(ParseError::InvalidToken { offset: 2 }));
        assert_eq!(tokenize("'a''b'"), Err(ParseError::InvalidToken { offset: 3 }));
        assert!(tokenize("1 2").is_ok());
    }

    #[test]
    fn test_reserved_words() {
        assert_eq!(tokenize("a + new"), Err(ParseError::InvalidToken { offset: 4 }));
        assert!(tokenize("typeof a").is_ok());
        assert!(tokenize("newer").is_ok());
        for word in ["eval", "int", "arguments", "synchronized", "volatile"] {
            assert_eq!(tokenize(word), Err(ParseError::InvalidToken { offset: 0 }), "{word}");
        }
        assert_eq!(tokenize("x * int"), Err(ParseError::InvalidToken { offset: 4 }));
    }

    #[test]
    fn test_exponent_is_not_part_of_number() {
        assert_eq!(tokenize("2e3"), Err(ParseError::InvalidToken { offset: 1 }));
        assert_eq!(tokenize("1.5E2"), Err(ParseError::InvalidToken { offset: 3 }));
    }

    #[test]
    fn test_only_enclosing_quote_is_unescaped() {
        assert_eq!(values(r"'it\'s'"), vec![TokenValue::Literal(Value::from("it's"))]);
        assert_eq!(values(r#""it\'s""#), vec![TokenValue::Literal(Value::from(r"it\'s"))]);
        assert_eq!(values(r#""say \"hi\"""#), vec![TokenValue::Literal(Value::from(r#"say "hi""#))]);
        assert_eq!(values(r"'a\nb'"), vec![TokenValue::Literal(Value::from(r"a\nb"))]);
        assert_eq!(values(r"'a\\b'"), vec![TokenValue::Literal(Value::from(r"a\\b"))]);
    }

    #[test]
    fn test_regex_after_typeof() {
        assert_eq!(
            values("typeof /a/"),
            vec![
                TokenValue::Identifier("typeof".into()),
                TokenValue::Regex("a".into(), String::new()),
            ]
        );
    }
}
