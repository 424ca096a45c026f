use thiserror::Error;

/// Closed set of compile failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidToken,
    EndOfExpression,
    UnexpectedToken,
    UnexpectedRemainder,
    RegExpDisabled,
}

impl ErrorKind {
    /// Stable name of the kind, as shown to users of the library.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::InvalidToken => "InvalidTokenError",
            ErrorKind::EndOfExpression => "EndOfExpressionError",
            ErrorKind::UnexpectedToken => "UnexpectedTokenError",
            ErrorKind::UnexpectedRemainder => "UnexpectedRemainderError",
            ErrorKind::RegExpDisabled => "RegExpDisabledError",
        }
    }
}

/// Error raised by `tokenize` and `compile`.
///
/// Every variant except `EndOfExpression` blames a byte offset in the source
/// text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid token @{offset}")]
    InvalidToken { offset: usize },

    #[error("Unexpected end of expression")]
    EndOfExpression,

    #[error("Unexpected token @{offset}")]
    UnexpectedToken { offset: usize },

    #[error("Unexpected remainder @{offset}")]
    UnexpectedRemainder { offset: usize },

    #[error("Regular expressions are disabled @{offset}")]
    RegExpDisabled { offset: usize },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidToken { .. } => ErrorKind::InvalidToken,
            ParseError::EndOfExpression => ErrorKind::EndOfExpression,
            ParseError::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            ParseError::UnexpectedRemainder { .. } => ErrorKind::UnexpectedRemainder,
            ParseError::RegExpDisabled { .. } => ErrorKind::RegExpDisabled,
        }
    }

    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::InvalidToken { offset }
            | ParseError::UnexpectedToken { offset }
            | ParseError::UnexpectedRemainder { offset }
            | ParseError::RegExpDisabled { offset } => Some(*offset),
            ParseError::EndOfExpression => None,
        }
    }
}

/// Runtime failure surfaced while evaluating a compiled expression.
///
/// Errors returned by host functions travel through evaluation untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("{callee} is not a function")]
    NotCallable { callee: String },

    #[error("Cannot read properties of {base} (reading '{key}')")]
    NullProperty { base: &'static str, key: String },

    #[error("Invalid regular expression: /{pattern}/{flags}: {reason}")]
    InvalidRegex {
        pattern: String,
        flags: String,
        reason: String,
    },

    #[error("{0}")]
    Thrown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ParseError::InvalidToken { offset: 12 }.to_string(), "Invalid token @12");
        assert_eq!(ParseError::UnexpectedToken { offset: 12 }.to_string(), "Unexpected token @12");
        assert_eq!(ParseError::EndOfExpression.to_string(), "Unexpected end of expression");
    }

    #[test]
    fn test_offsets() {
        assert_eq!(ParseError::InvalidToken { offset: 12 }.offset(), Some(12));
        assert_eq!(ParseError::UnexpectedRemainder { offset: 2 }.offset(), Some(2));
        assert_eq!(ParseError::EndOfExpression.offset(), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ParseError::RegExpDisabled { offset: 0 }.kind().name(), "RegExpDisabledError");
        assert_eq!(ParseError::EndOfExpression.kind(), ErrorKind::EndOfExpression);
    }
}
