//! Recursive-descent parser with precedence climbing for binary operators.
//!
//! Grammar, loosest first:
//!
//! ```text
//! conditional := or ( '?' conditional ':' conditional )?
//! or .. mul   := next ( OP next )*              (left-associative)
//! exponent    := unary ( '**' exponent )?       (right-associative)
//! unary       := ( '+' | '-' | '!' | 'typeof' ) unary | member
//! member      := primary ( '.' IDENT | '[' conditional ']' | '(' args ')' )*
//! primary     := LITERAL | IDENT | REGEX | '(' conditional ')' | '[' items ']'
//! ```
//!
//! Every construct that deepens the tree (brackets, unary prefixes, operator
//! folds, member steps, ternary branches) counts against `MAX_DEPTH`, so
//! compiling, evaluating and dropping a tree stay within a bounded stack.
//! Going deeper fails with `UnexpectedToken` at the token that crossed it.

use crate::ast::{BinaryOp, Node, NodeKind, Range, UnaryOp};
use crate::error::ParseError;
use crate::operators::{OperatorTable, BINARY_LEVELS, EXPONENTIAL, MAX_OPERATOR_LEN};
use crate::tokenizer::{Token, TokenValue};
use crate::types::Value;

/// Deepest nesting a compiled expression may reach.
pub const MAX_DEPTH: usize = 128;

/// Parser over a token slice.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    allow_regex: bool,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Parses a complete expression. Leftover tokens are an error.
    pub fn parse(tokens: &'a [Token], allow_regex: bool) -> Result<Node, ParseError> {
        let mut parser = Self {
            tokens,
            pos: 0,
            allow_regex,
            depth: 0,
        };
        let node = parser.parse_conditional()?;
        match parser.peek() {
            Some(token) => Err(ParseError::UnexpectedRemainder {
                offset: token.offset,
            }),
            None => Ok(node),
        }
    }

    fn parse_conditional(&mut self) -> Result<Node, ParseError> {
        let condition = self.parse_binary(0)?;
        let Some(question) = self.peek().filter(|t| t.is_symbol('?')) else {
            return Ok(condition);
        };
        self.pos += 1;
        let depth = self.depth;
        self.descend(question.offset)?;
        let consequent = self.parse_conditional()?;
        self.expect_symbol(':')?;
        let alternate = self.parse_conditional()?;
        self.depth = depth;
        let range = condition.range.cover(alternate.range);
        Ok(Node::new(
            NodeKind::Ternary {
                condition: Box::new(condition),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            },
            range,
        ))
    }

    /// Left-associative level `level` of `BINARY_LEVELS`; past the last
    /// level, falls through to exponentiation.
    fn parse_binary(&mut self, level: usize) -> Result<Node, ParseError> {
        let Some(&table) = BINARY_LEVELS.get(level) else {
            return self.parse_exponent();
        };
        let depth = self.depth;
        let mut left = self.parse_binary(level + 1)?;
        while let Some((op, width)) = self.match_operator(table) {
            self.descend(self.tokens[self.pos].offset)?;
            self.pos += width;
            let right = self.parse_binary(level + 1)?;
            left = binary(op, left, right);
        }
        self.depth = depth;
        Ok(left)
    }

    fn parse_exponent(&mut self) -> Result<Node, ParseError> {
        let base = self.parse_unary()?;
        match self.match_operator(EXPONENTIAL) {
            Some((op, width)) => {
                let depth = self.depth;
                self.descend(self.tokens[self.pos].offset)?;
                self.pos += width;
                let exponent = self.parse_exponent()?;
                self.depth = depth;
                Ok(binary(op, base, exponent))
            }
            None => Ok(base),
        }
    }

    /// The longest operator spelled by the run of symbol tokens at the
    /// cursor, with the number of tokens it spans, if it belongs to `table`.
    /// Whitespace between the symbols does not matter, so `< =` reads as
    /// `<=`. `**` is never read as `*`.
    fn match_operator(&self, table: OperatorTable) -> Option<(BinaryOp, usize)> {
        let mut run = String::new();
        for token in &self.tokens[self.pos..] {
            let Some(c) = token.symbol() else { break };
            if run.len() == MAX_OPERATOR_LEN {
                break;
            }
            run.push(c);
        }
        let (text, op) = BINARY_LEVELS
            .iter()
            .chain(std::iter::once(&EXPONENTIAL))
            .flat_map(|level| level.iter())
            .filter(|(text, _)| run.starts_with(text))
            .max_by_key(|(text, _)| text.len())?;
        table
            .iter()
            .any(|(_, candidate)| candidate == op)
            .then_some((*op, text.len()))
    }

    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        let Some(token) = self.peek() else {
            return self.parse_member();
        };
        let op = match &token.value {
            TokenValue::Symbol('+') => UnaryOp::Plus,
            TokenValue::Symbol('-') => UnaryOp::Minus,
            TokenValue::Symbol('!') => UnaryOp::Not,
            TokenValue::Identifier(name) if name == "typeof" => UnaryOp::TypeOf,
            _ => return self.parse_member(),
        };
        let depth = self.depth;
        self.descend(token.offset)?;
        self.pos += 1;
        let operand = self.parse_unary()?;
        self.depth = depth;
        let range = token_range(token).cover(operand.range);
        Ok(Node::new(
            NodeKind::Unary {
                op,
                operand: Box::new(operand),
            },
            range,
        ))
    }

    fn parse_member(&mut self) -> Result<Node, ParseError> {
        let depth = self.depth;
        let mut node = self.parse_primary()?;
        while let Some(token) = self.peek() {
            if matches!(token.symbol(), Some('.' | '[' | '(')) {
                self.descend(token.offset)?;
            }
            node = match token.symbol() {
                Some('.') => {
                    self.pos += 1;
                    let name_token = self.next_required()?;
                    let TokenValue::Identifier(name) = &name_token.value else {
                        return Err(ParseError::UnexpectedToken {
                            offset: name_token.offset,
                        });
                    };
                    let key = Node::new(
                        NodeKind::Constant(Value::from(name.as_str())),
                        token_range(name_token),
                    );
                    let range = node.range.cover(key.range);
                    property(node, key, range)
                }
                Some('[') => {
                    self.pos += 1;
                    let key = self.parse_conditional()?;
                    let close = self.expect_symbol(']')?;
                    let range = node.range.cover(close);
                    property(node, key, range)
                }
                Some('(') => {
                    self.pos += 1;
                    let (args, close) = self.parse_list(')', false)?;
                    let range = node.range.cover(close);
                    Node::new(
                        NodeKind::Call {
                            callee: Box::new(node),
                            args,
                        },
                        range,
                    )
                }
                _ => break,
            };
        }
        self.depth = depth;
        Ok(node)
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let token = self.next_required()?;
        let range = token_range(token);
        let kind = match &token.value {
            TokenValue::Literal(value) => NodeKind::Constant(value.clone()),
            TokenValue::Identifier(name) => NodeKind::Context(name.clone()),
            TokenValue::Regex(pattern, flags) => {
                if !self.allow_regex {
                    return Err(ParseError::RegExpDisabled {
                        offset: token.offset,
                    });
                }
                NodeKind::Regex {
                    pattern: pattern.clone(),
                    flags: flags.clone(),
                }
            }
            TokenValue::Symbol('(') => {
                self.descend(token.offset)?;
                let inner = self.parse_conditional()?;
                let close = self.expect_symbol(')')?;
                self.depth -= 1;
                return Ok(Node {
                    range: range.cover(close),
                    ..inner
                });
            }
            TokenValue::Symbol('[') => {
                self.descend(token.offset)?;
                let (items, close) = self.parse_list(']', true)?;
                self.depth -= 1;
                return Ok(Node::new(NodeKind::Array(items), range.cover(close)));
            }
            TokenValue::Symbol(_) => {
                return Err(ParseError::UnexpectedToken {
                    offset: token.offset,
                })
            }
        };
        Ok(Node::new(kind, range))
    }

    /// Comma-separated expressions up to `close`; the opening bracket is
    /// already consumed. Returns the items and the closing token's range.
    fn parse_list(&mut self, close: char, trailing_comma: bool) -> Result<(Vec<Node>, Range), ParseError> {
        let mut items = Vec::new();
        if let Some(token) = self.peek().filter(|t| t.is_symbol(close)) {
            self.pos += 1;
            return Ok((items, token_range(token)));
        }
        loop {
            items.push(self.parse_conditional()?);
            let token = self.next_required()?;
            match token.symbol() {
                Some(c) if c == close => return Ok((items, token_range(token))),
                Some(',') => {
                    if trailing_comma {
                        if let Some(token) = self.peek().filter(|t| t.is_symbol(close)) {
                            self.pos += 1;
                            return Ok((items, token_range(token)));
                        }
                    }
                }
                _ => {
                    return Err(ParseError::UnexpectedToken {
                        offset: token.offset,
                    })
                }
            }
        }
    }

    /// Enters one more level of nesting; `offset` locates the token that
    /// opened it.
    fn descend(&mut self, offset: usize) -> Result<(), ParseError> {
        if self.depth == MAX_DEPTH {
            return Err(ParseError::UnexpectedToken { offset });
        }
        self.depth += 1;
        Ok(())
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next_required(&mut self) -> Result<&'a Token, ParseError> {
        let token = self.peek().ok_or(ParseError::EndOfExpression)?;
        self.pos += 1;
        Ok(token)
    }

    fn expect_symbol(&mut self, c: char) -> Result<Range, ParseError> {
        let token = self.next_required()?;
        if token.is_symbol(c) {
            Ok(token_range(token))
        } else {
            Err(ParseError::UnexpectedToken {
                offset: token.offset,
            })
        }
    }
}

fn token_range(token: &Token) -> Range {
    Range::new(token.offset, token.length)
}

fn binary(op: BinaryOp, left: Node, right: Node) -> Node {
    let range = left.range.cover(right.range);
    Node::new(
        NodeKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        range,
    )
}

fn property(object: Node, key: Node, range: Range) -> Node {
    Node::new(
        NodeKind::Property {
            object: Box::new(object),
            key: Box::new(key),
        },
        range,
    )
}
