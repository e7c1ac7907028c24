//! JSON parser.
//!
//! Recursive descent over the lexer's token stream. Exactly one value is
//! accepted per document; anything after it is an error.

use super::lexer::{Lexer, Token};
use super::limits::Limits;
use super::types::{JsonArray, JsonObject, JsonValue};
use crate::error::{LinkhubError, LinkhubResult};

/// JSON parser with resource limits.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    limits: Limits,
    depth: u64,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    pub fn new(input: &'a [u8], limits: Limits) -> LinkhubResult<Self> {
        let mut lexer = Lexer::new(input, limits)?;
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            limits,
            depth: 0,
        })
    }

    /// Parse the input and return a JsonValue.
    pub fn parse(&mut self) -> LinkhubResult<JsonValue> {
        let value = self.parse_value()?;

        if self.current != Token::Eof {
            return Err(self.error("trailing content after value"));
        }

        Ok(value)
    }

    /// Advance to the next token.
    fn advance(&mut self) -> LinkhubResult<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn error(&self, reason: &str) -> LinkhubError {
        LinkhubError::malformed(self.lexer.position(), reason)
    }

    /// Parse a single JSON value.
    fn parse_value(&mut self) -> LinkhubResult<JsonValue> {
        let value = match std::mem::replace(&mut self.current, Token::Eof) {
            Token::Null => JsonValue::Null,
            Token::True => JsonValue::Bool(true),
            Token::False => JsonValue::Bool(false),
            Token::String(s) => JsonValue::String(s),
            Token::Number(n) => JsonValue::Number(n),
            Token::LeftBrace => return self.parse_object(),
            Token::LeftBracket => return self.parse_array(),
            Token::Eof => return Err(self.error("unexpected end of input")),
            _ => return Err(self.error("expected a value")),
        };
        self.advance()?;
        Ok(value)
    }

    fn enter(&mut self) -> LinkhubResult<()> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(LinkhubError::LimitExceeded {
                what: "nesting depth",
                got: self.depth,
                max: self.limits.max_nesting_depth,
            });
        }
        Ok(())
    }

    /// Parse a JSON object. The opening brace has been taken.
    fn parse_object(&mut self) -> LinkhubResult<JsonValue> {
        self.enter()?;
        self.advance()?;

        let mut object = JsonObject::new();

        if self.current == Token::RightBrace {
            self.advance()?;
            self.depth -= 1;
            return Ok(JsonValue::Object(object));
        }

        loop {
            let key = match std::mem::replace(&mut self.current, Token::Eof) {
                Token::String(s) => s,
                _ => return Err(self.error("expected string key")),
            };
            self.advance()?;

            // Duplicate keys are rejected rather than merged or overwritten.
            if object.contains_key(&key) {
                return Err(self.error(&format!("duplicate key {key:?}")));
            }

            if self.current != Token::Colon {
                return Err(self.error("expected ':'"));
            }
            self.advance()?;

            let value = self.parse_value()?;
            object.insert(key, value);

            if object.len() as u64 > self.limits.max_object_fields {
                return Err(LinkhubError::LimitExceeded {
                    what: "object fields",
                    got: object.len() as u64,
                    max: self.limits.max_object_fields,
                });
            }

            match self.current {
                Token::Comma => {
                    self.advance()?;
                    if self.current == Token::RightBrace {
                        return Err(self.error("trailing comma in object"));
                    }
                }
                Token::RightBrace => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.error("expected ',' or '}'")),
            }
        }

        self.depth -= 1;
        Ok(JsonValue::Object(object))
    }

    /// Parse a JSON array. The opening bracket has been taken.
    fn parse_array(&mut self) -> LinkhubResult<JsonValue> {
        self.enter()?;
        self.advance()?;

        let mut array = JsonArray::new();

        if self.current == Token::RightBracket {
            self.advance()?;
            self.depth -= 1;
            return Ok(JsonValue::Array(array));
        }

        loop {
            let value = self.parse_value()?;
            array.push(value);

            if array.len() as u64 > self.limits.max_array_length {
                return Err(LinkhubError::LimitExceeded {
                    what: "array length",
                    got: array.len() as u64,
                    max: self.limits.max_array_length,
                });
            }

            match self.current {
                Token::Comma => {
                    self.advance()?;
                    if self.current == Token::RightBracket {
                        return Err(self.error("trailing comma in array"));
                    }
                }
                Token::RightBracket => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.error("expected ',' or ']'")),
            }
        }

        self.depth -= 1;
        Ok(JsonValue::Array(array))
    }
}

/// Parse a complete JSON document with the default limits.
pub fn parse(input: &[u8]) -> LinkhubResult<JsonValue> {
    parse_with_limits(input, Limits::default())
}

/// Parse a complete JSON document with custom limits.
pub fn parse_with_limits(input: &[u8], limits: Limits) -> LinkhubResult<JsonValue> {
    let mut parser = Parser::new(input, limits)?;
    parser.parse()
}
