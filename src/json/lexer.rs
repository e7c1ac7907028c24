//! JSON lexer/tokenizer.
//!
//! Converts raw JSON input bytes into a stream of tokens for the parser.
//! Handles UTF-8 validation, escape sequences and surrogate pairs.

use super::limits::Limits;
use super::number::{is_json_number, Number};
use crate::error::{LinkhubError, LinkhubResult};

/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Left brace `{`
    LeftBrace,
    /// Right brace `}`
    RightBrace,
    /// Left bracket `[`
    LeftBracket,
    /// Right bracket `]`
    RightBracket,
    /// Colon `:`
    Colon,
    /// Comma `,`
    Comma,
    /// Null literal
    Null,
    /// True literal
    True,
    /// False literal
    False,
    /// String value (unescaped)
    String(String),
    /// Number value
    Number(Number),
    /// End of input
    Eof,
}

/// JSON lexer that tokenizes input.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    limits: Limits,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a [u8], limits: Limits) -> LinkhubResult<Self> {
        if input.len() as u64 > limits.max_input_size {
            return Err(LinkhubError::LimitExceeded {
                what: "input size",
                got: input.len() as u64,
                max: limits.max_input_size,
            });
        }

        if let Err(e) = std::str::from_utf8(input) {
            return Err(LinkhubError::malformed(e.valid_up_to(), "invalid UTF-8"));
        }

        // A UTF-8 byte order mark is tolerated at the start of a document.
        let pos = if input.starts_with(b"\xEF\xBB\xBF") { 3 } else { 0 };

        Ok(Self { input, pos, limits })
    }

    /// Get the current position in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Peek at the current byte without consuming it.
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Consume and return the current byte.
    fn advance(&mut self) -> Option<u8> {
        let b = self.input.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn error(&self, reason: &str) -> LinkhubError {
        LinkhubError::malformed(self.pos, reason)
    }

    /// Skip whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.advance();
        }
    }

    /// Read the next token from the input.
    pub fn next_token(&mut self) -> LinkhubResult<Token> {
        self.skip_whitespace();

        let token = match self.peek() {
            None => return Ok(Token::Eof),
            Some(b'"') => return self.read_string(),
            Some(b'-' | b'0'..=b'9') => return self.read_number(),
            Some(b't') => return self.read_literal(b"true", Token::True),
            Some(b'f') => return self.read_literal(b"false", Token::False),
            Some(b'n') => return self.read_literal(b"null", Token::Null),
            Some(b'{') => Token::LeftBrace,
            Some(b'}') => Token::RightBrace,
            Some(b'[') => Token::LeftBracket,
            Some(b']') => Token::RightBracket,
            Some(b':') => Token::Colon,
            Some(b',') => Token::Comma,
            Some(_) => return Err(self.error("unexpected character")),
        };
        self.advance();
        Ok(token)
    }

    /// Read a string token, handling escape sequences.
    fn read_string(&mut self) -> LinkhubResult<Token> {
        // Consume opening quote
        self.advance();

        let mut result = String::new();

        loop {
            let start = self.pos;
            // Copy the run of plain bytes up to the next quote, backslash
            // or control character in one go.
            while let Some(b) = self.peek() {
                if b == b'"' || b == b'\\' || b < 0x20 {
                    break;
                }
                self.pos += 1;
            }
            let run = std::str::from_utf8(&self.input[start..self.pos])
                .map_err(|_| LinkhubError::malformed(start, "invalid UTF-8"))?;
            result.push_str(run);

            match self.advance() {
                None => return Err(self.error("unterminated string")),
                Some(b'"') => break,
                Some(b'\\') => {
                    let escaped = self.read_escape_sequence()?;
                    result.push(escaped);
                }
                Some(_) => {
                    return Err(LinkhubError::malformed(
                        self.pos - 1,
                        "control character in string",
                    ))
                }
            }

            if result.len() as u64 > self.limits.max_string_length {
                return Err(self.string_too_long(result.len()));
            }
        }

        if result.len() as u64 > self.limits.max_string_length {
            return Err(self.string_too_long(result.len()));
        }

        Ok(Token::String(result))
    }

    fn string_too_long(&self, len: usize) -> LinkhubError {
        LinkhubError::LimitExceeded {
            what: "string length",
            got: len as u64,
            max: self.limits.max_string_length,
        }
    }

    /// Read an escape sequence after a backslash.
    fn read_escape_sequence(&mut self) -> LinkhubResult<char> {
        match self.advance() {
            Some(b'"') => Ok('"'),
            Some(b'\\') => Ok('\\'),
            Some(b'/') => Ok('/'),
            Some(b'b') => Ok('\x08'),
            Some(b'f') => Ok('\x0C'),
            Some(b'n') => Ok('\n'),
            Some(b'r') => Ok('\r'),
            Some(b't') => Ok('\t'),
            Some(b'u') => self.read_unicode_escape(),
            _ => Err(self.error("invalid escape sequence")),
        }
    }

    /// Read a \uXXXX unicode escape sequence.
    fn read_unicode_escape(&mut self) -> LinkhubResult<char> {
        let codepoint = self.read_hex4()?;

        if (0xD800..=0xDBFF).contains(&codepoint) {
            // High surrogate: must be followed by a \uXXXX low surrogate
            if self.advance() != Some(b'\\') || self.advance() != Some(b'u') {
                return Err(self.error("unpaired high surrogate"));
            }
            let low = self.read_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(self.error("invalid low surrogate"));
            }
            let combined = 0x10000 + ((codepoint as u32 - 0xD800) << 10) + (low as u32 - 0xDC00);
            return char::from_u32(combined).ok_or_else(|| self.error("invalid code point"));
        }

        if (0xDC00..=0xDFFF).contains(&codepoint) {
            return Err(self.error("unpaired low surrogate"));
        }

        char::from_u32(codepoint as u32).ok_or_else(|| self.error("invalid code point"))
    }

    /// Read 4 hex digits and return the value.
    fn read_hex4(&mut self) -> LinkhubResult<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let digit = match self.advance() {
                Some(b @ b'0'..=b'9') => b - b'0',
                Some(b @ b'a'..=b'f') => b - b'a' + 10,
                Some(b @ b'A'..=b'F') => b - b'A' + 10,
                _ => return Err(self.error("invalid \\u escape")),
            };
            value = (value << 4) | (digit as u16);
        }
        Ok(value)
    }

    /// Read a number token.
    fn read_number(&mut self) -> LinkhubResult<Token> {
        let start = self.pos;
        while let Some(b'-' | b'+' | b'.' | b'e' | b'E' | b'0'..=b'9') = self.peek() {
            self.advance();
        }

        let raw = &self.input[start..self.pos];
        if !is_json_number(raw) {
            return Err(LinkhubError::malformed(start, "invalid number"));
        }
        let text = std::str::from_utf8(raw)
            .map_err(|_| LinkhubError::malformed(start, "invalid number"))?;

        Ok(Token::Number(Number::from_validated(text.to_string())))
    }

    /// Read a keyword literal.
    fn read_literal(&mut self, expected: &[u8], token: Token) -> LinkhubResult<Token> {
        let start = self.pos;
        for &b in expected {
            if self.advance() != Some(b) {
                return Err(LinkhubError::malformed(start, "invalid literal"));
            }
        }
        Ok(token)
    }
}
