//! Lossless JSON numbers.
//!
//! A [`Number`] keeps the validated decimal text it was read from (or the
//! canonical text of the Rust value it was built from), so integers and
//! decimals survive parse/serialize without going through a float.

use std::fmt;

/// A JSON number stored as its decimal text.
///
/// The text always matches the JSON number grammar; equality is textual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number {
    text: String,
}

impl Number {
    /// Wrap text that the lexer has already validated.
    pub(crate) fn from_validated(text: String) -> Self {
        Number { text }
    }

    /// Build a number from a float. Returns `None` for NaN and infinities,
    /// which have no JSON representation.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_finite() {
            Some(Number {
                text: value.to_string(),
            })
        } else {
            None
        }
    }

    /// Parse a standalone number literal, rejecting anything outside the
    /// JSON number grammar.
    pub fn parse(text: &str) -> Option<Self> {
        if is_json_number(text.as_bytes()) {
            Some(Number {
                text: text.to_string(),
            })
        } else {
            None
        }
    }

    /// The decimal text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True when the text has no fraction or exponent part.
    pub fn is_integer(&self) -> bool {
        !self.text.contains(['.', 'e', 'E'])
    }

    /// The value as `i64` if it is an integer literal in range.
    pub fn as_i64(&self) -> Option<i64> {
        if self.is_integer() {
            self.text.parse().ok()
        } else {
            None
        }
    }

    /// The value as `u64` if it is a non-negative integer literal in range.
    pub fn as_u64(&self) -> Option<u64> {
        if self.is_integer() {
            self.text.parse().ok()
        } else {
            None
        }
    }

    /// The value as `f64`. Large or very precise literals round.
    pub fn as_f64(&self) -> f64 {
        self.text.parse().unwrap_or(f64::NAN)
    }
}

macro_rules! number_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number { text: value.to_string() }
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Check `-? int frac? exp?` over the whole input.
pub(crate) fn is_json_number(bytes: &[u8]) -> bool {
    let mut pos = 0;
    if bytes.first() == Some(&b'-') {
        pos += 1;
    }
    match bytes.get(pos) {
        Some(b'0') => pos += 1,
        Some(b'1'..=b'9') => {
            while let Some(b'0'..=b'9') = bytes.get(pos) {
                pos += 1;
            }
        }
        _ => return false,
    }
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        let start = pos;
        while let Some(b'0'..=b'9') = bytes.get(pos) {
            pos += 1;
        }
        if pos == start {
            return false;
        }
    }
    if let Some(b'e' | b'E') = bytes.get(pos) {
        pos += 1;
        if let Some(b'+' | b'-') = bytes.get(pos) {
            pos += 1;
        }
        let start = pos;
        while let Some(b'0'..=b'9') = bytes.get(pos) {
            pos += 1;
        }
        if pos == start {
            return false;
        }
    }
    pos == bytes.len()
}
