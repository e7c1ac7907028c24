//! JSON value model and text codec.
//!
//! # Architecture
//!
//! The JSON subsystem is organized into focused modules:
//!
//! - [`types`] - JsonValue, JsonObject, JsonArray
//! - [`number`] - Lossless numeric representation
//! - [`limits`] - Parser resource limits
//! - [`lexer`] - Tokenizer with UTF-8/escape handling
//! - [`parser`] - Recursive descent parser
//! - [`writer`] - Compact serializer
//!
//! # Guarantees
//!
//! - Object keys keep insertion order through parse and serialize
//! - Duplicate keys and trailing content are rejected as malformed
//! - Numbers keep their decimal text, so `parse(serialize(v)) == v`
//!
//! # Example
//!
//! ```
//! use linkhub::json::{parse, serialize, JsonValue};
//!
//! let value = parse(b"{\"b\": 2, \"a\": [true, null]}").unwrap();
//! assert_eq!(value["a"][0], JsonValue::Bool(true));
//! assert_eq!(serialize(&value), "{\"b\":2,\"a\":[true,null]}");
//! ```

pub mod lexer;
pub mod limits;
pub mod number;
pub mod parser;
pub mod types;
pub mod writer;

// Re-export commonly used items
pub use limits::Limits;
pub use number::Number;
pub use parser::{parse, parse_with_limits};
pub use types::{JsonArray, JsonObject, JsonType, JsonValue};
pub use writer::{serialize, to_vec};
