//! Bidirectional mapping between typed values and [`JsonValue`] trees.
//!
//! Every mappable type implements [`ToJson`] and [`FromJson`]. Primitives,
//! sequences (`Vec`, slices), string-keyed dictionaries (`HashMap`,
//! `BTreeMap`, `IndexMap`), `Option` and `Box` are covered here; record
//! types get their implementation from the [`json_record!`](crate::json_record)
//! macro, which records each field's wire name at compile time.
//!
//! Mapping is shape-driven:
//!
//! - keys in the input with no matching field are ignored
//! - fields with no matching key keep their `Default` value
//! - a scalar of the wrong kind is a `TypeMismatch`
//! - a container where another shape was expected is a `ShapeMismatch`
//!
//! # Example
//!
//! ```
//! use linkhub::json_record;
//! use linkhub::mapper::{stringify, from_json_bytes};
//!
//! json_record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Grant {
//!         pub user_code as "usercode": String,
//!         pub scope: Vec<String>,
//!     }
//! }
//!
//! let grant = Grant { user_code: "u1".into(), scope: vec!["member".into()] };
//! let text = stringify(&grant).unwrap();
//! assert_eq!(text, r#"{"usercode":"u1","scope":["member"]}"#);
//! assert_eq!(from_json_bytes::<Grant>(text.as_bytes()).unwrap(), grant);
//! ```

mod containers;
mod primitives;
mod record;

use crate::error::{LinkhubError, LinkhubResult};
use crate::json::{self, JsonObject, JsonValue};

/// Conversion of a typed value into a JSON tree.
pub trait ToJson {
    /// Build the JSON representation of `self`.
    fn to_json(&self) -> LinkhubResult<JsonValue>;
}

/// Conversion of a JSON tree into a typed value.
pub trait FromJson: Sized {
    /// Build `Self` from `value`.
    fn from_json(value: &JsonValue) -> LinkhubResult<Self>;
}

/// Per-type field table for record types.
///
/// Implemented by [`json_record!`](crate::json_record); lists the wire name
/// of every field in declaration order, which is also serialization order.
pub trait JsonRecord: ToJson + FromJson + Default {
    /// Wire names in declaration order.
    const WIRE_NAMES: &'static [&'static str];
}

/// Convert any mappable value to a JSON tree.
pub fn to_json_value<T: ToJson + ?Sized>(value: &T) -> LinkhubResult<JsonValue> {
    value.to_json()
}

/// Convert a JSON tree into `T`.
pub fn to_graph<T: FromJson>(value: &JsonValue) -> LinkhubResult<T> {
    T::from_json(value)
}

/// Map a value to JSON and serialize it.
pub fn stringify<T: ToJson + ?Sized>(value: &T) -> LinkhubResult<String> {
    Ok(json::serialize(&value.to_json()?))
}

/// Parse JSON bytes and map the document into `T`.
pub fn from_json_bytes<T: FromJson>(bytes: &[u8]) -> LinkhubResult<T> {
    T::from_json(&json::parse(bytes)?)
}

/// Borrow `value` as an object or fail with `ShapeMismatch`.
#[doc(hidden)]
pub fn expect_object(value: &JsonValue) -> LinkhubResult<&JsonObject> {
    value.as_object().ok_or(LinkhubError::ShapeMismatch {
        expected: "object",
        found: value.type_name(),
    })
}

/// Error for a value that cannot become the primitive `expected`.
///
/// Containers cannot satisfy any primitive and report a shape mismatch;
/// scalars of the wrong kind (and null) report a type mismatch.
pub(crate) fn primitive_mismatch(value: &JsonValue, expected: &'static str) -> LinkhubError {
    if value.is_array() || value.is_object() {
        LinkhubError::ShapeMismatch {
            expected,
            found: value.type_name(),
        }
    } else {
        value.mismatch(expected)
    }
}
