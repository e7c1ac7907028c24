//! JSON value types.
//!
//! [`JsonValue`] is the tagged union over the six JSON kinds. Objects keep
//! insertion order, which is also their serialization order. Scalars
//! (string, number, boolean) are the primitive variants.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use indexmap::IndexMap;

use super::number::Number;
use crate::error::{LinkhubError, LinkhubResult};

/// The kind of a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Any number
    Number,
    /// A string
    String,
    /// An ordered sequence
    Array,
    /// An ordered key/value map
    Object,
}

impl JsonType {
    /// Lower-case name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A JSON document node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JsonValue {
    /// JSON null literal
    #[default]
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number, kept as decimal text
    Number(Number),
    /// JSON string
    String(String),
    /// JSON array
    Array(JsonArray),
    /// JSON object
    Object(JsonObject),
}

impl JsonValue {
    /// The kind tag of this value.
    pub fn json_type(&self) -> JsonType {
        match self {
            JsonValue::Null => JsonType::Null,
            JsonValue::Bool(_) => JsonType::Boolean,
            JsonValue::Number(_) => JsonType::Number,
            JsonValue::String(_) => JsonType::String,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::Object(_) => JsonType::Object,
        }
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        self.json_type().name()
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Returns true for string, number and boolean values.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::String(_)
        )
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Returns the boolean value if this is a Bool, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is a Number, None otherwise.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            JsonValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns an integer if this is an integral Number within `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// Returns a float if this is a Number.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the array if this is an Array, None otherwise.
    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            JsonValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a reference to the object if this is an Object, None otherwise.
    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Coerce to `bool`, failing unless this is a Boolean.
    pub fn to_bool(&self) -> LinkhubResult<bool> {
        self.as_bool().ok_or_else(|| self.mismatch("bool"))
    }

    /// Coerce to `i64`, failing unless this is an integral Number in range.
    pub fn to_i64(&self) -> LinkhubResult<i64> {
        self.as_i64().ok_or_else(|| self.mismatch("i64"))
    }

    /// Coerce to `f64`, failing unless this is a Number.
    pub fn to_f64(&self) -> LinkhubResult<f64> {
        self.as_f64().ok_or_else(|| self.mismatch("f64"))
    }

    /// Coerce to text, failing unless this is a String.
    pub fn to_text(&self) -> LinkhubResult<&str> {
        self.as_str().ok_or_else(|| self.mismatch("string"))
    }

    /// Get a value from an object by key.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// Get a value from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        self.as_array().and_then(|a| a.get(index))
    }

    /// True if this is an object holding `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.as_object().is_some_and(|o| o.contains_key(key))
    }

    /// Number of pairs (object) or elements (array); zero for scalars.
    pub fn len(&self) -> usize {
        match self {
            JsonValue::Array(a) => a.len(),
            JsonValue::Object(o) => o.len(),
            _ => 0,
        }
    }

    /// True when [`len`](Self::len) is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn mismatch(&self, expected: &'static str) -> LinkhubError {
        let found = match self {
            JsonValue::Number(n) => format!("number {n}"),
            other => other.type_name().to_string(),
        };
        LinkhubError::TypeMismatch { expected, found }
    }
}

static NULL: JsonValue = JsonValue::Null;

/// Lenient key lookup: a missing key, or indexing anything other than an
/// object (scalars and arrays included), yields `null` without error.
///
/// Key lookup is only meaningful on objects. Callers that must tell "absent"
/// from "wrong kind" use [`JsonValue::get`] or [`JsonValue::as_object`], or
/// go through the mapper, which reports `ShapeMismatch`.
impl Index<&str> for JsonValue {
    type Output = JsonValue;

    fn index(&self, key: &str) -> &JsonValue {
        self.get(key).unwrap_or(&NULL)
    }
}

/// Lenient element lookup: an out-of-range index, or indexing anything
/// other than an array, yields `null` without error.
///
/// Use [`JsonValue::get_index`] or [`JsonValue::as_array`] to detect the
/// wrong kind.
impl Index<usize> for JsonValue {
    type Output = JsonValue;

    fn index(&self, index: usize) -> &JsonValue {
        self.get_index(index).unwrap_or(&NULL)
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::writer::serialize(self))
    }
}

impl FromStr for JsonValue {
    type Err = LinkhubError;

    fn from_str(s: &str) -> LinkhubResult<Self> {
        super::parser::parse(s.as_bytes())
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl From<Number> for JsonValue {
    fn from(n: Number) -> Self {
        JsonValue::Number(n)
    }
}

macro_rules! value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for JsonValue {
                fn from(n: $ty) -> Self {
                    JsonValue::Number(Number::from(n))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<JsonArray> for JsonValue {
    fn from(a: JsonArray) -> Self {
        JsonValue::Array(a)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(o: JsonObject) -> Self {
        JsonValue::Object(o)
    }
}

/// An ordered sequence of JSON values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsonArray {
    items: Vec<JsonValue>,
}

impl JsonArray {
    /// Create an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value.
    pub fn push(&mut self, value: impl Into<JsonValue>) {
        self.items.push(value.into());
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<&JsonValue> {
        self.items.get(index)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, JsonValue> {
        self.items.iter()
    }

    /// Elements as a slice.
    pub fn as_slice(&self) -> &[JsonValue] {
        &self.items
    }
}

impl From<Vec<JsonValue>> for JsonArray {
    fn from(items: Vec<JsonValue>) -> Self {
        JsonArray { items }
    }
}

impl FromIterator<JsonValue> for JsonArray {
    fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
        JsonArray {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for JsonArray {
    type Item = JsonValue;
    type IntoIter = std::vec::IntoIter<JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonArray {
    type Item = &'a JsonValue;
    type IntoIter = std::slice::Iter<'a, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// An insertion-ordered map from string keys to JSON values.
///
/// Keys are unique. Inserting an existing key replaces its value in place
/// and keeps the key's original position. Equality is order-sensitive.
#[derive(Debug, Clone, Default)]
pub struct JsonObject {
    map: IndexMap<String, JsonValue>,
}

impl PartialEq for JsonObject {
    fn eq(&self, other: &Self) -> bool {
        self.map.len() == other.map.len() && self.map.iter().eq(other.map.iter())
    }
}

impl Eq for JsonObject {}

impl JsonObject {
    /// Create an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair, returning the replaced value if the key existed.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> Option<JsonValue> {
        self.map.insert(key.into(), value.into())
    }

    /// Value under `key`.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.map.get(key)
    }

    /// True if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Remove `key`, keeping the order of the remaining pairs.
    pub fn remove(&mut self, key: &str) -> Option<JsonValue> {
        self.map.shift_remove(key)
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, JsonValue> {
        self.map.iter()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, JsonValue> {
        self.map.keys()
    }
}

impl FromIterator<(String, JsonValue)> for JsonObject {
    fn from_iter<I: IntoIterator<Item = (String, JsonValue)>>(iter: I) -> Self {
        JsonObject {
            map: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for JsonObject {
    type Item = (String, JsonValue);
    type IntoIter = indexmap::map::IntoIter<String, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonObject {
    type Item = (&'a String, &'a JsonValue);
    type IntoIter = indexmap::map::Iter<'a, String, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_value_types() {
        assert_eq!(JsonValue::Null.json_type(), JsonType::Null);
        assert_eq!(JsonValue::Bool(true).json_type(), JsonType::Boolean);
        assert_eq!(JsonValue::from(42).json_type(), JsonType::Number);
        assert_eq!(JsonValue::from("test").json_type(), JsonType::String);
        assert!(JsonValue::Array(JsonArray::new()).is_array());
        assert!(JsonValue::Object(JsonObject::new()).is_object());
        assert!(JsonValue::from("x").is_primitive());
        assert!(!JsonValue::Null.is_primitive());
    }

    #[test]
    fn test_coercions() {
        assert!(JsonValue::Bool(true).to_bool().unwrap());
        assert_eq!(JsonValue::from(42).to_i64().unwrap(), 42);
        assert_eq!(JsonValue::from("test").to_text().unwrap(), "test");

        let err = JsonValue::from("42").to_i64().unwrap_err();
        assert_eq!(err.name(), "TypeMismatch");
        assert!(JsonValue::Null.to_bool().is_err());
        assert!(JsonValue::from(1).to_text().is_err());
    }

    #[test]
    fn test_object_keeps_insertion_order() {
        let mut obj = JsonObject::new();
        obj.insert("z", 1);
        obj.insert("a", 2);
        obj.insert("m", 3);
        let keys: Vec<&String> = obj.keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_object_equality_is_order_sensitive() {
        let ab: JsonObject = [("a".to_string(), JsonValue::from(1)), ("b".to_string(), JsonValue::from(2))]
            .into_iter()
            .collect();
        let ba: JsonObject = [("b".to_string(), JsonValue::from(2)), ("a".to_string(), JsonValue::from(1))]
            .into_iter()
            .collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn test_object_replace_keeps_position() {
        let mut obj = JsonObject::new();
        obj.insert("a", 1);
        obj.insert("b", 2);
        let old = obj.insert("a", "replaced");
        assert_eq!(old, Some(JsonValue::from(1)));
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.keys().next().map(String::as_str), Some("a"));
        assert_eq!(obj.get("a"), Some(&JsonValue::from("replaced")));
    }

    #[test]
    fn test_index_on_wrong_kind_is_null_but_get_is_none() {
        let scalar = JsonValue::from(5);
        assert!(scalar["k"].is_null());
        assert!(scalar[0].is_null());
        assert_eq!(scalar.get("k"), None);
        assert_eq!(scalar.get_index(0), None);

        let array = JsonValue::Array(JsonArray::from(vec![JsonValue::from(1)]));
        assert!(array["0"].is_null());
        assert!(array.as_object().is_none());

        let mut obj = JsonObject::new();
        obj.insert("k", JsonValue::Null);
        let object = JsonValue::Object(obj);
        assert!(object[0].is_null());
        assert_eq!(object.get("k"), Some(&JsonValue::Null));
        assert!(object.get_index(0).is_none());
    }

    #[test]
    fn test_index_and_containment() {
        let mut obj = JsonObject::new();
        obj.insert("list", JsonArray::from(vec![JsonValue::from(1), JsonValue::from(2)]));
        let value = JsonValue::Object(obj);

        assert!(value.contains_key("list"));
        assert!(!value.contains_key("missing"));
        assert_eq!(value["list"][1], JsonValue::from(2));
        assert_eq!(value["missing"], JsonValue::Null);
        assert_eq!(value["list"][9], JsonValue::Null);
        assert_eq!(value.len(), 1);
        assert_eq!(value["list"].len(), 2);
        assert!(JsonValue::from(5).is_empty());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(JsonValue::Null.type_name(), "null");
        assert_eq!(JsonValue::Bool(false).type_name(), "boolean");
        assert_eq!(JsonValue::from(0).type_name(), "number");
        assert_eq!(JsonValue::from(String::new()).type_name(), "string");
        assert_eq!(JsonValue::Array(JsonArray::new()).type_name(), "array");
        assert_eq!(JsonValue::Object(JsonObject::new()).type_name(), "object");
    }
}
