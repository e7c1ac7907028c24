//! JSON serialization.
//!
//! Output is compact (no insignificant whitespace). Object pairs are written
//! in insertion order and array elements in sequence order, so a parsed
//! document serializes back to the same structure.

use std::fmt::Write;

use super::types::{JsonArray, JsonObject, JsonValue};

/// Serialize a JsonValue to JSON text.
pub fn serialize(value: &JsonValue) -> String {
    let mut output = String::new();
    serialize_value(value, &mut output);
    output
}

/// Serialize a JsonValue to UTF-8 bytes.
pub fn to_vec(value: &JsonValue) -> Vec<u8> {
    serialize(value).into_bytes()
}

/// Serialize a JsonValue to the output string.
fn serialize_value(value: &JsonValue, output: &mut String) {
    match value {
        JsonValue::Null => output.push_str("null"),
        JsonValue::Bool(true) => output.push_str("true"),
        JsonValue::Bool(false) => output.push_str("false"),
        JsonValue::Number(n) => output.push_str(n.as_str()),
        JsonValue::String(s) => serialize_string(s, output),
        JsonValue::Array(arr) => serialize_array(arr, output),
        JsonValue::Object(obj) => serialize_object(obj, output),
    }
}

/// Serialize a string with JSON escaping.
///
/// Quote, backslash and the short control escapes use their two-character
/// forms; other control and invisible separator code points use `\uXXXX`.
pub(crate) fn serialize_string(s: &str, output: &mut String) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\x08' => output.push_str("\\b"),
            '\x0C' => output.push_str("\\f"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if needs_unicode_escape(c) => {
                let _ = write!(output, "\\u{:04x}", c as u32);
            }
            c => output.push(c),
        }
    }
    output.push('"');
}

fn needs_unicode_escape(c: char) -> bool {
    matches!(c as u32, 0x00..=0x1F | 0x7F..=0x9F | 0x2028 | 0x2029)
}

/// Serialize an array.
fn serialize_array(arr: &JsonArray, output: &mut String) {
    output.push('[');
    for (i, value) in arr.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        serialize_value(value, output);
    }
    output.push(']');
}

/// Serialize an object in insertion order.
fn serialize_object(obj: &JsonObject, output: &mut String) {
    output.push('{');
    for (i, (key, value)) in obj.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        serialize_string(key, output);
        output.push(':');
        serialize_value(value, output);
    }
    output.push('}');
}
