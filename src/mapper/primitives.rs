//! Primitive mappings: text, booleans, integers, floats and JSON itself.

use super::{primitive_mismatch, FromJson, ToJson};
use crate::error::{LinkhubError, LinkhubResult};
use crate::json::{JsonArray, JsonObject, JsonValue, Number};

impl ToJson for str {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        Ok(JsonValue::String(self.to_string()))
    }
}

impl ToJson for String {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        Ok(JsonValue::String(self.clone()))
    }
}

impl FromJson for String {
    fn from_json(value: &JsonValue) -> LinkhubResult<Self> {
        match value {
            JsonValue::String(s) => Ok(s.clone()),
            other => Err(primitive_mismatch(other, "string")),
        }
    }
}

impl ToJson for bool {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        Ok(JsonValue::Bool(*self))
    }
}

impl FromJson for bool {
    fn from_json(value: &JsonValue) -> LinkhubResult<Self> {
        match value {
            JsonValue::Bool(b) => Ok(*b),
            other => Err(primitive_mismatch(other, "bool")),
        }
    }
}

macro_rules! integer_mapping {
    ($($ty:ty),*) => {
        $(
            impl ToJson for $ty {
                fn to_json(&self) -> LinkhubResult<JsonValue> {
                    Ok(JsonValue::Number(Number::from(*self)))
                }
            }

            impl FromJson for $ty {
                fn from_json(value: &JsonValue) -> LinkhubResult<Self> {
                    match value {
                        JsonValue::Number(n) if n.is_integer() => n
                            .as_str()
                            .parse::<$ty>()
                            .map_err(|_| value.mismatch(stringify!($ty))),
                        other => Err(primitive_mismatch(other, stringify!($ty))),
                    }
                }
            }
        )*
    };
}

integer_mapping!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ToJson for f64 {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        Number::from_f64(*self)
            .map(JsonValue::Number)
            .ok_or_else(|| LinkhubError::TypeMismatch {
                expected: "finite number",
                found: self.to_string(),
            })
    }
}

/// Literals beyond the float range are rejected rather than read as
/// infinity, which the writer could not emit again.
impl FromJson for f64 {
    fn from_json(value: &JsonValue) -> LinkhubResult<Self> {
        match value {
            JsonValue::Number(n) => finite(n.as_f64(), value, "f64"),
            other => Err(primitive_mismatch(other, "f64")),
        }
    }
}

impl ToJson for f32 {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        f64::from(*self).to_json()
    }
}

impl FromJson for f32 {
    fn from_json(value: &JsonValue) -> LinkhubResult<Self> {
        match value {
            JsonValue::Number(n) => finite(n.as_f64() as f32, value, "f32"),
            other => Err(primitive_mismatch(other, "f32")),
        }
    }
}

fn finite<F: Into<f64> + Copy>(float: F, value: &JsonValue, expected: &'static str) -> LinkhubResult<F> {
    if float.into().is_finite() {
        Ok(float)
    } else {
        Err(value.mismatch(expected))
    }
}

impl ToJson for Number {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        Ok(JsonValue::Number(self.clone()))
    }
}

impl FromJson for Number {
    fn from_json(value: &JsonValue) -> LinkhubResult<Self> {
        match value {
            JsonValue::Number(n) => Ok(n.clone()),
            other => Err(primitive_mismatch(other, "number")),
        }
    }
}

// Untyped subtrees map to themselves.

impl ToJson for JsonValue {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        Ok(self.clone())
    }
}

impl FromJson for JsonValue {
    fn from_json(value: &JsonValue) -> LinkhubResult<Self> {
        Ok(value.clone())
    }
}

impl ToJson for JsonObject {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        Ok(JsonValue::Object(self.clone()))
    }
}

impl FromJson for JsonObject {
    fn from_json(value: &JsonValue) -> LinkhubResult<Self> {
        super::expect_object(value).cloned()
    }
}

impl ToJson for JsonArray {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        Ok(JsonValue::Array(self.clone()))
    }
}
