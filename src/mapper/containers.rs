//! Sequence, dictionary and wrapper mappings.
//!
//! Element and value types are resolved at compile time through the
//! generic parameters, so nothing is constructed dynamically.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;

use super::{expect_object, FromJson, ToJson};
use crate::error::{LinkhubError, LinkhubResult};
use crate::json::{JsonArray, JsonObject, JsonValue};

fn expect_array(value: &JsonValue) -> LinkhubResult<&JsonArray> {
    value.as_array().ok_or(LinkhubError::ShapeMismatch {
        expected: "array",
        found: value.type_name(),
    })
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        (**self).to_json()
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        self.iter()
            .map(ToJson::to_json)
            .collect::<LinkhubResult<JsonArray>>()
            .map(JsonValue::Array)
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        self.as_slice().to_json()
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: &JsonValue) -> LinkhubResult<Self> {
        expect_array(value)?.iter().map(T::from_json).collect()
    }
}

impl FromJson for JsonArray {
    fn from_json(value: &JsonValue) -> LinkhubResult<Self> {
        expect_array(value).cloned()
    }
}

/// `None` maps to `null`; `null` maps back to `None`.
impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        match self {
            Some(inner) => inner.to_json(),
            None => Ok(JsonValue::Null),
        }
    }
}

impl<T: FromJson> FromJson for Option<T> {
    fn from_json(value: &JsonValue) -> LinkhubResult<Self> {
        match value {
            JsonValue::Null => Ok(None),
            other => T::from_json(other).map(Some),
        }
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        (**self).to_json()
    }
}

impl<T: FromJson> FromJson for Box<T> {
    fn from_json(value: &JsonValue) -> LinkhubResult<Self> {
        T::from_json(value).map(Box::new)
    }
}

fn object_from_pairs<'a, V, I>(pairs: I) -> LinkhubResult<JsonValue>
where
    V: ToJson + 'a,
    I: Iterator<Item = (&'a String, &'a V)>,
{
    let mut object = JsonObject::new();
    for (key, value) in pairs {
        object.insert(key.clone(), value.to_json()?);
    }
    Ok(JsonValue::Object(object))
}

fn pairs_from_object<V, C>(value: &JsonValue) -> LinkhubResult<C>
where
    V: FromJson,
    C: FromIterator<(String, V)>,
{
    expect_object(value)?
        .iter()
        .map(|(key, item)| V::from_json(item).map(|value| (key.clone(), value)))
        .collect()
}

impl<V: ToJson, S> ToJson for HashMap<String, V, S> {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        object_from_pairs(self.iter())
    }
}

impl<V: FromJson, S: BuildHasher + Default> FromJson for HashMap<String, V, S> {
    fn from_json(value: &JsonValue) -> LinkhubResult<Self> {
        pairs_from_object(value)
    }
}

impl<V: ToJson> ToJson for BTreeMap<String, V> {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        object_from_pairs(self.iter())
    }
}

impl<V: FromJson> FromJson for BTreeMap<String, V> {
    fn from_json(value: &JsonValue) -> LinkhubResult<Self> {
        pairs_from_object(value)
    }
}

impl<V: ToJson, S> ToJson for IndexMap<String, V, S> {
    fn to_json(&self) -> LinkhubResult<JsonValue> {
        object_from_pairs(self.iter())
    }
}

impl<V: FromJson, S: BuildHasher + Default> FromJson for IndexMap<String, V, S> {
    fn from_json(value: &JsonValue) -> LinkhubResult<Self> {
        pairs_from_object(value)
    }
}
