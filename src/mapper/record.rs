//! Record descriptors.
//!
//! [`json_record!`](crate::json_record) declares a struct together with its
//! [`JsonRecord`](super::JsonRecord), [`ToJson`](super::ToJson) and
//! [`FromJson`](super::FromJson) implementations. A field may carry an
//! alternate wire name with `field as "wireName": Type`; the name is used in
//! both directions and the field's own identifier is then never consulted.

/// Declare a record type with a compile-time JSON field table.
///
/// The struct must implement `Default` (derive it, or write it by hand when
/// a field needs a non-zero default); fields absent from the input keep
/// that value.
///
/// ```
/// use linkhub::json_record;
/// use linkhub::mapper::{to_graph, to_json_value, JsonRecord};
///
/// json_record! {
///     #[derive(Debug, Clone, Default, PartialEq)]
///     pub struct Session {
///         pub link_id as "linkID": String,
///         pub expires_in: u32,
///     }
/// }
///
/// assert_eq!(Session::WIRE_NAMES, ["linkID", "expires_in"]);
///
/// let session = Session { link_id: "LINK".into(), expires_in: 3600 };
/// let value = to_json_value(&session).unwrap();
/// assert_eq!(value["linkID"].as_str(), Some("LINK"));
/// assert_eq!(to_graph::<Session>(&value).unwrap(), session);
/// ```
#[macro_export]
macro_rules! json_record {
    (@wire $field:ident $wire:literal) => {
        $wire
    };
    (@wire $field:ident) => {
        stringify!($field)
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident $(as $wire:literal)? : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::mapper::JsonRecord for $name {
            const WIRE_NAMES: &'static [&'static str] = &[
                $($crate::json_record!(@wire $field $($wire)?)),*
            ];
        }

        impl $crate::mapper::ToJson for $name {
            fn to_json(&self) -> $crate::LinkhubResult<$crate::json::JsonValue> {
                #[allow(unused_mut)]
                let mut object = $crate::json::JsonObject::new();
                $(
                    object.insert(
                        $crate::json_record!(@wire $field $($wire)?),
                        $crate::mapper::ToJson::to_json(&self.$field)?,
                    );
                )*
                Ok($crate::json::JsonValue::Object(object))
            }
        }

        impl $crate::mapper::FromJson for $name {
            #[allow(unused_variables)]
            fn from_json(value: &$crate::json::JsonValue) -> $crate::LinkhubResult<Self> {
                let object = $crate::mapper::expect_object(value)?;
                #[allow(unused_mut)]
                let mut record = <Self as ::core::default::Default>::default();
                $(
                    if let Some(item) = object.get($crate::json_record!(@wire $field $($wire)?)) {
                        record.$field = $crate::mapper::FromJson::from_json(item)?;
                    }
                )*
                Ok(record)
            }
        }
    };
}
