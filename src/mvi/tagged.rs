//! Shared decoding for adjacently tagged `{kind, <content>}` values.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Rebuild the adjacently tagged JSON object and deserialize it.
///
/// A `null` body is dropped so unit variants decode without content.
pub(crate) fn decode_adjacent<T: DeserializeOwned>(
    content_field: &str,
    kind: &str,
    body: Value,
) -> Result<T, serde_json::Error> {
    let mut object = Map::new();
    object.insert("kind".to_string(), Value::String(kind.to_string()));
    if !body.is_null() {
        object.insert(content_field.to_string(), body);
    }
    serde_json::from_value(Value::Object(object))
}
