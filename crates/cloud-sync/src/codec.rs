//! Mapping between plain JSON and Firestore's typed document values.
//!
//! Firestore wraps every value in a single-key object naming its type, e.g.
//! `{"stringValue": "abc"}` or `{"integerValue": "42"}` (64-bit integers travel
//! as strings).

use serde_json::{json, Map, Number, Value};

use crate::error::{CloudSyncError, Result};

/// Encode one JSON value as a Firestore value.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

fn encode_fields(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect()
}

/// Encode a JSON object as a Firestore document body (`{"fields": {...}}`).
pub fn encode_document(value: &Value) -> Result<Value> {
    match value {
        Value::Object(map) => Ok(json!({ "fields": encode_fields(map) })),
        other => Err(CloudSyncError::codec(format!(
            "document must be a JSON object, got {}",
            other
        ))),
    }
}

/// Decode one Firestore value back into JSON.
pub fn decode_value(value: &Value) -> Result<Value> {
    let Some((kind, inner)) = value.as_object().and_then(|m| m.iter().next()) else {
        return Err(CloudSyncError::codec(format!("untyped value {}", value)));
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => Ok(Value::Bool(inner.as_bool().unwrap_or_default())),
        "integerValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                Value::Number(n) => n.as_i64(),
                _ => None,
            };
            parsed
                .map(|i| Value::Number(i.into()))
                .ok_or_else(|| CloudSyncError::codec(format!("bad integerValue {}", inner)))
        }
        "doubleValue" => inner
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| CloudSyncError::codec(format!("bad doubleValue {}", inner))),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => {
            Ok(inner.as_str().map(Value::from).unwrap_or(Value::Null))
        }
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(decode_value).collect::<Result<Vec<_>>>())
                .transpose()?
                .unwrap_or_default();
            Ok(Value::Array(values))
        }
        "mapValue" => decode_fields(inner.get("fields")),
        other => Err(CloudSyncError::codec(format!(
            "unsupported value type {}",
            other
        ))),
    }
}

fn decode_fields(fields: Option<&Value>) -> Result<Value> {
    let mut out = Map::new();
    if let Some(fields) = fields.and_then(Value::as_object) {
        for (key, value) in fields {
            out.insert(key.clone(), decode_value(value)?);
        }
    }
    Ok(Value::Object(out))
}

/// Decode a Firestore document body into a JSON object. A document without
/// fields decodes to `{}`.
pub fn decode_document(document: &Value) -> Result<Value> {
    decode_fields(document.get("fields"))
}
