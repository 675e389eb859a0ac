//! Decoding of documents saved from the Firestore REST API.
//!
//! REST responses wrap every value in a typed envelope such as
//! `{"stringValue": "x"}` or `{"mapValue": {"fields": {...}}}`. These helpers
//! unwrap them into plain JSON so decoded documents look like the records the
//! rest of the crate works with.

use serde_json::{Map, Value};

pub const REFERENCE_PREFIX: &str = "REF:";
pub const GEOPOINT_PREFIX: &str = "GEO:";

/// One decoded document: its id (last segment of `name`) and plain fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Option<String>,
    pub fields: Map<String, Value>,
}

impl Document {
    /// Fields with `id` prepended when the document carries one and the
    /// fields do not already define it.
    pub fn into_record(self) -> Map<String, Value> {
        match self.id {
            Some(id) if !self.fields.contains_key("id") => {
                let mut record = Map::with_capacity(self.fields.len() + 1);
                record.insert("id".to_string(), Value::String(id));
                record.extend(self.fields);
                record
            }
            _ => self.fields,
        }
    }
}

pub fn decode_value(value: &Value) -> Value {
    let Some(envelope) = value.as_object() else {
        return Value::String(value.to_string());
    };

    if let Some(text) = envelope.get("stringValue") {
        return text.clone();
    }
    if let Some(integer) = envelope.get("integerValue") {
        // integers arrive as strings to survive int64 precision
        return match integer {
            Value::String(text) => text
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(text.clone())),
            other => other.clone(),
        };
    }
    if let Some(double) = envelope.get("doubleValue") {
        return match double {
            Value::String(text) => text
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(text.clone())),
            other => other.clone(),
        };
    }
    if let Some(boolean) = envelope.get("booleanValue") {
        return boolean.clone();
    }
    if envelope.contains_key("nullValue") {
        return Value::Null;
    }
    if let Some(timestamp) = envelope.get("timestampValue") {
        return timestamp.clone();
    }
    if let Some(map) = envelope.get("mapValue") {
        return Value::Object(decode_fields(map.get("fields")));
    }
    if let Some(array) = envelope.get("arrayValue") {
        let values = array
            .get("values")
            .and_then(Value::as_array)
            .map(|values| values.iter().map(decode_value).collect())
            .unwrap_or_default();
        return Value::Array(values);
    }
    if let Some(reference) = envelope.get("referenceValue") {
        let path = reference
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| reference.to_string());
        return Value::String(format!("{REFERENCE_PREFIX}{path}"));
    }
    if let Some(point) = envelope.get("geoPointValue") {
        let latitude = point.get("latitude").and_then(Value::as_f64).unwrap_or(0.0);
        let longitude = point.get("longitude").and_then(Value::as_f64).unwrap_or(0.0);
        return Value::String(format!("{GEOPOINT_PREFIX}{latitude},{longitude}"));
    }
    if let Some(bytes) = envelope.get("bytesValue") {
        return bytes.clone();
    }

    Value::String(value.to_string())
}

/// Decodes a `fields` object; anything other than an object decodes to empty.
pub fn decode_fields(fields: Option<&Value>) -> Map<String, Value> {
    fields
        .and_then(Value::as_object)
        .map(|fields| {
            fields
                .iter()
                .map(|(key, value)| (key.clone(), decode_value(value)))
                .collect()
        })
        .unwrap_or_default()
}

pub fn decode_document(document: &Value) -> Document {
    let id = document
        .get("name")
        .and_then(Value::as_str)
        .and_then(|name| name.rsplit('/').next())
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    Document {
        id,
        fields: decode_fields(document.get("fields")),
    }
}
