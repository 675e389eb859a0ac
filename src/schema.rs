use crate::source::firestore::{Document, GEOPOINT_PREFIX, REFERENCE_PREFIX};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const SAMPLE_VALUE_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Reference,
    Geopoint,
    Map,
    Array,
    Mixed,
}

pub fn detect_type(value: &Value) -> FieldType {
    match value {
        Value::Null => FieldType::Null,
        Value::Bool(_) => FieldType::Boolean,
        Value::Number(number) if number.is_i64() || number.is_u64() => FieldType::Integer,
        Value::Number(_) => FieldType::Float,
        Value::String(text) if text.starts_with(REFERENCE_PREFIX) => FieldType::Reference,
        Value::String(text) if text.starts_with(GEOPOINT_PREFIX) => FieldType::Geopoint,
        Value::String(_) => FieldType::String,
        Value::Object(_) => FieldType::Map,
        Value::Array(_) => FieldType::Array,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub nullable: bool,
    pub present_in: usize,
    pub sample_value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaReport {
    pub introspected_at: String,
    pub documents_sampled: usize,
    pub fields: BTreeMap<String, FieldSummary>,
}

/// Field inventory across `documents`.
///
/// A field's type is the first non-null type seen; a later conflicting
/// non-null type turns it into `mixed`. The sample value is taken from the
/// first document that carries the field with a non-null value.
pub fn introspect(documents: &[Document]) -> SchemaReport {
    let mut fields = BTreeMap::<String, FieldSummary>::new();

    for document in documents {
        for (name, value) in &document.fields {
            let detected = detect_type(value);
            match fields.get_mut(name) {
                None => {
                    fields.insert(
                        name.clone(),
                        FieldSummary {
                            field_type: detected,
                            nullable: detected == FieldType::Null,
                            present_in: 1,
                            sample_value: sample(value),
                        },
                    );
                }
                Some(summary) => {
                    summary.present_in += 1;
                    if detected == FieldType::Null {
                        summary.nullable = true;
                    } else if summary.field_type == FieldType::Null {
                        summary.field_type = detected;
                        summary.sample_value = sample(value);
                    } else if summary.field_type != detected {
                        summary.field_type = FieldType::Mixed;
                    }
                }
            }
        }
    }

    SchemaReport {
        introspected_at: Utc::now().to_rfc3339(),
        documents_sampled: documents.len(),
        fields,
    }
}

fn sample(value: &Value) -> String {
    let text = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    text.chars().take(SAMPLE_VALUE_MAX_CHARS).collect()
}
