pub mod firestore;

use crate::error::{Result, ScorerError};
use crate::types::lead::Lead;
use firestore::{decode_document, Document};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Shape of a lead file, detected from its top-level structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `[{...}, {...}]`
    Records,
    /// `{"documents": [{"name": ..., "fields": ...}]}` from a collection list call.
    FirestoreList,
    /// `[{"document": {...}, "readTime": ...}]` from a runQuery call.
    FirestoreQuery,
}

pub fn read_json(path: &Path) -> Result<Value> {
    let unavailable = |reason: String| ScorerError::LeadSourceUnavailable {
        path: path.display().to_string(),
        reason,
    };
    let content = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| unavailable(format!("malformed JSON: {e}")))
}

pub fn detect_format(value: &Value) -> Result<SourceFormat> {
    match value {
        Value::Object(map) if map.get("documents").is_some_and(Value::is_array) => {
            Ok(SourceFormat::FirestoreList)
        }
        // an empty list response omits `documents` entirely
        Value::Object(map) if map.is_empty() || map.contains_key("nextPageToken") => {
            Ok(SourceFormat::FirestoreList)
        }
        Value::Array(items) if !items.is_empty() && items.iter().all(is_query_entry) => {
            Ok(SourceFormat::FirestoreQuery)
        }
        Value::Array(_) => Ok(SourceFormat::Records),
        other => Err(ScorerError::LeadSourceInvalid(format!(
            "expected an array of records or a Firestore response, found {}",
            describe(other)
        ))),
    }
}

/// Decoded documents from a Firestore dump; plain record arrays are
/// returned as id-less documents with their fields untouched.
pub fn parse_documents(value: &Value) -> Result<Vec<Document>> {
    let format = detect_format(value)?;
    debug!(?format, "detected lead source format");
    let documents = match format {
        SourceFormat::FirestoreList => value
            .get("documents")
            .and_then(Value::as_array)
            .map(|documents| documents.iter().map(decode_document).collect())
            .unwrap_or_default(),
        SourceFormat::FirestoreQuery => value
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry.get("document"))
                    .map(decode_document)
                    .collect()
            })
            .unwrap_or_default(),
        SourceFormat::Records => value
            .as_array()
            .map(|items| items.as_slice())
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(index, item)| record_document(index, item))
            .collect::<Result<Vec<_>>>()?,
    };
    Ok(documents)
}

fn record_document(index: usize, item: &Value) -> Result<Document> {
    match item {
        Value::Object(fields) => Ok(Document {
            id: None,
            fields: fields.clone(),
        }),
        other => Err(ScorerError::LeadSourceInvalid(format!(
            "record {index} is {}, expected an object",
            describe(other)
        ))),
    }
}

pub fn parse_leads(value: &Value) -> Result<Vec<Lead>> {
    Ok(parse_documents(value)?
        .into_iter()
        .map(|document| Lead::new(document.into_record()))
        .collect())
}

pub fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let documents = parse_documents(&read_json(path)?)?;
    info!(path = %path.display(), count = documents.len(), "loaded documents");
    Ok(documents)
}

pub fn load_leads(path: &Path) -> Result<Vec<Lead>> {
    let leads = parse_leads(&read_json(path)?)?;
    info!(path = %path.display(), count = leads.len(), "loaded leads");
    Ok(leads)
}

fn is_query_entry(item: &Value) -> bool {
    item.as_object().is_some_and(|entry| {
        entry.contains_key("document") || (entry.contains_key("readTime") && entry.len() <= 2)
    })
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn plain_records_pass_through_in_order() {
        let leads = parse_leads(&json!([
            { "nome": "Ana", "cargo": "Diretora", "pontuacaoTotalFinal": 60 },
            { "nome": "Bruno" }
        ]))
        .expect("records should parse");
        assert_eq!(leads.len(), 2);
        let keys = leads[0].fields.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(keys, vec!["nome", "cargo", "pontuacaoTotalFinal"]);
    }

    #[test]
    fn plain_record_with_name_and_fields_keys_is_not_decoded() {
        let leads = parse_leads(&json!([
            { "name": "Ana", "fields": { "x": 1 }, "cargo": "CEO", "pontuacaoTotalFinal": 80 }
        ]))
        .expect("records should parse");
        assert_eq!(leads[0].get("name"), Some(&json!("Ana")));
        assert_eq!(leads[0].get("fields"), Some(&json!({ "x": 1 })));
        assert_eq!(leads[0].get("cargo"), Some(&json!("CEO")));
        assert_eq!(leads[0].get("pontuacaoTotalFinal"), Some(&json!(80)));
        assert_eq!(leads[0].get("id"), None);
    }

    #[test]
    fn empty_array_is_an_empty_batch() {
        assert_eq!(detect_format(&json!([])).expect("format"), SourceFormat::Records);
        assert!(parse_leads(&json!([])).expect("empty should parse").is_empty());
    }

    #[test]
    fn firestore_list_response_is_decoded() {
        let leads = parse_leads(&json!({
            "documents": [{
                "name": "projects/p/databases/(default)/documents/resultado/doc1",
                "fields": {
                    "cargo": { "stringValue": "Gerente" },
                    "pontuacaoTotalFinal": { "integerValue": "70" }
                }
            }]
        }))
        .expect("list response should parse");
        assert_eq!(leads[0].get("id"), Some(&json!("doc1")));
        assert_eq!(leads[0].get("pontuacaoTotalFinal"), Some(&json!(70)));
    }

    #[test]
    fn empty_list_response_is_an_empty_batch() {
        assert!(parse_leads(&json!({})).expect("empty should parse").is_empty());
    }

    #[test]
    fn run_query_response_skips_entries_without_document() {
        let leads = parse_leads(&json!([
            {
                "document": {
                    "name": "projects/p/databases/(default)/documents/resultado/doc1",
                    "fields": { "cargo": { "stringValue": "CEO" } }
                },
                "readTime": "2024-03-01T12:00:00Z"
            },
            { "readTime": "2024-03-01T12:00:00Z" }
        ]))
        .expect("query response should parse");
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].get("cargo"), Some(&json!("CEO")));
    }

    #[test]
    fn non_object_record_is_rejected_with_index() {
        match parse_leads(&json!([{ "nome": "Ana" }, 7])) {
            Err(ScorerError::LeadSourceInvalid(message)) => assert!(message.contains("record 1")),
            other => panic!("expected LeadSourceInvalid, got {other:?}"),
        }
    }

    #[test]
    fn scalar_top_level_is_rejected() {
        assert!(matches!(
            parse_leads(&json!("leads")),
            Err(ScorerError::LeadSourceInvalid(_))
        ));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = TempDir::new().expect("temp dir should be created");
        assert!(matches!(
            load_leads(&dir.path().join("leads.json")),
            Err(ScorerError::LeadSourceUnavailable { .. })
        ));
    }

    #[test]
    fn load_leads_reads_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("leads.json");
        fs::write(&path, r#"[{"cargo": "Diretor"}]"#).expect("leads should write");
        let leads = load_leads(&path).expect("leads should load");
        assert_eq!(leads[0].get("cargo"), Some(&json!("Diretor")));
    }
}
