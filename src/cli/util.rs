use bson::{Bson, Document};
use serde_json::Value;

use crate::errors::DbError;

/// Parses one JSON object into a document.
pub fn parse_document_json(json: &str) -> Result<Document, DbError> {
    let value: Value = serde_json::from_str(json)?;
    object_to_document(&value, 0)
}

/// Parses a JSON array of objects into documents.
pub fn parse_documents_json(json: &str) -> Result<Vec<Document>, DbError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(DbError::Validation("expected a JSON array of objects".into()));
    };
    items.iter().enumerate().map(|(i, v)| object_to_document(v, i)).collect()
}

fn object_to_document(value: &Value, index: usize) -> Result<Document, DbError> {
    if !value.is_object() {
        return Err(DbError::Validation(format!("item {index} is not a JSON object")));
    }
    Ok(bson::to_document(value)?)
}

/// Relaxed extended JSON, one line.
pub fn document_to_json_line(doc: Document) -> String {
    Bson::Document(doc).into_relaxed_extjson().to_string()
}
