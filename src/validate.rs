//! Input checks that run before any call reaches the store.

use bson::Document;

use crate::errors::DbError;

const MAX_DB_NAME_BYTES: usize = 64;
const DB_NAME_FORBIDDEN: &[char] = &['/', '\\', '.', '"', '$', '*', '<', '>', ':', '|', '?', ' ', '\0'];

/// # Errors
/// `Validation` if the name could not address a collection.
pub fn validate_collection_name(name: &str) -> Result<(), DbError> {
    if name.is_empty() {
        return Err(DbError::Validation("Collection name must be non-empty".into()));
    }
    if name.contains('\0') || name.contains('$') {
        return Err(DbError::Validation(format!("Collection name contains a reserved character: {name:?}")));
    }
    if name.starts_with("system.") {
        return Err(DbError::Validation(format!("Collection name is reserved: {name}")));
    }
    Ok(())
}

/// # Errors
/// `Validation` if the name could not address a database.
pub fn validate_database_name(name: &str) -> Result<(), DbError> {
    if name.is_empty() {
        return Err(DbError::Validation("DB name must be non-empty".into()));
    }
    if name.len() >= MAX_DB_NAME_BYTES {
        return Err(DbError::Validation(format!(
            "DB name must be shorter than {MAX_DB_NAME_BYTES} bytes"
        )));
    }
    if let Some(c) = name.chars().find(|c| DB_NAME_FORBIDDEN.contains(c)) {
        return Err(DbError::Validation(format!("DB name contains {c:?}: {name:?}")));
    }
    Ok(())
}

/// # Errors
/// `Validation` for an empty key or one containing NUL.
pub fn validate_key(key: &str) -> Result<(), DbError> {
    if key.is_empty() {
        return Err(DbError::Validation("Query key must be non-empty".into()));
    }
    if key.contains('\0') {
        return Err(DbError::Validation("Query key contains NUL".into()));
    }
    Ok(())
}

/// # Errors
/// `Validation` for a document with no fields.
pub fn validate_document(document: &Document) -> Result<(), DbError> {
    if document.is_empty() {
        return Err(DbError::Validation("Document is empty".into()));
    }
    Ok(())
}
