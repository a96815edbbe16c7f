use bson::Document;
use bson::oid::ObjectId;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::errors::DbError;
use crate::query::{Cursor, Filter, eval_filter};

use super::{DocumentStore, Namespace};

/// In-process store that answers the same filter documents as the server.
///
/// Documents are kept in insertion order per namespace. Like the driver, an
/// `_id` is generated for documents that arrive without one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Namespace, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists namespaces that have received inserts.
    pub fn namespaces(&self) -> Vec<Namespace> {
        let mut out: Vec<Namespace> = self.collections.read().keys().cloned().collect();
        out.sort();
        out
    }

    fn with_id(mut document: Document) -> Document {
        if !document.contains_key("_id") {
            document.insert("_id", ObjectId::new());
        }
        document
    }

    fn check_unique_ids(existing: &[Document], incoming: &[Document]) -> Result<(), DbError> {
        for (i, doc) in incoming.iter().enumerate() {
            let Some(id) = doc.get("_id") else { continue };
            let clash = existing.iter().chain(&incoming[..i]).any(|d| d.get("_id") == Some(id));
            if clash {
                return Err(DbError::Driver(format!("duplicate key error: _id {id}")));
            }
        }
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    fn insert_one(&self, ns: &Namespace, document: Document) -> Result<(), DbError> {
        self.insert_many(ns, vec![document])
    }

    fn insert_many(&self, ns: &Namespace, documents: Vec<Document>) -> Result<(), DbError> {
        let documents: Vec<Document> = documents.into_iter().map(Self::with_id).collect();
        let mut guard = self.collections.write();
        let col = guard.entry(ns.clone()).or_default();
        Self::check_unique_ids(col, &documents)?;
        col.extend(documents);
        Ok(())
    }

    fn find(&self, ns: &Namespace, filter: Document) -> Result<Cursor, DbError> {
        let filter = Filter::try_from(&filter)?;
        let matched: Vec<Document> = self
            .collections
            .read()
            .get(ns)
            .map(|docs| docs.iter().filter(|d| eval_filter(d, &filter)).cloned().collect())
            .unwrap_or_default();
        Ok(Cursor::from_documents(matched))
    }

    fn count(&self, ns: &Namespace) -> Result<u64, DbError> {
        let n = self.collections.read().get(ns).map_or(0, Vec::len);
        Ok(n as u64)
    }

    fn ping(&self, _database: &str) -> Result<(), DbError> {
        Ok(())
    }
}
