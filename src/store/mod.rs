//! The document store the client drives.
//!
//! `DocumentStore` is the whole capability set the client needs from a
//! driver. Connecting is each implementation's constructor; a database and a
//! collection together form a [`Namespace`].

use bson::Document;
use std::fmt;

use crate::errors::DbError;
use crate::query::Cursor;

mod memory;
#[cfg(feature = "mongo")]
mod mongo;

pub use memory::MemoryStore;
#[cfg(feature = "mongo")]
pub use mongo::MongoStore;

/// A `(database, collection)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace {
    pub database: String,
    pub collection: String,
}

impl Namespace {
    pub fn new(database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self { database: database.into(), collection: collection.into() }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.collection)
    }
}

pub trait DocumentStore: Send + Sync {
    fn insert_one(&self, ns: &Namespace, document: Document) -> Result<(), DbError>;

    /// One batched call; partial writes are whatever the backend does.
    fn insert_many(&self, ns: &Namespace, documents: Vec<Document>) -> Result<(), DbError>;

    /// `filter` is in the driver's query syntax (see `Filter::to_document`).
    fn find(&self, ns: &Namespace, filter: Document) -> Result<Cursor, DbError>;

    /// Unfiltered document count.
    fn count(&self, ns: &Namespace) -> Result<u64, DbError>;

    fn ping(&self, database: &str) -> Result<(), DbError>;
}
