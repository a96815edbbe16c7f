use bson::Document;
use std::sync::Arc;

use crate::errors::DbError;
use crate::logger::AUDIT_TARGET;
use crate::query::{Cursor, FilterRequest, Operator, build_filter};
use crate::store::{DocumentStore, Namespace};
use crate::validate::{validate_collection_name, validate_database_name, validate_document};

#[cfg(feature = "mongo")]
use crate::{config::ClientConfig, store::MongoStore};

/// Client bound to one database on a shared store.
///
/// Switching databases needs `&mut self`; to use several databases from
/// several threads, derive one client per database with [`with_database`].
///
/// [`with_database`]: MongoDBClient::with_database
#[derive(Debug)]
pub struct MongoDBClient<S: DocumentStore> {
    store: Arc<S>,
    database: String,
}

impl<S: DocumentStore> Clone for MongoDBClient<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store), database: self.database.clone() }
    }
}

#[cfg(feature = "mongo")]
impl MongoDBClient<MongoStore> {
    /// Connects to a single host and port and uses `config.database`.
    ///
    /// # Errors
    /// Invalid settings, or a connection string the driver rejects.
    pub fn connect(config: &ClientConfig) -> Result<Self, DbError> {
        let store = MongoStore::connect(config)?;
        Self::with_store(Arc::new(store), &config.database)
    }
}

impl<S: DocumentStore> MongoDBClient<S> {
    /// # Errors
    /// `Validation` if `database` is not a usable database name.
    pub fn with_store(store: Arc<S>, database: &str) -> Result<Self, DbError> {
        validate_database_name(database)?;
        Ok(Self { store, database: database.to_string() })
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    fn namespace(&self, collection_name: &str) -> Result<Namespace, DbError> {
        validate_collection_name(collection_name)?;
        Ok(Namespace::new(self.database.as_str(), collection_name))
    }

    /// Inserts a single document into the collection.
    ///
    /// # Errors
    /// `Validation` if the document is empty or the collection name is
    /// invalid; otherwise whatever the store reports.
    pub fn insert_document(&self, document: Document, collection_name: &str) -> Result<(), DbError> {
        validate_document(&document)?;
        let ns = self.namespace(collection_name)?;
        self.store.insert_one(&ns, document)?;
        log::info!(target: AUDIT_TARGET, "insert_one ns={ns}");
        Ok(())
    }

    /// Inserts the documents in one batched call.
    ///
    /// # Errors
    /// `Validation` if there are no documents, any of them is empty, or the
    /// collection name is invalid.
    pub fn insert_documents(&self, documents: Vec<Document>, collection_name: &str) -> Result<(), DbError> {
        if documents.is_empty() {
            return Err(DbError::Validation("There are no documents to insert".into()));
        }
        if let Some(i) = documents.iter().position(Document::is_empty) {
            return Err(DbError::Validation(format!("Document at index {i} is empty")));
        }
        let ns = self.namespace(collection_name)?;
        let n = documents.len();
        self.store.insert_many(&ns, documents)?;
        log::info!(target: AUDIT_TARGET, "insert_many ns={ns} count={n}");
        Ok(())
    }

    /// Runs a find with the filter described by `operator`, `key` and `value`.
    ///
    /// Similar to `db.collection.find({key: {op: value}})` in the shell.
    ///
    /// # Errors
    /// `Validation` for a bad collection name or key, `Parse` for a value the
    /// operator cannot use. Neither reaches the store.
    pub fn find(
        &self,
        operator: Operator,
        key: &str,
        value: &str,
        collection_name: &str,
    ) -> Result<Cursor, DbError> {
        self.find_request(&FilterRequest::new(operator, key, value), collection_name)
    }

    /// # Errors
    /// See [`MongoDBClient::find`].
    pub fn find_request(&self, request: &FilterRequest, collection_name: &str) -> Result<Cursor, DbError> {
        let ns = self.namespace(collection_name)?;
        let filter = build_filter(request)?.to_document();
        log::debug!("find ns={ns} op={} filter={filter}", request.operator);
        self.store.find(&ns, filter)
    }

    /// Returns the number of documents in the collection.
    ///
    /// # Errors
    /// `Validation` for a bad collection name.
    pub fn get_collection_size(&self, collection_name: &str) -> Result<u64, DbError> {
        let ns = self.namespace(collection_name)?;
        self.store.count(&ns)
    }

    /// Points later calls at a different database.
    ///
    /// # Errors
    /// `Validation` for a bad name; the current database is kept.
    pub fn change_database(&mut self, db_name: &str) -> Result<(), DbError> {
        validate_database_name(db_name)?;
        log::info!(target: AUDIT_TARGET, "change_database from={} to={db_name}", self.database);
        self.database = db_name.to_string();
        Ok(())
    }

    /// A second client on the same store, bound to `db_name`.
    ///
    /// # Errors
    /// `Validation` for a bad name.
    pub fn with_database(&self, db_name: &str) -> Result<Self, DbError> {
        Self::with_store(Arc::clone(&self.store), db_name)
    }

    /// # Errors
    /// Whatever the store reports when the round-trip fails.
    pub fn ping(&self) -> Result<(), DbError> {
        self.store.ping(&self.database)
    }
}
