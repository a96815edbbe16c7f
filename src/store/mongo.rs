use bson::{Document, doc};
use mongodb::sync::{Client, Collection};

use crate::config::ClientConfig;
use crate::errors::DbError;
use crate::query::Cursor;

use super::{DocumentStore, Namespace};

/// Store backed by the MongoDB driver's blocking client.
///
/// Pooling, retries and timeouts are the driver's; the timeouts it uses come
/// from the connection string built by [`ClientConfig::connection_uri`].
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
}

impl MongoStore {
    /// # Errors
    /// Fails if the connection string is rejected by the driver.
    pub fn connect(config: &ClientConfig) -> Result<Self, DbError> {
        config.validate()?;
        let uri = config.connection_uri();
        log::info!("connecting to {}", config.display_target());
        let client = Client::with_uri_str(&uri)?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    fn collection(&self, ns: &Namespace) -> Collection<Document> {
        self.client.database(&ns.database).collection::<Document>(&ns.collection)
    }
}

impl DocumentStore for MongoStore {
    fn insert_one(&self, ns: &Namespace, document: Document) -> Result<(), DbError> {
        self.collection(ns).insert_one(document).run()?;
        Ok(())
    }

    fn insert_many(&self, ns: &Namespace, documents: Vec<Document>) -> Result<(), DbError> {
        self.collection(ns).insert_many(documents).run()?;
        Ok(())
    }

    fn find(&self, ns: &Namespace, filter: Document) -> Result<Cursor, DbError> {
        let cursor = self.collection(ns).find(filter).run()?;
        Ok(Cursor::new(cursor.map(|r| r.map_err(DbError::from))))
    }

    fn count(&self, ns: &Namespace) -> Result<u64, DbError> {
        Ok(self.collection(ns).count_documents(doc! {}).run()?)
    }

    fn ping(&self, database: &str) -> Result<(), DbError> {
        self.client.database(database).run_command(doc! { "ping": 1 }).run()?;
        Ok(())
    }
}
