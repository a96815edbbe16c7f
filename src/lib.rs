pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod logger;
pub mod query;
pub mod store;
pub mod validate;

pub use crate::client::MongoDBClient;
pub use crate::config::ClientConfig;
pub use crate::errors::DbError;
pub use crate::query::{Cursor, FilterRequest, Operator};
pub use crate::store::{DocumentStore, MemoryStore, Namespace};
#[cfg(feature = "mongo")]
pub use crate::store::MongoStore;

/// Initializes the client library.
///
/// This function should be called before any other operations.
/// It sets up the logger from `log4rs.yaml` when that file is present.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    logger::init()?;
    Ok(())
}
