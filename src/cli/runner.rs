use std::io::Write;

use crate::client::MongoDBClient;
use crate::errors::DbError;
use crate::query::Operator;
use crate::store::DocumentStore;

use super::command::Command;
use super::util::{document_to_json_line, parse_document_json, parse_documents_json};

// Build-time generated list of compiled features
#[allow(dead_code)]
mod built {
    include!(concat!(env!("OUT_DIR"), "/compiled_features.rs"));
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InfoReport {
    pub package_name: String,
    pub package_version: String,
    pub compiled_features: Vec<String>,
    pub database: String,
}

pub fn info<S: DocumentStore>(client: &MongoDBClient<S>) -> InfoReport {
    InfoReport {
        package_name: env!("CARGO_PKG_NAME").to_string(),
        package_version: env!("CARGO_PKG_VERSION").to_string(),
        compiled_features: built::COMPILED_FEATURES.iter().map(|s| s.to_string()).collect(),
        database: client.database_name().to_string(),
    }
}

/// # Errors
/// Whatever the client reports, or a failed write to `out`.
pub fn run<S: DocumentStore>(client: &MongoDBClient<S>, cmd: Command, out: &mut dyn Write) -> Result<(), DbError> {
    run_with_format(client, cmd, OutputMode::Human, out)
}

/// # Errors
/// Whatever the client reports, or a failed write to `out`.
pub fn run_with_format<S: DocumentStore>(
    client: &MongoDBClient<S>,
    cmd: Command,
    mode: OutputMode,
    out: &mut dyn Write,
) -> Result<(), DbError> {
    match cmd {
        Command::Insert { collection, json } => {
            let doc = parse_document_json(&json)?;
            client.insert_document(doc, &collection)?;
            match mode {
                OutputMode::Json => {
                    writeln!(out, "{}", serde_json::json!({"action":"inserted","collection": collection,"count":1}))?;
                }
                OutputMode::Human => writeln!(out, "inserted 1 into {collection}")?,
            }
        }
        Command::InsertMany { collection, json } => {
            let docs = parse_documents_json(&json)?;
            let n = docs.len();
            client.insert_documents(docs, &collection)?;
            match mode {
                OutputMode::Json => {
                    writeln!(out, "{}", serde_json::json!({"action":"inserted","collection": collection,"count": n}))?;
                }
                OutputMode::Human => writeln!(out, "inserted {n} into {collection}")?,
            }
        }
        Command::Find { collection, operator, key, value, limit } => {
            let op: Operator = operator.parse()?;
            let cursor = client.find(op, &key, &value, &collection)?;
            // Documents print as NDJSON in both modes.
            for doc in cursor.take(limit.unwrap_or(usize::MAX)) {
                writeln!(out, "{}", document_to_json_line(doc?))?;
            }
        }
        Command::Count { collection } => {
            let n = client.get_collection_size(&collection)?;
            match mode {
                OutputMode::Json => writeln!(out, "{}", serde_json::json!({"collection": collection, "count": n}))?,
                OutputMode::Human => writeln!(out, "{n}")?,
            }
        }
        Command::Ping => {
            client.ping()?;
            match mode {
                OutputMode::Json => writeln!(out, "{}", serde_json::json!({"ok": 1}))?,
                OutputMode::Human => writeln!(out, "ok")?,
            }
        }
        Command::Operators => {
            for op in Operator::ALL_OPERATORS {
                match mode {
                    OutputMode::Json => {
                        writeln!(out, "{}", serde_json::json!({"operator": op.as_str(), "description": op.describe()}))?;
                    }
                    OutputMode::Human => writeln!(out, "{:<24}{}", op.as_str(), op.describe())?,
                }
            }
        }
        Command::Info => {
            let report = info(client);
            match mode {
                OutputMode::Json => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
                OutputMode::Human => {
                    writeln!(out, "package: {} {}", report.package_name, report.package_version)?;
                    writeln!(
                        out,
                        "compiled_features: {}",
                        if report.compiled_features.is_empty() {
                            "<none>".into()
                        } else {
                            report.compiled_features.join(",")
                        }
                    )?;
                    writeln!(out, "database: {}", report.database)?;
                }
            }
        }
    }
    Ok(())
}
