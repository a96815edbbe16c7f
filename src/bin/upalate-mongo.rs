use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use upalate_mongo::cli::{self as prog_cli, Command, OutputMode};
use upalate_mongo::config::{ClientConfig, ConfigOverrides};
use upalate_mongo::{DbError, DocumentStore, MemoryStore, MongoDBClient};

#[derive(Parser)]
#[command(name = "upalate-mongo", version, about = "Insert, count and query MongoDB collections")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    host: Option<String>,
    #[arg(long, global = true)]
    port: Option<u16>,
    #[arg(long, short = 'd', global = true)]
    database: Option<String>,
    /// Use a throwaway in-process store instead of a server
    #[arg(long, global = true)]
    memory: bool,
    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Insert one JSON object
    Insert { collection: String, json: String },
    /// Insert a JSON array of objects in one batch
    InsertMany { collection: String, json: String },
    /// Find documents, e.g. `find people GREATER_THAN age 30`
    Find {
        collection: String,
        operator: String,
        #[arg(default_value = "")]
        key: String,
        #[arg(default_value = "")]
        value: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Number of documents in a collection
    Count { collection: String },
    /// Round-trip to the server
    Ping,
    /// List supported query operators
    Operators,
    /// Package and build information
    Info,
}

impl From<Cmd> for Command {
    fn from(c: Cmd) -> Self {
        match c {
            Cmd::Insert { collection, json } => Command::Insert { collection, json },
            Cmd::InsertMany { collection, json } => Command::InsertMany { collection, json },
            Cmd::Find { collection, operator, key, value, limit } => {
                Command::Find { collection, operator, key, value, limit }
            }
            Cmd::Count { collection } => Command::Count { collection },
            Cmd::Ping => Command::Ping,
            Cmd::Operators => Command::Operators,
            Cmd::Info => Command::Info,
        }
    }
}

fn execute<S: DocumentStore>(client: &MongoDBClient<S>, cmd: Command, mode: OutputMode) -> Result<(), DbError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    prog_cli::run_with_format(client, cmd, mode, &mut out)
}

fn main() {
    let cli = Cli::parse();
    if cli.log_dir.is_some() || cli.log_level.is_some() {
        if let Err(e) = upalate_mongo::logger::configure_logging(cli.log_dir.as_deref(), cli.log_level.as_deref(), None) {
            eprintln!("warning: logging not configured: {e}");
        }
    } else if let Err(e) = upalate_mongo::logger::configure_from_env() {
        eprintln!("warning: logging not configured: {e}");
    }

    let overrides = ConfigOverrides { host: cli.host, port: cli.port, database: cli.database };
    let mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
    let result = ClientConfig::load(cli.config.as_deref(), &overrides).and_then(|cfg| {
        let cmd = Command::from(cli.command);
        if cli.memory {
            let client = MongoDBClient::with_store(Arc::new(MemoryStore::new()), &cfg.database)?;
            execute(&client, cmd, mode)
        } else {
            let client = MongoDBClient::connect(&cfg)?;
            execute(&client, cmd, mode)
        }
    });
    if let Err(e) = result {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(if e.is_input_error() { 2 } else { 1 });
    }
}
