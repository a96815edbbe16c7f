//! Connection settings: defaults, TOML file, environment overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::DbError;
use crate::validate::validate_database_name;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 27017;
pub const DEFAULT_DATABASE: &str = "test";
pub const CONFIG_FILE_NAME: &str = "upalate-mongo.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub app_name: Option<String>,
    pub connect_timeout_ms: Option<u64>,
    pub server_selection_timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
            app_name: None,
            connect_timeout_ms: None,
            server_selection_timeout_ms: None,
        }
    }
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16, database: impl Into<String>) -> Self {
        Self { host: host.into(), port, database: database.into(), ..Self::default() }
    }

    /// # Errors
    /// Returns `Config` if the text is not a valid config table.
    pub fn from_toml_str(s: &str) -> Result<Self, DbError> {
        toml::from_str(s).map_err(|e| DbError::Config(e.to_string()))
    }

    /// # Errors
    /// Returns `Io` if the file cannot be read, `Config` if it does not parse.
    pub fn from_file(path: &Path) -> Result<Self, DbError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Precedence: overrides > env > first config file found > defaults.
    ///
    /// # Errors
    /// An explicitly named file that is missing or malformed is an error;
    /// the implicit locations are skipped when absent.
    pub fn load(explicit: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, DbError> {
        let mut cfg = match explicit {
            Some(p) => Self::from_file(p)?,
            None => match default_config_paths().into_iter().find(|p| p.exists()) {
                Some(p) => {
                    log::debug!("using config file {}", p.display());
                    Self::from_file(&p)?
                }
                None => Self::default(),
            },
        };
        cfg.apply_env(|k| std::env::var(k).ok())?;
        cfg.apply_overrides(overrides);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Applies `UPALATE_MONGO_*` variables, read through `lookup`.
    ///
    /// # Errors
    /// Returns `Config` for a port that is not a number.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), DbError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(h) = lookup("UPALATE_MONGO_HOST") {
            self.host = h;
        }
        if let Some(p) = lookup("UPALATE_MONGO_PORT") {
            self.port = p
                .parse()
                .map_err(|_| DbError::Config(format!("UPALATE_MONGO_PORT is not a port: {p}")))?;
        }
        if let Some(d) = lookup("UPALATE_MONGO_DATABASE") {
            self.database = d;
        }
        if let Some(a) = lookup("UPALATE_MONGO_APP_NAME") {
            self.app_name = Some(a);
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, o: &ConfigOverrides) {
        if let Some(h) = &o.host {
            self.host = h.clone();
        }
        if let Some(p) = o.port {
            self.port = p;
        }
        if let Some(d) = &o.database {
            self.database = d.clone();
        }
    }

    /// # Errors
    /// Returns `Config` for an empty host or port 0, `Validation` for a bad
    /// database name.
    pub fn validate(&self) -> Result<(), DbError> {
        if self.host.trim().is_empty() {
            return Err(DbError::Config("host must be non-empty".into()));
        }
        if self.host.contains(['/', '?', '@', ',']) {
            return Err(DbError::Config(format!("host contains URI syntax: {}", self.host)));
        }
        if self.port == 0 {
            return Err(DbError::Config("port must be non-zero".into()));
        }
        validate_database_name(&self.database)
    }

    /// `mongodb://host:port/` followed by any driver options that are set.
    pub fn connection_uri(&self) -> String {
        let mut uri = format!("mongodb://{}/", self.endpoint());
        let mut opts: Vec<String> = Vec::new();
        if let Some(ms) = self.connect_timeout_ms {
            opts.push(format!("connectTimeoutMS={ms}"));
        }
        if let Some(ms) = self.server_selection_timeout_ms {
            opts.push(format!("serverSelectionTimeoutMS={ms}"));
        }
        if let Some(app) = &self.app_name {
            opts.push(format!("appName={}", encode_option(app)));
        }
        if !opts.is_empty() {
            uri.push('?');
            uri.push_str(&opts.join("&"));
        }
        uri
    }

    /// `host:port`, with IPv6 literals bracketed.
    pub fn endpoint(&self) -> String {
        let host = self.host.trim();
        if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]:{}", self.port)
        } else {
            format!("{host}:{}", self.port)
        }
    }

    /// Endpoint and database, for log lines.
    pub fn display_target(&self) -> String {
        format!("{}/{}", self.endpoint(), self.database)
    }
}

fn encode_option(v: &str) -> String {
    let mut out = String::with_capacity(v.len());
    for b in v.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

/// Candidate config files, most specific first.
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = vec![];
    if let Ok(p) = std::env::var("UPALATE_MONGO_CONFIG") {
        paths.push(PathBuf::from(p));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join(CONFIG_FILE_NAME));
    }
    if let Some(dir) = dirs_next::config_dir() {
        paths.push(dir.join(CONFIG_FILE_NAME));
    }
    paths
}
