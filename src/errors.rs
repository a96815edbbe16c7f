use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Parse error: cannot read `{value}` for `{key}` as {expected}")]
    Parse { key: String, value: String, expected: &'static str },

    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[cfg(feature = "mongo")]
    #[error("Driver error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("BSON: {0}")]
    BsonDe(#[from] bson::de::Error),

    #[error("BSON: {0}")]
    BsonSer(#[from] bson::ser::Error),
}

impl DbError {
    pub(crate) fn parse(key: &str, value: &str, expected: &'static str) -> Self {
        Self::Parse { key: key.to_string(), value: value.to_string(), expected }
    }

    /// True for errors raised before the driver was ever contacted.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Parse { .. } | Self::UnsupportedOperator(_))
    }
}

impl From<std::io::Error> for DbError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
