use bson::Bson;
use serde::{Deserialize, Serialize};

// Safety limits on caller-supplied filters
pub(crate) const MAX_PATH_DEPTH: usize = 32;
pub(crate) const MAX_AND_DEPTH: usize = 8;
pub(crate) const MAX_AND_CLAUSES: usize = 64;

/// Query operators understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    /// Return all elements in the collection.
    All,
    And,
    Equals,
    Exists,
    GreaterThan,
    GreaterThanOrEquals,
    LessThan,
    LessThanOrEquals,
}

/// What an operator means once resolved by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Semantic {
    MatchAll,
    Conjunction,
    Presence,
    Compare(CmpOp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    True,
    And(Vec<Filter>),
    Exists { path: String, exists: bool },
    Cmp { path: String, op: CmpOp, value: Bson },
}

/// One (operator, key, value) triple as a caller hands it in.
///
/// `value` stays a string until dispatch so that relational operators can
/// report a parse failure against the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    pub operator: Operator,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl FilterRequest {
    pub fn new(operator: Operator, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { operator, key: key.into(), value: value.into() }
    }

    pub fn all() -> Self {
        Self::new(Operator::All, "", "")
    }
}
