use std::fmt;
use std::str::FromStr;

use crate::errors::DbError;

use super::types::{CmpOp, Operator, Semantic};

impl Operator {
    pub const ALL_OPERATORS: [Operator; 8] = [
        Operator::All,
        Operator::And,
        Operator::Equals,
        Operator::Exists,
        Operator::GreaterThan,
        Operator::GreaterThanOrEquals,
        Operator::LessThan,
        Operator::LessThanOrEquals,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::And => "AND",
            Self::Equals => "EQUALS",
            Self::Exists => "EXISTS",
            Self::GreaterThan => "GREATER_THAN",
            Self::GreaterThanOrEquals => "GREATER_THAN_OR_EQUALS",
            Self::LessThan => "LESS_THAN",
            Self::LessThanOrEquals => "LESS_THAN_OR_EQUALS",
        }
    }

    pub fn semantic(self) -> Semantic {
        match self {
            Self::All => Semantic::MatchAll,
            Self::And => Semantic::Conjunction,
            Self::Equals => Semantic::Compare(CmpOp::Eq),
            Self::Exists => Semantic::Presence,
            Self::GreaterThan => Semantic::Compare(CmpOp::Gt),
            Self::GreaterThanOrEquals => Semantic::Compare(CmpOp::Gte),
            Self::LessThan => Semantic::Compare(CmpOp::Lt),
            Self::LessThanOrEquals => Semantic::Compare(CmpOp::Lte),
        }
    }

    /// Ordering comparisons; their value must parse as an integer.
    pub fn is_relational(self) -> bool {
        matches!(self.semantic(), Semantic::Compare(op) if op != CmpOp::Eq)
    }

    /// Operators that address a single field and therefore need a key.
    pub fn requires_key(self) -> bool {
        !matches!(self, Self::All | Self::And)
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::All => "match every document",
            Self::And => "all sub-filters must match",
            Self::Equals => "field equals value",
            Self::Exists => "field is present (value true/false)",
            Self::GreaterThan => "field > integer value",
            Self::GreaterThanOrEquals => "field >= integer value",
            Self::LessThan => "field < integer value",
            Self::LessThanOrEquals => "field <= integer value",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL_OPERATORS
            .into_iter()
            .find(|op| op.as_str() == wanted)
            .ok_or_else(|| DbError::UnsupportedOperator(s.to_string()))
    }
}

impl CmpOp {
    /// The driver's query operator for this comparison.
    pub fn as_mongo(self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
        }
    }

    pub fn from_mongo(s: &str) -> Option<Self> {
        match s {
            "$eq" => Some(Self::Eq),
            "$gt" => Some(Self::Gt),
            "$gte" => Some(Self::Gte),
            "$lt" => Some(Self::Lt),
            "$lte" => Some(Self::Lte),
            _ => None,
        }
    }
}
