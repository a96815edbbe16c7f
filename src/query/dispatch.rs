use bson::Bson;

use crate::errors::DbError;
use crate::validate::validate_key;

use super::parse::parse_and_clauses;
use super::types::{CmpOp, Filter, FilterRequest, MAX_AND_CLAUSES, MAX_AND_DEPTH, Operator, Semantic};

/// Translates a request into a filter without touching any store.
///
/// Every operator in the catalog has a case here. Nothing falls back to
/// matching all documents unless the operator is `ALL`.
///
/// # Errors
/// `Validation` for a missing key, an empty value on any operator but `ALL`,
/// or an unusable `AND` clause list. `Parse` when the value does not fit the
/// operator.
pub fn build_filter(req: &FilterRequest) -> Result<Filter, DbError> {
    build_at_depth(req, 0)
}

fn build_at_depth(req: &FilterRequest, depth: usize) -> Result<Filter, DbError> {
    if req.operator.requires_key() {
        validate_key(&req.key)?;
    }
    if req.operator != Operator::All && req.value.is_empty() {
        return Err(DbError::Validation(format!("{} requires a non-empty query value", req.operator)));
    }
    match req.operator.semantic() {
        Semantic::MatchAll => Ok(Filter::True),
        Semantic::Compare(CmpOp::Eq) => Ok(Filter::Cmp {
            path: req.key.clone(),
            op: CmpOp::Eq,
            value: equality_value(&req.value),
        }),
        Semantic::Compare(op) => Ok(Filter::Cmp {
            path: req.key.clone(),
            op,
            value: Bson::Int64(parse_integer(&req.key, &req.value)?),
        }),
        Semantic::Presence => {
            Ok(Filter::Exists { path: req.key.clone(), exists: parse_presence(&req.key, &req.value)? })
        }
        Semantic::Conjunction => {
            if depth >= MAX_AND_DEPTH {
                return Err(DbError::Validation(format!(
                    "AND nested deeper than {MAX_AND_DEPTH} levels"
                )));
            }
            let clauses = parse_and_clauses(&req.value)?;
            if clauses.is_empty() {
                return Err(DbError::Validation("AND requires at least one sub-filter".into()));
            }
            if clauses.len() > MAX_AND_CLAUSES {
                return Err(DbError::Validation(format!(
                    "AND accepts at most {MAX_AND_CLAUSES} sub-filters, got {}",
                    clauses.len()
                )));
            }
            let subs = clauses
                .iter()
                .map(|c| build_at_depth(c, depth + 1))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Filter::And(subs))
        }
    }
}

/// Relational operators compare against whole numbers only.
pub fn parse_integer(key: &str, value: &str) -> Result<i64, DbError> {
    value.parse::<i64>().map_err(|_| DbError::parse(key, value, "an integer"))
}

/// Integers and booleans are matched by type; anything else as a string.
pub fn equality_value(value: &str) -> Bson {
    if let Ok(i) = value.parse::<i64>() {
        return Bson::Int64(i);
    }
    match value {
        "true" => Bson::Boolean(true),
        "false" => Bson::Boolean(false),
        _ => Bson::String(value.to_string()),
    }
}

fn parse_presence(key: &str, value: &str) -> Result<bool, DbError> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(DbError::parse(key, value, "a boolean (true/false)")),
    }
}
