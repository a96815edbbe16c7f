use crate::errors::DbError;

use super::types::FilterRequest;

/// Reads the clause list carried in the value of an `AND` request.
///
/// The expected shape is a JSON array of request objects:
/// `[{"operator":"GREATER_THAN","key":"age","value":"30"}, ...]`.
///
/// # Errors
/// Returns `Parse` if the text is not such an array.
pub fn parse_and_clauses(value: &str) -> Result<Vec<FilterRequest>, DbError> {
    serde_json::from_str::<Vec<FilterRequest>>(value)
        .map_err(|_| DbError::parse("AND", value, "a JSON array of sub-filters"))
}

/// # Errors
/// Returns an error if the JSON string cannot be parsed into a request.
pub fn parse_request_json(json: &str) -> Result<FilterRequest, DbError> {
    Ok(serde_json::from_str(json)?)
}

/// Encodes sub-requests as the value of an `AND` request.
///
/// # Errors
/// Only fails if serialization itself fails.
pub fn and_value(clauses: &[FilterRequest]) -> Result<String, DbError> {
    Ok(serde_json::to_string(clauses)?)
}
