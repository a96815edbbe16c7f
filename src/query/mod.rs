// Submodules for separation of concerns
mod catalog;
mod cursor;
mod dispatch;
mod eval;
mod parse;
mod render;
mod types;

// Public API re-exports
pub use cursor::Cursor;
pub use dispatch::{build_filter, equality_value, parse_integer};
pub use eval::{compare_bson, eval_filter};
pub use parse::{and_value, parse_and_clauses, parse_request_json};
pub use types::{CmpOp, Filter, FilterRequest, Operator, Semantic};
