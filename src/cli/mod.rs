mod command;
mod runner;
mod util;

pub use command::Command;
pub use runner::{InfoReport, OutputMode, info, run, run_with_format};
pub use util::{document_to_json_line, parse_document_json, parse_documents_json};
