//! Output writers for analysis results.

pub mod json;

// Re-export main functions
pub use json::{to_json_string, write_json};
