//! Lead rows from the client spreadsheet.

pub mod client;
pub mod source;
pub mod types;

pub use client::SheetsClient;
pub use source::{fetch_records, rows_from_values, LeadSource};
