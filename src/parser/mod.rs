//! Lead row parsing and normalization.
//!
//! This module handles:
//! - Validating raw spreadsheet rows into typed lead records
//! - Lenient timestamp parsing
//! - Extracting Video ID and caption from UTM Content tags
//! - Resolving video links

pub mod normalize;
pub mod schema;
pub mod timestamp;
pub mod utm;

// Re-export main types
pub use normalize::normalize;
pub use schema::{records_from_rows, LeadRecord, NormalizedRecord, RawRow};
pub use timestamp::{parse_appointment_day, parse_timestamp};
pub use utm::{parse_utm_content, UtmTag};
