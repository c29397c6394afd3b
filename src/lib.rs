//! Video Lead Analytics
//!
//! Per-video lead, appointment and close analytics for lead-tracking
//! spreadsheets with one tab per client.
//!
//! Each lead row carries a UTM Content tag such as `"ABC123|Summer Promo"`.
//! The tag is split into a video identifier and a caption, leads are grouped
//! per video, and the groups are scored against a set of target stages.
//!
//! This crate provides the core implementation for the `video-leads` CLI.
//!
//! ## Pipeline
//!
//! ```ignore
//! let records = records_from_rows(&rows)?;
//! let records = filter_by_date(records, start, end);
//! let normalized = normalize(&records, &links);
//! let closed = aggregate(&normalized, &Pipeline::Closed.default_stages());
//! ```

pub mod aggregator;
pub mod commands;
pub mod filter;
pub mod links;
pub mod notify;
pub mod output;
pub mod parser;
pub mod report;
pub mod sheets;
pub mod utils;
