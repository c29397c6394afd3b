//! CLI command implementations.
//!
//! Commands orchestrate the library components and are generic over the
//! lead source and notifier so they run against fakes in tests.

pub mod analyze;
pub mod report;
pub mod utils;

// Re-export main command functions
pub use analyze::{
    analyze_pipeline, analyze_quality, client_rows, list_clients, video_performance, DateArgs,
};
pub use report::{execute_report, send_alert, ReportArgs, ReportOutcome};
pub use utils::{display_version, emit};
