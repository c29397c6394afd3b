//! Aggregation of normalized lead records into per-video metrics.
//!
//! This module turns normalized records into:
//! - Lead / matched-stage counts with ratio and rate (per pipeline)
//! - Stage breakdown for a single video
//! - Cross-client totals per video

pub mod metrics;
pub mod quality;
pub mod rollup;

// Re-export main types and functions
pub use metrics::{aggregate, AggregationRow, Pipeline, PipelineStages, StageSet};
pub use quality::{quality_distribution, StageShare};
pub use rollup::{rollup, ClientFailure, RollupReport, VideoTotals};
