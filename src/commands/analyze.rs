//! Analysis command implementations.
//!
//! Each command follows the same request-scoped sequence:
//! 1. Fetch the client's rows
//! 2. Validate them into lead records
//! 3. Apply the optional date window
//! 4. Normalize against the video link registry
//! 5. Aggregate

use crate::aggregator::{
    aggregate, quality_distribution, rollup, AggregationRow, Pipeline, PipelineStages,
    RollupReport, StageShare,
};
use crate::filter::filter_by_date;
use crate::links::VideoLinkMap;
use crate::parser::{normalize, NormalizedRecord, RawRow};
use crate::sheets::{fetch_records, LeadSource};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;
use std::time::Instant;

/// Optional creation-day window shared by the analysis commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateArgs {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Visible client tabs
pub fn list_clients<S: LeadSource + ?Sized>(source: &S) -> Result<Vec<String>> {
    source
        .list_client_ids()
        .context("Failed to list clients")
}

/// Raw rows of one client, unvalidated
pub fn client_rows<S: LeadSource + ?Sized>(source: &S, client: &str) -> Result<Vec<RawRow>> {
    source
        .fetch_rows(client)
        .with_context(|| format!("Failed to fetch rows for client {}", client))
}

/// Fetch, validate, date-filter and normalize one client's rows
fn load_normalized<S: LeadSource + ?Sized>(
    source: &S,
    links: &VideoLinkMap,
    client: &str,
    dates: DateArgs,
) -> Result<Vec<NormalizedRecord>> {
    let records = fetch_records(source, client)
        .with_context(|| format!("Failed to load leads for client {}", client))?;
    let records = filter_by_date(records, dates.start, dates.end);
    Ok(normalize(&records, links))
}

/// Closed or appointment metrics for one client
pub fn analyze_pipeline<S: LeadSource + ?Sized>(
    source: &S,
    links: &VideoLinkMap,
    client: &str,
    pipeline: Pipeline,
    stages: &PipelineStages,
    dates: DateArgs,
) -> Result<Vec<AggregationRow>> {
    let start_time = Instant::now();
    info!("Analyzing {} for client: {}", pipeline.label(), client);

    let normalized = load_normalized(source, links, client, dates)?;
    let rows = aggregate(&normalized, stages.for_pipeline(pipeline));

    info!(
        "{} videos from {} leads in {:.2}s",
        rows.len(),
        normalized.len(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(rows)
}

/// Stage breakdown of one video for one client
pub fn analyze_quality<S: LeadSource + ?Sized>(
    source: &S,
    links: &VideoLinkMap,
    client: &str,
    video_id: &str,
    dates: DateArgs,
) -> Result<Vec<StageShare>> {
    info!("Analyzing lead quality for {} / {}", client, video_id);

    let normalized = load_normalized(source, links, client, dates)?;
    Ok(quality_distribution(&normalized, video_id))
}

/// Per-video totals across every client
pub fn video_performance<S: LeadSource + ?Sized>(
    source: &S,
    links: &VideoLinkMap,
    stages: &PipelineStages,
    dates: DateArgs,
) -> Result<RollupReport> {
    let clients = list_clients(source)?;
    Ok(rollup(source, &clients, links, dates.start, dates.end, stages))
}
