//! Cross-client video performance rollup.
//!
//! Every client runs through the same fetch -> filter -> normalize ->
//! aggregate sequence; the per-video counts are then summed across clients.
//! A client whose sequence fails is skipped and reported, never fatal.

use super::metrics::{aggregate, PipelineStages};
use crate::filter::filter_by_date;
use crate::links::VideoLinkMap;
use crate::parser::normalize;
use crate::sheets::{fetch_records, LeadSource};
use crate::utils::error::ClientError;
use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Summed counts for one (Video ID, Caption) across clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoTotals {
    pub video_id: String,
    pub caption: String,
    pub leads: u64,
    pub appointments: u64,
    pub closes: u64,
}

/// A client skipped during the rollup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientFailure {
    pub client: String,
    pub error: String,
}

/// Result of a rollup run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupReport {
    /// Sorted by leads, descending
    pub totals: Vec<VideoTotals>,
    pub failed_clients: Vec<ClientFailure>,
}

/// One client's counts for a (Video ID, Caption, Link) group
struct ClientCounts {
    video_id: String,
    caption: String,
    leads: u64,
    appointments: u64,
    closes: u64,
}

/// Sum per-video counts over `client_ids`
///
/// **Public** - main entry point for the cross-client rollup
///
/// Link is not part of the final grouping key: the same video with different
/// links in different clients collapses into one row.
pub fn rollup<S: LeadSource + ?Sized>(
    source: &S,
    client_ids: &[String],
    links: &VideoLinkMap,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    stages: &PipelineStages,
) -> RollupReport {
    info!("Rolling up video performance over {} clients", client_ids.len());

    let mut report = RollupReport::default();
    let mut accumulated: Vec<ClientCounts> = Vec::new();

    for client in client_ids {
        match analyze_client(source, client, links, start, end, stages) {
            Ok(counts) => {
                debug!("Client {}: {} video groups", client, counts.len());
                accumulated.extend(counts);
            }
            Err(e) => {
                warn!("Skipping client {}: {}", client, e);
                report.failed_clients.push(ClientFailure {
                    client: client.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    report.totals = sum_by_video(accumulated);
    info!(
        "Rollup complete: {} videos, {} failed clients",
        report.totals.len(),
        report.failed_clients.len()
    );

    report
}

/// Both pipelines for one client, joined per key
fn analyze_client<S: LeadSource + ?Sized>(
    source: &S,
    client: &str,
    links: &VideoLinkMap,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    stages: &PipelineStages,
) -> Result<Vec<ClientCounts>, ClientError> {
    let records = filter_by_date(fetch_records(source, client)?, start, end);
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let normalized = normalize(&records, links);
    let appointments = aggregate(&normalized, &stages.appointments);
    let closes: HashMap<(String, String, String), u64> = aggregate(&normalized, &stages.closed)
        .into_iter()
        .map(|row| ((row.video_id, row.caption, row.link), row.matched))
        .collect();

    Ok(appointments
        .into_iter()
        .map(|row| {
            let key = (row.video_id, row.caption, row.link);
            let closes = closes.get(&key).copied().unwrap_or(0);
            let (video_id, caption, _link) = key;
            ClientCounts {
                video_id,
                caption,
                leads: row.leads,
                appointments: row.matched,
                closes,
            }
        })
        .collect())
}

fn sum_by_video(accumulated: Vec<ClientCounts>) -> Vec<VideoTotals> {
    let mut groups: BTreeMap<(String, String), (u64, u64, u64)> = BTreeMap::new();

    for counts in accumulated {
        let entry = groups
            .entry((counts.video_id, counts.caption))
            .or_insert((0, 0, 0));
        entry.0 += counts.leads;
        entry.1 += counts.appointments;
        entry.2 += counts.closes;
    }

    let mut totals: Vec<VideoTotals> = groups
        .into_iter()
        .map(|((video_id, caption), (leads, appointments, closes))| VideoTotals {
            video_id,
            caption,
            leads,
            appointments,
            closes,
        })
        .collect();

    totals.sort_by(|a, b| b.leads.cmp(&a.leads));
    totals
}
