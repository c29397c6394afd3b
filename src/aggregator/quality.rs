//! Stage breakdown ("lead quality") for a single video.

use crate::parser::NormalizedRecord;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Share of one stage among a video's leads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageShare {
    pub stage: String,
    pub leads: u64,
    /// Percentage of the video's leads
    pub percentage: f64,
}

/// Count a video's leads per stage
///
/// Video IDs are compared exactly. An unknown video yields an empty result.
/// Output is sorted by percentage (descending), ties by stage name.
pub fn quality_distribution(records: &[NormalizedRecord], video_id: &str) -> Vec<StageShare> {
    let mut by_stage: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records.iter().filter(|r| r.video_id == video_id) {
        *by_stage.entry(record.stage.as_str()).or_insert(0) += 1;
    }

    let total: u64 = by_stage.values().sum();
    debug!("Video {}: {} leads across {} stages", video_id, total, by_stage.len());

    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<StageShare> = by_stage
        .into_iter()
        .map(|(stage, leads)| StageShare {
            stage: stage.to_string(),
            leads,
            percentage: leads as f64 / total as f64 * 100.0,
        })
        .collect();

    shares.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    shares
}
