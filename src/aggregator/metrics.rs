//! Per-video lead and matched-stage metrics.
//!
//! Leads are counted per (Video ID, Caption, Link). Matched counts the subset
//! of those leads whose stage is in the pipeline's target set; from the two
//! we derive the ratio (leads per match) and the rate (matches per 100 leads).

use crate::parser::NormalizedRecord;
use crate::utils::config::{StagesConfig, APPOINTMENT_STAGES, CLOSED_STAGES};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Which stage set a run is counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pipeline {
    /// Closed and installed leads
    Closed,
    /// Any lead that reached an appointment
    Appointments,
}

impl Pipeline {
    /// Built-in target stages
    pub fn default_stages(self) -> StageSet {
        match self {
            Pipeline::Closed => StageSet::from_iter(CLOSED_STAGES.iter().copied()),
            Pipeline::Appointments => StageSet::from_iter(APPOINTMENT_STAGES.iter().copied()),
        }
    }

    /// Spanish label used in chat reports
    pub fn label(self) -> &'static str {
        match self {
            Pipeline::Closed => "Cierres",
            Pipeline::Appointments => "Citas",
        }
    }
}

/// Target stages, matched exactly against uppercased record stages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageSet(BTreeSet<String>);

impl StageSet {
    pub fn contains(&self, stage: &str) -> bool {
        self.0.contains(stage)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StageSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        StageSet(iter.into_iter().map(Into::into).collect())
    }
}

/// Target stages for both pipelines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStages {
    pub closed: StageSet,
    pub appointments: StageSet,
}

impl PipelineStages {
    pub fn from_config(config: &StagesConfig) -> Self {
        Self {
            closed: config.closed.iter().cloned().collect(),
            appointments: config.appointments.iter().cloned().collect(),
        }
    }

    pub fn for_pipeline(&self, pipeline: Pipeline) -> &StageSet {
        match pipeline {
            Pipeline::Closed => &self.closed,
            Pipeline::Appointments => &self.appointments,
        }
    }
}

impl Default for PipelineStages {
    fn default() -> Self {
        Self {
            closed: Pipeline::Closed.default_stages(),
            appointments: Pipeline::Appointments.default_stages(),
        }
    }
}

/// Metrics for one (Video ID, Caption, Link) group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationRow {
    pub video_id: String,
    pub caption: String,
    pub link: String,

    /// Rows in the group
    pub leads: u64,

    /// Rows in the group whose stage is targeted
    pub matched: u64,

    /// leads / matched, 0 when nothing matched
    pub ratio: f64,

    /// matched / leads * 100
    pub rate: f64,
}

impl AggregationRow {
    /// Create a row, deriving ratio and rate from the counts
    pub fn new(video_id: String, caption: String, link: String, leads: u64, matched: u64) -> Self {
        let ratio = if matched > 0 {
            leads as f64 / matched as f64
        } else {
            0.0
        };
        let rate = matched as f64 / leads as f64 * 100.0;

        Self {
            video_id,
            caption,
            link,
            leads,
            matched,
            ratio: finite_or_zero(ratio),
            rate: finite_or_zero(rate),
        }
    }
}

/// Coerce NaN and infinities to 0
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Aggregate normalized records by video
///
/// **Public** - main entry point for metrics calculation
///
/// # Returns
/// One row per (Video ID, Caption, Link), sorted by matched count
/// (descending). Ties keep ascending key order.
pub fn aggregate(records: &[NormalizedRecord], stages: &StageSet) -> Vec<AggregationRow> {
    debug!(
        "Aggregating {} records against {} target stages",
        records.len(),
        stages.len()
    );

    // (video_id, caption, link) -> (leads, matched)
    let mut groups: BTreeMap<(&str, &str, &str), (u64, u64)> = BTreeMap::new();

    for record in records {
        let key = (
            record.video_id.as_str(),
            record.caption.as_str(),
            record.link.as_str(),
        );
        let counts = groups.entry(key).or_insert((0, 0));
        counts.0 += 1;
        if stages.contains(&record.stage) {
            counts.1 += 1;
        }
    }

    let mut rows: Vec<AggregationRow> = groups
        .into_iter()
        .map(|((video_id, caption, link), (leads, matched))| {
            AggregationRow::new(
                video_id.to_string(),
                caption.to_string(),
                link.to_string(),
                leads,
                matched,
            )
        })
        .collect();

    rows.sort_by(|a, b| b.matched.cmp(&a.matched));

    debug!("Built {} aggregation rows", rows.len());

    rows
}
