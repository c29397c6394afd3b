//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use video_lead_analytics::parser::RawRow;
use video_lead_analytics::sheets::LeadSource;
use video_lead_analytics::utils::config::{
    APPOINTMENT_DAY_FIELD, CREATED_AT_FIELD, STAGE_FIELD, UTM_CONTENT_FIELD,
};
use video_lead_analytics::utils::error::SourceError;

/// In-memory lead source; clients listed in `failing` return an HTTP error
#[derive(Default)]
pub struct MemorySource {
    clients: Vec<String>,
    rows: HashMap<String, Vec<RawRow>>,
    failing: HashSet<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(mut self, client: &str, rows: Vec<RawRow>) -> Self {
        self.clients.push(client.to_string());
        self.rows.insert(client.to_string(), rows);
        self
    }

    pub fn with_failing_client(mut self, client: &str) -> Self {
        self.clients.push(client.to_string());
        self.failing.insert(client.to_string());
        self
    }
}

impl LeadSource for MemorySource {
    fn list_client_ids(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.clients.clone())
    }

    fn fetch_rows(&self, client_id: &str) -> Result<Vec<RawRow>, SourceError> {
        if self.failing.contains(client_id) {
            return Err(SourceError::InvalidResponse(
                "HTTP 500: backend unavailable".to_string(),
            ));
        }
        Ok(self.rows.get(client_id).cloned().unwrap_or_default())
    }
}

/// A lead row with the three required columns
pub fn lead(utm: &str, stage: &str, created_at: &str) -> RawRow {
    let mut row = RawRow::new();
    row.insert(UTM_CONTENT_FIELD.to_string(), utm.to_string());
    row.insert(STAGE_FIELD.to_string(), stage.to_string());
    row.insert(CREATED_AT_FIELD.to_string(), created_at.to_string());
    row
}

/// A lead row that also carries an appointment day
pub fn lead_with_appointment(utm: &str, stage: &str, created_at: &str, day: &str) -> RawRow {
    let mut row = lead(utm, stage, created_at);
    row.insert(APPOINTMENT_DAY_FIELD.to_string(), day.to_string());
    row
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
