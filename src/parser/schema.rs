//! Row types flowing through the analysis pipeline.
//!
//! Raw rows arrive as loosely-typed column maps. They are validated once at
//! ingestion into [`LeadRecord`]s, which the rest of the crate works with.

use super::timestamp::{parse_appointment_day, parse_timestamp};
use crate::utils::config::{
    APPOINTMENT_DAY_FIELD, CREATED_AT_FIELD, STAGE_FIELD, UTM_CONTENT_FIELD,
};
use crate::utils::error::RecordError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One spreadsheet row: column header -> cell text
pub type RawRow = BTreeMap<String, String>;

/// A validated lead row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    /// Free-text campaign tag; `None` when the cell is blank
    pub utm_content: Option<String>,

    /// Pipeline status as written in the sheet
    pub stage: String,

    /// Creation day, `None` if the timestamp could not be parsed
    pub created_at: Option<NaiveDate>,

    /// Appointment day, `None` if absent or unparseable
    pub appointment_day: Option<NaiveDate>,
}

impl LeadRecord {
    /// Validate a raw row
    ///
    /// # Errors
    /// * `RecordError::MissingField` - a required column is absent
    pub fn from_raw(row: &RawRow) -> Result<Self, RecordError> {
        let utm_content = required(row, UTM_CONTENT_FIELD)?;
        let stage = required(row, STAGE_FIELD)?;
        let created_at = required(row, CREATED_AT_FIELD)?;

        Ok(Self {
            utm_content: non_blank(utm_content),
            stage: stage.to_string(),
            created_at: parse_timestamp(created_at),
            appointment_day: row
                .get(APPOINTMENT_DAY_FIELD)
                .and_then(|value| parse_appointment_day(value)),
        })
    }
}

/// Validate every row, failing on the first one with a missing column
pub fn records_from_rows(rows: &[RawRow]) -> Result<Vec<LeadRecord>, RecordError> {
    rows.iter().map(LeadRecord::from_raw).collect()
}

fn required<'a>(row: &'a RawRow, field: &str) -> Result<&'a str, RecordError> {
    row.get(field)
        .map(String::as_str)
        .ok_or_else(|| RecordError::MissingField(field.to_string()))
}

/// Blank cells and the literal "NaN" export of an empty cell count as missing
fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(value.to_string())
    }
}

/// A lead record with its derived video fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Uppercased, trimmed UTM tag (empty when missing)
    pub utm_content: String,

    /// Uppercased, trimmed stage
    pub stage: String,

    pub created_at: Option<NaiveDate>,

    pub appointment_day: Option<NaiveDate>,

    /// Extracted video identifier or the no-identifier sentinel
    pub video_id: String,

    /// Caption (leyenda), possibly empty
    pub caption: String,

    /// Registered URL or the no-link sentinel
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_raw_valid() {
        let row = raw(&[
            ("UTM Content", "abc|promo"),
            ("Stage", "closed"),
            ("Created at (fecha)", "2024-01-05 10:30:00"),
            ("Dia de cita", "January 7, 2024"),
        ]);

        let record = LeadRecord::from_raw(&row).unwrap();
        assert_eq!(record.utm_content.as_deref(), Some("abc|promo"));
        assert_eq!(record.stage, "closed");
        assert_eq!(record.created_at, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(record.appointment_day, NaiveDate::from_ymd_opt(2024, 1, 7));
    }

    #[test]
    fn test_from_raw_missing_stage() {
        let row = raw(&[("UTM Content", "abc"), ("Created at (fecha)", "2024-01-05")]);
        assert_eq!(
            LeadRecord::from_raw(&row),
            Err(RecordError::MissingField("Stage".to_string()))
        );
    }

    #[test]
    fn test_from_raw_blank_and_nan_utm() {
        for value in ["", "   ", "NaN", "nan"] {
            let row = raw(&[
                ("UTM Content", value),
                ("Stage", "NEW"),
                ("Created at (fecha)", "not a date"),
            ]);
            let record = LeadRecord::from_raw(&row).unwrap();
            assert!(record.utm_content.is_none(), "value {:?}", value);
            assert!(record.created_at.is_none());
            assert!(record.appointment_day.is_none());
        }
    }

    #[test]
    fn test_records_from_rows_fails_on_first_bad_row() {
        let rows = vec![
            raw(&[("UTM Content", "A"), ("Stage", "NEW"), ("Created at (fecha)", "")]),
            raw(&[("UTM Content", "B"), ("Stage", "NEW")]),
        ];
        let err = records_from_rows(&rows).unwrap_err();
        assert_eq!(err, RecordError::MissingField("Created at (fecha)".to_string()));
    }
}
