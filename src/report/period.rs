//! Reporting periods and the rows they cover.

use crate::filter::DateWindow;
use crate::parser::LeadRecord;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Daily,
    Weekly,
    Monthly,
}

/// Inclusive day range covered by a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportPeriod {
    /// Window for a report sent on `today`
    ///
    /// - Daily: yesterday
    /// - Weekly: the seven days ending yesterday
    /// - Monthly: the previous calendar month
    pub fn window(self, today: NaiveDate) -> ReportWindow {
        let yesterday = today - Days::new(1);
        match self {
            ReportPeriod::Daily => ReportWindow {
                start: yesterday,
                end: yesterday,
            },
            ReportPeriod::Weekly => ReportWindow {
                start: yesterday - Days::new(6),
                end: yesterday,
            },
            ReportPeriod::Monthly => {
                let first_of_month = today - Days::new(u64::from(today.day0()));
                let end = first_of_month - Days::new(1);
                ReportWindow {
                    start: end - Days::new(u64::from(end.day0())),
                    end,
                }
            }
        }
    }

    /// Whether a record belongs in this period's report
    ///
    /// Daily reports also pick up leads whose appointment falls on the day.
    pub fn covers(self, window: &ReportWindow, record: &LeadRecord) -> bool {
        match self {
            ReportPeriod::Daily => {
                record.created_at == Some(window.start)
                    || record.appointment_day == Some(window.start)
            }
            ReportPeriod::Weekly | ReportPeriod::Monthly => {
                DateWindow::Range(window.start, window.end).contains(record.created_at)
            }
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(ReportPeriod::Daily),
            "weekly" => Ok(ReportPeriod::Weekly),
            "monthly" => Ok(ReportPeriod::Monthly),
            other => Err(format!(
                "unknown report period '{}' (expected daily, weekly or monthly)",
                other
            )),
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportPeriod::Daily => "daily",
            ReportPeriod::Weekly => "weekly",
            ReportPeriod::Monthly => "monthly",
        };
        f.write_str(name)
    }
}
