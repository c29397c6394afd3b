//! Periodic appointment and close reports.
//!
//! A report covers one period (daily, weekly, monthly) and one pipeline.
//! Every client is analyzed independently; clients without matched leads are
//! left out and a client that fails to load is logged and skipped.

pub mod message;
pub mod period;

pub use message::{empty_report_message, format_report, format_row, report_header, ClientSection};
pub use period::{ReportPeriod, ReportWindow};

use crate::aggregator::{aggregate, ClientFailure, Pipeline, StageSet};
use crate::links::VideoLinkMap;
use crate::parser::normalize;
use crate::sheets::{fetch_records, LeadSource};
use chrono::NaiveDate;
use log::{debug, info, warn};

/// A rendered report ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicReport {
    pub period: ReportPeriod,
    pub pipeline: Pipeline,
    pub window: ReportWindow,
    pub sections: Vec<ClientSection>,
    pub failed_clients: Vec<ClientFailure>,
    pub message: String,
}

/// Inputs shared by every report of one run
pub struct ReportContext<'a, S: LeadSource + ?Sized> {
    pub source: &'a S,
    pub client_ids: &'a [String],
    pub links: &'a VideoLinkMap,
    pub mentions: &'a [String],
}

/// Build the report for `period` as seen on `today`
pub fn build_report<S: LeadSource + ?Sized>(
    ctx: &ReportContext<'_, S>,
    period: ReportPeriod,
    today: NaiveDate,
    pipeline: Pipeline,
    stages: &StageSet,
) -> PeriodicReport {
    let window = period.window(today);
    info!(
        "Building {} {} report for {} - {}",
        period,
        pipeline.label(),
        window.start,
        window.end
    );

    let mut sections = Vec::new();
    let mut failed_clients = Vec::new();

    for client in ctx.client_ids {
        let records = match fetch_records(ctx.source, client) {
            Ok(records) => records,
            Err(e) => {
                warn!("Skipping client {} in {} report: {}", client, period, e);
                failed_clients.push(ClientFailure {
                    client: client.clone(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        let in_period: Vec<_> = records
            .into_iter()
            .filter(|record| period.covers(&window, record))
            .collect();
        if in_period.is_empty() {
            debug!("Client {}: no leads in period", client);
            continue;
        }

        let rows: Vec<_> = aggregate(&normalize(&in_period, ctx.links), stages)
            .into_iter()
            .filter(|row| row.matched != 0)
            .collect();

        if !rows.is_empty() {
            sections.push(ClientSection {
                client: client.clone(),
                rows,
            });
        }
    }

    let message = format_report(period, pipeline, &window, &sections, ctx.mentions);

    PeriodicReport {
        period,
        pipeline,
        window,
        sections,
        failed_clients,
        message,
    }
}
