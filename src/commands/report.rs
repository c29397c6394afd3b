//! Report and alert command implementations.

use crate::aggregator::{Pipeline, PipelineStages};
use crate::links::VideoLinkMap;
use crate::notify::{send_notifications, DeliveryRecord, Notifier};
use crate::report::{build_report, PeriodicReport, ReportContext, ReportPeriod};
use crate::sheets::LeadSource;
use crate::utils::config::SlackConfig;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{info, warn};

/// Arguments for the report command
#[derive(Debug, Clone)]
pub struct ReportArgs {
    pub period: ReportPeriod,

    /// Day the report is produced on; the period ends the day before
    pub today: NaiveDate,
}

/// Outcome of one pipeline's report
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub report: PeriodicReport,
    pub deliveries: Vec<DeliveryRecord>,
}

/// Build and send the appointment and close reports for a period
///
/// Appointment reports go to the appointments channel, close reports to the
/// closed channel. Delivery failures are recorded, not returned.
pub fn execute_report<S, N>(
    source: &S,
    notifier: &N,
    links: &VideoLinkMap,
    slack: &SlackConfig,
    stages: &PipelineStages,
    args: &ReportArgs,
) -> Result<Vec<ReportOutcome>>
where
    S: LeadSource + ?Sized,
    N: Notifier + ?Sized,
{
    let client_ids = source
        .list_client_ids()
        .context("Failed to list clients for report")?;

    let ctx = ReportContext {
        source,
        client_ids: &client_ids,
        links,
        mentions: &slack.mentions,
    };

    let runs = [
        (Pipeline::Appointments, &slack.appointments_channel),
        (Pipeline::Closed, &slack.closed_channel),
    ];

    let mut outcomes = Vec::with_capacity(runs.len());
    for (pipeline, channel) in runs {
        let report = build_report(
            &ctx,
            args.period,
            args.today,
            pipeline,
            stages.for_pipeline(pipeline),
        );
        let deliveries = send_notifications(notifier, std::slice::from_ref(channel), &report.message);

        let failed = deliveries.iter().filter(|d| !d.success).count();
        if failed > 0 {
            warn!("{} report: {} deliveries failed", pipeline.label(), failed);
        } else {
            info!("{} report sent to {}", pipeline.label(), channel);
        }

        outcomes.push(ReportOutcome { report, deliveries });
    }

    Ok(outcomes)
}

/// Send a free-form message to a set of channels
pub fn send_alert<N: Notifier + ?Sized>(
    notifier: &N,
    channels: &[String],
    message: &str,
) -> Vec<DeliveryRecord> {
    info!("Sending alert to {} channels", channels.len());
    send_notifications(notifier, channels, message)
}
