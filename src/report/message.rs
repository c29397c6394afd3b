//! Slack mrkdwn rendering of periodic reports.

use super::period::{ReportPeriod, ReportWindow};
use crate::aggregator::{AggregationRow, Pipeline};
use crate::utils::config::NO_LINK;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%m/%d/%Y";

/// Matched rows of one client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSection {
    pub client: String,
    pub rows: Vec<AggregationRow>,
}

fn fmt_day(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

/// Bold header line, without mentions
pub fn report_header(period: ReportPeriod, pipeline: Pipeline, window: &ReportWindow) -> String {
    let noun = pipeline.label().to_lowercase();
    match period {
        ReportPeriod::Daily => format!("*Resumen de {} diario {}:*", noun, fmt_day(window.start)),
        ReportPeriod::Weekly => format!(
            "*Resumen semanal de {} ({} - {}):*",
            noun,
            fmt_day(window.start),
            fmt_day(window.end)
        ),
        ReportPeriod::Monthly => format!(
            "*Resumen mensual de {} ({} - {}):*",
            noun,
            fmt_day(window.start),
            fmt_day(window.end)
        ),
    }
}

/// Message sent when no client had a matched lead
pub fn empty_report_message(period: ReportPeriod, window: &ReportWindow) -> String {
    match period {
        ReportPeriod::Daily => format!(
            "*No hubo leads analizables el {} para ningún cliente.*",
            fmt_day(window.start)
        ),
        ReportPeriod::Weekly | ReportPeriod::Monthly => format!(
            "*No hubo leads analizables entre el {} y el {} para ningún cliente.*",
            fmt_day(window.start),
            fmt_day(window.end)
        ),
    }
}

/// One bullet line for a video
pub fn format_row(row: &AggregationRow, pipeline: Pipeline) -> String {
    let caption = if row.caption.is_empty() {
        String::new()
    } else {
        format!(" ({})", row.caption)
    };
    let video = if row.link == NO_LINK {
        NO_LINK.to_string()
    } else {
        format!("<{}|Ver video>", row.link)
    };

    format!(
        "  • {}{}, {}: *{}* - {}",
        row.video_id,
        caption,
        pipeline.label(),
        row.matched,
        video
    )
}

/// Full report text
///
/// Falls back to [`empty_report_message`] when `sections` is empty.
pub fn format_report(
    period: ReportPeriod,
    pipeline: Pipeline,
    window: &ReportWindow,
    sections: &[ClientSection],
    mentions: &[String],
) -> String {
    if sections.is_empty() {
        return empty_report_message(period, window);
    }

    let mut message = report_header(period, pipeline, window);
    for mention in mentions {
        message.push_str(&format!(" <@{}>", mention));
    }
    message.push('\n');

    for section in sections {
        message.push_str(&format!("*{}:*\n", section.client));
        for row in &section.rows {
            message.push_str(&format_row(row, pipeline));
            message.push('\n');
        }
        message.push('\n');
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: (i32, u32, u32), end: (i32, u32, u32)) -> ReportWindow {
        ReportWindow {
            start: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    #[test]
    fn test_headers() {
        let daily = window((2026, 10, 15), (2026, 10, 15));
        assert_eq!(
            report_header(ReportPeriod::Daily, Pipeline::Appointments, &daily),
            "*Resumen de citas diario 10/15/2026:*"
        );

        let weekly = window((2026, 10, 9), (2026, 10, 15));
        assert_eq!(
            report_header(ReportPeriod::Weekly, Pipeline::Closed, &weekly),
            "*Resumen semanal de cierres (10/09/2026 - 10/15/2026):*"
        );
    }

    #[test]
    fn test_format_row() {
        let linked = AggregationRow::new("ABC".into(), "Promo".into(), "https://v/abc".into(), 4, 2);
        assert_eq!(
            format_row(&linked, Pipeline::Appointments),
            "  • ABC (Promo), Citas: *2* - <https://v/abc|Ver video>"
        );

        let unlinked = AggregationRow::new("XYZ".into(), "".into(), NO_LINK.into(), 1, 1);
        assert_eq!(
            format_row(&unlinked, Pipeline::Closed),
            "  • XYZ, Cierres: *1* - Sin enlace"
        );
    }

    #[test]
    fn test_format_report_with_mentions() {
        let w = window((2026, 10, 15), (2026, 10, 15));
        let sections = vec![ClientSection {
            client: "ClientA".to_string(),
            rows: vec![AggregationRow::new("XYZ".into(), "".into(), NO_LINK.into(), 3, 1)],
        }];

        let message = format_report(
            ReportPeriod::Daily,
            Pipeline::Closed,
            &w,
            &sections,
            &["U1".to_string()],
        );

        assert_eq!(
            message,
            "*Resumen de cierres diario 10/15/2026:* <@U1>\n*ClientA:*\n  • XYZ, Cierres: *1* - Sin enlace\n\n"
        );
    }

    #[test]
    fn test_format_report_empty() {
        let w = window((2026, 9, 1), (2026, 9, 30));
        assert_eq!(
            format_report(ReportPeriod::Monthly, Pipeline::Closed, &w, &[], &[]),
            "*No hubo leads analizables entre el 09/01/2026 y el 09/30/2026 para ningún cliente.*"
        );
    }
}
