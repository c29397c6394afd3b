mod common;

use common::{day, lead, MemorySource};
use pretty_assertions::assert_eq;
use video_lead_analytics::aggregator::{Pipeline, PipelineStages, VideoTotals};
use video_lead_analytics::commands::{
    analyze_pipeline, analyze_quality, list_clients, video_performance, DateArgs,
};
use video_lead_analytics::links::VideoLinkMap;
use video_lead_analytics::utils::config::{NO_LINK, NO_VIDEO_ID};

const PROMO_LINK: &str = "https://videos.example/abc";

fn links() -> VideoLinkMap {
    let mut links = VideoLinkMap::new();
    links.insert("ABC123".to_string(), PROMO_LINK.to_string());
    links
}

fn acme() -> MemorySource {
    MemorySource::new().with_client(
        "Acme",
        vec![
            lead("ABC123|Summer Promo", "closed", "2024-03-05 10:00:00"),
            lead("abc123|Summer Promo", "Appointment Booked", "2024-03-06"),
            lead("ABC123|Summer Promo", "new lead", "2024-03-07"),
            lead("", "CLOSED", "2024-03-07"),
            lead("nan", "new", "not a date"),
        ],
    )
}

#[test]
fn test_closed_metrics_per_video() {
    let rows = analyze_pipeline(
        &acme(),
        &links(),
        "Acme",
        Pipeline::Closed,
        &PipelineStages::default(),
        DateArgs::default(),
    )
    .unwrap();

    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].video_id, "ABC123");
    assert_eq!(rows[0].caption, "Summer Promo");
    assert_eq!(rows[0].link, PROMO_LINK);
    assert_eq!(rows[0].leads, 3);
    assert_eq!(rows[0].matched, 1);
    assert_eq!(rows[0].ratio, 3.0);
    assert!((rows[0].rate - 100.0 / 3.0).abs() < 1e-9);

    assert_eq!(rows[1].video_id, NO_VIDEO_ID);
    assert_eq!(rows[1].caption, "");
    assert_eq!(rows[1].link, NO_LINK);
    assert_eq!(rows[1].leads, 2);
    assert_eq!(rows[1].matched, 1);
    assert_eq!(rows[1].ratio, 2.0);
    assert_eq!(rows[1].rate, 50.0);
}

#[test]
fn test_every_lead_lands_in_one_group() {
    for pipeline in [Pipeline::Closed, Pipeline::Appointments] {
        let rows = analyze_pipeline(
            &acme(),
            &links(),
            "Acme",
            pipeline,
            &PipelineStages::default(),
            DateArgs::default(),
        )
        .unwrap();

        let total: u64 = rows.iter().map(|r| r.leads).sum();
        assert_eq!(total, 5);
        assert!(rows.iter().all(|r| r.matched <= r.leads));
        assert!(rows.windows(2).all(|w| w[0].matched >= w[1].matched));
    }
}

#[test]
fn test_appointments_include_closed_stages() {
    let rows = analyze_pipeline(
        &acme(),
        &links(),
        "Acme",
        Pipeline::Appointments,
        &PipelineStages::default(),
        DateArgs::default(),
    )
    .unwrap();

    assert_eq!(rows[0].video_id, "ABC123");
    assert_eq!(rows[0].matched, 2);
    assert_eq!(rows[0].ratio, 1.5);
}

#[test]
fn test_unmatched_group_has_zero_ratio_and_rate() {
    let source = MemorySource::new().with_client(
        "Quiet",
        vec![lead("V9 Teaser", "NEW", "2024-03-01"), lead("V9 Teaser", "NEW", "2024-03-02")],
    );

    let rows = analyze_pipeline(
        &source,
        &VideoLinkMap::new(),
        "Quiet",
        Pipeline::Closed,
        &PipelineStages::default(),
        DateArgs::default(),
    )
    .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].caption, "Teaser");
    assert_eq!(rows[0].matched, 0);
    assert_eq!(rows[0].ratio, 0.0);
    assert_eq!(rows[0].rate, 0.0);
}

#[test]
fn test_reversed_range_is_swapped() {
    let source = MemorySource::new().with_client(
        "Acme",
        vec![
            lead("V1", "CLOSED", "2024-03-01"),
            lead("V1", "NEW", "2024-03-02"),
            lead("V1", "NEW", "2024-03-03 18:30:00"),
        ],
    );
    let dates = DateArgs {
        start: Some(day(2024, 3, 3)),
        end: Some(day(2024, 3, 1)),
    };

    let rows = analyze_pipeline(
        &source,
        &VideoLinkMap::new(),
        "Acme",
        Pipeline::Closed,
        &PipelineStages::default(),
        dates,
    )
    .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].leads, 3);
    assert_eq!(rows[0].matched, 1);
}

#[test]
fn test_single_bound_selects_one_day() {
    let dates = DateArgs {
        start: Some(day(2024, 3, 7)),
        end: None,
    };

    let rows = analyze_pipeline(
        &acme(),
        &links(),
        "Acme",
        Pipeline::Closed,
        &PipelineStages::default(),
        dates,
    )
    .unwrap();

    // The unparseable timestamp never passes a bounded window
    let total: u64 = rows.iter().map(|r| r.leads).sum();
    assert_eq!(total, 2);
}

#[test]
fn test_missing_column_fails_the_client() {
    let mut row = lead("V1", "CLOSED", "2024-03-01");
    row.remove("Stage");
    let source = MemorySource::new().with_client("Broken", vec![row]);

    let result = analyze_pipeline(
        &source,
        &VideoLinkMap::new(),
        "Broken",
        Pipeline::Closed,
        &PipelineStages::default(),
        DateArgs::default(),
    );

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Stage"), "unexpected error: {}", message);
}

#[test]
fn test_quality_distribution_for_video() {
    let shares = analyze_quality(&acme(), &links(), "Acme", "ABC123", DateArgs::default()).unwrap();

    let stages: Vec<&str> = shares.iter().map(|s| s.stage.as_str()).collect();
    assert_eq!(stages, vec!["APPOINTMENT BOOKED", "CLOSED", "NEW LEAD"]);
    assert!(shares.iter().all(|s| s.leads == 1));

    let total: f64 = shares.iter().map(|s| s.percentage).sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn test_quality_distribution_unknown_video_is_empty() {
    let shares = analyze_quality(&acme(), &links(), "Acme", "NOPE", DateArgs::default()).unwrap();
    assert!(shares.is_empty());
}

#[test]
fn test_rollup_skips_failing_client() {
    let source = MemorySource::new()
        .with_client(
            "A",
            vec![
                lead("V1|Uno", "CLOSED", "2024-03-01"),
                lead("V1|Uno", "NEW", "2024-03-01"),
                lead("V2", "APPOINTMENT BOOKED", "2024-03-02"),
            ],
        )
        .with_failing_client("B")
        .with_client(
            "C",
            vec![lead("v1|Uno", "INSTALLED", "2024-03-04"), lead("V2", "NEW", "2024-03-04")],
        );

    assert_eq!(list_clients(&source).unwrap(), vec!["A", "B", "C"]);

    let report = video_performance(
        &source,
        &VideoLinkMap::new(),
        &PipelineStages::default(),
        DateArgs::default(),
    )
    .unwrap();

    assert_eq!(
        report.totals,
        vec![
            VideoTotals {
                video_id: "V1".to_string(),
                caption: "Uno".to_string(),
                leads: 3,
                appointments: 2,
                closes: 2,
            },
            VideoTotals {
                video_id: "V2".to_string(),
                caption: String::new(),
                leads: 2,
                appointments: 1,
                closes: 0,
            },
        ]
    );

    assert_eq!(report.failed_clients.len(), 1);
    assert_eq!(report.failed_clients[0].client, "B");
    assert!(report.failed_clients[0].error.contains("HTTP 500"));
}

#[test]
fn test_rollup_date_window_applies_to_every_client() {
    let source = MemorySource::new()
        .with_client("A", vec![lead("V1", "CLOSED", "2024-03-01")])
        .with_client("C", vec![lead("V1", "CLOSED", "2024-04-01")]);
    let dates = DateArgs {
        start: Some(day(2024, 3, 1)),
        end: Some(day(2024, 3, 31)),
    };

    let report =
        video_performance(&source, &VideoLinkMap::new(), &PipelineStages::default(), dates).unwrap();

    assert_eq!(report.totals.len(), 1);
    assert_eq!(report.totals[0].leads, 1);
    assert_eq!(report.totals[0].closes, 1);
    assert!(report.failed_clients.is_empty());
}

#[test]
fn test_rollup_skips_client_with_missing_column() {
    let mut broken = lead("V1", "CLOSED", "2024-03-02");
    broken.remove("Stage");

    let source = MemorySource::new()
        .with_client("A", vec![lead("V1", "CLOSED", "2024-03-01")])
        .with_client("B", vec![broken])
        .with_client("C", vec![lead("V1", "NEW", "2024-03-03")]);

    let report = video_performance(
        &source,
        &VideoLinkMap::new(),
        &PipelineStages::default(),
        DateArgs::default(),
    )
    .unwrap();

    assert_eq!(
        report.totals,
        vec![VideoTotals {
            video_id: "V1".to_string(),
            caption: String::new(),
            leads: 2,
            appointments: 1,
            closes: 1,
        }]
    );
    assert_eq!(report.failed_clients.len(), 1);
    assert_eq!(report.failed_clients[0].client, "B");
    assert!(report.failed_clients[0].error.contains("Stage"));
}
