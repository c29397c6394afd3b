//! Video Lead Analytics CLI
//!
//! Reads client lead sheets, attributes leads to marketing videos and
//! reports appointments and closes per video.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::{Path, PathBuf};

use video_lead_analytics::aggregator::{Pipeline, PipelineStages};
use video_lead_analytics::commands::{
    analyze_pipeline, analyze_quality, client_rows, display_version, emit, execute_report,
    list_clients, send_alert, video_performance, DateArgs, ReportArgs,
};
use video_lead_analytics::links::load_video_links;
use video_lead_analytics::notify::{ConsoleNotifier, Notifier, SlackClient};
use video_lead_analytics::report::ReportPeriod;
use video_lead_analytics::sheets::SheetsClient;
use video_lead_analytics::utils::config::{load_config, AppConfig};

/// Config file picked up from the working directory when --config is absent
const DEFAULT_CONFIG_FILE: &str = "video-leads.toml";

/// Video Lead Analytics - lead attribution per marketing video
#[derive(Parser, Debug)]
#[command(name = "video-leads")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Options shared by every subcommand
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Spreadsheet API bearer token
    #[arg(long, global = true, env = "SHEETS_ACCESS_TOKEN", hide_env_values = true)]
    sheets_token: Option<String>,

    /// Spreadsheet holding the client tabs
    #[arg(long, global = true, env = "SPREADSHEET_ID")]
    spreadsheet_id: Option<String>,

    /// Slack bot token
    #[arg(long, global = true, env = "SLACK_TOKEN", hide_env_values = true)]
    slack_token: Option<String>,
}

/// Optional creation-day filter
#[derive(Args, Debug, Clone, Copy)]
struct RangeOpts {
    /// First day (YYYY-MM-DD); alone, selects only that day
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day (YYYY-MM-DD); alone, selects only that day
    #[arg(long)]
    end: Option<NaiveDate>,
}

impl From<RangeOpts> for DateArgs {
    fn from(opts: RangeOpts) -> Self {
        DateArgs {
            start: opts.start,
            end: opts.end,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// List client tabs
    Clients,

    /// Dump a client's raw rows
    Rows {
        client: String,

        /// Write JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Closes per video for one client
    Closed {
        client: String,

        #[command(flatten)]
        range: RangeOpts,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Appointments per video for one client
    Appointments {
        client: String,

        #[command(flatten)]
        range: RangeOpts,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Stage breakdown of one video for one client
    Quality {
        client: String,

        /// Video identifier to inspect
        #[arg(long)]
        video_id: String,

        #[command(flatten)]
        range: RangeOpts,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Video totals across all clients
    Performance {
        #[command(flatten)]
        range: RangeOpts,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Send a message to chat channels
    Alert {
        /// Target channel (repeatable)
        #[arg(long = "channel", required = true)]
        channels: Vec<String>,

        /// Message text
        #[arg(short, long)]
        message: String,

        /// Print instead of sending
        #[arg(long)]
        dry_run: bool,
    },

    /// Build and send the periodic appointment and close reports
    Report {
        /// daily, weekly or monthly
        period: ReportPeriod,

        /// Reference day (defaults to today); the period ends the day before
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print instead of sending
        #[arg(long)]
        dry_run: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let opts = &cli.global;

    match cli.command {
        Commands::Clients => {
            let config = resolve_config(opts)?;
            let clients = list_clients(&sheets_client(&config)?)?;
            emit(&clients, None)?;
        }

        Commands::Rows { client, output } => {
            let config = resolve_config(opts)?;
            let rows = client_rows(&sheets_client(&config)?, &client)?;
            emit(&rows, output.as_deref())?;
        }

        Commands::Closed { client, range, output } => {
            let config = resolve_config(opts)?;
            run_pipeline(&config, &client, Pipeline::Closed, range, output.as_deref())?;
        }

        Commands::Appointments { client, range, output } => {
            let config = resolve_config(opts)?;
            run_pipeline(&config, &client, Pipeline::Appointments, range, output.as_deref())?;
        }

        Commands::Quality {
            client,
            video_id,
            range,
            output,
        } => {
            let config = resolve_config(opts)?;
            let source = sheets_client(&config)?;
            let links = load_links(&config)?;
            let shares = analyze_quality(&source, &links, &client, &video_id, range.into())?;
            emit(&shares, output.as_deref())?;
        }

        Commands::Performance { range, output } => {
            let config = resolve_config(opts)?;
            let stages = PipelineStages::from_config(&config.stages);
            let source = sheets_client(&config)?;
            let links = load_links(&config)?;
            let report = video_performance(&source, &links, &stages, range.into())?;
            emit(&report, output.as_deref())?;
        }

        Commands::Alert {
            channels,
            message,
            dry_run,
        } => {
            let config = resolve_config(opts)?;
            let notifier = notifier(&config, dry_run)?;
            let deliveries = send_alert(notifier.as_ref(), &channels, &message);
            emit(&deliveries, None)?;
        }

        Commands::Report {
            period,
            today,
            dry_run,
        } => {
            let config = resolve_config(opts)?;
            let stages = PipelineStages::from_config(&config.stages);
            let source = sheets_client(&config)?;
            let links = load_links(&config)?;
            let notifier = notifier(&config, dry_run)?;
            let args = ReportArgs {
                period,
                today: today.unwrap_or_else(|| chrono::Local::now().date_naive()),
            };

            let outcomes =
                execute_report(&source, notifier.as_ref(), &links, &config.slack, &stages, &args)?;

            for outcome in &outcomes {
                let delivered = outcome.deliveries.iter().all(|d| d.success);
                println!(
                    "{} {}: {} clients with matches, {} skipped, delivered: {}",
                    outcome.report.period,
                    outcome.report.pipeline.label(),
                    outcome.report.sections.len(),
                    outcome.report.failed_clients.len(),
                    if delivered { "yes" } else { "no" }
                );
            }
        }

        Commands::Version => display_version(),
    }

    Ok(())
}

/// Load the config file and apply CLI/env overrides
///
/// **Private** - internal helper for main
fn resolve_config(opts: &GlobalOpts) -> Result<AppConfig> {
    let mut config = match &opts.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(DEFAULT_CONFIG_FILE)
            .with_context(|| format!("Failed to load config {}", DEFAULT_CONFIG_FILE))?,
        None => AppConfig::default(),
    };

    if let Some(token) = &opts.sheets_token {
        config.sheets.access_token = Some(token.clone());
    }
    if let Some(id) = &opts.spreadsheet_id {
        config.sheets.spreadsheet_id = id.clone();
    }
    if let Some(token) = &opts.slack_token {
        config.slack.token = Some(token.clone());
    }

    Ok(config)
}

fn sheets_client(config: &AppConfig) -> Result<SheetsClient> {
    if config.sheets.spreadsheet_id.is_empty() {
        anyhow::bail!("No spreadsheet configured (set sheets.spreadsheet_id or SPREADSHEET_ID)");
    }
    SheetsClient::new(&config.sheets).context("Failed to create spreadsheet client")
}

fn load_links(config: &AppConfig) -> Result<video_lead_analytics::links::VideoLinkMap> {
    load_video_links(&config.links.dir).context("Failed to load video links")
}

fn notifier(config: &AppConfig, dry_run: bool) -> Result<Box<dyn Notifier>> {
    if dry_run {
        return Ok(Box::new(ConsoleNotifier));
    }
    let client = SlackClient::new(&config.slack).context("Failed to create Slack client")?;
    Ok(Box::new(client))
}

fn run_pipeline(
    config: &AppConfig,
    client: &str,
    pipeline: Pipeline,
    range: RangeOpts,
    output: Option<&Path>,
) -> Result<()> {
    let source = sheets_client(config)?;
    let links = load_links(config)?;
    let stages = PipelineStages::from_config(&config.stages);
    let rows = analyze_pipeline(&source, &links, client, pipeline, &stages, range.into())?;
    emit(&rows, output)
}
