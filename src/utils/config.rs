//! Configuration and constants for the CLI.
//!
//! Constants describe the spreadsheet layout and the default stage sets.
//! [`AppConfig`] is the runtime configuration, loaded from a TOML file where
//! every section is optional.

use super::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout for spreadsheet and chat API requests
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Video ID used when the UTM tag carries no identifier
pub const NO_VIDEO_ID: &str = "Sin Matricula";

/// Link used when a Video ID has no registered URL
pub const NO_LINK: &str = "Sin enlace";

// Spreadsheet column names
pub const UTM_CONTENT_FIELD: &str = "UTM Content";
pub const STAGE_FIELD: &str = "Stage";
pub const CREATED_AT_FIELD: &str = "Created at (fecha)";
pub const APPOINTMENT_DAY_FIELD: &str = "Dia de cita";

// Link registry column names
pub const LINK_ID_COLUMN: &str = "ID";
pub const LINK_URL_COLUMN: &str = "Link";

pub const CLOSED_STAGES: &[&str] = &["CLOSED", "INSTALLED"];
pub const APPOINTMENT_STAGES: &[&str] = &[
    "CLOSED",
    "INSTALLED",
    "SHOWED (NOT CLOSED)",
    "SHOWED (NOT QUALIFIED)",
    "NO SHOW (RE-SCHEDULE)",
    "APPOINTMENT BOOKED",
    "APPOINTMENT CANCEL",
];

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";
pub const DEFAULT_SLACK_BASE_URL: &str = "https://slack.com/api";

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sheets: SheetsConfig,

    #[serde(default)]
    pub slack: SlackConfig,

    #[serde(default)]
    pub links: LinksConfig,

    #[serde(default)]
    pub stages: StagesConfig,
}

/// Lead spreadsheet access
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetsConfig {
    /// Spreadsheet holding one tab per client
    #[serde(default)]
    pub spreadsheet_id: String,

    /// OAuth bearer token (usually supplied through SHEETS_ACCESS_TOKEN)
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default = "default_sheets_base_url")]
    pub base_url: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            access_token: None,
            base_url: default_sheets_base_url(),
        }
    }
}

/// Chat notification settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlackConfig {
    /// Bot token (usually supplied through SLACK_TOKEN)
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_slack_base_url")]
    pub base_url: String,

    /// Channel receiving appointment reports
    #[serde(default = "default_appointments_channel")]
    pub appointments_channel: String,

    /// Channel receiving close reports
    #[serde(default = "default_closed_channel")]
    pub closed_channel: String,

    /// User ids mentioned in report headers
    #[serde(default)]
    pub mentions: Vec<String>,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: default_slack_base_url(),
            appointments_channel: default_appointments_channel(),
            closed_channel: default_closed_channel(),
            mentions: Vec::new(),
        }
    }
}

/// Video link registry location
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinksConfig {
    #[serde(default = "default_links_dir")]
    pub dir: PathBuf,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            dir: default_links_dir(),
        }
    }
}

/// Target stage sets for the two pipelines
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StagesConfig {
    #[serde(default = "default_closed_stages")]
    pub closed: Vec<String>,

    #[serde(default = "default_appointment_stages")]
    pub appointments: Vec<String>,
}

impl Default for StagesConfig {
    fn default() -> Self {
        Self {
            closed: default_closed_stages(),
            appointments: default_appointment_stages(),
        }
    }
}

fn default_sheets_base_url() -> String {
    DEFAULT_SHEETS_BASE_URL.to_string()
}

fn default_slack_base_url() -> String {
    DEFAULT_SLACK_BASE_URL.to_string()
}

fn default_appointments_channel() -> String {
    "#creativos-citas".to_string()
}

fn default_closed_channel() -> String {
    "#creativos-cierres".to_string()
}

fn default_links_dir() -> PathBuf {
    PathBuf::from("dataLinksVideos")
}

fn default_closed_stages() -> Vec<String> {
    CLOSED_STAGES.iter().map(|s| s.to_string()).collect()
}

fn default_appointment_stages() -> Vec<String> {
    APPOINTMENT_STAGES.iter().map(|s| s.to_string()).collect()
}

/// Load configuration from a TOML file
///
/// # Errors
/// * `ConfigError::IoError` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
///
/// # Example
/// ```ignore
/// let config = load_config("video-leads.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading config from: {}", path.display());
    let contents = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&contents)?;
    Ok(config)
}
