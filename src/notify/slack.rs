//! HTTP client for Slack's `chat.postMessage`.

use super::delivery::Notifier;
use crate::utils::config::{SlackConfig, DEFAULT_HTTP_TIMEOUT};
use crate::utils::error::NotifyError;
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

/// Slack Web API response envelope
#[derive(Debug, Deserialize)]
struct SlackResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Blocking Slack bot client
pub struct SlackClient {
    client: Client,
    base_url: String,
    token: String,
}

impl SlackClient {
    /// Create a new client from config
    ///
    /// # Errors
    /// * `NotifyError::MissingCredentials` - no bot token configured
    /// * `NotifyError::RequestFailed` - HTTP client could not be built
    pub fn new(config: &SlackConfig) -> Result<Self, NotifyError> {
        let token = config
            .token
            .clone()
            .filter(|token| !token.is_empty())
            .ok_or(NotifyError::MissingCredentials)?;

        let client = Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(NotifyError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }
}

impl Notifier for SlackClient {
    fn post_message(&self, channel: &str, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/chat.postMessage", self.base_url);
        debug!("POST {} (channel {})", url, channel);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({
                "channel": channel,
                "text": text,
            }))
            .send()
            .map_err(NotifyError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(format!(
                "HTTP {}: {}",
                status,
                response.text().unwrap_or_default()
            )));
        }

        let body: SlackResponse = response.json().map_err(NotifyError::RequestFailed)?;
        check_response(body)
    }
}

/// Slack answers 200 with `ok: false` for application errors
fn check_response(body: SlackResponse) -> Result<(), NotifyError> {
    if body.ok {
        Ok(())
    } else {
        Err(NotifyError::Rejected(
            body.error.unwrap_or_else(|| "unknown_error".to_string()),
        ))
    }
}
