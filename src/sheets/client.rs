//! HTTP client for the Google Sheets values API.
//!
//! One spreadsheet holds one tab per client. Authentication is out of scope:
//! the client takes a ready-made OAuth bearer token.

use super::source::{rows_from_values, LeadSource};
use super::types::{ApiErrorBody, SpreadsheetMeta, ValueRange};
use crate::parser::RawRow;
use crate::utils::config::{SheetsConfig, DEFAULT_HTTP_TIMEOUT};
use crate::utils::error::SourceError;
use log::{debug, info};
use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

/// Blocking client for one spreadsheet
pub struct SheetsClient {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    access_token: String,
}

impl SheetsClient {
    /// Create a new client from config
    ///
    /// # Errors
    /// * `SourceError::MissingCredentials` - no access token configured
    /// * `SourceError::RequestFailed` - HTTP client could not be built
    pub fn new(config: &SheetsConfig) -> Result<Self, SourceError> {
        let access_token = config
            .access_token
            .clone()
            .filter(|token| !token.is_empty())
            .ok_or(SourceError::MissingCredentials)?;

        let client = Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(SourceError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            access_token,
        })
    }

    /// URL of a resource under this spreadsheet, segments percent-encoded
    fn spreadsheet_url(&self, segments: &[&str]) -> Result<Url, SourceError> {
        build_url(&self.base_url, &self.spreadsheet_id, segments)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SourceError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .map_err(SourceError::RequestFailed)?;

        check_status(response)?
            .json()
            .map_err(SourceError::RequestFailed)
    }
}

impl LeadSource for SheetsClient {
    fn list_client_ids(&self) -> Result<Vec<String>, SourceError> {
        let mut url = self.spreadsheet_url(&[])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties(title,hidden)");

        let meta: SpreadsheetMeta = self.get_json(url)?;
        let titles = meta.visible_titles();
        info!("Found {} visible client tabs", titles.len());
        Ok(titles)
    }

    fn fetch_rows(&self, client_id: &str) -> Result<Vec<RawRow>, SourceError> {
        info!("Fetching rows for client: {}", client_id);

        let url = self.spreadsheet_url(&["values", client_id])?;
        let range: ValueRange = self.get_json(url)?;
        Ok(rows_from_values(range.into_grid()))
    }
}

fn build_url(base_url: &str, spreadsheet_id: &str, segments: &[&str]) -> Result<Url, SourceError> {
    let mut url =
        Url::parse(base_url).map_err(|e| SourceError::InvalidUrl(format!("{}: {}", base_url, e)))?;

    url.path_segments_mut()
        .map_err(|_| SourceError::InvalidUrl(base_url.to_string()))?
        .pop_if_empty()
        .push("spreadsheets")
        .push(spreadsheet_id)
        .extend(segments);

    Ok(url)
}

/// Map non-2xx responses to `InvalidResponse`, preferring the API's message
fn check_status(response: Response) -> Result<Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    Err(status_error(status, body))
}

/// Error for a non-2xx status, using the API's message when the body has one
fn status_error(status: StatusCode, body: String) -> SourceError {
    let detail = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body,
    };

    SourceError::InvalidResponse(format!("HTTP {}: {}", status, detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_tab_name() {
        let url = build_url(
            "https://sheets.googleapis.com/v4",
            "sheet-123",
            &["values", "Client A/B"],
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/Client%20A%2FB"
        );
    }

    #[test]
    fn test_build_url_trailing_slash_base() {
        let url = build_url("http://localhost:9000/v4/", "id", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/v4/spreadsheets/id");
    }

    #[test]
    fn test_build_url_invalid_base() {
        assert!(matches!(
            build_url("not a url", "id", &[]),
            Err(SourceError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_status_error_uses_api_message() {
        let body = r#"{"error": {"code": 404, "message": "Unable to parse range: Ghost", "status": "NOT_FOUND"}}"#;

        match status_error(StatusCode::NOT_FOUND, body.to_string()) {
            SourceError::InvalidResponse(detail) => {
                assert_eq!(detail, "HTTP 404 Not Found: Unable to parse range: Ghost")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_status_error_keeps_raw_body() {
        match status_error(StatusCode::BAD_GATEWAY, "upstream down".to_string()) {
            SourceError::InvalidResponse(detail) => {
                assert_eq!(detail, "HTTP 502 Bad Gateway: upstream down")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_new_requires_token() {
        let config = SheetsConfig::default();
        assert!(matches!(
            SheetsClient::new(&config),
            Err(SourceError::MissingCredentials)
        ));
    }
}
