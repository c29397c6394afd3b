//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while talking to the lead spreadsheet
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid spreadsheet response: {0}")]
    InvalidResponse(String),

    #[error("Invalid spreadsheet URL: {0}")]
    InvalidUrl(String),

    #[error("No access token configured for the spreadsheet API")]
    MissingCredentials,
}

/// Errors raised while validating raw rows into lead records
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Failure of one client's fetch-and-analyze sequence
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] SourceError),

    #[error("invalid rows: {0}")]
    Record(#[from] RecordError),
}

/// Errors that can occur while loading the video link registry
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed link file {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Errors that can occur while delivering a chat notification
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Message rejected by chat API: {0}")]
    Rejected(String),

    #[error("No chat token configured")]
    MissingCredentials,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading the config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),
}
