//! Wire types for the Google Sheets v4 REST API.
//!
//! Only the fields we read are modelled; everything else is ignored.

use serde::Deserialize;

/// Response of `spreadsheets.values.get`
#[derive(Debug, Deserialize)]
pub struct ValueRange {
    /// Absent when the range is empty
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

impl ValueRange {
    /// Cells as display strings
    pub fn into_grid(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}

/// Formatted values are strings already; anything else is rendered as JSON
fn cell_to_string(cell: serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Response of `spreadsheets.get` restricted to sheet properties
#[derive(Debug, Deserialize)]
pub struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SheetEntry {
    pub properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
pub struct SheetProperties {
    pub title: String,

    #[serde(default)]
    pub hidden: bool,
}

impl SpreadsheetMeta {
    /// Titles of the tabs that are not hidden, in sheet order
    pub fn visible_titles(self) -> Vec<String> {
        self.sheets
            .into_iter()
            .filter(|sheet| !sheet.properties.hidden)
            .map(|sheet| sheet.properties.title)
            .collect()
    }
}

/// Error envelope returned by Google APIs
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub message: String,
}
