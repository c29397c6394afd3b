//! The lead source seam.
//!
//! Analysis code talks to [`LeadSource`] rather than to a concrete API client,
//! so tests and alternative backends can feed rows directly.

use crate::parser::{records_from_rows, LeadRecord, RawRow};
use crate::utils::error::{ClientError, SourceError};
use log::debug;

/// Where client lead rows come from
pub trait LeadSource {
    /// Client identifiers in display order
    fn list_client_ids(&self) -> Result<Vec<String>, SourceError>;

    /// All rows for one client (empty if the client has none)
    fn fetch_rows(&self, client_id: &str) -> Result<Vec<RawRow>, SourceError>;
}

/// Fetch and validate one client's rows
pub fn fetch_records<S: LeadSource + ?Sized>(
    source: &S,
    client_id: &str,
) -> Result<Vec<LeadRecord>, ClientError> {
    let rows = source.fetch_rows(client_id)?;
    debug!("Client {}: fetched {} rows", client_id, rows.len());
    Ok(records_from_rows(&rows)?)
}

/// Turn a header-first value grid into rows
///
/// Short rows are right-padded with empty cells; cells beyond the header
/// width are dropped.
pub fn rows_from_values(values: Vec<Vec<String>>) -> Vec<RawRow> {
    let mut values = values.into_iter();
    let headers = match values.next() {
        Some(headers) => headers,
        None => return Vec::new(),
    };

    values
        .map(|cells| {
            let mut cells = cells.into_iter();
            headers
                .iter()
                .map(|header| (header.clone(), cells.next().unwrap_or_default()))
                .collect()
        })
        .collect()
}
