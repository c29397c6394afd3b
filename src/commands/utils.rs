use crate::output::{to_json_string, write_json};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Print a result as JSON, or write it to `output` when given
pub fn emit<T: Serialize + ?Sized>(value: &T, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            write_json(value, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Results written to: {}", path.display());
        }
        None => {
            println!("{}", to_json_string(value).context("Failed to serialize results")?);
        }
    }
    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Video Lead Analytics v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Per-video lead, appointment and close analytics from lead-tracking spreadsheets.");
}
