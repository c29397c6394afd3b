//! Load the Video ID -> URL registry from CSV exports.
//!
//! Each `*.csv` file in the registry directory has `ID` and `Link` columns.
//! Files are read in name order and later files overwrite earlier ones.

use crate::utils::config::{LINK_ID_COLUMN, LINK_URL_COLUMN};
use crate::utils::error::LinkError;
use csv::ReaderBuilder;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Video ID -> canonical URL
pub type VideoLinkMap = HashMap<String, String>;

/// Load every link file found in `dir`
///
/// **Public** - main entry point for the registry
///
/// A missing directory yields an empty map; every lead then resolves to the
/// no-link sentinel.
///
/// # Errors
/// * `LinkError::IoError` - directory or file cannot be read
/// * `LinkError::Csv` - a file is not valid CSV
pub fn load_video_links(dir: impl AsRef<Path>) -> Result<VideoLinkMap, LinkError> {
    let dir = dir.as_ref();
    let mut links = VideoLinkMap::new();

    if !dir.is_dir() {
        warn!("Video link directory not found: {}", dir.display());
        return Ok(links);
    }

    for path in csv_files(dir)? {
        let file = fs::File::open(&path)?;
        let added = merge_links(file, &mut links).map_err(|source| LinkError::Csv {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Loaded {} links from {}", added, path.display());
    }

    info!("Video link registry: {} entries", links.len());
    Ok(links)
}

/// `*.csv` files in `dir`, sorted by file name
fn csv_files(dir: &Path) -> Result<Vec<PathBuf>, LinkError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path.extension().map(|ext| ext == "csv").unwrap_or(false);
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Merge one CSV document into `links`, returning the number of entries read
///
/// Rows with a blank ID or a blank link are skipped, so a blank link never
/// clears a link registered by an earlier file.
pub fn merge_links<R: Read>(reader: R, links: &mut VideoLinkMap) -> Result<usize, csv::Error> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let id_idx = headers.iter().position(|h| h.trim() == LINK_ID_COLUMN);
    let url_idx = headers.iter().position(|h| h.trim() == LINK_URL_COLUMN);

    let (id_idx, url_idx) = match (id_idx, url_idx) {
        (Some(id), Some(url)) => (id, url),
        _ => {
            warn!("Link file lacks '{}'/'{}' columns, skipping", LINK_ID_COLUMN, LINK_URL_COLUMN);
            return Ok(0);
        }
    };

    let mut added = 0;
    for record in rdr.records() {
        let record = record?;
        let video_id = record.get(id_idx).unwrap_or("").trim();
        let link = record.get(url_idx).unwrap_or("").trim();

        if video_id.is_empty() || link.is_empty() {
            continue;
        }

        links.insert(video_id.to_string(), link.to_string());
        added += 1;
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_links_skips_blanks() {
        let data = "ID,Link,Notes\nA1, https://v/a1 ,x\n,https://v/none,\nB2,,\n C3 ,https://v/c3\n";
        let mut links = VideoLinkMap::new();

        let added = merge_links(data.as_bytes(), &mut links).unwrap();

        assert_eq!(added, 2);
        assert_eq!(links.get("A1").map(String::as_str), Some("https://v/a1"));
        assert_eq!(links.get("C3").map(String::as_str), Some("https://v/c3"));
        assert!(!links.contains_key("B2"));
    }

    #[test]
    fn test_merge_links_without_columns() {
        let mut links = VideoLinkMap::new();
        let added = merge_links("Name,Url\nA,b\n".as_bytes(), &mut links).unwrap();
        assert_eq!(added, 0);
        assert!(links.is_empty());
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let links = load_video_links("/nonexistent/links/dir").unwrap();
        assert!(links.is_empty());
    }
}
