//! UTM Content tag parsing.
//!
//! A tag looks like `"ABC-12.3 | Summer promo"` or `"ABC123 Summer promo"`:
//! a video identifier made of `[A-Z0-9.-]` followed by an optional caption.
//!
//! Identifiers may start with a digit, but a caption that is not separated by
//! a pipe is rejected when it starts with one (`"XYZ 42 left"` has no
//! caption). Both rules are relied on by existing reports.

use crate::utils::config::NO_VIDEO_ID;
use regex::Regex;
use std::sync::OnceLock;

/// Video identifier and caption extracted from one tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtmTag {
    pub video_id: String,
    pub caption: String,
}

impl UtmTag {
    fn untagged() -> Self {
        Self {
            video_id: NO_VIDEO_ID.to_string(),
            caption: String::new(),
        }
    }
}

fn id_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?i-u:[A-Z0-9.-]+)").expect("valid regex"))
}

fn id_prefix_with_space() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?i-u:[A-Z0-9.-]+)\s*").expect("valid regex"))
}

fn leading_digit() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d").expect("valid regex"))
}

/// Parse a UTM Content cell
///
/// `None`, blank and whitespace-only values yield the no-identifier sentinel
/// with an empty caption.
pub fn parse_utm_content(value: Option<&str>) -> UtmTag {
    let tag = match value.map(str::trim) {
        Some(tag) if !tag.is_empty() => tag,
        _ => return UtmTag::untagged(),
    };

    let video_id = extract_video_id(tag).unwrap_or_else(|| NO_VIDEO_ID.to_string());

    UtmTag {
        video_id,
        caption: extract_caption(tag),
    }
}

/// Leading identifier run, uppercased
fn extract_video_id(tag: &str) -> Option<String> {
    id_prefix().find(tag).map(|m| m.as_str().to_uppercase())
}

fn extract_caption(tag: &str) -> String {
    if let Some((_, after)) = tag.split_once('|') {
        return after.trim().to_string();
    }

    match id_prefix_with_space().find(tag) {
        Some(m) => {
            let remainder = &tag[m.end()..];
            if leading_digit().is_match(remainder) {
                String::new()
            } else {
                remainder.trim().to_string()
            }
        }
        None => String::new(),
    }
}
