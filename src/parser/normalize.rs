//! Record normalization: derive video fields for each lead.

use super::schema::{LeadRecord, NormalizedRecord};
use super::utm::parse_utm_content;
use crate::links::VideoLinkMap;
use crate::utils::config::NO_LINK;
use log::debug;

/// Normalize lead records against a video link map
///
/// **Public** - main entry point for normalization
///
/// UTM Content and Stage are trimmed and uppercased; Video ID and caption
/// come from the tag; the link is looked up by Video ID.
pub fn normalize(records: &[LeadRecord], links: &VideoLinkMap) -> Vec<NormalizedRecord> {
    debug!("Normalizing {} lead records", records.len());

    records
        .iter()
        .map(|record| normalize_record(record, links))
        .collect()
}

fn normalize_record(record: &LeadRecord, links: &VideoLinkMap) -> NormalizedRecord {
    let tag = parse_utm_content(record.utm_content.as_deref());
    let link = links
        .get(&tag.video_id)
        .cloned()
        .unwrap_or_else(|| NO_LINK.to_string());

    NormalizedRecord {
        utm_content: record
            .utm_content
            .as_deref()
            .map(|utm| utm.trim().to_uppercase())
            .unwrap_or_default(),
        stage: record.stage.trim().to_uppercase(),
        created_at: record.created_at,
        appointment_day: record.appointment_day,
        video_id: tag.video_id,
        caption: tag.caption,
        link,
    }
}
