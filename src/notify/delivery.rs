//! Fan-out of one message to several chat channels.

use crate::utils::error::NotifyError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Anything that can post a text message to a channel
pub trait Notifier {
    fn post_message(&self, channel: &str, text: &str) -> Result<(), NotifyError>;
}

/// Outcome of delivering a message to one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub channel: String,
    pub message: String,
    pub success: bool,
}

/// Send `message` to every channel
///
/// Duplicate channels are sent once, in first-seen order. Each delivery is
/// independent: a failure is logged and recorded, never returned.
pub fn send_notifications<N: Notifier + ?Sized>(
    notifier: &N,
    channels: &[String],
    message: &str,
) -> Vec<DeliveryRecord> {
    let mut seen = HashSet::new();

    channels
        .iter()
        .filter(|channel| seen.insert(channel.as_str()))
        .map(|channel| {
            let success = match notifier.post_message(channel, message) {
                Ok(()) => {
                    info!("Message delivered to {}", channel);
                    true
                }
                Err(e) => {
                    warn!("Delivery to {} failed: {}", channel, e);
                    false
                }
            };

            DeliveryRecord {
                channel: channel.clone(),
                message: message.to_string(),
                success,
            }
        })
        .collect()
}
