//! Notifier that prints instead of posting, for dry runs.

use super::delivery::Notifier;
use crate::utils::error::NotifyError;

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn post_message(&self, channel: &str, text: &str) -> Result<(), NotifyError> {
        println!("── {} ──", channel);
        println!("{}", text);
        Ok(())
    }
}
