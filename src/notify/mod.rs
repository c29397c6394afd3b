//! Chat notifications.
//!
//! [`send_notifications`] fans a message out over any [`Notifier`];
//! [`SlackClient`] is the production implementation and [`ConsoleNotifier`]
//! prints messages for dry runs.

pub mod console;
pub mod delivery;
pub mod slack;

pub use console::ConsoleNotifier;
pub use delivery::{send_notifications, DeliveryRecord, Notifier};
pub use slack::SlackClient;
