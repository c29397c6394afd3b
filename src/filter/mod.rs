//! Row filtering by lead creation day.

pub mod date;

pub use date::{filter_by_date, DateWindow};
