//! Video link registry.

pub mod registry;

pub use registry::{load_video_links, merge_links, VideoLinkMap};
