//! ember-notify crate
//!
//! User-facing notices (toasts) for the launch pipeline.

pub mod center;
pub mod notice;

pub use center::NotificationCenter;
pub use notice::{Notice, NoticeLevel};
