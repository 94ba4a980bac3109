//! Notification module for replykit
//!
//! Transient one-line messages shown in the status bar at the bottom of
//! the console. Any part of the app can post one; it clears itself once
//! its display time has passed.

mod render;
mod state;

pub use render::render_notification;
pub use state::{Notification, NotificationKind, NotificationState};
