//! Notification module for smartnotes
//!
//! A single transient message with a severity. Showing a new one replaces
//! the old one; it disappears on its own after a timeout.

mod render;
mod state;

pub use render::render_notification;
pub use state::{Notification, NotificationState, Severity};
