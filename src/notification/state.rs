use std::time::{Duration, Instant};

use crate::config::NotificationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    shown_at: Instant,
}

/// At most one visible notification
#[derive(Debug, Clone)]
pub struct NotificationState {
    current: Option<Notification>,
    timeout: Duration,
}

impl Default for NotificationState {
    fn default() -> Self {
        Self::new(NotificationConfig::default().timeout())
    }
}

impl NotificationState {
    pub fn new(timeout: Duration) -> Self {
        Self {
            current: None,
            timeout,
        }
    }

    /// Show a message, superseding whatever was visible
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        self.current = Some(Notification {
            message: message.into(),
            severity,
            shown_at: Instant::now(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, Severity::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.show(message, Severity::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, Severity::Error);
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// The visible notification, if it has not timed out yet
    pub fn current(&self) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|n| n.shown_at.elapsed() < self.timeout)
    }

    /// Forget a notification whose timeout has elapsed
    pub fn clear_expired(&mut self) {
        if self.current.is_some() && self.current().is_none() {
            self.current = None;
        }
    }
}
