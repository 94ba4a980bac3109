use std::time::{Duration, Instant};

/// How long a notification stays up unless replaced
const DEFAULT_DURATION: Duration = Duration::from_secs(4);

/// Errors stay a little longer
const ERROR_DURATION: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub shown_at: Instant,
    pub duration: Duration,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.duration
    }
}

/// The notification currently on screen, if any
#[derive(Debug, Default)]
pub struct NotificationState {
    current: Option<Notification>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.post(message.into(), NotificationKind::Info, DEFAULT_DURATION);
    }

    pub fn show_warning(&mut self, message: impl Into<String>) {
        self.post(message.into(), NotificationKind::Warning, DEFAULT_DURATION);
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.post(message.into(), NotificationKind::Error, ERROR_DURATION);
    }

    fn post(&mut self, message: String, kind: NotificationKind, duration: Duration) {
        log::debug!("Notification ({:?}): {}", kind, message);
        self.current = Some(Notification {
            message,
            kind,
            shown_at: Instant::now(),
            duration,
        });
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn current_message(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.message.as_str())
    }

    /// Drop the notification once its time is up
    ///
    /// Returns true if one was cleared.
    pub fn clear_if_expired(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
