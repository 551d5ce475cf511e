//! Transient user notifications ("toasts").

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// The operation succeeded.
    Success,
    /// The operation failed or was refused.
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A short message shown to the user for a fixed time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Whether the notification reports a success or an error.
    pub level: NotificationLevel,
    /// The text shown to the user.
    pub message: String,
    /// How long the notification stays visible.
    pub duration: Duration,
}

impl Notification {
    /// Creates a success notification.
    pub fn success(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            duration,
        }
    }

    /// Creates an error notification.
    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            duration,
        }
    }

    /// Returns `true` if this is an error notification.
    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Displays notifications to the user.
pub trait Notifier: Send + Sync {
    /// Shows `notification` to the user.
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the tracing log. Used when no UI is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let duration_ms = u64::try_from(notification.duration.as_millis()).unwrap_or(u64::MAX);
        match notification.level {
            NotificationLevel::Success => {
                tracing::info!(duration_ms, "{}", notification.message);
            }
            NotificationLevel::Error => {
                tracing::warn!(duration_ms, "{}", notification.message);
            }
        }
    }
}
