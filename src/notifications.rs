//! Notifications
//!
//! Short, fire-and-forget messages shown to the shopper after cart actions.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    time::Duration,
};

use mockall::automock;

/// How long a notification stays visible unless the caller asks otherwise.
pub const DEFAULT_DISPLAY_DURATION: Duration = Duration::from_millis(3000);

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The action succeeded
    Success,

    /// The action failed
    Error,

    /// Informational
    Info,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        })
    }
}

/// Somewhere to send notifications.
///
/// Implementations must not fail or block the caller; there is no result to
/// report back.
#[automock]
pub trait NotificationSink {
    /// Display `message` for roughly `duration`.
    fn notify(&self, message: &str, severity: Severity, duration: Duration);
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl NotificationSink for SilentNotifier {
    fn notify(&self, _message: &str, _severity: Severity, _duration: Duration) {}
}

/// Emits notifications as log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity, duration: Duration) {
        let duration_ms = duration.as_millis();

        match severity {
            Severity::Error => tracing::warn!(%severity, duration_ms, "{message}"),
            Severity::Success | Severity::Info => {
                tracing::info!(%severity, duration_ms, "{message}");
            }
        }
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for Box<T> {
    fn notify(&self, message: &str, severity: Severity, duration: Duration) {
        (**self).notify(message, severity, duration);
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for &T {
    fn notify(&self, message: &str, severity: Severity, duration: Duration) {
        (**self).notify(message, severity, duration);
    }
}
