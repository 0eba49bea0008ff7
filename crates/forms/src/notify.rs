//! Transient user notifications
//!
//! The submission engine reports outcomes through a `Notifier` rather
//! than a concrete toast widget, so the engine stays independent of the
//! presentation layer.

use std::sync::Mutex;

use tracing::{error, info};

// ============================================================================
// Notifier
// ============================================================================

/// Sink for transient success/error notifications
pub trait Notifier {
    /// Surface a success notification
    fn success(&self, message: &str);

    /// Surface an error notification
    fn error(&self, message: &str);
}

// ============================================================================
// TracingNotifier
// ============================================================================

/// Notifier that emits structured log events; the default sink when no
/// UI toast system is wired up
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(notification = "success", "{message}");
    }

    fn error(&self, message: &str) {
        error!(notification = "error", "{message}");
    }
}

// ============================================================================
// RecordingNotifier
// ============================================================================

/// Kind of a recorded notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A recorded notification
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Notifier that collects messages in memory, for assertions in tests
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded notifications, in order
    pub fn recorded(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("notifier lock poisoned")
            .clone()
    }

    /// Messages of recorded success notifications
    pub fn successes(&self) -> Vec<String> {
        self.of_kind(NotificationKind::Success)
    }

    /// Messages of recorded error notifications
    pub fn errors(&self) -> Vec<String> {
        self.of_kind(NotificationKind::Error)
    }

    fn of_kind(&self, kind: NotificationKind) -> Vec<String> {
        self.recorded()
            .into_iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.message)
            .collect()
    }

    fn push(&self, kind: NotificationKind, message: &str) {
        self.notifications
            .lock()
            .expect("notifier lock poisoned")
            .push(Notification {
                kind,
                message: message.to_string(),
            });
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.push(NotificationKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(NotificationKind::Error, message);
    }
}

// ============================================================================
// Tests
// ============================================================================
