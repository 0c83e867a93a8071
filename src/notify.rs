//! User-facing notifications.
//!
//! Operations never notify on their own; callers turn results into a single
//! message through a [`Notifier`] they pass in.

use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;

use crate::bulk::BulkOperationResult;

/// Severity of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Maps an alert level to the CSS class used by the dashboard.
pub fn alert_level_to_str(level: &AlertLevel) -> &'static str {
    match level {
        AlertLevel::Error => "danger",
        AlertLevel::Warning => "warning",
        AlertLevel::Success => "success",
        AlertLevel::Info => "info",
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: AlertLevel,
    /// CSS class for `level`, so clients need no mapping of their own.
    pub class: &'static str,
    pub message: String,
}

impl Notification {
    pub fn new(level: AlertLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            class: alert_level_to_str(&level),
            message: message.into(),
        }
    }
}

/// Sink for messages shown to the user.
pub trait Notifier {
    fn notify_success(&mut self, message: &str);
    fn notify_error(&mut self, error: &dyn Display, context: &str);
}

/// Collects notifications so they can be returned with a response.
#[derive(Debug, Default)]
pub struct NotificationBuffer {
    notifications: Vec<Notification>,
}

impl NotificationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn into_inner(self) -> Vec<Notification> {
        self.notifications
    }
}

impl Notifier for NotificationBuffer {
    fn notify_success(&mut self, message: &str) {
        self.notifications
            .push(Notification::new(AlertLevel::Success, message));
    }

    fn notify_error(&mut self, error: &dyn Display, context: &str) {
        self.notifications
            .push(Notification::new(AlertLevel::Error, format!("{context}: {error}")));
    }
}

/// Writes notifications to the application log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_success(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn notify_error(&mut self, error: &dyn Display, context: &str) {
        log::error!("{context}: {error}");
    }
}

/// Summary error for a bulk run that did not fully succeed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BulkOutcomeError {
    #[error("{succeeded} succeeded, {failed} failed (ids: {failed_ids})")]
    PartialFailure {
        succeeded: usize,
        failed: usize,
        failed_ids: String,
    },
    #[error("cancelled after {processed} items ({failed} failed)")]
    Cancelled { processed: usize, failed: usize },
}

impl BulkOutcomeError {
    fn from_result<Id: Display>(result: &BulkOperationResult<Id>) -> Option<Self> {
        if result.cancelled {
            return Some(Self::Cancelled {
                processed: result.total(),
                failed: result.failure_count,
            });
        }
        if result.failure_count == 0 {
            return None;
        }
        let failed_ids = result
            .failed_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Some(Self::PartialFailure {
            succeeded: result.success_count,
            failed: result.failure_count,
            failed_ids,
        })
    }
}

/// Emits exactly one notification summarizing `result`.
///
/// `action` names what was done, e.g. `"Deleted leads"`.
pub fn report_bulk_outcome<Id, N>(result: &BulkOperationResult<Id>, notifier: &mut N, action: &str)
where
    Id: Display,
    N: Notifier + ?Sized,
{
    match BulkOutcomeError::from_result(result) {
        None => notifier.notify_success(&format!("{action}: {}", result.success_count)),
        Some(err) => notifier.notify_error(&err, action),
    }
}
