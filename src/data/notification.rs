//! Dashboard notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Only ever flips from false to true
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    /// Build an unread notification stamped now
    pub fn new(kind: NotificationType, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), kind, title, message, Utc::now())
    }

    pub fn with_id(
        id: Uuid,
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.to_string(),
            kind,
            title: title.into(),
            message: message.into(),
            timestamp,
            read: false,
        }
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}
