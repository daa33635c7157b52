use serde::Serialize;
use tracing::{info, warn};

/// Severity hint for the notification surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    Info,
    Error,
}

/// A user-visible message handed off to the notification surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Error,
            message: message.into(),
        }
    }
}

/// Outbound hook for the toast/notification surface. The guard publishes
/// denial notices here; rendering them is the surface's concern.
pub trait NoticePublisher: Send + Sync {
    fn publish(&self, notice: Notice);
}

/// Default publisher that records notices on the service log.
#[derive(Debug, Default, Clone)]
pub struct TracingNoticePublisher;

impl NoticePublisher for TracingNoticePublisher {
    fn publish(&self, notice: Notice) {
        match notice.severity {
            NoticeSeverity::Error => warn!(message = %notice.message, "user notice"),
            NoticeSeverity::Info => info!(message = %notice.message, "user notice"),
        }
    }
}
