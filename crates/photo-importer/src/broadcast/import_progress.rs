//! Import progress broadcaster for real-time batch status streaming.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Phase of a batch or of one file within it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImportPhase {
    Started,
    Processing,
    Copied,
    Converted,
    Failed,
    Completed,
}

impl std::fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportPhase::Started => write!(f, "Started"),
            ImportPhase::Processing => write!(f, "Processing"),
            ImportPhase::Copied => write!(f, "Copied"),
            ImportPhase::Converted => write!(f, "Converted"),
            ImportPhase::Failed => write!(f, "Failed"),
            ImportPhase::Completed => write!(f, "Completed"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportProgressEvent {
    /// Identifier shared by every event of one batch.
    pub batch_id: String,
    pub phase: ImportPhase,
    /// Zero-based position of the file in the batch (per-file events only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImportProgressEvent {
    pub fn new(batch_id: &str, phase: ImportPhase, total: usize, message: &str) -> Self {
        Self {
            batch_id: batch_id.to_string(),
            phase,
            index: None,
            total,
            filename: None,
            message: message.to_string(),
            timestamp: Utc::now(),
            destination_path: None,
            error: None,
        }
    }

    pub fn with_file(mut self, index: usize, filename: &str) -> Self {
        self.index = Some(index);
        self.filename = Some(filename.to_string());
        self
    }

    pub fn with_destination(mut self, destination: &str) -> Self {
        self.destination_path = Some(destination.to_string());
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }
}

#[derive(Clone)]
pub struct ImportProgressBroadcaster {
    sender: broadcast::Sender<ImportProgressEvent>,
}

impl ImportProgressBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn send(&self, event: ImportProgressEvent) {
        // No active receivers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ImportProgressEvent> {
        self.sender.subscribe()
    }
}

impl Default for ImportProgressBroadcaster {
    fn default() -> Self {
        Self::new(256)
    }
}
