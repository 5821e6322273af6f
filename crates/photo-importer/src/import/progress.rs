use std::sync::atomic::{AtomicUsize, Ordering};

use crate::broadcast::{ImportPhase, ImportProgressBroadcaster, ImportProgressEvent};
use crate::sanitize;

use super::result::{ImportOutcome, ImportResult};

/// Events emitted by the orchestrator while a batch runs. Purely
/// informational; reporting never changes control flow.
pub enum ProgressEvent {
    BatchStarted {
        total: usize,
    },
    FileStarted {
        index: usize,
        filename: String,
    },
    FileFinished {
        index: usize,
        result: ImportResult,
    },
    BatchCompleted {
        imported: usize,
    },
    BatchFailed {
        index: usize,
        error: String,
    },
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// No-op reporter for unit tests and headless runs.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Bridges orchestrator events to the import progress broadcast channel.
pub struct BroadcastProgress {
    batch_id: String,
    total: AtomicUsize,
    broadcaster: ImportProgressBroadcaster,
}

impl BroadcastProgress {
    pub fn new(broadcaster: ImportProgressBroadcaster) -> Self {
        Self::with_batch_id(&uuid::Uuid::new_v4().to_string(), broadcaster)
    }

    pub fn with_batch_id(batch_id: &str, broadcaster: ImportProgressBroadcaster) -> Self {
        Self {
            batch_id: batch_id.to_string(),
            total: AtomicUsize::new(0),
            broadcaster,
        }
    }

    pub fn batch_id(&self) -> &str {
        &self.batch_id
    }

    fn event(&self, phase: ImportPhase, message: &str) -> ImportProgressEvent {
        ImportProgressEvent::new(
            &self.batch_id,
            phase,
            self.total.load(Ordering::Relaxed),
            message,
        )
    }
}

impl ProgressReporter for BroadcastProgress {
    fn report(&self, event: ProgressEvent) {
        let event = match event {
            ProgressEvent::BatchStarted { total } => {
                self.total.store(total, Ordering::Relaxed);
                self.event(ImportPhase::Started, &format!("Importing {} files", total))
            }
            ProgressEvent::FileStarted { index, filename } => self
                .event(ImportPhase::Processing, "Importing file")
                .with_file(index, &filename),
            ProgressEvent::FileFinished { index, result } => {
                let filename = sanitize::redact_path(&result.source_path);
                let (phase, message) = match &result.outcome {
                    ImportOutcome::Copied => (ImportPhase::Copied, "Copied".to_string()),
                    ImportOutcome::Converted => (ImportPhase::Converted, "Converted".to_string()),
                    ImportOutcome::Failed { stage, .. } => {
                        (ImportPhase::Failed, format!("{} failed", stage))
                    }
                };
                let mut event = self.event(phase, &message).with_file(index, &filename);
                if let Some(destination) = &result.destination_path {
                    event = event.with_destination(&destination.display().to_string());
                }
                if let ImportOutcome::Failed { reason, .. } = &result.outcome {
                    event = event.with_error(reason);
                }
                event
            }
            ProgressEvent::BatchCompleted { imported } => self.event(
                ImportPhase::Completed,
                &format!("Imported {} files", imported),
            ),
            ProgressEvent::BatchFailed { index, error } => {
                let mut event = self
                    .event(ImportPhase::Failed, "Import stopped")
                    .with_error(&error);
                event.index = Some(index);
                event
            }
        };

        self.broadcaster.send(event);
    }
}
