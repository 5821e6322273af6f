use std::path::PathBuf;

use serde::Serialize;

use crate::error::{ImportError, ImportStage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportOutcome {
    Copied,
    Converted,
    Failed { stage: ImportStage, reason: String },
}

/// Outcome of importing a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub source_path: PathBuf,
    /// Where the file was written. Also set on a failed delete, since the
    /// copy or conversion had already landed.
    pub destination_path: Option<PathBuf>,
    pub outcome: ImportOutcome,
    /// Whether the original was removed from the source volume.
    pub deleted: bool,
}

impl ImportResult {
    pub fn copied(source: PathBuf, destination: PathBuf, deleted: bool) -> Self {
        Self {
            source_path: source,
            destination_path: Some(destination),
            outcome: ImportOutcome::Copied,
            deleted,
        }
    }

    pub fn converted(source: PathBuf, destination: PathBuf, deleted: bool) -> Self {
        Self {
            source_path: source,
            destination_path: Some(destination),
            outcome: ImportOutcome::Converted,
            deleted,
        }
    }

    pub fn failed(error: &ImportError) -> Self {
        Self {
            source_path: error.path.clone(),
            destination_path: error.destination.clone(),
            outcome: ImportOutcome::Failed {
                stage: error.stage,
                reason: error.source.to_string(),
            },
            deleted: false,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, ImportOutcome::Failed { .. })
    }
}

/// Result of a fail-fast batch.
///
/// `results` holds one entry per completed file, in input order. When
/// `error` is set, the failing file is the one after the last result and
/// nothing after it was attempted.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<ImportResult>,
    pub error: Option<ImportError>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Number of files the batch touched, including the failing one.
    pub fn attempted(&self) -> usize {
        self.results.len() + usize::from(self.error.is_some())
    }

    pub fn into_result(self) -> Result<Vec<ImportResult>, ImportError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.results),
        }
    }
}
