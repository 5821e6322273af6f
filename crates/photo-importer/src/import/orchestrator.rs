use std::path::PathBuf;

use tracing::{error, info, info_span};

use crate::config::ImportPolicy;
use crate::error::{ImportError, ScanError};
use crate::sanitize;
use crate::scanner::MediaScanner;

use super::dispatcher::ConversionDispatcher;
use super::progress::{NoopProgress, ProgressEvent, ProgressReporter};
use super::result::{BatchReport, ImportResult};

/// Runs a batch through the dispatcher one file at a time, in input order.
///
/// Fail-fast: the first file that fails ends the batch and nothing after it
/// is attempted. Files are never processed concurrently, so the stopping
/// point is deterministic.
pub struct ImportOrchestrator {
    dispatcher: ConversionDispatcher,
}

impl ImportOrchestrator {
    pub fn new(dispatcher: ConversionDispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &ConversionDispatcher {
        &self.dispatcher
    }

    pub fn import_batch(
        &self,
        files: &[PathBuf],
        policy: &ImportPolicy,
        progress: &dyn ProgressReporter,
    ) -> BatchReport {
        let _batch_span = info_span!("import_batch",
            total = files.len(),
            subfolder_mode = ?policy.subfolder_mode,
        )
        .entered();

        progress.report(ProgressEvent::BatchStarted { total: files.len() });
        info!(
            "Importing {} files into {}",
            files.len(),
            policy.destination_root.display()
        );

        let mut report = BatchReport::default();

        for (index, path) in files.iter().enumerate() {
            progress.report(ProgressEvent::FileStarted {
                index,
                filename: sanitize::redact_path(path),
            });

            match self.dispatcher.try_process(path, policy) {
                Ok(result) => {
                    progress.report(ProgressEvent::FileFinished {
                        index,
                        result: result.clone(),
                    });
                    report.results.push(result);
                }
                Err(err) => {
                    error!("{}", err);
                    progress.report(ProgressEvent::FileFinished {
                        index,
                        result: ImportResult::failed(&err),
                    });
                    progress.report(ProgressEvent::BatchFailed {
                        index,
                        error: err.to_string(),
                    });
                    let skipped = files.len() - index - 1;
                    if skipped > 0 {
                        info!("Batch stopped, {} files not attempted", skipped);
                    }
                    report.error = Some(err);
                    return report;
                }
            }
        }

        progress.report(ProgressEvent::BatchCompleted {
            imported: report.results.len(),
        });
        info!("Imported {} files", report.results.len());
        report
    }

    /// Scans the policy's source volume and imports everything found, in
    /// scan order.
    pub fn import_source(
        &self,
        policy: &ImportPolicy,
        progress: &dyn ProgressReporter,
    ) -> Result<BatchReport, ScanError> {
        let Some(root) = policy.source_root.as_deref() else {
            info!("No source volume configured, nothing to import");
            return Ok(BatchReport::default());
        };

        let files: Vec<PathBuf> = MediaScanner::new(root)
            .scan()?
            .into_iter()
            .map(|entry| entry.path)
            .collect();

        Ok(self.import_batch(&files, policy, progress))
    }

    /// Convenience wrapper returning the first failure as an error.
    pub fn import_files(
        &self,
        files: &[PathBuf],
        policy: &ImportPolicy,
    ) -> Result<Vec<ImportResult>, ImportError> {
        self.import_batch(files, policy, &NoopProgress).into_result()
    }
}
