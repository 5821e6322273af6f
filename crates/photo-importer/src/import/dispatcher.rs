use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, info_span};

use crate::config::ImportPolicy;
use crate::destination::{destination_dir, resolve_subfolder};
use crate::error::{ImportError, ImportStage, StageFailure};
use crate::metadata::MetadataProbe;
use crate::sanitize;
use crate::scanner::MediaEntry;
use crate::tools::{ProcessRunner, ToolPaths};

use super::converter::conversion_args;
use super::result::ImportResult;

/// Imports a single file: resolve where it goes, then copy or convert it,
/// then optionally remove the original.
#[derive(Clone)]
pub struct ConversionDispatcher {
    runner: Arc<dyn ProcessRunner>,
    probe: MetadataProbe,
    dng_converter: PathBuf,
}

impl ConversionDispatcher {
    pub fn new(runner: Arc<dyn ProcessRunner>, tools: &ToolPaths) -> Self {
        Self {
            probe: MetadataProbe::new(Arc::clone(&runner), tools.exiftool()),
            dng_converter: tools.dng_converter().to_path_buf(),
            runner,
        }
    }

    /// Like [`try_process`](Self::try_process), with the failure folded into
    /// the result.
    pub fn process(&self, entry: &MediaEntry, policy: &ImportPolicy) -> ImportResult {
        match self.try_process(&entry.path, policy) {
            Ok(result) => result,
            Err(err) => ImportResult::failed(&err),
        }
    }

    /// Runs every stage in order, stopping at the first failure. A failed
    /// delete still reports where the file was written.
    pub fn try_process(
        &self,
        source: &Path,
        policy: &ImportPolicy,
    ) -> Result<ImportResult, ImportError> {
        let filename = sanitize::redact_path(source);
        let _file_span = info_span!("import_file",
            filename = %filename,
            convert = policy.convert_to_dng,
            delete_original = policy.delete_original,
        )
        .entered();

        // Step 1: Capture date, only when the folder name needs it
        let capture_date = if policy.subfolder_mode.requires_capture_date() {
            let _step = info_span!("probe_capture_date").entered();
            let date = self.probe.capture_date(source).map_err(|e| {
                ImportError::new(source, ImportStage::Extraction, StageFailure::Probe(e))
            })?;
            Some(date)
        } else {
            None
        };

        // Step 2: Destination directory
        let target_dir = {
            let _step = info_span!("create_destination").entered();
            let subfolder = resolve_subfolder(
                capture_date.as_ref(),
                policy.subfolder_mode,
                &policy.custom_subfolder_name,
            );
            let dir = destination_dir(&policy.destination_root, &subfolder);
            ensure_directory(&dir)
                .map_err(|e| ImportError::new(source, ImportStage::DestinationCreate, e))?;
            dir
        };

        // Step 3: Convert or copy
        let (destination, converted) = if policy.convert_to_dng {
            let _step = info_span!("convert").entered();
            let destination = self
                .convert(source, &target_dir, policy)
                .map_err(|e| ImportError::new(source, ImportStage::Conversion, e))?;
            (destination, true)
        } else {
            let _step = info_span!("copy").entered();
            let destination = copy_into(source, &target_dir)
                .map_err(|e| ImportError::new(source, ImportStage::Copy, e))?;
            (destination, false)
        };

        // Step 4: Remove the original
        let deleted = if policy.delete_original {
            let _step = info_span!("delete_original").entered();
            fs::remove_file(source).map_err(|e| {
                ImportError::new(
                    source,
                    ImportStage::Delete,
                    StageFailure::Io {
                        path: source.to_path_buf(),
                        source: e,
                    },
                )
                .with_destination(destination.clone())
            })?;
            true
        } else {
            false
        };

        info!(
            destination = %sanitize::redact_path(&destination),
            converted,
            deleted,
            "imported"
        );

        let source = source.to_path_buf();
        Ok(if converted {
            ImportResult::converted(source, destination, deleted)
        } else {
            ImportResult::copied(source, destination, deleted)
        })
    }

    fn convert(
        &self,
        source: &Path,
        target_dir: &Path,
        policy: &ImportPolicy,
    ) -> Result<PathBuf, StageFailure> {
        let args = conversion_args(policy, target_dir, source);
        let output = self.runner.run(&self.dng_converter, &args, None)?;

        if !output.success {
            return Err(StageFailure::ConverterExit {
                status: output.status_label(),
                output: output.combined_lossy().trim().to_string(),
            });
        }

        Ok(target_dir.join(format!("{}.dng", sanitize::file_stem(source))))
    }
}

fn ensure_directory(path: &Path) -> Result<(), StageFailure> {
    if !path.is_dir() {
        debug!("Creating directory: {}", path.display());
        fs::create_dir_all(path).map_err(|e| StageFailure::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

/// Byte-for-byte copy keeping the file name. An existing file of the same
/// name is overwritten, unless it is the source itself.
fn copy_into(source: &Path, target_dir: &Path) -> Result<PathBuf, StageFailure> {
    let file_name = source.file_name().ok_or_else(|| StageFailure::Io {
        path: source.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"),
    })?;
    let destination = target_dir.join(file_name);

    if is_same_file(source, &destination) {
        return Err(StageFailure::Io {
            path: destination,
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "source and destination are the same file",
            ),
        });
    }

    fs::copy(source, &destination).map_err(|e| StageFailure::Io {
        path: destination.clone(),
        source: e,
    })?;
    Ok(destination)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
