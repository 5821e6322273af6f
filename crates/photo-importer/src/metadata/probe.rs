use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;

use crate::error::ProbeError;
use crate::metadata::capture_date::CaptureDate;
use crate::sanitize;
use crate::tools::ProcessRunner;

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4}):(\d{2}):(\d{2})").expect("valid date regex"));

/// Reads the original capture time of a file with the metadata tool.
#[derive(Clone)]
pub struct MetadataProbe {
    runner: Arc<dyn ProcessRunner>,
    exiftool: PathBuf,
}

impl MetadataProbe {
    pub fn new(runner: Arc<dyn ProcessRunner>, exiftool: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            exiftool: exiftool.into(),
        }
    }

    /// Arguments asking for `DateTimeOriginal` only, value without tag name.
    pub fn capture_date_args(path: &Path) -> Vec<OsString> {
        vec![
            "-DateTimeOriginal".into(),
            "-s3".into(),
            path.as_os_str().to_os_string(),
        ]
    }

    /// No retry: a failure is reported once and the caller decides.
    pub fn capture_date(&self, path: &Path) -> Result<CaptureDate, ProbeError> {
        let output = self
            .runner
            .run(&self.exiftool, &Self::capture_date_args(path), None)?;

        if !output.success {
            return Err(ProbeError::NonZeroExit {
                status: output.status_label(),
                stderr: output.stderr_lossy().trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| ProbeError::UnreadableOutput)?;
        let date = parse_capture_date(&stdout)
            .ok_or_else(|| ProbeError::DateNotFound(sanitize::redact_path(path)))?;

        debug!(file = %sanitize::redact_path(path), date = %date, "capture date");
        Ok(date)
    }
}

/// Finds the first `YYYY:MM:DD` in the tool output and rewrites it as
/// `YYYY-MM-DD`.
pub fn parse_capture_date(output: &str) -> Option<CaptureDate> {
    let caps = DATE_PATTERN.captures(output.trim())?;
    let raw = format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]);
    Some(CaptureDate::parse(&raw))
}
