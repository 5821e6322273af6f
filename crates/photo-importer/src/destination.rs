//! Destination subfolder naming.

use std::path::{Path, PathBuf};

use crate::config::{DatePattern, SubfolderMode};
use crate::metadata::CaptureDate;

/// Name of the subfolder (relative to the destination root) a file goes to.
///
/// Pure and infallible. With a date pattern, a capture date that is not a
/// valid calendar date is returned as its raw `YYYY-MM-DD` text, and a
/// missing date yields an empty name.
pub fn resolve_subfolder(
    capture_date: Option<&CaptureDate>,
    mode: SubfolderMode,
    custom_name: &str,
) -> String {
    match mode {
        SubfolderMode::None => String::new(),
        SubfolderMode::Custom => custom_name.to_string(),
        SubfolderMode::DatePattern(pattern) => match capture_date {
            Some(date) => format_date_folder(date, pattern),
            None => String::new(),
        },
    }
}

pub fn format_date_folder(date: &CaptureDate, pattern: DatePattern) -> String {
    match date.date() {
        Some(day) => day.format(pattern.format_str()).to_string(),
        None => date.as_str().to_string(),
    }
}

/// Joins the resolved subfolder onto the destination root. An empty
/// subfolder means the root itself.
pub fn destination_dir(root: &Path, subfolder: &str) -> PathBuf {
    if subfolder.is_empty() {
        root.to_path_buf()
    } else {
        root.join(subfolder)
    }
}
