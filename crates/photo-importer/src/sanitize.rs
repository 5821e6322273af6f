//! Helpers for keeping span attributes free of full filesystem paths.
//!
//! Import sources are usually removable media mounted under a user's home
//! directory; only the file name is recorded in traces.

use std::path::Path;

/// Returns only the filename component of a path (no directory).
pub fn redact_path(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
        .to_string()
}

/// File name without its final extension, e.g. `IMG_0001` for
/// `/card/DCIM/IMG_0001.CR2`.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
