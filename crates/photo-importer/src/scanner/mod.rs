//! Discovery of importable media on a source volume.

mod extensions;

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::error::ScanError;

pub use extensions::{is_allowed_extension, ALLOWED_EXTENSIONS};

/// Reported when content sniffing cannot classify a file.
pub const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// One importable file found by [`MediaScanner::scan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntry {
    pub path: PathBuf,
    pub is_file: bool,
    pub size: u64,
    /// Empty when the file could not be read for sniffing.
    pub mime_type: String,
    pub filename: String,
}

pub struct MediaScanner {
    root: PathBuf,
}

impl MediaScanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walks the tree depth-first, in file-name order.
    ///
    /// Hidden entries below the root are pruned (a hidden directory is never
    /// descended into). Symlinks are followed, so a dangling link is a walk
    /// error. The first walk error aborts the scan and discards everything
    /// found so far.
    pub fn scan(&self) -> Result<Vec<MediaEntry>, ScanError> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            // A hidden root is still walked when chosen explicitly.
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = entry.map_err(|e| ScanError::Walk {
                root: self.root.clone(),
                source: e,
            })?;

            if entry.file_type().is_dir() || !is_allowed_extension(entry.path()) {
                continue;
            }

            let metadata = entry.metadata().map_err(|e| ScanError::Metadata {
                path: entry.path().to_path_buf(),
                source: e,
            })?;

            debug!("Found media: {}", entry.path().display());

            entries.push(MediaEntry {
                path: entry.path().to_path_buf(),
                is_file: true,
                size: metadata.len(),
                mime_type: detect_mime_type(entry.path()),
                filename: entry.file_name().to_string_lossy().into_owned(),
            });
        }

        info!(
            "Scanned {} media files in {}",
            entries.len(),
            self.root.display()
        );
        Ok(entries)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Sniffs the file content, falling back to the extension when the magic
/// bytes are not recognised. A read failure is logged and yields `""`.
pub fn detect_mime_type(path: &Path) -> String {
    match infer::get_from_path(path) {
        Ok(Some(kind)) => kind.mime_type().to_string(),
        Ok(None) => mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(UNKNOWN_MIME_TYPE)
            .to_string(),
        Err(e) => {
            warn!("Error detecting mime type for {}: {}", path.display(), e);
            String::new()
        }
    }
}
