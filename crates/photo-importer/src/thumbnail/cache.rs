use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::APP_DIR_NAME;
use crate::error::CacheError;
use crate::presentation;
use crate::sanitize;
use crate::tools::ProcessRunner;

use super::hash::hash_file;

/// Where the thumbnail for one source file lives in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRecord {
    pub source_path: PathBuf,
    pub hash: String,
    pub cache_path: PathBuf,
    /// Whether the file was on disk when the record was returned. A failed
    /// extraction still yields a record, with this set to `false`.
    pub exists: bool,
}

/// Thumbnails keyed by content hash under a single cache root.
///
/// Safe to share between threads. Extraction for a given hash is serialised
/// through a claim registry, so concurrent requests for the same content
/// run the metadata tool at most once.
pub struct ThumbnailCache {
    root: PathBuf,
    runner: Arc<dyn ProcessRunner>,
    exiftool: PathBuf,
    claims: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ThumbnailCache {
    pub fn new(
        root: impl Into<PathBuf>,
        runner: Arc<dyn ProcessRunner>,
        exiftool: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root: root.into(),
            runner,
            exiftool: exiftool.into(),
            claims: Mutex::new(HashMap::new()),
        }
    }

    /// `<platform cache dir>/PhotoImporter/thumbnails`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join(APP_DIR_NAME).join("thumbnails"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<file stem>_<hash>.jpg`
    pub fn cache_path(&self, source: &Path, hash: &str) -> PathBuf {
        self.root
            .join(format!("{}_{}.jpg", sanitize::file_stem(source), hash))
    }

    /// Arguments making the metadata tool write the embedded preview of
    /// `source` straight into the cache, named like [`cache_path`](Self::cache_path).
    pub fn extraction_args(&self, source: &Path, hash: &str) -> Vec<OsString> {
        vec![
            "-thumbnailimage".into(),
            "-b".into(),
            "-w".into(),
            self.root.join(format!("%f_{}.jpg", hash)).into(),
            source.into(),
        ]
    }

    /// Returns the cached thumbnail of `source`, extracting it first when
    /// absent.
    ///
    /// Only hashing can fail. A failed extraction is logged and the expected
    /// path is returned anyway; callers check [`ThumbnailRecord::exists`].
    pub fn get(&self, source: &Path) -> Result<ThumbnailRecord, CacheError> {
        let hash = hash_file(source).map_err(|e| CacheError::Hash {
            path: source.to_path_buf(),
            source: e,
        })?;
        let cache_path = self.cache_path(source, &hash);

        let claim = self.claim(&hash);
        {
            let _guard = claim.lock().unwrap_or_else(PoisonError::into_inner);

            if cache_path.exists() {
                debug!(
                    "Thumbnail cache hit for {} ({})",
                    sanitize::redact_path(source),
                    hash
                );
            } else {
                self.extract(source, &hash);
            }
        }
        self.release(&hash, claim);

        let exists = cache_path.exists();
        Ok(ThumbnailRecord {
            source_path: source.to_path_buf(),
            hash,
            cache_path,
            exists,
        })
    }

    fn extract(&self, source: &Path, hash: &str) {
        if let Err(e) = fs::create_dir_all(&self.root) {
            warn!(
                "Failed to create thumbnail directory {}: {}",
                self.root.display(),
                e
            );
            return;
        }

        let args = self.extraction_args(source, hash);
        match self.runner.run(&self.exiftool, &args, None) {
            Ok(output) if output.success => {
                debug!("Extracted thumbnail for {}", sanitize::redact_path(source));
            }
            Ok(output) => warn!(
                "Thumbnail extraction for {} exited with {}: {}",
                sanitize::redact_path(source),
                output.status_label(),
                output.combined_lossy().trim()
            ),
            Err(e) => warn!(
                "Thumbnail extraction for {} failed: {}",
                sanitize::redact_path(source),
                e
            ),
        }
    }

    fn claim(&self, hash: &str) -> Arc<Mutex<()>> {
        let mut claims = self.claims.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(claims.entry(hash.to_string()).or_default())
    }

    /// Drops the registry entry once no other caller holds it.
    fn release(&self, hash: &str, claim: Arc<Mutex<()>>) {
        let mut claims = self.claims.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the map, one here
        if Arc::strong_count(&claim) <= 2 {
            claims.remove(hash);
        }
    }

    /// Reads a cached thumbnail. The path must lie lexically under the cache
    /// root; this is checked before touching the filesystem.
    pub fn read(&self, cache_path: &Path) -> Result<Vec<u8>, CacheError> {
        self.ensure_inside(cache_path)?;

        fs::read(cache_path).map_err(|e| CacheError::Read {
            path: cache_path.to_path_buf(),
            source: e,
        })
    }

    /// [`read`](Self::read), encoded as a JPEG data URI.
    pub fn read_data_uri(&self, cache_path: &Path) -> Result<String, CacheError> {
        let bytes = self.read(cache_path)?;
        Ok(presentation::to_data_uri(&bytes))
    }

    fn ensure_inside(&self, path: &Path) -> Result<(), CacheError> {
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir));

        if escapes || !path.starts_with(&self.root) {
            return Err(CacheError::PathOutsideCache {
                path: path.to_path_buf(),
                root: self.root.clone(),
            });
        }
        Ok(())
    }

    /// Removes the cache root and everything in it. A missing root is fine.
    pub fn clear(&self) -> Result<(), CacheError> {
        debug!("Clearing thumbnail cache {}", self.root.display());

        match fs::remove_dir_all(&self.root) {
            Ok(()) => {
                info!("Cleared thumbnail cache {}", self.root.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::Clear {
                path: self.root.clone(),
                source: e,
            }),
        }
    }
}
