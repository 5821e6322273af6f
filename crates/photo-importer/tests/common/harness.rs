//! Test harness for isolated test execution.
//!
//! The `TestHarness` struct provides a card, a library and a thumbnail
//! cache directory under one temp directory, wired to [`FakeTools`].

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use photo_importer::config::ImportPolicy;
use photo_importer::import::{ConversionDispatcher, ImportOrchestrator};
use photo_importer::thumbnail::ThumbnailCache;
use photo_importer::tools::ToolPaths;

use super::fake_tools::{FakeTools, CONVERTER, EXIFTOOL};

pub struct TestHarness {
    temp_dir: TempDir,
    /// Stands in for the mounted camera card.
    pub card_dir: PathBuf,
    pub library_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub tools: Arc<FakeTools>,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();

        let card_dir = base.join("card");
        let library_dir = base.join("library");
        let cache_dir = base.join("cache").join("PhotoImporter").join("thumbnails");

        std::fs::create_dir_all(&card_dir).expect("Failed to create card dir");
        std::fs::create_dir_all(&library_dir).expect("Failed to create library dir");

        Self {
            temp_dir,
            card_dir,
            library_dir,
            cache_dir,
            tools: Arc::new(FakeTools::new()),
        }
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file to the card, creating parent directories.
    pub fn write_card_file(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.card_dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create card subdir");
        }
        std::fs::write(&path, content).expect("Failed to write card file");
        path
    }

    pub fn tool_paths(&self) -> ToolPaths {
        ToolPaths::new(EXIFTOOL, CONVERTER)
    }

    /// Plain-copy policy into the library, reading from the card.
    pub fn policy(&self) -> ImportPolicy {
        let mut policy = ImportPolicy::new(&self.library_dir);
        policy.source_root = Some(self.card_dir.clone());
        policy
    }

    pub fn orchestrator(&self) -> ImportOrchestrator {
        ImportOrchestrator::new(ConversionDispatcher::new(
            self.tools.clone(),
            &self.tool_paths(),
        ))
    }

    pub fn cache(&self) -> ThumbnailCache {
        ThumbnailCache::new(&self.cache_dir, self.tools.clone(), EXIFTOOL)
    }

    /// Files directly in `dir`, sorted by name.
    pub fn list_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .expect("Failed to read directory")
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
