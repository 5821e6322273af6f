use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::ToolError;

/// Overrides the metadata tool location.
pub const EXIFTOOL_ENV: &str = "PHOTO_IMPORTER_EXIFTOOL";
/// Overrides the DNG converter location.
pub const DNG_CONVERTER_ENV: &str = "PHOTO_IMPORTER_DNG_CONVERTER";

const EXIFTOOL_NAME: &str = "exiftool";

#[cfg(target_os = "macos")]
const DEFAULT_DNG_CONVERTER: &str =
    "/Applications/Adobe DNG Converter.app/Contents/MacOS/Adobe DNG Converter";
#[cfg(target_os = "windows")]
const DEFAULT_DNG_CONVERTER: &str =
    r"C:\Program Files\Adobe\Adobe DNG Converter\Adobe DNG Converter.exe";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const DEFAULT_DNG_CONVERTER: &str = "/usr/local/bin/dngconverter";

/// Absolute locations of the external tools, resolved once at startup and
/// shared read-only by every component that shells out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub exiftool: PathBuf,
    pub dng_converter: PathBuf,
}

impl ToolPaths {
    pub fn new(exiftool: impl Into<PathBuf>, dng_converter: impl Into<PathBuf>) -> Self {
        Self {
            exiftool: exiftool.into(),
            dng_converter: dng_converter.into(),
        }
    }

    /// Resolves both tools from the environment overrides, `PATH` and the
    /// platform install location of the converter.
    ///
    /// The metadata tool is mandatory; the converter is not, see
    /// [`ToolPaths::is_converter_available`].
    pub fn discover() -> Result<Self, ToolError> {
        let exiftool = match std::env::var_os(EXIFTOOL_ENV) {
            Some(path) => PathBuf::from(path),
            None => which::which(EXIFTOOL_NAME)
                .map_err(|_| ToolError::NotFound(EXIFTOOL_NAME.to_string()))?,
        };

        let dng_converter = std::env::var_os(DNG_CONVERTER_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DNG_CONVERTER));

        debug!(
            "Resolved tools: exiftool={}, converter={}",
            exiftool.display(),
            dng_converter.display()
        );

        if !dng_converter.exists() {
            warn!(
                "DNG converter not found at {}; conversion is unavailable",
                dng_converter.display()
            );
        }

        Ok(Self {
            exiftool,
            dng_converter,
        })
    }

    pub fn exiftool(&self) -> &Path {
        &self.exiftool
    }

    pub fn dng_converter(&self) -> &Path {
        &self.dng_converter
    }

    pub fn is_converter_available(&self) -> bool {
        self.dng_converter.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_converter_availability_follows_filesystem() {
        let temp_dir = TempDir::new().unwrap();
        let converter = temp_dir.path().join("Adobe DNG Converter");

        let paths = ToolPaths::new("/usr/bin/exiftool", &converter);
        assert!(!paths.is_converter_available());

        std::fs::write(&converter, b"#!/bin/sh\n").unwrap();
        assert!(paths.is_converter_available());
    }

    #[test]
    #[serial]
    fn test_discover_honours_env_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let exiftool = temp_dir.path().join("exiftool");
        let converter = temp_dir.path().join("converter");

        std::env::set_var(EXIFTOOL_ENV, &exiftool);
        std::env::set_var(DNG_CONVERTER_ENV, &converter);

        let paths = ToolPaths::discover().unwrap();

        std::env::remove_var(EXIFTOOL_ENV);
        std::env::remove_var(DNG_CONVERTER_ENV);

        assert_eq!(paths.exiftool(), exiftool.as_path());
        assert_eq!(paths.dng_converter(), converter.as_path());
        assert!(!paths.is_converter_available());
    }
}
