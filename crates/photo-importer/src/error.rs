use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Thumbnail cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("External tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read setting '{key}' from '{path}': {source}")]
    ReadSetting {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Setting '{0}' is not present")]
    MissingSetting(String),

    #[error("Failed to parse settings JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },

    #[error("Settings validation failed: {message}")]
    Validation { message: String },
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory walk failed under '{root}': {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read metadata for '{path}': {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Failure to run an external tool at all. A tool that runs and exits
/// non-zero is not a `ToolError`; callers inspect [`ProcessOutput`] for that.
///
/// [`ProcessOutput`]: crate::tools::ProcessOutput
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' could not be located")]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Metadata tool could not run: {0}")]
    Tool(#[from] ToolError),

    #[error("Metadata tool exited with {status}: {stderr}")]
    NonZeroExit { status: String, stderr: String },

    #[error("Metadata tool output is not valid UTF-8")]
    UnreadableOutput,

    #[error("No capture date found in '{0}'")]
    DateNotFound(String),
}

/// Stage of a single-file import at which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStage {
    Extraction,
    DestinationCreate,
    Conversion,
    Copy,
    Delete,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStage::Extraction => write!(f, "Capture date extraction"),
            ImportStage::DestinationCreate => write!(f, "Destination directory creation"),
            ImportStage::Conversion => write!(f, "DNG conversion"),
            ImportStage::Copy => write!(f, "Copy"),
            ImportStage::Delete => write!(f, "Deleting the original"),
        }
    }
}

#[derive(Error, Debug)]
pub enum StageFailure {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Converter exited with {status}: {output}")]
    ConverterExit { status: String, output: String },
}

/// A fatal per-file failure. Identifies the file and the stage so a caller
/// can render an actionable message.
#[derive(Error, Debug)]
#[error("{stage} failed for '{path}': {source}")]
pub struct ImportError {
    pub path: PathBuf,
    pub stage: ImportStage,
    /// Set when the file had already been written before the failing stage.
    pub destination: Option<PathBuf>,
    #[source]
    pub source: StageFailure,
}

impl ImportError {
    pub fn new(path: impl Into<PathBuf>, stage: ImportStage, source: StageFailure) -> Self {
        Self {
            path: path.into(),
            stage,
            destination: None,
            source,
        }
    }

    pub fn with_destination(mut self, destination: PathBuf) -> Self {
        self.destination = Some(destination);
        self
    }
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Path '{path}' is not located in the thumbnail directory '{root}'")]
    PathOutsideCache { path: PathBuf, root: PathBuf },

    #[error("Failed to hash '{path}': {source}")]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read cached thumbnail '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to clear thumbnail cache '{path}': {source}")]
    Clear {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ImporterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_names_file_and_stage() {
        let err = ImportError::new(
            "/media/card/IMG_0001.CR2",
            ImportStage::Extraction,
            StageFailure::Probe(ProbeError::DateNotFound("IMG_0001.CR2".to_string())),
        );

        let message = err.to_string();
        assert!(message.contains("/media/card/IMG_0001.CR2"));
        assert!(message.starts_with("Capture date extraction failed"));
        assert_eq!(err.stage, ImportStage::Extraction);
    }

    #[test]
    fn test_output_error_is_not_a_settings_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ImporterError::from(json_err);

        assert!(matches!(err, ImporterError::Output(_)));
        let message = err.to_string();
        assert!(message.starts_with("Failed to serialize output"));
        assert!(!message.contains("settings"));
    }

    #[test]
    fn test_stage_serializes_snake_case() {
        let json = serde_json::to_string(&ImportStage::DestinationCreate).unwrap();
        assert_eq!(json, "\"destination_create\"");
    }
}
