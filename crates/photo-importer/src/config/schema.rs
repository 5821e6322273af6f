use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Raw settings blob as persisted by the settings store.
///
/// Field names match the persisted camelCase keys. This is only the wire
/// shape; the importer works on [`ImportPolicy`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub source_disk: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_subfolder_pattern")]
    pub create_sub_folders_pattern: String,
    #[serde(default)]
    pub custom_sub_folder_name: String,
    #[serde(default)]
    pub convert_to_dng: bool,
    #[serde(default)]
    pub delete_original: bool,
    #[serde(default = "default_preview_size")]
    pub jpeg_preview_size: String,
    #[serde(default)]
    pub compressed_lossless: bool,
    #[serde(default)]
    pub image_conversion_method: String,
    #[serde(default)]
    pub embed_original_raw_file: bool,
}

fn default_subfolder_pattern() -> String {
    "none".to_string()
}

fn default_preview_size() -> String {
    "medium".to_string()
}

/// Date layout used for per-day destination folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatePattern {
    #[default]
    YyyyMmDd,
    YyMmDd,
    DdMmYy,
    DdMm,
    /// Year, day, then the full month name, e.g. `202314July`.
    YyyyDdMmm,
    /// Day, full month name, year, e.g. `14July2023`.
    DdMmmYyyy,
}

impl DatePattern {
    /// Parses a pattern name case-insensitively. Unrecognized names fall back
    /// to [`DatePattern::YyyyMmDd`].
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "yyyymmdd" => DatePattern::YyyyMmDd,
            "yymmdd" => DatePattern::YyMmDd,
            "ddmmyy" => DatePattern::DdMmYy,
            "ddmm" => DatePattern::DdMm,
            "yyyyddmmm" => DatePattern::YyyyDdMmm,
            "ddmmmyyyy" => DatePattern::DdMmmYyyy,
            other => {
                log::debug!("Unknown date pattern '{}', using YYYYMMDD", other);
                DatePattern::YyyyMmDd
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DatePattern::YyyyMmDd => "yyyymmdd",
            DatePattern::YyMmDd => "yymmdd",
            DatePattern::DdMmYy => "ddmmyy",
            DatePattern::DdMm => "ddmm",
            DatePattern::YyyyDdMmm => "yyyyddmmm",
            DatePattern::DdMmmYyyy => "ddmmmyyyy",
        }
    }

    /// `chrono` format string for this pattern.
    pub fn format_str(&self) -> &'static str {
        match self {
            DatePattern::YyyyMmDd => "%Y%m%d",
            DatePattern::YyMmDd => "%y%m%d",
            DatePattern::DdMmYy => "%d%m%y",
            DatePattern::DdMm => "%d%m",
            DatePattern::YyyyDdMmm => "%Y%d%B",
            DatePattern::DdMmmYyyy => "%d%B%Y",
        }
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubfolderMode {
    /// Files land directly in the destination root.
    #[default]
    None,
    /// Files land in a fixed, user-named folder.
    Custom,
    /// Files land in a folder named after their capture date.
    DatePattern(DatePattern),
}

impl SubfolderMode {
    /// Maps the persisted `createSubFoldersPattern` value.
    pub fn from_setting(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "none" => SubfolderMode::None,
            "custom" => SubfolderMode::Custom,
            other => SubfolderMode::DatePattern(DatePattern::from_name(other)),
        }
    }

    /// Whether resolving a destination for this mode needs a capture date.
    pub fn requires_capture_date(&self) -> bool {
        matches!(self, SubfolderMode::DatePattern(_))
    }
}

/// Size of the JPEG preview embedded into converted DNG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewSize {
    Full,
    #[default]
    Medium,
    /// No preview.
    Low,
}

impl PreviewSize {
    fn from_setting(value: &str) -> Option<Self> {
        match value {
            "fullSize" => Some(PreviewSize::Full),
            "medium" => Some(PreviewSize::Medium),
            "none" | "low" => Some(PreviewSize::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionMethod {
    #[default]
    Default,
    Linear,
}

impl ConversionMethod {
    fn from_setting(value: &str) -> Option<Self> {
        match value {
            "" | "default" | "preserve" => Some(ConversionMethod::Default),
            "linear" => Some(ConversionMethod::Linear),
            _ => None,
        }
    }
}

/// Validated, typed import configuration for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPolicy {
    pub source_root: Option<PathBuf>,
    pub destination_root: PathBuf,
    pub subfolder_mode: SubfolderMode,
    pub custom_subfolder_name: String,
    pub convert_to_dng: bool,
    pub delete_original: bool,
    pub preview_size: PreviewSize,
    pub lossless_compression: bool,
    pub conversion_method: ConversionMethod,
    pub embed_original_raw: bool,
}

impl ImportPolicy {
    /// Plain-copy policy into `destination_root`, no subfolders.
    pub fn new(destination_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: None,
            destination_root: destination_root.into(),
            subfolder_mode: SubfolderMode::None,
            custom_subfolder_name: String::new(),
            convert_to_dng: false,
            delete_original: false,
            preview_size: PreviewSize::default(),
            lossless_compression: false,
            conversion_method: ConversionMethod::default(),
            embed_original_raw: false,
        }
    }

    /// Converts the raw settings blob, rejecting values the importer does not
    /// understand. `fallback_destination` is used when no location is set.
    pub fn from_settings(
        settings: &Settings,
        fallback_destination: Option<PathBuf>,
    ) -> Result<Self, crate::error::ConfigError> {
        use crate::error::ConfigError;

        let destination_root = if settings.location.trim().is_empty() {
            fallback_destination.ok_or_else(|| ConfigError::Validation {
                message: "No destination location configured".to_string(),
            })?
        } else {
            PathBuf::from(&settings.location)
        };

        let preview_size = PreviewSize::from_setting(&settings.jpeg_preview_size)
            .ok_or_else(|| ConfigError::Validation {
                message: format!(
                    "Unsupported jpegPreviewSize '{}'",
                    settings.jpeg_preview_size
                ),
            })?;

        let conversion_method = ConversionMethod::from_setting(&settings.image_conversion_method)
            .ok_or_else(|| ConfigError::Validation {
                message: format!(
                    "Unsupported imageConversionMethod '{}'",
                    settings.image_conversion_method
                ),
            })?;

        let source_root = if settings.source_disk.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(&settings.source_disk))
        };

        Ok(Self {
            source_root,
            destination_root,
            subfolder_mode: SubfolderMode::from_setting(&settings.create_sub_folders_pattern),
            custom_subfolder_name: settings.custom_sub_folder_name.clone(),
            convert_to_dng: settings.convert_to_dng,
            delete_original: settings.delete_original,
            preview_size,
            lossless_compression: settings.compressed_lossless,
            conversion_method,
            embed_original_raw: settings.embed_original_raw_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_pattern_names_are_case_insensitive() {
        assert_eq!(DatePattern::from_name("YYMMDD"), DatePattern::YyMmDd);
        assert_eq!(DatePattern::from_name("ddMMMyyyy"), DatePattern::DdMmmYyyy);
    }

    #[test]
    fn test_unknown_date_pattern_falls_back_to_yyyymmdd() {
        assert_eq!(DatePattern::from_name("weekly"), DatePattern::YyyyMmDd);
        assert_eq!(DatePattern::from_name(""), DatePattern::YyyyMmDd);
    }

    #[test]
    fn test_subfolder_mode_from_setting() {
        assert_eq!(SubfolderMode::from_setting("none"), SubfolderMode::None);
        assert_eq!(SubfolderMode::from_setting("Custom"), SubfolderMode::Custom);
        assert_eq!(
            SubfolderMode::from_setting("ddmmyy"),
            SubfolderMode::DatePattern(DatePattern::DdMmYy)
        );
        assert!(SubfolderMode::from_setting("yyyymmdd").requires_capture_date());
        assert!(!SubfolderMode::Custom.requires_capture_date());
    }

    #[test]
    fn test_from_settings_uses_fallback_destination() {
        let settings = Settings {
            jpeg_preview_size: "medium".to_string(),
            ..Default::default()
        };

        let policy =
            ImportPolicy::from_settings(&settings, Some(PathBuf::from("/home/me/Pictures")))
                .unwrap();
        assert_eq!(policy.destination_root, PathBuf::from("/home/me/Pictures"));
        assert!(policy.source_root.is_none());

        let err = ImportPolicy::from_settings(&settings, None).unwrap_err();
        assert!(err.to_string().contains("No destination"));
    }

    #[test]
    fn test_from_settings_rejects_unknown_preview_size() {
        let settings = Settings {
            location: "/photos".to_string(),
            jpeg_preview_size: "huge".to_string(),
            ..Default::default()
        };

        let err = ImportPolicy::from_settings(&settings, None).unwrap_err();
        assert!(err.to_string().contains("jpegPreviewSize"));
    }
}
