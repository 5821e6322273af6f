use crate::config::schema::{ImportPolicy, Settings};
use crate::config::settings::SettingsStore;
use crate::error::ConfigError;

/// Key under which the settings blob is stored.
pub const SETTINGS_KEY: &str = "config.json";

const SCHEMA_JSON: &str = include_str!("../../schema/settings-v1.json");

/// Loads the import policy from the settings store.
pub fn load_policy(store: &dyn SettingsStore) -> Result<ImportPolicy, ConfigError> {
    let content = store.get(SETTINGS_KEY)?;
    load_policy_from_str(&content)
}

pub fn load_policy_from_str(content: &str) -> Result<ImportPolicy, ConfigError> {
    let settings = parse_settings(content)?;
    ImportPolicy::from_settings(&settings, dirs::picture_dir())
}

/// Parses and schema-checks the raw settings blob.
pub fn parse_settings(content: &str) -> Result<Settings, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let settings: Settings = serde_json::from_value(json_value)?;
    Ok(settings)
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();

    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ConversionMethod, DatePattern, PreviewSize, SubfolderMode};
    use crate::config::settings::MemorySettingsStore;
    use std::path::PathBuf;

    #[test]
    fn test_load_full_settings() {
        let json = r#"{
            "sourceDisk": "/Volumes/EOS_DIGITAL",
            "location": "/photos",
            "createSubFoldersPattern": "ddmmyy",
            "customSubFolderName": "",
            "convertToDng": true,
            "deleteOriginal": true,
            "jpegPreviewSize": "fullSize",
            "compressedLossless": true,
            "imageConversionMethod": "linear",
            "embedOriginalRawFile": true,
            "theme": "dark"
        }"#;

        let policy = load_policy_from_str(json).unwrap();

        assert_eq!(policy.source_root, Some(PathBuf::from("/Volumes/EOS_DIGITAL")));
        assert_eq!(policy.destination_root, PathBuf::from("/photos"));
        assert_eq!(
            policy.subfolder_mode,
            SubfolderMode::DatePattern(DatePattern::DdMmYy)
        );
        assert!(policy.convert_to_dng);
        assert!(policy.delete_original);
        assert_eq!(policy.preview_size, PreviewSize::Full);
        assert!(policy.lossless_compression);
        assert_eq!(policy.conversion_method, ConversionMethod::Linear);
        assert!(policy.embed_original_raw);
    }

    #[test]
    fn test_defaults_for_missing_keys() {
        let policy = load_policy_from_str(r#"{"location": "/photos"}"#).unwrap();

        assert_eq!(policy.subfolder_mode, SubfolderMode::None);
        assert_eq!(policy.preview_size, PreviewSize::Medium);
        assert_eq!(policy.conversion_method, ConversionMethod::Default);
        assert!(!policy.convert_to_dng);
        assert!(!policy.delete_original);
    }

    #[test]
    fn test_rejects_wrong_types() {
        let result = load_policy_from_str(r#"{"location": "/photos", "deleteOriginal": "yes"}"#);

        match result {
            Err(ConfigError::SchemaValidation { errors }) => {
                assert!(errors.contains("yes"), "unexpected errors: {}", errors);
            }
            other => panic!("Expected SchemaValidation, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_conversion_method() {
        let result =
            load_policy_from_str(r#"{"location": "/photos", "imageConversionMethod": "cubic"}"#);
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = load_policy_from_str("{location: /photos");
        assert!(matches!(result, Err(ConfigError::ParseJson(_))));
    }

    #[test]
    fn test_load_policy_from_store() {
        let store = MemorySettingsStore::with(SETTINGS_KEY, r#"{"location": "/photos"}"#);
        let policy = load_policy(&store).unwrap();
        assert_eq!(policy.destination_root, PathBuf::from("/photos"));
    }

    #[test]
    fn test_accepts_preserve_conversion_method() {
        let policy = load_policy_from_str(
            r#"{"location": "/photos", "imageConversionMethod": "preserve"}"#,
        )
        .unwrap();
        assert_eq!(policy.conversion_method, ConversionMethod::Default);
    }

    #[test]
    fn test_load_policy_reads_config_json() {
        let store = MemorySettingsStore::with("config.json", r#"{"location": "/photos"}"#);
        let policy = load_policy(&store).unwrap();
        assert_eq!(policy.destination_root, PathBuf::from("/photos"));

        let stale = MemorySettingsStore::with("settings.json", r#"{"location": "/photos"}"#);
        assert!(matches!(
            load_policy(&stale),
            Err(ConfigError::MissingSetting(_))
        ));
    }

    #[test]
    fn test_load_policy_missing_key() {
        let store = MemorySettingsStore::new();
        assert!(matches!(
            load_policy(&store),
            Err(ConfigError::MissingSetting(_))
        ));
    }
}
