pub mod loader;
pub mod schema;
pub mod settings;

pub use loader::{load_policy, load_policy_from_str, SETTINGS_KEY};
pub use schema::{
    ConversionMethod, DatePattern, ImportPolicy, PreviewSize, Settings, SubfolderMode,
};
pub use settings::{FileSettingsStore, MemorySettingsStore, SettingsStore, APP_DIR_NAME};
