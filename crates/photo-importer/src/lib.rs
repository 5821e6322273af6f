pub mod broadcast;
pub mod config;
pub mod destination;
pub mod error;
pub mod import;
pub mod metadata;
pub mod presentation;
pub mod sanitize;
pub mod scanner;
pub mod thumbnail;
pub mod tools;

pub use broadcast::{BroadcastEventSink, EventSink, ImportProgressBroadcaster, UiEvent};
pub use config::{load_policy, ImportPolicy, SettingsStore, SubfolderMode};
pub use destination::resolve_subfolder;
pub use error::{
    CacheError, ConfigError, ImportError, ImportStage, ImporterError, ProbeError, Result,
    ScanError, ToolError,
};
pub use import::{
    BatchReport, ConversionDispatcher, ImportOrchestrator, ImportOutcome, ImportResult,
    Selection,
};
pub use metadata::{CaptureDate, MetadataProbe};
pub use scanner::{MediaEntry, MediaScanner};
pub use thumbnail::{ThumbnailCache, ThumbnailRecord};
pub use tools::{ProcessRunner, SystemProcessRunner, ToolPaths};
