//! Capture-date extraction through the external metadata tool.

pub mod capture_date;
pub mod probe;

pub use capture_date::CaptureDate;
pub use probe::MetadataProbe;
