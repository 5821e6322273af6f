//! External tools the importer shells out to: the metadata tool (which also
//! extracts embedded thumbnails) and the raw-to-DNG converter.

pub mod paths;
pub mod process;

pub use paths::ToolPaths;
pub use process::{ProcessOutput, ProcessRunner, SystemProcessRunner};
