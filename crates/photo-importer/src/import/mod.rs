//! Importing files into the destination library: per-file dispatch (copy or
//! convert), fail-fast batch orchestration, selection and progress reporting.

pub mod converter;
pub mod dispatcher;
pub mod orchestrator;
pub mod progress;
pub mod result;
pub mod selection;

pub use converter::dng_args;
pub use dispatcher::ConversionDispatcher;
pub use orchestrator::ImportOrchestrator;
pub use progress::{BroadcastProgress, NoopProgress, ProgressEvent, ProgressReporter};
pub use result::{BatchReport, ImportOutcome, ImportResult};
pub use selection::Selection;
