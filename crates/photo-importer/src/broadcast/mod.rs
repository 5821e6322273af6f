//! Broadcasting of import progress and UI events to whichever presentation
//! layer is attached.

pub mod import_progress;
pub mod ui_events;

pub use import_progress::{ImportPhase, ImportProgressBroadcaster, ImportProgressEvent};
pub use ui_events::{BroadcastEventSink, EventSink, NoopEventSink, UiEvent};
