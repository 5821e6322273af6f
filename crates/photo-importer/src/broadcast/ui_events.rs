//! Selection and import commands raised by menus and shortcuts.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    #[serde(rename = "select-all")]
    SelectAll,
    #[serde(rename = "deselect-all")]
    SelectNone,
    #[serde(rename = "invert")]
    Invert,
    #[serde(rename = "import-selected")]
    ImportSelected,
}

impl UiEvent {
    /// Event name on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::SelectAll => "select-all",
            UiEvent::SelectNone => "deselect-all",
            UiEvent::Invert => "invert",
            UiEvent::ImportSelected => "import-selected",
        }
    }
}

/// Fire-and-forget publication; nothing depends on delivery.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: UiEvent);
}

pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn publish(&self, _event: UiEvent) {}
}

#[derive(Clone)]
pub struct BroadcastEventSink {
    sender: broadcast::Sender<UiEvent>,
}

impl BroadcastEventSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new(32)
    }
}

impl EventSink for BroadcastEventSink {
    fn publish(&self, event: UiEvent) {
        let _ = self.sender.send(event);
        log::debug!("{} event emitted", event.name());
    }
}
