use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::broadcast::{EventSink, UiEvent};
use crate::config::ImportPolicy;
use crate::scanner::MediaEntry;

use super::orchestrator::ImportOrchestrator;
use super::progress::ProgressReporter;
use super::result::BatchReport;

/// Which scanned files the next import takes. Every bulk change is published
/// to the event sink.
pub struct Selection {
    entries: Vec<MediaEntry>,
    selected: Vec<bool>,
    events: Arc<dyn EventSink>,
}

impl Selection {
    /// Starts with nothing selected.
    pub fn new(entries: Vec<MediaEntry>, events: Arc<dyn EventSink>) -> Self {
        let selected = vec![false; entries.len()];
        Self {
            entries,
            selected,
            events,
        }
    }

    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    pub fn select_all(&mut self) {
        self.selected.fill(true);
        self.events.publish(UiEvent::SelectAll);
    }

    pub fn select_none(&mut self) {
        self.selected.fill(false);
        self.events.publish(UiEvent::SelectNone);
    }

    pub fn invert(&mut self) {
        for flag in &mut self.selected {
            *flag = !*flag;
        }
        self.events.publish(UiEvent::Invert);
    }

    /// Selects the entry at `path`. Returns false when it was not scanned.
    pub fn select(&mut self, path: &Path) -> bool {
        match self.entries.iter().position(|e| e.path == path) {
            Some(index) => {
                self.selected[index] = true;
                true
            }
            None => {
                debug!("{} is not in the scanned set", path.display());
                false
            }
        }
    }

    /// Selected paths, in scan order.
    pub fn selected(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(entry, _)| entry.path.clone())
            .collect()
    }

    pub fn import_selected(
        &self,
        orchestrator: &ImportOrchestrator,
        policy: &ImportPolicy,
        progress: &dyn ProgressReporter,
    ) -> BatchReport {
        self.events.publish(UiEvent::ImportSelected);
        orchestrator.import_batch(&self.selected(), policy, progress)
    }
}
