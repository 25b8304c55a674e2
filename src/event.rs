//! Fire-and-forget UI events
//!
//! The session and the menu layer emit events into a FIFO queue; the UI
//! drains the queue once per frame and dispatches each event to a named
//! handler. No toolkit types appear here.

use std::collections::VecDeque;
use std::path::PathBuf;

/// Events flowing from commands toward the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Export the currently loaded table as CSV
    ExportCsv,
    /// The assets directory changed (or was cleared)
    AssetsDirChanged(Option<PathBuf>),
    /// Open and focus the search bar
    OpenSearch,
}

/// FIFO queue of pending UI events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<UiEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: UiEvent) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<UiEvent> {
        self.events.pop_front()
    }

    /// Take every pending event, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<UiEvent> {
        self.events.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
