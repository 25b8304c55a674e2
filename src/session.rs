//! Explorer session
//!
//! One `Session` owns the open database handle, the asset resolver, and the
//! outbound UI event queue. Holding all mutable state in a session object
//! (instead of module globals) keeps sessions independent and testable.

use crate::assets::{AssetOpen, AssetResolver};
use crate::event::{EventQueue, UiEvent};
use crate::reader::Database;
use crate::types::{CellValue, DbStats, RowSet};
use crate::{ExplorerError, Result};
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct Session {
    db: Option<Database>,
    assets: AssetResolver,
    events: EventQueue,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a database file, replacing the current handle only on success.
    /// A failed open leaves the previous handle (if any) usable.
    pub fn open_db<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let db = Database::open(path)?;
        self.db = Some(db);
        Ok(())
    }

    /// Drop the current handle, returning to the no-database state.
    pub fn close_db(&mut self) {
        self.db = None;
    }

    pub fn is_open(&self) -> bool {
        self.db.is_some()
    }

    /// Path of the open database file
    pub fn db_path(&self) -> Option<&Path> {
        self.db.as_ref().map(|db| db.path())
    }

    fn database(&self) -> Result<&Database> {
        self.db.as_ref().ok_or(ExplorerError::NoDatabaseOpen)
    }

    pub fn tables(&self) -> Result<Vec<String>> {
        self.database()?.table_names()
    }

    pub fn load_rows(&self, table: &str, limit: Option<usize>) -> Result<RowSet> {
        self.database()?.load_rows(table, limit)
    }

    pub fn load_rows_filtered(
        &self,
        table: &str,
        value: &CellValue,
        column: Option<&str>,
    ) -> Result<RowSet> {
        self.database()?.load_rows_filtered(table, value, column)
    }

    pub fn search_rows(&self, table: &str, query: &str, limit: Option<usize>) -> Result<RowSet> {
        self.database()?.search_rows(table, query, limit)
    }

    pub fn stats(&self) -> Result<DbStats> {
        self.database()?.stats()
    }

    pub fn assets_dir(&self) -> Option<&Path> {
        self.assets.dir()
    }

    /// Update the assets directory and notify subscribers through the event
    /// queue.
    pub fn set_assets_dir(&mut self, dir: Option<PathBuf>) {
        self.assets.set_dir(dir.clone());
        self.events.push(UiEvent::AssetsDirChanged(dir));
    }

    pub fn open_asset(&self, file_name: &str) -> Result<AssetOpen> {
        self.assets.open_asset(file_name)
    }

    /// Queue a fire-and-forget event for the UI.
    pub fn emit(&mut self, event: UiEvent) {
        self.events.push(event);
    }

    /// Take every pending UI event.
    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        self.events.drain()
    }
}
