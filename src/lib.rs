//! SQLite Explorer - Cross-platform read-only SQLite database viewer
//!
//! A desktop viewer for SQLite database files:
//! - Browse tables in a grid, read-only
//! - Foreign-key navigation (click a referencing cell to jump to the
//!   referenced row)
//! - Substring search across every column of a table
//! - Export to CSV/JSON
//! - Open local asset files referenced by name in cell values

pub mod assets;
pub mod browse;
pub mod event;
pub mod export;
pub mod reader;
pub mod session;
pub mod types;

pub use assets::{AssetOpen, AssetOpenFailure, AssetResolver};
pub use browse::CellAction;
pub use event::{EventQueue, UiEvent};
pub use reader::Database;
pub use session::Session;
pub use types::{CellValue, DbStats, ForeignKey, Row, RowSet};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in sqlite-explorer
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("No database open")]
    NoDatabaseOpen,

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Not a SQLite database: {}", .0.display())]
    NotASqliteFile(PathBuf),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Table {0} has no single-column primary key")]
    NoPrimaryKey(String),

    #[error("Assets directory not set")]
    NoAssetsDirectory,

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
