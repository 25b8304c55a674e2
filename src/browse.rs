//! Cell value interpretation for the table browser
//!
//! Decides how a grid cell behaves when clicked: foreign-key cells navigate
//! to the referenced table, URL- or filename-looking cells offer to open a
//! local asset, everything else is inert text.

use crate::types::{CellValue, ForeignKey};
use url::Url;

/// What a cell click should do.
#[derive(Debug, Clone, PartialEq)]
pub enum CellAction {
    /// Re-query the referenced table filtered on the referenced column
    Navigate {
        table: String,
        column: String,
        value: CellValue,
    },
    /// Offer to open a file of this name from the assets directory
    OpenAsset { file_name: String },
    /// Plain text, no interaction
    Plain,
}

/// Classify one cell. A foreign-key descriptor on the column always wins
/// over URL/filename interpretation, as long as the value is non-null and
/// non-empty.
pub fn classify_cell(value: &CellValue, fk: Option<&ForeignKey>) -> CellAction {
    if let Some(fk) = fk {
        if !value.is_null() && value.as_str() != Some("") {
            return CellAction::Navigate {
                table: fk.target_table.clone(),
                column: fk.target_column.clone(),
                value: value.clone(),
            };
        }
    }

    match asset_file_name(value) {
        Some(file_name) => CellAction::OpenAsset { file_name },
        None => CellAction::Plain,
    }
}

/// Extract an openable file name from a cell value, if it looks like one.
///
/// Text that parses as an absolute URL yields the URL's last path segment
/// (nothing if the path is empty). Otherwise text with no path separators
/// and an extension-like suffix (2-8 alphanumerics containing at least one
/// letter) is taken verbatim. Non-text values never qualify.
pub fn asset_file_name(value: &CellValue) -> Option<String> {
    let s = value.as_str()?;
    if s.is_empty() {
        return None;
    }

    if let Ok(u) = Url::parse(s) {
        return u
            .path_segments()
            .and_then(|mut segs| segs.next_back())
            .filter(|name| !name.is_empty())
            .map(String::from);
    }

    if is_bare_file_name(s) {
        return Some(s.to_string());
    }
    None
}

fn is_bare_file_name(s: &str) -> bool {
    if s.contains('/') || s.contains('\\') {
        return false;
    }
    match s.rsplit_once('.') {
        Some((stem, ext)) => {
            !stem.is_empty()
                && (2..=8).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
                && ext.chars().any(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}
