//! Local asset resolution

use crate::{ExplorerError, Result};
use std::path::{Path, PathBuf};

/// Outcome of an asset-open request. `opened == false` with a reason
/// distinguishes a missing file from a launcher failure; a missing assets
/// directory is an error before any filesystem access happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetOpen {
    pub opened: bool,
    pub resolved_path: PathBuf,
    pub reason: Option<AssetOpenFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOpenFailure {
    /// The resolved path does not exist in the assets directory
    NotFound,
    /// The OS default-open mechanism reported an error
    LaunchFailed(String),
}

/// Resolves bare filenames found in cell values against a user-chosen
/// directory. The directory lives in process memory only and is never
/// persisted.
#[derive(Debug, Default)]
pub struct AssetResolver {
    dir: Option<PathBuf>,
}

impl AssetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn set_dir(&mut self, dir: Option<PathBuf>) {
        self.dir = dir;
    }

    /// Resolve `file_name` against the assets directory and hand the file to
    /// the OS default-open mechanism. Existence is checked lazily, here.
    pub fn open_asset(&self, file_name: &str) -> Result<AssetOpen> {
        let dir = self.dir.as_ref().ok_or(ExplorerError::NoAssetsDirectory)?;
        let resolved_path = dir.join(file_name);

        if !resolved_path.exists() {
            return Ok(AssetOpen {
                opened: false,
                resolved_path,
                reason: Some(AssetOpenFailure::NotFound),
            });
        }

        match open::that(&resolved_path) {
            Ok(()) => Ok(AssetOpen {
                opened: true,
                resolved_path,
                reason: None,
            }),
            Err(e) => {
                log::warn!("failed to launch {}: {}", resolved_path.display(), e);
                Ok(AssetOpen {
                    opened: false,
                    resolved_path,
                    reason: Some(AssetOpenFailure::LaunchFailed(e.to_string())),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_without_directory_is_rejected() {
        let resolver = AssetResolver::new();
        let err = resolver.open_asset("photo.png").unwrap_err();
        assert!(matches!(err, ExplorerError::NoAssetsDirectory));
    }

    #[test]
    fn missing_file_reports_not_found_with_resolved_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut resolver = AssetResolver::new();
        resolver.set_dir(Some(dir.path().to_path_buf()));

        let res = resolver.open_asset("photo.png").unwrap();
        assert!(!res.opened);
        assert_eq!(res.reason, Some(AssetOpenFailure::NotFound));
        assert_eq!(res.resolved_path, dir.path().join("photo.png"));
    }

    #[test]
    fn directory_can_be_cleared() {
        let mut resolver = AssetResolver::new();
        resolver.set_dir(Some(PathBuf::from("/tmp/assets")));
        assert!(resolver.dir().is_some());
        resolver.set_dir(None);
        assert!(resolver.dir().is_none());
    }
}
