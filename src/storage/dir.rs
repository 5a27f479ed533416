//! Resource trees backed by a plain directory.

use super::ResourceTree;
use crate::error::DiscoveryError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A directory on disk.
#[derive(Debug)]
pub struct DirTree {
    root: PathBuf,
}

impl DirTree {
    /// Opens `base/relative`, which must be an existing directory.
    pub fn open(base: &Path, relative: &str) -> Result<Self, DiscoveryError> {
        let root = base.join(relative);
        if !root.is_dir() {
            return Err(DiscoveryError::RootNotFound {
                root: relative.to_string(),
                base: base.display().to_string(),
            });
        }
        Ok(Self { root })
    }

    fn io_error(&self, path: &Path, source: io::Error) -> DiscoveryError {
        DiscoveryError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

impl ResourceTree for DirTree {
    fn child_files(&mut self) -> Result<Vec<String>, DiscoveryError> {
        let entries = fs::read_dir(&self.root).map_err(|e| self.io_error(&self.root, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| self.io_error(&self.root, e))?;
            // Follows symlinks, so a linked test file counts as a file.
            let path = entry.path();
            let metadata = fs::metadata(&path).map_err(|e| self.io_error(&path, e))?;
            if !metadata.is_file() {
                continue;
            }
            // Non-UTF-8 names can never match the allow-list.
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&mut self, relative: &str) -> Result<Option<Vec<u8>>, DiscoveryError> {
        let path = self.root.join(relative);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(&path, e)),
        }
    }
}
