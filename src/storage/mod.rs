//! Read-only access to spec test resources.
//!
//! Test files live under a resource base, which is either a plain directory
//! or a zip/jar archive. Both are reached through [`ResourceTree`]: list the
//! files directly under one root, and read a file relative to it.
//!
//! A tree holds whatever handle it needs (for archives, the open file) until
//! it is dropped, so the handle is released on every exit path of the caller.

mod archive;
mod dir;

pub use archive::ArchiveTree;
pub use dir::DirTree;

use crate::error::DiscoveryError;
use std::path::{Path, PathBuf};

/// A readable tree rooted at one resource root.
pub trait ResourceTree {
    /// File names of the immediate children of the root, sorted.
    /// Subdirectories are not included and not descended into.
    fn child_files(&mut self) -> Result<Vec<String>, DiscoveryError>;

    /// Reads the file at `relative` (slash separated, relative to the root).
    /// Returns `Ok(None)` if there is no such file.
    fn read(&mut self, relative: &str) -> Result<Option<Vec<u8>>, DiscoveryError>;
}

/// Where resource roots are resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceBase {
    /// Roots are directories below this path.
    Directory(PathBuf),
    /// Roots are entry prefixes inside this zip (or jar) file.
    Archive(PathBuf),
}

impl ResourceBase {
    /// Treats an existing `.zip` or `.jar` file as an archive, anything else
    /// as a directory.
    pub fn detect(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_archive = path.is_file()
            && matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("zip") | Some("jar")
            );
        if is_archive {
            ResourceBase::Archive(path)
        } else {
            ResourceBase::Directory(path)
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ResourceBase::Directory(path) | ResourceBase::Archive(path) => path,
        }
    }

    /// Opens the tree at `root`, an absolute-style resource path such as
    /// `/spec/test/core`.
    pub fn open(&self, root: &str) -> Result<Box<dyn ResourceTree>, DiscoveryError> {
        if root.ends_with('/') {
            return Err(DiscoveryError::InvalidRoot(root.to_string()));
        }
        let relative = root.trim_start_matches('/');
        match self {
            ResourceBase::Directory(base) => Ok(Box::new(DirTree::open(base, relative)?)),
            ResourceBase::Archive(base) => Ok(Box::new(ArchiveTree::open(base, relative)?)),
        }
    }
}
