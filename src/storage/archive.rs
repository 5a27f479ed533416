//! Resource trees backed by a zip (or jar) archive.
//!
//! The archive file is opened by [`ArchiveTree::open`] and closed when the
//! tree is dropped.

use super::ResourceTree;
use crate::error::DiscoveryError;
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// One root inside an open archive.
pub struct ArchiveTree {
    archive: ZipArchive<File>,
    archive_path: String,
    /// Entry-name prefix of the root, ending in '/' (empty for the archive root).
    prefix: String,
}

impl ArchiveTree {
    /// Opens the archive at `path` and checks that it contains `relative`.
    pub fn open(path: &Path, relative: &str) -> Result<Self, DiscoveryError> {
        let archive_path = path.display().to_string();
        let file = File::open(path).map_err(|source| DiscoveryError::Io {
            path: archive_path.clone(),
            source,
        })?;
        let archive = ZipArchive::new(file).map_err(|source| DiscoveryError::Archive {
            path: archive_path.clone(),
            source,
        })?;
        let prefix = if relative.is_empty() {
            String::new()
        } else {
            format!("{}/", relative)
        };
        if !archive.file_names().any(|name| name.starts_with(&prefix)) {
            return Err(DiscoveryError::RootNotFound {
                root: relative.to_string(),
                base: archive_path,
            });
        }
        debug!("opened archive {} at {:?}", archive_path, prefix);
        Ok(Self {
            archive,
            archive_path,
            prefix,
        })
    }
}

impl ResourceTree for ArchiveTree {
    fn child_files(&mut self) -> Result<Vec<String>, DiscoveryError> {
        let prefix = &self.prefix;
        let mut names: Vec<String> = self
            .archive
            .file_names()
            .filter_map(|name| name.strip_prefix(prefix.as_str()))
            // Directory entries end in '/', deeper files contain one.
            .filter(|rest| !rest.is_empty() && !rest.contains('/'))
            .map(str::to_string)
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn read(&mut self, relative: &str) -> Result<Option<Vec<u8>>, DiscoveryError> {
        let entry = format!("{}{}", self.prefix, relative);
        let entry_path = format!("{}!{}", self.archive_path, entry);
        let mut file = match self.archive.by_name(&entry) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(source) => {
                return Err(DiscoveryError::Archive {
                    path: entry_path,
                    source,
                })
            }
        };
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes).map_err(|source| DiscoveryError::Io {
            path: entry_path,
            source,
        })?;
        Ok(Some(bytes))
    }
}
