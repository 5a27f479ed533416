//! Discovery of spec test units.
//!
//! A [`Registry`] walks each configured resource root in order, keeps the
//! `.wast` files named on its [`AllowList`], and reads each one into a
//! [`TestUnit`] along with its optional expected-output log.
//!
//! # Example
//!
//! ```no_run
//! use wast_harness::registry::Registry;
//! use wast_harness::storage::ResourceBase;
//!
//! let registry = Registry::new(ResourceBase::detect("resources"));
//! for unit in registry.all_units().unwrap() {
//!     println!("{} (max {} pages)", unit, unit.default_max_mem_pages());
//! }
//! ```

use crate::error::DiscoveryError;
use crate::storage::{ResourceBase, ResourceTree};
use crate::tables;
use crate::unit::TestUnit;
use log::{debug, trace};
use std::collections::HashSet;

/// Curated tests kept alongside the harness.
pub const LOCAL_SPEC_ROOT: &str = "/local-spec";

/// The upstream core specification tests.
pub const CORE_SPEC_ROOT: &str = "/spec/test/core";

/// Roots consulted by default, in order.
pub const DEFAULT_ROOTS: &[&str] = &[LOCAL_SPEC_ROOT, CORE_SPEC_ROOT];

/// Extension of a test source file.
pub const WAST_EXTENSION: &str = ".wast";

/// Directory, relative to a root, holding `<name>.wast.log` oracles.
pub const EXPECTED_OUTPUT_DIR: &str = "expected-output";

// ============================================================================
// Allow-list
// ============================================================================

/// The set of test file names (extension included) the harness exercises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowList {
    /// The built-in list, [`tables::KNOWN_GOOD_TESTS`].
    KnownGood,
    /// An explicit set of names.
    Custom(HashSet<String>),
}

impl AllowList {
    pub fn known_good() -> Self {
        AllowList::KnownGood
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AllowList::Custom(names.into_iter().map(Into::into).collect())
    }

    /// Parses a JSON array of file names, e.g. `["block.wast", "nop.wast"]`.
    pub fn from_json(json: &str) -> Result<Self, DiscoveryError> {
        let names: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::from_names(names))
    }

    /// True if `file_name` is listed exactly.
    pub fn contains(&self, file_name: &str) -> bool {
        match self {
            AllowList::KnownGood => tables::is_known_good(file_name),
            AllowList::Custom(names) => names.contains(file_name),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AllowList::KnownGood => tables::KNOWN_GOOD_TESTS.len(),
            AllowList::Custom(names) => names.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::known_good()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Finds test units under a resource base.
#[derive(Debug, Clone)]
pub struct Registry {
    base: ResourceBase,
    roots: Vec<String>,
    allow_list: AllowList,
}

impl Registry {
    /// A registry over the default roots with the built-in allow-list.
    pub fn new(base: ResourceBase) -> Self {
        Self {
            base,
            roots: DEFAULT_ROOTS.iter().map(|root| root.to_string()).collect(),
            allow_list: AllowList::known_good(),
        }
    }

    pub fn with_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roots = roots.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allow_list(mut self, allow_list: AllowList) -> Self {
        self.allow_list = allow_list;
        self
    }

    pub fn base(&self) -> &ResourceBase {
        &self.base
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Every unit under every root, roots in order. A test present under two
    /// roots yields two units.
    pub fn all_units(&self) -> Result<Vec<TestUnit>, DiscoveryError> {
        let mut units = Vec::new();
        for root in &self.roots {
            units.extend(self.load_from_root(root)?);
        }
        Ok(units)
    }

    /// The allow-listed units directly under `root`.
    ///
    /// `root` must not end in '/'. Any failure to open the root or read an
    /// included file aborts the whole call.
    pub fn load_from_root(&self, root: &str) -> Result<Vec<TestUnit>, DiscoveryError> {
        let mut tree = self.base.open(root)?;
        debug!("loading spec units from {} in {}", root, self.base.path().display());
        let units = self.load_from_tree(root, tree.as_mut())?;
        debug!("loaded {} spec units from {}", units.len(), root);
        Ok(units)
    }

    fn load_from_tree(&self, root: &str, tree: &mut dyn ResourceTree) -> Result<Vec<TestUnit>, DiscoveryError> {
        let mut units = Vec::new();
        for file_name in tree.child_files()? {
            let name = match file_name.strip_suffix(WAST_EXTENSION) {
                Some(name) => name,
                None => continue,
            };
            if !self.allow_list.contains(&file_name) {
                trace!("skipping {}/{}: not allow-listed", root, file_name);
                continue;
            }
            let wast = read_text(tree, root, &file_name)?.ok_or_else(|| DiscoveryError::Io {
                path: format!("{}/{}", root, file_name),
                source: std::io::ErrorKind::NotFound.into(),
            })?;
            let oracle = format!("{}/{}{}.log", EXPECTED_OUTPUT_DIR, name, WAST_EXTENSION);
            let expected_output = read_text(tree, root, &oracle)?;
            debug!(
                "found spec unit {}{}",
                name,
                if expected_output.is_some() { " with expected output" } else { "" }
            );
            units.push(TestUnit::new(name, wast, expected_output));
        }
        Ok(units)
    }
}

fn read_text(tree: &mut dyn ResourceTree, root: &str, relative: &str) -> Result<Option<String>, DiscoveryError> {
    match tree.read(relative)? {
        Some(bytes) => String::from_utf8(bytes).map(Some).map_err(|_| DiscoveryError::NotUtf8 {
            path: format!("{}/{}", root, relative),
        }),
        None => Ok(None),
    }
}
