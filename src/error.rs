//! Error types for discovery, per-unit derivation, and script execution.

use crate::script::Assertion;

/// A configured resource root could not be located or read.
///
/// Any of these aborts the whole enumeration call.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("resource root {0:?} must not end with '/'")]
    InvalidRoot(String),
    #[error("resource root {root:?} not found in {base}")]
    RootNotFound { root: String, base: String },
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("archive error reading {path}: {source}")]
    Archive {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("{path} is not valid UTF-8")]
    NotUtf8 { path: String },
    #[error("invalid allow-list: {0}")]
    AllowList(#[from] serde_json::Error),
}

/// A test unit's script could not be constructed.
///
/// Cloneable because a memoized failure is handed out on every access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    #[error("{name}[{pos}] Parse fail: {message}")]
    Parse { name: String, pos: usize, message: String },
    #[error("{name} Script conversion fail: {message}")]
    Convert { name: String, message: String },
}

/// An executed assertion did not hold.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("assertion failed: {message}")]
pub struct ScriptAssertionError {
    pub assertion: Assertion,
    pub message: String,
}

/// A failure reported by the external script runner.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Assertion(#[from] ScriptAssertionError),
    #[error("Trap: {0}")]
    Trap(String),
    #[error("{0}")]
    Other(String),
}
