//! A fixture model for running the WebAssembly specification tests.
//!
//! wast-harness turns the official `.wast` test files into units a runner can
//! execute and classify. It does not parse, compile or execute WebAssembly;
//! the text reader, the script converter and the runner are supplied by the
//! caller.
//!
//! # Modules
//!
//! - [`sexpr`] -- The S-expression tree the text reader produces.
//! - [`script`] -- The script model the converter produces and the runner reports on.
//! - [`frontend`] -- Traits for plugging in the reader and converter.
//! - [`unit`] -- [`TestUnit`]: one test file, its expectations, and cached derivations.
//! - [`registry`] -- Discovery of units under resource roots, filtered by an allow-list.
//! - [`storage`] -- Directory and zip/jar backed resource trees.
//! - [`tables`] -- The allow-list and per-test memory ceilings.
//! - [`warning`] -- Which failures are downgraded to warnings.
//!
//! # Example
//!
//! Classify a unit and force its derivations with caller-supplied collaborators:
//!
//! ```
//! use wast_harness::frontend::ParseFailure;
//! use wast_harness::script::Script;
//! use wast_harness::sexpr::SExpr;
//! use wast_harness::TestUnit;
//!
//! let unit = TestUnit::new("nop", "(module)", None);
//! assert!(!unit.should_fail());
//! assert_eq!(unit.default_max_mem_pages(), 20);
//!
//! let parser = |_: &str| -> Result<Vec<SExpr>, ParseFailure> {
//!     Ok(vec![SExpr::list(vec![SExpr::symbol("module")])])
//! };
//! let converter = |_: &SExpr| -> Result<Script, String> { Ok(Script { commands: vec![] }) };
//! assert!(unit.script(&parser, &converter).is_ok());
//! ```

pub mod error;
pub mod frontend;
pub mod registry;
pub mod script;
pub mod sexpr;
pub mod storage;
pub mod tables;
pub mod unit;
pub mod warning;

pub use error::{DiscoveryError, RunError, ScriptAssertionError, UnitError};
pub use registry::{AllowList, Registry};
pub use unit::TestUnit;
