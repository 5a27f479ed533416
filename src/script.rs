//! AST types for WebAssembly Script Test (.wast) files.
//!
//! A .wast file is a sequence of commands that define modules, register them
//! for cross-module linking, invoke exported functions, and assert expected
//! behaviour (return values, traps, validation failures, etc.).
//!
//! This crate does not build these itself: an external [`ScriptConverter`]
//! produces them from the S-expression forest, and an external runner reports
//! assertion mismatches in terms of them.
//!
//! [`ScriptConverter`]: crate::frontend::ScriptConverter

use crate::sexpr::SExpr;

/// A converted .wast script containing a sequence of test commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub commands: Vec<Cmd>,
}

/// A top-level command in a .wast file.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Define a module, optionally named.
    Module { name: Option<String>, module: ModuleSource },

    /// Register the most recent (or named) module under a string name for imports.
    Register { as_name: String, module_name: Option<String> },

    /// Top-level action (invoke without assertion).
    Action(Action),

    /// An expected-behaviour check.
    Assertion(Assertion),
}

/// How a module is provided in a .wast file.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleSource {
    /// Inline text: `(module ...)`, kept as its S-expression.
    Text(SExpr),

    /// Binary module: `(module binary "\00asm" ...)`.
    /// Concatenated raw bytes of the string literals.
    Binary(Vec<u8>),

    /// Quoted text module: `(module quote "(func ...)" ...)`.
    Quote(String),
}

/// An assertion within a script.
#[derive(Debug, Clone, PartialEq)]
pub enum Assertion {
    /// The action returns exactly these values.
    Return { action: Action, expected: Vec<Const> },

    /// The action returns a NaN, with any bit pattern.
    ReturnNan { action: Action },

    /// The action traps with the expected message.
    Trap { action: Action, message: String },

    /// Module instantiation traps.
    TrapModule { module: ModuleSource, message: String },

    /// The module fails validation.
    Invalid { module: ModuleSource, message: String },

    /// The module fails to parse.
    Malformed { module: ModuleSource, message: String },

    /// The module fails to link.
    Unlinkable { module: ModuleSource, message: String },

    /// The action exhausts resources (e.g. call stack).
    Exhaustion { action: Action, message: String },
}

impl Assertion {
    /// The action this assertion runs, if it runs one.
    pub fn action(&self) -> Option<&Action> {
        match self {
            Assertion::Return { action, .. }
            | Assertion::ReturnNan { action }
            | Assertion::Trap { action, .. }
            | Assertion::Exhaustion { action, .. } => Some(action),
            Assertion::TrapModule { .. }
            | Assertion::Invalid { .. }
            | Assertion::Malformed { .. }
            | Assertion::Unlinkable { .. } => None,
        }
    }
}

/// An action within an assertion or at top level.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Invoke an exported function: `(invoke $mod? "name" args...)`.
    Invoke {
        module: Option<String>,
        name: String,
        args: Vec<Const>,
    },

    /// Read an exported global: `(get $mod? "name")`.
    Get { module: Option<String>, name: String },
}

impl Action {
    /// The export name this action targets.
    pub fn export_name(&self) -> &str {
        match self {
            Action::Invoke { name, .. } | Action::Get { name, .. } => name,
        }
    }
}

/// A typed constant used as an argument or expected result.
///
/// Floats are kept as raw bits so NaN payloads survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Const {
    I32(u32),
    I64(u64),
    F32(u32),
    F64(u64),
}
