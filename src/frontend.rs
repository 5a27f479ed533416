//! Seams for the text reader and the script converter.
//!
//! Neither is implemented here. A test unit calls through these traits the
//! first time its forest or script is requested and caches what comes back.

use crate::script::Script;
use crate::sexpr::SExpr;

/// A reader failure: where in the source text it happened and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// Offset into the source text.
    pub pos: usize,
    pub message: String,
}

impl ParseFailure {
    pub fn new(pos: usize, message: impl Into<String>) -> Self {
        Self {
            pos,
            message: message.into(),
        }
    }
}

/// Reads source text into a forest of top-level S-expressions.
pub trait SExprParser {
    fn parse(&self, source: &str) -> Result<Vec<SExpr>, ParseFailure>;
}

/// Converts a whole script, given as one list of its top-level forms, into
/// the structured [`Script`] model.
pub trait ScriptConverter {
    fn to_script(&self, root: &SExpr) -> Result<Script, String>;
}

impl<F> SExprParser for F
where
    F: Fn(&str) -> Result<Vec<SExpr>, ParseFailure>,
{
    fn parse(&self, source: &str) -> Result<Vec<SExpr>, ParseFailure> {
        self(source)
    }
}

impl<F> ScriptConverter for F
where
    F: Fn(&SExpr) -> Result<Script, String>,
{
    fn to_script(&self, root: &SExpr) -> Result<Script, String> {
        self(root)
    }
}
