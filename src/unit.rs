//! A single spec test file and everything derived from it.
//!
//! Identity (name, source text, optional expected output) is fixed at
//! construction. Classification (`should_fail`, `default_max_mem_pages`)
//! depends only on the name. The S-expression forest and the script are
//! computed on first request and cached for the life of the unit.
//!
//! # Thread safety
//!
//! The caches are single-threaded write-once cells (`once_cell::unsync`), so
//! a `TestUnit` is `Send` but not `Sync`. To share units across threads, force
//! [`TestUnit::script`] on each one first, or move each unit to one worker.

use crate::error::{RunError, UnitError};
use crate::frontend::{SExprParser, ScriptConverter};
use crate::script::Script;
use crate::sexpr::SExpr;
use crate::{tables, warning};
use log::trace;
use once_cell::unsync::OnceCell;
use std::fmt;

/// Suffix on a test name whose script as a whole must fail.
pub const FAIL_SUFFIX: &str = ".fail";

/// One discoverable spec test.
#[derive(Debug)]
pub struct TestUnit {
    name: String,
    wast: String,
    expected_output: Option<String>,
    sexprs: OnceCell<Result<Vec<SExpr>, UnitError>>,
    script: OnceCell<Result<Script, UnitError>>,
}

impl TestUnit {
    pub fn new(name: impl Into<String>, wast: impl Into<String>, expected_output: Option<String>) -> Self {
        Self {
            name: name.into(),
            wast: wast.into(),
            expected_output,
            sexprs: OnceCell::new(),
            script: OnceCell::new(),
        }
    }

    /// File name with the `.wast` extension stripped, e.g. `nop` or `load-align-0.fail`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full source text.
    pub fn wast(&self) -> &str {
        &self.wast
    }

    /// Contents of `expected-output/<name>.wast.log`, if that file exists.
    pub fn expected_output(&self) -> Option<&str> {
        self.expected_output.as_deref()
    }

    /// True if running this test must ultimately fail.
    pub fn should_fail(&self) -> bool {
        self.name.ends_with(FAIL_SUFFIX)
    }

    /// Memory-page ceiling for this test's runtime environment.
    pub fn default_max_mem_pages(&self) -> u32 {
        tables::default_max_mem_pages(&self.name)
    }

    /// The top-level S-expressions of the source.
    ///
    /// `parser` is called at most once per unit; later calls return the cached
    /// result, including a cached failure.
    pub fn sexprs<P>(&self, parser: &P) -> Result<&[SExpr], UnitError>
    where
        P: SExprParser + ?Sized,
    {
        self.sexprs
            .get_or_init(|| {
                trace!("parsing {}", self.name);
                parser.parse(&self.wast).map_err(|failure| UnitError::Parse {
                    name: self.name.clone(),
                    pos: failure.pos,
                    message: failure.message,
                })
            })
            .as_ref()
            .map(Vec::as_slice)
            .map_err(Clone::clone)
    }

    /// The converted script.
    ///
    /// The whole forest is handed to `converter` as one list. Each collaborator
    /// is called at most once per unit; a parse failure is returned without
    /// calling `converter`.
    pub fn script<P, C>(&self, parser: &P, converter: &C) -> Result<&Script, UnitError>
    where
        P: SExprParser + ?Sized,
        C: ScriptConverter + ?Sized,
    {
        self.script
            .get_or_init(|| {
                let root = SExpr::list(self.sexprs(parser)?.iter().cloned());
                trace!("converting {}", self.name);
                converter.to_script(&root).map_err(|message| UnitError::Convert {
                    name: self.name.clone(),
                    message,
                })
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// True if `failure` is a known, tolerated divergence for this test.
    pub fn is_warning_instead_of_error(&self, failure: &RunError) -> bool {
        warning::should_warn(&self.name, failure)
    }
}

impl fmt::Display for TestUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Spec unit: {}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScriptAssertionError;
    use crate::frontend::ParseFailure;
    use crate::script::{Action, Assertion, Cmd, ModuleSource};
    use std::cell::Cell;

    /// Splits on whitespace into symbols, failing at the first '!'.
    #[derive(Default)]
    struct CountingParser {
        calls: Cell<usize>,
    }

    impl SExprParser for CountingParser {
        fn parse(&self, source: &str) -> Result<Vec<SExpr>, ParseFailure> {
            self.calls.set(self.calls.get() + 1);
            if let Some(pos) = source.find('!') {
                return Err(ParseFailure::new(pos, "unexpected '!'"));
            }
            Ok(source.split_whitespace().map(SExpr::symbol).collect())
        }
    }

    /// One `Module` command per top-level form.
    #[derive(Default)]
    struct CountingConverter {
        calls: Cell<usize>,
    }

    impl ScriptConverter for CountingConverter {
        fn to_script(&self, root: &SExpr) -> Result<Script, String> {
            self.calls.set(self.calls.get() + 1);
            let forms = root.as_list().ok_or("expected list")?;
            Ok(Script {
                commands: forms
                    .iter()
                    .map(|form| Cmd::Module {
                        name: None,
                        module: ModuleSource::Text(form.clone()),
                    })
                    .collect(),
            })
        }
    }

    // ------------------------------------------------------------------------
    // Classification
    // ------------------------------------------------------------------------

    #[test]
    fn should_fail_follows_name_suffix() {
        assert!(TestUnit::new("load-align-0.fail", "", None).should_fail());
        assert!(!TestUnit::new("block", "", None).should_fail());
        assert!(!TestUnit::new("fail", "", None).should_fail());
        assert!(!TestUnit::new("x.fail.y", "", None).should_fail());
    }

    #[test]
    fn classification_does_not_parse() {
        let parser = CountingParser::default();
        let unit = TestUnit::new("resizing", "!", None);
        assert_eq!(unit.default_max_mem_pages(), 830);
        assert!(!unit.should_fail());
        assert_eq!(parser.calls.get(), 0);
    }

    #[test]
    fn display_names_the_unit() {
        assert_eq!(TestUnit::new("nop", "", None).to_string(), "Spec unit: nop");
    }

    // ------------------------------------------------------------------------
    // Memoization
    // ------------------------------------------------------------------------

    #[test]
    fn sexprs_parsed_once() {
        let parser = CountingParser::default();
        let unit = TestUnit::new("nop", "module nop", None);

        let first = unit.sexprs(&parser).unwrap().to_vec();
        let second = unit.sexprs(&parser).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec![SExpr::symbol("module"), SExpr::symbol("nop")]);
        assert_eq!(parser.calls.get(), 1);
    }

    #[test]
    fn parse_failure_cached_with_name_and_position() {
        let parser = CountingParser::default();
        let unit = TestUnit::new("comments", "(module) !", None);

        let err = unit.sexprs(&parser).unwrap_err();
        assert_eq!(
            err,
            UnitError::Parse {
                name: "comments".to_string(),
                pos: 9,
                message: "unexpected '!'".to_string(),
            }
        );
        assert_eq!(unit.sexprs(&parser).unwrap_err(), err);
        assert_eq!(parser.calls.get(), 1);
    }

    #[test]
    fn script_converted_once_from_whole_forest() {
        let parser = CountingParser::default();
        let converter = CountingConverter::default();
        let unit = TestUnit::new("fac", "a b c", None);

        let script = unit.script(&parser, &converter).unwrap();
        assert_eq!(script.commands.len(), 3);
        assert!(std::ptr::eq(script, unit.script(&parser, &converter).unwrap()));
        assert_eq!(parser.calls.get(), 1);
        assert_eq!(converter.calls.get(), 1);
    }

    #[test]
    fn script_reuses_cached_forest() {
        let parser = CountingParser::default();
        let converter = CountingConverter::default();
        let unit = TestUnit::new("fac", "a", None);

        unit.sexprs(&parser).unwrap();
        unit.script(&parser, &converter).unwrap();
        assert_eq!(parser.calls.get(), 1);
    }

    #[test]
    fn script_skips_converter_on_parse_failure() {
        let parser = CountingParser::default();
        let converter = CountingConverter::default();
        let unit = TestUnit::new("bad", "!", None);

        assert!(matches!(unit.script(&parser, &converter), Err(UnitError::Parse { .. })));
        assert!(matches!(unit.script(&parser, &converter), Err(UnitError::Parse { .. })));
        assert_eq!(parser.calls.get(), 1);
        assert_eq!(converter.calls.get(), 0);
    }

    #[test]
    fn conversion_failure_cached() {
        let parser = CountingParser::default();
        let calls = Cell::new(0);
        let converter = |_: &SExpr| -> Result<Script, String> {
            calls.set(calls.get() + 1);
            Err("unknown command".to_string())
        };
        let unit = TestUnit::new("start", "x", None);

        let err = unit.script(&parser, &converter).unwrap_err();
        assert_eq!(err.to_string(), "start Script conversion fail: unknown command");
        assert!(unit.script(&parser, &converter).is_err());
        assert_eq!(calls.get(), 1);
    }

    // ------------------------------------------------------------------------
    // Warnings
    // ------------------------------------------------------------------------

    #[test]
    fn warning_uses_unit_name() {
        let failure: RunError = ScriptAssertionError {
            assertion: Assertion::ReturnNan {
                action: Action::Invoke {
                    module: None,
                    name: "f32.sqrt".to_string(),
                    args: vec![],
                },
            },
            message: "expected NaN".to_string(),
        }
        .into();
        assert!(TestUnit::new("float_exprs", "", None).is_warning_instead_of_error(&failure));
        assert!(!TestUnit::new("f32", "", None).is_warning_instead_of_error(&failure));
    }
}
