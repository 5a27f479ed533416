//! Which assertion failures are downgraded to warnings, per test.
//!
//! A runner that sees a failure asks [`should_warn`]. Tests with no
//! registered predicate get no leniency at all.

use crate::error::RunError;
use crate::script::{Action, Assertion};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Decides whether a runner failure is acceptable for one test.
pub type WarningPredicate = fn(&RunError) -> bool;

static WARNING_PREDICATES: Lazy<HashMap<&'static str, WarningPredicate>> = Lazy::new(|| {
    let mut predicates: HashMap<&'static str, WarningPredicate> = HashMap::new();
    // Payload bits of a NaN result are implementation-defined
    predicates.insert("float_literals", is_nan_mismatch);
    predicates.insert("float_exprs", is_nan_mismatch);
    predicates
});

/// Returns true if `failure` in the test named `name` should be reported as
/// a warning instead of an error.
pub fn should_warn(name: &str, failure: &RunError) -> bool {
    WARNING_PREDICATES
        .get(name)
        .map(|predicate| predicate(failure))
        .unwrap_or(false)
}

/// True for an assertion mismatch where the expected result was a NaN.
///
/// WebAssembly leaves some NaN bit patterns to the implementation, so a
/// different NaN is still conforming. This covers `assert_return_nan`, and
/// `assert_return` on an invoked export whose name mentions `nan`.
pub fn is_nan_mismatch(failure: &RunError) -> bool {
    let assertion = match failure {
        RunError::Assertion(err) => &err.assertion,
        RunError::Trap(_) | RunError::Other(_) => return false,
    };
    match assertion {
        Assertion::ReturnNan { .. } => true,
        Assertion::Return {
            action: Action::Invoke { name, .. },
            ..
        } => name.contains("nan"),
        _ => false,
    }
}
