//! Default assertion reporter.

use tracing::trace;

use crate::application::ports::AssertionReporter;

/// Reports failures the way `assert!` does: by panicking.
///
/// This is what `cargo test` treats as a failed test.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicReporter;

impl AssertionReporter for PanicReporter {
    fn assert_true(&self, condition: bool, message: &str) {
        if !condition {
            self.fail(message);
        }
        trace!(assertion = message, "assertion passed");
    }

    fn fail(&self, message: &str) {
        panic!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_assertions_do_not_panic() {
        let reporter = PanicReporter;
        reporter.assert_true(true, "unused");
        reporter.assert_false(false, "unused");
        reporter.assert_contains("b", &["a".into(), "b".into()], "unused");
        reporter.succeed("done");
    }

    #[test]
    #[should_panic(expected = "Failed to find key")]
    fn failing_assertion_panics_with_message() {
        PanicReporter.assert_true(false, "Failed to find key");
    }

    #[test]
    #[should_panic(expected = "missing message")]
    fn missing_needle_panics() {
        PanicReporter.assert_contains("c", &["a".into()], "missing message");
    }
}
