//! Reporter that records results instead of panicking.
//!
//! Useful for testing assertion behaviour itself, where a failed assertion is
//! the expected result.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use formtest_core::application::ports::AssertionReporter;

/// One reported assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub passed: bool,
    pub message: String,
}

/// Collects every reported assertion. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    reports: Arc<Mutex<Vec<Report>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every report, in order.
    pub fn reports(&self) -> Vec<Report> {
        self.lock().clone()
    }

    /// Messages of failed assertions, in order.
    pub fn failures(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|r| !r.passed)
            .map(|r| r.message.clone())
            .collect()
    }

    pub fn pass_count(&self) -> usize {
        self.lock().iter().filter(|r| r.passed).count()
    }

    pub fn has_failures(&self) -> bool {
        self.lock().iter().any(|r| !r.passed)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// The log as pretty JSON, for dumping into test output.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&*self.lock()).unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Report>> {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AssertionReporter for RecordingReporter {
    fn assert_true(&self, condition: bool, message: &str) {
        self.lock().push(Report {
            passed: condition,
            message: message.to_string(),
        });
    }

    fn fail(&self, message: &str) {
        self.assert_true(false, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_passes_and_failures_in_order() {
        let reporter = RecordingReporter::new();
        reporter.succeed("ok");
        reporter.fail("broken");
        reporter.assert_contains("x", &["y".to_string()], "missing x");

        assert_eq!(reporter.pass_count(), 1);
        assert_eq!(reporter.failures(), vec!["broken", "missing x"]);
        assert!(reporter.has_failures());
        assert!(reporter.to_json().contains("\"passed\": false"));

        reporter.clear();
        assert!(reporter.reports().is_empty());
    }
}
