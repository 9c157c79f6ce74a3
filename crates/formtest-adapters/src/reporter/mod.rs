//! Assertion reporter adapters.

mod recording;

pub use recording::{RecordingReporter, Report};
