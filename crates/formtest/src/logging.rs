//! Tracing subscriber initialisation.
//!
//! Only this crate installs a subscriber; `formtest-core` and
//! `formtest-adapters` only *emit* spans and events.
//!
//! Output goes through the test writer, so it is captured per test and shown
//! only for failing tests (or with `--nocapture`).
//!
//! `RUST_LOG` overrides the configured level if set.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::FormTestConfig;

static INIT: OnceLock<Result<(), String>> = OnceLock::new();

/// Install the global tracing subscriber for this test binary.
///
/// Safe to call from every test: the first call installs the subscriber and
/// its result is returned to every later caller.
pub fn init_logging(config: &FormTestConfig) -> anyhow::Result<()> {
    INIT.get_or_init(|| install(normalize_level(&config.log_level)))
        .clone()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

fn install(level: &str) -> Result<(), String> {
    // RUST_LOG wins; otherwise every formtest crate gets the same level.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_test_writer();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| e.to_string())
}

fn directives(level: &str) -> String {
    format!("formtest={level},formtest_core={level},formtest_adapters={level}")
}

/// Map a configured level to a filter level. Unknown values fall back to WARN.
fn normalize_level(level: &str) -> &'static str {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" | "none" => "off",
        "error" | "quiet" => "error",
        "info" => "info",
        "debug" => "debug",
        "trace" => "trace",
        _ => "warn",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_pass_through() {
        for level in ["off", "error", "warn", "info", "debug", "trace"] {
            assert_eq!(normalize_level(level), level);
        }
    }

    #[test]
    fn levels_are_case_insensitive() {
        assert_eq!(normalize_level(" DEBUG "), "debug");
    }

    #[test]
    fn unknown_level_defaults_to_warn() {
        assert_eq!(normalize_level("loud"), "warn");
        assert_eq!(normalize_level(""), "warn");
    }

    #[test]
    fn directives_cover_every_crate() {
        let d = directives("info");
        assert!(d.contains("formtest=info"));
        assert!(d.contains("formtest_core=info"));
        assert!(d.contains("formtest_adapters=info"));
    }

    #[test]
    fn repeated_init_returns_the_first_result() {
        let config = FormTestConfig::default();
        let first = init_logging(&config).is_ok();
        let second = init_logging(&config).is_ok();
        assert_eq!(first, second);
    }
}
