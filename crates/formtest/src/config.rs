//! Harness configuration.
//!
//! [`FormTestConfig`] is loaded once per test binary and turned into the
//! core's [`TesterOptions`]. The core crate never sees configuration sources.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables prefixed with `FORMTEST_` (a `.env` file in the
//!    working directory is loaded first, without overriding real variables)
//! 2. The explicit config file passed to [`FormTestConfig::load`]
//! 3. `formtest.toml` (or `.json`, `.yaml`) in the working directory, if present
//! 4. Built-in defaults (always present)

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use formtest_core::{application::TesterOptions, domain::HttpMethod};

use crate::error::{FormTestError, FormTestResult};

/// Harness configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormTestConfig {
    /// Tracing filter level for the formtest crates (`RUST_LOG` still wins).
    pub log_level: String,
    /// URI used when a scenario sets no route.
    pub default_route: String,
    /// Method used when a scenario sets no method.
    pub default_method: String,
    /// Include the JSON-encoded errors in "Validation failed" messages.
    pub verbose_failures: bool,
}

impl Default for FormTestConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
            default_route: "/".into(),
            default_method: "GET".into(),
            verbose_failures: true,
        }
    }
}

impl FormTestConfig {
    /// Load configuration from the process environment and files.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        // A missing .env file is the common case.
        let _ = dotenvy::dotenv();
        Self::load_from(config_file, None)
    }

    /// Load configuration with an explicit environment map instead of the
    /// process environment.
    pub fn load_from(
        config_file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("log_level", defaults.log_level)?
            .set_default("default_route", defaults.default_route)?
            .set_default("default_method", defaults.default_method)?
            .set_default("verbose_failures", defaults.verbose_failures)?
            .add_source(File::with_name("formtest").required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let environment = Environment::with_prefix("FORMTEST")
            .try_parsing(true)
            .source(env);

        builder
            .add_source(environment)
            .build()
            .context("Failed to read formtest configuration")?
            .try_deserialize()
            .context("Invalid formtest configuration")
    }

    /// Convert into the options the core tester understands.
    pub fn tester_options(&self) -> FormTestResult<TesterOptions> {
        let default_method: HttpMethod =
            self.default_method
                .parse()
                .map_err(|e: formtest_core::domain::DomainError| FormTestError::Config {
                    message: format!("default_method: {e}"),
                    source: Some(Box::new(e)),
                })?;

        Ok(TesterOptions {
            default_route: self.default_route.clone(),
            default_method,
            verbose_failures: self.verbose_failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = FormTestConfig::load_from(None, env(&[])).unwrap();
        assert_eq!(cfg, FormTestConfig::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = FormTestConfig::load_from(
            None,
            env(&[
                ("FORMTEST_DEFAULT_ROUTE", "/api"),
                ("FORMTEST_VERBOSE_FAILURES", "false"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.default_route, "/api");
        assert!(!cfg.verbose_failures);
        assert_eq!(cfg.log_level, "warn");
    }

    #[test]
    fn file_is_read_and_env_still_wins() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "log_level = \"debug\"\ndefault_method = \"post\"").unwrap();

        let cfg = FormTestConfig::load_from(
            Some(file.path()),
            env(&[("FORMTEST_LOG_LEVEL", "trace")]),
        )
        .unwrap();

        assert_eq!(cfg.log_level, "trace");
        assert_eq!(cfg.default_method, "post");
        assert_eq!(
            cfg.tester_options().unwrap().default_method,
            HttpMethod::Post
        );
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = FormTestConfig::load_from(Some(Path::new("/definitely/not/here.toml")), env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_default_method_is_rejected() {
        let cfg = FormTestConfig {
            default_method: "brew".into(),
            ..FormTestConfig::default()
        };
        let err = cfg.tester_options().unwrap_err();
        assert!(err.to_string().contains("default_method"));
    }
}
