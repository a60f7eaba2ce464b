//! Runtime settings, read once at start-up
//!
//! The only runtime input is the `DEBUG` environment variable. It enables
//! debug output only when it equals the exact string `"true"`; values like
//! `"1"` or `"TRUE"` are ignored.

use config::{Config, ConfigError, Environment, Map};

use crate::cli::CliError;
use crate::logger::LogLevel;

/// Environment variable gating debug output.
pub const DEBUG_VAR: &str = "DEBUG";

/// Settings resolved from the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// `DEBUG=true` was set
    pub debug: bool,
}

impl Settings {
    /// Load settings from the current process environment.
    ///
    /// Only [`DEBUG_VAR`] is read; other variables may hold non-UTF-8 data.
    /// A non-UTF-8 `DEBUG` value cannot equal `"true"` and is dropped.
    pub fn load() -> Result<Self, CliError> {
        let debug = std::env::var_os(DEBUG_VAR).and_then(|v| v.into_string().ok());
        Self::from_vars(debug.map(|v| (DEBUG_VAR, v)))
    }

    /// Load settings from an explicit list of environment variables.
    ///
    /// Variables other than [`DEBUG_VAR`] are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let snapshot: Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k == DEBUG_VAR)
            .collect();

        // Keep raw strings: config would otherwise accept "1", "yes", "on"
        let config = Config::builder()
            .add_source(
                Environment::default()
                    .source(Some(snapshot))
                    .try_parsing(false),
            )
            .build()
            .map_err(config_err)?;

        let enabled = match config.get_string("debug") {
            Ok(value) => value == "true",
            Err(ConfigError::NotFound(_)) => false,
            Err(e) => return Err(config_err(e)),
        };

        Ok(Self { debug: enabled })
    }

    /// Level for the console logger.
    pub fn log_level(&self) -> LogLevel {
        if self.debug {
            LogLevel::Debug
        } else {
            LogLevel::Info
        }
    }
}

fn config_err(e: ConfigError) -> CliError {
    CliError::Config(e.to_string())
}
