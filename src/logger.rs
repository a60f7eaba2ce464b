//! Console logger for command handlers
//!
//! Writes `[INFO]`, `[DEBUG]` and `[ERROR]` prefixed lines to stdout (or any
//! writer). Debug lines are only emitted when the logger is built with
//! [`LogLevel::Debug`]; the level is fixed at construction.
//!
//! This is user-facing output. Internal diagnostics go through `tracing`.

use std::io::{self, Write};
use std::sync::Mutex;

/// Lowest severity a [`ConsoleLogger`] emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
}

/// Logging capability handed to command handlers.
pub trait Logger: Send + Sync {
    fn info(&self, msg: &str);

    /// No-op unless debug logging is enabled.
    fn debug(&self, msg: &str);

    fn error(&self, msg: &str);
}

/// Logger writing prefixed lines to a writer.
pub struct ConsoleLogger<W: Write + Send> {
    level: LogLevel,
    writer: Mutex<W>,
}

impl ConsoleLogger<io::Stdout> {
    pub fn stdout(level: LogLevel) -> Self {
        Self::new(level, io::stdout())
    }
}

impl<W: Write + Send> ConsoleLogger<W> {
    pub fn new(level: LogLevel, writer: W) -> Self {
        Self {
            level,
            writer: Mutex::new(writer),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn debug_enabled(&self) -> bool {
        self.level <= LogLevel::Debug
    }

    /// Consume the logger and return its writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_line(&self, prefix: &str, msg: &str) {
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Logging must never fail the caller
        if let Err(e) = writeln!(writer, "[{}] {}", prefix, msg) {
            tracing::warn!("console logger write failed: {}", e);
        }
    }
}

impl<W: Write + Send> Logger for ConsoleLogger<W> {
    fn info(&self, msg: &str) {
        self.write_line("INFO", msg);
    }

    fn debug(&self, msg: &str) {
        if self.debug_enabled() {
            self.write_line("DEBUG", msg);
        }
    }

    fn error(&self, msg: &str) {
        self.write_line("ERROR", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(logger: ConsoleLogger<Vec<u8>>) -> String {
        String::from_utf8(logger.into_inner()).unwrap()
    }

    #[test]
    fn given_info_level_when_logging_then_debug_is_suppressed() {
        let logger = ConsoleLogger::new(LogLevel::Info, Vec::new());

        logger.info("starting");
        logger.debug("hidden");
        logger.error("boom");

        assert_eq!(output(logger), "[INFO] starting\n[ERROR] boom\n");
    }

    #[test]
    fn given_debug_level_when_logging_then_debug_is_written() {
        let logger = ConsoleLogger::new(LogLevel::Debug, Vec::new());

        logger.debug("details");

        assert_eq!(output(logger), "[DEBUG] details\n");
    }

    #[test]
    fn default_level_is_info() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
        assert!(!ConsoleLogger::new(LogLevel::default(), Vec::new()).debug_enabled());
    }
}
