//! Console logger implementation

use std::env;

use super::traits::{LogLevel, Logger};

/// Environment variable read by [`ConsoleLogger::from_env`]
pub const LOG_LEVEL_VAR: &str = "STAGECONF_LOG_LEVEL";

/// A logger that writes to stderr, or stdout for `INFO`
///
/// Messages below the minimum level are dropped.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    min_level: LogLevel,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Logger with the `[stageconf]` prefix at `INFO`
    pub fn new() -> Self {
        Self {
            prefix: "[stageconf]".to_string(),
            min_level: LogLevel::Info,
        }
    }

    /// Logger whose minimum level comes from `STAGECONF_LOG_LEVEL`
    ///
    /// Unset or unrecognized values fall back to `INFO`.
    pub fn from_env() -> Self {
        let min_level = env::var(LOG_LEVEL_VAR)
            .ok()
            .and_then(|v| LogLevel::parse(&v))
            .unwrap_or(LogLevel::Info);
        Self::new().with_min_level(min_level)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn format(&self, level: LogLevel, message: &str) -> String {
        format!("{} {}: {}", self.prefix, level, message)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        match level {
            LogLevel::Info => println!("{}", self.format(level, message)),
            _ => eprintln!("{}", self.format(level, message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logger_defaults() {
        let logger = ConsoleLogger::new();
        assert_eq!(logger.prefix, "[stageconf]");
        assert!(logger.enabled(LogLevel::Info));
        assert!(!logger.enabled(LogLevel::Debug));
    }

    #[test]
    fn test_console_logger_format() {
        let logger = ConsoleLogger::new().with_prefix("[svc]");
        assert_eq!(logger.format(LogLevel::Warn, "skipped"), "[svc] WARN: skipped");
    }

    #[test]
    fn test_console_logger_min_level() {
        let logger = ConsoleLogger::new().with_min_level(LogLevel::Error);
        assert!(!logger.enabled(LogLevel::Warn));
        assert!(logger.enabled(LogLevel::Error));
        // Filtered and emitted messages must not panic
        logger.warn("dropped");
        logger.error("emitted");
    }
}
