//! Pluggable logging sink.
//!
//! The store only emits informational and debug messages through this
//! trait. Errors are always returned to the caller, never logged instead.

use std::fmt;
use std::str::FromStr;

/// Severity of a log message, most severe first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        Self::Fatal,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// The closest `tracing` level. `tracing` has no fatal level.
    pub fn to_tracing(self) -> tracing::Level {
        match self {
            Self::Fatal | Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown log level: {s:?}"))
    }
}

/// A leveled logging sink injected into the store.
pub trait Logger: Send + Sync {
    /// Emit one message.
    fn log(&self, level: LogLevel, message: fmt::Arguments<'_>);

    /// Whether messages at `level` would be emitted.
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn fatal(&self, message: &str) {
        self.log(LogLevel::Fatal, format_args!("{message}"));
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, format_args!("{message}"));
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, format_args!("{message}"));
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, format_args!("{message}"));
    }

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, format_args!("{message}"));
    }

    fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, format_args!("{message}"));
    }
}

/// Default sink: forwards to `tracing` events, dropping anything more
/// verbose than `max_level`.
///
/// Where the events end up depends on the subscriber the embedding program
/// installs; the `folio` binary uses a console `fmt` subscriber.
#[derive(Clone, Copy, Debug)]
pub struct TracingLogger {
    max_level: LogLevel,
}

impl TracingLogger {
    pub fn new(max_level: LogLevel) -> Self {
        Self { max_level }
    }

    pub fn max_level(&self) -> LogLevel {
        self.max_level
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl Logger for TracingLogger {
    fn enabled(&self, level: LogLevel) -> bool {
        level <= self.max_level
    }

    fn log(&self, level: LogLevel, message: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        match level {
            LogLevel::Fatal => tracing::error!(fatal = true, "{message}"),
            LogLevel::Error => tracing::error!("{message}"),
            LogLevel::Warn => tracing::warn!("{message}"),
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Debug => tracing::debug!("{message}"),
            LogLevel::Trace => tracing::trace!("{message}"),
        }
    }
}
