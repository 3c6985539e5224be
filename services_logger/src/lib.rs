//! # Logger Service
//!
//! This crate implements structured logging.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not text-based or printf-style.
//! Loggers are handed to components at construction; there is no global
//! logger to install.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A structured log entry
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Emitting component (if known)
    pub component: Option<String>,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            component: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Sets the emitting component
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((key.into(), value.to_string()));
        self
    }

    /// Returns the value of the first field named `key`
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.level)?;
        if let Some(component) = &self.component {
            write!(f, " {}:", component)?;
        }
        write!(f, " {}", self.message)?;
        for (key, value) in &self.fields {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

/// Destination for log entries
pub trait LogSink {
    fn record(&self, entry: LogEntry);
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogSink;

impl LogSink for NullLogSink {
    fn record(&self, _entry: LogEntry) {}
}

/// Sink that keeps entries in memory for inspection
///
/// Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryLogSink {
    entries: Rc<RefCell<Vec<LogEntry>>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded entries
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Returns entries at or above `level`
    pub fn entries_at(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.level >= level)
            .cloned()
            .collect()
    }

    /// True if any entry's message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|entry| entry.message.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl LogSink for MemoryLogSink {
    fn record(&self, entry: LogEntry) {
        self.entries.borrow_mut().push(entry);
    }
}

/// Component-scoped logger
///
/// Stamps every entry with its component and drops entries below the
/// minimum level before they reach the sink.
#[derive(Clone)]
pub struct Logger {
    component: String,
    min_level: LogLevel,
    sink: Rc<dyn LogSink>,
}

impl Logger {
    /// Creates a logger writing to `sink`
    pub fn new(component: impl Into<String>, sink: Rc<dyn LogSink>) -> Self {
        Self {
            component: component.into(),
            min_level: LogLevel::Debug,
            sink,
        }
    }

    /// Creates a logger that discards everything
    pub fn null(component: impl Into<String>) -> Self {
        Self::new(component, Rc::new(NullLogSink))
    }

    /// Sets the minimum level
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// Starts an entry at `level` for this component
    pub fn entry(&self, level: LogLevel, message: impl Into<String>) -> LogEntry {
        LogEntry::new(level, message).with_component(self.component.clone())
    }

    /// Records a prepared entry
    pub fn log(&self, entry: LogEntry) {
        if entry.level >= self.min_level {
            self.sink.record(entry);
        }
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(self.entry(LogLevel::Debug, message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(self.entry(LogLevel::Info, message));
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(self.entry(LogLevel::Warn, message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(self.entry(LogLevel::Error, message));
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("component", &self.component)
            .field("min_level", &self.min_level)
            .finish()
    }
}
