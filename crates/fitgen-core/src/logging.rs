//! Explicit logger handle passed to every pipeline stage
//!
//! Stages never log through a process-wide handle of their own. They receive a
//! [`Logger`] (usually through [`GeneratorOptions`](crate::GeneratorOptions))
//! and write through it. The default sink forwards to `tracing`; tests swap
//! in a [`MemorySink`] to capture lines without touching global state.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::Level;

/// Destination for log lines emitted by pipeline stages
pub trait LogSink: Send + Sync {
    /// Record a single line at the given level
    fn log(&self, level: Level, message: &str);
}

/// Sink that forwards every line to `tracing` under the `fitgen` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!(target: "fitgen", "{message}"),
            Level::WARN => tracing::warn!(target: "fitgen", "{message}"),
            Level::INFO => tracing::info!(target: "fitgen", "{message}"),
            Level::DEBUG => tracing::debug!(target: "fitgen", "{message}"),
            Level::TRACE => tracing::trace!(target: "fitgen", "{message}"),
        }
    }
}

/// Sink that keeps every line in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far, in order, at any level
    pub fn lines(&self) -> Vec<String> {
        self.entries().into_iter().map(|(_, line)| line).collect()
    }

    /// Messages recorded so far together with their level
    pub fn entries(&self) -> Vec<(Level, String)> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: Level, message: &str) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push((level, message.to_string()));
    }
}

/// Cheaply cloneable logging handle
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
}

impl Logger {
    /// Create a logger writing to the given sink
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Logger backed by `tracing`
    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingSink))
    }

    /// Logger backed by a fresh [`MemorySink`], returned alongside it
    pub fn memory() -> (Self, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (Self::new(sink.clone()), sink)
    }

    /// Log at info level
    pub fn info(&self, message: impl AsRef<str>) {
        self.sink.log(Level::INFO, message.as_ref());
    }

    /// Log at debug level
    pub fn debug(&self, message: impl AsRef<str>) {
        self.sink.log(Level::DEBUG, message.as_ref());
    }

    /// Log at warn level
    pub fn warn(&self, message: impl AsRef<str>) {
        self.sink.log(Level::WARN, message.as_ref());
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::tracing()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}
