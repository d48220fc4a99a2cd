//! Diagnostic channels for fail-soft parsing.
//!
//! A failed parse is reported once through a [`DiagnosticSink`]. The default
//! sink forwards to `tracing` at warn level, which is where an operator sees
//! it; tests install a [`MemorySink`] to inspect what was reported.

use std::sync::Mutex;

use tracing::warn;

/// A single reported parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Label of the configuration field that failed.
    pub context: String,
    /// Human-readable explanation.
    pub message: String,
}

/// Receiver for parse diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Record that the field labelled `context` failed to parse.
    fn report(&self, context: &str, message: &str);
}

/// Sink that emits each diagnostic as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, context: &str, message: &str) {
        warn!(context = %context, "{}", message);
    }
}

/// Sink that keeps diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, oldest first.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of diagnostics reported so far.
    pub fn len(&self) -> usize {
        self.diagnostics().len()
    }

    /// Whether nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, context: &str, message: &str) {
        let diagnostic = Diagnostic {
            context: context.to_string(),
            message: message.to_string(),
        };
        match self.records.lock() {
            Ok(mut records) => records.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}
