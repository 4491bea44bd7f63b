// 📋 Diagnostics - Structured events instead of console logging
// Every pipeline stage reports skipped/degraded records through a sink

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

// ============================================================================
// EVENT SHAPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    /// Ship record with no resolvable symbol (excluded from matching)
    MissingSymbol,

    /// Part record whose symbol does not end in the part suffix
    BadPartSuffix,

    /// A per-category collaborator lookup failed and degraded to empty
    FetchFailed,

    /// Per-source record counts after aggregation
    SourceSummary,
}

impl DiagnosticCategory {
    pub fn name(&self) -> &str {
        match self {
            DiagnosticCategory::MissingSymbol => "missing-symbol",
            DiagnosticCategory::BadPartSuffix => "bad-part-suffix",
            DiagnosticCategory::FetchFailed => "fetch-failed",
            DiagnosticCategory::SourceSummary => "source-summary",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticEvent {
    pub category: DiagnosticCategory,
    pub severity: Severity,

    /// The affected record or source (mint, symbol, or category name)
    pub subject: String,

    /// Human-readable detail
    pub detail: String,
}

impl DiagnosticEvent {
    pub fn new(
        category: DiagnosticCategory,
        severity: Severity,
        subject: &str,
        detail: String,
    ) -> Self {
        DiagnosticEvent {
            category,
            severity,
            subject: subject.to_string(),
            detail,
        }
    }
}

// ============================================================================
// SINKS
// ============================================================================

/// Injectable observer for diagnostic events
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, event: DiagnosticEvent);
}

/// Discards every event
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _event: DiagnosticEvent) {}
}

/// Collects events in memory (used by tests and the HTTP handler)
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, category: DiagnosticCategory) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.category == category)
            .count()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, event: DiagnosticEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Writes one line per event to stderr (used by the binaries)
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn emit(&self, event: DiagnosticEvent) {
        eprintln!(
            "[{:?}] {}: {} ({})",
            event.severity,
            event.category.name(),
            event.detail,
            event.subject
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_collects_and_counts() {
        let sink = MemorySink::new();

        sink.emit(DiagnosticEvent::new(
            DiagnosticCategory::MissingSymbol,
            Severity::Warning,
            "mint-1",
            "ship without symbol".to_string(),
        ));
        sink.emit(DiagnosticEvent::new(
            DiagnosticCategory::FetchFailed,
            Severity::Error,
            "staked",
            "lookup failed".to_string(),
        ));

        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.count(DiagnosticCategory::MissingSymbol), 1);
        assert_eq!(sink.count(DiagnosticCategory::BadPartSuffix), 0);
    }

    #[test]
    fn test_null_sink_discards() {
        let sink = NullSink;
        sink.emit(DiagnosticEvent::new(
            DiagnosticCategory::SourceSummary,
            Severity::Info,
            "wallet",
            "0 records".to_string(),
        ));
    }
}
