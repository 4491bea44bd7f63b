// Fleet Reconciliation - Core Library
// Exposes all modules for use in the CLI, API server, and tests

pub mod model;
pub mod diagnostics;
pub mod size_class;
pub mod normalizer;
pub mod consolidator;
pub mod classifier;
pub mod reconciliation;
pub mod report;
pub mod sources;
pub mod pipeline;

// Re-export commonly used types
pub use model::{
    Attributes, InventoryRecord, OwnedUnit, PartUnit, RawShipRecord, SourceCategory,
    ITEM_TYPE_PART, ITEM_TYPE_SHIP,
};
pub use diagnostics::{
    DiagnosticCategory, DiagnosticEvent, DiagnosticSink, MemorySink, NullSink, Severity,
    StderrSink,
};
pub use size_class::SizeClass;
pub use normalizer::{normalize, normalize_all};
pub use consolidator::{consolidate, ConsolidatedGroup};
pub use classifier::{classify, PartGroup, PART_SYMBOL_SUFFIX};
pub use reconciliation::{
    PairStatus, ReconciliationEngine, ReconciliationEntry, ReconciliationOutcome,
    ReconciliationReport, SourceCounts, UnmatchedPart, UnmatchedShip, PART_NAME_SUFFIX,
};
pub use report::render;
pub use sources::{HoldingsProvider, SnapshotProvider};
pub use pipeline::{gather_holdings, reconcile_ownership, Holdings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
