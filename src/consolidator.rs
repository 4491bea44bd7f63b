// 🧮 Consolidator - Merge ship units sharing a symbol
// First occurrence is the representative; quantities sum associatively

use crate::diagnostics::{DiagnosticCategory, DiagnosticEvent, DiagnosticSink, Severity};
use crate::model::OwnedUnit;
use crate::size_class::SizeClass;
use std::collections::BTreeMap;

/// One consolidated ship group, keyed by symbol
#[derive(Debug, Clone)]
pub struct ConsolidatedGroup {
    pub symbol: String,

    /// Member units in first-seen order; `units[0]` is the representative
    pub units: Vec<OwnedUnit>,

    pub total_quantity: u64,

    /// Resolved once per group, for display ordering and reporting
    pub size_class: SizeClass,
}

impl ConsolidatedGroup {
    pub fn representative(&self) -> &OwnedUnit {
        &self.units[0]
    }
}

/// Group ship units by symbol, summing quantities
///
/// Units without a symbol are skipped and reported, never merged. Totals are
/// independent of input order; only the representative is first-seen.
pub fn consolidate(
    units: Vec<OwnedUnit>,
    sink: &dyn DiagnosticSink,
) -> BTreeMap<String, ConsolidatedGroup> {
    let mut groups: BTreeMap<String, ConsolidatedGroup> = BTreeMap::new();

    for unit in units {
        let symbol = match &unit.symbol {
            Some(symbol) => symbol.clone(),
            None => {
                sink.emit(DiagnosticEvent::new(
                    DiagnosticCategory::MissingSymbol,
                    Severity::Info,
                    &unit.mint,
                    format!("excluded from consolidation: {}", unit.name),
                ));
                continue;
            }
        };

        let quantity = unit.quantity;
        match groups.get_mut(&symbol) {
            Some(group) => {
                group.total_quantity += quantity;
                group.units.push(unit);
            }
            None => {
                let size_class = resolve_group_size(&unit);
                groups.insert(
                    symbol.clone(),
                    ConsolidatedGroup {
                        symbol,
                        total_quantity: quantity,
                        size_class,
                        units: vec![unit],
                    },
                );
            }
        }
    }

    groups
}

fn resolve_group_size(representative: &OwnedUnit) -> SizeClass {
    SizeClass::resolve(representative.size_class.as_deref(), &representative.name)
}
