// 🧩 Part Classifier - Group ship parts by their ship symbol
// Part symbols follow the convention: ship symbol + "SP"

use crate::diagnostics::{DiagnosticCategory, DiagnosticEvent, DiagnosticSink, Severity};
use crate::model::PartUnit;
use std::collections::BTreeMap;

/// Fixed 2-character suffix appended to a ship symbol to form a part symbol
pub const PART_SYMBOL_SUFFIX: &str = "SP";

/// One part group, keyed by the ship symbol (part symbol minus the suffix)
#[derive(Debug, Clone)]
pub struct PartGroup {
    pub symbol: String,

    /// Member parts in first-seen order; `parts[0]` is the representative
    pub parts: Vec<PartUnit>,

    pub total_quantity: u64,
}

impl PartGroup {
    pub fn representative(&self) -> &PartUnit {
        &self.parts[0]
    }
}

/// Group parts by derived ship symbol, summing quantities
///
/// Parts with no symbol, or whose symbol does not end in the suffix, are
/// skipped and reported, never grouped.
pub fn classify(parts: Vec<PartUnit>, sink: &dyn DiagnosticSink) -> BTreeMap<String, PartGroup> {
    let mut groups: BTreeMap<String, PartGroup> = BTreeMap::new();

    for part in parts {
        let symbol = match &part.symbol {
            Some(symbol) => symbol.clone(),
            None => {
                sink.emit(DiagnosticEvent::new(
                    DiagnosticCategory::MissingSymbol,
                    Severity::Warning,
                    &part.mint,
                    format!("part without symbol: {}", part.name),
                ));
                continue;
            }
        };

        let ship_symbol = match symbol.strip_suffix(PART_SYMBOL_SUFFIX) {
            Some(stripped) if !stripped.is_empty() => stripped.to_string(),
            _ => {
                sink.emit(DiagnosticEvent::new(
                    DiagnosticCategory::BadPartSuffix,
                    Severity::Warning,
                    &part.mint,
                    format!("part symbol {} does not end in {}", symbol, PART_SYMBOL_SUFFIX),
                ));
                continue;
            }
        };

        let quantity = part.quantity;
        match groups.get_mut(&ship_symbol) {
            Some(group) => {
                group.total_quantity += quantity;
                group.parts.push(part);
            }
            None => {
                groups.insert(
                    ship_symbol.clone(),
                    PartGroup {
                        symbol: ship_symbol,
                        total_quantity: quantity,
                        parts: vec![part],
                    },
                );
            }
        }
    }

    groups
}
