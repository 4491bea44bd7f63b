// ⚖️ Reconciliation Engine - Join ship groups against part groups
// For every ship symbol: does the wallet hold enough matching ship parts?

use crate::classifier::PartGroup;
use crate::consolidator::ConsolidatedGroup;
use crate::model::{Attributes, OwnedUnit, PartUnit, SourceCategory};
use crate::size_class::SizeClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed display-name suffix on ship-part NFTs ("Pearce X4 Ship Part")
pub const PART_NAME_SUFFIX: &str = " Ship Part";

// ============================================================================
// RESULT SHAPES
// ============================================================================

/// A ship unit with no corresponding part group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchedShip {
    pub ship: OwnedUnit,
    pub count: u64,
}

/// A part unit with no corresponding ship group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchedPart {
    pub part: PartUnit,
    pub count: u64,
}

/// One matched (or part-only synthetic) pair, built from group totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationEntry {
    pub ship: OwnedUnit,
    pub part: PartUnit,
    pub ship_quantity: u64,
    pub part_quantity: u64,

    /// part_quantity - ship_quantity: positive = surplus, negative = deficit
    pub difference: i64,

    pub size_class: SizeClass,
}

impl ReconciliationEntry {
    pub fn status(&self) -> PairStatus {
        if self.difference > 0 {
            PairStatus::Surplus
        } else if self.difference < 0 {
            PairStatus::Deficit
        } else {
            PairStatus::Balanced
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairStatus {
    Surplus,
    Deficit,
    Balanced,
}

/// Structured outcome of one reconciliation pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconciliationOutcome {
    pub ships_without_parts: Vec<UnmatchedShip>,
    pub parts_without_ships: Vec<UnmatchedPart>,
    pub matching_pairs: Vec<ReconciliationEntry>,
}

/// Per-source record counts, reported alongside the outcome
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceCounts {
    pub staked: usize,
    pub fleet: usize,
    pub starbase: usize,
    pub wallet_ships: usize,
    pub wallet_parts: usize,
}

impl SourceCounts {
    pub fn total_ships(&self) -> usize {
        self.staked + self.fleet + self.starbase + self.wallet_ships
    }
}

/// The machine-readable report returned by the entry point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub wallet: String,
    pub sources: SourceCounts,
    pub outcome: ReconciliationOutcome,
    pub reconciled_at: chrono::DateTime<chrono::Utc>,
}

impl ReconciliationReport {
    pub fn summary(&self) -> String {
        format!(
            "Reconciliation for {}: {} ship records, {} pairs, {} ships unmatched, {} parts unmatched",
            self.wallet,
            self.sources.total_ships(),
            self.outcome.matching_pairs.len(),
            self.outcome.ships_without_parts.len(),
            self.outcome.parts_without_ships.len()
        )
    }
}

// ============================================================================
// RECONCILIATION ENGINE
// ============================================================================

pub struct ReconciliationEngine;

impl ReconciliationEngine {
    pub fn new() -> Self {
        ReconciliationEngine
    }

    /// Join consolidated ship groups against classified part groups
    ///
    /// Never fails: malformed or unmatched records degrade to the
    /// "without pair" buckets instead of raising errors.
    pub fn reconcile(
        &self,
        ship_groups: &BTreeMap<String, ConsolidatedGroup>,
        part_groups: &BTreeMap<String, PartGroup>,
    ) -> ReconciliationOutcome {
        let mut outcome = ReconciliationOutcome::default();

        for (symbol, ship_group) in ship_groups {
            match part_groups.get(symbol) {
                Some(part_group) => {
                    // One entry per matched symbol, built from group totals
                    outcome.matching_pairs.push(ReconciliationEntry {
                        ship: ship_group.representative().clone(),
                        part: part_group.representative().clone(),
                        ship_quantity: ship_group.total_quantity,
                        part_quantity: part_group.total_quantity,
                        difference: part_group.total_quantity as i64
                            - ship_group.total_quantity as i64,
                        size_class: ship_group.size_class,
                    });
                }
                None => {
                    // No parts at all: one record per member unit
                    for ship in &ship_group.units {
                        outcome.ships_without_parts.push(UnmatchedShip {
                            ship: ship.clone(),
                            count: ship.quantity,
                        });
                    }
                }
            }
        }

        for (symbol, part_group) in part_groups {
            if ship_groups.contains_key(symbol) {
                continue;
            }

            // Part-only symbol: synthetic pair with a placeholder ship,
            // fully surplus, plus one unmatched record per member part
            let representative = part_group.representative();
            outcome.matching_pairs.push(ReconciliationEntry {
                ship: self.placeholder_ship(symbol, representative),
                part: representative.clone(),
                ship_quantity: 0,
                part_quantity: part_group.total_quantity,
                difference: part_group.total_quantity as i64,
                size_class: SizeClass::Unknown,
            });

            for part in &part_group.parts {
                outcome.parts_without_ships.push(UnmatchedPart {
                    part: part.clone(),
                    count: part.quantity,
                });
            }
        }

        outcome
    }

    /// Placeholder ship for a part-only symbol, derived from the part itself
    fn placeholder_ship(&self, symbol: &str, part: &PartUnit) -> OwnedUnit {
        let name = part
            .name
            .strip_suffix(PART_NAME_SUFFIX)
            .unwrap_or(&part.name)
            .to_string();

        OwnedUnit {
            mint: part.mint.clone(),
            name,
            quantity: 0,
            symbol: Some(symbol.to_string()),
            size_class: Some(SizeClass::Unknown.name().to_string()),
            attributes: Attributes::new(),
            source: SourceCategory::Wallet,
        }
    }
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::consolidator::consolidate;
    use crate::diagnostics::MemorySink;

    fn make_ship(symbol: &str, quantity: u64) -> OwnedUnit {
        OwnedUnit {
            mint: format!("ship-{}-{}", symbol, quantity),
            name: format!("{} Frigate", symbol),
            quantity,
            symbol: Some(symbol.to_string()),
            size_class: None,
            attributes: Attributes::new(),
            source: SourceCategory::Staked,
        }
    }

    fn make_part(symbol: &str, quantity: u64) -> PartUnit {
        PartUnit {
            mint: format!("part-{}-{}", symbol, quantity),
            name: format!("{} Frigate Ship Part", symbol),
            quantity,
            symbol: Some(symbol.to_string()),
        }
    }

    fn run(ships: Vec<OwnedUnit>, parts: Vec<PartUnit>) -> ReconciliationOutcome {
        let sink = MemorySink::new();
        let ship_groups = consolidate(ships, &sink);
        let part_groups = classify(parts, &sink);
        ReconciliationEngine::new().reconcile(&ship_groups, &part_groups)
    }

    #[test]
    fn test_matched_pair_uses_group_totals() {
        // FRIG x3 vs FRIGSP x5 → one pair, surplus of 2
        let outcome = run(vec![make_ship("FRIG", 3)], vec![make_part("FRIGSP", 5)]);

        assert_eq!(outcome.matching_pairs.len(), 1);
        assert!(outcome.ships_without_parts.is_empty());
        assert!(outcome.parts_without_ships.is_empty());

        let pair = &outcome.matching_pairs[0];
        assert_eq!(pair.ship_quantity, 3);
        assert_eq!(pair.part_quantity, 5);
        assert_eq!(pair.difference, 2);
        assert_eq!(pair.status(), PairStatus::Surplus);
    }

    #[test]
    fn test_ships_without_parts() {
        let outcome = run(vec![make_ship("FRIG", 2)], vec![]);

        assert!(outcome.matching_pairs.is_empty());
        assert_eq!(outcome.ships_without_parts.len(), 1);
        assert_eq!(outcome.ships_without_parts[0].count, 2);
    }

    #[test]
    fn test_parts_without_ships_synthetic_pair() {
        let outcome = run(vec![], vec![make_part("CORVSP", 4)]);

        assert_eq!(outcome.matching_pairs.len(), 1);
        let pair = &outcome.matching_pairs[0];
        assert_eq!(pair.ship_quantity, 0);
        assert_eq!(pair.part_quantity, 4);
        assert_eq!(pair.difference, 4);
        assert_eq!(pair.size_class, SizeClass::Unknown);
        // Placeholder name: part display name minus the fixed suffix
        assert_eq!(pair.ship.name, "CORVSP Frigate");
        assert_eq!(pair.ship.symbol.as_deref(), Some("CORV"));

        assert_eq!(outcome.parts_without_ships.len(), 1);
        assert_eq!(outcome.parts_without_ships[0].count, 4);
    }

    #[test]
    fn test_deficit_and_balanced_status() {
        let outcome = run(
            vec![make_ship("FRIG", 5), make_ship("CORV", 2)],
            vec![make_part("FRIGSP", 3), make_part("CORVSP", 2)],
        );

        let frig = outcome
            .matching_pairs
            .iter()
            .find(|p| p.ship.symbol.as_deref() == Some("FRIG"))
            .unwrap();
        assert_eq!(frig.difference, -2);
        assert_eq!(frig.status(), PairStatus::Deficit);

        let corv = outcome
            .matching_pairs
            .iter()
            .find(|p| p.ship.symbol.as_deref() == Some("CORV"))
            .unwrap();
        assert_eq!(corv.difference, 0);
        assert_eq!(corv.status(), PairStatus::Balanced);
    }

    #[test]
    fn test_consolidation_before_matching() {
        // Two FRIG units (2 + 1) consolidate into one group of 3
        let outcome = run(
            vec![make_ship("FRIG", 2), make_ship("FRIG", 1)],
            vec![make_part("FRIGSP", 5)],
        );

        assert_eq!(outcome.matching_pairs.len(), 1);
        assert_eq!(outcome.matching_pairs[0].ship_quantity, 3);
        assert_eq!(outcome.matching_pairs[0].difference, 2);
    }

    #[test]
    fn test_ship_quantity_conservation() {
        // sum(pairs.ship_quantity) + sum(ships_without_parts.count)
        //   == total quantity over all well-formed ship units
        let ships = vec![
            make_ship("FRIG", 3),
            make_ship("FRIG", 1),
            make_ship("CORV", 2),
            make_ship("TANK", 7),
        ];
        let total: u64 = ships.iter().map(|s| s.quantity).sum();

        let outcome = run(ships, vec![make_part("FRIGSP", 5)]);

        let matched: u64 = outcome.matching_pairs.iter().map(|p| p.ship_quantity).sum();
        let unmatched: u64 = outcome.ships_without_parts.iter().map(|s| s.count).sum();
        assert_eq!(matched + unmatched, total);
    }

    #[test]
    fn test_part_quantity_conservation() {
        // sum(pairs.part_quantity where ship_quantity > 0)
        //   + sum(parts_without_ships.count)
        //   == total quantity over all well-formed part units
        let parts = vec![
            make_part("FRIGSP", 5),
            make_part("FRIGSP", 2),
            make_part("CORVSP", 4),
        ];
        let total: u64 = parts.iter().map(|p| p.quantity).sum();

        let outcome = run(vec![make_ship("FRIG", 3)], parts);

        let matched: u64 = outcome
            .matching_pairs
            .iter()
            .filter(|p| p.ship_quantity > 0)
            .map(|p| p.part_quantity)
            .sum();
        let unmatched: u64 = outcome.parts_without_ships.iter().map(|p| p.count).sum();
        assert_eq!(matched + unmatched, total);
    }

    #[test]
    fn test_idempotence() {
        let ships = vec![make_ship("FRIG", 3), make_ship("CORV", 2)];
        let parts = vec![make_part("FRIGSP", 5), make_part("TANKSP", 1)];

        let first = run(ships.clone(), parts.clone());
        let second = run(ships, parts);

        assert_eq!(first.matching_pairs.len(), second.matching_pairs.len());
        for (a, b) in first.matching_pairs.iter().zip(&second.matching_pairs) {
            assert_eq!(a.ship_quantity, b.ship_quantity);
            assert_eq!(a.part_quantity, b.part_quantity);
            assert_eq!(a.difference, b.difference);
        }
    }

    #[test]
    fn test_report_summary() {
        let report = ReconciliationReport {
            wallet: "wallet-1".to_string(),
            sources: SourceCounts {
                staked: 1,
                fleet: 2,
                starbase: 0,
                wallet_ships: 1,
                wallet_parts: 3,
            },
            outcome: run(vec![make_ship("FRIG", 3)], vec![make_part("FRIGSP", 5)]),
            reconciled_at: chrono::Utc::now(),
        };

        assert_eq!(report.sources.total_ships(), 4);
        assert!(report.summary().contains("wallet-1"));
        assert!(report.summary().contains("1 pairs"));
    }
}
