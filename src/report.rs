// 📄 Report Formatter - Human-readable rendering of a reconciliation report
// Pure presentation: the structured report itself comes from the engine

use crate::reconciliation::{PairStatus, ReconciliationEntry, ReconciliationReport};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Render the full report as plain text
pub fn render(report: &ReconciliationReport) -> String {
    let mut out = String::new();
    let outcome = &report.outcome;

    let _ = writeln!(out, "=== Ship / ship part reconciliation: {} ===", report.wallet);
    let _ = writeln!(
        out,
        "Sources: {} staked, {} fleet, {} starbase, {} wallet ships, {} wallet parts",
        report.sources.staked,
        report.sources.fleet,
        report.sources.starbase,
        report.sources.wallet_ships,
        report.sources.wallet_parts
    );

    let _ = writeln!(out, "\n--- Ships without matching parts ---");
    if outcome.ships_without_parts.is_empty() {
        let _ = writeln!(out, "None.");
    } else {
        for unmatched in &outcome.ships_without_parts {
            let _ = writeln!(
                out,
                "{} ({}) - Quantity: {} - no matching ship part",
                unmatched.ship.name,
                unmatched.ship.symbol.as_deref().unwrap_or("?"),
                unmatched.count
            );
        }
    }

    let _ = writeln!(out, "\n--- Ship parts without matching ships ---");
    if outcome.parts_without_ships.is_empty() {
        let _ = writeln!(out, "None.");
    } else {
        for unmatched in &outcome.parts_without_ships {
            let _ = writeln!(
                out,
                "{} ({}) - Quantity: {} - no matching ship",
                unmatched.part.name,
                unmatched.part.symbol.as_deref().unwrap_or("?"),
                unmatched.count
            );
        }
    }

    let _ = writeln!(out, "\n--- Matched ship / ship part pairs ---");
    let pairs = dedupe_pairs(&outcome.matching_pairs);
    if pairs.is_empty() {
        let _ = writeln!(out, "None.");
    } else {
        for pair in pairs {
            let _ = writeln!(
                out,
                "[{}] {} ({}) - Ships: {}, Parts: {} - {}",
                pair.size_class.name(),
                pair.ship.name,
                pair.ship.symbol.as_deref().unwrap_or("?"),
                pair.ship_quantity,
                pair.part_quantity,
                status_label(pair)
            );
        }
    }

    out
}

/// Deduplicate by (ship name, part name), keeping the larger absolute
/// difference, then order by size-class rank and ship name
fn dedupe_pairs(pairs: &[ReconciliationEntry]) -> Vec<&ReconciliationEntry> {
    let mut by_names: BTreeMap<(String, String), &ReconciliationEntry> = BTreeMap::new();

    for pair in pairs {
        let key = (pair.ship.name.clone(), pair.part.name.clone());
        match by_names.get(&key) {
            Some(existing) if existing.difference.abs() >= pair.difference.abs() => {}
            _ => {
                by_names.insert(key, pair);
            }
        }
    }

    let mut deduped: Vec<&ReconciliationEntry> = by_names.into_values().collect();
    deduped.sort_by(|a, b| {
        a.size_class
            .rank()
            .cmp(&b.size_class.rank())
            .then_with(|| a.ship.name.cmp(&b.ship.name))
    });
    deduped
}

fn status_label(pair: &ReconciliationEntry) -> String {
    match pair.status() {
        PairStatus::Surplus => format!("{} ship parts surplus", pair.difference),
        PairStatus::Deficit => format!("{} ship parts missing", pair.difference.abs()),
        PairStatus::Balanced => "quantities balanced".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attributes, OwnedUnit, PartUnit, SourceCategory};
    use crate::reconciliation::{ReconciliationOutcome, SourceCounts, UnmatchedShip};
    use crate::size_class::SizeClass;

    fn make_pair(ship_name: &str, part_name: &str, difference: i64) -> ReconciliationEntry {
        let ship_quantity = 3u64;
        ReconciliationEntry {
            ship: OwnedUnit {
                mint: "m1".to_string(),
                name: ship_name.to_string(),
                quantity: ship_quantity,
                symbol: Some("FRIG".to_string()),
                size_class: None,
                attributes: Attributes::new(),
                source: SourceCategory::Staked,
            },
            part: PartUnit {
                mint: "m2".to_string(),
                name: part_name.to_string(),
                quantity: 1,
                symbol: Some("FRIGSP".to_string()),
            },
            ship_quantity,
            part_quantity: (ship_quantity as i64 + difference).max(0) as u64,
            difference,
            size_class: SizeClass::Medium,
        }
    }

    fn make_report(outcome: ReconciliationOutcome) -> ReconciliationReport {
        ReconciliationReport {
            wallet: "wallet-1".to_string(),
            sources: SourceCounts::default(),
            outcome,
            reconciled_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_dedupe_keeps_larger_absolute_difference() {
        let pairs = vec![
            make_pair("Frigate", "Frigate Ship Part", 1),
            make_pair("Frigate", "Frigate Ship Part", -4),
        ];

        let deduped = dedupe_pairs(&pairs);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].difference, -4);
    }

    #[test]
    fn test_pairs_ordered_by_size_rank_then_name() {
        let mut titan = make_pair("Aware", "Aware Ship Part", 1);
        titan.size_class = SizeClass::Titan;
        let mut small = make_pair("Busy", "Busy Ship Part", 1);
        small.size_class = SizeClass::Small;
        let mut titan_b = make_pair("Zeal", "Zeal Ship Part", 1);
        titan_b.size_class = SizeClass::Titan;

        let pairs = vec![small, titan_b, titan];
        let ordered = dedupe_pairs(&pairs);

        let names: Vec<&str> = ordered.iter().map(|p| p.ship.name.as_str()).collect();
        assert_eq!(names, vec!["Aware", "Zeal", "Busy"]);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(
            status_label(&make_pair("F", "F Ship Part", 2)),
            "2 ship parts surplus"
        );
        assert_eq!(
            status_label(&make_pair("F", "F Ship Part", -3)),
            "3 ship parts missing"
        );
        assert_eq!(
            status_label(&make_pair("F", "F Ship Part", 0)),
            "quantities balanced"
        );
    }

    #[test]
    fn test_render_sections() {
        let outcome = ReconciliationOutcome {
            ships_without_parts: vec![UnmatchedShip {
                ship: make_pair("Lonely", "x", 0).ship,
                count: 2,
            }],
            parts_without_ships: vec![],
            matching_pairs: vec![make_pair("Frigate", "Frigate Ship Part", 2)],
        };

        let text = render(&make_report(outcome));

        assert!(text.contains("--- Ships without matching parts ---"));
        assert!(text.contains("Lonely"));
        assert!(text.contains("--- Ship parts without matching ships ---"));
        assert!(text.contains("None."));
        assert!(text.contains("Ships: 3, Parts: 5 - 2 ship parts surplus"));
    }
}
