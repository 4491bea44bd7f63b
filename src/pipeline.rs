// 🚢 Ownership Pipeline - Aggregate holdings and reconcile ships vs parts
// Two-tier error policy: per-category fetches degrade to empty, the
// top-level entry point propagates its own failures

use crate::classifier::classify;
use crate::consolidator::consolidate;
use crate::diagnostics::{DiagnosticCategory, DiagnosticEvent, DiagnosticSink, Severity};
use crate::model::{PartUnit, RawShipRecord};
use crate::normalizer::normalize_all;
use crate::reconciliation::{ReconciliationEngine, ReconciliationReport, SourceCounts};
use crate::sources::HoldingsProvider;
use anyhow::Result;

/// Everything fetched for one wallet before normalization
#[derive(Debug, Default)]
pub struct Holdings {
    pub staked: Vec<RawShipRecord>,
    pub fleet: Vec<RawShipRecord>,
    pub starbase: Vec<RawShipRecord>,
    pub wallet_ships: Vec<RawShipRecord>,
    pub parts: Vec<PartUnit>,
}

impl Holdings {
    pub fn source_counts(&self) -> SourceCounts {
        SourceCounts {
            staked: self.staked.len(),
            fleet: self.fleet.len(),
            starbase: self.starbase.len(),
            wallet_ships: self.wallet_ships.len(),
            wallet_parts: self.parts.len(),
        }
    }

    /// All ship records across the four custody locations
    pub fn all_ships(self) -> Vec<RawShipRecord> {
        let mut ships = self.staked;
        ships.extend(self.fleet);
        ships.extend(self.starbase);
        ships.extend(self.wallet_ships);
        ships
    }
}

// ============================================================================
// PER-CATEGORY FETCH HELPERS (tier 1: degrade to empty)
// ============================================================================

async fn fetch_staked(
    provider: &dyn HoldingsProvider,
    wallet: &str,
    sink: &dyn DiagnosticSink,
) -> Vec<RawShipRecord> {
    provider
        .staked_ships(wallet)
        .await
        .unwrap_or_else(|e| degrade(sink, "staked", e))
}

async fn fetch_profiles(
    provider: &dyn HoldingsProvider,
    wallet: &str,
    sink: &dyn DiagnosticSink,
) -> Vec<String> {
    provider
        .profiles(wallet)
        .await
        .unwrap_or_else(|e| degrade(sink, "profiles", e))
}

async fn fetch_fleet(
    provider: &dyn HoldingsProvider,
    profile: &str,
    sink: &dyn DiagnosticSink,
) -> Vec<RawShipRecord> {
    provider
        .fleet_ships(profile)
        .await
        .unwrap_or_else(|e| degrade(sink, "fleet", e))
}

async fn fetch_starbase(
    provider: &dyn HoldingsProvider,
    profile: &str,
    sink: &dyn DiagnosticSink,
) -> Vec<RawShipRecord> {
    provider
        .starbase_ships(profile)
        .await
        .unwrap_or_else(|e| degrade(sink, "starbase", e))
}

async fn fetch_inventory(
    provider: &dyn HoldingsProvider,
    wallet: &str,
    sink: &dyn DiagnosticSink,
) -> Vec<crate::model::InventoryRecord> {
    provider
        .wallet_inventory(wallet)
        .await
        .unwrap_or_else(|e| degrade(sink, "inventory", e))
}

fn degrade<T>(sink: &dyn DiagnosticSink, source: &str, error: anyhow::Error) -> Vec<T> {
    sink.emit(DiagnosticEvent::new(
        DiagnosticCategory::FetchFailed,
        Severity::Error,
        source,
        format!("lookup failed, continuing with empty {}: {:#}", source, error),
    ));
    Vec::new()
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Fetch every custody category for a wallet, sequentially per profile
pub async fn gather_holdings(
    provider: &dyn HoldingsProvider,
    wallet: &str,
    sink: &dyn DiagnosticSink,
) -> Holdings {
    let mut holdings = Holdings {
        staked: fetch_staked(provider, wallet, sink).await,
        ..Holdings::default()
    };

    for profile in fetch_profiles(provider, wallet, sink).await {
        holdings
            .fleet
            .extend(fetch_fleet(provider, &profile, sink).await);
        holdings
            .starbase
            .extend(fetch_starbase(provider, &profile, sink).await);
    }

    for item in fetch_inventory(provider, wallet, sink).await {
        if item.is_ship() {
            holdings.wallet_ships.push(item.into());
        } else if item.is_part() {
            holdings.parts.push(item.into());
        }
        // Other item types (resources, structures, ...) are not our concern
    }

    let counts = holdings.source_counts();
    sink.emit(DiagnosticEvent::new(
        DiagnosticCategory::SourceSummary,
        Severity::Info,
        wallet,
        format!(
            "{} staked, {} fleet, {} starbase, {} wallet ships, {} wallet parts",
            counts.staked, counts.fleet, counts.starbase, counts.wallet_ships, counts.wallet_parts
        ),
    ));

    holdings
}

// ============================================================================
// ENTRY POINT (tier 2: failures propagate)
// ============================================================================

/// Reconcile ship and ship-part ownership for one wallet
///
/// The wallet identifier is an explicit parameter; nothing here reads
/// process-global configuration.
pub async fn reconcile_ownership(
    provider: &dyn HoldingsProvider,
    wallet: &str,
    sink: &dyn DiagnosticSink,
) -> Result<ReconciliationReport> {
    let holdings = gather_holdings(provider, wallet, sink).await;
    let sources = holdings.source_counts();
    let parts = holdings.parts.clone();

    let units = normalize_all(holdings.all_ships(), sink);
    let ship_groups = consolidate(units, sink);
    let part_groups = classify(parts, sink);

    let outcome = ReconciliationEngine::new().reconcile(&ship_groups, &part_groups);

    Ok(ReconciliationReport {
        wallet: wallet.to_string(),
        sources,
        outcome,
        reconciled_at: chrono::Utc::now(),
    })
}
