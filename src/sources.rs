// 🛰️ Holdings Sources - Collaborator seam for external ownership lookups
// The pipeline only depends on the trait; the binaries use the JSON snapshot

use crate::model::{Attributes, InventoryRecord, RawShipRecord, SourceCategory};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// External ownership lookups, one method per custody category
///
/// Implementations do the actual fetching (chain RPC, indexer, snapshot).
/// Internals are out of scope here; only the returned shapes matter.
#[async_trait]
pub trait HoldingsProvider: Send + Sync {
    /// Ship units staked to the wallet
    async fn staked_ships(&self, wallet: &str) -> Result<Vec<RawShipRecord>>;

    /// Game profile addresses associated with the wallet
    async fn profiles(&self, wallet: &str) -> Result<Vec<String>>;

    /// Ship units resident in a profile's fleets
    async fn fleet_ships(&self, profile: &str) -> Result<Vec<RawShipRecord>>;

    /// Ship units resident in a profile's starbases
    async fn starbase_ships(&self, profile: &str) -> Result<Vec<RawShipRecord>>;

    /// NFT-style inventory held directly in the wallet (ships and parts)
    async fn wallet_inventory(&self, wallet: &str) -> Result<Vec<InventoryRecord>>;
}

// ============================================================================
// SNAPSHOT PROVIDER
// ============================================================================

/// One ship row as stored in a snapshot file (source tag added on read)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotShip {
    pub mint: String,
    pub name: String,
    #[serde(default)]
    pub amount: Option<u64>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl SnapshotShip {
    fn tagged(&self, source: SourceCategory) -> RawShipRecord {
        RawShipRecord {
            mint: self.mint.clone(),
            name: self.name.clone(),
            amount: self.amount,
            symbol: self.symbol.clone(),
            attributes: self.attributes.clone(),
            source,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub address: String,
    #[serde(default)]
    pub fleet: Vec<SnapshotShip>,
    #[serde(default)]
    pub starbase: Vec<SnapshotShip>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletSnapshot {
    #[serde(default)]
    pub staked: Vec<SnapshotShip>,
    #[serde(default)]
    pub profiles: Vec<ProfileSnapshot>,
    #[serde(default)]
    pub inventory: Vec<InventoryRecord>,
}

/// File-backed provider reading a JSON snapshot of per-wallet holdings
///
/// Wallets absent from the snapshot behave like wallets with no holdings.
pub struct SnapshotProvider {
    wallets: HashMap<String, WalletSnapshot>,
}

impl SnapshotProvider {
    /// Load a snapshot file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot file {:?}", path))?;
        Self::from_json(&raw)
    }

    /// Parse a snapshot from its JSON text
    pub fn from_json(raw: &str) -> Result<Self> {
        let wallets: HashMap<String, WalletSnapshot> =
            serde_json::from_str(raw).context("failed to parse holdings snapshot")?;
        Ok(SnapshotProvider { wallets })
    }

    pub fn wallet_count(&self) -> usize {
        self.wallets.len()
    }

    fn wallet(&self, wallet: &str) -> Option<&WalletSnapshot> {
        self.wallets.get(wallet)
    }

    fn profile(&self, profile: &str) -> Option<&ProfileSnapshot> {
        self.wallets
            .values()
            .flat_map(|w| w.profiles.iter())
            .find(|p| p.address == profile)
    }
}

#[async_trait]
impl HoldingsProvider for SnapshotProvider {
    async fn staked_ships(&self, wallet: &str) -> Result<Vec<RawShipRecord>> {
        Ok(self
            .wallet(wallet)
            .map(|w| {
                w.staked
                    .iter()
                    .map(|s| s.tagged(SourceCategory::Staked))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn profiles(&self, wallet: &str) -> Result<Vec<String>> {
        Ok(self
            .wallet(wallet)
            .map(|w| w.profiles.iter().map(|p| p.address.clone()).collect())
            .unwrap_or_default())
    }

    async fn fleet_ships(&self, profile: &str) -> Result<Vec<RawShipRecord>> {
        Ok(self
            .profile(profile)
            .map(|p| {
                p.fleet
                    .iter()
                    .map(|s| s.tagged(SourceCategory::Fleet))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn starbase_ships(&self, profile: &str) -> Result<Vec<RawShipRecord>> {
        Ok(self
            .profile(profile)
            .map(|p| {
                p.starbase
                    .iter()
                    .map(|s| s.tagged(SourceCategory::Starbase))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn wallet_inventory(&self, wallet: &str) -> Result<Vec<InventoryRecord>> {
        Ok(self
            .wallet(wallet)
            .map(|w| w.inventory.clone())
            .unwrap_or_default())
    }
}
