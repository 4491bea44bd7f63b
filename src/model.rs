// 🚀 Fleet Data Model
// Source-tagged raw records plus the canonical shapes the pipeline runs on

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Free-form attribute bag carried by raw records (mirrors on-chain metadata)
pub type Attributes = HashMap<String, Value>;

/// Wallet inventory item type tag for ships
pub const ITEM_TYPE_SHIP: &str = "ship";

/// Wallet inventory item type tag for ship parts
pub const ITEM_TYPE_PART: &str = "ship parts";

// ============================================================================
// SOURCE CATEGORY
// ============================================================================

/// SourceCategory - Identifies which custody location a ship record came from
///
/// Attached at fetch time so downstream stages never sniff record shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceCategory {
    Staked,
    Fleet,
    Starbase,
    Wallet,
}

impl SourceCategory {
    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            SourceCategory::Staked => "Staked",
            SourceCategory::Fleet => "Fleet",
            SourceCategory::Starbase => "Starbase",
            SourceCategory::Wallet => "Wallet",
        }
    }
}

// ============================================================================
// RAW RECORDS
// ============================================================================

/// RawShipRecord - One fixed shape for all four ship sources
///
/// Collaborators return these; the normalizer turns them into `OwnedUnit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawShipRecord {
    /// On-chain mint address (unique per record, not per ship type)
    pub mint: String,

    /// Display name from the source
    pub name: String,

    /// Explicit quantity, if the source provides one (wallet rows do,
    /// staked/fleet/starbase rows usually represent a single unit)
    pub amount: Option<u64>,

    /// Explicit symbol, if the source provides one
    pub symbol: Option<String>,

    /// Raw metadata attributes from the source
    #[serde(default)]
    pub attributes: Attributes,

    /// Which custody location this record came from
    pub source: SourceCategory,
}

impl RawShipRecord {
    /// Create a new RawShipRecord with required fields
    pub fn new(mint: &str, name: &str, source: SourceCategory) -> Self {
        RawShipRecord {
            mint: mint.to_string(),
            name: name.to_string(),
            amount: None,
            symbol: None,
            attributes: Attributes::new(),
            source,
        }
    }

    /// Builder pattern: add explicit quantity
    pub fn with_amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Builder pattern: add explicit symbol
    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }

    /// Builder pattern: add a metadata attribute
    pub fn with_attribute(mut self, key: &str, value: Value) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }
}

/// InventoryRecord - NFT-style row held directly in the wallet
///
/// Filtered into ships vs ship parts by `item_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub mint: String,
    pub name: String,
    pub symbol: Option<String>,
    pub quantity: u64,
    pub item_type: String,
}

impl InventoryRecord {
    pub fn is_ship(&self) -> bool {
        self.item_type == ITEM_TYPE_SHIP
    }

    pub fn is_part(&self) -> bool {
        self.item_type == ITEM_TYPE_PART
    }
}

// ============================================================================
// CANONICAL SHAPES
// ============================================================================

/// OwnedUnit - Canonical ship record after normalization
///
/// `symbol` stays optional: units without one are excluded from matching but
/// retained for diagnostics and reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedUnit {
    pub mint: String,
    pub name: String,
    pub quantity: u64,
    pub symbol: Option<String>,

    /// Explicit size-class attribute, when the source carried one
    pub size_class: Option<String>,

    #[serde(default)]
    pub attributes: Attributes,

    pub source: SourceCategory,
}

/// PartUnit - Canonical ship-part record
///
/// Only parts whose symbol ends in the `SP` suffix participate in matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartUnit {
    pub mint: String,
    pub name: String,
    pub quantity: u64,
    pub symbol: Option<String>,
}

impl From<InventoryRecord> for PartUnit {
    fn from(record: InventoryRecord) -> Self {
        PartUnit {
            mint: record.mint,
            name: record.name,
            quantity: record.quantity,
            symbol: record.symbol,
        }
    }
}

impl From<InventoryRecord> for RawShipRecord {
    fn from(record: InventoryRecord) -> Self {
        RawShipRecord {
            mint: record.mint,
            name: record.name,
            amount: Some(record.quantity),
            symbol: record.symbol,
            attributes: Attributes::new(),
            source: SourceCategory::Wallet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_record_builder() {
        let record = RawShipRecord::new("mint-1", "Fimbul Airbike", SourceCategory::Staked)
            .with_amount(2)
            .with_symbol("FBLAIR")
            .with_attribute("class", json!("X-Small"));

        assert_eq!(record.amount, Some(2));
        assert_eq!(record.symbol.as_deref(), Some("FBLAIR"));
        assert_eq!(record.attributes["class"], json!("X-Small"));
        assert_eq!(record.source.name(), "Staked");
    }

    #[test]
    fn test_inventory_item_type_filter() {
        let ship = InventoryRecord {
            mint: "m1".to_string(),
            name: "Pearce X4".to_string(),
            symbol: Some("PX4".to_string()),
            quantity: 1,
            item_type: ITEM_TYPE_SHIP.to_string(),
        };
        let part = InventoryRecord {
            mint: "m2".to_string(),
            name: "Pearce X4 Ship Part".to_string(),
            symbol: Some("PX4SP".to_string()),
            quantity: 3,
            item_type: ITEM_TYPE_PART.to_string(),
        };

        assert!(ship.is_ship() && !ship.is_part());
        assert!(part.is_part() && !part.is_ship());

        let part_unit: PartUnit = part.into();
        assert_eq!(part_unit.quantity, 3);
        assert_eq!(part_unit.symbol.as_deref(), Some("PX4SP"));
    }
}
