// 🔧 Record Normalizer - Raw source records into canonical OwnedUnits
// Symbol fallback chain: explicit field → attributes → parenthesized token

use crate::diagnostics::{DiagnosticCategory, DiagnosticEvent, DiagnosticSink, Severity};
use crate::model::{OwnedUnit, RawShipRecord};

/// Normalize one raw ship record into the canonical shape
///
/// Pure transform: no external lookup happens here. Records that end up with
/// no symbol are still returned so they can be reported downstream.
pub fn normalize(record: RawShipRecord) -> OwnedUnit {
    let symbol = resolve_symbol(&record);
    let size_class = explicit_size_class(&record);

    OwnedUnit {
        mint: record.mint,
        name: record.name,
        quantity: record.amount.unwrap_or(1),
        symbol,
        size_class,
        attributes: record.attributes,
        source: record.source,
    }
}

/// Normalize a batch, emitting one diagnostic per record without a symbol
pub fn normalize_all(records: Vec<RawShipRecord>, sink: &dyn DiagnosticSink) -> Vec<OwnedUnit> {
    records
        .into_iter()
        .map(|record| {
            let unit = normalize(record);
            if unit.symbol.is_none() {
                sink.emit(DiagnosticEvent::new(
                    DiagnosticCategory::MissingSymbol,
                    Severity::Warning,
                    &unit.mint,
                    format!("ship without resolvable symbol: {}", unit.name),
                ));
            }
            unit
        })
        .collect()
}

/// Symbol resolution fallback chain
fn resolve_symbol(record: &RawShipRecord) -> Option<String> {
    // 1. Explicit symbol field on the record itself
    if let Some(symbol) = &record.symbol {
        if !symbol.is_empty() {
            return Some(symbol.clone());
        }
    }

    // 2. Symbol buried in the metadata attributes
    if let Some(symbol) = record.attributes.get("symbol").and_then(|v| v.as_str()) {
        if !symbol.is_empty() {
            return Some(symbol.to_string());
        }
    }

    // 3. Parenthesized token in the attribute display name, e.g. "Pearce X4 (PX4)"
    if let Some(name) = record.attributes.get("name").and_then(|v| v.as_str()) {
        if let Some(symbol) = extract_parenthesized_symbol(name) {
            return Some(symbol);
        }
    }

    None
}

/// Explicit size-class attribute, when the source carried one
fn explicit_size_class(record: &RawShipRecord) -> Option<String> {
    for key in ["class", "size", "spec"] {
        if let Some(value) = record.attributes.get(key).and_then(|v| v.as_str()) {
            if !value.is_empty() && value != "Unknown" {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// First parenthesized uppercase-alphanumeric token in a display name
fn extract_parenthesized_symbol(name: &str) -> Option<String> {
    let mut rest = name;
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        match after.find(')') {
            Some(close) => {
                let token = &after[..close];
                if !token.is_empty()
                    && token
                        .chars()
                        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
                {
                    return Some(token.to_string());
                }
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    None
}
