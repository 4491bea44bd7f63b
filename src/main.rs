// Fleet Reconciliation - CLI
// Analyze one wallet against a holdings snapshot and print the report

use anyhow::Result;
use fleet_recon::{reconcile_ownership, render, SnapshotProvider, StderrSink};
use std::env;
use std::path::Path;

const DEFAULT_SNAPSHOT: &str = "snapshot.json";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let wallet = match args.get(1) {
        Some(wallet) if !wallet.trim().is_empty() => wallet.clone(),
        _ => {
            eprintln!("Usage: fleet-recon <wallet-address> [snapshot.json]");
            std::process::exit(2);
        }
    };
    let snapshot_path = args
        .get(2)
        .cloned()
        .unwrap_or_else(|| DEFAULT_SNAPSHOT.to_string());

    println!("🚢 Fleet Reconciliation");
    println!("━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Wallet:   {}", wallet);
    println!("Snapshot: {}", snapshot_path);

    let provider = SnapshotProvider::load(Path::new(&snapshot_path))?;
    println!("✓ Snapshot loaded ({} wallets)\n", provider.wallet_count());

    let report = reconcile_ownership(&provider, &wallet, &StderrSink).await?;

    println!("{}", render(&report));
    println!("{}", report.summary());

    Ok(())
}
