use std::path::Path;

use anyhow::{Context, Result};

use crate::config::DashboardConfig;
use crate::dashboard::Snapshot;
use crate::metrics::format::{format_pct, format_thousands, format_usd};
use crate::price::RateSource;
use crate::refresh::Refresher;

/// Entry point for the `report` command: one tick, printed to stdout.
pub async fn run(
    config: DashboardConfig,
    rates: Box<dyn RateSource>,
    output: Option<&Path>,
) -> Result<()> {
    let mut refresher = Refresher::new(config, rates);
    let snapshot = refresher.tick().await;

    print_report(&snapshot, refresher.config());

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&snapshot).context("serializing snapshot")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!();
        println!("Snapshot written to {}", path.display());
    }

    Ok(())
}

fn print_report(snapshot: &Snapshot, config: &DashboardConfig) {
    let s = &snapshot.summary;
    let native = &snapshot.units.native;
    let stable = &snapshot.units.stable;

    println!("=== {} ===", snapshot.title);
    println!("Data:      {}", config.data_path.display());
    println!("Rate:      {} {stable}/{native}", s.rate);

    if snapshot.empty {
        println!();
        println!("No trade records to report.");
        return;
    }

    println!();
    println!("── Capital ──");
    println!("  Invested:        {}", format_usd(s.invested_capital));
    println!("  Total profit:    {}", format_usd(s.total_profit));
    println!("  Current:         {}", format_usd(s.current_capital));
    println!();
    println!("── Yield ──");
    println!(
        "  Cumulative:      {} {native} ({}%)",
        format_thousands(s.cumulative_native, 4),
        format_thousands(s.cumulative_native_pct, 2)
    );
    println!("  Converted:       {}", format_usd(s.cumulative_converted));
    println!();
    println!("── Trades ──");
    println!("  Total:           {}", s.total_trades);
    println!("  Positive:        {}", s.winning_trades);
    println!("  Negative:        {}", s.losing_trades);
    println!("  Win rate:        {}", format_pct(s.win_rate() * 100.0));

    if let Some(table) = &snapshot.table {
        println!();
        let widths: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                table
                    .rows
                    .iter()
                    .map(|row| row[i].text.len())
                    .chain(std::iter::once(col.name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = table
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| format!("{:>w$}", col.name, w = *w))
            .collect();
        println!("{}", header.join("  "));

        for row in &table.rows {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:>w$}", cell.text, w = *w))
                .collect();
            println!("{}", line.join("  "));
        }
    }
}
