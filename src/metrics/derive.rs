use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::DeriveOptions;

use super::format::{format_pct, round_to};
use super::record::{HeaderScalars, TradeRecord};

/// A trade record plus everything derived from it on one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRow {
    pub date: Option<NaiveDateTime>,
    pub pool: String,
    pub native_invested: f64,
    pub native_withdrawn: f64,
    pub stable_invested: f64,
    pub stable_withdrawn: f64,

    /// withdrawn − invested, 4 dp.
    pub native_yield: f64,
    /// withdrawn − invested, 2 dp.
    pub stable_yield: f64,
    /// stable yield ÷ stable invested × 100, 2 dp. Zero when nothing was invested.
    pub stable_yield_pct: f64,
    pub stable_yield_pct_label: String,

    /// Running sum of `native_yield`.
    pub cumulative_native: f64,
    /// `cumulative_native` ÷ initial native capital × 100, 2 dp.
    pub cumulative_native_pct: f64,

    /// `native_yield` × rate, 2 dp.
    pub converted_yield: f64,
    /// Running sum of `converted_yield`, 2 dp.
    pub cumulative_converted: f64,
}

/// Sheet-wide figures shown next to the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub rate: f64,
    pub initial_native_capital: f64,
    /// Total invested capital (fund investment, stable units).
    pub invested_capital: f64,
    /// Wallet balance × rate.
    pub current_capital: f64,
    /// Sum of converted yields.
    pub total_profit: f64,
    pub total_trades: usize,
    /// Rows with a positive stable yield.
    pub winning_trades: usize,
    /// All other rows, including break-even ones.
    pub losing_trades: usize,
    pub cumulative_native: f64,
    pub cumulative_native_pct: f64,
    pub cumulative_converted: f64,
}

impl Summary {
    pub fn win_rate(&self) -> f64 {
        if self.total_trades == 0 {
            0.0
        } else {
            self.winning_trades as f64 / self.total_trades as f64
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Derived {
    pub rows: Vec<EnrichedRow>,
    pub summary: Summary,
}

impl Derived {
    /// The no-render result: no rows, every summary figure zero.
    pub fn empty() -> Self {
        Derived::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Compute every derived field for one tick.
///
/// Pure: the same records, scalars and rate always produce the same output.
/// A non-finite rate is treated as zero.
pub fn derive(
    records: &[TradeRecord],
    scalars: &HeaderScalars,
    rate: f64,
    options: &DeriveOptions,
) -> Derived {
    let rate = if rate.is_finite() { rate } else { 0.0 };

    let mut ordered: Vec<&TradeRecord> = records.iter().collect();
    if options.sort_by_date {
        ordered.sort_by(|a, b| compare_dates(a.date, b.date));
    }

    let initial_capital = scalars.initial_native_capital;
    let mut cumulative_native = 0.0;
    let mut cumulative_converted = 0.0;
    let mut rows = Vec::with_capacity(ordered.len());

    for record in ordered {
        let native_yield = round_to(record.native_withdrawn - record.native_invested, 4);
        let stable_yield = round_to(record.stable_withdrawn - record.stable_invested, 2);

        let stable_yield_pct = if record.stable_invested != 0.0 {
            round_to(stable_yield / record.stable_invested * 100.0, 2)
        } else {
            0.0
        };

        cumulative_native += native_yield;
        let cumulative_native_pct = if initial_capital != 0.0 {
            round_to(cumulative_native / initial_capital * 100.0, 2)
        } else {
            0.0
        };

        let converted_yield = round_to(native_yield * rate, 2);
        cumulative_converted += converted_yield;

        rows.push(EnrichedRow {
            date: record.date,
            pool: record.pool.clone(),
            native_invested: record.native_invested,
            native_withdrawn: record.native_withdrawn,
            stable_invested: record.stable_invested,
            stable_withdrawn: record.stable_withdrawn,
            native_yield,
            stable_yield,
            stable_yield_pct,
            stable_yield_pct_label: format_pct(stable_yield_pct),
            cumulative_native,
            cumulative_native_pct,
            converted_yield,
            cumulative_converted: round_to(cumulative_converted, 2),
        });
    }

    let summary = summarize(&rows, scalars, rate);
    Derived { rows, summary }
}

fn summarize(rows: &[EnrichedRow], scalars: &HeaderScalars, rate: f64) -> Summary {
    let winning_trades = rows.iter().filter(|r| r.stable_yield > 0.0).count();
    let last = rows.last();

    Summary {
        rate,
        initial_native_capital: scalars.initial_native_capital,
        invested_capital: scalars.fund_investment,
        current_capital: if rows.len() > 1 {
            scalars.wallet_balance * rate
        } else {
            0.0
        },
        total_profit: round_to(rows.iter().map(|r| r.converted_yield).sum(), 2),
        total_trades: rows.len(),
        winning_trades,
        losing_trades: rows.len() - winning_trades,
        cumulative_native: last.map(|r| r.cumulative_native).unwrap_or(0.0),
        cumulative_native_pct: last.map(|r| r.cumulative_native_pct).unwrap_or(0.0),
        cumulative_converted: last.map(|r| r.cumulative_converted).unwrap_or(0.0),
    }
}

/// Dated rows first, in date order; undated rows keep their relative order at the end.
fn compare_dates(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
