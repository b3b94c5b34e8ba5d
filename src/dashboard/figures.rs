use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::metrics::format::{format_thousands, format_usd};
use crate::metrics::{Derived, EnrichedRow};

use super::Units;

const NATIVE_COLOR: &str = "yellow";
const STABLE_COLOR: &str = "cyan";
const PCT_COLOR: &str = "#00CFFF";

// ── Figure model ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

/// Label pinned to the right edge of a line chart at the series' last value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub y: f64,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub series: Vec<Series>,
    pub annotation: Option<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Fraction of the radius cut out of the middle (0 for a plain pie).
    pub hole: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarPanel {
    pub title: String,
    pub series: Series,
    /// Value labels drawn above each bar.
    pub text: Vec<String>,
}

/// Side-by-side bar panels sharing one x axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub panels: Vec<BarPanel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figures {
    pub cumulative_pct: LineChart,
    pub cumulative_native: LineChart,
    pub capital: PieChart,
    pub trades: PieChart,
    pub daily_profit: BarChart,
}

impl Figures {
    pub fn build(derived: &Derived, units: &Units) -> Self {
        Figures {
            cumulative_pct: cumulative_pct_chart(&derived.rows, units),
            cumulative_native: cumulative_native_chart(derived, units),
            capital: capital_pie(derived),
            trades: trades_pie(derived),
            daily_profit: daily_profit_bars(&derived.rows, units),
        }
    }
}

// ── Builders ─────────────────────────────────────────────────────────

pub fn date_label(date: Option<NaiveDateTime>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

fn dates(rows: &[EnrichedRow]) -> Vec<String> {
    rows.iter().map(|r| date_label(r.date)).collect()
}

fn cumulative_pct_chart(rows: &[EnrichedRow], units: &Units) -> LineChart {
    let annotation = rows.last().map(|last| Annotation {
        y: last.cumulative_native_pct,
        lines: vec![format!("{}%", format_thousands(last.cumulative_native_pct, 2))],
    });

    LineChart {
        title: format!("Profit % in {}", units.native),
        series: vec![Series {
            name: format!("Cumulative {} yield (%)", units.native),
            color: PCT_COLOR.to_string(),
            x: dates(rows),
            y: rows.iter().map(|r| r.cumulative_native_pct).collect(),
        }],
        annotation,
    }
}

fn cumulative_native_chart(derived: &Derived, units: &Units) -> LineChart {
    let rows = &derived.rows;
    let annotation = rows.last().map(|last| Annotation {
        y: last.cumulative_native,
        lines: vec![
            format!("{} {}", format_thousands(last.cumulative_native, 2), units.native),
            format_usd(last.cumulative_converted),
        ],
    });

    LineChart {
        title: format!("Cumulative yield in {} and {}", units.native, units.stable),
        series: vec![Series {
            name: format!("Cumulative {} yield", units.native),
            color: NATIVE_COLOR.to_string(),
            x: dates(rows),
            y: rows.iter().map(|r| r.cumulative_native).collect(),
        }],
        annotation,
    }
}

fn capital_pie(derived: &Derived) -> PieChart {
    let s = &derived.summary;
    PieChart {
        title: "Capital distribution".to_string(),
        labels: vec![
            format!("Invested capital: {}", format_usd(s.invested_capital)),
            format!("Profit: {}", format_usd(s.total_profit)),
            format!("Current capital: {}", format_usd(s.current_capital)),
        ],
        values: vec![s.invested_capital, s.total_profit, s.current_capital],
        hole: 0.4,
    }
}

fn trades_pie(derived: &Derived) -> PieChart {
    let s = &derived.summary;
    PieChart {
        title: "Positive vs negative trades".to_string(),
        labels: vec!["Positive trades".to_string(), "Negative trades".to_string()],
        values: vec![s.winning_trades as f64, s.losing_trades as f64],
        hole: 0.0,
    }
}

/// Per-day totals of stable and native yields, sorted by date.
/// Undated rows are left out.
pub fn daily_totals(rows: &[EnrichedRow]) -> Vec<(NaiveDateTime, f64, f64)> {
    let mut by_day: BTreeMap<NaiveDateTime, (f64, f64)> = BTreeMap::new();
    for row in rows {
        if let Some(date) = row.date {
            let entry = by_day.entry(date).or_insert((0.0, 0.0));
            entry.0 += row.stable_yield;
            entry.1 += row.native_yield;
        }
    }
    by_day
        .into_iter()
        .map(|(date, (stable, native))| (date, stable, native))
        .collect()
}

fn daily_profit_bars(rows: &[EnrichedRow], units: &Units) -> BarChart {
    let totals = daily_totals(rows);
    let x: Vec<String> = totals.iter().map(|(d, _, _)| date_label(Some(*d))).collect();
    let stable: Vec<f64> = totals.iter().map(|(_, s, _)| *s).collect();
    let native: Vec<f64> = totals.iter().map(|(_, _, n)| *n).collect();

    BarChart {
        title: format!("Daily profit ({} and {})", units.native, units.stable),
        panels: vec![
            BarPanel {
                title: format!("Profit in {}", units.stable),
                text: stable.iter().map(|v| format_thousands(*v, 2)).collect(),
                series: Series {
                    name: format!("Profit {}", units.stable),
                    color: STABLE_COLOR.to_string(),
                    x: x.clone(),
                    y: stable,
                },
            },
            BarPanel {
                title: format!("Profit in {}", units.native),
                text: native.iter().map(|v| format!("{v:.2}")).collect(),
                series: Series {
                    name: format!("Profit {}", units.native),
                    color: NATIVE_COLOR.to_string(),
                    x,
                    y: native,
                },
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeriveOptions;
    use crate::metrics::{HeaderScalars, TradeRecord, derive};
    use chrono::NaiveDate;

    fn day(d: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2024, 5, d).and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    fn units() -> Units {
        Units {
            native: "SOL".into(),
            stable: "USDT".into(),
        }
    }

    fn sample() -> Derived {
        let records = vec![
            TradeRecord::new(day(2), "a", 1.0, 2.0, 100.0, 110.0),
            TradeRecord::new(day(1), "b", 1.0, 0.5, 50.0, 45.0),
            TradeRecord::new(day(2), "c", 1.0, 1.25, 10.0, 10.0),
            TradeRecord::new(None, "d", 0.0, 9.0, 0.0, 0.0),
        ];
        let scalars = HeaderScalars {
            initial_native_capital: 10.0,
            fund_investment: 1000.0,
            wallet_balance: 12.0,
        };
        derive(&records, &scalars, 100.0, &DeriveOptions::default())
    }

    #[test]
    fn daily_totals_grouped_and_sorted() {
        let derived = sample();
        let totals = daily_totals(&derived.rows);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0], (day(1).unwrap(), -5.0, -0.5));
        assert_eq!(totals[1], (day(2).unwrap(), 10.0, 1.25));
    }

    #[test]
    fn annotations_track_last_row() {
        let derived = sample();
        let figures = Figures::build(&derived, &units());

        let pct = figures.cumulative_pct.annotation.unwrap();
        assert_eq!(pct.y, 97.5);
        assert_eq!(pct.lines, vec!["97.50%"]);

        let native = figures.cumulative_native.annotation.unwrap();
        assert_eq!(native.lines, vec!["9.75 SOL", "$975.00"]);
        assert_eq!(figures.cumulative_native.series[0].x[3], "n/a");
    }

    #[test]
    fn pies_reflect_summary() {
        let derived = sample();
        let figures = Figures::build(&derived, &units());
        assert_eq!(figures.capital.values, vec![1000.0, 975.0, 1200.0]);
        assert_eq!(figures.capital.labels[0], "Invested capital: $1,000.00");
        assert_eq!(figures.trades.values, vec![1.0, 3.0]);
    }

    #[test]
    fn bar_labels_formatted() {
        let derived = sample();
        let bars = Figures::build(&derived, &units()).daily_profit;
        assert_eq!(bars.panels[0].text, vec!["-5.00", "10.00"]);
        assert_eq!(bars.panels[1].text, vec!["-0.50", "1.25"]);
    }
}
