use serde::Serialize;

use crate::metrics::EnrichedRow;
use crate::metrics::format::format_thousands;

use super::Units;
use super::figures::date_label;

/// Sign of a value, used by the page to colour yield cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Tone::Positive
        } else if value < 0.0 {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub text: String,
    pub tone: Tone,
}

impl TableCell {
    fn plain(text: impl Into<String>) -> Self {
        TableCell {
            text: text.into(),
            tone: Tone::Neutral,
        }
    }

    fn signed(text: impl Into<String>, value: f64) -> Self {
        TableCell {
            text: text.into(),
            tone: Tone::of(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradesTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<TableCell>>,
}

impl TradesTable {
    pub fn build(rows: &[EnrichedRow], units: &Units) -> Self {
        let columns = [
            ("date", "Date".to_string()),
            ("pool", "Pool".to_string()),
            ("native_invested", format!("{} Invested", units.native)),
            ("stable_invested", format!("{} Invested", units.stable)),
            ("native_withdrawn", format!("{} Withdrawn", units.native)),
            ("stable_withdrawn", format!("{} Withdrawn", units.stable)),
            ("native_yield", format!("{} Yield", units.native)),
            ("stable_yield", format!("{} Yield", units.stable)),
            ("stable_yield_pct", format!("{} Yield %", units.stable)),
        ]
        .into_iter()
        .map(|(id, name)| Column {
            id: id.to_string(),
            name,
        })
        .collect();

        let rows = rows
            .iter()
            .map(|r| {
                vec![
                    TableCell::plain(date_label(r.date)),
                    TableCell::plain(r.pool.clone()),
                    TableCell::plain(r.native_invested.to_string()),
                    TableCell::plain(format_thousands(r.stable_invested, 2)),
                    TableCell::plain(r.native_withdrawn.to_string()),
                    TableCell::plain(format_thousands(r.stable_withdrawn, 2)),
                    TableCell::signed(format_thousands(r.native_yield, 2), r.native_yield),
                    TableCell::signed(format_thousands(r.stable_yield, 2), r.stable_yield),
                    TableCell::signed(r.stable_yield_pct_label.clone(), r.stable_yield_pct),
                ]
            })
            .collect();

        TradesTable { columns, rows }
    }
}
