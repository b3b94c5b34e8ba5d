use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::ColumnMap;
use crate::data::{Cell, SheetError, Table};

use super::format::round_to;

/// One reporting period, with every monetary column coerced to a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub date: Option<NaiveDateTime>,
    pub pool: String,
    pub native_invested: f64,
    pub native_withdrawn: f64,
    /// Rounded to cents on load.
    pub stable_invested: f64,
    /// Rounded to cents on load.
    pub stable_withdrawn: f64,
}

impl TradeRecord {
    pub fn new(
        date: Option<NaiveDateTime>,
        pool: impl Into<String>,
        native_invested: f64,
        native_withdrawn: f64,
        stable_invested: f64,
        stable_withdrawn: f64,
    ) -> Self {
        TradeRecord {
            date,
            pool: pool.into(),
            native_invested,
            native_withdrawn,
            stable_invested: round_to(stable_invested, 2),
            stable_withdrawn: round_to(stable_withdrawn, 2),
        }
    }
}

/// Sheet-level values that live in fixed rows rather than per period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HeaderScalars {
    /// First row of the initial native capital column.
    pub initial_native_capital: f64,
    /// First row of the fund investment column (stable units).
    pub fund_investment: f64,
    /// First data row of the wallet balance column (native units), i.e. the
    /// second spreadsheet row counting the header. Only used once the sheet
    /// has more than one data row.
    pub wallet_balance: f64,
}

/// Extract typed records and header scalars from a loaded table.
///
/// Fails only when a required column is missing; individual cells that do
/// not parse become zero.
pub fn records_from_table(
    table: &Table,
    columns: &ColumnMap,
) -> Result<(Vec<TradeRecord>, HeaderScalars), SheetError> {
    table.require_columns(&columns.required())?;

    let col = |name: &str| {
        table
            .column_index(name)
            .ok_or_else(|| SheetError::MissingColumns {
                missing: vec![name.to_string()],
            })
    };
    let date = col(&columns.date)?;
    let pool = col(&columns.pool)?;
    let native_in = col(&columns.native_invested)?;
    let native_out = col(&columns.native_withdrawn)?;
    let stable_in = col(&columns.stable_invested)?;
    let stable_out = col(&columns.stable_withdrawn)?;

    let records = (0..table.len())
        .map(|row| {
            let number = |c: usize| table.cell(row, c).number_or_zero();
            TradeRecord::new(
                table.cell(row, date).as_date(),
                table.cell(row, pool).as_text(),
                number(native_in),
                number(native_out),
                number(stable_in),
                number(stable_out),
            )
        })
        .collect();

    let scalar = |row: usize, name: &str| {
        if row < table.len() {
            table.get(row, name).map(Cell::number_or_zero).unwrap_or(0.0)
        } else {
            0.0
        }
    };
    let scalars = HeaderScalars {
        initial_native_capital: scalar(0, &columns.initial_native_capital),
        fund_investment: scalar(0, &columns.fund_investment),
        wallet_balance: scalar(0, &columns.wallet_balance),
    };

    Ok((records, scalars))
}
