use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use super::cell::{from_excel_serial, parse_date};
use super::{Cell, SheetError, Table};

/// Read the first worksheet of an Excel or OpenDocument workbook.
pub(super) fn load_first_sheet(path: &Path) -> Result<Table, SheetError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::NoWorksheet)??;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => return Err(SheetError::NoHeader),
    };
    if headers.iter().all(|h| h.is_empty()) {
        return Err(SheetError::NoHeader);
    }

    let body = rows.map(|row| row.iter().map(to_cell).collect()).collect();
    Ok(Table::new(headers, body))
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => from_excel_serial(dt.as_f64())
            .map(Cell::Date)
            .unwrap_or(Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) => parse_date(s).map(Cell::Date).unwrap_or(Cell::Empty),
        _ => Cell::Empty,
    }
}
