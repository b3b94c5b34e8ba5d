pub mod cell;
mod workbook;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use cell::Cell;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Spreadsheet not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Unsupported spreadsheet format `{extension}` (use csv, xlsx, xlsm, xlsb, xls or ods)")]
    UnsupportedFormat { extension: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Workbook has no worksheets")]
    NoWorksheet,

    #[error("Spreadsheet has no header row")]
    NoHeader,

    #[error("Missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },
}

/// A loaded sheet: one header row followed by data rows.
///
/// Every row has exactly `headers.len()` cells; short rows are padded
/// with `Cell::Empty`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

static EMPTY: Cell = Cell::Empty;

impl Table {
    /// Build a table from a header and raw rows, padding or truncating each
    /// row to the header width.
    ///
    /// Blank rows between data rows are kept and read as all-zero periods;
    /// only blank rows after the last non-blank one are dropped.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let mut rows: Vec<Vec<Cell>> = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        while rows.last().is_some_and(|row| row.iter().all(Cell::is_empty)) {
            rows.pop();
        }
        Table { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Cell at (row, column); out-of-range lookups read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Cell in the named column, or `None` if the column does not exist.
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        Some(self.cell(row, col))
    }

    /// Fail with every missing header at once.
    pub fn require_columns(&self, names: &[&str]) -> Result<(), SheetError> {
        let missing: Vec<String> = names
            .iter()
            .filter(|n| self.column_index(n).is_none())
            .map(|n| n.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SheetError::MissingColumns { missing })
        }
    }
}

// ── Loading ──────────────────────────────────────────────────────────

/// Load the first worksheet of a spreadsheet, picking the reader from the
/// file extension.
pub fn load_table(path: &Path) -> Result<Table, SheetError> {
    if !path.exists() {
        return Err(SheetError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    match extension.as_str() {
        "csv" => load_csv(path),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => workbook::load_first_sheet(path),
        _ => Err(SheetError::UnsupportedFormat { extension }),
    }
}

/// Load a CSV file. Every non-blank field is kept as text; coercion
/// happens later, per column.
pub fn load_csv(path: &Path) -> Result<Table, SheetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(SheetError::NoHeader);
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(Table::new(headers, rows))
}
