#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use fund_dashboard::config::DashboardConfig;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

pub const HEADER: &str = "Data,Pool,Sol Investida,Sol Retirada,USDT Investido,USDT Retirado,Solana investida,Investimento USDT,Valor Sol Carteira";

/// Three periods: +2 SOL, -0.5 SOL, +1 SOL. Initial capital 20 SOL,
/// fund investment 2000 USDT and wallet balance 21.5 SOL, all on the first
/// data row.
pub const SAMPLE_ROWS: &[&str] = &[
    "2024-01-01,RAY-SOL,10,12,100,95,20,2000,21.5",
    "2024-01-02,ORCA-SOL,5,4.5,50,60,,,",
    "2024-01-03,RAY-SOL,8,9,80,92,,,",
];

/// Write a CSV sheet into a fresh temp dir. Keep the dir alive for the
/// duration of the test.
pub fn write_sheet(header: &str, rows: &[&str]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trades.csv");
    overwrite_sheet(&path, header, rows);
    (dir, path)
}

pub fn overwrite_sheet(path: &Path, header: &str, rows: &[&str]) {
    let mut file = std::fs::File::create(path).unwrap();
    writeln!(file, "{header}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
}

pub fn sample_config() -> (tempfile::TempDir, DashboardConfig) {
    let (dir, path) = write_sheet(HEADER, SAMPLE_ROWS);
    (dir, DashboardConfig::new(path))
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Write the same layout as an xlsx workbook: real date cells in the first
/// column, text pools, numeric amounts, blanks left unwritten.
pub fn write_workbook(dir: &Path, header: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join("fund.xlsx");
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let sheet = workbook.add_worksheet();

    for (col, name) in header.split(',').enumerate() {
        sheet.write_string(0, col as u16, name).unwrap();
    }
    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        for (col, field) in row.split(',').enumerate() {
            let c = col as u16;
            if field.is_empty() {
                continue;
            }
            match col {
                0 => {
                    let parts: Vec<&str> = field.split('-').collect();
                    let date = ExcelDateTime::from_ymd(
                        parts[0].parse().unwrap(),
                        parts[1].parse().unwrap(),
                        parts[2].parse().unwrap(),
                    )
                    .unwrap();
                    sheet.write_datetime_with_format(r, c, &date, &date_format).unwrap();
                }
                1 => {
                    sheet.write_string(r, c, field).unwrap();
                }
                _ => {
                    sheet.write_number(r, c, field.parse::<f64>().unwrap()).unwrap();
                }
            }
        }
    }

    workbook.save(&path).unwrap();
    path
}
