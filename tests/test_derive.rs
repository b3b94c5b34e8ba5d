mod common;

use fund_dashboard::config::{ColumnMap, DashboardConfig};
use fund_dashboard::dashboard::Snapshot;
use fund_dashboard::pipeline;

use common::{HEADER, SAMPLE_ROWS, approx, sample_config, write_sheet, write_workbook};

// ── Sheet → derived rows ────────────────────────────────────────────

#[test]
fn csv_sheet_derives_every_row() {
    let (_dir, config) = sample_config();
    let derived = pipeline::read_data_with_rate(&config, 100.0);

    assert_eq!(derived.rows.len(), 3);

    let first = &derived.rows[0];
    assert_eq!(first.pool, "RAY-SOL");
    assert!(approx(first.native_yield, 2.0));
    assert!(approx(first.stable_yield, -5.0));
    assert_eq!(first.stable_yield_pct, -5.0);
    assert_eq!(first.stable_yield_pct_label, "-5.0 %");
    assert!(approx(first.cumulative_native_pct, 10.0));
    assert!(approx(first.converted_yield, 200.0));

    let second = &derived.rows[1];
    assert!(approx(second.native_yield, -0.5));
    assert_eq!(second.stable_yield_pct, 20.0);
    assert!(approx(second.cumulative_native, 1.5));
    assert!(approx(second.cumulative_native_pct, 7.5));
    assert!(approx(second.cumulative_converted, 150.0));

    let third = &derived.rows[2];
    assert_eq!(third.stable_yield_pct, 15.0);
    assert!(approx(third.cumulative_native, 2.5));
    assert!(approx(third.cumulative_native_pct, 12.5));
    assert!(approx(third.cumulative_converted, 250.0));
}

#[test]
fn csv_sheet_summary() {
    let (_dir, config) = sample_config();
    let summary = pipeline::read_data_with_rate(&config, 100.0).summary;

    assert_eq!(summary.rate, 100.0);
    assert_eq!(summary.initial_native_capital, 20.0);
    assert_eq!(summary.invested_capital, 2000.0);
    assert!(approx(summary.current_capital, 2150.0));
    assert!(approx(summary.total_profit, 250.0));
    assert_eq!(summary.total_trades, 3);
    assert_eq!(summary.winning_trades, 2);
    assert_eq!(summary.losing_trades, 1);
}

#[test]
fn cumulative_columns_are_running_sums() {
    let (_dir, config) = sample_config();
    let derived = pipeline::read_data_with_rate(&config, 87.25);

    let mut native = 0.0;
    let mut converted = 0.0;
    for row in &derived.rows {
        native += row.native_yield;
        converted += row.converted_yield;
        assert!(approx(row.cumulative_native, native));
        assert!((row.cumulative_converted - converted).abs() < 0.005 + 1e-9);
    }
}

#[test]
fn zero_rate_zeroes_converted_figures_only() {
    let (_dir, config) = sample_config();
    let derived = pipeline::read_data_with_rate(&config, 0.0);

    assert_eq!(derived.rows.len(), 3);
    for row in &derived.rows {
        assert_eq!(row.converted_yield, 0.0);
        assert_eq!(row.cumulative_converted, 0.0);
    }
    assert_eq!(derived.summary.current_capital, 0.0);
    assert_eq!(derived.summary.total_profit, 0.0);
    assert!(approx(derived.rows[2].cumulative_native, 2.5));
}

#[test]
fn sort_by_date_reorders_before_accumulating() {
    let rows = [SAMPLE_ROWS[2], SAMPLE_ROWS[0], SAMPLE_ROWS[1]];
    let (_dir, path) = write_sheet(HEADER, &rows);
    let mut config = DashboardConfig::new(path);

    let file_order = pipeline::read_data_with_rate(&config, 1.0);
    assert_eq!(file_order.rows[0].native_yield, 1.0);

    config.options.sort_by_date = true;
    let sorted = pipeline::read_data_with_rate(&config, 1.0);
    let yields: Vec<f64> = sorted.rows.iter().map(|r| r.native_yield).collect();
    assert_eq!(yields, vec![2.0, -0.5, 1.0]);
}

#[test]
fn wallet_balance_read_from_first_data_row() {
    let (_dir, path) = write_sheet(
        HEADER,
        &[
            "2024-01-01,RAY-SOL,10,12,100,95,20,2000,21.5",
            "2024-01-02,ORCA-SOL,5,4.5,50,60,,,",
        ],
    );
    let config = DashboardConfig::new(path);
    let summary = pipeline::read_data_with_rate(&config, 100.0).summary;
    assert!(approx(summary.current_capital, 2150.0));
}

#[test]
fn wallet_balance_ignored_for_single_row() {
    let (_dir, path) = write_sheet(HEADER, &["2024-01-01,RAY-SOL,10,12,100,95,20,2000,21.5"]);
    let config = DashboardConfig::new(path);
    let summary = pipeline::read_data_with_rate(&config, 100.0).summary;
    assert_eq!(summary.current_capital, 0.0);
    assert_eq!(summary.invested_capital, 2000.0);
}

// ── Excel workbooks ─────────────────────────────────────────────────

#[test]
fn xlsx_workbook_derives_like_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workbook(dir.path(), HEADER, SAMPLE_ROWS);
    let config = DashboardConfig::new(path);
    let derived = pipeline::read_data_with_rate(&config, 100.0);

    assert_eq!(derived.rows.len(), 3);
    let dates: Vec<String> = derived
        .rows
        .iter()
        .map(|r| r.date.unwrap().format("%Y-%m-%d").to_string())
        .collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    assert_eq!(derived.rows[0].pool, "RAY-SOL");
    assert_eq!(derived.rows[0].stable_yield_pct_label, "-5.0 %");
    assert!(approx(derived.rows[2].cumulative_native, 2.5));

    let summary = &derived.summary;
    assert_eq!(summary.initial_native_capital, 20.0);
    assert_eq!(summary.invested_capital, 2000.0);
    assert!(approx(summary.current_capital, 2150.0));
    assert!(approx(summary.total_profit, 250.0));
    assert_eq!(summary.winning_trades, 2);
}

#[test]
fn xlsx_interior_blank_row_is_a_zero_trade() {
    let dir = tempfile::tempdir().unwrap();
    let rows = [SAMPLE_ROWS[0], "", SAMPLE_ROWS[1]];
    let path = write_workbook(dir.path(), HEADER, &rows);
    let config = DashboardConfig::new(path);
    let derived = pipeline::read_data_with_rate(&config, 100.0);

    assert_eq!(derived.rows.len(), 3);
    assert_eq!(derived.rows[1].date, None);
    assert_eq!(derived.rows[1].stable_yield, 0.0);
    assert_eq!(derived.summary.total_trades, 3);
    assert_eq!(derived.summary.losing_trades, 2);
}

// ── Degraded inputs ─────────────────────────────────────────────────

#[test]
fn absent_file_yields_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let config = DashboardConfig::new(dir.path().join("missing.xlsx"));
    let derived = pipeline::read_data_with_rate(&config, 100.0);

    assert!(derived.is_empty());
    assert_eq!(derived.summary.invested_capital, 0.0);
    assert_eq!(derived.summary.current_capital, 0.0);
    assert_eq!(derived.summary.total_trades, 0);

    let snapshot = Snapshot::build(&derived, &config);
    assert!(snapshot.empty);
    assert!(snapshot.figures.is_none());
}

#[test]
fn missing_column_yields_empty_result() {
    let header = "Data,Pool,Sol Investida,Sol Retirada,USDT Investido";
    let (_dir, path) = write_sheet(header, &["2024-01-01,RAY-SOL,10,12,100"]);
    let config = DashboardConfig::new(&path);

    assert!(pipeline::read_data_with_rate(&config, 100.0).is_empty());

    let err = pipeline::load_records(&path, &ColumnMap::default()).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("USDT Retirado"), "{msg}");
}

#[test]
fn header_only_sheet_is_empty() {
    let (_dir, path) = write_sheet(HEADER, &[]);
    let config = DashboardConfig::new(path);
    assert!(pipeline::read_data_with_rate(&config, 100.0).is_empty());
}

#[test]
fn unparseable_cells_count_as_zero() {
    let (_dir, path) = write_sheet(
        HEADER,
        &["2024-01-01,RAY-SOL,abc,12,100,,20,2000,"],
    );
    let config = DashboardConfig::new(path);
    let derived = pipeline::read_data_with_rate(&config, 1.0);

    assert_eq!(derived.rows.len(), 1);
    assert_eq!(derived.rows[0].native_invested, 0.0);
    assert!(approx(derived.rows[0].native_yield, 12.0));
    assert_eq!(derived.rows[0].stable_yield, -100.0);
    assert_eq!(derived.rows[0].stable_yield_pct, -100.0);
}

#[test]
fn renamed_headers_via_column_map() {
    let header = "Date,Pool,SOL in,SOL out,USDT in,USDT out,Capital,Fund,Wallet";
    let (dir, path) = write_sheet(header, SAMPLE_ROWS);
    let map_path = dir.path().join("columns.json");
    std::fs::write(
        &map_path,
        r#"{
            "date": "Date",
            "native_invested": "SOL in",
            "native_withdrawn": "SOL out",
            "stable_invested": "USDT in",
            "stable_withdrawn": "USDT out",
            "initial_native_capital": "Capital",
            "fund_investment": "Fund",
            "wallet_balance": "Wallet"
        }"#,
    )
    .unwrap();

    let mut config = DashboardConfig::new(path);
    config.columns = ColumnMap::from_json_file(&map_path).unwrap();
    let derived = pipeline::read_data_with_rate(&config, 100.0);

    assert_eq!(derived.rows.len(), 3);
    assert_eq!(derived.summary.invested_capital, 2000.0);
}
