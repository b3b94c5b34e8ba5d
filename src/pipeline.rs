use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{ColumnMap, DashboardConfig};
use crate::data;
use crate::metrics::{self, Derived, HeaderScalars, TradeRecord};
#[cfg(feature = "full")]
use crate::price::RateSource;

/// Load the spreadsheet and extract typed records.
pub fn load_records(path: &Path, columns: &ColumnMap) -> Result<(Vec<TradeRecord>, HeaderScalars)> {
    let table =
        data::load_table(path).with_context(|| format!("reading {}", path.display()))?;
    let parsed = metrics::records_from_table(&table, columns)
        .with_context(|| format!("extracting trade records from {}", path.display()))?;
    Ok(parsed)
}

/// Load and derive with an already-known rate. Any load failure yields
/// `Derived::empty()`.
pub fn read_data_with_rate(config: &DashboardConfig, rate: f64) -> Derived {
    match load_records(&config.data_path, &config.columns) {
        Ok((records, scalars)) => metrics::derive(&records, &scalars, rate, &config.options),
        Err(e) => {
            log::error!("failed to load trade records: {:#}", e);
            Derived::empty()
        }
    }
}

/// One full tick: read the sheet, fetch the rate, derive.
///
/// The rate is only requested once the sheet has loaded. Never fails;
/// every error degrades the result instead.
#[cfg(feature = "full")]
pub async fn read_data(config: &DashboardConfig, rates: &dyn RateSource) -> Derived {
    let path = config.data_path.clone();
    let columns = config.columns.clone();
    let loaded = tokio::task::spawn_blocking(move || load_records(&path, &columns))
        .await
        .context("sheet loader task panicked")
        .and_then(|r| r);

    let (records, scalars) = match loaded {
        Ok(parsed) => parsed,
        Err(e) => {
            log::error!("failed to load trade records: {:#}", e);
            return Derived::empty();
        }
    };

    let rate = rates.current_rate().await;
    log::debug!(
        "deriving {} rows from {} at rate {}",
        records.len(),
        config.data_path.display(),
        rate
    );
    metrics::derive(&records, &scalars, rate, &config.options)
}
