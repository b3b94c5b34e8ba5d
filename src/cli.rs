use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::config::{
    ColumnMap, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PRICE_URL, DEFAULT_RATE_FIELD,
    DEFAULT_REFRESH_MS, DEFAULT_TIMEOUT_SECS, DashboardConfig, DeriveOptions,
};
use crate::price::{FixedRate, HttpRateSource, RateSource};

/// Fund performance dashboard: derives yield metrics from a trade
/// spreadsheet and serves them as auto-refreshing charts.
#[derive(Parser)]
#[command(name = "fund-dashboard", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the dashboard in the browser, refreshing on a fixed interval
    Serve {
        /// Path to the trade spreadsheet (csv, xlsx, xlsm, xlsb, xls, ods)
        file: PathBuf,

        /// Address to bind
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        /// Port to bind
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Refresh interval in milliseconds
        #[arg(long, default_value_t = DEFAULT_REFRESH_MS)]
        refresh_ms: u64,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Run one refresh and print the summary
    Report {
        /// Path to the trade spreadsheet (csv, xlsx, xlsm, xlsb, xls, ods)
        file: PathBuf,

        /// Also write the full snapshot as JSON to this file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Options shared by every command that derives metrics.
#[derive(Args, Clone)]
pub struct SourceArgs {
    /// JSON file overriding spreadsheet header names
    #[arg(long)]
    pub columns: Option<PathBuf>,

    /// Price-quote endpoint returning the native → stable rate
    #[arg(long, default_value = DEFAULT_PRICE_URL)]
    pub price_url: String,

    /// JSON field holding the rate in the quote response
    #[arg(long, default_value = DEFAULT_RATE_FIELD)]
    pub rate_field: String,

    /// Quote request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Use this fixed rate instead of calling the quote endpoint
    #[arg(long)]
    pub rate: Option<f64>,

    /// Sort rows by date before computing running totals (default: file order)
    #[arg(long)]
    pub sort_by_date: bool,

    /// Page and report title
    #[arg(long, default_value = "Fund Dashboard")]
    pub title: String,

    /// Display name of the native token
    #[arg(long, default_value = "SOL")]
    pub native_unit: String,

    /// Display name of the stable token
    #[arg(long, default_value = "USDT")]
    pub stable_unit: String,
}

impl SourceArgs {
    pub fn to_config(&self, file: &Path) -> Result<DashboardConfig> {
        let columns = match &self.columns {
            Some(path) => ColumnMap::from_json_file(path)?,
            None => ColumnMap::default(),
        };

        let mut config = DashboardConfig::new(file);
        config.columns = columns;
        config.options = DeriveOptions {
            sort_by_date: self.sort_by_date,
        };
        config.price_url = self.price_url.clone();
        config.rate_field = self.rate_field.clone();
        config.request_timeout = Duration::from_secs(self.timeout_secs);
        config.title = self.title.clone();
        config.native_unit = self.native_unit.clone();
        config.stable_unit = self.stable_unit.clone();
        Ok(config)
    }

    pub fn rate_source(&self, config: &DashboardConfig) -> Result<Box<dyn RateSource>> {
        match self.rate {
            Some(rate) => Ok(Box::new(FixedRate(rate))),
            None => {
                let source = HttpRateSource::from_config(config)
                    .context("building quote client")?;
                Ok(Box::new(source))
            }
        }
    }
}
