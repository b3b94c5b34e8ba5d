use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PRICE_URL: &str = "https://frontend-api.pump.fun/sol-price";
pub const DEFAULT_RATE_FIELD: &str = "solPrice";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_REFRESH_MS: u64 = 5_000;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Column map maps more than one field to header `{header}`")]
    DuplicateHeader { header: String },

    #[error("Refresh interval must be greater than zero")]
    ZeroInterval,
}

// ── Column map ───────────────────────────────────────────────────────

/// Header names of the recognized spreadsheet columns.
///
/// Defaults match the fund's own workbook. Any subset can be overridden
/// from a JSON file; missing keys keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub date: String,
    pub pool: String,
    pub native_invested: String,
    pub native_withdrawn: String,
    pub stable_invested: String,
    pub stable_withdrawn: String,
    /// Initial native capital, read from the first row.
    pub initial_native_capital: String,
    /// Fund investment in stable units, read from the first row.
    pub fund_investment: String,
    /// Wallet balance in native units, read from the first data row.
    pub wallet_balance: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap {
            date: "Data".to_string(),
            pool: "Pool".to_string(),
            native_invested: "Sol Investida".to_string(),
            native_withdrawn: "Sol Retirada".to_string(),
            stable_invested: "USDT Investido".to_string(),
            stable_withdrawn: "USDT Retirado".to_string(),
            initial_native_capital: "Solana investida".to_string(),
            fund_investment: "Investimento USDT".to_string(),
            wallet_balance: "Valor Sol Carteira".to_string(),
        }
    }
}

impl ColumnMap {
    /// Load a column map from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map: ColumnMap =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        map.check_unique()?;
        Ok(map)
    }

    /// Columns every row must carry for the derivation to run.
    pub fn required(&self) -> [&str; 6] {
        [
            self.date.as_str(),
            self.pool.as_str(),
            self.native_invested.as_str(),
            self.native_withdrawn.as_str(),
            self.stable_invested.as_str(),
            self.stable_withdrawn.as_str(),
        ]
    }

    fn all(&self) -> [&str; 9] {
        [
            self.date.as_str(),
            self.pool.as_str(),
            self.native_invested.as_str(),
            self.native_withdrawn.as_str(),
            self.stable_invested.as_str(),
            self.stable_withdrawn.as_str(),
            self.initial_native_capital.as_str(),
            self.fund_investment.as_str(),
            self.wallet_balance.as_str(),
        ]
    }

    fn check_unique(&self) -> Result<(), ConfigError> {
        let headers = self.all();
        for (i, header) in headers.iter().enumerate() {
            if headers[..i].contains(header) {
                return Err(ConfigError::DuplicateHeader {
                    header: header.to_string(),
                });
            }
        }
        Ok(())
    }
}

// ── Derivation options ───────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeriveOptions {
    /// Stable-sort rows by date before computing running sums.
    /// Off by default: rows are accumulated in file order.
    #[serde(default)]
    pub sort_by_date: bool,
}

// ── Dashboard config ─────────────────────────────────────────────────

/// Everything one refresh tick needs, passed explicitly instead of
/// living in module state.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub columns: ColumnMap,
    pub options: DeriveOptions,
    pub price_url: String,
    pub rate_field: String,
    pub request_timeout: Duration,
    pub refresh_interval: Duration,
    pub title: String,
    pub native_unit: String,
    pub stable_unit: String,
}

impl DashboardConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        DashboardConfig {
            data_path: data_path.into(),
            columns: ColumnMap::default(),
            options: DeriveOptions::default(),
            price_url: DEFAULT_PRICE_URL.to_string(),
            rate_field: DEFAULT_RATE_FIELD.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            refresh_interval: Duration::from_millis(DEFAULT_REFRESH_MS),
            title: "Fund Dashboard".to_string(),
            native_unit: "SOL".to_string(),
            stable_unit: "USDT".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        self.columns.check_unique()
    }
}
