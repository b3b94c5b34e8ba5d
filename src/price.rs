use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;

use crate::config::DashboardConfig;

/// Source of the native → stable exchange rate.
///
/// Implementations never fail: an unavailable quote is reported as `0.0`,
/// which zeroes every converted figure for that tick.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn current_rate(&self) -> f64;
}

/// A constant rate, for offline runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedRate(pub f64);

#[async_trait]
impl RateSource for FixedRate {
    async fn current_rate(&self) -> f64 {
        self.0
    }
}

// ── HTTP quote endpoint ──────────────────────────────────────────────

/// Reads the rate from a JSON price-quote endpoint such as
/// `{"solPrice": 172.31}`.
pub struct HttpRateSource {
    client: reqwest::Client,
    url: String,
    field: String,
}

impl HttpRateSource {
    pub fn new(url: impl Into<String>, field: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("fund-dashboard/0.1")
            .build()
            .context("creating HTTP client")?;
        Ok(HttpRateSource {
            client,
            url: url.into(),
            field: field.into(),
        })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        Self::new(&config.price_url, &config.rate_field, config.request_timeout)
    }

    /// Fetch the quote, surfacing every failure.
    pub async fn fetch(&self) -> Result<f64> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("requesting {}", self.url))?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await
            .context("decoding quote JSON")?;
        extract_rate(&body, &self.field)
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn current_rate(&self) -> f64 {
        match self.fetch().await {
            Ok(rate) => {
                log::debug!("rate from {}: {}", self.url, rate);
                rate
            }
            Err(e) => {
                log::warn!("rate fetch failed, using 0: {:#}", e);
                0.0
            }
        }
    }
}

/// Pull a finite number out of `body[field]`. Numeric strings are accepted.
pub fn extract_rate(body: &serde_json::Value, field: &str) -> Result<f64> {
    let value = body
        .get(field)
        .ok_or_else(|| anyhow!("quote has no `{field}` field"))?;
    let rate = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| anyhow!("`{field}` is not numeric: {value}"))?;

    if !rate.is_finite() {
        return Err(anyhow!("`{field}` is not finite: {rate}"));
    }
    Ok(rate)
}
