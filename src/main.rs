use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use fund_dashboard::cli::{self, Cli};
use fund_dashboard::{api, report};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        cli::Command::Serve {
            file,
            host,
            port,
            refresh_ms,
            source,
        } => {
            let mut config = source.to_config(&file)?;
            config.refresh_interval = Duration::from_millis(refresh_ms);
            config.validate()?;
            let rates = source.rate_source(&config)?;

            let rt = tokio::runtime::Runtime::new().context("creating tokio runtime")?;
            rt.block_on(api::serve(&host, port, config, rates))
        }
        cli::Command::Report {
            file,
            output,
            source,
        } => {
            let config = source.to_config(&file)?;
            config.validate()?;
            let rates = source.rate_source(&config)?;

            let rt = tokio::runtime::Runtime::new().context("creating tokio runtime")?;
            rt.block_on(report::run(config, rates, output.as_deref()))
        }
    }
}
