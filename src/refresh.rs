use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;

use crate::config::DashboardConfig;
use crate::dashboard::Snapshot;
use crate::pipeline;
use crate::price::RateSource;

/// Where each tick's snapshot goes.
#[async_trait]
pub trait RenderTarget: Send + Sync {
    async fn render(&self, snapshot: Arc<Snapshot>);
}

/// Runs the read → fetch → derive → build cycle on a fixed interval.
pub struct Refresher {
    config: DashboardConfig,
    rates: Box<dyn RateSource>,
    ticks: u64,
}

impl Refresher {
    pub fn new(config: DashboardConfig, rates: Box<dyn RateSource>) -> Self {
        Refresher {
            config,
            rates,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Number of ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One full cycle. The sheet is re-read every time; nothing derived is
    /// carried over from the previous tick.
    pub async fn tick(&mut self) -> Snapshot {
        let derived = pipeline::read_data(&self.config, self.rates.as_ref()).await;
        self.ticks += 1;
        log::debug!(
            "tick {}: {} rows, rate {}",
            self.ticks,
            derived.rows.len(),
            derived.summary.rate
        );
        Snapshot::build(&derived, &self.config)
    }

    /// Tick immediately, then every `refresh_interval`, until `shutdown` fires.
    ///
    /// Ticks run one after another in this task; a slow tick delays the next
    /// one instead of overlapping it.
    pub async fn run<T: RenderTarget + ?Sized>(
        mut self,
        target: &T,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        let mut interval = tokio::time::interval(self.config.refresh_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let snapshot = self.tick().await;
                    target.render(Arc::new(snapshot)).await;
                }
                _ = shutdown.recv() => {
                    log::info!("refresh loop stopped after {} ticks", self.ticks);
                    break;
                }
            }
        }
    }
}
