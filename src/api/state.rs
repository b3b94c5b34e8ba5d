use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};

use crate::dashboard::Snapshot;
use crate::refresh::RenderTarget;

#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
    /// Every rendered snapshot, for the event stream.
    pub snapshot_tx: broadcast::Sender<Arc<Snapshot>>,
    /// Fired once on shutdown; ends the refresh loop and open event streams.
    pub shutdown_tx: broadcast::Sender<()>,
}

pub struct AppStateInner {
    pub title: String,
    /// Polling period the page falls back to without an event stream.
    pub refresh_interval: Duration,
    /// Latest snapshot; `None` until the first tick completes.
    pub latest: Option<Arc<Snapshot>>,
    pub renders: u64,
}

impl AppState {
    pub fn new(title: String, refresh_interval: Duration) -> Self {
        let (snapshot_tx, _) = broadcast::channel(16);
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                title,
                refresh_interval,
                latest: None,
                renders: 0,
            })),
            snapshot_tx,
            shutdown_tx,
        }
    }

    pub async fn latest(&self) -> Option<Arc<Snapshot>> {
        self.inner.read().await.latest.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Snapshot>> {
        self.snapshot_tx.subscribe()
    }

    pub fn shutdown_signal(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

#[async_trait]
impl RenderTarget for AppState {
    async fn render(&self, snapshot: Arc<Snapshot>) {
        {
            let mut inner = self.inner.write().await;
            inner.latest = Some(snapshot.clone());
            inner.renders += 1;
        }
        // No subscribers is fine: nobody has the page open.
        let _ = self.snapshot_tx.send(snapshot);
    }
}
