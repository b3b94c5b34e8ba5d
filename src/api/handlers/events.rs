use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::Stream;

use crate::api::state::AppState;
use crate::dashboard::Snapshot;

fn snapshot_event(snapshot: &Snapshot) -> Event {
    Event::default().event("snapshot").data(encode_event(snapshot))
}

/// Event payload as JSON; a value that cannot be serialized is logged and
/// sent as an empty payload.
fn encode_event<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::warn!("failed to serialize snapshot event: {e}");
        String::new()
    })
}

/// Server-sent events: one `snapshot` event per tick.
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // Subscribe before reading the latest so no tick falls in between.
    let mut rx = state.subscribe();
    let mut shutdown = state.shutdown_signal();
    let latest = state.latest().await;

    let stream = async_stream::stream! {
        // Replay the current snapshot so a fresh page renders immediately
        if let Some(snapshot) = latest {
            yield Ok(snapshot_event(&snapshot));
        }

        loop {
            let next = tokio::select! {
                received = rx.recv() => Some(received),
                _ = shutdown.recv() => None,
            };
            match next {
                Some(Ok(snapshot)) => {
                    yield Ok(snapshot_event(&snapshot));
                }
                Some(Err(broadcast::error::RecvError::Lagged(n))) => {
                    log::debug!("event stream lagged by {n} snapshots");
                }
                Some(Err(broadcast::error::RecvError::Closed)) | None => {
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
