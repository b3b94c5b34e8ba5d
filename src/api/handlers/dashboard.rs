use axum::Json;
use axum::extract::State;
use axum::http::Uri;
use axum::response::Html;

use crate::api::error::ApiError;
use crate::api::state::AppState;

const DASHBOARD_HTML: &str = include_str!("../../../static/dashboard.html");

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let inner = state.inner.read().await;
    Html(render_page(&inner.title, inner.refresh_interval.as_millis()))
}

fn render_page(title: &str, refresh_ms: u128) -> String {
    DASHBOARD_HTML
        .replace("{{title}}", &escape_html(title))
        .replace("{{refresh_ms}}", &refresh_ms.to_string())
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Latest snapshot as JSON; 503 until the first tick has rendered.
pub async fn snapshot(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let latest = state
        .latest()
        .await
        .ok_or_else(|| ApiError::NotReady("no snapshot rendered yet".into()))?;
    let body = serde_json::to_value(latest.as_ref())
        .map_err(|e| ApiError::Internal(format!("serializing snapshot: {e}")))?;
    Ok(Json(body))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {uri}"))
}
