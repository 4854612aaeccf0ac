//! HTTP routes

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::QueryRejection;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use stash_core::service::INVALID_COLLECTION_BODY;
use stash_core::telemetry::{record_install, TelemetryPayload};
use stash_core::{ManifestService, TelemetrySink};
use tokio::time::timeout;
use tracing::{debug, error, warn};

/// Upper bound on a single telemetry upsert
pub const TELEMETRY_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared state injected into all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: ManifestService,
    pub telemetry: Option<Arc<dyn TelemetrySink>>,
}

/// Query parameters of an update check
#[derive(Debug, Default, Deserialize)]
pub struct UpdateParams {
    /// Collection id
    pub plugin: Option<String>,
    /// URL-encoded install telemetry
    pub data: Option<String>,
}

/// Build the router
///
/// `/update.php` is kept as an alias because released plugins call it.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/update", get(update))
        .route("/update.php", get(update))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

/// Address used as the fallback telemetry identity
///
/// The raw `X-Forwarded-For` header when present, otherwise the peer IP.
#[must_use]
pub fn caller_address(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| peer.ip().to_string(), str::to_string)
}

async fn update(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    params: Result<Query<UpdateParams>, QueryRejection>,
) -> Response {
    let params = params.map(|Query(p)| p).unwrap_or_else(|e| {
        debug!("Unparseable query string: {}", e);
        UpdateParams::default()
    });

    let service = state.service.clone();
    let plugin = params.plugin;
    let body = match tokio::task::spawn_blocking(move || service.handle(plugin.as_deref())).await {
        Ok(response) => response.into_body(),
        Err(e) => {
            error!("Manifest task failed: {}", e);
            INVALID_COLLECTION_BODY.to_vec()
        }
    };

    if let Some(data) = params.data {
        let caller = caller_address(&headers, peer);
        tokio::spawn(report_install(state.telemetry, data, caller));
    }

    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Record install telemetry; failures are logged and dropped
///
/// Runs detached from the request, so a slow or hung store never holds
/// back the manifest response. Bounded by [`TELEMETRY_TIMEOUT`].
async fn report_install(sink: Option<Arc<dyn TelemetrySink>>, data: String, caller: String) {
    let Some(sink) = sink else {
        match TelemetryPayload::parse(&data) {
            Ok(payload) => debug!("Telemetry store disabled, dropping report from {}", payload.os),
            Err(e) => debug!("Dropping invalid telemetry: {}", e),
        }
        return;
    };

    match timeout(TELEMETRY_TIMEOUT, record_install(sink.as_ref(), &data, &caller)).await {
        Ok(Ok(record)) => debug!("Recorded install {}", record.uuid),
        Ok(Err(e)) => warn!("Failed to record install telemetry: {}", e),
        Err(_) => warn!("Telemetry store did not answer within {:?}", TELEMETRY_TIMEOUT),
    }
}
