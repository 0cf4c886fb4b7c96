//! Health check endpoints
//!
//! Provides Kubernetes-style health probes:
//! - /health, /healthz - Liveness probe (is the gateway running?)
//! - /ready, /readyz - Readiness probe
//!
//! Verse serving degrades to the mock provider when no upstream is
//! configured, so readiness mirrors liveness; the body carries the upstream
//! and cache state for operators and pre-flight checks.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::server::http::json_response;
use crate::server::AppState;

/// Health response body.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall health status (true if the gateway is running)
    pub healthy: bool,
    /// 'online' when the live upstream is configured, else 'degraded'
    pub status: &'static str,
    /// Service version
    pub version: &'static str,
    /// Uptime in seconds
    pub uptime: u64,
    /// Active provider details
    pub provider: ProviderHealth,
    /// Whether the verse cache survives restarts
    #[serde(rename = "cachePersistent")]
    pub cache_persistent: bool,
    /// Number of truths in the catalog
    pub truths: usize,
    /// Current timestamp
    pub timestamp: String,
    /// Node identifier
    pub node_id: String,
}

/// Provider details for the health body.
#[derive(Serialize)]
pub struct ProviderHealth {
    pub name: String,
    /// Whether a live upstream is in the chain
    pub upstream: bool,
}

fn build_health_response(state: &AppState) -> HealthResponse {
    let has_upstream = state.service.has_upstream();

    HealthResponse {
        healthy: true,
        status: if has_upstream { "online" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.started_at.elapsed().as_secs(),
        provider: ProviderHealth {
            name: state.service.provider_name().to_string(),
            upstream: has_upstream,
        },
        cache_persistent: state.service.cache_persistent(),
        truths: state.catalog.len(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        node_id: state.args.node_id.to_string(),
    }
}

/// Handle liveness probe (/health, /healthz).
pub fn health_check(state: &AppState) -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &build_health_response(state))
}

/// Handle readiness probe (/ready, /readyz).
///
/// The mock provider keeps verse serving available without an upstream, so
/// the gateway is ready as soon as the catalog validated at startup.
pub fn readiness_check(state: &AppState) -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &build_health_response(state))
}

/// Version information for deployment verification.
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
    pub service: &'static str,
}

/// Handle version endpoint (/version).
pub fn version_info() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &VersionResponse {
            version: env!("CARGO_PKG_VERSION"),
            service: "truthseed-gateway",
        },
    )
}
