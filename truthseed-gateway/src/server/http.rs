//! HTTP server implementation.
//!
//! hyper http1 with TokioIo for async handling; one task per connection,
//! shared state behind an `Arc`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use truthseed_verse::{PrefsStore, RandomSelector, TruthCatalog, VerseService};

use crate::config::Args;
use crate::routes;

/// Shared application state.
///
/// Constructed once at startup; every consumer receives it by injection.
pub struct AppState {
    pub args: Args,
    /// Validated truth catalog, read-only for the process lifetime
    pub catalog: TruthCatalog,
    /// Verse retrieval chain (cache → provider → mock fallback)
    pub service: VerseService,
    /// Session recency history for /truths/random
    pub selector: RandomSelector,
    /// Translation preference store
    pub prefs: PrefsStore,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        args: Args,
        catalog: TruthCatalog,
        service: VerseService,
        prefs: PrefsStore,
    ) -> Self {
        Self {
            args,
            catalog,
            service,
            selector: RandomSelector::new(),
            prefs,
            started_at: Instant::now(),
        }
    }
}

/// Accept loop.
pub async fn run(state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "TruthSeed gateway listening on {} as node {}",
        state.args.listen, state.args.node_id
    );
    if !state.service.has_upstream() {
        warn!("no verse API configured - serving mock verses");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests.
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(|q| q.to_string());

    debug!("[{}] {} {}", addr, method, path);

    let response = match (method, path.as_str()) {
        // Liveness probe - returns 200 while the gateway is running
        (Method::GET, "/health") | (Method::GET, "/healthz") => {
            routes::health_check(&state)
        }

        // Readiness probe - the provider chain always has a serving path,
        // so readiness mirrors liveness; the body reports upstream status
        (Method::GET, "/ready") | (Method::GET, "/readyz") => {
            routes::readiness_check(&state)
        }

        // Version info for deployment verification
        (Method::GET, "/version") => routes::version_info(),

        // Verse proxy
        (Method::GET, "/verse") => {
            routes::handle_verse(&state, query.as_deref()).await
        }

        // Truth catalog
        (Method::GET, "/truths") => routes::handle_truths_list(&state),
        (Method::GET, "/truths/random") => {
            routes::handle_truths_random(&state, query.as_deref())
        }

        // Translation preference
        (Method::GET, "/preferences") => routes::handle_prefs_get(&state),
        (Method::PUT, "/preferences/translation") => {
            routes::handle_set_translation(&state, req).await
        }

        // CORS preflight
        (Method::OPTIONS, _) => preflight_response(),

        _ => not_found_response(&path),
    };

    Ok(response)
}

/// Serialize a body to a JSON response with CORS headers.
///
/// A body that fails to serialize is the one unexpected-failure path a
/// handler can hit; it becomes a 500.
pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let (status, body) = match serde_json::to_string(body) {
        Ok(body) => (status, Bytes::from(body)),
        Err(e) => {
            error!("Failed to serialize response body: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(br#"{"error":"Unexpected failure"}"#),
            )
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(body))
        .unwrap()
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// JSON error response.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response<Full<Bytes>> {
    json_response(
        status,
        &ErrorBody {
            error: message.into(),
        },
    )
}

fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    error_response(StatusCode::NOT_FOUND, format!("Not found: {path}"))
}

fn preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, PUT, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Full::new(Bytes::new()))
        .unwrap()
}
