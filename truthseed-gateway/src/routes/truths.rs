//! Truth catalog endpoints.
//!
//! - `GET /truths` - the full validated catalog
//! - `GET /truths/random?seed?` - one truth, avoiding recent repeats

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use truthseed_verse::Truth;

use crate::server::http::{error_response, json_response};
use crate::server::AppState;

#[derive(Serialize)]
struct TruthsBody<'a> {
    truths: &'a [Truth],
}

/// Handle `GET /truths`.
pub fn handle_truths_list(state: &AppState) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &TruthsBody {
            truths: state.catalog.truths(),
        },
    )
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RandomQuery {
    /// Optional seed for reproducible selection
    seed: Option<u64>,
}

/// Handle `GET /truths/random`.
pub fn handle_truths_random(state: &AppState, query: Option<&str>) -> Response<Full<Bytes>> {
    let query: RandomQuery = serde_urlencoded::from_str(query.unwrap_or("")).unwrap_or_default();

    match state
        .selector
        .select(state.catalog.truths(), state.args.avoid_count, query.seed)
    {
        Some(truth) => json_response(StatusCode::OK, truth),
        None => error_response(StatusCode::NOT_FOUND, "No truths available"),
    }
}
