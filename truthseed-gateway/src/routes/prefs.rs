//! Translation preference endpoints.
//!
//! - `GET /preferences` - the effective translation preference
//! - `PUT /preferences/translation` - save a new preference

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};

use truthseed_verse::Translation;

use crate::server::http::{error_response, json_response};
use crate::server::AppState;

#[derive(Serialize)]
struct PrefsBody {
    translation: &'static str,
}

#[derive(Deserialize)]
struct SetTranslationBody {
    translation: String,
}

/// Handle `GET /preferences`.
pub fn handle_prefs_get(state: &AppState) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &PrefsBody {
            translation: state.prefs.translation().code(),
        },
    )
}

/// Handle `PUT /preferences/translation`.
pub async fn handle_set_translation(
    state: &AppState,
    req: Request<Incoming>,
) -> Response<Full<Bytes>> {
    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            return error_response(StatusCode::BAD_REQUEST, format!("Failed to read body: {e}"));
        }
    };

    let parsed: SetTranslationBody = match serde_json::from_slice(&body) {
        Ok(parsed) => parsed,
        Err(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                r#"Expected JSON body: {"translation": "..."}"#,
            );
        }
    };

    match Translation::parse(&parsed.translation) {
        Some(translation) => {
            state.prefs.set_translation(translation);
            json_response(
                StatusCode::OK,
                &PrefsBody {
                    translation: translation.code(),
                },
            )
        }
        None => error_response(
            StatusCode::BAD_REQUEST,
            format!("Unknown translation: {}", parsed.translation),
        ),
    }
}
