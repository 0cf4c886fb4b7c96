//! Verse proxy endpoint.
//!
//! `GET /verse?book&chapter&verseStart&verseEnd?&translation?`
//!
//! Responses:
//! - 200 `{text, reference, translation}` with a 7-day shared cache and
//!   1-day stale-while-revalidate window
//! - 400 invalid params, every violation enumerated
//! - 404 verse not resolvable by any provider
//! - 503 upstream unconfigured and the mock table misses

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use truthseed_verse::{FetchVerseResult, Reference};

use crate::server::http::{error_response, json_response};
use crate::server::AppState;

const VERSE_CACHE_CONTROL: &str = "public, s-maxage=604800, stale-while-revalidate=86400";

/// Raw query parameters. Numbers arrive as strings and are validated here at
/// the boundary so malformed input never reaches the core.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerseQuery {
    pub book: Option<String>,
    pub chapter: Option<String>,
    pub verse_start: Option<String>,
    pub verse_end: Option<String>,
    pub translation: Option<String>,
}

#[derive(Serialize)]
struct InvalidParams {
    error: &'static str,
    details: Vec<String>,
}

/// Validate the query and build a [`Reference`], collecting every violation.
pub fn parse_reference(query: &VerseQuery, default_translation: &str) -> Result<Reference, Vec<String>> {
    let mut violations = Vec::new();

    let book = match query.book.as_deref() {
        Some(book) if !book.is_empty() => Some(book),
        _ => {
            violations.push("book is required".to_string());
            None
        }
    };

    let chapter = parse_positive("chapter", query.chapter.as_deref(), &mut violations);
    let verse_start = parse_positive("verseStart", query.verse_start.as_deref(), &mut violations);

    let verse_end = match query.verse_end.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<u32>() {
            Ok(end) if end >= 1 => Some(end),
            _ => {
                violations.push("verseEnd must be a positive integer".to_string());
                None
            }
        },
    };

    if let (Some(start), Some(end)) = (verse_start, verse_end) {
        if end < start {
            violations.push("verseEnd must not precede verseStart".to_string());
        }
    }

    let translation = match query.translation.as_deref() {
        Some(translation) if !translation.is_empty() => translation.to_string(),
        Some(_) => {
            violations.push("translation must not be empty".to_string());
            default_translation.to_string()
        }
        None => default_translation.to_string(),
    };

    if !violations.is_empty() {
        return Err(violations);
    }

    // Violations are empty, so the required fields parsed.
    let book = book.unwrap_or_default();
    let chapter = chapter.unwrap_or(1);
    let verse_start = verse_start.unwrap_or(1);

    let display = match verse_end {
        Some(end) => format!("{book} {chapter}:{verse_start}-{end}"),
        None => format!("{book} {chapter}:{verse_start}"),
    };

    Ok(Reference {
        book: book.to_string(),
        chapter,
        verse_start,
        verse_end,
        display,
        translation,
    })
}

fn parse_positive(name: &str, raw: Option<&str>, violations: &mut Vec<String>) -> Option<u32> {
    match raw {
        None => {
            violations.push(format!("{name} is required"));
            None
        }
        Some(raw) => match raw.parse::<u32>() {
            Ok(value) if value >= 1 => Some(value),
            _ => {
                violations.push(format!("{name} must be a positive integer"));
                None
            }
        },
    }
}

/// Handle `GET /verse`.
pub async fn handle_verse(state: &AppState, query: Option<&str>) -> Response<Full<Bytes>> {
    let query: VerseQuery = match serde_urlencoded::from_str(query.unwrap_or("")) {
        Ok(query) => query,
        Err(e) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                &InvalidParams {
                    error: "Invalid query parameters",
                    details: vec![e.to_string()],
                },
            );
        }
    };

    // Translation selector chain: request param, stored preference,
    // configured default.
    let default_translation = state
        .prefs
        .stored_translation()
        .map(|t| t.code().to_string())
        .unwrap_or_else(|| state.args.default_translation.clone());

    let reference = match parse_reference(&query, &default_translation) {
        Ok(reference) => reference,
        Err(details) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                &InvalidParams {
                    error: "Invalid query parameters",
                    details,
                },
            );
        }
    };

    match state.service.fetch_verse(&reference).await {
        FetchVerseResult::Verse(verse) => {
            let mut response = json_response(StatusCode::OK, &verse);
            if let Ok(value) = VERSE_CACHE_CONTROL.parse() {
                response.headers_mut().insert("Cache-Control", value);
            }
            response
        }
        FetchVerseResult::Error(err) => {
            if state.service.has_upstream() {
                error_response(StatusCode::NOT_FOUND, err.error)
            } else {
                error_response(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Verse API not configured. Set VERSE_API_URL to enable live verse lookup.",
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> VerseQuery {
        let encoded = serde_urlencoded::to_string(pairs).unwrap();
        serde_urlencoded::from_str(&encoded).unwrap()
    }

    #[test]
    fn test_parse_valid_single_verse() {
        let q = query(&[("book", "Juan"), ("chapter", "3"), ("verseStart", "16")]);
        let reference = parse_reference(&q, "RVR60").unwrap();
        assert_eq!(reference.book, "Juan");
        assert_eq!(reference.chapter, 3);
        assert_eq!(reference.verse_start, 16);
        assert_eq!(reference.verse_end, None);
        assert_eq!(reference.display, "Juan 3:16");
        assert_eq!(reference.translation, "RVR60");
    }

    #[test]
    fn test_parse_range_and_translation() {
        let q = query(&[
            ("book", "Romanos"),
            ("chapter", "8"),
            ("verseStart", "1"),
            ("verseEnd", "2"),
            ("translation", "nvi"),
        ]);
        let reference = parse_reference(&q, "RVR60").unwrap();
        assert_eq!(reference.display, "Romanos 8:1-2");
        assert_eq!(reference.translation, "nvi");
    }

    #[test]
    fn test_parse_enumerates_all_violations() {
        let q = query(&[("chapter", "0"), ("verseStart", "abc")]);
        let violations = parse_reference(&q, "RVR60").unwrap_err();
        assert_eq!(violations.len(), 3);
        assert!(violations.iter().any(|v| v.contains("book is required")));
        assert!(violations.iter().any(|v| v.contains("chapter")));
        assert!(violations.iter().any(|v| v.contains("verseStart")));
    }

    #[test]
    fn test_parse_rejects_inverted_range() {
        let q = query(&[
            ("book", "Juan"),
            ("chapter", "3"),
            ("verseStart", "16"),
            ("verseEnd", "2"),
        ]);
        let violations = parse_reference(&q, "RVR60").unwrap_err();
        assert!(violations
            .iter()
            .any(|v| v.contains("verseEnd must not precede verseStart")));
    }
}
