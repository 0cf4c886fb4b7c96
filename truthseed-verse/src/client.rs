//! HTTP client for the verse API.
//!
//! Issues the outbound GET against the configured endpoint, enforces the
//! request timeout, retries once on server errors, and normalizes the
//! response payload (single segment or segment array, HTML-bearing or plain)
//! into cleaned verse text. Every failure path resolves to `None`;
//! diagnostics go to the log, never to the caller.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use tracing::{error, warn};

use crate::books;
use crate::reference::Reference;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Result of a successful verse fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseData {
    pub text: String,
    pub translation: String,
}

/// One verse segment as returned by the API.
///
/// Only the `verse` field carries text; the remaining payload fields are
/// provider metadata and are ignored.
#[derive(Debug, Deserialize)]
struct ApiVerseItem {
    #[serde(default)]
    verse: String,
}

/// The API returns a single object for one verse, an array for a range.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiVerseResponse {
    Single(ApiVerseItem),
    Range(Vec<ApiVerseItem>),
}

/// Outcome of a single request attempt.
enum Attempt {
    Done(Option<VerseData>),
    Retry,
}

/// HTTP client for the unauthenticated verse API.
///
/// URL shape: `{base}/{translation}/{book}/{chapter}/{verse[-end]}`.
pub struct VerseApiClient {
    http: Client,
    base_url: String,
    default_translation: String,
    timeout: Duration,
    retry_delay: Duration,
}

impl VerseApiClient {
    /// Create a client against the given base URL.
    pub fn new(base_url: impl Into<String>, default_translation: impl Into<String>) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        let base_url: String = base_url.into();

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_translation: default_translation.into(),
            timeout: DEFAULT_TIMEOUT,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Override the request timeout and retry delay.
    pub fn with_timing(mut self, timeout: Duration, retry_delay: Duration) -> Self {
        self.timeout = timeout;
        self.retry_delay = retry_delay;
        self
    }

    /// Fetch verse text for a reference.
    ///
    /// Zero network calls are made when the book name cannot be normalized.
    /// Server errors (5xx) are retried exactly once after the retry delay;
    /// all other failures resolve immediately. Never returns more than one
    /// retry's worth of traffic.
    pub async fn fetch_verse(&self, reference: &Reference) -> Option<VerseData> {
        let Some(verse_id) = books::format_verse_id(reference) else {
            error!(book = %reference.book, "unable to parse book name");
            return None;
        };

        let translation = self.translation_for(reference);
        let url = format!("{}/{}/{}", self.base_url, translation, verse_id);

        match self.attempt(&url, reference).await {
            Attempt::Done(result) => result,
            Attempt::Retry => {
                warn!(display = %reference.display, "retrying request after server error");
                tokio::time::sleep(self.retry_delay).await;
                match self.attempt(&url, reference).await {
                    Attempt::Done(result) => result,
                    Attempt::Retry => None,
                }
            }
        }
    }

    /// Translation selector: the reference's own code when present, else the
    /// configured default.
    fn translation_for<'a>(&'a self, reference: &'a Reference) -> &'a str {
        if reference.translation.is_empty() {
            &self.default_translation
        } else {
            &reference.translation
        }
    }

    /// One GET request, classified.
    async fn attempt(&self, url: &str, reference: &Reference) -> Attempt {
        let response = match self.http.get(url).timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                error!(
                    display = %reference.display,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "request timed out"
                );
                return Attempt::Done(None);
            }
            Err(e) => {
                error!(display = %reference.display, error = %e, "network error");
                return Attempt::Done(None);
            }
        };

        let status = response.status();

        if status.is_success() {
            return match response.json::<ApiVerseResponse>().await {
                Ok(data) => Attempt::Done(self.extract_verse_text(data, reference)),
                Err(e) => {
                    error!(display = %reference.display, error = %e, "malformed response payload");
                    Attempt::Done(None)
                }
            };
        }

        if status == StatusCode::NOT_FOUND {
            error!(display = %reference.display, "verse not found");
            return Attempt::Done(None);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            error!("rate limit exceeded");
            return Attempt::Done(None);
        }

        if status.is_server_error() {
            error!(status = status.as_u16(), "server error");
            return Attempt::Retry;
        }

        error!(status = status.as_u16(), display = %reference.display, "api error");
        Attempt::Done(None)
    }

    /// Extract and clean verse text from a parsed payload.
    ///
    /// Segments are joined with single spaces; markup tags are stripped and
    /// whitespace runs collapsed. A payload that reduces to empty text is an
    /// extraction failure, not a success.
    fn extract_verse_text(
        &self,
        data: ApiVerseResponse,
        reference: &Reference,
    ) -> Option<VerseData> {
        let verses = match data {
            ApiVerseResponse::Single(item) => vec![item],
            ApiVerseResponse::Range(items) => items,
        };

        if verses.is_empty() {
            error!(display = %reference.display, "empty response");
            return None;
        }

        let joined = verses
            .iter()
            .map(|item| item.verse.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let text = clean_text(&joined);

        if text.is_empty() {
            error!(display = %reference.display, "empty verse content");
            return None;
        }

        Some(VerseData {
            text,
            translation: self.translation_for(reference).to_string(),
        })
    }
}

/// Strip markup tags and collapse whitespace runs (including newlines and
/// tabs) to single spaces.
fn clean_text(input: &str) -> String {
    let mut stripped = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => stripped.push(c),
            _ => {}
        }
    }

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
