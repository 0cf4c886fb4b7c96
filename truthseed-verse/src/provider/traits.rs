//! Core trait for verse providers.
//!
//! This module defines the `VerseProvider` trait - the abstraction over
//! different verse text sources (live API, offline mock).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::reference::Reference;

/// Successful verse fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseResult {
    /// Cleaned verse text, markup-free
    pub text: String,
    /// The reference that was fetched
    pub reference: Reference,
    /// Translation the text was served in
    pub translation: String,
}

/// Failed verse fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseError {
    /// Human-readable failure message
    pub error: String,
    /// The reference that was requested
    pub reference: Reference,
}

/// Outcome of a fetch attempt. Exactly one of the two shapes is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FetchVerseResult {
    Verse(VerseResult),
    Error(VerseError),
}

impl FetchVerseResult {
    /// Build a success result.
    pub fn verse(
        text: impl Into<String>,
        reference: Reference,
        translation: impl Into<String>,
    ) -> Self {
        Self::Verse(VerseResult {
            text: text.into(),
            reference,
            translation: translation.into(),
        })
    }

    /// Build an error result.
    pub fn error(message: impl Into<String>, reference: Reference) -> Self {
        Self::Error(VerseError {
            error: message.into(),
            reference,
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The verse payload, if this is a success.
    pub fn as_verse(&self) -> Option<&VerseResult> {
        match self {
            Self::Verse(v) => Some(v),
            Self::Error(_) => None,
        }
    }
}

/// Core trait for verse providers.
///
/// Callers operate purely through this interface; which implementation is
/// active (live API or mock) is decided once at construction time.
#[async_trait]
pub trait VerseProvider: Send + Sync {
    /// Provider identifier for logging.
    fn name(&self) -> &str;

    /// Whether required configuration is present.
    fn is_configured(&self) -> bool;

    /// Fetch verse text for a reference.
    ///
    /// Never panics and never returns a transport error: every failure mode
    /// collapses to [`FetchVerseResult::Error`] with a readable message.
    async fn fetch_verse(&self, reference: &Reference) -> FetchVerseResult;
}
