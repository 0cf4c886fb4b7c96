//! TruthSeed verse retrieval.
//!
//! Core library for serving affirmational statements ("truths") backed by
//! scriptural references:
//! - Trait-based verse providers (live API, offline mock) with a two-level
//!   fallback chain
//! - Book-name normalization and verse-ID formatting for the verse API
//! - HTTP client with timeout, bounded retry, and payload cleanup
//! - Persistent verse cache with lazy 7-day expiry
//! - Random truth selection with recency avoidance
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              VerseService               │
//! │   (cache → provider → mock fallback)    │
//! └────────────────┬────────────────────────┘
//!                  │
//!      ┌───────────┴───────────┐
//!      ▼                       ▼
//! ┌─────────────┐       ┌─────────────┐
//! │VerseProvider│       │ VerseCache  │
//! │ (api/mock)  │       │ (7-day TTL) │
//! └─────────────┘       └─────────────┘
//! ```

pub mod books;
pub mod cache;
pub mod client;
pub mod content;
pub mod prefs;
pub mod provider;
pub mod reference;
pub mod selector;
pub mod service;
pub mod speech;
pub mod truth;

// Re-export main types for convenience
pub use cache::VerseCache;
pub use content::TruthCatalog;
pub use prefs::{PrefsStore, Translation};
pub use provider::{
    create_provider, ApiVerseProvider, FetchVerseResult, MockVerseProvider, ProviderConfig,
    VerseError, VerseProvider, VerseResult,
};
pub use reference::Reference;
pub use selector::{HasId, RandomSelector, DEFAULT_AVOID_COUNT};
pub use service::{VerseService, VerseSlot};
pub use speech::{NullSpeechService, SpeechRate, SpeechService, SpeechStatus};
pub use truth::{ContentError, Truth, TruthCategory};
