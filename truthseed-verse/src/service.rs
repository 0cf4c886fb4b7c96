//! VerseService - main entry point for verse retrieval.
//!
//! Orchestrates the cache and the provider chain: cache lookup, provider
//! fetch with write-through on success, and the call-time mock fallback for
//! a failed live fetch. Also provides [`VerseSlot`], the guard that keeps a
//! stale in-flight response from overwriting a newer selection's displayed
//! state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::cache::VerseCache;
use crate::provider::{create_provider, FetchVerseResult, MockVerseProvider, ProviderConfig, VerseProvider};
use crate::reference::Reference;

/// Verse retrieval front door.
///
/// Constructed once at startup and shared as an `Arc`; consumers receive it
/// by injection rather than through a global.
pub struct VerseService {
    provider: Arc<dyn VerseProvider>,
    /// Call-time last resort. `None` when the primary already is the mock.
    fallback: Option<Arc<dyn VerseProvider>>,
    cache: Arc<VerseCache>,
}

impl VerseService {
    /// Assemble the provider chain from configuration.
    ///
    /// With an upstream configured the chain is live provider + mock
    /// fallback; without one the factory already selected the mock and no
    /// second level is added.
    pub fn from_config(config: &ProviderConfig, cache: Arc<VerseCache>) -> Self {
        let provider = create_provider(config);
        let fallback: Option<Arc<dyn VerseProvider>> = if config.has_upstream() {
            Some(Arc::new(MockVerseProvider::new()))
        } else {
            None
        };

        Self {
            provider,
            fallback,
            cache,
        }
    }

    /// Explicit chain construction, used by tests and embedders.
    pub fn new(
        provider: Arc<dyn VerseProvider>,
        fallback: Option<Arc<dyn VerseProvider>>,
        cache: Arc<VerseCache>,
    ) -> Self {
        Self {
            provider,
            fallback,
            cache,
        }
    }

    /// Name of the active primary provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Whether a live upstream is in the chain.
    pub fn has_upstream(&self) -> bool {
        self.fallback.is_some()
    }

    /// Whether the cache survives restarts.
    pub fn cache_persistent(&self) -> bool {
        self.cache.is_persistent()
    }

    /// Fetch verse text for a reference.
    ///
    /// Checks the cache first; on a miss delegates to the provider and
    /// writes successful text back. A failed live fetch gets one mock
    /// attempt before the error is surfaced.
    pub async fn fetch_verse(&self, reference: &Reference) -> FetchVerseResult {
        let key = reference.cache_key();

        if let Some(text) = self.cache.get(&key) {
            debug!(%key, "verse cache hit");
            return FetchVerseResult::verse(text, reference.clone(), reference.translation.clone());
        }

        match self.provider.fetch_verse(reference).await {
            FetchVerseResult::Verse(verse) => {
                self.cache.set(&key, &verse.text);
                FetchVerseResult::Verse(verse)
            }
            FetchVerseResult::Error(error) => {
                if let Some(fallback) = &self.fallback {
                    warn!(
                        provider = self.provider.name(),
                        error = %error.error,
                        "provider failed, trying fallback"
                    );
                    if let FetchVerseResult::Verse(verse) = fallback.fetch_verse(reference).await {
                        return FetchVerseResult::Verse(verse);
                    }
                }
                FetchVerseResult::Error(error)
            }
        }
    }

    /// Fetch into a display slot, discarding the result if a newer request
    /// began while this one was in flight.
    pub async fn fetch_into(&self, slot: &VerseSlot, reference: &Reference) -> bool {
        let generation = slot.begin();
        let result = self.fetch_verse(reference).await;
        slot.commit(generation, result)
    }
}

/// Display state for one verse widget.
///
/// Requests are stamped with a monotonically increasing generation; a result
/// commits only when no newer request has begun, so late responses for
/// superseded selections are discarded instead of overwriting newer state.
#[derive(Default)]
pub struct VerseSlot {
    generation: AtomicU64,
    state: Mutex<Option<FetchVerseResult>>,
}

impl VerseSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a new request, superseding any in-flight ones.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply a result for the given request generation.
    ///
    /// Returns `false` (and leaves the state untouched) when a newer request
    /// has begun since.
    pub fn commit(&self, generation: u64, result: FetchVerseResult) -> bool {
        if generation != self.generation.load(Ordering::SeqCst) {
            debug!(generation, "discarding stale verse response");
            return false;
        }
        *self.lock() = Some(result);
        true
    }

    /// The currently displayed result.
    pub fn current(&self) -> Option<FetchVerseResult> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<FetchVerseResult>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
