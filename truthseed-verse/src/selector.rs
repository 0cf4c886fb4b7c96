//! Random selection with recency avoidance.
//!
//! Picks an item while avoiding the most recently shown ones. The history is
//! session state: bounded, most-recent-first, deduplicated, and independent
//! of the verse cache.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

/// Default number of recent selections to avoid.
pub const DEFAULT_AVOID_COUNT: usize = 3;

/// Anything with a stable string id.
pub trait HasId {
    fn id(&self) -> &str;
}

/// Selector holding the recent-selection history for one session.
#[derive(Default)]
pub struct RandomSelector {
    history: Mutex<Vec<String>>,
}

impl RandomSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a random item, avoiding the `avoid_count` most recent ids.
    ///
    /// Empty input yields `None`. A single-element input yields that element
    /// (still recorded). When every item is within the recency window the
    /// full list becomes the pool; selection is never blocked. A seed makes
    /// the pick deterministic for reproducible tests.
    pub fn select<'a, T: HasId>(
        &self,
        items: &'a [T],
        avoid_count: usize,
        seed: Option<u64>,
    ) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        if items.len() == 1 {
            self.record(items[0].id(), avoid_count);
            return Some(&items[0]);
        }

        let recent = self.recent();
        let available: Vec<&T> = items
            .iter()
            .filter(|item| !recent.iter().any(|id| id == item.id()))
            .collect();

        // All items recent: fall back to the full list rather than block.
        let pool: Vec<&T> = if available.is_empty() {
            items.iter().collect()
        } else {
            available
        };

        let index = match seed {
            Some(seed) => StdRng::seed_from_u64(seed).gen_range(0..pool.len()),
            None => thread_rng().gen_range(0..pool.len()),
        };
        let selected = pool[index];

        self.record(selected.id(), avoid_count);
        Some(selected)
    }

    /// Ids currently in the recency window, most recent first.
    pub fn recent(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn recent_count(&self) -> usize {
        self.lock().len()
    }

    /// Forget the session history.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Move an id to the front, dedup, truncate to the window size.
    fn record(&self, id: &str, avoid_count: usize) {
        let mut history = self.lock();
        history.retain(|existing| existing != id);
        history.insert(0, id.to_string());
        history.truncate(avoid_count);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.history.lock().unwrap_or_else(|e| e.into_inner())
    }
}
