//! Persistent verse cache with lazy expiry.
//!
//! Key-value store for fetched verse text, backed by a JSON file under the
//! application data directory with a DashMap working set. Entries carry an
//! epoch-ms timestamp; `get` treats entries older than the expiry window as
//! absent and deletes them on that read. There is no background eviction.
//!
//! Caching is an optimization, not a correctness requirement: every storage
//! error is caught and surfaced as absent/no-op, and a missing or unwritable
//! file degrades to memory-only operation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Entries older than this are treated as absent (7 days).
pub const CACHE_DURATION_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// One cached verse.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    text: String,
    timestamp: i64,
}

/// Durable verse-text cache.
pub struct VerseCache {
    entries: DashMap<String, CacheEntry>,
    path: Option<PathBuf>,
    duration_ms: i64,
}

impl VerseCache {
    /// Open a cache backed by the given file, loading any existing entries.
    ///
    /// A missing file starts empty; an unreadable or corrupt file is logged
    /// and ignored.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = DashMap::new();

        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<HashMap<String, CacheEntry>>(&contents) {
                Ok(stored) => {
                    for (key, entry) in stored {
                        entries.insert(key, entry);
                    }
                }
                Err(e) => warn!(path = %path.display(), error = %e, "ignoring corrupt verse cache"),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "failed to read verse cache"),
        }

        Self {
            entries,
            path: Some(path),
            duration_ms: CACHE_DURATION_MS,
        }
    }

    /// Memory-only cache, used when no data directory is configured.
    pub fn memory() -> Self {
        Self {
            entries: DashMap::new(),
            path: None,
            duration_ms: CACHE_DURATION_MS,
        }
    }

    /// Override the expiry window.
    pub fn with_duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Get cached verse text, lazily expiring stale entries.
    pub fn get(&self, key: &str) -> Option<String> {
        let (text, expired) = match self.entries.get(key) {
            Some(entry) => {
                let age = now_ms() - entry.timestamp;
                if age > self.duration_ms {
                    (None, true)
                } else {
                    (Some(entry.text.clone()), false)
                }
            }
            None => (None, false),
        };

        if expired {
            debug!(%key, "verse cache entry expired");
            self.delete(key);
        }

        text
    }

    /// Store verse text under a key, overwriting any previous entry.
    pub fn set(&self, key: &str, text: &str) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                text: text.to_string(),
                timestamp: now_ms(),
            },
        );
        self.persist();
    }

    /// Remove one entry.
    pub fn delete(&self, key: &str) {
        self.entries.remove(key);
        self.persist();
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.entries.clear();
        self.persist();
    }

    /// Number of live entries, counting not-yet-expired ones only.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether entries survive process restarts.
    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    /// Write the working set through to disk. Failures are logged and
    /// swallowed; the in-memory state remains authoritative.
    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };

        let snapshot: HashMap<String, CacheEntry> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();

        if let Err(e) = write_json(path, &snapshot) {
            warn!(path = %path.display(), error = %e, "failed to persist verse cache");
        }
    }

    #[cfg(test)]
    fn insert_with_timestamp(&self, key: &str, text: &str, timestamp: i64) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                text: text.to_string(),
                timestamp,
            },
        );
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string(value)?;
    std::fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join("truthseed-cache-tests")
            .join(format!("{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let cache = VerseCache::memory();
        cache.set("RVR60:Juan:1:12", "Mas a todos los que le recibieron...");
        assert_eq!(
            cache.get("RVR60:Juan:1:12").as_deref(),
            Some("Mas a todos los que le recibieron...")
        );
    }

    #[test]
    fn test_get_missing_is_none() {
        let cache = VerseCache::memory();
        assert_eq!(cache.get("nvi:Juan:3:16"), None);
    }

    #[test]
    fn test_expired_entry_is_deleted_on_read() {
        let cache = VerseCache::memory();
        let stale = now_ms() - CACHE_DURATION_MS - 1;
        cache.insert_with_timestamp("RVR60:Juan:1:12", "texto", stale);

        assert_eq!(cache.get("RVR60:Juan:1:12"), None);
        // The read deleted the entry, not just masked it.
        assert!(cache.is_empty());
    }

    #[test]
    fn test_fresh_entry_survives_read() {
        let cache = VerseCache::memory();
        cache.set("k", "v");
        assert_eq!(cache.get("k").as_deref(), Some("v"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_delete_and_clear() {
        let cache = VerseCache::memory();
        cache.set("a", "1");
        cache.set("b", "2");

        cache.delete("a");
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b").as_deref(), Some("2"));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_persists_across_reopen() {
        let path = temp_path("reopen");
        let _ = std::fs::remove_file(&path);

        {
            let cache = VerseCache::open(&path);
            cache.set("RVR60:Efesios:2:10", "Porque somos hechura suya...");
        }

        let reopened = VerseCache::open(&path);
        assert_eq!(
            reopened.get("RVR60:Efesios:2:10").as_deref(),
            Some("Porque somos hechura suya...")
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let path = temp_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json at all").unwrap();

        let cache = VerseCache::open(&path);
        assert!(cache.is_empty());
        // Still usable after the bad load.
        cache.set("k", "v");
        assert_eq!(cache.get("k").as_deref(), Some("v"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unwritable_path_is_fail_soft() {
        let cache = VerseCache::open("/dev/null/impossible/cache.json");
        cache.set("k", "v");
        // Persistence failed, but the working set still answers.
        assert_eq!(cache.get("k").as_deref(), Some("v"));
    }
}
