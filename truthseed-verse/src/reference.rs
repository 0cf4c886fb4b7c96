//! Scriptural reference model.
//!
//! A [`Reference`] is an immutable citation of a span of verses within a
//! book/chapter, plus a translation code. It is constructed by the boundary
//! (content loader or gateway query parsing) from validated input and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

/// Translation code applied when the content source omits one.
pub const DEFAULT_TRANSLATION: &str = "RVR60";

/// A citation of one verse or an inclusive verse range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Book name as written in the content source (e.g., "Juan", "1 Pedro")
    pub book: String,
    /// Chapter number, 1-based
    pub chapter: u32,
    /// First verse of the span, 1-based
    pub verse_start: u32,
    /// Inclusive upper bound; absent for a single verse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse_end: Option<u32>,
    /// Human-readable citation, authoritative for display
    pub display: String,
    /// Translation code (e.g., "RVR60", "nvi")
    #[serde(default = "default_translation")]
    pub translation: String,
}

fn default_translation() -> String {
    DEFAULT_TRANSLATION.to_string()
}

impl Reference {
    /// Create a single-verse reference.
    pub fn single(
        book: impl Into<String>,
        chapter: u32,
        verse: u32,
        display: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse_start: verse,
            verse_end: None,
            display: display.into(),
            translation: translation.into(),
        }
    }

    /// Create a verse-range reference.
    pub fn range(
        book: impl Into<String>,
        chapter: u32,
        verse_start: u32,
        verse_end: u32,
        display: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse_start,
            verse_end: Some(verse_end),
            display: display.into(),
            translation: translation.into(),
        }
    }

    /// Verse span formatted as `start` or `start-end`.
    pub fn verse_range(&self) -> String {
        match self.verse_end {
            Some(end) => format!("{}-{}", self.verse_start, end),
            None => self.verse_start.to_string(),
        }
    }

    /// Cache key for verse lookup.
    ///
    /// Format: `translation:book:chapter:verseRange`. Deterministic and
    /// collision-free for distinct tuples.
    pub fn cache_key(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.translation,
            self.book,
            self.chapter,
            self.verse_range()
        )
    }

    /// The precomputed display string, returned verbatim.
    ///
    /// The `display` field is authoritative: callers control exact
    /// formatting, so it is never recomputed from the parts.
    pub fn display(&self) -> &str {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_single_verse() {
        let r = Reference::single("Juan", 1, 12, "Juan 1:12", "RVR60");
        assert_eq!(r.cache_key(), "RVR60:Juan:1:12");
    }

    #[test]
    fn test_cache_key_range() {
        let r = Reference::range("Romanos", 8, 38, 39, "Romanos 8:38-39", "nvi");
        assert_eq!(r.cache_key(), "nvi:Romanos:8:38-39");
    }

    #[test]
    fn test_cache_key_distinct_tuples() {
        let a = Reference::single("Juan", 1, 12, "Juan 1:12", "RVR60");
        let b = Reference::single("Juan", 1, 12, "Juan 1:12", "nvi");
        let c = Reference::single("Juan", 11, 2, "Juan 11:2", "RVR60");
        assert_ne!(a.cache_key(), b.cache_key());
        assert_ne!(a.cache_key(), c.cache_key());
    }

    #[test]
    fn test_display_is_verbatim() {
        let r = Reference::range("Efesios", 1, 13, 14, "Efesios 1:13–14", "RVR60");
        assert_eq!(r.display(), "Efesios 1:13–14");
    }

    #[test]
    fn test_deserialize_defaults_translation() {
        let r: Reference = serde_json::from_str(
            r#"{"book":"Juan","chapter":3,"verseStart":16,"display":"Juan 3:16"}"#,
        )
        .unwrap();
        assert_eq!(r.translation, DEFAULT_TRANSLATION);
        assert_eq!(r.verse_end, None);
    }
}
