//! Translation preference storage.
//!
//! Persists the user's translation choice in a small JSON prefs file,
//! independent of the verse cache. Reads and writes are fail-soft: a
//! missing, corrupt, or unwritable file falls back to the default.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Supported translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Translation {
    #[default]
    Rv1960,
    Rv1995,
    Nvi,
    Dhh,
    Pdt,
    Kjv,
}

impl Translation {
    /// Translation code as used in verse API URLs and cache keys.
    pub fn code(&self) -> &'static str {
        match self {
            Translation::Rv1960 => "rv1960",
            Translation::Rv1995 => "rv1995",
            Translation::Nvi => "nvi",
            Translation::Dhh => "dhh",
            Translation::Pdt => "pdt",
            Translation::Kjv => "kjv",
        }
    }

    /// Parse a stored code; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rv1960" => Some(Translation::Rv1960),
            "rv1995" => Some(Translation::Rv1995),
            "nvi" => Some(Translation::Nvi),
            "dhh" => Some(Translation::Dhh),
            "pdt" => Some(Translation::Pdt),
            "kjv" => Some(Translation::Kjv),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    translation: Option<String>,
}

/// File-backed preference store.
pub struct PrefsStore {
    path: Option<PathBuf>,
}

impl PrefsStore {
    /// Open a store backed by the given file.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Store that never persists; always answers with defaults.
    pub fn memory() -> Self {
        Self { path: None }
    }

    /// The saved translation preference, or the default when unset or
    /// unreadable.
    pub fn translation(&self) -> Translation {
        self.stored_translation().unwrap_or_default()
    }

    /// The explicitly saved preference, if any. Unreadable or invalid stored
    /// values count as unset.
    pub fn stored_translation(&self) -> Option<Translation> {
        let path = self.path.as_ref()?;

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read prefs");
                return None;
            }
        };

        serde_json::from_str::<PrefsFile>(&contents)
            .ok()
            .and_then(|prefs| prefs.translation)
            .and_then(|code| Translation::parse(&code))
    }

    /// Save the translation preference.
    pub fn set_translation(&self, translation: Translation) {
        let Some(path) = &self.path else {
            return;
        };

        let prefs = PrefsFile {
            translation: Some(translation.code().to_string()),
        };

        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, serde_json::to_string(&prefs)?)
        })();

        if let Err(e) = result {
            warn!(path = %path.display(), error = %e, "failed to save prefs");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join("truthseed-prefs-tests")
            .join(format!("{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_default_translation() {
        assert_eq!(PrefsStore::memory().translation(), Translation::Rv1960);
        assert_eq!(PrefsStore::memory().stored_translation(), None);
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("round-trip");
        let _ = std::fs::remove_file(&path);

        let store = PrefsStore::open(&path);
        store.set_translation(Translation::Nvi);
        assert_eq!(store.translation(), Translation::Nvi);

        // Survives a reopen.
        assert_eq!(PrefsStore::open(&path).translation(), Translation::Nvi);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_stored_value_falls_back() {
        let path = temp_path("invalid");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"translation":"klingon"}"#).unwrap();

        assert_eq!(PrefsStore::open(&path).translation(), Translation::Rv1960);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_parse_codes() {
        for code in ["rv1960", "rv1995", "nvi", "dhh", "pdt", "kjv"] {
            let parsed = Translation::parse(code).expect("known code");
            assert_eq!(parsed.code(), code);
        }
        assert_eq!(Translation::parse("esv"), None);
    }
}
