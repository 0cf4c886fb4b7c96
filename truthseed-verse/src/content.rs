//! Truth catalog loading.
//!
//! The catalog is parsed and validated once at startup and held in memory
//! read-only for the process lifetime. The default content ships embedded in
//! the binary; a file path can override it for deployments with their own
//! content.

use std::collections::HashSet;
use std::path::Path;

use crate::truth::{validate, ContentError, Truth, TruthsFile};

/// Content compiled into the binary.
pub const DEFAULT_CONTENT: &str = include_str!("../content/truths.json");

/// In-memory, read-only truth collection.
#[derive(Debug)]
pub struct TruthCatalog {
    truths: Vec<Truth>,
}

impl TruthCatalog {
    /// Load the embedded default content.
    pub fn load_default() -> Result<Self, ContentError> {
        Self::load_str(DEFAULT_CONTENT)
    }

    /// Parse and validate a JSON content string.
    pub fn load_str(json: &str) -> Result<Self, ContentError> {
        let file: TruthsFile = serde_json::from_str(json)?;
        validate(&file.truths)?;
        Ok(Self {
            truths: file.truths,
        })
    }

    /// Load content from a file path.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let contents = std::fs::read_to_string(path)?;
        Self::load_str(&contents)
    }

    pub fn truths(&self) -> &[Truth] {
        &self.truths
    }

    pub fn get(&self, id: &str) -> Option<&Truth> {
        self.truths.iter().find(|truth| truth.id == id)
    }

    pub fn len(&self) -> usize {
        self.truths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.truths.is_empty()
    }

    /// Number of distinct categories in use.
    pub fn category_count(&self) -> usize {
        self.truths
            .iter()
            .map(|truth| truth.category)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Total number of references across all truths.
    pub fn reference_count(&self) -> usize {
        self.truths.iter().map(|truth| truth.references.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_content_loads() {
        let catalog = TruthCatalog::load_default().expect("embedded content must be valid");
        assert!(!catalog.is_empty());
        assert!(catalog.category_count() >= 4);
        assert!(catalog.reference_count() >= catalog.len());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = TruthCatalog::load_default().unwrap();
        let truth = catalog.get("soy-hijo-de-dios").expect("known id");
        assert_eq!(truth.references[0].display, "Juan 1:12");
        assert!(catalog.get("no-existe").is_none());
    }

    #[test]
    fn test_invalid_content_reports_violations() {
        let json = r#"{
            "truths": [
                {
                    "id": "Mal ID",
                    "title": "",
                    "renounceStatement": "x",
                    "category": "loved",
                    "references": []
                }
            ]
        }"#;

        let err = TruthCatalog::load_str(json).unwrap_err();
        assert!(err.violations().len() >= 3);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = TruthCatalog::load_str("{").unwrap_err();
        assert!(matches!(err, ContentError::Parse(_)));
    }
}
