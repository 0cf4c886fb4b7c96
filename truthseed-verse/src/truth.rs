//! Truth model and content validation.
//!
//! A [`Truth`] is one affirmational statement backed by scriptural
//! references. The collection is loaded once from a static content source
//! and is read-only afterwards. Validation enumerates every violation in the
//! file, not just the first, so content authors get the full picture in one
//! pass.

use serde::{Deserialize, Serialize};

use crate::reference::Reference;
use crate::selector::HasId;

/// Category of a truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruthCategory {
    Accepted,
    Secure,
    Significant,
    Identity,
    Freedom,
    Loved,
}

/// One affirmational statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truth {
    /// Unique lowercase-hyphen identifier
    pub id: String,
    pub title: String,
    /// Statement that renounces the lie and affirms the truth
    pub renounce_statement: String,
    pub category: TruthCategory,
    /// Supporting references, in presentation order
    pub references: Vec<Reference>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl HasId for Truth {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Shape of the truths content file.
#[derive(Debug, Deserialize)]
pub struct TruthsFile {
    pub truths: Vec<Truth>,
}

/// Content loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read content file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse truths content: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("content validation failed:\n{}", violations.join("\n"))]
    Invalid { violations: Vec<String> },
}

impl ContentError {
    /// The enumerated violations, when validation failed.
    pub fn violations(&self) -> &[String] {
        match self {
            ContentError::Invalid { violations } => violations,
            _ => &[],
        }
    }
}

/// Check every record against the data-model invariants.
///
/// Returns `Ok(())` only when the whole collection is valid; otherwise every
/// violation found is reported.
pub fn validate(truths: &[Truth]) -> Result<(), ContentError> {
    let mut violations = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    for (index, truth) in truths.iter().enumerate() {
        let label = if truth.id.is_empty() {
            format!("truths[{index}]")
        } else {
            format!("truths[{index}] ({})", truth.id)
        };

        if truth.id.is_empty() {
            violations.push(format!("{label}: id is required"));
        } else if !is_slug(&truth.id) {
            violations.push(format!("{label}: id must be lowercase with hyphens"));
        }

        if !seen_ids.insert(truth.id.clone()) {
            violations.push(format!("{label}: duplicate id"));
        }

        if truth.title.is_empty() {
            violations.push(format!("{label}: title is required"));
        }
        if truth.renounce_statement.is_empty() {
            violations.push(format!("{label}: renounce statement is required"));
        }
        if truth.references.is_empty() {
            violations.push(format!("{label}: at least one reference is required"));
        }

        for (ref_index, reference) in truth.references.iter().enumerate() {
            let ref_label = format!("{label}.references[{ref_index}]");
            if reference.book.is_empty() {
                violations.push(format!("{ref_label}: book name is required"));
            }
            if reference.chapter < 1 {
                violations.push(format!("{ref_label}: chapter must be a positive integer"));
            }
            if reference.verse_start < 1 {
                violations.push(format!("{ref_label}: verse start must be positive"));
            }
            match reference.verse_end {
                Some(end) if end < 1 => {
                    violations.push(format!("{ref_label}: verse end must be positive"));
                }
                Some(end) if end < reference.verse_start => {
                    violations.push(format!(
                        "{ref_label}: verse end must not precede verse start"
                    ));
                }
                _ => {}
            }
            if reference.display.is_empty() {
                violations.push(format!("{ref_label}: display text is required"));
            }
            if reference.translation.is_empty() {
                violations.push(format!("{ref_label}: translation is required"));
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ContentError::Invalid { violations })
    }
}

fn is_slug(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_truth(id: &str) -> Truth {
        Truth {
            id: id.to_string(),
            title: "Soy hijo de Dios".to_string(),
            renounce_statement: "Renuncio a la mentira de que soy rechazado.".to_string(),
            category: TruthCategory::Accepted,
            references: vec![Reference::single("Juan", 1, 12, "Juan 1:12", "RVR60")],
            tags: vec![],
        }
    }

    #[test]
    fn test_valid_collection() {
        let truths = vec![valid_truth("hijo-de-dios"), valid_truth("aceptado")];
        assert!(validate(&truths).is_ok());
    }

    #[test]
    fn test_enumerates_multiple_violations() {
        let mut bad = valid_truth("Bad_ID");
        bad.title = String::new();
        bad.references.clear();

        let err = validate(&[bad]).unwrap_err();
        let violations = err.violations();
        assert_eq!(violations.len(), 3);
        assert!(violations.iter().any(|v| v.contains("lowercase with hyphens")));
        assert!(violations.iter().any(|v| v.contains("title is required")));
        assert!(violations.iter().any(|v| v.contains("at least one reference")));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let truths = vec![valid_truth("mismo-id"), valid_truth("mismo-id")];
        let err = validate(&truths).unwrap_err();
        assert!(err.violations().iter().any(|v| v.contains("duplicate id")));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut truth = valid_truth("rango");
        truth.references = vec![Reference::range("Juan", 3, 16, 2, "Juan 3:16-2", "RVR60")];

        let err = validate(&[truth]).unwrap_err();
        assert!(err
            .violations()
            .iter()
            .any(|v| v.contains("verse end must not precede verse start")));
    }

    #[test]
    fn test_zero_chapter_rejected() {
        let mut truth = valid_truth("capitulo");
        truth.references = vec![Reference::single("Juan", 0, 1, "Juan 0:1", "RVR60")];

        let err = validate(&[truth]).unwrap_err();
        assert!(err
            .violations()
            .iter()
            .any(|v| v.contains("chapter must be a positive integer")));
    }

    #[test]
    fn test_category_codes() {
        let json = r#""freedom""#;
        let category: TruthCategory = serde_json::from_str(json).unwrap();
        assert_eq!(category, TruthCategory::Freedom);
    }
}
