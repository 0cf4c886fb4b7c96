//! Book-name normalization and verse-ID formatting.
//!
//! Maps Spanish book names (accented or not, any case) to the lowercase slug
//! identifiers the verse API expects, and formats a [`Reference`] into the
//! API's path syntax. Lookup is exact after lowercasing and trimming; an
//! unrecognized name yields `None`, never a guess.

use crate::reference::Reference;

/// Normalize a Spanish book name to the verse API's book slug.
///
/// Covers all 66 canonical books plus accented/unaccented variants and
/// numeric prefixes ("1 Juan" → "1-juan").
pub fn normalize_book_name(name: &str) -> Option<&'static str> {
    let normalized = name.trim().to_lowercase();
    lookup(&normalized)
}

fn lookup(name: &str) -> Option<&'static str> {
    let slug = match name {
        // Old Testament
        "génesis" | "genesis" => "genesis",
        "éxodo" | "exodo" => "exodo",
        "levítico" | "levitico" => "levitico",
        "números" | "numeros" => "numeros",
        "deuteronomio" => "deuteronomio",
        "josué" | "josue" => "josue",
        "jueces" => "jueces",
        "rut" => "rut",
        "1 samuel" => "1-samuel",
        "2 samuel" => "2-samuel",
        "1 reyes" => "1-reyes",
        "2 reyes" => "2-reyes",
        "1 crónicas" | "1 cronicas" => "1-cronicas",
        "2 crónicas" | "2 cronicas" => "2-cronicas",
        "esdras" => "esdras",
        "nehemías" | "nehemias" => "nehemias",
        "ester" => "ester",
        "job" => "job",
        "salmos" | "salmo" => "salmos",
        "proverbios" => "proverbios",
        "eclesiastés" | "eclesiastes" => "eclesiastes",
        "cantares" | "cantar de los cantares" => "cantares",
        "isaías" | "isaias" => "isaias",
        "jeremías" | "jeremias" => "jeremias",
        "lamentaciones" => "lamentaciones",
        "ezequiel" => "ezequiel",
        "daniel" => "daniel",
        "oseas" => "oseas",
        "joel" => "joel",
        "amós" | "amos" => "amos",
        "abdías" | "abdias" => "abdias",
        "jonás" | "jonas" => "jonas",
        "miqueas" => "miqueas",
        "nahúm" | "nahum" => "nahum",
        "habacuc" => "habacuc",
        "sofonías" | "sofonias" => "sofonias",
        "hageo" => "hageo",
        "zacarías" | "zacarias" => "zacarias",
        "malaquías" | "malaquias" => "malaquias",

        // New Testament
        "mateo" => "mateo",
        "marcos" => "marcos",
        "lucas" => "lucas",
        "juan" => "juan",
        "hechos" => "hechos",
        "romanos" => "romanos",
        "1 corintios" => "1-corintios",
        "2 corintios" => "2-corintios",
        "gálatas" | "galatas" => "galatas",
        "efesios" => "efesios",
        "filipenses" => "filipenses",
        "colosenses" => "colosenses",
        "1 tesalonicenses" => "1-tesalonicenses",
        "2 tesalonicenses" => "2-tesalonicenses",
        "1 timoteo" => "1-timoteo",
        "2 timoteo" => "2-timoteo",
        "tito" => "tito",
        "filemón" | "filemon" => "filemon",
        "hebreos" => "hebreos",
        "santiago" => "santiago",
        "1 pedro" => "1-pedro",
        "2 pedro" => "2-pedro",
        "1 juan" => "1-juan",
        "2 juan" => "2-juan",
        "3 juan" => "3-juan",
        "judas" => "judas",
        "apocalipsis" => "apocalipsis",

        _ => return None,
    };
    Some(slug)
}

/// Format a reference into the verse API's path segment.
///
/// Single verse: `book/chapter/verse`. Range: `book/chapter/start-end`.
/// A range whose upper bound equals `verse_start` collapses to the
/// single-verse form. Returns `None` when the book name is not recognized,
/// in which case no network call must be attempted.
pub fn format_verse_id(reference: &Reference) -> Option<String> {
    let book = normalize_book_name(&reference.book)?;

    match reference.verse_end {
        Some(end) if end != reference.verse_start => Some(format!(
            "{}/{}/{}-{}",
            book, reference.chapter, reference.verse_start, end
        )),
        _ => Some(format!(
            "{}/{}/{}",
            book, reference.chapter, reference.verse_start
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize_book_name("Génesis"), Some("genesis"));
        assert_eq!(normalize_book_name("Juan"), Some("juan"));
        assert_eq!(normalize_book_name("Apocalipsis"), Some("apocalipsis"));
    }

    #[test]
    fn test_normalize_accent_variants_agree() {
        for (with_accent, without) in [
            ("Génesis", "Genesis"),
            ("Éxodo", "Exodo"),
            ("Isaías", "Isaias"),
            ("Gálatas", "Galatas"),
            ("Filemón", "Filemon"),
        ] {
            assert_eq!(
                normalize_book_name(with_accent),
                normalize_book_name(without),
                "accent variants of {without} must map to the same slug"
            );
        }
    }

    #[test]
    fn test_normalize_case_and_whitespace() {
        assert_eq!(normalize_book_name("  JUAN  "), Some("juan"));
        assert_eq!(normalize_book_name("roManos"), Some("romanos"));
        assert_eq!(normalize_book_name(" 1 pedro"), Some("1-pedro"));
    }

    #[test]
    fn test_normalize_numeric_prefix() {
        assert_eq!(normalize_book_name("1 Juan"), Some("1-juan"));
        assert_eq!(normalize_book_name("2 Corintios"), Some("2-corintios"));
        assert_eq!(normalize_book_name("3 Juan"), Some("3-juan"));
    }

    #[test]
    fn test_normalize_unknown_is_none() {
        assert_eq!(normalize_book_name("Invalid"), None);
        assert_eq!(normalize_book_name(""), None);
        assert_eq!(normalize_book_name("4 Juan"), None);
    }

    #[test]
    fn test_format_single_verse() {
        let r = Reference::single("Mateo", 5, 13, "Mateo 5:13", "RVR60");
        assert_eq!(format_verse_id(&r).as_deref(), Some("mateo/5/13"));
    }

    #[test]
    fn test_format_range() {
        let r = Reference::range("Mateo", 5, 13, 14, "Mateo 5:13-14", "RVR60");
        assert_eq!(format_verse_id(&r).as_deref(), Some("mateo/5/13-14"));
    }

    #[test]
    fn test_format_collapses_degenerate_range() {
        let single = Reference::single("Juan", 3, 16, "Juan 3:16", "nvi");
        let degenerate = Reference::range("Juan", 3, 16, 16, "Juan 3:16", "nvi");
        assert_eq!(format_verse_id(&single), format_verse_id(&degenerate));
    }

    #[test]
    fn test_format_unknown_book_is_none() {
        let r = Reference::single("Unknown", 1, 1, "Unknown 1:1", "RVR60");
        assert_eq!(format_verse_id(&r), None);
    }
}
