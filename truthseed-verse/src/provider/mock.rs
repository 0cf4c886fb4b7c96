//! Mock verse provider for offline and demo operation.

use std::collections::HashMap;

use async_trait::async_trait;

use super::traits::{FetchVerseResult, VerseProvider};
use crate::reference::Reference;

/// Canned verses keyed by `book:chapter:verseRange`. Translation is ignored.
const MOCK_VERSES: &[(&str, &str)] = &[
    (
        "Juan:1:12",
        "Mas a todos los que le recibieron, a los que creen en su nombre, les dio potestad de ser hechos hijos de Dios.",
    ),
    (
        "Romanos:8:1-2",
        "Ahora, pues, ninguna condenación hay para los que están en Cristo Jesús, los que no andan conforme a la carne, sino conforme al Espíritu. Porque la ley del Espíritu de vida en Cristo Jesús me ha librado de la ley del pecado y de la muerte.",
    ),
    (
        "Efesios:2:10",
        "Porque somos hechura suya, creados en Cristo Jesús para buenas obras, las cuales Dios preparó de antemano para que anduviésemos en ellas.",
    ),
    (
        "Romanos:8:38-39",
        "Por lo cual estoy seguro de que ni la muerte, ni la vida, ni ángeles, ni principados, ni potestades, ni lo presente, ni lo por venir, ni lo alto, ni lo profundo, ni ninguna otra cosa creada nos podrá separar del amor de Dios, que es en Cristo Jesús Señor nuestro.",
    ),
    (
        "2 Corintios:5:17",
        "De modo que si alguno está en Cristo, nueva criatura es; las cosas viejas pasaron; he aquí todas son hechas nuevas.",
    ),
    (
        "Gálatas:5:1",
        "Estad, pues, firmes en la libertad con que Cristo nos hizo libres, y no estéis otra vez sujetos al yugo de esclavitud.",
    ),
    (
        "Efesios:1:4",
        "Según nos escogió en él antes de la fundación del mundo, para que fuésemos santos y sin mancha delante de él.",
    ),
    (
        "Efesios:1:13-14",
        "En él también vosotros, habiendo oído la palabra de verdad, el evangelio de vuestra salvación, y habiendo creído en él, fuisteis sellados con el Espíritu Santo de la promesa, que es las arras de nuestra herencia hasta la redención de la posesión adquirida, para alabanza de su gloria.",
    ),
    (
        "1 Corintios:6:19-20",
        "¿O ignoráis que vuestro cuerpo es templo del Espíritu Santo, el cual está en vosotros, el cual tenéis de Dios, y que no sois vuestros? Porque habéis sido comprados por precio; glorificad, pues, a Dios en vuestro cuerpo y en vuestro espíritu, los cuales son de Dios.",
    ),
    (
        "Jeremías:31:3",
        "Jehová se manifestó a mí hace ya mucho tiempo, diciendo: Con amor eterno te he amado; por tanto, te prolongué mi misericordia.",
    ),
];

/// Offline provider returning canned verse text.
///
/// Always configured; used when the live API is unconfigured and as the
/// call-time last resort when a live fetch fails.
pub struct MockVerseProvider {
    verses: HashMap<String, String>,
}

impl MockVerseProvider {
    pub fn new() -> Self {
        Self {
            verses: MOCK_VERSES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Add or replace a canned verse.
    pub fn with_verse(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.verses.insert(key.into(), text.into());
        self
    }

    fn lookup_key(reference: &Reference) -> String {
        format!(
            "{}:{}:{}",
            reference.book,
            reference.chapter,
            reference.verse_range()
        )
    }
}

impl Default for MockVerseProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerseProvider for MockVerseProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn fetch_verse(&self, reference: &Reference) -> FetchVerseResult {
        let key = Self::lookup_key(reference);

        match self.verses.get(&key) {
            Some(text) => FetchVerseResult::verse(
                text.clone(),
                reference.clone(),
                reference.translation.clone(),
            ),
            None => FetchVerseResult::error(
                format!("Mock verse not found: {}", reference.display),
                reference.clone(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_hit() {
        let provider = MockVerseProvider::new();
        let reference = Reference::single("Juan", 1, 12, "Juan 1:12", "RVR60");

        let result = provider.fetch_verse(&reference).await;
        let verse = result.as_verse().expect("canned verse should be found");
        assert!(verse.text.starts_with("Mas a todos los que le recibieron"));
    }

    #[tokio::test]
    async fn test_mock_ignores_translation() {
        let provider = MockVerseProvider::new();
        let a = Reference::range("Romanos", 8, 1, 2, "Romanos 8:1-2", "RVR60");
        let b = Reference::range("Romanos", 8, 1, 2, "Romanos 8:1-2", "nvi");

        let text_a = provider.fetch_verse(&a).await.as_verse().map(|v| v.text.clone());
        let text_b = provider.fetch_verse(&b).await.as_verse().map(|v| v.text.clone());
        assert_eq!(text_a, text_b);
    }

    #[tokio::test]
    async fn test_mock_miss() {
        let provider = MockVerseProvider::new();
        let reference = Reference::single("Juan", 21, 25, "Juan 21:25", "RVR60");

        let result = provider.fetch_verse(&reference).await;
        assert!(result.is_error());
    }

    #[tokio::test]
    async fn test_with_verse_builder() {
        let provider = MockVerseProvider::new().with_verse("Salmos:23:1", "Jehová es mi pastor.");
        let reference = Reference::single("Salmos", 23, 1, "Salmos 23:1", "RVR60");

        let result = provider.fetch_verse(&reference).await;
        assert_eq!(
            result.as_verse().map(|v| v.text.as_str()),
            Some("Jehová es mi pastor.")
        );
    }
}
