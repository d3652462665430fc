//! Reply composition.
//!
//! Resolves zero, one, or many matched rules into a final reply. Multiple
//! matches are shuffled (Fisher–Yates, uniform permutation), capped, and
//! joined with the segment separator; the transport layer splits on it and
//! renders each segment as its own message bubble.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::catalog::IntentCatalog;
use crate::engine::normalize::NormalizedMessage;

/// Structural delimiter between independent reply segments.
///
/// Never appears inside a single logical reply; the catalog rejects any
/// template containing it.
pub const SEGMENT_SEPARATOR: &str = "\n\n";

/// Replies used when no rule matches at all.
const DEFAULT_REPLIES: &[&str] = &[
    "No estoy seguro de haber entendido. Puedes preguntarme por proyectos, tecnologías, formación o contacto.",
    "Esa se me escapa. Prueba con algo sobre su perfil profesional: habilidades, trayectoria, proyectos…",
    "Hmm, no tengo respuesta para eso. Pregúntame por su stack, sus proyectos o cómo contactarle.",
];

/// A composed reply: one or more ordered segments.
///
/// Each call to the composer produces a fresh composition; nothing is
/// memoized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedReply {
    segments: Vec<String>,
}

impl ComposedReply {
    /// A single-segment reply.
    #[must_use]
    pub fn single(text: String) -> Self {
        Self {
            segments: vec![text],
        }
    }

    /// A reply from pre-built segments.
    #[must_use]
    pub fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// The segments, in display order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Mutable access to the segments (used by the personalizer).
    pub(crate) fn segments_mut(&mut self) -> &mut Vec<String> {
        &mut self.segments
    }

    /// The full reply text, segments joined by [`SEGMENT_SEPARATOR`].
    #[must_use]
    pub fn text(&self) -> String {
        self.segments.join(SEGMENT_SEPARATOR)
    }

    /// True if the reply will render as several bubbles.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        self.segments.len() > 1
    }
}

/// Resolves a match set into a [`ComposedReply`].
pub struct Composer {
    max_segments: usize,
}

impl Composer {
    /// Create a composer with the given segment cap.
    #[must_use]
    pub const fn new(max_segments: usize) -> Self {
        Self { max_segments }
    }

    /// Compose a reply from the match set.
    ///
    /// Returns the reply and the names of the rules that produced segments,
    /// in display order (empty when the default set was used).
    #[must_use]
    pub fn compose<R: Rng + ?Sized>(
        &self,
        catalog: &IntentCatalog,
        matches: &[usize],
        message: &NormalizedMessage,
        rng: &mut R,
    ) -> (ComposedReply, Vec<&'static str>) {
        match matches {
            [] => {
                let reply = DEFAULT_REPLIES
                    .choose(rng)
                    .map(|s| (*s).to_string())
                    .unwrap_or_default();
                (ComposedReply::single(reply), Vec::new())
            }
            [only] => {
                let Some(rule) = catalog.rule(*only) else {
                    return (ComposedReply::single(String::new()), Vec::new());
                };
                (
                    ComposedReply::single(rule.generate(message, rng)),
                    vec![rule.name],
                )
            }
            many => {
                let mut picked = many.to_vec();
                picked.shuffle(rng);
                picked.truncate(self.max_segments.min(picked.len()));

                let mut segments = Vec::with_capacity(picked.len());
                let mut names = Vec::with_capacity(picked.len());
                for idx in picked {
                    if let Some(rule) = catalog.rule(idx) {
                        segments.push(rule.generate(message, rng));
                        names.push(rule.name);
                    }
                }
                (ComposedReply::from_segments(segments), names)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::SubjectProfile;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog() -> IntentCatalog {
        IntentCatalog::builtin(&SubjectProfile::default()).unwrap()
    }

    #[test]
    fn test_no_match_uses_default_set() {
        let catalog = catalog();
        let composer = Composer::new(3);
        let message = NormalizedMessage::new("xyzzy");
        let mut rng = StdRng::seed_from_u64(3);
        let (reply, names) = composer.compose(&catalog, &[], &message, &mut rng);
        assert!(names.is_empty());
        assert!(DEFAULT_REPLIES.contains(&reply.text().as_str()));
    }

    #[test]
    fn test_single_match_has_no_separator() {
        let catalog = catalog();
        let composer = Composer::new(3);
        let message = NormalizedMessage::new("hola");
        let matches = catalog.match_set(&message);
        assert_eq!(matches.len(), 1);
        let mut rng = StdRng::seed_from_u64(3);
        let (reply, names) = composer.compose(&catalog, &matches, &message, &mut rng);
        assert_eq!(names.len(), 1);
        assert!(!reply.is_multi());
        assert!(!reply.text().contains(SEGMENT_SEPARATOR));
    }

    #[test]
    fn test_two_matches_yield_one_separator_from_distinct_rules() {
        let catalog = catalog();
        let composer = Composer::new(3);
        let message = NormalizedMessage::new(
            "¿cuales son tus habilidades y en que lenguaje tienes mas experiencia?",
        );
        let matches = catalog.match_set(&message);
        assert_eq!(matches.len(), 2);
        let mut rng = StdRng::seed_from_u64(3);
        let (reply, names) = composer.compose(&catalog, &matches, &message, &mut rng);
        assert_eq!(reply.text().matches(SEGMENT_SEPARATOR).count(), 1);
        assert_eq!(names.len(), 2);
        assert_ne!(names[0], names[1]);
    }

    #[test]
    fn test_many_matches_are_capped() {
        let catalog = catalog();
        let composer = Composer::new(3);
        // Touches music, sports, movies, books, and food.
        let message = NormalizedMessage::new(
            "hablame de musica, deportes, peliculas, libros y comida",
        );
        let matches = catalog.match_set(&message);
        assert!(matches.len() > 3, "got {}", matches.len());
        let mut rng = StdRng::seed_from_u64(9);
        let (reply, names) = composer.compose(&catalog, &matches, &message, &mut rng);
        assert_eq!(names.len(), 3);
        assert_eq!(reply.segments().len(), 3);
        assert_eq!(reply.text().matches(SEGMENT_SEPARATOR).count(), 2);
    }

    #[test]
    fn test_shuffle_is_seed_deterministic() {
        let catalog = catalog();
        let composer = Composer::new(3);
        let message = NormalizedMessage::new("musica, deportes, peliculas y libros");
        let matches = catalog.match_set(&message);
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let (reply_a, _) = composer.compose(&catalog, &matches, &message, &mut rng_a);
        let (reply_b, _) = composer.compose(&catalog, &matches, &message, &mut rng_b);
        assert_eq!(reply_a, reply_b);
    }
}
