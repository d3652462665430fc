//! Content moderation filter.
//!
//! Detects romantic/sexual solicitation vocabulary and short-circuits the
//! pipeline with a deflection toward professional topics. The filter tests
//! the RAW message case-insensitively, not the normalized one: an accented
//! variant that dodges the vocabulary simply falls through to the catalog,
//! which has no templates for these topics either.

use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;

use crate::engine::errors::EngineResult;

/// Disallowed vocabulary, matched case-insensitively on the raw message.
const DISALLOWED_PATTERN: &str = r"(?i)\b(novi[oa]s?|cita(s)?|romantic[oa]|matrimonio|casate|casarte|beso(s)?|sexo|sexual|sexy|desnud[oa]s?|coquetear?|enamorad[oa]s?|te amo|te quiero|guap[oa]|atractiv[oa]|soltero[a]?)\b";

/// Replies that redirect the conversation toward professional topics.
const DEFLECTIONS: &[&str] = &[
    "Prefiero mantener la conversación en lo profesional. ¿Te cuento sobre mi experiencia o mis proyectos?",
    "Ese no es mi terreno. Pregúntame por mis habilidades técnicas o por mi trayectoria.",
    "Mejor hablemos de trabajo. ¿Quieres saber qué tecnologías manejo?",
    "Voy a pasar de ese tema. Si te interesa mi portfolio o mi formación, pregunta sin problema.",
    "Este chat es sobre mi perfil profesional. ¿Hablamos de proyectos, estudios o tecnologías?",
];

/// Keyword filter that deflects disallowed topics before any rule matching.
pub struct ModerationFilter {
    pattern: Regex,
}

impl ModerationFilter {
    /// Create the filter with the built-in vocabulary.
    ///
    /// # Errors
    /// Returns an error if the vocabulary pattern fails to compile.
    pub fn new() -> EngineResult<Self> {
        Ok(Self {
            pattern: Regex::new(DISALLOWED_PATTERN)?,
        })
    }

    /// True if the raw message trips the vocabulary.
    #[must_use]
    pub fn is_disallowed(&self, raw_message: &str) -> bool {
        self.pattern.is_match(raw_message)
    }

    /// Screen a raw message: a deflection reply if disallowed, else `None`.
    ///
    /// On a hit the pipeline terminates here; context memory is never
    /// touched by this path.
    #[must_use]
    pub fn screen<R: Rng + ?Sized>(&self, raw_message: &str, rng: &mut R) -> Option<String> {
        if !self.is_disallowed(raw_message) {
            return None;
        }
        DEFLECTIONS.choose(rng).map(|s| (*s).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_disallowed_vocabulary_deflects() {
        let filter = ModerationFilter::new().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let reply = filter.screen("¿Tienes novia?", &mut rng);
        let reply = reply.unwrap();
        assert!(DEFLECTIONS.contains(&reply.as_str()));
    }

    #[test]
    fn test_case_insensitive() {
        let filter = ModerationFilter::new().unwrap();
        assert!(filter.is_disallowed("eres muy SEXY"));
    }

    #[test]
    fn test_diacritics_sensitive_on_raw() {
        // The filter reads the raw string: an accented spelling outside the
        // vocabulary does not trip it. The asymmetry is deliberate.
        let filter = ModerationFilter::new().unwrap();
        assert!(filter.is_disallowed("dame un beso"));
        assert!(!filter.is_disallowed("dame un bèso"));
    }

    #[test]
    fn test_clean_message_passes() {
        let filter = ModerationFilter::new().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(filter.screen("¿Qué proyectos has hecho?", &mut rng).is_none());
    }
}
