//! Reply personalization.
//!
//! With a known visitor name, probabilistically prepends a name-bearing
//! lead-in to the composed reply, lowercasing the former first character to
//! keep the sentence grammatical. Applied once to the reply as a whole,
//! never per segment.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::compose::ComposedReply;
use crate::engine::normalize::NormalizedMessage;

/// Lead-in templates; `{name}` is replaced with the visitor's name.
const LEAD_INS: &[&str] = &["{name}, ", "Mira {name}, ", "Pues {name}, ", "A ver {name}, "];

/// Openers that must not be displaced by a lead-in (normalized prefixes).
const PROTECTED_OPENERS: &[&str] = &[
    "lo siento",
    "perdona",
    "disculpa",
    "vaya,",
    "¡hola",
    "¡buenas",
    "¡genial",
    "¡excelente",
    "¡gracias",
    "¡de nada",
    "¡un placer",
];

/// Splices the visitor's name into composed replies.
pub struct Personalizer {
    probability: f64,
}

impl Personalizer {
    /// Create a personalizer with the given splice probability.
    #[must_use]
    pub const fn new(probability: f64) -> Self {
        Self { probability }
    }

    /// Maybe prepend a name lead-in to the reply. Returns whether the reply
    /// was modified.
    ///
    /// Skipped when: no name is known, the roll fails, the reply already
    /// contains the name, or the reply starts with a protected opener.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        reply: &mut ComposedReply,
        user_name: Option<&str>,
        rng: &mut R,
    ) -> bool {
        let Some(name) = user_name.map(str::trim).filter(|n| !n.is_empty()) else {
            return false;
        };

        if !rng.gen_bool(self.probability) {
            return false;
        }

        let text = reply.text();
        if text.to_lowercase().contains(&name.to_lowercase()) {
            return false;
        }

        let Some(first) = reply.segments().first() else {
            return false;
        };
        let normalized_start = NormalizedMessage::new(first);
        if PROTECTED_OPENERS
            .iter()
            .any(|opener| normalized_start.as_str().starts_with(opener))
        {
            return false;
        }

        let lead = LEAD_INS
            .choose(rng)
            .map(|t| t.replace("{name}", name))
            .unwrap_or_default();

        let segments = reply.segments_mut();
        if let Some(first) = segments.first_mut() {
            *first = format!("{lead}{}", lowercase_first(first));
            return true;
        }
        false
    }
}

/// Lowercase the first character of a sentence, leaving the rest intact.
fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) => {
            let mut out: String = c.to_lowercase().collect();
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn reply(text: &str) -> ComposedReply {
        ComposedReply::single(text.to_string())
    }

    #[test]
    fn test_applies_with_probability_one() {
        let personalizer = Personalizer::new(1.0);
        let mut rng = StdRng::seed_from_u64(5);
        let mut composed = reply("Su stack habitual es Rust.");
        assert!(personalizer.apply(&mut composed, Some("Lucía"), &mut rng));
        let text = composed.text();
        assert!(text.contains("Lucía"));
        assert!(text.contains("su stack habitual es Rust."), "{text}");
    }

    #[test]
    fn test_never_applies_with_probability_zero() {
        let personalizer = Personalizer::new(0.0);
        let mut rng = StdRng::seed_from_u64(5);
        let mut composed = reply("Su stack habitual es Rust.");
        assert!(!personalizer.apply(&mut composed, Some("Lucía"), &mut rng));
    }

    #[test]
    fn test_never_duplicates_name() {
        let personalizer = Personalizer::new(1.0);
        let mut rng = StdRng::seed_from_u64(5);
        let mut composed = reply("Lucía, ya hablamos de esto.");
        assert!(!personalizer.apply(&mut composed, Some("Lucía"), &mut rng));
        assert_eq!(composed.text().matches("Lucía").count(), 1);
    }

    #[test]
    fn test_protected_opener_is_kept() {
        let personalizer = Personalizer::new(1.0);
        let mut rng = StdRng::seed_from_u64(5);
        let mut composed = reply("Lo siento, eso no lo sé.");
        assert!(!personalizer.apply(&mut composed, Some("Lucía"), &mut rng));
        assert!(composed.text().starts_with("Lo siento"));
    }

    #[test]
    fn test_no_name_is_a_no_op() {
        let personalizer = Personalizer::new(1.0);
        let mut rng = StdRng::seed_from_u64(5);
        let mut composed = reply("Su stack habitual es Rust.");
        assert!(!personalizer.apply(&mut composed, None, &mut rng));
        assert!(!personalizer.apply(&mut composed, Some("   "), &mut rng));
    }

    #[test]
    fn test_only_first_segment_is_touched() {
        let personalizer = Personalizer::new(1.0);
        let mut rng = StdRng::seed_from_u64(5);
        let mut composed =
            ComposedReply::from_segments(vec!["Primera parte.".to_string(), "Segunda parte.".to_string()]);
        assert!(personalizer.apply(&mut composed, Some("Ana"), &mut rng));
        assert!(composed.segments()[0].contains("Ana"));
        assert_eq!(composed.segments()[1], "Segunda parte.");
    }
}
