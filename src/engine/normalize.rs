//! Input normalization for rule matching.
//!
//! Rule predicates match against a lowercase, diacritic-stripped view of the
//! visitor's message, so "¿Cuéntame?" and "cuentame" hit the same rules.
//! The moderation filter is the one component that reads the raw string
//! instead (see `moderation.rs`).

use core::fmt;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// A lowercase, diacritic-stripped view of a raw user message.
///
/// Created once per request; immutable afterwards. Normalizing an already
/// normalized string is a no-op.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedMessage(String);

impl NormalizedMessage {
    /// Normalize a raw message: lowercase, then NFD decomposition with
    /// combining-mark removal ("á" → "a").
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();
        Self(stripped)
    }

    /// Borrow as `&str`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-trimmed view, used for exact-phrase checks.
    #[inline]
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.0.trim()
    }

    /// Consume into `String`.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for NormalizedMessage {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_diacritics() {
        let msg = NormalizedMessage::new("¿Cuáles son tus HABILIDADES?");
        assert_eq!(msg.as_str(), "¿cuales son tus habilidades?");
    }

    #[test]
    fn test_spanish_tilde_n_is_preserved() {
        // U+00F1 decomposes to n + combining tilde; stripping the mark
        // folds it to plain "n", matching the rule vocabulary.
        let msg = NormalizedMessage::new("Años de diseño");
        assert_eq!(msg.as_str(), "anos de diseno");
    }

    #[test]
    fn test_idempotent() {
        let once = NormalizedMessage::new("Café con leché");
        let twice = NormalizedMessage::new(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_trimmed() {
        let msg = NormalizedMessage::new("  Sí  ");
        assert_eq!(msg.trimmed(), "si");
    }
}
