//! Conversational response engine.
//!
//! Pipeline per request: moderation → contextual affirmation → catalog
//! match → composition → invitation memory → personalization. The engine is
//! synchronous and pure except for the caller-owned conversation context;
//! all randomness flows through the caller-provided RNG so tests can pin
//! every branch.

pub mod catalog;
pub mod compose;
pub mod config;
pub mod context;
pub mod errors;
pub mod moderation;
pub mod normalize;
pub mod personalize;
pub mod topic;
pub mod trace;

pub use compose::{ComposedReply, SEGMENT_SEPARATOR};
pub use config::{EngineConfig, SubjectProfile};
pub use context::ConversationContext;
pub use errors::{EngineError, EngineResult};
pub use topic::TopicTag;
pub use trace::EngineTrace;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::catalog::IntentCatalog;
use crate::engine::compose::Composer;
use crate::engine::context::is_bare_affirmation;
use crate::engine::moderation::ModerationFilter;
use crate::engine::normalize::NormalizedMessage;
use crate::engine::personalize::Personalizer;

/// The response engine: owns the catalog, the moderation filter, the
/// composer, and the personalizer. Conversation state stays with the caller.
pub struct ChatEngine {
    catalog: IntentCatalog,
    moderation: ModerationFilter,
    composer: Composer,
    personalizer: Personalizer,
}

impl ChatEngine {
    /// Create an engine from a validated configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or a built-in
    /// pattern fails to compile.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let catalog = IntentCatalog::builtin(&config.profile)?;
        let moderation = ModerationFilter::new()?;
        let composer = Composer::new(config.max_segments);
        let personalizer = Personalizer::new(config.name_probability);

        Ok(Self {
            catalog,
            moderation,
            composer,
            personalizer,
        })
    }

    /// Create an engine with the default configuration.
    ///
    /// # Errors
    /// Returns an error if the built-in catalog fails to build.
    pub fn with_defaults() -> EngineResult<Self> {
        Self::new(EngineConfig::default())
    }

    /// Produce a reply for one visitor message.
    ///
    /// `context` is this conversation's one-slot memory; the engine reads it
    /// only when the message is a bare affirmation, and writes it only when
    /// the composed reply carries an invitation.
    pub fn respond<R: Rng + ?Sized>(
        &self,
        message: &str,
        user_name: Option<&str>,
        context: &mut ConversationContext,
        rng: &mut R,
    ) -> (ComposedReply, EngineTrace) {
        let mut trace = EngineTrace::default();

        // Moderation short-circuits before anything else and never touches
        // the context slot.
        if let Some(deflection) = self.moderation.screen(message, rng) {
            trace.moderated = true;
            return (ComposedReply::single(deflection), trace);
        }

        let normalized = NormalizedMessage::new(message);

        // Bare affirmation with a stored slot: resolve from the remembered
        // topic, skipping matching and personalization.
        if is_bare_affirmation(normalized.trimmed())
            && let Some(stored) = context.consume()
        {
            trace.context_consumed = Some(stored.topic);
            let reply = self.resolve_from_topic(stored.topic, &normalized, rng);
            return (reply, trace);
        }

        let matches = self.catalog.match_set(&normalized);
        let (mut reply, names) =
            self.composer
                .compose(&self.catalog, &matches, &normalized, rng);
        trace.matched_rules = names;

        let composed_normalized = NormalizedMessage::new(&reply.text());
        if topic::contains_invitation(composed_normalized.as_str()) {
            let tag = topic::infer_topic(composed_normalized.as_str());
            context.remember(reply.text(), tag);
            trace.context_stored = Some(tag);
        }

        trace.personalized = self.personalizer.apply(&mut reply, user_name, rng);

        (reply, trace)
    }

    /// Number of rules in the active catalog.
    #[must_use]
    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    fn resolve_from_topic<R: Rng + ?Sized>(
        &self,
        tag: TopicTag,
        message: &NormalizedMessage,
        rng: &mut R,
    ) -> ComposedReply {
        let candidates = self.catalog.rules_for_topic(tag);
        if let Some(rule) = candidates.choose(rng) {
            return ComposedReply::single(rule.generate(message, rng));
        }

        let filler = catalog::rules::topic_fillers(tag)
            .choose(rng)
            .map(|s| (*s).to_string())
            .unwrap_or_default();
        ComposedReply::single(filler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn engine() -> ChatEngine {
        ChatEngine::with_defaults().unwrap()
    }

    #[test]
    fn test_greeting_scenario() {
        let engine = engine();
        let mut ctx = ConversationContext::new();
        let mut rng = StdRng::seed_from_u64(11);
        let (reply, trace) = engine.respond("Hola", None, &mut ctx, &mut rng);
        assert_eq!(trace.matched_rules, vec!["greeting"]);
        assert!(!reply.is_multi());
        // Greeting templates reference the subject by name.
        assert!(reply.text().contains("Marcos"));
    }

    #[test]
    fn test_moderation_leaves_context_untouched() {
        let engine = engine();
        let mut ctx = ConversationContext::new();
        ctx.remember("¿Quieres saber más?".to_string(), TopicTag::Skills);
        let mut rng = StdRng::seed_from_u64(11);
        let (_, trace) = engine.respond("¿Tienes novia?", None, &mut ctx, &mut rng);
        assert!(trace.moderated);
        assert_eq!(ctx.pending_topic(), Some(TopicTag::Skills));
    }

    #[test]
    fn test_skills_and_language_question_yields_two_segments() {
        let engine = engine();
        let mut ctx = ConversationContext::new();
        let mut rng = StdRng::seed_from_u64(11);
        let (reply, trace) = engine.respond(
            "¿Cuáles son tus habilidades y en qué lenguaje de programación tienes más experiencia?",
            None,
            &mut ctx,
            &mut rng,
        );
        assert_eq!(trace.matched_rules.len(), 2);
        assert_eq!(reply.text().matches(SEGMENT_SEPARATOR).count(), 1);
    }

    #[test]
    fn test_projects_then_affirmation_then_default() {
        let engine = engine();
        let mut ctx = ConversationContext::new();
        let mut rng = StdRng::seed_from_u64(11);

        // Every projects template invites a follow-up, so the slot is set.
        let (_, trace) = engine.respond("Cuéntame sobre tus proyectos", None, &mut ctx, &mut rng);
        assert_eq!(trace.matched_rules, vec!["projects"]);
        assert_eq!(trace.context_stored, Some(TopicTag::Projects));
        assert_eq!(ctx.pending_topic(), Some(TopicTag::Projects));

        // "sí" resolves from the stored topic and clears the slot.
        let (reply, trace) = engine.respond("sí", None, &mut ctx, &mut rng);
        assert_eq!(trace.context_consumed, Some(TopicTag::Projects));
        assert!(trace.matched_rules.is_empty());
        assert!(!reply.text().is_empty());
        assert!(ctx.is_empty());

        // A further "sí" with an empty slot falls through to matching and,
        // since no rule matches, to the default reply set.
        let (reply, trace) = engine.respond("sí", None, &mut ctx, &mut rng);
        assert!(trace.context_consumed.is_none());
        assert!(trace.matched_rules.is_empty());
        assert!(!reply.text().is_empty());
    }

    #[test]
    fn test_non_affirmation_does_not_consume_context() {
        let engine = engine();
        let mut ctx = ConversationContext::new();
        ctx.remember("¿Quieres saber más?".to_string(), TopicTag::Education);
        let mut rng = StdRng::seed_from_u64(11);
        let (_, trace) = engine.respond("¿dónde vives?", None, &mut ctx, &mut rng);
        assert!(trace.context_consumed.is_none());
        assert_eq!(ctx.pending_topic(), Some(TopicTag::Education));
    }

    #[test]
    fn test_personalization_with_forced_probability() {
        let config = EngineConfig::new().with_name_probability(1.0);
        let engine = ChatEngine::new(config).unwrap();
        let mut ctx = ConversationContext::new();
        let mut rng = StdRng::seed_from_u64(11);
        let (reply, trace) = engine.respond("¿dónde vives?", Some("Ana"), &mut ctx, &mut rng);
        assert!(trace.personalized);
        assert!(reply.text().contains("Ana"));
    }
}
