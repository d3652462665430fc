//! Structured trace of one engine request.
//!
//! The core never logs; it returns this value alongside the reply and the
//! caller decides what to record. Keeps matching and composition pure and
//! independently testable.

use serde::Serialize;

use crate::engine::topic::TopicTag;

/// What happened while producing one reply.
#[derive(Clone, Debug, Default, Serialize)]
pub struct EngineTrace {
    /// The moderation filter short-circuited the request.
    pub moderated: bool,
    /// Names of the rules that produced reply segments, in display order.
    pub matched_rules: Vec<&'static str>,
    /// A stored invitation was consumed to resolve a bare affirmation.
    pub context_consumed: Option<TopicTag>,
    /// The composed reply carried an invitation and was stored.
    pub context_stored: Option<TopicTag>,
    /// A name lead-in was spliced into the reply.
    pub personalized: bool,
}

impl EngineTrace {
    /// Short label describing how the reply was produced, for analytics.
    #[must_use]
    pub fn intent_label(&self) -> String {
        if self.moderated {
            return "moderation".to_string();
        }
        if let Some(topic) = self.context_consumed {
            return format!("context:{topic}");
        }
        if self.matched_rules.is_empty() {
            return "default".to_string();
        }
        self.matched_rules.join("+")
    }
}
