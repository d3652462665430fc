//! One-slot conversational context.
//!
//! When a composed reply invites a follow-up, the reply text and its inferred
//! topic are remembered so that a bare affirmation on the next turn can be
//! resolved without re-matching. One slot per conversation, owned by the
//! caller and passed into every engine call; writing overwrites, reading
//! consumes.

use serde::{Deserialize, Serialize};

use crate::engine::topic::TopicTag;

/// Exact acknowledgement phrases, compared against the whole trimmed
/// normalized message (never as substrings).
const AFFIRMATIONS: &[&str] = &[
    "si",
    "sii",
    "ok",
    "okay",
    "okey",
    "vale",
    "dale",
    "claro",
    "claro que si",
    "por supuesto",
    "sip",
    "aja",
    "va",
    "obvio",
    "adelante",
    "por favor",
    "me interesa",
    "cuentame",
    "cuentame mas",
    "yes",
];

/// True if the trimmed normalized message is a bare affirmation.
#[must_use]
pub fn is_bare_affirmation(trimmed_normalized: &str) -> bool {
    AFFIRMATIONS.contains(&trimmed_normalized)
}

/// A remembered invitation: the full composed text and its topic bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredInvitation {
    /// The composed reply text that carried the invitation.
    pub text: String,
    /// Topic inferred from the composed text.
    pub topic: TopicTag,
}

/// Per-conversation context memory. Single slot, no history.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConversationContext {
    pending: Option<StoredInvitation>,
}

impl ConversationContext {
    /// A context with an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if nothing is remembered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }

    /// The stored topic, if any, without consuming it.
    #[must_use]
    pub fn pending_topic(&self) -> Option<TopicTag> {
        self.pending.as_ref().map(|p| p.topic)
    }

    /// Remember an invitation, overwriting any previous slot content.
    pub fn remember(&mut self, text: String, topic: TopicTag) {
        self.pending = Some(StoredInvitation { text, topic });
    }

    /// Take the stored invitation, clearing the slot.
    pub fn consume(&mut self) -> Option<StoredInvitation> {
        self.pending.take()
    }
}
