//! Topic tags, invitation detection, and topic inference.
//!
//! A composed reply that invites the visitor to ask for more ("¿quieres
//! saber más?") is remembered together with a [`TopicTag`] so that a bare
//! affirmation on the next turn can be resolved without re-matching.
//! The tag is inferred from the composed text by testing four keyword
//! families in a fixed priority order; first match wins.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Topic bucket a remembered invitation belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicTag {
    /// Professional trajectory / work experience.
    Trajectory,
    /// Personal or professional projects.
    Projects,
    /// Education and training.
    Education,
    /// Technical skills and tooling.
    Skills,
    /// No specific bucket matched.
    #[default]
    Default,
}

impl TopicTag {
    /// All tags, in inference priority order (first match wins).
    pub const ALL: &'static [Self] = &[
        Self::Trajectory,
        Self::Projects,
        Self::Education,
        Self::Skills,
        Self::Default,
    ];

    /// Stable string representation (for logs and traces).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trajectory => "trajectory",
            Self::Projects => "projects",
            Self::Education => "education",
            Self::Skills => "skills",
            Self::Default => "default",
        }
    }

    /// Keyword family for this tag, matched as substrings of normalized text.
    ///
    /// Stems are deliberate ("estudi" covers "estudios" and "estudié").
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Trajectory => &["trayectoria", "experiencia", "carrera", "laboral"],
            Self::Projects => &["proyecto", "portafolio", "portfolio"],
            Self::Education => &["educacion", "formacion", "estudi", "universidad"],
            Self::Skills => &["habilidad", "tecnolog", "lenguaje", "stack"],
            Self::Default => &[],
        }
    }
}

impl fmt::Display for TopicTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse error for [`TopicTag`].
#[derive(Debug, Clone)]
pub struct TopicTagParseError {
    value: String,
}

impl fmt::Display for TopicTagParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid topic tag: {}", self.value)
    }
}

impl std::error::Error for TopicTagParseError {}

impl FromStr for TopicTag {
    type Err = TopicTagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "trajectory" => Ok(Self::Trajectory),
            "projects" => Ok(Self::Projects),
            "education" => Ok(Self::Education),
            "skills" => Ok(Self::Skills),
            "default" => Ok(Self::Default),
            other => Err(TopicTagParseError {
                value: other.to_string(),
            }),
        }
    }
}

/// Phrases that mark a reply as inviting a follow-up.
///
/// Matched as substrings of the normalized composed text.
const INVITATION_PHRASES: &[&str] = &[
    "quieres saber mas",
    "quieres que te cuente",
    "te gustaria saber",
    "te cuento mas",
    "quieres conocer mas",
    "te doy mas detalles",
    "want to know more",
];

/// True if the normalized composed text contains an invitation phrase.
#[must_use]
pub fn contains_invitation(normalized_text: &str) -> bool {
    INVITATION_PHRASES
        .iter()
        .any(|phrase| normalized_text.contains(phrase))
}

/// Infer the topic bucket of a composed reply.
///
/// Families are checked in [`TopicTag::ALL`] order; the first family with a
/// keyword hit wins; no hit yields [`TopicTag::Default`].
#[must_use]
pub fn infer_topic(normalized_text: &str) -> TopicTag {
    for tag in TopicTag::ALL {
        if tag
            .keywords()
            .iter()
            .any(|kw| normalized_text.contains(kw))
        {
            return *tag;
        }
    }
    TopicTag::Default
}
