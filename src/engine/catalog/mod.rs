//! Intent catalog: ordered predicate/generator rules.
//!
//! Every rule is evaluated against the normalized message — no early exit —
//! so a message touching several unrelated topics surfaces all of them.
//! Predicates are word-boundary regex tests; where vocabularies overlap, an
//! optional exclusion pattern disambiguates (the regex engine has no
//! lookaround, so the negative condition is a second compiled pattern).

pub mod rules;

use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;

use crate::engine::compose::SEGMENT_SEPARATOR;
use crate::engine::config::SubjectProfile;
use crate::engine::errors::{EngineError, EngineResult};
use crate::engine::normalize::NormalizedMessage;
use crate::engine::topic::TopicTag;

/// How a matched rule produces its reply text.
pub enum ReplyGenerator {
    /// Pick one template uniformly at random.
    Templates(Vec<String>),
    /// Extract the matched technology keyword and resolve it in a secondary
    /// mapping; unknown keywords fall back to a generic template.
    TechLookup {
        /// Pattern extracting the technology keyword from the message.
        extract: Regex,
        /// Keyword → reply mapping.
        replies: Vec<(&'static str, String)>,
        /// Generic templates when the keyword is not a known key.
        fallback: Vec<String>,
    },
}

impl ReplyGenerator {
    fn template_sets(&self) -> Vec<&[String]> {
        match self {
            Self::Templates(templates) => vec![templates.as_slice()],
            Self::TechLookup {
                replies, fallback, ..
            } => {
                let mut sets = vec![fallback.as_slice()];
                for (_, reply) in replies {
                    sets.push(std::slice::from_ref(reply));
                }
                sets
            }
        }
    }

    fn generate<R: Rng + ?Sized>(&self, message: &NormalizedMessage, rng: &mut R) -> String {
        match self {
            Self::Templates(templates) => {
                templates.choose(rng).cloned().unwrap_or_default()
            }
            Self::TechLookup {
                extract,
                replies,
                fallback,
            } => {
                let keyword = extract.find(message.as_str()).map(|m| m.as_str());
                if let Some(keyword) = keyword
                    && let Some((_, reply)) = replies.iter().find(|(k, _)| *k == keyword)
                {
                    return reply.clone();
                }
                fallback.choose(rng).cloned().unwrap_or_default()
            }
        }
    }
}

/// One conversational topic: a predicate over the normalized message plus a
/// reply generator. Rules share no mutable state.
pub struct ResponseRule {
    /// Stable rule name (for traces and analytics).
    pub name: &'static str,
    /// Topic bucket used to resolve bare affirmations, when applicable.
    pub topic: Option<TopicTag>,
    pattern: Regex,
    exclude: Option<Regex>,
    generator: ReplyGenerator,
}

impl ResponseRule {
    /// Build a template rule.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile, the template set is
    /// empty, or a template contains the segment separator.
    pub fn new(
        name: &'static str,
        topic: Option<TopicTag>,
        pattern: &str,
        exclude: Option<&str>,
        templates: Vec<String>,
    ) -> EngineResult<Self> {
        Self::with_generator(name, topic, pattern, exclude, ReplyGenerator::Templates(templates))
    }

    /// Build a rule with an explicit generator.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile or the generator's
    /// template sets are invalid.
    pub fn with_generator(
        name: &'static str,
        topic: Option<TopicTag>,
        pattern: &str,
        exclude: Option<&str>,
        generator: ReplyGenerator,
    ) -> EngineResult<Self> {
        for set in generator.template_sets() {
            if set.is_empty() {
                return Err(EngineError::EmptyTemplateSet(name));
            }
            if set.iter().any(|t| t.contains(SEGMENT_SEPARATOR)) {
                return Err(EngineError::SeparatorInTemplate(name));
            }
        }

        let exclude = match exclude {
            Some(raw) => Some(Regex::new(raw)?),
            None => None,
        };

        Ok(Self {
            name,
            topic,
            pattern: Regex::new(pattern)?,
            exclude,
            generator,
        })
    }

    /// True if this rule's predicate holds for the message.
    #[must_use]
    pub fn matches(&self, message: &NormalizedMessage) -> bool {
        self.pattern.is_match(message.as_str())
            && !self
                .exclude
                .as_ref()
                .is_some_and(|e| e.is_match(message.as_str()))
    }

    /// Invoke the generator for this rule.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(
        &self,
        message: &NormalizedMessage,
        rng: &mut R,
    ) -> String {
        self.generator.generate(message, rng)
    }
}

/// Ordered collection of response rules.
pub struct IntentCatalog {
    rules: Vec<ResponseRule>,
}

impl IntentCatalog {
    /// Build a catalog from a rule list.
    ///
    /// # Errors
    /// Returns an error if the list is empty.
    pub fn new(rules: Vec<ResponseRule>) -> EngineResult<Self> {
        if rules.is_empty() {
            return Err(EngineError::InvalidConfig(
                "catalog must contain at least one rule".to_string(),
            ));
        }
        Ok(Self { rules })
    }

    /// Build the built-in portfolio catalog for a subject profile.
    ///
    /// # Errors
    /// Returns an error if any built-in pattern fails to compile.
    pub fn builtin(profile: &SubjectProfile) -> EngineResult<Self> {
        Self::new(rules::builtin_rules(profile)?)
    }

    /// Evaluate every rule and return the indices of all matches.
    #[must_use]
    pub fn match_set(&self, message: &NormalizedMessage) -> Vec<usize> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.matches(message))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Access a rule by index.
    #[must_use]
    pub fn rule(&self, idx: usize) -> Option<&ResponseRule> {
        self.rules.get(idx)
    }

    /// All rules tagged with the given topic.
    #[must_use]
    pub fn rules_for_topic(&self, topic: TopicTag) -> Vec<&ResponseRule> {
        self.rules
            .iter()
            .filter(|rule| rule.topic == Some(topic))
            .collect()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if the catalog holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
