//! Configuration for the response engine.

use serde::{Deserialize, Serialize};

use crate::engine::errors::{EngineError, EngineResult};

/// Facts about the portfolio's subject, spliced into reply templates at
/// catalog construction time. Date-free by design: nothing here goes stale
/// within a deploy cycle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubjectProfile {
    /// Display name used in replies.
    pub name: String,
    /// Short role description ("desarrollador full-stack").
    pub role: String,
    /// City / country line.
    pub location: String,
    /// Years of professional experience.
    pub years_experience: u8,
    /// Public contact email.
    pub email: String,
    /// Public code profile URL.
    pub github: String,
}

impl Default for SubjectProfile {
    fn default() -> Self {
        Self {
            name: "Marcos Díaz".to_string(),
            role: "desarrollador full-stack".to_string(),
            location: "Madrid, España".to_string(),
            years_experience: 6,
            email: "hola@marcosdiaz.dev".to_string(),
            github: "github.com/marcosdiaz".to_string(),
        }
    }
}

/// Top-level configuration for the response engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cap on visible reply segments when several rules match.
    pub max_segments: usize,
    /// Probability of splicing the visitor's name into a reply.
    pub name_probability: f64,
    /// Facts about the portfolio's subject.
    pub profile: SubjectProfile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_segments: 3,
            name_probability: 0.7,
            profile: SubjectProfile::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the segment cap.
    #[must_use]
    pub const fn with_max_segments(mut self, max_segments: usize) -> Self {
        self.max_segments = max_segments;
        self
    }

    /// Set the name-splice probability.
    #[must_use]
    pub const fn with_name_probability(mut self, probability: f64) -> Self {
        self.name_probability = probability;
        self
    }

    /// Set the subject profile.
    #[must_use]
    pub fn with_profile(mut self, profile: SubjectProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> EngineResult<()> {
        if self.max_segments == 0 {
            return Err(EngineError::InvalidConfig(
                "max_segments must be > 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.name_probability) {
            return Err(EngineError::InvalidConfig(
                "name_probability must be within 0.0..=1.0".to_string(),
            ));
        }

        if self.profile.name.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "profile.name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
