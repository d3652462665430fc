//! Application state shared across all request handlers.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{ChatEngine, EngineResult};
use crate::server::interactions::InteractionLog;
use crate::server::sessions::SessionStore;

/// Identifier for one visitor conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh session identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Shared application state.
pub struct AppState {
    /// The response engine. Immutable after construction.
    pub engine: ChatEngine,
    /// Bounded per-session conversation contexts.
    pub sessions: Arc<SessionStore>,
    /// Server-wide RNG feeding the engine.
    pub rng: Mutex<StdRng>,
    /// Recent interaction records for analytics.
    pub interactions: InteractionLog,
}

impl AppState {
    /// Create the application state with the default engine configuration.
    ///
    /// # Errors
    /// Returns an error if the engine's built-in catalog fails to build.
    pub fn new() -> EngineResult<Arc<Self>> {
        let engine = ChatEngine::with_defaults()?;

        Ok(Arc::new(Self {
            engine,
            sessions: Arc::new(SessionStore::with_defaults()),
            rng: Mutex::new(StdRng::from_entropy()),
            interactions: InteractionLog::default(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_round_trips_through_display() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_state_starts_with_no_sessions() {
        let state = AppState::new().unwrap();
        assert!(state.sessions.is_empty());
    }
}
