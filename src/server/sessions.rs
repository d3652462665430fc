//! Bounded per-session context store and its background sweeper.
//!
//! Conversations are anonymous and cheap to recreate, so the store is
//! allowed to forget: a capacity cap evicts the least recently seen session
//! when a fresh one arrives, and a periodic sweep drops sessions idle past
//! the TTL. Losing an entry only costs the one-slot follow-up memory.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::one::RefMut;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::engine::ConversationContext;
use crate::server::state::SessionId;

/// Sessions kept at most; beyond this the stalest one is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 4096;

/// Idle time after which a session is eligible for pruning.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// One tracked conversation: its context plus last-activity time.
pub struct SessionEntry {
    /// The conversation's one-slot memory.
    pub context: ConversationContext,
    last_seen: Instant,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            context: ConversationContext::new(),
            last_seen: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.last_seen = Instant::now();
    }
}

/// Capacity- and TTL-bounded map of live conversations.
pub struct SessionStore {
    entries: DashMap<SessionId, SessionEntry>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl SessionStore {
    /// Create a store with the given capacity and idle TTL.
    #[must_use]
    pub fn new(max_sessions: usize, idle_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_sessions,
            idle_ttl,
        }
    }

    /// Create a store with the default bounds.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS, DEFAULT_IDLE_TTL)
    }

    /// Fetch (or create) a session's entry and mark it active.
    ///
    /// When the store is at capacity and the session is new, the least
    /// recently seen session is evicted first.
    pub fn checkout(&self, id: SessionId) -> RefMut<'_, SessionId, SessionEntry> {
        if self.entries.len() >= self.max_sessions && !self.entries.contains_key(&id) {
            self.evict_stalest();
        }
        let mut entry = self.entries.entry(id).or_insert_with(SessionEntry::new);
        entry.touch();
        entry
    }

    /// Remove every session idle past the TTL. Returns how many were pruned.
    pub fn prune_idle(&self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.last_seen.elapsed() < self.idle_ttl);
        before.saturating_sub(self.entries.len())
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no sessions are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if the session is currently tracked.
    #[must_use]
    pub fn contains(&self, id: SessionId) -> bool {
        self.entries.contains_key(&id)
    }

    fn evict_stalest(&self) {
        let stalest = self
            .entries
            .iter()
            .max_by_key(|entry| entry.last_seen.elapsed())
            .map(|entry| *entry.key());
        if let Some(key) = stalest {
            self.entries.remove(&key);
        }
    }
}

/// Background worker that prunes idle sessions on an interval.
pub struct SessionSweeper {
    store: Arc<SessionStore>,
    interval: Duration,
    shutdown: Arc<Notify>,
}

impl SessionSweeper {
    /// Create a sweeper over the given store.
    #[must_use]
    pub fn new(store: Arc<SessionStore>, interval: Duration) -> Self {
        Self {
            store,
            interval,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Get a shutdown notifier to stop the sweeper.
    #[must_use]
    pub fn shutdown_notifier(&self) -> Arc<Notify> {
        Arc::clone(&self.shutdown)
    }

    /// Spawn the sweeper as a tokio task.
    ///
    /// Returns a `JoinHandle` that can be used to await completion.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(&self) {
        tracing::debug!(interval = ?self.interval, "session sweeper started");
        loop {
            tokio::select! {
                () = tokio::time::sleep(self.interval) => {
                    let pruned = self.store.prune_idle();
                    if pruned > 0 {
                        tracing::info!(
                            pruned,
                            live = self.store.len(),
                            "pruned idle sessions"
                        );
                    }
                }
                () = self.shutdown.notified() => {
                    tracing::debug!("session sweeper shutting down");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TopicTag;

    #[test]
    fn test_checkout_keeps_context_between_calls() {
        let store = SessionStore::with_defaults();
        let id = SessionId::new();
        store
            .checkout(id)
            .context
            .remember("¿Quieres saber más?".to_string(), TopicTag::Projects);
        assert_eq!(
            store.checkout(id).context.pending_topic(),
            Some(TopicTag::Projects)
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_fresh_sessions_never_exceed_capacity() {
        let store = SessionStore::with_defaults();
        for _ in 0..10_000 {
            drop(store.checkout(SessionId::new()));
        }
        assert!(store.len() <= DEFAULT_MAX_SESSIONS, "got {}", store.len());
    }

    #[test]
    fn test_checkout_at_capacity_evicts_the_stalest_session() {
        let store = SessionStore::new(4, Duration::from_secs(60));
        let first = SessionId::new();
        drop(store.checkout(first));
        std::thread::sleep(Duration::from_millis(5));
        for _ in 0..3 {
            drop(store.checkout(SessionId::new()));
        }
        assert_eq!(store.len(), 4);

        // Revisiting a tracked session at capacity evicts nothing.
        drop(store.checkout(first));
        assert_eq!(store.len(), 4);
        assert!(store.contains(first));

        // A fresh session displaces the least recently seen one, which is
        // no longer `first` after its re-checkout above.
        std::thread::sleep(Duration::from_millis(5));
        drop(store.checkout(SessionId::new()));
        assert_eq!(store.len(), 4);
        assert!(store.contains(first));
    }

    #[test]
    fn test_prune_idle_removes_expired_sessions() {
        let store = SessionStore::new(8, Duration::from_millis(1));
        for _ in 0..3 {
            drop(store.checkout(SessionId::new()));
        }
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(store.prune_idle(), 3);
        assert!(store.is_empty());
    }

    #[test]
    fn test_prune_keeps_active_sessions() {
        let store = SessionStore::new(8, Duration::from_secs(60));
        drop(store.checkout(SessionId::new()));
        assert_eq!(store.prune_idle(), 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_sweeper_stops_on_shutdown() {
        let store = Arc::new(SessionStore::with_defaults());
        let sweeper = SessionSweeper::new(store, Duration::from_secs(3600));
        let shutdown = sweeper.shutdown_notifier();
        let handle = sweeper.spawn();
        shutdown.notify_one();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_sweeper_prunes_idle_sessions() {
        let store = Arc::new(SessionStore::new(8, Duration::from_millis(1)));
        drop(store.checkout(SessionId::new()));
        tokio::time::sleep(Duration::from_millis(5)).await;

        let sweeper = SessionSweeper::new(Arc::clone(&store), Duration::from_millis(1));
        let shutdown = sweeper.shutdown_notifier();
        let handle = sweeper.spawn();
        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.notify_one();
        handle.await.unwrap();

        assert!(store.is_empty());
    }
}
