//! Recent-interaction log for analytics.
//!
//! Every chat exchange is recorded in a bounded in-memory buffer, newest
//! first on read. Records carry lightweight derived signals (intent label,
//! mentioned technologies, rough sentiment) so the frontend can surface
//! what visitors actually ask about.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::server::state::SessionId;

/// Maximum records retained; older entries are dropped.
const LOG_CAPACITY: usize = 200;

/// Technology keywords scanned for in visitor messages.
const TECH_KEYWORDS: &[&str] = &[
    "rust",
    "python",
    "javascript",
    "typescript",
    "react",
    "node",
    "docker",
    "postgresql",
    "sql",
    "aws",
    "go",
    "java",
];

/// Rough sentiment bucket for a visitor message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    /// Thanks, compliments, enthusiasm.
    Positive,
    /// Insults or complaints.
    Negative,
    /// Everything else.
    Neutral,
}

/// One recorded chat exchange.
#[derive(Clone, Debug, Serialize)]
pub struct InteractionRecord {
    /// Conversation the exchange belongs to.
    pub session_id: SessionId,
    /// The visitor's message, post-truncation.
    pub user_message: String,
    /// The full reply text sent back.
    pub ai_response: String,
    /// How the reply was produced (rule names, "moderation", "default", …).
    pub detected_intent: String,
    /// Technology keywords found in the visitor's message.
    pub detected_entities: Vec<String>,
    /// When the exchange happened.
    pub timestamp: DateTime<Utc>,
    /// Engine processing time in milliseconds.
    pub processing_time_ms: u64,
    /// Rough sentiment of the visitor's message.
    pub user_sentiment: Sentiment,
}

/// Bounded buffer of recent interactions.
#[derive(Default)]
pub struct InteractionLog {
    records: Mutex<VecDeque<InteractionRecord>>,
}

impl InteractionLog {
    /// Append a record, evicting the oldest once at capacity.
    pub async fn record(&self, record: InteractionRecord) {
        let mut records = self.records.lock().await;
        if records.len() >= LOG_CAPACITY {
            records.pop_front();
        }
        records.push_back(record);
    }

    /// The most recent records, newest first, capped at `limit`.
    pub async fn recent(&self, limit: usize) -> Vec<InteractionRecord> {
        let records = self.records.lock().await;
        records.iter().rev().take(limit).cloned().collect()
    }
}

/// Classify a normalized visitor message into a rough sentiment bucket.
#[must_use]
pub fn classify_sentiment(normalized: &str) -> Sentiment {
    const POSITIVE: &[&str] = &[
        "gracias", "genial", "excelente", "me gusta", "me encanta", "perfecto", "buenisimo",
    ];
    const NEGATIVE: &[&str] = &["tonto", "inutil", "aburrido", "malo", "odio", "horrible"];

    if POSITIVE.iter().any(|w| normalized.contains(w)) {
        return Sentiment::Positive;
    }
    if NEGATIVE.iter().any(|w| normalized.contains(w)) {
        return Sentiment::Negative;
    }
    Sentiment::Neutral
}

/// Technology keywords present in a normalized visitor message.
#[must_use]
pub fn extract_entities(normalized: &str) -> Vec<String> {
    TECH_KEYWORDS
        .iter()
        .filter(|keyword| {
            normalized
                .split(|c: char| !c.is_alphanumeric())
                .any(|word| word == **keyword)
        })
        .map(|keyword| (*keyword).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(message: &str) -> InteractionRecord {
        InteractionRecord {
            session_id: SessionId::new(),
            user_message: message.to_string(),
            ai_response: "ok".to_string(),
            detected_intent: "default".to_string(),
            detected_entities: Vec::new(),
            timestamp: Utc::now(),
            processing_time_ms: 0,
            user_sentiment: Sentiment::Neutral,
        }
    }

    #[tokio::test]
    async fn test_log_is_bounded_and_newest_first() {
        let log = InteractionLog::default();
        for i in 0..(LOG_CAPACITY + 5) {
            log.record(record(&format!("mensaje {i}"))).await;
        }
        let recent = log.recent(10).await;
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].user_message, format!("mensaje {}", LOG_CAPACITY + 4));

        let all = log.recent(usize::MAX).await;
        assert_eq!(all.len(), LOG_CAPACITY);
    }

    #[test]
    fn test_sentiment_buckets() {
        assert_eq!(classify_sentiment("muchas gracias por todo"), Sentiment::Positive);
        assert_eq!(classify_sentiment("eres un bot inutil"), Sentiment::Negative);
        assert_eq!(classify_sentiment("cuentame de tus proyectos"), Sentiment::Neutral);
    }

    #[test]
    fn test_entity_extraction_matches_whole_words() {
        let entities = extract_entities("trabajas con rust o con typescript?");
        assert_eq!(entities, vec!["rust".to_string(), "typescript".to_string()]);
        // "gobierno" contains "go" but is not a tech mention.
        assert!(extract_entities("trabajas para el gobierno?").is_empty());
    }
}
