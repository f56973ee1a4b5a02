//! Score records and the score-service abstraction.
//!
//! The persistence side moderates the submitted player name and either
//! stores the record or rejects it. Consumers must be able to tell a
//! moderation rejection apart from a generic failure, so the boundary gets
//! a typed error rather than `anyhow`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A leaderboard entry. Field names go camelCase on the wire for
/// compatibility with existing score consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScore {
    pub player_name: String,
    /// Completion time in seconds.
    pub time: f64,
    pub created: DateTime<Utc>,
}

impl PlayerScore {
    pub fn new(player_name: impl Into<String>, time: f64) -> Self {
        Self {
            player_name: player_name.into(),
            time,
            created: Utc::now(),
        }
    }
}

/// Exactly one of these comes back from a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// The collaborator refused the player name (moderation/validation).
    /// Retrying with a different name is allowed.
    #[error("name rejected: {0}")]
    Rejected(String),
    /// Anything else: connection loss, decode failure, server fault.
    #[error("score service failure: {0}")]
    Transient(String),
}

/// The external score collaborator: list top scores, submit one.
#[async_trait]
pub trait ScoreService: Send + Sync {
    /// Top `limit` scores ordered ascending by completion time
    /// (fastest first).
    async fn top_scores(&self, limit: usize) -> Result<Vec<PlayerScore>, ScoreError>;

    /// Moderates and stores a score, returning the stored record.
    async fn submit(&self, score: PlayerScore) -> Result<PlayerScore, ScoreError>;
}
