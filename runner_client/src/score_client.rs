//! Remote score service client.
//!
//! Dials the score server once per call, the request/response pair framed
//! as length-prefixed JSON. Connection and decode failures surface as
//! [`ScoreError::Transient`]; only an explicit server rejection becomes
//! [`ScoreError::Rejected`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tracing::{debug, warn};

use runner_core::event::TelemetrySink;
use runner_core::score::{PlayerScore, ScoreError, ScoreService};
use runner_core::wire::{FrameConn, ScoreRequest, ScoreResponse};

pub struct RemoteScoreService {
    addr: String,
    telemetry: Arc<dyn TelemetrySink>,
}

impl RemoteScoreService {
    pub fn new(addr: impl Into<String>, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self {
            addr: addr.into(),
            telemetry,
        }
    }

    async fn call(&self, request: &ScoreRequest) -> Result<ScoreResponse, ScoreError> {
        let stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|e| ScoreError::Transient(format!("connect {}: {e}", self.addr)))?;
        let mut conn = FrameConn::new(stream);
        conn.send(request)
            .await
            .map_err(|e| ScoreError::Transient(e.to_string()))?;
        conn.recv()
            .await
            .map_err(|e| ScoreError::Transient(e.to_string()))
    }
}

#[async_trait]
impl ScoreService for RemoteScoreService {
    async fn top_scores(&self, limit: usize) -> Result<Vec<PlayerScore>, ScoreError> {
        self.telemetry.track("GetTopScores", Default::default());
        match self.call(&ScoreRequest::TopScores { limit }).await? {
            ScoreResponse::Scores(scores) => {
                debug!(count = scores.len(), "Fetched top scores");
                Ok(scores)
            }
            ScoreResponse::Failure { message } => Err(ScoreError::Transient(message)),
            other => Err(ScoreError::Transient(format!(
                "unexpected response: {other:?}"
            ))),
        }
    }

    async fn submit(&self, score: PlayerScore) -> Result<PlayerScore, ScoreError> {
        let mut payload = serde_json::Map::new();
        payload.insert("time".to_string(), score.time.into());
        self.telemetry.track("SubmitScore", payload);

        match self.call(&ScoreRequest::Submit { score }).await? {
            ScoreResponse::Accepted(stored) => Ok(stored),
            ScoreResponse::Rejected { reason } => {
                warn!(%reason, "Score submission rejected");
                Err(ScoreError::Rejected(reason))
            }
            ScoreResponse::Failure { message } => Err(ScoreError::Transient(message)),
            other => Err(ScoreError::Transient(format!(
                "unexpected response: {other:?}"
            ))),
        }
    }
}
