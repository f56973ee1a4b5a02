//! Score server.
//!
//! Accepts TCP connections and answers one framed JSON request per
//! connection. Moderation runs before storage; a per-connection failure
//! never takes the accept loop down.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use runner_core::wire::{FrameConn, ScoreRequest, ScoreResponse};

use crate::moderation::{NameFilter, Verdict};
use crate::store::ScoreBoard;

/// Submitting under this name simulates an internal fault, for exercising
/// client error handling end to end.
const FAULT_NAME: &str = "crash";
/// Submitting under this name stalls the request for the configured delay
/// before failing, for exercising a hung collaborator.
const STALL_NAME: &str = "timeout";

const DEFAULT_STALL: Duration = Duration::from_secs(5);

struct ServerState {
    filter: NameFilter,
    board: Mutex<ScoreBoard>,
    stall: Duration,
}

impl ServerState {
    async fn handle(&self, request: ScoreRequest) -> ScoreResponse {
        match request {
            ScoreRequest::TopScores { limit } => {
                let board = self.board.lock().expect("score board poisoned");
                ScoreResponse::Scores(board.top(limit))
            }
            ScoreRequest::Submit { score } => {
                if score.player_name == FAULT_NAME {
                    warn!("Simulated fault requested");
                    return ScoreResponse::Failure {
                        message: "internal server error".to_string(),
                    };
                }
                if score.player_name == STALL_NAME {
                    warn!(stall = ?self.stall, "Simulated stall requested");
                    tokio::time::sleep(self.stall).await;
                    return ScoreResponse::Failure {
                        message: "internal server error".to_string(),
                    };
                }
                match self.filter.check(&score.player_name) {
                    Verdict::Rejected(reason) => {
                        info!(player = %score.player_name, %reason, "Submission rejected");
                        ScoreResponse::Rejected { reason }
                    }
                    Verdict::Accepted => {
                        let mut board = self.board.lock().expect("score board poisoned");
                        let stored = board.record(score.player_name.trim(), score.time);
                        info!(player = %stored.player_name, time = stored.time, total = board.len(), "Score stored");
                        ScoreResponse::Accepted(stored)
                    }
                }
            }
        }
    }
}

pub struct ScoreServer {
    listener: TcpListener,
    state: Arc<ServerState>,
}

impl ScoreServer {
    pub async fn bind(addr: &str) -> anyhow::Result<Self> {
        Self::bind_with_stall(addr, DEFAULT_STALL).await
    }

    /// Like [`ScoreServer::bind`] but with a custom stall delay for the
    /// hung-request switch; tests use a short one.
    pub async fn bind_with_stall(addr: &str, stall: Duration) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("bind {addr}"))?;
        Ok(Self {
            listener,
            state: Arc::new(ServerState {
                filter: NameFilter::default(),
                board: Mutex::new(ScoreBoard::new()),
                stall,
            }),
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        self.listener.local_addr().context("local addr")
    }

    /// Accept loop; runs until the task is dropped.
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            let (stream, peer) = self.listener.accept().await.context("accept")?;
            let state = Arc::clone(&self.state);
            tokio::spawn(async move {
                if let Err(e) = handle_conn(state, stream).await {
                    warn!(%peer, error = %e, "Connection failed");
                }
            });
        }
    }
}

async fn handle_conn(state: Arc<ServerState>, stream: TcpStream) -> anyhow::Result<()> {
    let mut conn = FrameConn::new(stream);
    let request: ScoreRequest = conn.recv().await?;
    let response = state.handle(request).await;
    conn.send(&response).await?;
    Ok(())
}

/// Helper for tests: bind to an ephemeral port and spawn the accept loop.
pub async fn bind_ephemeral() -> anyhow::Result<SocketAddr> {
    bind_ephemeral_with_stall(DEFAULT_STALL).await
}

/// [`bind_ephemeral`] with a custom stall delay.
pub async fn bind_ephemeral_with_stall(stall: Duration) -> anyhow::Result<SocketAddr> {
    let server = ScoreServer::bind_with_stall("127.0.0.1:0", stall).await?;
    let addr = server.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = server.run().await {
            warn!(error = %e, "Score server stopped");
        }
    });
    Ok(addr)
}
