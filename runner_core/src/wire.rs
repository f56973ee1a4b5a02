//! Score-service wire protocol.
//!
//! Length-prefixed JSON frames over TCP, one request/response pair per
//! connection; the client dials per call. Serialization stays explicit and
//! versionable.

use anyhow::Context;
use bytes::{BufMut, BytesMut};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};

use crate::score::PlayerScore;

/// Upper bound on a single frame; requests and score lists are tiny.
const MAX_FRAME_LEN: usize = 64 * 1024;

/// Client -> server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ScoreRequest {
    /// Fetch the top `limit` scores, fastest first.
    TopScores { limit: usize },
    /// Moderate and store a score.
    Submit { score: PlayerScore },
}

/// Server -> client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ScoreResponse {
    Scores(Vec<PlayerScore>),
    /// The stored record, with the server-stamped `created`.
    Accepted(PlayerScore),
    /// Moderation refused the player name.
    Rejected { reason: String },
    /// Internal server failure.
    Failure { message: String },
}

/// A framed connection carrying length-prefixed JSON messages.
#[derive(Debug)]
pub struct FrameConn {
    stream: TcpStream,
}

impl FrameConn {
    pub fn new(stream: TcpStream) -> Self {
        Self { stream }
    }

    pub async fn send<T: Serialize>(&mut self, msg: &T) -> anyhow::Result<()> {
        let payload = serde_json::to_vec(msg).context("serialize msg")?;
        anyhow::ensure!(
            payload.len() <= MAX_FRAME_LEN,
            "frame too large: {}",
            payload.len()
        );
        let mut buf = BytesMut::with_capacity(4 + payload.len());
        buf.put_u32(payload.len() as u32);
        buf.extend_from_slice(&payload);
        self.stream.write_all(&buf).await.context("tcp write")?;
        Ok(())
    }

    pub async fn recv<T: DeserializeOwned>(&mut self) -> anyhow::Result<T> {
        let mut len_buf = [0u8; 4];
        self.stream
            .read_exact(&mut len_buf)
            .await
            .context("tcp read len")?;
        let len = u32::from_be_bytes(len_buf) as usize;
        anyhow::ensure!(len <= MAX_FRAME_LEN, "frame too large: {len}");
        let mut payload = vec![0u8; len];
        self.stream
            .read_exact(&mut payload)
            .await
            .context("tcp read payload")?;
        let msg = serde_json::from_slice(&payload).context("deserialize msg")?;
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn request_roundtrips_over_a_socket() -> anyhow::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await?;
            let mut conn = FrameConn::new(stream);
            let req: ScoreRequest = conn.recv().await?;
            conn.send(&ScoreResponse::Scores(Vec::new())).await?;
            Ok::<_, anyhow::Error>(req)
        });

        let mut conn = FrameConn::new(TcpStream::connect(addr).await?);
        let req = ScoreRequest::TopScores { limit: 10 };
        conn.send(&req).await?;
        let resp: ScoreResponse = conn.recv().await?;

        assert_eq!(server.await??, req);
        assert_eq!(resp, ScoreResponse::Scores(Vec::new()));
        Ok(())
    }

    #[tokio::test]
    async fn oversized_frame_is_refused_before_writing() -> anyhow::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let _accept = tokio::spawn(async move { listener.accept().await });

        let mut conn = FrameConn::new(TcpStream::connect(addr).await?);
        let huge = ScoreResponse::Failure {
            message: "x".repeat(MAX_FRAME_LEN + 1),
        };
        let err = conn.send(&huge).await.unwrap_err();
        assert!(err.to_string().contains("frame too large"));
        Ok(())
    }
}
