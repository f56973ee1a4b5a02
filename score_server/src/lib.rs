//! `score_server`
//!
//! Server-side systems:
//! - TCP accept loop answering framed JSON score requests
//! - Player name moderation
//! - In-memory leaderboard storage, fastest first

pub mod moderation;
pub mod server;
pub mod store;

pub use server::ScoreServer;
