//! `runner_client`
//!
//! Client-side systems:
//! - Input sampling and per-tick command generation
//! - Session driving on a fixed tick
//! - Score submission flow and leaderboard state
//! - Remote score service over the framed JSON protocol

pub mod app;
pub mod flow;
pub mod input;
pub mod score_client;

pub use app::GameApp;
