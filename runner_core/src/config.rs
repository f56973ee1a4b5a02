//! Engine configuration.
//!
//! Every knob carries a default matching the shipped game, so an empty
//! JSON document configures a playable build.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::session::SessionConfig;

/// Top-level configuration for the client and the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed simulation rate in ticks per second.
    pub tick_hz: u32,
    /// Address of the score service.
    pub score_addr: String,
    /// Run time limit in seconds.
    pub time_limit_secs: u64,
    /// Time debit per ground touch, in seconds.
    pub fall_penalty_secs: u64,
    /// Leaderboard refresh period in seconds.
    pub refresh_interval_secs: u64,
    /// How many leaderboard entries to fetch and show.
    pub top_n: usize,
    /// Delay between completion and accepting a name submission.
    pub submit_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60,
            score_addr: "127.0.0.1:4600".to_string(),
            time_limit_secs: 30,
            fall_penalty_secs: 5,
            refresh_interval_secs: 10,
            top_n: 10,
            submit_delay_ms: 500,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_json::from_str(raw).context("parse game config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.tick_hz > 0, "tick_hz must be positive");
        anyhow::ensure!(self.time_limit_secs > 0, "time_limit_secs must be positive");
        anyhow::ensure!(self.top_n > 0, "top_n must be positive");
        Ok(())
    }

    /// Period of one simulation tick.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_hz))
    }

    /// Leaderboard refresh period.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            time_limit: Duration::from_secs(self.time_limit_secs),
            fall_penalty: Duration::from_secs(self.fall_penalty_secs),
            submit_delay: Duration::from_millis(self.submit_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = GameConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg.tick_hz, 60);
        assert_eq!(cfg.time_limit_secs, 30);
        assert_eq!(cfg.top_n, 10);
    }

    #[test]
    fn overrides_apply_and_validate() {
        let cfg = GameConfig::from_json_str(r#"{"tick_hz": 30, "top_n": 5}"#).unwrap();
        assert_eq!(cfg.tick_hz, 30);
        assert_eq!(cfg.top_n, 5);
        assert!(GameConfig::from_json_str(r#"{"tick_hz": 0}"#).is_err());
    }

    #[test]
    fn session_config_uses_configured_durations() {
        let cfg = GameConfig::from_json_str(r#"{"fall_penalty_secs": 7}"#).unwrap();
        let session = cfg.session();
        assert_eq!(session.fall_penalty, Duration::from_secs(7));
        assert_eq!(session.time_limit, Duration::from_secs(30));
    }
}
