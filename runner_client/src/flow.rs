//! Score submission and leaderboard state.
//!
//! A completed run may produce at most one stored score. The flow tracks
//! the submitted/in-flight guards and turns service results into
//! user-facing status lines; the async calls themselves are driven by the
//! app so this state machine stays synchronous and testable.

use runner_core::score::{PlayerScore, ScoreError};
use tracing::warn;

/// Why a submission attempt could not begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// This run's score is already stored.
    AlreadySubmitted,
    /// A previous attempt is still awaiting its response.
    InFlight,
}

#[derive(Debug, Default)]
pub struct ScoreFlow {
    submitted: bool,
    in_flight: bool,
    leaderboard: Vec<PlayerScore>,
}

impl ScoreFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leaderboard(&self) -> &[PlayerScore] {
        &self.leaderboard
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Applies a leaderboard fetch result. A failed fetch degrades to an
    /// empty board rather than keeping a stale one.
    pub fn apply_refresh(&mut self, result: Result<Vec<PlayerScore>, ScoreError>) {
        match result {
            Ok(scores) => self.leaderboard = scores,
            Err(err) => {
                warn!(%err, "Leaderboard refresh failed");
                self.leaderboard.clear();
            }
        }
    }

    /// Claims the right to submit. On `Ok` the caller must follow up with
    /// [`ScoreFlow::finish_submission`].
    pub fn try_begin_submission(&mut self) -> Result<(), SubmitBlocked> {
        if self.submitted {
            return Err(SubmitBlocked::AlreadySubmitted);
        }
        if self.in_flight {
            return Err(SubmitBlocked::InFlight);
        }
        self.in_flight = true;
        Ok(())
    }

    /// Resolves an in-flight submission into a status line. Only a success
    /// latches `submitted`; a rejected name leaves the run open for another
    /// attempt.
    pub fn finish_submission(&mut self, result: Result<PlayerScore, ScoreError>) -> String {
        self.in_flight = false;
        match result {
            Ok(stored) => {
                self.submitted = true;
                format!(
                    "Score saved: {} in {:.2}s",
                    stored.player_name, stored.time
                )
            }
            Err(ScoreError::Rejected(reason)) => {
                format!("Name rejected ({reason}); choose another and submit again.")
            }
            Err(ScoreError::Transient(_)) => {
                "Could not save the score right now; try again.".to_string()
            }
        }
    }

    /// Clears per-run state when the session restarts. The leaderboard
    /// carries over until the next refresh.
    pub fn reset(&mut self) {
        self.submitted = false;
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(name: &str, time: f64) -> PlayerScore {
        PlayerScore::new(name, time)
    }

    #[test]
    fn one_stored_score_per_run() {
        let mut flow = ScoreFlow::new();
        flow.try_begin_submission().unwrap();
        flow.finish_submission(Ok(score("ada", 14.0)));
        assert!(flow.submitted());
        assert_eq!(
            flow.try_begin_submission(),
            Err(SubmitBlocked::AlreadySubmitted)
        );
    }

    #[test]
    fn rejection_leaves_the_run_open() {
        let mut flow = ScoreFlow::new();
        flow.try_begin_submission().unwrap();
        let msg = flow.finish_submission(Err(ScoreError::Rejected("invalid player name".into())));
        assert!(!flow.submitted());
        assert!(msg.contains("choose another"));
        // Retrying with a different name is allowed.
        assert!(flow.try_begin_submission().is_ok());
    }

    #[test]
    fn no_concurrent_attempts() {
        let mut flow = ScoreFlow::new();
        flow.try_begin_submission().unwrap();
        assert_eq!(flow.try_begin_submission(), Err(SubmitBlocked::InFlight));
    }

    #[test]
    fn failed_refresh_degrades_to_empty() {
        let mut flow = ScoreFlow::new();
        flow.apply_refresh(Ok(vec![score("ada", 12.0)]));
        assert_eq!(flow.leaderboard().len(), 1);
        flow.apply_refresh(Err(ScoreError::Transient("connection reset".into())));
        assert!(flow.leaderboard().is_empty());
    }

    #[test]
    fn restart_reopens_submission() {
        let mut flow = ScoreFlow::new();
        flow.try_begin_submission().unwrap();
        flow.finish_submission(Ok(score("ada", 14.0)));
        flow.reset();
        assert!(flow.try_begin_submission().is_ok());
    }
}
