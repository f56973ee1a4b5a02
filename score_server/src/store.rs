//! In-memory score storage.
//!
//! Scores live sorted ascending by completion time (fastest first), so
//! `top(n)` is a prefix copy. The store stamps `created` itself; client
//! clocks are not trusted.

use chrono::Utc;
use runner_core::score::PlayerScore;

#[derive(Debug, Default)]
pub struct ScoreBoard {
    scores: Vec<PlayerScore>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a score and returns the stamped record.
    pub fn record(&mut self, player_name: &str, time: f64) -> PlayerScore {
        let score = PlayerScore {
            player_name: player_name.to_string(),
            time,
            created: Utc::now(),
        };
        let at = self
            .scores
            .partition_point(|existing| existing.time <= score.time);
        self.scores.insert(at, score.clone());
        score
    }

    /// Fastest `n` scores.
    pub fn top(&self, n: usize) -> Vec<PlayerScore> {
        self.scores.iter().take(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_is_ascending_by_time() {
        let mut board = ScoreBoard::new();
        board.record("slow", 29.0);
        board.record("fast", 11.5);
        board.record("mid", 20.0);

        let top = board.top(10);
        let times: Vec<f64> = top.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![11.5, 20.0, 29.0]);
    }

    #[test]
    fn top_caps_at_n() {
        let mut board = ScoreBoard::new();
        for i in 0..12 {
            board.record("p", 10.0 + i as f64);
        }
        assert_eq!(board.top(10).len(), 10);
        assert_eq!(board.len(), 12);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut board = ScoreBoard::new();
        board.record("first", 15.0);
        board.record("second", 15.0);
        let top = board.top(2);
        assert_eq!(top[0].player_name, "first");
        assert_eq!(top[1].player_name, "second");
    }
}
