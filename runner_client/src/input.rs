//! Input handling.
//!
//! In a real client this would integrate with windowing and raw keyboard
//! sampling. This build takes held/pressed state from the console layer and
//! turns it into deterministic per-tick command lists.
//!
//! Two edge rules matter:
//! - Jump fires once per press, not once per tick held.
//! - Releasing movement emits a single `MoveNone` so the session zeroes
//!   horizontal velocity exactly once.

use runner_core::session::Command;

/// User input state at a moment in time.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    left_held: bool,
    right_held: bool,
    jump_queued: bool,
    was_moving: bool,
}

impl InputState {
    pub fn hold_left(&mut self) {
        self.left_held = true;
        self.right_held = false;
    }

    pub fn hold_right(&mut self) {
        self.right_held = true;
        self.left_held = false;
    }

    pub fn release(&mut self) {
        self.left_held = false;
        self.right_held = false;
    }

    pub fn queue_jump(&mut self) {
        self.jump_queued = true;
    }

    /// Drains the sampled state into the commands for one tick.
    pub fn sample(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.left_held {
            commands.push(Command::MoveLeft);
        } else if self.right_held {
            commands.push(Command::MoveRight);
        } else if self.was_moving {
            commands.push(Command::MoveNone);
        }
        self.was_moving = self.left_held || self.right_held;

        if self.jump_queued {
            commands.push(Command::Jump);
            self.jump_queued = false;
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_fires_once_per_press() {
        let mut input = InputState::default();
        input.queue_jump();
        assert_eq!(input.sample(), vec![Command::Jump]);
        assert!(input.sample().is_empty());
    }

    #[test]
    fn release_emits_a_single_move_none() {
        let mut input = InputState::default();
        input.hold_right();
        assert_eq!(input.sample(), vec![Command::MoveRight]);
        input.release();
        assert_eq!(input.sample(), vec![Command::MoveNone]);
        // Idle after the release edge: no commands at all.
        assert!(input.sample().is_empty());
    }

    #[test]
    fn opposite_hold_wins_over_the_previous_one() {
        let mut input = InputState::default();
        input.hold_left();
        input.hold_right();
        assert_eq!(input.sample(), vec![Command::MoveRight]);
    }
}
