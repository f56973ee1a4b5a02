//! Game session state machine.
//!
//! Owns timing and the NotStarted → Running → {TimedOut, Completed} →
//! NotStarted lifecycle. One tick runs platform motion, then physics
//! integration, then the phase/timing evaluation; the tick is the sole
//! mutator of simulation state.
//!
//! Timing is wall-clock based: callers pass `now` into [`GameSession::tick`],
//! which keeps the whole machine deterministic under test.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::event::GameEvent;
use crate::level::{Level, Platform, PlatformKind};
use crate::motion::advance_platforms;
use crate::physics::{integrate, JUMP_IMPULSE, MOVE_SPEED};
use crate::player::{Player, PLAYER_HALF};
use crate::render::{EntityKind, SceneEntity};

/// Abstract input commands; the engine never sees raw device events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveNone,
    Jump,
}

/// Session lifecycle phase. Exactly one holds at any tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    TimedOut,
    Completed,
}

/// Session tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Run time limit before the session times out.
    pub time_limit: Duration,
    /// Time debit for touching the ground, applied once per fall.
    pub fall_penalty: Duration,
    /// UI-settle delay between completion and accepting a name submission.
    pub submit_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(30),
            fall_penalty: Duration::from_secs(5),
            submit_delay: Duration::from_millis(500),
        }
    }
}

/// The running game: level, player, phase, and timing.
pub struct GameSession {
    cfg: SessionConfig,
    level: Level,
    platforms: Vec<Platform>,
    player: Player,
    phase: Phase,
    /// Valid only while Running. Fall penalties shift this backward.
    started_at: Option<Instant>,
    /// Frozen at the moment of timeout/completion.
    elapsed: Duration,
    completed_at: Option<Instant>,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(cfg: SessionConfig, level: Level) -> Self {
        let platforms = level.platforms.clone();
        let player = Player::spawn_at(level.player_start);
        Self {
            cfg,
            level,
            platforms,
            player,
            phase: Phase::NotStarted,
            started_at: None,
            elapsed: Duration::ZERO,
            completed_at: None,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Elapsed run time; advances only while Running and freezes once the
    /// session is TimedOut or Completed.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Whole seconds, as shown on the in-game clock.
    pub fn clock_seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }

    /// True once a completed run is ready to accept a name submission
    /// (completion plus the UI-settle delay).
    pub fn submission_open(&self, now: Instant) -> bool {
        match (self.phase, self.completed_at) {
            (Phase::Completed, Some(at)) => now >= at + self.cfg.submit_delay,
            _ => false,
        }
    }

    /// Advances the session by one tick.
    pub fn tick(&mut self, commands: &[Command], now: Instant) {
        match self.phase {
            // Frozen: input is disabled and the world no longer moves.
            Phase::TimedOut | Phase::Completed => return,
            Phase::NotStarted => {
                // MoveNone is a release edge, not an intent to play.
                if commands.iter().any(|c| !matches!(c, Command::MoveNone)) {
                    self.phase = Phase::Running;
                    self.started_at = Some(now);
                    self.events.push(GameEvent::SessionStarted);
                    info!("Session started");
                }
            }
            Phase::Running => {}
        }

        if self.phase == Phase::Running {
            self.apply_commands(commands);
        }

        advance_platforms(&mut self.platforms);
        let outcome = integrate(
            &mut self.player,
            &self.platforms,
            self.level.player_start,
            self.level.fall_limit,
        );

        if self.phase != Phase::Running {
            return;
        }
        let Some(started_at) = self.started_at else {
            return;
        };

        if outcome.fell {
            // Debit the run by shifting the start timestamp backward. The
            // respawn ends the contact, so one fall is exactly one penalty.
            let penalized = started_at - self.cfg.fall_penalty;
            self.started_at = Some(penalized);
            self.elapsed = now.saturating_duration_since(penalized);
            let time = self.elapsed.as_secs_f64();
            self.events.push(GameEvent::GroundTouchPenalty { time });
            debug!(time, "Ground touch penalty applied");
            return;
        }

        self.elapsed = now.saturating_duration_since(started_at);

        if outcome.reached_goal {
            self.complete(now);
        } else if self.elapsed >= self.cfg.time_limit {
            self.time_out();
        }
    }

    /// Completion is idempotent: repeated goal contact once Completed does
    /// not re-freeze or re-fire the event.
    fn complete(&mut self, now: Instant) {
        if self.phase == Phase::Completed {
            return;
        }
        self.phase = Phase::Completed;
        self.completed_at = Some(now);
        self.player.vel = crate::math::Vec2::ZERO;
        let time = self.elapsed.as_secs_f64();
        self.events.push(GameEvent::RunCompleted { time });
        info!(time, "Run completed");
    }

    fn time_out(&mut self) {
        self.phase = Phase::TimedOut;
        self.player.vel = crate::math::Vec2::ZERO;
        let time = self.elapsed.as_secs_f64();
        self.events.push(GameEvent::GameTimeout { time });
        info!(time, "Run timed out");
    }

    /// Resets to NotStarted: platforms back to their level-load state, the
    /// player back at the spawn point, elapsed zeroed, input re-armed.
    pub fn restart(&mut self) {
        self.platforms = self.level.platforms.clone();
        self.player.respawn(self.level.player_start);
        self.phase = Phase::NotStarted;
        self.started_at = None;
        self.elapsed = Duration::ZERO;
        self.completed_at = None;
        self.events.clear();
        info!("Session restarted");
    }

    /// Takes the telemetry events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only drawable projection of the current world.
    pub fn scene(&self) -> Vec<SceneEntity> {
        let mut scene = Vec::with_capacity(self.platforms.len() + 1);
        scene.push(SceneEntity {
            kind: EntityKind::Player,
            pos: self.player.pos,
            half: PLAYER_HALF,
        });
        for platform in &self.platforms {
            let kind = match platform.kind {
                PlatformKind::Static => EntityKind::Static,
                PlatformKind::Start => EntityKind::Start,
                PlatformKind::Goal => EntityKind::Goal,
                PlatformKind::Bounce { .. } => EntityKind::Bounce,
                PlatformKind::Moving(_) => EntityKind::Moving,
            };
            scene.push(SceneEntity {
                kind,
                pos: platform.pos,
                half: platform.half,
            });
        }
        scene
    }

    fn apply_commands(&mut self, commands: &[Command]) {
        for command in commands {
            match command {
                Command::MoveLeft => self.player.vel.x = -MOVE_SPEED,
                Command::MoveRight => self.player.vel.x = MOVE_SPEED,
                Command::MoveNone => self.player.vel.x = 0.0,
                Command::Jump => {
                    if !self.player.airborne {
                        self.player.vel.y = JUMP_IMPULSE;
                        self.player.airborne = true;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::math::Vec2;

    fn session() -> GameSession {
        GameSession::new(SessionConfig::default(), Level::default_course())
    }

    #[test]
    fn first_command_starts_the_run() {
        let mut s = session();
        let t0 = Instant::now();

        s.tick(&[], t0);
        assert_eq!(s.phase(), Phase::NotStarted);

        s.tick(&[Command::MoveRight], t0);
        assert_eq!(s.phase(), Phase::Running);
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::SessionStarted));
    }

    #[test]
    fn elapsed_tracks_wall_clock_while_running() {
        let mut s = session();
        let t0 = Instant::now();
        s.tick(&[Command::MoveRight], t0);
        s.tick(&[], t0 + Duration::from_secs(3));
        assert_eq!(s.clock_seconds(), 3);
    }

    #[test]
    fn timeout_fires_once_and_freezes() {
        let mut s = session();
        let t0 = Instant::now();
        s.tick(&[Command::MoveRight], t0);

        s.tick(&[], t0 + Duration::from_secs(31));
        assert_eq!(s.phase(), Phase::TimedOut);
        assert_eq!(s.player().vel, Vec2::ZERO);
        let timeouts = s
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameTimeout { .. }))
            .count();
        assert_eq!(timeouts, 1);

        // Frozen: further ticks change nothing and emit nothing.
        let elapsed = s.elapsed();
        s.tick(&[Command::MoveLeft], t0 + Duration::from_secs(40));
        assert_eq!(s.elapsed(), elapsed);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn restart_fully_resets() {
        let mut s = session();
        let t0 = Instant::now();
        s.tick(&[Command::MoveRight], t0);
        s.tick(&[], t0 + Duration::from_secs(31));
        assert_eq!(s.phase(), Phase::TimedOut);

        s.restart();
        assert_eq!(s.phase(), Phase::NotStarted);
        assert_eq!(s.elapsed(), Duration::ZERO);
        assert_eq!(s.player().pos, Level::default_course().player_start);
        assert_eq!(s.player().vel, Vec2::ZERO);
        assert!(s.drain_events().is_empty());

        // Input is re-armed.
        s.tick(&[Command::Jump], t0 + Duration::from_secs(32));
        assert_eq!(s.phase(), Phase::Running);
    }

    #[test]
    fn jump_only_from_the_ground() {
        let mut s = session();
        let t0 = Instant::now();
        s.tick(&[Command::Jump], t0);
        let vy_after_first = s.player().vel.y;
        assert!(vy_after_first > 0.0);

        // A second jump mid-air must not re-apply the impulse.
        s.tick(&[Command::Jump], t0);
        assert!(s.player().vel.y < vy_after_first);
    }

    #[test]
    fn scene_projection_covers_player_and_platforms() {
        let s = session();
        let scene = s.scene();
        assert_eq!(scene.len(), s.platforms().len() + 1);
        assert_eq!(scene[0].kind, EntityKind::Player);
    }
}
