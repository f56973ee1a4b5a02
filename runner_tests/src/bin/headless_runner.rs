//! Headless scripted run.
//!
//! Drives the simulation for a fixed number of ticks without a renderer or
//! score server and prints the emitted events, for quick manual smoke runs:
//!
//!   cargo run -p runner_tests --bin headless_runner -- [ticks]

use std::time::{Duration, Instant};

use runner_core::level::Level;
use runner_core::session::{Command, GameSession, Phase, SessionConfig};
use tracing::info;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let ticks: u32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(600);

    let mut session = GameSession::new(SessionConfig::default(), Level::default_course());
    let t0 = Instant::now();
    let dt = Duration::from_secs_f64(1.0 / 60.0);

    // Scripted input: run right and hop every second.
    session.tick(&[Command::MoveRight], t0);
    for i in 1..ticks {
        let commands = if i % 60 == 0 {
            vec![Command::Jump]
        } else {
            Vec::new()
        };
        session.tick(&commands, t0 + dt * i);

        for event in session.drain_events() {
            info!(tick = i, event = event.name(), "Session event");
        }
    }

    let phase = match session.phase() {
        Phase::NotStarted => "not started",
        Phase::Running => "running",
        Phase::TimedOut => "timed out",
        Phase::Completed => "completed",
    };
    info!(
        ticks,
        phase,
        clock = session.clock_seconds(),
        x = session.player().pos.x,
        y = session.player().pos.y,
        "Run finished"
    );
}
