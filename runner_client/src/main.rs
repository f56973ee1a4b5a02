//! Standalone game binary.
//!
//! Usage:
//!   cargo run -p runner_client -- [--score-addr 127.0.0.1:4600] [--tick-hz 60]
//!
//! Runs the simulation on a fixed tick and takes commands from stdin.
//!
//! Console commands:
//!   left / right / stop - Hold or release horizontal movement
//!   jump                - Jump (from the ground only)
//!   restart             - Reset the session
//!   submit <name>       - Submit the completed run's score
//!   scores              - Show the leaderboard
//!   status              - Show session status
//!   quit                - Exit

use std::env;
use std::io::{BufRead, Write};
use std::sync::Arc;

use runner_client::GameApp;
use runner_client::score_client::RemoteScoreService;
use runner_core::config::GameConfig;
use runner_core::event::NullSink;
use runner_core::render::NullRenderer;
use tokio::sync::mpsc;
use tracing::info;

fn parse_args() -> GameConfig {
    let mut cfg = GameConfig::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--score-addr" if i + 1 < args.len() => {
                cfg.score_addr = args[i + 1].clone();
                i += 2;
            }
            "--tick-hz" if i + 1 < args.len() => {
                cfg.tick_hz = args[i + 1].parse().unwrap_or(60);
                i += 2;
            }
            _ => i += 1,
        }
    }
    cfg
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cfg = parse_args();
    cfg.validate()?;
    info!(score_addr = %cfg.score_addr, tick_hz = cfg.tick_hz, "Starting game");

    let telemetry = Arc::new(NullSink);
    let service = Arc::new(RemoteScoreService::new(
        cfg.score_addr.clone(),
        telemetry.clone(),
    ));
    let mut app = GameApp::new(cfg.clone(), service, telemetry, Box::new(NullRenderer));

    // Set up console input channel.
    let (console_tx, mut console_rx) = mpsc::channel::<String>(32);

    // Spawn stdin reader thread.
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        loop {
            print!("] ");
            let _ = stdout.flush();
            let mut line = String::new();
            if stdin.lock().read_line(&mut line).is_err() {
                break;
            }
            let line = line.trim().to_string();
            if !line.is_empty() && console_tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    println!("Game ready. Move to start the clock; 'status' for info, 'quit' to exit.");
    println!();

    let tick_interval = cfg.tick_interval();
    let mut next_tick = tokio::time::Instant::now();

    loop {
        while let Ok(line) = console_rx.try_recv() {
            if line == "quit" {
                info!("Shutting down");
                return Ok(());
            }
            for out in app.exec_console(&line, std::time::Instant::now()) {
                println!("{out}");
            }
        }

        for out in app.tick(std::time::Instant::now()) {
            println!("{out}");
        }

        next_tick += tick_interval;
        tokio::time::sleep_until(next_tick).await;
    }
}
