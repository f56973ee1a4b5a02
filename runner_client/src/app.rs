//! Client application driver.
//!
//! Owns the session, input, and score flow, and wires them to the async
//! collaborators. The fixed-tick loop itself lives in the binary; the app
//! exposes one `tick` plus console command execution.
//!
//! Slow paths never block a tick: score submission runs on a spawned task
//! and the leaderboard refreshes on a background interval, both reporting
//! back over channels the tick drains.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use runner_core::config::GameConfig;
use runner_core::event::TelemetrySink;
use runner_core::level::Level;
use runner_core::render::RenderSink;
use runner_core::score::{PlayerScore, ScoreError, ScoreService};
use runner_core::session::{GameSession, Phase};

use crate::flow::{ScoreFlow, SubmitBlocked};
use crate::input::InputState;

type SubmitResult = Result<PlayerScore, ScoreError>;
type RefreshResult = Result<Vec<PlayerScore>, ScoreError>;

pub struct GameApp {
    cfg: GameConfig,
    session: GameSession,
    input: InputState,
    flow: ScoreFlow,
    service: Arc<dyn ScoreService>,
    telemetry: Arc<dyn TelemetrySink>,
    renderer: Box<dyn RenderSink>,
    submit_tx: mpsc::Sender<SubmitResult>,
    submit_rx: mpsc::Receiver<SubmitResult>,
    refresh_tx: mpsc::Sender<RefreshResult>,
    refresh_rx: mpsc::Receiver<RefreshResult>,
    refresh_task: JoinHandle<()>,
}

impl GameApp {
    pub fn new(
        cfg: GameConfig,
        service: Arc<dyn ScoreService>,
        telemetry: Arc<dyn TelemetrySink>,
        renderer: Box<dyn RenderSink>,
    ) -> Self {
        let session = GameSession::new(cfg.session(), Level::default_course());
        let (submit_tx, submit_rx) = mpsc::channel(4);
        let (refresh_tx, refresh_rx) = mpsc::channel(4);

        // Periodic leaderboard refresh; also primes the board at startup
        // since the first interval tick fires immediately.
        let refresh_service = Arc::clone(&service);
        let period = cfg.refresh_interval();
        let top_n = cfg.top_n;
        let interval_tx = refresh_tx.clone();
        let refresh_task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let result = refresh_service.top_scores(top_n).await;
                if interval_tx.send(result).await.is_err() {
                    break;
                }
            }
        });

        Self {
            cfg,
            session,
            input: InputState::default(),
            flow: ScoreFlow::new(),
            service,
            telemetry,
            renderer,
            submit_tx,
            submit_rx,
            refresh_tx,
            refresh_rx,
            refresh_task,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn flow(&self) -> &ScoreFlow {
        &self.flow
    }

    /// Advances the app by one simulation tick. Returns user-facing status
    /// lines produced by async results that landed this tick.
    pub fn tick(&mut self, now: Instant) -> Vec<String> {
        let mut output = Vec::new();

        while let Ok(result) = self.refresh_rx.try_recv() {
            self.flow.apply_refresh(result);
        }
        while let Ok(result) = self.submit_rx.try_recv() {
            let stored = result.is_ok();
            output.push(self.flow.finish_submission(result));
            if stored {
                self.request_refresh();
            }
        }

        let commands = self.input.sample();
        self.session.tick(&commands, now);

        for event in self.session.drain_events() {
            self.telemetry.track(event.name(), event.payload());
        }

        self.renderer.draw(&self.session.scene());
        output
    }

    /// Executes one console line. `quit` is handled by the binary.
    pub fn exec_console(&mut self, line: &str, now: Instant) -> Vec<String> {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("left") => {
                self.input.hold_left();
                vec![]
            }
            Some("right") => {
                self.input.hold_right();
                vec![]
            }
            Some("stop") => {
                self.input.release();
                vec![]
            }
            Some("jump") => {
                self.input.queue_jump();
                vec![]
            }
            Some("restart") => {
                self.session.restart();
                self.flow.reset();
                self.input = InputState::default();
                vec!["Session restarted.".to_string()]
            }
            Some("submit") => match parts.next() {
                Some(name) => self.submit(name, now),
                None => vec!["Usage: submit <name>".to_string()],
            },
            Some("scores") => self.format_scores(),
            Some("status") => self.format_status(),
            Some(other) => vec![format!("Unknown command: {other}")],
            None => vec![],
        }
    }

    fn submit(&mut self, name: &str, now: Instant) -> Vec<String> {
        if !self.session.submission_open(now) {
            return vec!["Finish the run first, then submit.".to_string()];
        }
        match self.flow.try_begin_submission() {
            Err(SubmitBlocked::AlreadySubmitted) => {
                vec!["This run's score is already saved.".to_string()]
            }
            Err(SubmitBlocked::InFlight) => {
                vec!["Submission already in progress.".to_string()]
            }
            Ok(()) => {
                let score = PlayerScore::new(name, self.session.elapsed_seconds());
                info!(player = %score.player_name, time = score.time, "Submitting score");
                let service = Arc::clone(&self.service);
                let tx = self.submit_tx.clone();
                tokio::spawn(async move {
                    let result = service.submit(score).await;
                    let _ = tx.send(result).await;
                });
                vec![format!("Submitting as {name}...")]
            }
        }
    }

    /// One-shot leaderboard fetch, outside the interval schedule. Used
    /// right after a stored submission so the new entry shows up promptly.
    fn request_refresh(&self) {
        let service = Arc::clone(&self.service);
        let top_n = self.cfg.top_n;
        let tx = self.refresh_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(service.top_scores(top_n).await).await;
        });
    }

    fn format_scores(&self) -> Vec<String> {
        if self.flow.leaderboard().is_empty() {
            return vec!["No scores yet.".to_string()];
        }
        let mut lines = vec![format!("Top {}:", self.cfg.top_n)];
        for (i, score) in self.flow.leaderboard().iter().enumerate() {
            lines.push(format!(
                "{:>2}. {} - {:.2}s",
                i + 1,
                score.player_name,
                score.time
            ));
        }
        lines
    }

    fn format_status(&self) -> Vec<String> {
        let phase = match self.session.phase() {
            Phase::NotStarted => "not started",
            Phase::Running => "running",
            Phase::TimedOut => "timed out",
            Phase::Completed => "completed",
        };
        debug!(phase, "Status requested");
        vec![
            format!("Phase: {phase}"),
            format!("Clock: {}s", self.session.clock_seconds()),
            format!("Score saved: {}", self.flow.submitted()),
        ]
    }
}

impl Drop for GameApp {
    fn drop(&mut self) {
        self.refresh_task.abort();
    }
}
