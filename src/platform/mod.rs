//! Platform abstraction layer
//!
//! Narrow contracts between the simulation and its host:
//! - `Scheduler`: asks the host for another frame callback
//! - `SessionObserver`: receives score/lives/level notifications for the UI
//! - `FrameDriver`: turns wall-clock frames into fixed simulation ticks

pub mod input;

pub use input::{InputState, Key, PointerState};

use crate::consts::*;
use crate::renderer::{Renderer, draw_scene};
use crate::sim::{Action, GameEvent, GamePhase, GameSession, tick};
use crate::SimResult;

/// Host frame scheduling (requestAnimationFrame or a native loop)
pub trait Scheduler {
    /// Ask for one more frame callback
    fn request_tick(&mut self);
}

/// UI hooks for session events. All methods default to no-ops.
pub trait SessionObserver {
    fn on_score_changed(&mut self, _score: u64) {}
    fn on_lives_changed(&mut self, _lives: u8) {}
    fn on_level_started(&mut self, _level: u8) {}
    fn on_level_complete(&mut self, _level: u8, _elapsed_ms: f64) {}
    fn on_game_over(&mut self, _final_score: u64) {}
    fn on_victory(&mut self, _final_score: u64) {}
}

/// Observer that ignores everything
impl SessionObserver for () {}

/// Fixed timestep driver around a session
#[derive(Debug, Clone)]
pub struct FrameDriver {
    pub session: GameSession,
    pub input: InputState,
    accumulator: f32,
    last_time_ms: Option<f64>,
}

impl FrameDriver {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            input: InputState::new(),
            accumulator: 0.0,
            last_time_ms: None,
        }
    }

    /// Apply a UI action, discarding any partial tick and the frame clock
    pub fn apply(&mut self, action: Action) -> SimResult<GamePhase> {
        let phase = self.session.apply(action)?;
        self.accumulator = 0.0;
        self.last_time_ms = None;
        Ok(phase)
    }

    /// Run the simulation ticks owed for `elapsed` seconds of wall time.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        let dt = elapsed.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.to_tick_input();
            tick(&mut self.session, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.consume_triggers();
        }

        substeps
    }

    /// Forward queued session events to the observer
    pub fn dispatch_events<O: SessionObserver + ?Sized>(&mut self, observer: &mut O) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) => observer.on_score_changed(score),
                GameEvent::LivesChanged(lives) => observer.on_lives_changed(lives),
                GameEvent::LevelStarted { level } => observer.on_level_started(level),
                GameEvent::LevelComplete { level, elapsed_ms } => {
                    observer.on_level_complete(level, elapsed_ms)
                }
                GameEvent::GameOver { final_score } => observer.on_game_over(final_score),
                GameEvent::Victory { final_score } => observer.on_victory(final_score),
            }
        }
    }

    /// One host frame at timestamp `now_ms`: simulate, notify, render, and
    /// reschedule while a level is loaded.
    pub fn frame<R, O, S>(&mut self, now_ms: f64, renderer: &mut R, observer: &mut O, scheduler: &mut S) -> u32
    where
        R: Renderer + ?Sized,
        O: SessionObserver + ?Sized,
        S: Scheduler + ?Sized,
    {
        let elapsed = match self.last_time_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time_ms = Some(now_ms);

        let ticks = self.advance(elapsed);
        self.dispatch_events(observer);
        draw_scene(&self.session, renderer);

        if self.session.is_running() {
            scheduler.request_tick();
        }
        ticks
    }
}
