//! Nova Strike entry point
//!
//! Native builds run a headless demo: the autopilot plays the campaign on
//! a simulated 60 Hz clock, the log shows progress and a JSON summary is
//! printed at the end. Usage: `nova-strike [settings.json]`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use nova_strike::platform::{FrameDriver, Scheduler, SessionObserver};
    use nova_strike::renderer::DrawList;
    use nova_strike::sim::{Action, GamePhase, GameSession, SessionSummary};
    use nova_strike::{Settings, SimResult};
    use serde::Serialize;

    /// Give up after ten simulated minutes
    const MAX_FRAMES: u64 = 60 * 60 * 10;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Native loop stand-in for requestAnimationFrame
    #[derive(Default)]
    struct LoopScheduler {
        pending: bool,
    }

    impl Scheduler for LoopScheduler {
        fn request_tick(&mut self) {
            self.pending = true;
        }
    }

    /// Mirrors the UI callbacks into the log
    #[derive(Default)]
    struct LogObserver {
        levels_cleared: u8,
        victory: bool,
    }

    impl SessionObserver for LogObserver {
        fn on_lives_changed(&mut self, lives: u8) {
            log::info!("Lives: {}", lives);
        }

        fn on_level_started(&mut self, level: u8) {
            log::info!("Starting level {}", level);
        }

        fn on_level_complete(&mut self, level: u8, elapsed_ms: f64) {
            self.levels_cleared += 1;
            log::info!("Cleared level {} in {:.1}s", level, elapsed_ms / 1000.0);
        }

        fn on_game_over(&mut self, final_score: u64) {
            log::info!("Game over, final score {}", final_score);
        }

        fn on_victory(&mut self, final_score: u64) {
            self.victory = true;
            log::info!("Victory! Final score {}", final_score);
        }
    }

    #[derive(Serialize)]
    struct RunReport {
        #[serde(flatten)]
        session: SessionSummary,
        frames: u64,
        levels_cleared: u8,
        victory: bool,
    }

    pub fn run() -> SimResult<()> {
        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load(path),
            None => Settings::default(),
        };
        settings.validate()?;
        log::info!("Nova Strike (headless) starting with seed {:#x}", settings.seed);

        let mut driver = FrameDriver::new(GameSession::new(settings));
        driver.input.autopilot = true;
        driver.apply(Action::StartGame)?;

        let mut renderer = DrawList::new();
        let mut observer = LogObserver::default();
        let mut scheduler = LoopScheduler::default();
        let mut now_ms = 0.0;
        let mut frames = 0;

        while frames < MAX_FRAMES {
            scheduler.pending = false;
            renderer.clear();
            driver.frame(now_ms, &mut renderer, &mut observer, &mut scheduler);
            now_ms += FRAME_MS;
            frames += 1;

            if driver.session.phase == GamePhase::LevelComplete {
                driver.apply(Action::NextLevel)?;
                continue;
            }
            if !scheduler.pending {
                break;
            }
        }
        if frames >= MAX_FRAMES {
            log::warn!("Stopped after {} frames without finishing", frames);
        }

        let report = RunReport {
            session: driver.session.summary(),
            frames,
            levels_cleared: observer.levels_cleared,
            victory: observer.victory,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(err) => log::error!("Failed to encode run summary: {}", err),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(err) = headless::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive the library through `platform::FrameDriver`
}
