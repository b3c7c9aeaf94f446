//! Game session and core state machine
//!
//! The session owns every entity collection, the player, score/lives
//! bookkeeping and the seeded RNG. UI actions map onto explicit phase
//! transitions; anything not in the transition table is rejected.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Bullet, Enemy, Explosion, KillReport, Player, PowerUp, PowerUpKind};
use super::level::{EnemyKind, LEVEL_COUNT, LevelConfig, level_config};
use super::spawn::spawn_level;
use crate::consts::*;
use crate::{Arena, Settings, SimError, SimResult};
use rand::Rng;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu, no level loaded
    Idle,
    /// Active gameplay
    Playing,
    /// Simulation frozen, waiting for resume/restart/quit
    Paused,
    /// Level cleared, waiting for next level
    LevelComplete,
    /// Out of lives
    GameOver,
}

/// UI actions, each mapping to one transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// New run from level 1
    StartGame,
    /// New run from a chosen level (level select)
    StartAtLevel(u8),
    Pause,
    Resume,
    /// Replay the current level from its start
    Restart,
    /// Back to the menu
    Quit,
    /// Advance after a cleared level (or finish the campaign)
    NextLevel,
    /// New run after game over
    RestartGame,
}

/// Notifications for the surrounding UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(u8),
    LevelStarted { level: u8 },
    LevelComplete { level: u8, elapsed_ms: f64 },
    GameOver { final_score: u64 },
    /// Final level cleared
    Victory { final_score: u64 },
}

/// Compact end-of-run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub phase: GamePhase,
    pub level: u8,
    pub score: u64,
    pub lives: u8,
    pub time_ticks: u64,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    pub settings: Settings,
    pub arena: Arena,
    /// Session RNG (spawns, enemy fire, drops)
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Current level (1-based)
    pub level: u8,
    /// Tuning for the current level
    pub config: &'static LevelConfig,
    /// Kills since the level started
    pub enemies_defeated: u32,
    /// Set when the boss goes down
    pub boss_defeated: bool,
    /// Sim-clock time the level started
    pub level_start_ms: f64,
    /// Simulation clock (advances only while playing)
    pub clock_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Present while a level is loaded
    pub player: Option<Player>,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub powerups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    /// Undelivered UI notifications
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create an idle session
    pub fn new(settings: Settings) -> Self {
        Self {
            arena: settings.arena(),
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            phase: GamePhase::Idle,
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            config: &super::level::LEVELS[0],
            enemies_defeated: 0,
            boss_defeated: false,
            level_start_ms: 0.0,
            clock_ms: 0.0,
            time_ticks: 0,
            player: None,
            enemies: Vec::new(),
            bullets: Vec::new(),
            powerups: Vec::new(),
            explosions: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Apply a UI action. Invalid actions leave the session untouched.
    pub fn apply(&mut self, action: Action) -> SimResult<GamePhase> {
        use GamePhase::*;

        match (self.phase, action) {
            (Idle, Action::StartGame) | (GameOver, Action::RestartGame) => self.new_game(1)?,
            (Idle, Action::StartAtLevel(level)) => self.new_game(level)?,
            (Playing, Action::Pause) => {
                self.phase = Paused;
                log::info!("Paused on level {}", self.level);
            }
            (Paused, Action::Resume) => {
                self.phase = Playing;
                log::info!("Resumed level {}", self.level);
            }
            (Paused, Action::Restart) => self.start_level(self.level)?,
            (Paused | LevelComplete | GameOver, Action::Quit) => self.quit(),
            (LevelComplete, Action::NextLevel) if self.level < LEVEL_COUNT => {
                self.start_level(self.level + 1)?
            }
            (LevelComplete, Action::NextLevel) => {
                log::info!("Campaign complete! Final score {}", self.score);
                self.events.push(GameEvent::Victory {
                    final_score: self.score,
                });
                self.quit();
            }
            (phase, action) => {
                log::warn!("Rejected {:?} while {:?}", action, phase);
                return Err(SimError::InvalidTransition { phase, action });
            }
        }

        Ok(self.phase)
    }

    /// Reset score and lives, then load `level`
    fn new_game(&mut self, level: u8) -> SimResult<()> {
        // Validate before touching anything
        level_config(level)?;

        self.score = 0;
        self.lives = STARTING_LIVES;
        self.events.push(GameEvent::ScoreChanged(self.score));
        self.events.push(GameEvent::LivesChanged(self.lives));
        self.start_level(level)
    }

    /// Enter `Playing` on a fresh copy of `level`
    pub(crate) fn start_level(&mut self, level: u8) -> SimResult<()> {
        let config = level_config(level)?;

        self.level = level;
        self.config = config;
        self.enemies_defeated = 0;
        self.boss_defeated = false;
        self.level_start_ms = self.clock_ms;

        self.bullets.clear();
        self.powerups.clear();
        self.explosions.clear();
        self.player = Some(Player::new(&self.arena));
        self.enemies = spawn_level(config, &self.arena, &mut self.rng);

        self.phase = GamePhase::Playing;
        log::info!(
            "Level {}: {} x {:?}, health {}, fire rate {}",
            level,
            config.enemy_count,
            config.enemy_kind,
            config.enemy_health,
            config.enemy_fire_rate
        );
        self.events.push(GameEvent::LevelStarted { level });
        Ok(())
    }

    /// Drop the level and return to the menu
    fn quit(&mut self) {
        self.player = None;
        self.enemies.clear();
        self.bullets.clear();
        self.powerups.clear();
        self.explosions.clear();
        self.phase = GamePhase::Idle;
    }

    /// True once the level's win condition holds
    pub fn level_cleared(&self) -> bool {
        if self.config.is_boss_level() {
            self.boss_defeated
        } else {
            self.enemies_defeated >= self.config.enemy_count
        }
    }

    /// Playing -> LevelComplete
    pub(crate) fn complete_level(&mut self) {
        let elapsed_ms = self.clock_ms - self.level_start_ms;
        self.phase = GamePhase::LevelComplete;
        log::info!(
            "Level {} complete in {:.1}s, score {}",
            self.level,
            elapsed_ms / 1000.0,
            self.score
        );
        self.events.push(GameEvent::LevelComplete {
            level: self.level,
            elapsed_ms,
        });
    }

    /// Explosion, kill count, possible drop, score
    pub(crate) fn apply_kill(&mut self, report: KillReport) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.explosions.push(Explosion::new(report.center));
        self.enemies_defeated += 1;

        if self.rng.random_bool(POWERUP_DROP_CHANCE) {
            let kind = PowerUpKind::roll(&mut self.rng);
            self.powerups.push(PowerUp::new(report.center, kind));
        }

        if report.kind == EnemyKind::Boss {
            self.boss_defeated = true;
        }

        self.add_score(report.score);
        log::debug!(
            "{:?} destroyed ({}/{}), score {}",
            report.kind,
            self.enemies_defeated,
            self.config.enemy_count,
            self.score
        );
    }

    /// Hurt the ship; a depleted ship costs a life
    pub(crate) fn damage_player(&mut self, amount: i32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(player) = self.player.as_mut() else {
            return;
        };
        if !player.take_damage(amount) {
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LivesChanged(self.lives));

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            log::info!("Game over on level {} with score {}", self.level, self.score);
            self.events.push(GameEvent::GameOver {
                final_score: self.score,
            });
        } else {
            player.health = PLAYER_MAX_HEALTH;
            log::debug!("Ship lost, {} lives left", self.lives);
        }
    }

    /// Apply a collected power-up
    pub(crate) fn collect_powerup(&mut self, kind: PowerUpKind) {
        if self.phase != GamePhase::Playing {
            return;
        }
        match kind {
            PowerUpKind::Score => self.add_score(self.settings.score_bonus),
            PowerUpKind::Health => {
                if let Some(player) = self.player.as_mut() {
                    player.heal(self.settings.health_bonus);
                }
            }
        }
    }

    fn add_score(&mut self, points: u64) {
        self.score += points;
        self.events.push(GameEvent::ScoreChanged(self.score));
    }

    /// Take all pending UI notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending notifications, without consuming them
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Time spent in the current level (sim clock)
    pub fn level_elapsed_ms(&self) -> f64 {
        self.clock_ms - self.level_start_ms
    }

    /// True while a level is loaded and the driver should keep ticking
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::Paused)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            phase: self.phase,
            level: self.level,
            score: self.score,
            lives: self.lives,
            time_ticks: self.time_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(Settings::with_seed(12345))
    }

    #[test]
    fn test_new_session_is_idle() {
        let s = session();
        assert_eq!(s.phase, GamePhase::Idle);
        assert!(s.player.is_none());
        assert!(s.enemies.is_empty());
        assert_eq!(s.lives, STARTING_LIVES);
    }

    #[test]
    fn test_start_game_loads_level_one() {
        let mut s = session();
        assert_eq!(s.apply(Action::StartGame), Ok(GamePhase::Playing));
        assert_eq!(s.level, 1);
        assert_eq!(s.score, 0);
        assert_eq!(s.lives, 3);
        assert_eq!(s.enemies.len(), 8);
        assert!(s.player.is_some());
        assert_eq!(
            s.drain_events(),
            vec![
                GameEvent::ScoreChanged(0),
                GameEvent::LivesChanged(3),
                GameEvent::LevelStarted { level: 1 },
            ]
        );
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut s = session();
        for action in [
            Action::Resume,
            Action::Pause,
            Action::Restart,
            Action::Quit,
            Action::NextLevel,
            Action::RestartGame,
        ] {
            assert_eq!(
                s.apply(action),
                Err(SimError::InvalidTransition {
                    phase: GamePhase::Idle,
                    action
                })
            );
        }
        assert_eq!(s.phase, GamePhase::Idle);

        s.apply(Action::StartGame).unwrap();
        assert!(s.apply(Action::StartGame).is_err());
        assert!(s.apply(Action::Resume).is_err());
        assert!(s.apply(Action::NextLevel).is_err());
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_level_select_bounds() {
        let mut s = session();
        assert_eq!(
            s.apply(Action::StartAtLevel(6)),
            Err(SimError::LevelOutOfRange { level: 6 })
        );
        assert_eq!(
            s.apply(Action::StartAtLevel(0)),
            Err(SimError::LevelOutOfRange { level: 0 })
        );
        assert_eq!(s.phase, GamePhase::Idle);
        assert!(s.pending_events().is_empty());

        assert_eq!(s.apply(Action::StartAtLevel(5)), Ok(GamePhase::Playing));
        assert_eq!(s.enemies.len(), 1);
        assert!(s.enemies[0].is_boss());
    }

    #[test]
    fn test_pause_resume_restart_quit() {
        let mut s = session();
        s.apply(Action::StartGame).unwrap();
        s.score = 500;
        s.enemies_defeated = 3;
        s.bullets.push(Bullet::player(glam::Vec2::new(10.0, 10.0)));

        assert_eq!(s.apply(Action::Pause), Ok(GamePhase::Paused));
        assert_eq!(s.apply(Action::Resume), Ok(GamePhase::Playing));

        s.apply(Action::Pause).unwrap();
        assert_eq!(s.apply(Action::Restart), Ok(GamePhase::Playing));
        // Level state reset, run state kept
        assert_eq!(s.enemies_defeated, 0);
        assert!(s.bullets.is_empty());
        assert_eq!(s.enemies.len(), 8);
        assert_eq!(s.score, 500);

        s.apply(Action::Pause).unwrap();
        assert_eq!(s.apply(Action::Quit), Ok(GamePhase::Idle));
        assert!(s.player.is_none());
        assert!(s.enemies.is_empty());
    }

    #[test]
    fn test_next_level_and_victory() {
        let mut s = session();
        s.apply(Action::StartAtLevel(4)).unwrap();
        s.complete_level();
        assert_eq!(s.apply(Action::NextLevel), Ok(GamePhase::Playing));
        assert_eq!(s.level, 5);

        s.complete_level();
        s.drain_events();
        assert_eq!(s.apply(Action::NextLevel), Ok(GamePhase::Idle));
        assert!(matches!(
            s.drain_events().as_slice(),
            [GameEvent::Victory { .. }]
        ));
        assert!(s.player.is_none());
    }

    #[test]
    fn test_kill_bookkeeping() {
        let mut s = session();
        s.apply(Action::StartGame).unwrap();
        s.drain_events();

        let report = KillReport {
            kind: EnemyKind::Basic,
            center: glam::Vec2::new(50.0, 50.0),
            score: 100,
        };
        s.apply_kill(report);
        assert_eq!(s.score, 100);
        assert_eq!(s.enemies_defeated, 1);
        assert_eq!(s.explosions.len(), 1);
        assert_eq!(s.drain_events(), vec![GameEvent::ScoreChanged(100)]);
        assert!(!s.boss_defeated);
    }

    #[test]
    fn test_kill_drop_rate() {
        let mut s = session();
        s.apply(Action::StartGame).unwrap();
        let report = KillReport {
            kind: EnemyKind::Basic,
            center: glam::Vec2::new(50.0, 50.0),
            score: 100,
        };
        for _ in 0..10_000 {
            s.apply_kill(report);
        }
        let drops = s.powerups.len();
        assert!((1_700..2_300).contains(&drops), "drop count {}", drops);
        assert!(s.powerups.iter().all(|p| p.pos == report.center));
        assert_eq!(s.explosions.len(), 10_000);
    }

    #[test]
    fn test_no_bookkeeping_after_game_over() {
        let mut s = session();
        s.apply(Action::StartGame).unwrap();
        s.lives = 1;
        s.damage_player(PLAYER_MAX_HEALTH);
        s.drain_events();

        s.apply_kill(KillReport {
            kind: EnemyKind::Basic,
            center: glam::Vec2::new(50.0, 50.0),
            score: 100,
        });
        s.collect_powerup(PowerUpKind::Score);
        assert_eq!(s.score, 0);
        assert_eq!(s.enemies_defeated, 0);
        assert!(s.explosions.is_empty());
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_damage_consumes_life() {
        let mut s = session();
        s.apply(Action::StartGame).unwrap();
        s.lives = 2;
        s.drain_events();

        s.damage_player(PLAYER_MAX_HEALTH);
        assert_eq!(s.lives, 1);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.player.as_ref().unwrap().health, PLAYER_MAX_HEALTH);
        assert_eq!(s.drain_events(), vec![GameEvent::LivesChanged(1)]);

        s.damage_player(PLAYER_MAX_HEALTH + 50);
        assert_eq!(s.lives, 0);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.player.as_ref().unwrap().health, 0);

        // Further damage after game over is ignored
        s.damage_player(10);
        assert_eq!(s.lives, 0);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut s = session();
        s.apply(Action::StartAtLevel(3)).unwrap();
        s.score = 999;
        s.lives = 1;
        s.damage_player(PLAYER_MAX_HEALTH);
        assert_eq!(s.phase, GamePhase::GameOver);

        assert_eq!(s.apply(Action::RestartGame), Ok(GamePhase::Playing));
        assert_eq!(s.level, 1);
        assert_eq!(s.score, 0);
        assert_eq!(s.lives, STARTING_LIVES);
    }

    #[test]
    fn test_health_powerup_clamps() {
        let mut s = session();
        s.apply(Action::StartGame).unwrap();
        s.player.as_mut().unwrap().health = 80;
        s.collect_powerup(PowerUpKind::Health);
        let expected = (80 + s.settings.health_bonus).min(PLAYER_MAX_HEALTH);
        assert_eq!(s.player.as_ref().unwrap().health, expected);

        s.collect_powerup(PowerUpKind::Score);
        assert_eq!(s.score, s.settings.score_bonus);
    }
}
