//! Nova Strike - A five-level vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state machine)
//! - `renderer`: Renderer contract and per-entity draw routines
//! - `platform`: Frame driver, input latching, scheduler/observer contracts
//! - `settings`: Canvas size, seed and gameplay tuning

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use settings::Settings;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Simulation clock advance per tick, in milliseconds
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap the driver will try to catch up on (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 600.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Gap between the ship and the bottom edge at spawn
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    /// Minimum time between shots (ms)
    pub const SHOOT_DELAY_MS: f64 = 300.0;
    /// Ticks of immunity to body contact after a ram
    pub const CONTACT_COOLDOWN_TICKS: u32 = 30;

    /// Session defaults
    pub const STARTING_LIVES: u8 = 3;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    /// Pixels per tick per unit of bullet speed
    pub const BULLET_SPEED_SCALE: f32 = 5.0;
    pub const PLAYER_BULLET_SPEED: f32 = 1.0;
    pub const ENEMY_BULLET_SPEED: f32 = 2.0;
    /// Number of bullets in the boss fan
    pub const BOSS_FAN_BULLETS: usize = 5;

    /// Enemy drift: x += sin(y * FREQ) * direction * AMPLITUDE
    pub const ENEMY_DRIFT_FREQ: f32 = 0.05;
    pub const ENEMY_DRIFT_AMPLITUDE: f32 = 1.5;
    /// Boss moves slower than the level's base speed
    pub const BOSS_SPEED_FACTOR: f32 = 0.7;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 20.0;
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
    /// Chance that a destroyed enemy drops a power-up
    pub const POWERUP_DROP_CHANCE: f64 = 0.2;
    /// Chance that a dropped power-up is a score bonus (else health)
    pub const POWERUP_SCORE_CHANCE: f64 = 0.7;

    /// Explosions
    pub const EXPLOSION_START_RADIUS: f32 = 5.0;
    pub const EXPLOSION_MAX_RADIUS: f32 = 30.0;
    pub const EXPLOSION_GROWTH: f32 = 2.0;
    pub const EXPLOSION_FADE: f32 = 0.05;

    /// Default gameplay tuning (overridable through `Settings`)
    pub const ENEMY_BULLET_DAMAGE: i32 = 20;
    pub const CONTACT_DAMAGE: i32 = ENEMY_BULLET_DAMAGE;
    pub const SCORE_BONUS: u64 = 250;
    pub const HEALTH_BONUS: i32 = 25;
}

/// RGBA colour, components in 0..=1
pub type Color = [f32; 4];

/// Build an opaque colour from a `0xRRGGBB` literal
#[inline]
pub const fn hex_color(rgb: u32) -> Color {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Playfield bounds (origin top-left, Y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: consts::CANVAS_WIDTH,
            height: consts::CANVAS_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True if the point lies outside any edge
    #[inline]
    pub fn is_outside(&self, p: Vec2) -> bool {
        p.x < 0.0 || p.x > self.width || p.y < 0.0 || p.y > self.height
    }

    /// Clamp a box's top-left corner so the whole box stays on screen
    #[inline]
    pub fn clamp_box(&self, pos: Vec2, size: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.min(self.width - size.x).max(0.0),
            pos.y.min(self.height - size.y).max(0.0),
        )
    }
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit heading vector for an angle in screen space
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
