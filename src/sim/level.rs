//! Static level table
//!
//! Five hand-tuned levels; the last is a single boss.

use serde::{Deserialize, Serialize};

use crate::{Color, SimError, SimResult, hex_color};

/// Number of levels in the campaign
pub const LEVEL_COUNT: u8 = 5;

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Advanced,
    Boss,
}

impl EnemyKind {
    /// Points awarded for destroying one
    pub fn score_value(&self) -> u64 {
        match self {
            EnemyKind::Basic => 100,
            EnemyKind::Advanced => 150,
            EnemyKind::Boss => 1000,
        }
    }

    /// Width and height of the hull
    pub fn size(&self) -> (f32, f32) {
        match self {
            EnemyKind::Basic => (35.0, 35.0),
            EnemyKind::Advanced => (45.0, 45.0),
            EnemyKind::Boss => (120.0, 80.0),
        }
    }

    /// Body colour
    pub fn color(&self) -> Color {
        match self {
            EnemyKind::Basic => hex_color(0x44aaff),
            EnemyKind::Advanced => hex_color(0xffaa44),
            EnemyKind::Boss => hex_color(0xff4444),
        }
    }
}

/// Per-level tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub enemy_count: u32,
    pub enemy_speed: f32,
    /// Probability that an enemy fires on a given tick
    pub enemy_fire_rate: f64,
    pub enemy_health: i32,
    pub background: Color,
    pub enemy_kind: EnemyKind,
}

/// The campaign, in play order
pub static LEVELS: [LevelConfig; LEVEL_COUNT as usize] = [
    LevelConfig {
        enemy_count: 8,
        enemy_speed: 2.0,
        enemy_fire_rate: 0.005,
        enemy_health: 1,
        background: hex_color(0x0a0a1a),
        enemy_kind: EnemyKind::Basic,
    },
    LevelConfig {
        enemy_count: 12,
        enemy_speed: 2.5,
        enemy_fire_rate: 0.007,
        enemy_health: 1,
        background: hex_color(0x0a1a1a),
        enemy_kind: EnemyKind::Basic,
    },
    LevelConfig {
        enemy_count: 15,
        enemy_speed: 3.0,
        enemy_fire_rate: 0.01,
        enemy_health: 2,
        background: hex_color(0x1a0a1a),
        enemy_kind: EnemyKind::Advanced,
    },
    LevelConfig {
        enemy_count: 18,
        enemy_speed: 3.5,
        enemy_fire_rate: 0.012,
        enemy_health: 2,
        background: hex_color(0x1a1a0a),
        enemy_kind: EnemyKind::Advanced,
    },
    LevelConfig {
        enemy_count: 1,
        enemy_speed: 1.5,
        enemy_fire_rate: 0.02,
        enemy_health: 20,
        background: hex_color(0x2a0a1a),
        enemy_kind: EnemyKind::Boss,
    },
];

/// Look up a level by its 1-based number
pub fn level_config(level: u8) -> SimResult<&'static LevelConfig> {
    level
        .checked_sub(1)
        .and_then(|idx| LEVELS.get(idx as usize))
        .ok_or(SimError::LevelOutOfRange { level })
}

impl LevelConfig {
    /// True for the boss stage, which clears on the boss's death
    pub fn is_boss_level(&self) -> bool {
        self.enemy_kind == EnemyKind::Boss
    }
}
