//! Game settings and gameplay tuning
//!
//! Loaded from an optional JSON file; any missing key falls back to the
//! compile-time default in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{Arena, SimError, SimResult};

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Determinism ===
    /// Seed for the session RNG (spawn positions, enemy fire, drops)
    pub seed: u64,

    // === Tuning ===
    /// Health lost per enemy bullet
    pub enemy_bullet_damage: i32,
    /// Health lost when an enemy rams the ship
    pub contact_damage: i32,
    /// Points granted by a score power-up
    pub score_bonus: u64,
    /// Health restored by a health power-up
    pub health_bonus: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            seed: 0x5eed_cafe,

            enemy_bullet_damage: ENEMY_BULLET_DAMAGE,
            contact_damage: CONTACT_DAMAGE,
            score_bonus: SCORE_BONUS,
            health_bonus: HEALTH_BONUS,
        }
    }
}

impl Settings {
    /// Default settings with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Playfield bounds for these settings
    pub fn arena(&self) -> Arena {
        Arena::new(self.canvas_width, self.canvas_height)
    }

    /// Parse settings from JSON (missing keys use defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {} - using default settings", path.display(), e);
                return Self::default();
            }
        };

        let settings = match Self::from_json(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Could not parse {}: {} - using default settings", path.display(), e);
                return Self::default();
            }
        };

        if let Err(e) = settings.validate() {
            log::warn!("Rejected {}: {} - using default settings", path.display(), e);
            return Self::default();
        }

        log::info!("Loaded settings from {}", path.display());
        settings
    }

    /// Check that the canvas fits the ship and tuning values are sane
    pub fn validate(&self) -> SimResult<()> {
        if self.canvas_width.is_nan() || self.canvas_width < PLAYER_WIDTH {
            return Err(SimError::InvalidSettings {
                field: "canvas_width",
                reason: format!("{} is narrower than the ship ({})", self.canvas_width, PLAYER_WIDTH),
            });
        }
        if self.canvas_height.is_nan() || self.canvas_height < PLAYER_HEIGHT + PLAYER_BOTTOM_MARGIN {
            return Err(SimError::InvalidSettings {
                field: "canvas_height",
                reason: format!(
                    "{} is shorter than the ship plus margin ({})",
                    self.canvas_height,
                    PLAYER_HEIGHT + PLAYER_BOTTOM_MARGIN
                ),
            });
        }
        for (field, value) in [
            ("enemy_bullet_damage", self.enemy_bullet_damage),
            ("contact_damage", self.contact_damage),
            ("health_bonus", self.health_bonus),
        ] {
            if value < 0 {
                return Err(SimError::InvalidSettings {
                    field,
                    reason: format!("{} is negative", value),
                });
            }
        }
        Ok(())
    }
}
