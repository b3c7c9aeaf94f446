//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (owned by the session)
//! - Stable iteration order (insertion order of each entity collection)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod level;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, DamageSource, Interaction, Removals, resolve_collisions};
pub use entity::{Bullet, Enemy, Explosion, HitOutcome, KillReport, Player, PowerUp, PowerUpKind, Side};
pub use level::{EnemyKind, LEVEL_COUNT, LEVELS, LevelConfig, level_config};
pub use state::{Action, GameEvent, GamePhase, GameSession, SessionSummary};
pub use tick::{TickInput, autopilot, tick};
