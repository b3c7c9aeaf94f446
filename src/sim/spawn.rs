//! Enemy roster generation

use glam::Vec2;
use rand::Rng;

use super::entity::Enemy;
use super::level::{EnemyKind, LevelConfig};
use crate::Arena;

/// Random entry point just above the top edge, plus a drift direction
fn entry_point<R: Rng + ?Sized>(kind: EnemyKind, arena: &Arena, rng: &mut R) -> (Vec2, f32) {
    let (w, h) = kind.size();
    let x = rng.random::<f32>() * (arena.width - w).max(0.0);
    let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    (Vec2::new(x, -h), direction)
}

/// Build the full enemy roster for a level
pub fn spawn_level<R: Rng + ?Sized>(config: &LevelConfig, arena: &Arena, rng: &mut R) -> Vec<Enemy> {
    (0..config.enemy_count)
        .map(|_| {
            let (pos, direction) = entry_point(config.enemy_kind, arena, rng);
            Enemy::new(config.enemy_kind, config, pos, direction)
        })
        .collect()
}

/// Send an enemy that slipped past the bottom edge back in from the top.
/// Remaining health carries over.
pub fn recycle<R: Rng + ?Sized>(mut enemy: Enemy, arena: &Arena, rng: &mut R) -> Enemy {
    let (pos, direction) = entry_point(enemy.kind, arena, rng);
    enemy.pos = pos;
    enemy.direction = direction;
    enemy
}
