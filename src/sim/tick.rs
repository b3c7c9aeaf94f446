//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. Each tick:
//! move the ship, move everything else, resolve collisions against the
//! post-move positions, apply the results, then sweep removals in one pass.

use glam::Vec2;

use super::collision::{Interaction, Removals, resolve_collisions, retain_unmarked};
use super::spawn::recycle;
use super::state::{GamePhase, GameSession};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Drag target for the ship's centre while the pointer is held
    pub pointer: Option<Vec2>,
    /// Keyboard steering axis (arrows/WASD), each component in -1..=1
    pub axis: Vec2,
    /// Fire request (space, or a press on the fire zone)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - the ship flies itself
    pub autopilot: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut GameSession, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        match session.phase {
            GamePhase::Playing => {
                session.phase = GamePhase::Paused;
                log::info!("Paused on level {}", session.level);
                return;
            }
            GamePhase::Paused => {
                session.phase = GamePhase::Playing;
                log::info!("Resumed level {}", session.level);
            }
            _ => {}
        }
    }

    if session.phase != GamePhase::Playing {
        return;
    }

    session.time_ticks += 1;
    session.clock_ms += SIM_DT_MS;
    let now = session.clock_ms;
    let arena = session.arena;
    let config = session.config;

    let input = if input.autopilot {
        autopilot(session)
    } else {
        input.clone()
    };

    // Player movement and fire
    let Some(player) = session.player.as_mut() else {
        return;
    };
    player.update(input.pointer, input.axis, &arena);
    if input.fire
        && let Some(bullet) = player.shoot(now)
    {
        session.bullets.push(bullet);
    }

    // Entity updates; each returns true once it has left play
    let mut expired_bullets: Vec<bool> = session
        .bullets
        .iter_mut()
        .map(|bullet| bullet.update(&arena))
        .collect();

    let mut fired = Vec::new();
    let escaped: Vec<bool> = session
        .enemies
        .iter_mut()
        .map(|enemy| enemy.update(&arena, config.enemy_fire_rate, &mut session.rng, &mut fired))
        .collect();
    // Fresh enemy fire starts moving next tick
    expired_bullets.resize(expired_bullets.len() + fired.len(), false);
    session.bullets.append(&mut fired);

    let expired_powerups: Vec<bool> = session
        .powerups
        .iter_mut()
        .map(|powerup| powerup.update(&arena))
        .collect();
    let faded: Vec<bool> = session
        .explosions
        .iter_mut()
        .map(|explosion| explosion.update())
        .collect();

    // Collisions; escaped enemies sit this pass out
    let mut removals = Removals {
        bullets: expired_bullets,
        enemies: escaped.clone(),
        powerups: expired_powerups,
    };
    let interactions = match session.player.as_mut() {
        Some(player) => resolve_collisions(
            player,
            &mut session.enemies,
            &session.bullets,
            &session.powerups,
            &mut removals,
            &session.settings,
        ),
        None => Vec::new(),
    };

    // Sweep removals
    retain_unmarked(&mut session.bullets, &removals.bullets);
    retain_unmarked(&mut session.powerups, &removals.powerups);
    retain_unmarked(&mut session.explosions, &faded);

    let enemies = std::mem::take(&mut session.enemies);
    session.enemies = enemies
        .into_iter()
        .zip(escaped)
        .zip(removals.enemies)
        .filter_map(|((enemy, escaped), removed)| {
            if escaped {
                log::debug!("{:?} slipped past, re-entering from the top", enemy.kind);
                Some(recycle(enemy, &arena, &mut session.rng))
            } else if removed {
                None
            } else {
                Some(enemy)
            }
        })
        .collect();

    // Apply results (spawns explosions and drops after the sweep).
    // Nothing further counts once the last life is gone.
    for interaction in interactions {
        if session.phase != GamePhase::Playing {
            break;
        }
        match interaction {
            Interaction::Kill(report) => session.apply_kill(report),
            Interaction::PlayerDamaged { amount, source } => {
                log::trace!("Ship hit by {:?} for {}", source, amount);
                session.damage_player(amount);
            }
            Interaction::PowerUpCollected(kind) => {
                log::debug!("Collected {:?} power-up", kind);
                session.collect_powerup(kind);
            }
        }
    }

    if session.phase == GamePhase::Playing && session.level_cleared() {
        session.complete_level();
    }
}

/// Simple pilot for demo and headless runs: line up under the lowest
/// enemy and keep firing, detouring for health when it runs low.
pub fn autopilot(session: &GameSession) -> TickInput {
    let Some(player) = session.player.as_ref() else {
        return TickInput::default();
    };
    let ship = player.center();

    let wants_health = player.health_fraction() < 0.6;
    let health_drop = session
        .powerups
        .iter()
        .filter(|p| wants_health && p.kind == super::entity::PowerUpKind::Health)
        .map(|p| p.pos)
        .min_by(|a, b| a.distance_squared(ship).total_cmp(&b.distance_squared(ship)));

    let lowest_enemy = session
        .enemies
        .iter()
        .filter(|e| !e.is_dead())
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|e| e.center());

    let target_x = health_drop.or(lowest_enemy).map_or(ship.x, |p| p.x);

    TickInput {
        pointer: Some(Vec2::new(target_x, ship.y)),
        fire: true,
        ..Default::default()
    }
}
