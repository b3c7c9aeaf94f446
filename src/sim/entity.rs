//! Entity model: player ship, enemies, bullets, power-ups, explosions
//!
//! Every entity advances through its own `update`, which returns `true` once
//! the entity has expired and must be purged. Entities never reach back into
//! the session; anything that affects score or other collections is handed
//! back to the caller (spawned bullets, [`HitOutcome`]).

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::level::{EnemyKind, LevelConfig};
use crate::consts::*;
use crate::{Arena, heading, normalize_angle};

/// Which side fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Keyboard movement speed (px/tick)
    pub speed: f32,
    /// 0..=PLAYER_MAX_HEALTH
    pub health: i32,
    /// Sim-clock time of the last accepted shot
    pub last_shot_ms: Option<f64>,
    pub shoot_delay_ms: f64,
    /// Ticks left before another body contact can hurt the ship
    pub contact_cooldown: u32,
}

impl Player {
    /// Fresh ship, centred horizontally near the bottom edge
    pub fn new(arena: &Arena) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            pos: Vec2::new(
                arena.width / 2.0 - size.x / 2.0,
                arena.height - size.y - PLAYER_BOTTOM_MARGIN,
            ),
            size,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            last_shot_ms: None,
            shoot_delay_ms: SHOOT_DELAY_MS,
            contact_cooldown: 0,
        }
    }

    /// Follow the pointer while dragging, otherwise steer with the keyboard
    /// axis. Both routes end in the same on-screen clamp.
    pub fn update(&mut self, pointer: Option<Vec2>, axis: Vec2, arena: &Arena) {
        if let Some(target) = pointer {
            self.pos = target - self.size / 2.0;
        } else if axis != Vec2::ZERO {
            self.pos += axis.clamp_length_max(1.0) * self.speed;
        }
        self.pos = arena.clamp_box(self.pos, self.size);

        self.contact_cooldown = self.contact_cooldown.saturating_sub(1);
    }

    /// True if a shot at `now_ms` would pass the cooldown
    pub fn can_shoot(&self, now_ms: f64) -> bool {
        self.last_shot_ms
            .is_none_or(|last| now_ms - last > self.shoot_delay_ms)
    }

    /// Fire one bullet from the nose if the cooldown has elapsed
    pub fn shoot(&mut self, now_ms: f64) -> Option<Bullet> {
        if !self.can_shoot(now_ms) {
            return None;
        }
        self.last_shot_ms = Some(now_ms);
        Some(Bullet::player(self.nose()))
    }

    /// Centre of the top edge
    pub fn nose(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Subtract health, clamped at zero. Returns true if health is depleted.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health = (self.health - amount).max(0);
        self.health == 0
    }

    /// Restore health up to the maximum
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(PLAYER_MAX_HEALTH);
    }

    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / PLAYER_MAX_HEALTH as f32
    }
}

/// Everything the session needs to apply a kill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KillReport {
    pub kind: EnemyKind,
    pub center: Vec2,
    pub score: u64,
}

/// Result of damaging an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// Took damage, still flying
    Survived,
    /// This hit destroyed it
    Killed(KillReport),
    /// Was already destroyed; nothing happened
    AlreadyDown,
}

/// An enemy craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub kind: EnemyKind,
    /// Horizontal drift direction (±1)
    pub direction: f32,
}

impl Enemy {
    /// Build an enemy of `kind` tuned by the level config
    pub fn new(kind: EnemyKind, config: &LevelConfig, pos: Vec2, direction: f32) -> Self {
        let (w, h) = kind.size();
        let speed = match kind {
            EnemyKind::Boss => config.enemy_speed * BOSS_SPEED_FACTOR,
            _ => config.enemy_speed,
        };
        Self {
            pos,
            size: Vec2::new(w, h),
            speed,
            health: config.enemy_health,
            max_health: config.enemy_health,
            kind,
            direction,
        }
    }

    /// Descend, drift sideways and maybe fire. Returns true once below the
    /// bottom edge.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        arena: &Arena,
        fire_rate: f64,
        rng: &mut R,
        bullets: &mut Vec<Bullet>,
    ) -> bool {
        self.pos.y += self.speed;
        // Drift is a function of y, not time, so replays stay identical
        self.pos.x +=
            (self.pos.y * ENEMY_DRIFT_FREQ).sin() * self.direction * ENEMY_DRIFT_AMPLITUDE;

        if rng.random_bool(fire_rate.clamp(0.0, 1.0)) {
            self.shoot(bullets);
        }

        self.pos.y > arena.height
    }

    /// Fire from the base: one bullet straight down, or the boss's fan
    pub fn shoot(&self, bullets: &mut Vec<Bullet>) {
        let muzzle = self.muzzle();
        match self.kind {
            EnemyKind::Boss => {
                bullets.extend((0..BOSS_FAN_BULLETS).map(|i| {
                    let offset = i as f32 * 0.4 * PI - PI;
                    Bullet::enemy(muzzle, FRAC_PI_2 + offset)
                }));
            }
            _ => bullets.push(Bullet::enemy(muzzle, FRAC_PI_2)),
        }
    }

    /// Take one point of damage
    pub fn hit(&mut self) -> HitOutcome {
        if self.is_dead() {
            return HitOutcome::AlreadyDown;
        }
        self.health -= 1;
        if self.health <= 0 {
            self.health = 0;
            HitOutcome::Killed(self.kill_report())
        } else {
            HitOutcome::Survived
        }
    }

    /// Destroy outright regardless of remaining health (ramming)
    pub fn destroy(&mut self) -> HitOutcome {
        if self.is_dead() {
            return HitOutcome::AlreadyDown;
        }
        self.health = 0;
        HitOutcome::Killed(self.kill_report())
    }

    fn kill_report(&self) -> KillReport {
        KillReport {
            kind: self.kind,
            center: self.center(),
            score: self.kind.score_value(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn is_boss(&self) -> bool {
        self.kind == EnemyKind::Boss
    }

    /// Centre of the bottom edge, where bullets leave
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }
}

/// A projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Horizontal centre, top edge
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Travel direction in screen space (radians, -π/2 is straight up)
    pub angle: f32,
    pub side: Side,
}

impl Bullet {
    pub fn new(pos: Vec2, speed: f32, angle: f32, side: Side) -> Self {
        Self {
            pos,
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            speed,
            angle,
            side,
        }
    }

    /// Upward player shot
    pub fn player(pos: Vec2) -> Self {
        Self::new(pos, PLAYER_BULLET_SPEED, -FRAC_PI_2, Side::Player)
    }

    /// Enemy shot along `angle`
    pub fn enemy(pos: Vec2, angle: f32) -> Self {
        Self::new(pos, ENEMY_BULLET_SPEED, angle, Side::Enemy)
    }

    /// Displacement per tick
    pub fn velocity(&self) -> Vec2 {
        heading(self.angle) * self.speed * BULLET_SPEED_SCALE
    }

    /// Move one tick. Returns true once off any edge.
    pub fn update(&mut self, arena: &Arena) -> bool {
        self.pos += self.velocity();
        arena.is_outside(self.pos)
    }

    /// Angle relative to straight down, in [-π, π)
    pub fn offset_from_down(&self) -> f32 {
        normalize_angle(self.angle - FRAC_PI_2)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(
            Vec2::new(self.pos.x - self.size.x / 2.0, self.pos.y),
            self.size,
        )
    }
}

/// Power-up flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Score,
    Health,
}

impl PowerUpKind {
    /// 70% score, 30% health
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(POWERUP_SCORE_CHANCE) {
            PowerUpKind::Score
        } else {
            PowerUpKind::Health
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    /// Centre
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            size: POWERUP_SIZE,
            speed: POWERUP_FALL_SPEED,
            kind,
        }
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Fall one tick. Returns true once below the bottom edge.
    pub fn update(&mut self, arena: &Arena) -> bool {
        self.pos.y += self.speed;
        self.pos.y > arena.height
    }
}

/// Expanding, fading blast. Purely visual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    /// Centre
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: EXPLOSION_START_RADIUS,
            alpha: 1.0,
        }
    }

    /// Grow and fade one tick. Returns true once spent.
    pub fn update(&mut self) -> bool {
        self.radius += EXPLOSION_GROWTH;
        self.alpha -= EXPLOSION_FADE;
        self.alpha <= 0.0 || self.radius >= EXPLOSION_MAX_RADIUS
    }
}
