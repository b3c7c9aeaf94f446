//! Collision detection and interaction resolution
//!
//! One pass per tick, after every entity has updated and before anything is
//! purged. The resolver never removes entities itself: it marks them in
//! [`Removals`] and reports what happened as a list of [`Interaction`]s, which
//! the session applies once the whole pass is done.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Bullet, Enemy, HitOutcome, KillReport, Player, PowerUp, PowerUpKind, Side};
use crate::Settings;
use crate::consts::CONTACT_COOLDOWN_TICKS;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap; boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Circle overlap via the closest point on the box
    #[inline]
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        closest.distance_squared(center) < radius * radius
    }
}

/// Where player damage came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    EnemyBullet,
    Contact,
}

/// Something the session must apply after the pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    /// An enemy was destroyed
    Kill(KillReport),
    /// The ship lost health
    PlayerDamaged { amount: i32, source: DamageSource },
    /// The ship picked up a power-up
    PowerUpCollected(PowerUpKind),
}

/// Per-collection removal marks, indexed like the collections they shadow
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Removals {
    pub bullets: Vec<bool>,
    pub enemies: Vec<bool>,
    pub powerups: Vec<bool>,
}

impl Removals {
    /// Marks sized for the given collections, all clear
    pub fn for_sizes(bullets: usize, enemies: usize, powerups: usize) -> Self {
        Self {
            bullets: vec![false; bullets],
            enemies: vec![false; enemies],
            powerups: vec![false; powerups],
        }
    }
}

/// Drop every element whose mark is set
pub fn retain_unmarked<T>(items: &mut Vec<T>, marks: &[bool]) {
    debug_assert_eq!(items.len(), marks.len());
    let mut idx = 0;
    items.retain(|_| {
        let keep = !marks.get(idx).copied().unwrap_or(false);
        idx += 1;
        keep
    });
}

/// Resolve all pairings for this tick.
///
/// `removals` arrives pre-marked with entities that expired during update;
/// those take no part in collisions. Enemies already destroyed earlier in the
/// pass are skipped as well, so no entity resolves twice per pairing.
pub fn resolve_collisions(
    player: &mut Player,
    enemies: &mut [Enemy],
    bullets: &[Bullet],
    powerups: &[PowerUp],
    removals: &mut Removals,
    settings: &Settings,
) -> Vec<Interaction> {
    let mut interactions = Vec::new();
    let player_box = player.bounds();

    // --- Player bullets vs enemies ---
    for (b_idx, bullet) in bullets.iter().enumerate() {
        if removals.bullets[b_idx] || bullet.side != Side::Player {
            continue;
        }
        let bullet_box = bullet.bounds();
        let target = enemies
            .iter()
            .enumerate()
            .position(|(e_idx, enemy)| {
                !removals.enemies[e_idx] && !enemy.is_dead() && enemy.bounds().overlaps(&bullet_box)
            });
        if let Some(e_idx) = target {
            removals.bullets[b_idx] = true;
            if let HitOutcome::Killed(report) = enemies[e_idx].hit() {
                removals.enemies[e_idx] = true;
                interactions.push(Interaction::Kill(report));
            }
        }
    }

    // --- Enemy bullets vs player ---
    for (b_idx, bullet) in bullets.iter().enumerate() {
        if removals.bullets[b_idx] || bullet.side != Side::Enemy {
            continue;
        }
        if bullet.bounds().overlaps(&player_box) {
            removals.bullets[b_idx] = true;
            interactions.push(Interaction::PlayerDamaged {
                amount: settings.enemy_bullet_damage,
                source: DamageSource::EnemyBullet,
            });
        }
    }

    // --- Enemy bodies vs player (one ram per tick, then a cooldown) ---
    if player.contact_cooldown == 0 {
        let rammer = enemies.iter().enumerate().position(|(e_idx, enemy)| {
            !removals.enemies[e_idx] && !enemy.is_dead() && enemy.bounds().overlaps(&player_box)
        });
        if let Some(e_idx) = rammer {
            player.contact_cooldown = CONTACT_COOLDOWN_TICKS;
            interactions.push(Interaction::PlayerDamaged {
                amount: settings.contact_damage,
                source: DamageSource::Contact,
            });

            let enemy = &mut enemies[e_idx];
            // The boss shrugs off a ram as a single hit; anything smaller breaks up
            let outcome = if enemy.is_boss() { enemy.hit() } else { enemy.destroy() };
            if let HitOutcome::Killed(report) = outcome {
                removals.enemies[e_idx] = true;
                interactions.push(Interaction::Kill(report));
            }
        }
    }

    // --- Power-ups vs player ---
    for (p_idx, powerup) in powerups.iter().enumerate() {
        if removals.powerups[p_idx] {
            continue;
        }
        if player_box.intersects_circle(powerup.pos, powerup.radius()) {
            removals.powerups[p_idx] = true;
            interactions.push(Interaction::PowerUpCollected(powerup.kind));
        }
    }

    interactions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arena;
    use crate::sim::level::{EnemyKind, level_config};

    fn player_at(pos: Vec2) -> Player {
        let mut player = Player::new(&Arena::default());
        player.pos = pos;
        player
    }

    fn enemy_at(level: u8, pos: Vec2) -> Enemy {
        let config = level_config(level).unwrap();
        Enemy::new(config.enemy_kind, config, pos, 1.0)
    }

    fn resolve(
        player: &mut Player,
        enemies: &mut [Enemy],
        bullets: &[Bullet],
        powerups: &[PowerUp],
    ) -> (Vec<Interaction>, Removals) {
        let mut removals = Removals::for_sizes(bullets.len(), enemies.len(), powerups.len());
        let hits = resolve_collisions(
            player,
            enemies,
            bullets,
            powerups,
            &mut removals,
            &Settings::default(),
        );
        (hits, removals)
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_pos_size(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_pos_size(Vec2::splat(5.0), Vec2::splat(10.0));
        let c = Aabb::from_pos_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Touching edges only
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_circle_overlap() {
        let a = Aabb::from_pos_size(Vec2::ZERO, Vec2::splat(10.0));
        assert!(a.intersects_circle(Vec2::new(5.0, 5.0), 1.0));
        assert!(a.intersects_circle(Vec2::new(14.0, 5.0), 5.0));
        assert!(!a.intersects_circle(Vec2::new(20.0, 20.0), 5.0));
    }

    #[test]
    fn test_retain_unmarked() {
        let mut items = vec![1, 2, 3, 4];
        retain_unmarked(&mut items, &[false, true, false, true]);
        assert_eq!(items, vec![1, 3]);
    }

    #[test]
    fn test_player_bullet_kills_enemy() {
        let mut player = player_at(Vec2::new(0.0, 500.0));
        let mut enemies = vec![enemy_at(1, Vec2::new(100.0, 100.0))];
        let bullets = vec![Bullet::player(Vec2::new(110.0, 120.0))];

        let (hits, removals) = resolve(&mut player, &mut enemies, &bullets, &[]);
        assert_eq!(hits.len(), 1);
        assert!(matches!(hits[0], Interaction::Kill(r) if r.score == 100));
        assert_eq!(removals.bullets, vec![true]);
        assert_eq!(removals.enemies, vec![true]);
    }

    #[test]
    fn test_bullet_hits_only_one_enemy() {
        let mut player = player_at(Vec2::new(0.0, 500.0));
        // Two stacked enemies under the same bullet
        let mut enemies = vec![
            enemy_at(1, Vec2::new(100.0, 100.0)),
            enemy_at(1, Vec2::new(100.0, 100.0)),
        ];
        let bullets = vec![Bullet::player(Vec2::new(110.0, 120.0))];

        let (hits, removals) = resolve(&mut player, &mut enemies, &bullets, &[]);
        assert_eq!(hits.len(), 1);
        assert_eq!(removals.enemies, vec![true, false]);
        assert_eq!(enemies[1].health, 1);
    }

    #[test]
    fn test_dead_enemy_absorbs_no_second_bullet() {
        let mut player = player_at(Vec2::new(0.0, 500.0));
        let mut enemies = vec![enemy_at(1, Vec2::new(100.0, 100.0))];
        let bullets = vec![
            Bullet::player(Vec2::new(110.0, 120.0)),
            Bullet::player(Vec2::new(112.0, 118.0)),
        ];

        let (hits, removals) = resolve(&mut player, &mut enemies, &bullets, &[]);
        let kills = hits.iter().filter(|h| matches!(h, Interaction::Kill(_))).count();
        assert_eq!(kills, 1);
        // Second bullet flies on
        assert_eq!(removals.bullets, vec![true, false]);
    }

    #[test]
    fn test_expired_bullet_is_ignored() {
        let mut player = player_at(Vec2::new(0.0, 500.0));
        let mut enemies = vec![enemy_at(1, Vec2::new(100.0, 100.0))];
        let bullets = vec![Bullet::player(Vec2::new(110.0, 120.0))];
        let mut removals = Removals::for_sizes(1, 1, 0);
        removals.bullets[0] = true;

        let hits = resolve_collisions(
            &mut player,
            &mut enemies,
            &bullets,
            &[],
            &mut removals,
            &Settings::default(),
        );
        assert!(hits.is_empty());
        assert_eq!(enemies[0].health, 1);
    }

    #[test]
    fn test_enemy_bullet_damages_player() {
        let mut player = player_at(Vec2::new(100.0, 400.0));
        let bullets = vec![
            Bullet::enemy(Vec2::new(120.0, 420.0), std::f32::consts::FRAC_PI_2),
            // Player bullets never hurt the ship
            Bullet::player(Vec2::new(120.0, 420.0)),
        ];

        let (hits, removals) = resolve(&mut player, &mut [], &bullets, &[]);
        assert_eq!(
            hits,
            vec![Interaction::PlayerDamaged {
                amount: Settings::default().enemy_bullet_damage,
                source: DamageSource::EnemyBullet,
            }]
        );
        assert_eq!(removals.bullets, vec![true, false]);
    }

    #[test]
    fn test_contact_destroys_small_enemy_once() {
        let mut player = player_at(Vec2::new(100.0, 400.0));
        let mut enemies = vec![
            enemy_at(3, Vec2::new(110.0, 410.0)),
            enemy_at(3, Vec2::new(110.0, 420.0)),
        ];

        let (hits, removals) = resolve(&mut player, &mut enemies, &[], &[]);
        assert_eq!(hits.len(), 2);
        assert!(matches!(
            hits[0],
            Interaction::PlayerDamaged { source: DamageSource::Contact, .. }
        ));
        assert!(matches!(hits[1], Interaction::Kill(r) if r.kind == EnemyKind::Advanced));
        assert_eq!(removals.enemies, vec![true, false]);
        assert_eq!(player.contact_cooldown, CONTACT_COOLDOWN_TICKS);

        // Cooldown blocks the second enemy
        let (hits, _) = resolve(&mut player, &mut enemies[1..], &[], &[]);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_contact_with_boss_is_single_hit() {
        let mut player = player_at(Vec2::new(100.0, 400.0));
        let mut enemies = vec![enemy_at(5, Vec2::new(60.0, 380.0))];

        let (hits, removals) = resolve(&mut player, &mut enemies, &[], &[]);
        assert_eq!(hits.len(), 1);
        assert_eq!(removals.enemies, vec![false]);
        assert_eq!(enemies[0].health, enemies[0].max_health - 1);
    }

    #[test]
    fn test_powerup_pickup() {
        let mut player = player_at(Vec2::new(100.0, 400.0));
        let powerups = vec![
            PowerUp::new(Vec2::new(95.0, 430.0), PowerUpKind::Health),
            PowerUp::new(Vec2::new(300.0, 100.0), PowerUpKind::Score),
        ];

        let (hits, removals) = resolve(&mut player, &mut [], &[], &powerups);
        assert_eq!(hits, vec![Interaction::PowerUpCollected(PowerUpKind::Health)]);
        assert_eq!(removals.powerups, vec![true, false]);
    }
}
