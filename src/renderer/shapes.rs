//! Per-entity draw routines

use glam::Vec2;

use super::{Renderer, Shape, TextAlign, TextStyle};
use crate::sim::{Bullet, Enemy, EnemyKind, Explosion, Player, PowerUp, PowerUpKind, Side};
use crate::{Color, hex_color};

const SHIP_COLOR: Color = hex_color(0x6ee7ff);
const ENGINE_COLOR: Color = hex_color(0xff9900);
const WHITE: Color = hex_color(0xffffff);
const BLACK: Color = hex_color(0x000000);
const BOSS_CORE_COLOR: Color = hex_color(0xff0000);
const PLAYER_BULLET_COLOR: Color = hex_color(0xffff00);
const ENEMY_BULLET_COLOR: Color = hex_color(0xff4444);

/// Boss health bar, centred above the hull
const BOSS_BAR_SIZE: Vec2 = Vec2::new(100.0, 8.0);
const BOSS_BAR_GAP: f32 = 15.0;

/// Something that can draw itself
pub trait Draw {
    fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R);
}

/// Diamond inscribed in a box
pub fn diamond(pos: Vec2, size: Vec2) -> Vec<Vec2> {
    let half = size / 2.0;
    vec![
        Vec2::new(pos.x + half.x, pos.y),
        Vec2::new(pos.x + size.x, pos.y + half.y),
        Vec2::new(pos.x + half.x, pos.y + size.y),
        Vec2::new(pos.x, pos.y + half.y),
    ]
}

/// Apex-up triangle inscribed in a box
pub fn triangle_up(pos: Vec2, size: Vec2) -> Vec<Vec2> {
    vec![
        Vec2::new(pos.x + size.x / 2.0, pos.y),
        Vec2::new(pos.x + size.x, pos.y + size.y),
        Vec2::new(pos.x, pos.y + size.y),
    ]
}

/// Explosion orange at the given opacity
pub fn flame(alpha: f32) -> Color {
    [1.0, 100.0 / 255.0, 0.0, alpha.clamp(0.0, 1.0)]
}

impl Draw for Player {
    fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw_shape(Shape::Polygon(diamond(self.pos, self.size)), SHIP_COLOR);

        // Engine glow
        renderer.draw_shape(
            Shape::Ellipse {
                center: Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y + 5.0),
                radii: Vec2::new(8.0, 15.0),
            },
            ENGINE_COLOR,
        );

        // Cockpit
        renderer.draw_shape(
            Shape::Circle {
                center: Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y / 3.0),
                radius: 6.0,
            },
            WHITE,
        );
    }
}

impl Draw for Enemy {
    fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let color = self.kind.color();
        match self.kind {
            EnemyKind::Boss => {
                let center = self.center();
                renderer.draw_shape(
                    Shape::Ellipse {
                        center,
                        radii: self.size / 2.0,
                    },
                    color,
                );
                renderer.draw_shape(Shape::Circle { center, radius: 15.0 }, BOSS_CORE_COLOR);

                let bar_pos = Vec2::new(center.x - BOSS_BAR_SIZE.x / 2.0, self.pos.y - BOSS_BAR_GAP);
                renderer.draw_health_bar(bar_pos, BOSS_BAR_SIZE, self.health_fraction());
            }
            EnemyKind::Basic | EnemyKind::Advanced => {
                renderer.draw_shape(Shape::Polygon(triangle_up(self.pos, self.size)), color);
                renderer.draw_shape(
                    Shape::Circle {
                        center: Vec2::new(
                            self.pos.x + self.size.x / 2.0,
                            self.pos.y + self.size.y / 3.0,
                        ),
                        radius: 4.0,
                    },
                    WHITE,
                );
            }
        }
    }
}

impl Draw for Bullet {
    fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let color = match self.side {
            Side::Player => PLAYER_BULLET_COLOR,
            Side::Enemy => ENEMY_BULLET_COLOR,
        };
        let bounds = self.bounds();
        renderer.draw_shape(
            Shape::Rect {
                pos: bounds.min,
                size: bounds.size(),
            },
            color,
        );
    }
}

impl Draw for PowerUp {
    fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let (color, label) = match self.kind {
            PowerUpKind::Score => (hex_color(0xffff00), "S"),
            PowerUpKind::Health => (hex_color(0x00ff00), "H"),
        };
        renderer.draw_shape(
            Shape::Circle {
                center: self.pos,
                radius: self.radius(),
            },
            color,
        );
        renderer.draw_text(label, self.pos, TextStyle::new(14.0, BLACK, TextAlign::Center));
    }
}

impl Draw for Explosion {
    fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw_shape(
            Shape::Circle {
                center: self.pos,
                radius: self.radius,
            },
            flame(self.alpha),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arena;
    use crate::renderer::{DrawCommand, DrawList};
    use crate::sim::level_config;

    #[test]
    fn test_player_draws_hull_engine_cockpit() {
        let player = Player::new(&Arena::default());
        let mut list = DrawList::new();
        player.draw(&mut list);
        assert_eq!(list.shape_count(), 3);
        match &list.commands[0] {
            DrawCommand::Shape {
                shape: Shape::Polygon(points),
                color,
            } => {
                assert_eq!(points.len(), 4);
                assert_eq!(points[0], player.nose());
                assert_eq!(*color, SHIP_COLOR);
            }
            other => panic!("unexpected first command {:?}", other),
        }
    }

    #[test]
    fn test_boss_draws_health_bar() {
        let config = level_config(5).unwrap();
        let mut boss = Enemy::new(config.enemy_kind, config, Vec2::new(100.0, 100.0), 1.0);
        boss.health = 10;
        let mut list = DrawList::new();
        boss.draw(&mut list);

        // Hull, core, bar track, bar fill
        assert_eq!(list.shape_count(), 4);
        match list.commands.last() {
            Some(DrawCommand::Shape {
                shape: Shape::Rect { pos, size },
                ..
            }) => {
                assert_eq!(size.x, BOSS_BAR_SIZE.x * 0.5);
                assert_eq!(pos.y, 100.0 - BOSS_BAR_GAP);
            }
            other => panic!("unexpected last command {:?}", other),
        }
    }

    #[test]
    fn test_small_enemy_is_triangle() {
        let config = level_config(1).unwrap();
        let enemy = Enemy::new(config.enemy_kind, config, Vec2::new(0.0, 0.0), 1.0);
        let mut list = DrawList::new();
        enemy.draw(&mut list);
        assert!(matches!(
            &list.commands[0],
            DrawCommand::Shape { shape: Shape::Polygon(points), .. } if points.len() == 3
        ));
    }

    #[test]
    fn test_powerup_label() {
        let mut list = DrawList::new();
        PowerUp::new(Vec2::new(50.0, 50.0), PowerUpKind::Health).draw(&mut list);
        PowerUp::new(Vec2::new(80.0, 50.0), PowerUpKind::Score).draw(&mut list);
        let labels: Vec<&str> = list.texts().collect();
        assert_eq!(labels, vec!["H", "S"]);
    }

    #[test]
    fn test_explosion_fades() {
        let mut explosion = Explosion::new(Vec2::new(10.0, 10.0));
        explosion.update();
        let mut list = DrawList::new();
        explosion.draw(&mut list);
        match &list.commands[0] {
            DrawCommand::Shape { color, .. } => assert!(color[3] < 1.0),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
