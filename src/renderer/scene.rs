//! Full-frame composition: background, entities, HUD, banners

use glam::Vec2;

use super::shapes::Draw;
use super::{Renderer, Shape, TextAlign, TextStyle};
use crate::sim::{GamePhase, GameSession};
use crate::{Color, hex_color};

const HUD_COLOR: Color = hex_color(0xffffff);
const BANNER_COLOR: Color = hex_color(0x6ee7ff);
const HUD_MARGIN: f32 = 10.0;
const HUD_TEXT: TextStyle = TextStyle::new(18.0, HUD_COLOR, TextAlign::Left);
const PLAYER_BAR_SIZE: Vec2 = Vec2::new(120.0, 10.0);

/// Draw one frame of the session
pub fn draw_scene<R: Renderer + ?Sized>(session: &GameSession, renderer: &mut R) {
    let arena = session.arena;
    let center = Vec2::new(arena.width / 2.0, arena.height / 2.0);

    renderer.draw_shape(
        Shape::Rect {
            pos: Vec2::ZERO,
            size: Vec2::new(arena.width, arena.height),
        },
        session.config.background,
    );

    if session.phase == GamePhase::Idle {
        banner(renderer, center, "NOVA STRIKE", "Start a game to play");
        return;
    }

    for explosion in &session.explosions {
        explosion.draw(renderer);
    }
    for powerup in &session.powerups {
        powerup.draw(renderer);
    }
    for enemy in &session.enemies {
        enemy.draw(renderer);
    }
    for bullet in &session.bullets {
        bullet.draw(renderer);
    }
    if let Some(player) = &session.player {
        player.draw(renderer);
    }

    draw_hud(session, renderer);

    match session.phase {
        GamePhase::Paused => banner(renderer, center, "PAUSED", "Resume, restart or quit"),
        GamePhase::LevelComplete => {
            let title = format!("LEVEL {} COMPLETE", session.level);
            let detail = format!(
                "Score: {}  Time: {:.1}s",
                session.score,
                session.level_elapsed_ms() / 1000.0
            );
            banner(renderer, center, &title, &detail);
        }
        GamePhase::GameOver => {
            let detail = format!("Final score: {}", session.score);
            banner(renderer, center, "GAME OVER", &detail);
        }
        GamePhase::Idle | GamePhase::Playing => {}
    }
}

/// Score, lives and level along the top; ship health below them
fn draw_hud<R: Renderer + ?Sized>(session: &GameSession, renderer: &mut R) {
    let width = session.arena.width;
    let top = HUD_MARGIN + HUD_TEXT.size / 2.0;

    renderer.draw_text(
        &format!("Score: {}", session.score),
        Vec2::new(HUD_MARGIN, top),
        HUD_TEXT,
    );
    renderer.draw_text(
        &format!("Lives: {}", session.lives),
        Vec2::new(width / 2.0, top),
        TextStyle {
            align: TextAlign::Center,
            ..HUD_TEXT
        },
    );
    renderer.draw_text(
        &format!("Level: {}", session.level),
        Vec2::new(width - HUD_MARGIN, top),
        TextStyle {
            align: TextAlign::Right,
            ..HUD_TEXT
        },
    );

    if let Some(player) = &session.player {
        let bar_pos = Vec2::new(HUD_MARGIN, top + HUD_TEXT.size);
        renderer.draw_health_bar(bar_pos, PLAYER_BAR_SIZE, player.health_fraction());
    }
}

fn banner<R: Renderer + ?Sized>(renderer: &mut R, center: Vec2, title: &str, detail: &str) {
    renderer.draw_text(title, center, TextStyle::new(36.0, BANNER_COLOR, TextAlign::Center));
    renderer.draw_text(
        detail,
        center + Vec2::new(0.0, 40.0),
        TextStyle::new(18.0, HUD_COLOR, TextAlign::Center),
    );
}
