//! Input latching
//!
//! Host event handlers write into an `InputState` as events arrive; the
//! frame driver turns it into a `TickInput` per tick. Continuous inputs
//! (pointer, keyboard axis) persist, discrete triggers (fire, pause) are
//! consumed by the first tick of a frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Arena;
use crate::sim::TickInput;

/// Fraction of the canvas width, measured from the right, that acts as a
/// fire button for touch players
pub const FIRE_ZONE_FRACTION: f32 = 0.4;

/// Pointer (mouse or primary touch) state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    /// True while pressed and dragging
    pub active: bool,
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Pause,
}

impl Key {
    /// Map a DOM-style `KeyboardEvent.key` value
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            " " => Some(Key::Fire),
            "Escape" | "p" | "P" => Some(Key::Pause),
            _ => None,
        }
    }
}

/// Latched input between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub pointer: PointerState,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    /// Fire held down (space)
    fire_held: bool,
    /// One-shot fire request
    fire: bool,
    /// One-shot pause toggle
    pause: bool,
    /// Demo mode toggle
    pub autopilot: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer pressed at canvas coordinates. Presses inside the fire zone
    /// shoot instead of starting a drag.
    pub fn pointer_down(&mut self, x: f32, y: f32, arena: &Arena) {
        self.pointer = PointerState { active: true, x, y };
        // Presses on the right side also shoot
        if x >= arena.width * (1.0 - FIRE_ZONE_FRACTION) {
            self.fire = true;
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.pointer.active {
            self.pointer.x = x;
            self.pointer.y = y;
        }
    }

    pub fn pointer_up(&mut self) {
        self.pointer.active = false;
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Up => self.up = true,
            Key::Down => self.down = true,
            Key::Fire => {
                self.fire_held = true;
                self.fire = true;
            }
            Key::Pause => self.pause = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Up => self.up = false,
            Key::Down => self.down = false,
            Key::Fire => self.fire_held = false,
            Key::Pause => {}
        }
    }

    /// Request a pause toggle (menu button, lost focus)
    pub fn request_pause(&mut self) {
        self.pause = true;
    }

    /// Request a single shot
    pub fn request_fire(&mut self) {
        self.fire = true;
    }

    /// Keyboard steering axis
    pub fn axis(&self) -> Vec2 {
        let x = self.right as i32 - self.left as i32;
        let y = self.down as i32 - self.up as i32;
        Vec2::new(x as f32, y as f32)
    }

    /// Snapshot for the next tick
    pub fn to_tick_input(&self) -> TickInput {
        TickInput {
            pointer: self.pointer.active.then(|| self.pointer.position()),
            axis: self.axis(),
            fire: self.fire || self.fire_held,
            pause: self.pause,
            autopilot: self.autopilot,
        }
    }

    /// Clear one-shot inputs after processing
    pub fn consume_triggers(&mut self) {
        self.fire = false;
        self.pause = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_name("d"), Some(Key::Right));
        assert_eq!(Key::from_name(" "), Some(Key::Fire));
        assert_eq!(Key::from_name("Escape"), Some(Key::Pause));
        assert_eq!(Key::from_name("q"), None);
    }

    #[test]
    fn test_drag_follows_pointer() {
        let arena = Arena::default();
        let mut input = InputState::new();
        input.pointer_move(10.0, 10.0);
        assert_eq!(input.to_tick_input().pointer, None);

        input.pointer_down(100.0, 400.0, &arena);
        input.pointer_move(120.0, 420.0);
        assert_eq!(input.to_tick_input().pointer, Some(Vec2::new(120.0, 420.0)));

        input.pointer_up();
        assert_eq!(input.to_tick_input().pointer, None);
    }

    #[test]
    fn test_fire_zone_press_fires() {
        let arena = Arena::default();
        let mut input = InputState::new();
        input.pointer_down(arena.width * 0.8, 300.0, &arena);
        let tick = input.to_tick_input();
        assert!(tick.fire);
        assert_eq!(tick.pointer, Some(Vec2::new(arena.width * 0.8, 300.0)));

        // The press keeps steering after the shot is consumed
        input.consume_triggers();
        input.pointer_move(arena.width * 0.7, 320.0);
        let tick = input.to_tick_input();
        assert!(!tick.fire);
        assert_eq!(tick.pointer, Some(Vec2::new(arena.width * 0.7, 320.0)));
    }

    #[test]
    fn test_held_fire_survives_consume() {
        let mut input = InputState::new();
        input.key_down(Key::Fire);
        input.consume_triggers();
        assert!(input.to_tick_input().fire);
        input.key_up(Key::Fire);
        assert!(!input.to_tick_input().fire);
    }

    #[test]
    fn test_pause_is_one_shot() {
        let mut input = InputState::new();
        input.key_down(Key::Pause);
        assert!(input.to_tick_input().pause);
        input.consume_triggers();
        assert!(!input.to_tick_input().pause);
    }

    #[test]
    fn test_axis_cancels_opposites() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        assert_eq!(input.axis(), Vec2::new(-1.0, 0.0));
        input.key_down(Key::Right);
        assert_eq!(input.axis(), Vec2::ZERO);
        input.key_down(Key::Up);
        assert_eq!(input.axis(), Vec2::new(0.0, -1.0));
    }
}
