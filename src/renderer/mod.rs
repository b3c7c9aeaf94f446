//! Rendering contract
//!
//! The simulation never touches a drawing API directly. Hosts implement
//! `Renderer` over their backend (canvas 2D, wgpu, terminal); entities and
//! the HUD describe themselves through it.

pub mod recorder;
pub mod scene;
pub mod shapes;

pub use recorder::{DrawCommand, DrawList};
pub use scene::draw_scene;
pub use shapes::Draw;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{Color, hex_color};

/// Health bar track colour
pub const BAR_TRACK: Color = hex_color(0x333333);
/// Health bar fill colour
pub const BAR_FILL: Color = hex_color(0x00ff00);

/// Filled primitives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned rectangle from its top-left corner
    Rect { pos: Vec2, size: Vec2 },
    /// Closed convex polygon
    Polygon(Vec<Vec2>),
    Circle { center: Vec2, radius: f32 },
    Ellipse { center: Vec2, radii: Vec2 },
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text appearance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn new(size: f32, color: Color, align: TextAlign) -> Self {
        Self { size, color, align }
    }
}

/// Drawing backend
pub trait Renderer {
    /// Fill a shape
    fn draw_shape(&mut self, shape: Shape, color: Color);

    /// Draw a line of text anchored at `pos` (vertically centred)
    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle);

    /// Track plus a fill proportional to `fraction` (clamped to 0..=1)
    fn draw_health_bar(&mut self, pos: Vec2, size: Vec2, fraction: f32) {
        self.draw_shape(Shape::Rect { pos, size }, BAR_TRACK);
        let fill = Vec2::new(size.x * fraction.clamp(0.0, 1.0), size.y);
        self.draw_shape(Shape::Rect { pos, size: fill }, BAR_FILL);
    }
}
