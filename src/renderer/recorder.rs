//! Recording renderer for tests and headless runs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{Renderer, Shape, TextStyle};
use crate::Color;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Shape { shape: Shape, color: Color },
    Text { text: String, pos: Vec2, style: TextStyle },
}

/// Renderer that keeps every call in order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Shape { .. } => None,
        })
    }

    /// True if any drawn text contains `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text.contains(needle))
    }

    pub fn shape_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Shape { .. }))
            .count()
    }

    /// Dump the frame as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Renderer for DrawList {
    fn draw_shape(&mut self, shape: Shape, color: Color) {
        self.commands.push(DrawCommand::Shape { shape, color });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{BAR_FILL, BAR_TRACK, TextAlign};

    #[test]
    fn test_health_bar_scales_fill() {
        let mut list = DrawList::new();
        list.draw_health_bar(Vec2::new(10.0, 20.0), Vec2::new(100.0, 8.0), 0.25);
        assert_eq!(
            list.commands,
            vec![
                DrawCommand::Shape {
                    shape: Shape::Rect {
                        pos: Vec2::new(10.0, 20.0),
                        size: Vec2::new(100.0, 8.0)
                    },
                    color: BAR_TRACK,
                },
                DrawCommand::Shape {
                    shape: Shape::Rect {
                        pos: Vec2::new(10.0, 20.0),
                        size: Vec2::new(25.0, 8.0)
                    },
                    color: BAR_FILL,
                },
            ]
        );
    }

    #[test]
    fn test_health_bar_clamps_fraction() {
        let mut list = DrawList::new();
        list.draw_health_bar(Vec2::ZERO, Vec2::new(50.0, 5.0), 1.5);
        list.draw_health_bar(Vec2::ZERO, Vec2::new(50.0, 5.0), -1.0);
        let widths: Vec<f32> = list
            .commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Shape {
                    shape: Shape::Rect { size, .. },
                    color,
                } if *color == BAR_FILL => Some(size.x),
                _ => None,
            })
            .collect();
        assert_eq!(widths, vec![50.0, 0.0]);
    }

    #[test]
    fn test_text_lookup() {
        let mut list = DrawList::new();
        let style = TextStyle::new(14.0, [1.0; 4], TextAlign::Center);
        list.draw_text("Score: 100", Vec2::ZERO, style);
        assert!(list.has_text("Score"));
        assert!(!list.has_text("Lives"));
        assert_eq!(list.shape_count(), 0);
        assert!(list.to_json().unwrap().contains("Score: 100"));
    }
}
