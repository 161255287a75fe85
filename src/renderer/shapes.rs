//! Shape generation for the viewport

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::screen::ScreenView;

/// Generate vertices for an axis-aligned filled rectangle (two triangles)
pub fn rect(center: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let min = center - size / 2.0;
    let max = center + size / 2.0;

    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// All viewport geometry for one frame, back to front
pub fn scene(view: &ScreenView) -> Vec<Vertex> {
    let viewport = Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    let mut vertices = Vec::with_capacity((view.sprites.len() + 2) * 6);

    vertices.extend(rect(viewport / 2.0, viewport, colors::BACKGROUND));
    for sprite in &view.sprites {
        vertices.extend(rect(sprite.center, sprite.size, sprite.color));
    }
    if view.game_over {
        vertices.extend(rect(viewport / 2.0, viewport, colors::GAME_OVER_SHADE));
    }

    vertices
}
