//! Vertex type for flat-colored 2D quads
//!
//! Shapes are built in viewport pixels and converted to NDC right before
//! upload, see `RenderState::render`.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// 2D vertex with position and RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::from(self.position)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for screen elements (entity colors live with their sprites)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const LETTERBOX: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
    pub const GAME_OVER_SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.35];
}
