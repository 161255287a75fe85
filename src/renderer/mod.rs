//! WebGPU rendering module
//!
//! Draws the viewport as flat colored quads, one per entity.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
