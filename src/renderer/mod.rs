//! Rendering module
//!
//! The scene draws through the `Surface` trait in view (screen) pixels.
//! `VertexSurface` turns those calls into colored triangles for the WebGPU
//! pipeline; tests record them instead.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod sprites;
pub mod vertex;

use glam::Vec2;

pub use pipeline::RenderState;
pub use scene::Scene;
pub use sprites::{SpriteCache, SpriteKey};
pub use vertex::Vertex;

/// Anything the scene can paint onto
pub trait Surface {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: [f32; 4]);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]);
}

/// Accumulates triangles for one frame
#[derive(Debug, Default)]
pub struct VertexSurface {
    pub vertices: Vec<Vertex>,
}

impl VertexSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

impl Surface for VertexSurface {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: [f32; 4]) {
        if color[3] <= 0.0 || size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        self.vertices.extend_from_slice(&shapes::quad(pos, size, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        if color[3] <= 0.0 || radius <= 0.0 {
            return;
        }
        let segments = shapes::circle_segments(radius);
        self.vertices
            .extend(shapes::circle(center, radius, color, segments));
    }
}
