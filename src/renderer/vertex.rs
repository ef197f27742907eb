//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
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

/// 0xRRGGBB to linear-ish RGBA floats
pub const fn rgb(hex: u32) -> [f32; 4] {
    rgba(hex, 1.0)
}

pub const fn rgba(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
        alpha,
    ]
}

pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// HSL (hue in degrees, saturation and lightness 0-1) to RGBA
pub fn hsl(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m, alpha]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const SKY: [f32; 4] = rgb(0x87CEEB);
    pub const PLATFORM_EDGE: [f32; 4] = rgb(0x8B4513);
    pub const PLATFORM_FILL: [f32; 4] = rgb(0xA0522D);
    pub const MOVING_EDGE: [f32; 4] = rgb(0x4169E1);
    pub const MOVING_FILL: [f32; 4] = rgb(0x6495ED);
    pub const SPEED_BAR: [f32; 4] = rgb(0x0080FF);
    pub const JUMP_BAR: [f32; 4] = rgb(0x32CD32);
    pub const HEALTH_BACK: [f32; 4] = rgb(0xFF0000);
    pub const HEALTH_FILL: [f32; 4] = rgb(0x008000);
    pub const OUTLINE: [f32; 4] = rgb(0x000000);
    pub const HIT_FLASH: [f32; 4] = [1.0, 0.0, 0.0, 0.5];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(0xFF0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgba(0x0000FF, 0.5), [0.0, 0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_hsl_primaries() {
        let red = hsl(0.0, 1.0, 0.5, 1.0);
        assert!((red[0] - 1.0).abs() < 1e-6 && red[1].abs() < 1e-6 && red[2].abs() < 1e-6);
        let green = hsl(120.0, 1.0, 0.5, 1.0);
        assert!((green[1] - 1.0).abs() < 1e-6 && green[0].abs() < 1e-6);
        let wrapped = hsl(480.0, 1.0, 0.5, 1.0);
        assert_eq!(wrapped, green);
    }
}
