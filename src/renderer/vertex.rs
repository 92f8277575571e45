//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use super::draw_list::EntityClass;

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

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    pub player: [f32; 4],
    pub platform: [f32; 4],
    pub enemy: [f32; 4],
}

impl Palette {
    pub const CLASSIC: Palette = Palette {
        background: [0.02, 0.02, 0.05, 1.0],
        player: [0.0, 1.0, 0.0, 1.0],   // #0f0
        platform: [0.4, 0.4, 0.4, 1.0], // #666
        enemy: [1.0, 0.0, 0.0, 1.0],
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        background: [0.0, 0.0, 0.0, 1.0],
        player: [0.3, 1.0, 1.0, 1.0],
        platform: [0.9, 0.9, 0.9, 1.0],
        enemy: [1.0, 0.85, 0.0, 1.0],
    };

    pub fn color(&self, class: EntityClass) -> [f32; 4] {
        match class {
            EntityClass::Player => self.player,
            EntityClass::Platform => self.platform,
            EntityClass::Enemy => self.enemy,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::CLASSIC
    }
}
