//! Shape generation for 2D primitives

use glam::Vec2;

use super::draw_list::DrawRect;
use super::vertex::{Palette, Vertex};

/// Two triangles covering an axis-aligned rectangle
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = pos + size;
    [
        Vertex::new(pos.x, pos.y, color),
        Vertex::new(max.x, pos.y, color),
        Vertex::new(pos.x, max.y, color),
        Vertex::new(pos.x, max.y, color),
        Vertex::new(max.x, pos.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Triangles for a whole draw list, in list order (later rects paint over earlier)
pub fn draw_list_vertices(list: &[DrawRect], palette: &Palette) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(list.len() * 6);
    for r in list {
        vertices.extend_from_slice(&rect(r.pos, r.size, palette.color(r.class)));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::EntityClass;

    #[test]
    fn test_rect_covers_corners() {
        let verts = rect(Vec2::new(10.0, 20.0), Vec2::new(4.0, 2.0), [1.0; 4]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 14.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 22.0);
    }

    #[test]
    fn test_colors_follow_class() {
        let list = [
            DrawRect {
                class: EntityClass::Player,
                pos: Vec2::ZERO,
                size: Vec2::ONE,
            },
            DrawRect {
                class: EntityClass::Enemy,
                pos: Vec2::ZERO,
                size: Vec2::ONE,
            },
        ];
        let verts = draw_list_vertices(&list, &Palette::CLASSIC);
        assert_eq!(verts.len(), 12);
        assert_eq!(verts[0].color, Palette::CLASSIC.player);
        assert_eq!(verts[11].color, Palette::CLASSIC.enemy);
    }
}
