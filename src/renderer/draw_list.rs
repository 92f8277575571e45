//! Viewport-space rectangles for one frame

use glam::Vec2;

use crate::sim::GameState;

/// What a rectangle represents (picks its color)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityClass {
    Player,
    Platform,
    Enemy,
}

/// A colored rectangle in viewport pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub class: EntityClass,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Everything visible this frame: player, then platforms, then enemies
///
/// Entities entirely outside the horizontal view are culled; positions are
/// shifted left by `camera_x`.
pub fn build_draw_list(state: &GameState, camera_x: f32, viewport_width: f32) -> Vec<DrawRect> {
    let visible = |pos: Vec2, size: Vec2| pos.x + size.x > camera_x && pos.x < camera_x + viewport_width;
    let shift = Vec2::new(camera_x, 0.0);

    let player = &state.player;
    let mut list = vec![DrawRect {
        class: EntityClass::Player,
        pos: player.pos - shift,
        size: player.size,
    }];

    list.extend(
        state
            .platforms
            .iter()
            .filter(|p| visible(p.pos, p.size))
            .map(|p| DrawRect {
                class: EntityClass::Platform,
                pos: p.pos - shift,
                size: p.size,
            }),
    );

    list.extend(
        state
            .enemies
            .iter()
            .filter(|e| visible(e.pos, e.size))
            .map(|e| DrawRect {
                class: EntityClass::Enemy,
                pos: e.pos - shift,
                size: e.size,
            }),
    );

    list
}
