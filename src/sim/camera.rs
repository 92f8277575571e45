//! Horizontal follow camera

/// Left edge of the viewport in world units
///
/// Centers the player, clamped so the view never leaves the world. A world
/// narrower than the viewport pins the camera at zero.
#[inline]
pub fn camera_offset(player_x: f32, viewport_width: f32, world_width: f32) -> f32 {
    let max_offset = (world_width - viewport_width).max(0.0);
    (player_x - viewport_width / 2.0).clamp(0.0, max_offset)
}
