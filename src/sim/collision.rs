//! Collision detection for axis-aligned rectangles
//!
//! Everything in the level is an upright box, so two tests cover the game:
//! strict rectangle overlap (player vs enemy) and a one-way landing test
//! (player feet vs platform top).

use glam::Vec2;

/// Axis-aligned box from its top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Horizontal extents overlap (touching edges don't count)
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max().x && self.max().x > other.min.x
    }

    /// Rectangles share interior area
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.min.y < other.max().y && self.max().y > other.min.y
    }
}

/// Whether a falling body lands on a platform top this frame
///
/// `body` is the body after this frame's vertical motion and `vy` its
/// velocity. The feet may have sunk at most `tolerance` below the top, and
/// continuing at `vy` must carry them to or past it, so bodies moving up
/// through a platform pass freely.
pub fn lands_on(body: &Aabb, vy: f32, platform: &Aabb, tolerance: f32) -> bool {
    let feet = body.max().y;
    let top = platform.min.y;
    body.overlaps_x(platform) && feet <= top + tolerance && feet + vy >= top
}
