//! Demo-mode controller
//!
//! Runs right forever and hops over pits and approaching enemies. It only
//! produces input for `tick`; it never edits state.

use super::collision::Aabb;
use super::state::GameState;
use super::tick::TickInput;
use glam::Vec2;

/// How far past the leading edge the autopilot checks for ground
const GROUND_LOOKAHEAD: f32 = 12.0;
/// Horizontal window ahead of the player that counts as "closing in"
const THREAT_WINDOW: f32 = 70.0;

/// Input the autopilot would press this frame
pub fn autopilot_input(state: &GameState) -> TickInput {
    let player = &state.player;
    let mut input = TickInput {
        right: true,
        ..Default::default()
    };
    if !player.on_ground {
        return input;
    }

    // A one-unit probe just below the feet, a little ahead of the leading edge
    let probe = Aabb::new(
        Vec2::new(player.pos.x + player.size.x + GROUND_LOOKAHEAD, player.bottom()),
        Vec2::ONE,
    );
    let ground_ahead = state.platforms.iter().any(|p| probe.overlaps(&p.aabb()));

    // Anything at body height in the window ahead
    let threat = Aabb::new(
        player.pos,
        Vec2::new(player.size.x + THREAT_WINDOW, player.size.y),
    );
    let enemy_ahead = state.enemies.iter().any(|e| threat.overlaps(&e.aabb()));

    input.jump = !ground_ahead || enemy_ahead;
    input
}
