//! Per-frame simulation step
//!
//! Core game loop that advances the simulation by exactly one display frame.

use super::collision::lands_on;
use super::state::{GameOverCause, GameState};

/// Input commands for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Jump requested since the last frame (rising edge, consumed by this frame)
    pub jump: bool,
}

/// Advance the game state by one frame
///
/// A no-op once the game is over. Otherwise: jump, horizontal input,
/// gravity, platform motion and landing, enemy motion and contact, enemy
/// despawn, fall check, score.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_game_over() {
        return;
    }

    let tuning = state.tuning;
    let world_width = tuning.world_width as f32;
    let player = &mut state.player;

    // Jumps only start from the ground; an airborne request is dropped
    if input.jump && player.on_ground {
        player.vy = tuning.jump_velocity;
        player.on_ground = false;
    }

    if input.left {
        player.pos.x -= tuning.move_speed;
    }
    if input.right {
        player.pos.x += tuning.move_speed;
    }

    player.vy += tuning.gravity;
    player.pos.y += player.vy;
    player.on_ground = false;

    // Generation order; the last platform landed on wins
    for platform in &mut state.platforms {
        platform.advance(world_width);

        if lands_on(
            &player.aabb(),
            player.vy,
            &platform.aabb(),
            tuning.landing_tolerance,
        ) {
            player.land_on(platform);
        }
    }

    let body = player.aabb();
    let mut hit = false;
    for enemy in &mut state.enemies {
        enemy.advance();
        if !hit && body.overlaps(&enemy.aabb()) {
            hit = true;
        }
    }
    if hit {
        state.end_game(GameOverCause::EnemyCollision);
    }

    state.enemies.retain(|e| {
        e.in_bounds(world_width, tuning.viewport_height, tuning.despawn_margin)
    });

    if state.player.pos.y > tuning.viewport_height {
        state.end_game(GameOverCause::Fell);
    }

    // The frame that ends the run isn't counted
    if !state.is_game_over() {
        state.score += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, EnemyKind, GameEvent, GamePhase, Platform};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    /// A level that is solid ground everywhere
    fn flat_state() -> GameState {
        let tuning = Tuning {
            world_width: 4000,
            safe_tiles: 100,
            ..Tuning::default()
        };
        GameState::new(12345, tuning)
    }

    fn right() -> TickInput {
        TickInput {
            right: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_standing_player_stays_put() {
        let mut state = flat_state();
        let start = state.player.pos;
        for _ in 0..240 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.player.pos, start);
            assert_eq!(state.player.vy, 0.0);
            assert!(state.player.on_ground);
        }
        assert_eq!(state.score, 240);
    }

    #[test]
    fn test_left_and_right_cancel() {
        let mut state = flat_state();
        let x = state.player.pos.x;
        let both = TickInput {
            left: true,
            right: true,
            jump: false,
        };
        tick(&mut state, &both);
        assert_eq!(state.player.pos.x, x);

        tick(&mut state, &right());
        assert_eq!(state.player.pos.x, x + 4.0);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut state = flat_state();
        let ground = state.player.pos.y;
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };

        tick(&mut state, &jump);
        assert!(!state.player.on_ground);
        assert_eq!(state.player.vy, -10.0 + 0.8);
        assert!(state.player.pos.y < ground);

        // Airborne jump requests are ignored
        let vy = state.player.vy;
        tick(&mut state, &jump);
        assert!((state.player.vy - (vy + 0.8)).abs() < 1e-5);

        let mut frames = 0;
        while !state.player.on_ground {
            tick(&mut state, &TickInput::default());
            frames += 1;
            assert!(frames < 60, "player never landed");
        }
        assert_eq!(state.player.pos.y, ground);
        assert_eq!(state.player.vy, 0.0);
    }

    #[test]
    fn test_walking_into_pit_ends_game() {
        let mut state = flat_state();
        // Remove the ground ahead of the player
        state.platforms.retain(|p| p.pos.x < 160.0 || p.pos.x >= 400.0);

        let mut frames = 0;
        while !state.is_game_over() {
            tick(&mut state, &right());
            frames += 1;
            assert!(frames < 200, "player never fell");
        }
        assert!(state.player.pos.y > state.tuning.viewport_height);
        let events = state.drain_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::GameOver {
                cause: GameOverCause::Fell,
                ..
            }]
        ));
    }

    #[test]
    fn test_enemy_contact_ends_game() {
        let mut state = flat_state();
        state.score = 77;
        let mut enemy = Enemy::new(EnemyKind::Faller, 0.0, 270.0, false);
        enemy.pos = state.player.pos;
        enemy.vel = Vec2::ZERO;
        state.enemies.push(enemy);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 77);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver {
                cause: GameOverCause::EnemyCollision,
                score: 77
            }]
        );
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = flat_state();
        state.end_game(GameOverCause::Fell);
        state
            .enemies
            .push(Enemy::new(EnemyKind::Walker, 900.0, 270.0, false));
        let before = (state.player.pos, state.score, state.enemies[0].pos);

        for _ in 0..10 {
            tick(&mut state, &right());
        }
        assert_eq!(before, (state.player.pos, state.score, state.enemies[0].pos));
    }

    #[test]
    fn test_enemies_move_and_despawn() {
        let mut state = flat_state();
        state
            .enemies
            .push(Enemy::new(EnemyKind::Walker, 2000.0, 270.0, true));
        state
            .enemies
            .push(Enemy::new(EnemyKind::Faller, 3000.0, 270.0, false));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies[0].pos.x, 2000.0 - 1.2);
        assert_eq!(state.enemies[1].pos.y, -17.0);

        // Faller leaves the bottom margin (270 + 60) after ~117 frames
        for _ in 0..120 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].kind, EnemyKind::Walker);
    }

    #[test]
    fn test_walkers_despawn_past_horizontal_margin() {
        let mut state = flat_state();
        let world = state.tuning.world_width as f32;
        // Just inside the 60-unit margin on each side, heading outward
        state
            .enemies
            .push(Enemy::new(EnemyKind::Walker, -58.5, 270.0, true));
        state
            .enemies
            .push(Enemy::new(EnemyKind::Walker, world + 58.5, 270.0, false));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies.len(), 2);
        assert!(state.enemies[0].pos.x > -60.0);
        assert!(state.enemies[1].pos.x < world + 60.0);

        tick(&mut state, &TickInput::default());
        assert!(state.enemies.is_empty());
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_movers_advance_each_frame() {
        let mut state = flat_state();
        state.platforms.push(Platform {
            pos: Vec2::new(3000.0, 240.0),
            size: Vec2::new(40.0, 30.0),
            moves: true,
            dir: -1.0,
        });
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.platforms.last().unwrap().pos.x, 2995.0);
    }

    proptest! {
        #[test]
        fn score_counts_frames_until_game_over(
            seed in any::<u64>(),
            moves in proptest::collection::vec(0u8..8, 1..400)
        ) {
            let mut state = GameState::new(seed, Tuning { world_width: 8000, ..Tuning::default() });
            for m in moves {
                let input = TickInput { left: m & 1 != 0, right: m & 2 != 0, jump: m & 4 != 0 };
                let was_over = state.is_game_over();
                let before = state.score;
                tick(&mut state, &input);
                if was_over || state.is_game_over() {
                    prop_assert_eq!(state.score, before);
                } else {
                    prop_assert_eq!(state.score, before + 1);
                }
            }
        }

        #[test]
        fn grounded_player_rests_on_a_platform_top(
            seed in any::<u64>(),
            moves in proptest::collection::vec(0u8..8, 1..200)
        ) {
            let mut state = GameState::new(seed, Tuning { world_width: 8000, ..Tuning::default() });
            for m in moves {
                let input = TickInput { left: m & 1 != 0, right: m & 2 != 0, jump: m & 4 != 0 };
                tick(&mut state, &input);
                if state.player.on_ground {
                    prop_assert_eq!(state.player.bottom(), state.tuning.ground_y());
                    prop_assert_eq!(state.player.vy, 0.0);
                }
            }
        }
    }
}
