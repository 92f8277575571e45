//! Procedural level generation
//!
//! One eager pass over the world in tile steps. The leading safe zone is
//! always solid and static; past it each slot may become a gap, but a gap
//! counter that resets on every placed tile caps runs at `max_gap`.

use glam::Vec2;
use rand::Rng;

use super::state::Platform;
use crate::tuning::Tuning;

/// Build the full platform strip, ordered by ascending x
pub fn generate_platforms(tuning: &Tuning, rng: &mut impl Rng) -> Vec<Platform> {
    let tile = tuning.tile_size as f32;
    let ground_y = tuning.ground_y();
    let mut platforms = Vec::with_capacity(tuning.tile_count() as usize);
    let mut gap_run = 0u32;

    for slot in 0..tuning.tile_count() {
        let safe = slot < tuning.safe_tiles;

        let make_gap = !safe && rng.random_bool(tuning.gap_chance);
        if make_gap && gap_run < tuning.max_gap {
            gap_run += 1;
            continue;
        }
        gap_run = 0;

        let moves = !safe && rng.random_bool(tuning.mover_chance);
        let dir = if rng.random_bool(0.5) { -1.0 } else { 1.0 };

        platforms.push(Platform {
            pos: Vec2::new((slot * tuning.tile_size) as f32, ground_y),
            size: Vec2::new(tile, tuning.platform_height),
            moves,
            dir,
        });
    }

    platforms
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn small_world(world_width: u32, safe_tiles: u32) -> Tuning {
        Tuning {
            world_width,
            safe_tiles,
            ..Tuning::default()
        }
    }

    /// Longest run of missing slots past the safe zone
    fn longest_gap(platforms: &[Platform], tuning: &Tuning) -> u32 {
        let tile = tuning.tile_size as f32;
        let mut expected = 0.0;
        let mut longest = 0;
        for p in platforms {
            let missing = ((p.pos.x - expected) / tile).round() as u32;
            longest = longest.max(missing);
            expected = p.pos.x + tile;
        }
        let tail = ((tuning.tile_count() as f32 * tile - expected) / tile).round() as u32;
        longest.max(tail)
    }

    #[test]
    fn test_safe_zone_only_world() {
        let tuning = small_world(400, 10);
        let mut rng = Pcg32::seed_from_u64(3);
        let platforms = generate_platforms(&tuning, &mut rng);

        assert_eq!(platforms.len(), 10);
        for (i, p) in platforms.iter().enumerate() {
            assert_eq!(p.pos.x, i as f32 * 40.0);
            assert_eq!(p.pos.y, 240.0);
            assert_eq!(p.size, Vec2::new(40.0, 30.0));
            assert!(!p.moves);
        }
    }

    #[test]
    fn test_partial_last_tile_is_generated() {
        // 999_999 is not a multiple of 40; the last slot still starts inside the world
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let platforms = generate_platforms(&tuning, &mut rng);
        assert!(platforms.last().unwrap().pos.x <= 999_960.0);
        assert!(platforms.len() <= 25_000);
    }

    #[test]
    fn test_always_gap_alternates_runs() {
        // With gaps certain, every third slot is forced solid
        let tuning = Tuning {
            gap_chance: 1.0,
            ..small_world(1200, 2)
        };
        let mut rng = Pcg32::seed_from_u64(5);
        let xs: Vec<f32> = generate_platforms(&tuning, &mut rng)
            .iter()
            .map(|p| p.pos.x)
            .collect();
        assert_eq!(
            xs,
            vec![0.0, 40.0, 160.0, 280.0, 400.0, 520.0, 640.0, 760.0, 880.0, 1000.0, 1120.0]
        );
    }

    #[test]
    fn test_generation_is_seeded() {
        let tuning = small_world(20_000, 10);
        let a = generate_platforms(&tuning, &mut Pcg32::seed_from_u64(99));
        let b = generate_platforms(&tuning, &mut Pcg32::seed_from_u64(99));
        let xa: Vec<_> = a.iter().map(|p| (p.pos.x, p.moves)).collect();
        let xb: Vec<_> = b.iter().map(|p| (p.pos.x, p.moves)).collect();
        assert_eq!(xa, xb);
    }

    proptest! {
        #[test]
        fn gaps_never_exceed_limit(seed in any::<u64>(), max_gap in 0u32..4) {
            let tuning = Tuning { max_gap, ..small_world(40_000, 10) };
            let platforms = generate_platforms(&tuning, &mut Pcg32::seed_from_u64(seed));
            prop_assert!(longest_gap(&platforms, &tuning) <= max_gap);
        }

        #[test]
        fn safe_zone_is_solid_and_static(seed in any::<u64>(), safe_tiles in 1u32..30) {
            let tuning = small_world(20_000, safe_tiles);
            let platforms = generate_platforms(&tuning, &mut Pcg32::seed_from_u64(seed));
            for (i, p) in platforms.iter().take(safe_tiles as usize).enumerate() {
                prop_assert_eq!(p.pos.x, i as f32 * 40.0);
                prop_assert!(!p.moves);
            }
        }

        #[test]
        fn platforms_ascend_and_stay_in_world(seed in any::<u64>()) {
            let tuning = small_world(20_000, 10);
            let platforms = generate_platforms(&tuning, &mut Pcg32::seed_from_u64(seed));
            for pair in platforms.windows(2) {
                prop_assert!(pair[0].pos.x < pair[1].pos.x);
            }
            for p in &platforms {
                prop_assert!(p.pos.x >= 0.0 && p.pos.x < 20_000.0);
                prop_assert!(p.dir == 1.0 || p.dir == -1.0);
            }
        }
    }
}
