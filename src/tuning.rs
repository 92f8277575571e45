//! Data-driven game balance
//!
//! Every gameplay constant lives here so a stored JSON override can reshape
//! the level without a rebuild. `Tuning::default()` is the shipped balance.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Errors from parsing or validating a tuning override
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("tuning JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gate and cadence for one enemy kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    /// Timer period (wall-clock milliseconds)
    pub period_ms: u32,
    /// The kind never spawns until score exceeds this
    pub min_score: u64,
    /// Probability of spawning on a tick once past `min_score`
    pub chance: f64,
}

impl SpawnRule {
    pub const fn new(period_ms: u32, min_score: u64, chance: f64) -> Self {
        Self {
            period_ms,
            min_score,
            chance,
        }
    }
}

/// Complete gameplay balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Width of one platform tile
    pub tile_size: u32,
    /// Horizontal extent of the level
    pub world_width: u32,
    /// Leading tiles that are always solid and static
    pub safe_tiles: u32,
    /// Longest run of consecutive missing tiles
    pub max_gap: u32,
    pub gap_chance: f64,
    pub mover_chance: f64,
    pub platform_height: f32,
    /// Height of the drawing surface; platforms sit on its bottom edge
    pub viewport_height: f32,

    // === Player ===
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_velocity: f32,
    pub move_speed: f32,
    /// How far below a platform top the player's feet may already be and still land
    pub landing_tolerance: f32,
    pub player_start_x: f32,
    pub player_size: f32,

    // === Enemies ===
    /// Distance outside world/viewport bounds before an enemy is dropped
    pub despawn_margin: f32,
    /// Enemies never spawn closer than this to the player's x
    pub spawn_exclusion: f32,
    /// Rejection-sampling bound for a spawn x
    pub spawn_attempts: u32,
    pub walker: SpawnRule,
    pub faller: SpawnRule,
    pub riser: SpawnRule,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tile_size: 40,
            world_width: 999_999,
            safe_tiles: 10,
            max_gap: 2,
            gap_chance: 0.18,
            mover_chance: 0.08,
            platform_height: 30.0,
            viewport_height: 270.0,

            gravity: 0.8,
            jump_velocity: -10.0,
            move_speed: 4.0,
            landing_tolerance: 10.0,
            player_start_x: 120.0,
            player_size: 18.0,

            despawn_margin: 60.0,
            spawn_exclusion: 250.0,
            spawn_attempts: 64,
            walker: SpawnRule::new(3200, 40, 0.5),
            faller: SpawnRule::new(2600, 70, 0.5),
            riser: SpawnRule::new(3000, 100, 0.45),
        }
    }
}

impl Tuning {
    /// LocalStorage key for a balance override
    pub const STORAGE_KEY: &'static str = "gap_runner_tuning";
    /// Upper bound on `world_width / tile_size`; the strip is generated eagerly
    pub const MAX_TILE_COUNT: u32 = 1 << 20;

    /// Parse and validate a JSON override (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the generator or spawner cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field, reason| Err(TuningError::Invalid { field, reason });

        if self.tile_size == 0 {
            return invalid("tile_size", "must be positive");
        }
        if self.world_width < self.tile_size {
            return invalid("world_width", "must hold at least one tile");
        }
        if self.tile_count() > Self::MAX_TILE_COUNT {
            return invalid("world_width", "too many tiles for one generation pass");
        }
        if !(0.0..=1.0).contains(&self.gap_chance) {
            return invalid("gap_chance", "must be within [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.mover_chance) {
            return invalid("mover_chance", "must be within [0, 1]");
        }
        if self.viewport_height <= 0.0 {
            return invalid("viewport_height", "must be positive");
        }
        if self.spawn_attempts == 0 {
            return invalid("spawn_attempts", "must be positive");
        }
        for (field, rule) in [
            ("walker", &self.walker),
            ("faller", &self.faller),
            ("riser", &self.riser),
        ] {
            if rule.period_ms == 0 {
                return invalid(field, "spawn period must be positive");
            }
            if !(0.0..=1.0).contains(&rule.chance) {
                return invalid(field, "spawn chance must be within [0, 1]");
            }
        }
        Ok(())
    }

    /// Stored override if present and valid, defaults otherwise
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring stored tuning override: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Number of tile slots across the world
    pub fn tile_count(&self) -> u32 {
        self.world_width.div_ceil(self.tile_size)
    }

    /// Top edge of the ground platforms
    pub fn ground_y(&self) -> f32 {
        self.viewport_height - self.platform_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.tile_count(), 25_000);
        assert_eq!(tuning.ground_y(), 240.0);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "world_width": 400, "gravity": 1.0 }"#).unwrap();
        assert_eq!(tuning.world_width, 400);
        assert_eq!(tuning.gravity, 1.0);
        assert_eq!(tuning.tile_size, 40);
        assert_eq!(tuning.walker, SpawnRule::new(3200, 40, 0.5));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let err = Tuning::from_json(r#"{ "tile_size": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "tile_size", .. }));

        let err = Tuning::from_json(r#"{ "riser": { "period_ms": 0, "min_score": 1, "chance": 0.5 } }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "riser", .. }));

        let err = Tuning::from_json(r#"{ "world_width": 4000000000, "tile_size": 1 }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "world_width", .. }));

        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_load_falls_back_on_malformed_override() {
        let mut store = MemoryStore::new();
        store.set(Tuning::STORAGE_KEY, "{ broken").unwrap();
        assert_eq!(Tuning::load(&store), Tuning::default());

        store.set(Tuning::STORAGE_KEY, r#"{ "safe_tiles": 3 }"#).unwrap();
        assert_eq!(Tuning::load(&store).safe_tiles, 3);
    }
}
