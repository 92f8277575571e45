//! Enemy spawning
//!
//! Each enemy kind has its own producer with its own RNG and timer period.
//! Producers post finished enemies into a single-consumer queue that the
//! frame loop drains before stepping, so they never touch `GameState`
//! directly and can run on browser timers or other threads.

use std::sync::mpsc::{self, Receiver, Sender};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Enemy, EnemyKind, GameState};
use crate::consts::SPAWN_X_INSET;
use crate::tuning::{SpawnRule, Tuning};

/// What a producer is allowed to see of the running game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnContext {
    pub score: u64,
    pub player_x: f32,
    pub game_over: bool,
}

impl SpawnContext {
    pub fn of(state: &GameState) -> Self {
        Self {
            score: state.score,
            player_x: state.player.pos.x,
            game_over: state.is_game_over(),
        }
    }
}

/// Create the enemy queue: clone the sender for each producer
pub fn spawn_queue() -> (Sender<Enemy>, SpawnQueue) {
    let (tx, rx) = mpsc::channel();
    (tx, SpawnQueue { rx })
}

/// Consumer end of the enemy queue
pub struct SpawnQueue {
    rx: Receiver<Enemy>,
}

impl SpawnQueue {
    /// Everything posted since the last drain, in posting order
    pub fn drain(&self) -> impl Iterator<Item = Enemy> + '_ {
        self.rx.try_iter()
    }
}

/// Draw a spawn x away from the player
///
/// Rejection sampling over [0, world_width - inset). The exclusion zone is
/// tiny next to the world so a draw almost always lands first try; the
/// attempt bound only matters for worlds not much wider than the zone.
pub fn spawn_x(
    rng: &mut impl Rng,
    world_width: f32,
    player_x: f32,
    exclusion: f32,
    attempts: u32,
) -> Option<f32> {
    let span = (world_width - SPAWN_X_INSET).max(1.0);
    (0..attempts)
        .map(|_| rng.random::<f32>() * span)
        .find(|x| (x - player_x).abs() >= exclusion)
}

/// Timer-driven source of one enemy kind
pub struct SpawnProducer {
    kind: EnemyKind,
    rule: SpawnRule,
    rng: Pcg32,
    tx: Sender<Enemy>,
    world_width: f32,
    viewport_height: f32,
    exclusion: f32,
    attempts: u32,
}

impl SpawnProducer {
    pub fn new(kind: EnemyKind, tuning: &Tuning, seed: u64, tx: Sender<Enemy>) -> Self {
        let rule = match kind {
            EnemyKind::Walker => tuning.walker,
            EnemyKind::Faller => tuning.faller,
            EnemyKind::Riser => tuning.riser,
        };
        Self {
            kind,
            rule,
            rng: Pcg32::seed_from_u64(seed),
            tx,
            world_width: tuning.world_width as f32,
            viewport_height: tuning.viewport_height,
            exclusion: tuning.spawn_exclusion,
            attempts: tuning.spawn_attempts,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn period_ms(&self) -> u32 {
        self.rule.period_ms
    }

    /// One timer tick: gate on score and chance, then post an enemy
    ///
    /// Returns true if an enemy was queued.
    pub fn fire(&mut self, ctx: &SpawnContext) -> bool {
        if ctx.game_over || ctx.score <= self.rule.min_score {
            return false;
        }
        if !self.rng.random_bool(self.rule.chance) {
            return false;
        }

        let Some(x) = spawn_x(
            &mut self.rng,
            self.world_width,
            ctx.player_x,
            self.exclusion,
            self.attempts,
        ) else {
            log::debug!(
                "No {} spawn: {} draws all landed near the player",
                self.kind.as_str(),
                self.attempts
            );
            return false;
        };

        let leftward = self.kind == EnemyKind::Walker && self.rng.random_bool(0.5);
        let enemy = Enemy::new(self.kind, x, self.viewport_height, leftward);
        log::debug!("Spawned {} at x={:.0}", self.kind.as_str(), x);
        self.tx.send(enemy).is_ok()
    }
}

/// The three producers plus their wall-clock timers
pub struct Spawner {
    producers: Vec<SpawnProducer>,
    /// Next due time per producer; unset until the first poll
    next_due_ms: Vec<Option<f64>>,
}

impl Spawner {
    pub fn new(tuning: &Tuning, seed: u64, tx: Sender<Enemy>) -> Self {
        let producers: Vec<_> = EnemyKind::ALL
            .iter()
            .enumerate()
            .map(|(i, &kind)| {
                let stream = (i as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
                SpawnProducer::new(kind, tuning, seed ^ stream, tx.clone())
            })
            .collect();
        let next_due_ms = vec![None; producers.len()];
        Self {
            producers,
            next_due_ms,
        }
    }

    /// Fire one kind's timer now (browser `setInterval` path)
    pub fn fire(&mut self, kind: EnemyKind, ctx: &SpawnContext) -> bool {
        self.producers
            .iter_mut()
            .find(|p| p.kind() == kind)
            .is_some_and(|p| p.fire(ctx))
    }

    /// Fire every timer whose period elapsed by `now_ms`
    ///
    /// The first poll starts the clocks. Missed periods are caught up, one
    /// fire each. Returns the number of enemies queued.
    pub fn poll(&mut self, now_ms: f64, ctx: &SpawnContext) -> usize {
        let mut spawned = 0;
        for (producer, due) in self.producers.iter_mut().zip(&mut self.next_due_ms) {
            let period = producer.period_ms() as f64;
            let next = due.get_or_insert(now_ms + period);
            while now_ms >= *next {
                if producer.fire(ctx) {
                    spawned += 1;
                }
                *next += period;
            }
        }
        spawned
    }

    /// Hand the producers to external timers or threads
    pub fn into_producers(self) -> Vec<SpawnProducer> {
        self.producers
    }
}
