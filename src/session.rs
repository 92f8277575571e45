//! One play session: the per-frame loop body
//!
//! Owns the simulation, the spawn queue consumer, input, and the storage the
//! high score lives in. The browser (or the native driver) calls `frame`
//! once per display refresh and renders the result.

use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::platform::InputState;
use crate::renderer::{DrawRect, build_draw_list};
use crate::settings::Settings;
use crate::sim::{
    EnemyKind, GameEvent, GameState, SpawnContext, SpawnQueue, Spawner, autopilot_input,
    camera_offset, spawn_queue, tick,
};
use crate::tuning::Tuning;

/// What the glue needs after a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub score: u64,
    pub high_score: u64,
    pub game_over: bool,
    /// The run ended during this frame (show the game-over notice once)
    pub ended_this_frame: bool,
    pub camera_x: f32,
}

/// A running game bound to its storage
pub struct Session<S: KeyValueStore> {
    state: GameState,
    spawner: Spawner,
    queue: SpawnQueue,
    input: InputState,
    high_score: HighScore,
    settings: Settings,
    store: S,
    viewport_width: f32,
    camera_x: f32,
    autopilot: bool,
}

impl<S: KeyValueStore> Session<S> {
    /// Start a session, reading tuning, settings and the high score from `store`
    pub fn new(store: S, seed: u64, viewport_width: f32) -> Self {
        let tuning = Tuning::load(&store);
        Self::with_tuning(store, seed, viewport_width, tuning)
    }

    pub fn with_tuning(store: S, seed: u64, viewport_width: f32, tuning: Tuning) -> Self {
        let high_score = HighScore::load(&store);
        let settings = Settings::load(&store);
        let state = GameState::new(seed, tuning);
        let (tx, queue) = spawn_queue();
        let spawner = Spawner::new(&tuning, seed, tx);
        let camera_x = camera_offset(
            state.player.pos.x,
            viewport_width,
            tuning.world_width as f32,
        );

        log::info!("Session started with seed {}", seed);

        Self {
            state,
            spawner,
            queue,
            input: InputState::new(),
            high_score,
            autopilot: settings.autopilot,
            settings,
            store,
            viewport_width,
            camera_x,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn camera_x(&self) -> f32 {
        self.camera_x
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.autopilot = on;
        log::info!("Autopilot: {}", on);
    }

    /// Flip demo mode and remember it for the next session
    pub fn toggle_autopilot(&mut self) -> bool {
        let on = !self.autopilot;
        self.set_autopilot(on);
        self.settings.autopilot = on;
        self.settings.save(&mut self.store);
        on
    }

    pub fn toggle_high_contrast(&mut self) -> bool {
        self.settings.high_contrast = !self.settings.high_contrast;
        self.settings.save(&mut self.store);
        self.settings.high_contrast
    }

    pub fn toggle_fps(&mut self) -> bool {
        self.settings.show_fps = !self.settings.show_fps;
        self.settings.save(&mut self.store);
        self.settings.show_fps
    }

    /// Hand the store back (e.g. to start the next session on it)
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn spawn_context(&self) -> SpawnContext {
        SpawnContext::of(&self.state)
    }

    /// One kind's timer fired (browser `setInterval`)
    pub fn fire_spawner(&mut self, kind: EnemyKind) -> bool {
        let ctx = self.spawn_context();
        self.spawner.fire(kind, &ctx)
    }

    /// Fire all timers due by `now_ms` (native driver)
    pub fn run_timers(&mut self, now_ms: f64) -> usize {
        let ctx = self.spawn_context();
        self.spawner.poll(now_ms, &ctx)
    }

    /// Advance one display frame
    pub fn frame(&mut self) -> FrameReport {
        let game_over = self.state.is_game_over();
        for enemy in self.queue.drain() {
            if !game_over {
                self.state.enemies.push(enemy);
            }
        }

        let input = if self.autopilot {
            // Keep the latch from firing a stale jump when control returns
            self.input.take_tick_input();
            autopilot_input(&self.state)
        } else {
            self.input.take_tick_input()
        };
        tick(&mut self.state, &input);

        let mut ended_this_frame = false;
        for event in self.state.drain_events() {
            match event {
                GameEvent::GameOver { score, .. } => {
                    ended_this_frame = true;
                    self.high_score.record(score, &mut self.store);
                }
            }
        }

        self.camera_x = camera_offset(
            self.state.player.pos.x,
            self.viewport_width,
            self.state.tuning.world_width as f32,
        );

        FrameReport {
            score: self.state.score,
            high_score: self.high_score.best(),
            game_over: self.state.is_game_over(),
            ended_this_frame,
            camera_x: self.camera_x,
        }
    }

    /// Rectangles to draw for the current frame
    pub fn draw_list(&self) -> Vec<DrawRect> {
        build_draw_list(&self.state, self.camera_x, self.viewport_width)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
