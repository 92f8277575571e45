//! Gap Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use gap_runner::persistence::LocalStore;
    use gap_runner::platform::Control;
    use gap_runner::renderer::RenderState;
    use gap_runner::renderer::shapes::draw_list_vertices;
    use gap_runner::sim::EnemyKind;
    use gap_runner::{FrameReport, Session, viewport_width_for_window};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStore>,
        render_state: Option<RenderState>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, viewport_width: f32) -> Self {
            Self {
                session: Session::new(LocalStore::open(), seed, viewport_width),
                render_state: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Advance one frame
        fn update(&mut self, time: f64) -> FrameReport {
            let report = self.session.frame();

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            report
        }

        /// Render the current frame (keeps drawing the frozen frame after game over)
        fn render(&mut self) {
            let palette = self.session.settings().palette();
            let vertices = draw_list_vertices(&self.session.draw_list(), &palette);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices, palette.background) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, report: &FrameReport) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&report.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("high") {
                el.set_text_content(Some(&report.high_score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("fps") {
                if self.session.settings().show_fps {
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                } else {
                    el.set_text_content(None);
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gap Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let inner_width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0) as u32;
        let width = viewport_width_for_window(inner_width).max(1);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, width as f32)));
        let height = game.borrow().session.state().tuning.viewport_height as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let viewport = glam::Vec2::new(width as f32, height as f32);
        let render_state = RenderState::new(surface, &adapter, width, height, viewport).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        setup_spawn_timers(game.clone());

        request_animation_frame(game);

        log::info!("Gap Runner running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if event.repeat() {
                    // Still swallow repeats of game keys so the page doesn't scroll
                    if g.session.input_mut().key_down(&key) {
                        event.prevent_default();
                    }
                    return;
                }
                match key.to_lowercase().as_str() {
                    "i" => {
                        g.session.toggle_autopilot();
                    }
                    "h" => {
                        g.session.toggle_high_contrast();
                    }
                    "f" => {
                        g.session.toggle_fps();
                    }
                    _ => {
                        if g.session.input_mut().key_down(&key) {
                            event.prevent_default();
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.input_mut().key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur swallows keyup events; drop everything held
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().session.input_mut().clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Hold-to-move button: pressed on mouse/touch down, released on up
    fn bind_hold_button(game: &Rc<RefCell<Game>>, id: &str, control: Control) {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        else {
            return;
        };

        for (event_name, pressed) in [
            ("mousedown", true),
            ("touchstart", true),
            ("mouseup", false),
            ("touchend", false),
            ("mouseleave", false),
        ] {
            let game = game.clone();
            let source = id.to_string();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if pressed {
                    g.session.input_mut().press(control, &source);
                } else {
                    g.session.input_mut().release(control, &source);
                }
            });
            let _ = btn.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        bind_hold_button(&game, "left", Control::Left);
        bind_hold_button(&game, "right", Control::Right);

        if let Some(btn) = document.get_element_by_id("jump") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().session.input_mut().request_jump();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restart is a full reload
        if let Some(btn) = document.get_element_by_id("reset") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().reload();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// One wall-clock interval per enemy kind, each posting into the spawn queue
    fn setup_spawn_timers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let tuning = game.borrow().session.state().tuning;

        for (kind, rule) in [
            (EnemyKind::Walker, tuning.walker),
            (EnemyKind::Faller, tuning.faller),
            (EnemyKind::Riser, tuning.riser),
        ] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                game.borrow_mut().session.fire_spawner(kind);
            });
            let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                rule.period_ms as i32,
            );
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let report = {
            let mut g = game.borrow_mut();
            let report = g.update(time);
            g.render();
            g.update_hud(&report);
            report
        };

        if report.ended_this_frame {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&format!("GAME OVER. Score: {}", report.score));
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gap_runner::Session;
    use gap_runner::consts::MAX_VIEWPORT_WIDTH;
    use gap_runner::persistence::MemoryStore;

    /// Simulated display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Five minutes of play at 60 Hz
    const MAX_FRAMES: u64 = 60 * 60 * 5;

    env_logger::init();
    log::info!("Gap Runner (native) starting...");
    log::info!("Native mode plays a headless autopilot run - use `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });

    let mut session = Session::new(MemoryStore::new(), seed, MAX_VIEWPORT_WIDTH as f32);
    session.set_autopilot(true);

    let mut report = session.frame();
    for frame in 1..MAX_FRAMES {
        if report.game_over {
            break;
        }
        session.run_timers(frame as f64 * FRAME_MS);
        report = session.frame();
    }

    let state = session.state();
    println!(
        "seed {}: score {} (x = {:.0}, {} enemies alive, {})",
        seed,
        report.score,
        state.player.pos.x,
        state.enemies.len(),
        if report.game_over { "game over" } else { "time limit" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
