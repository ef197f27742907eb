//! Wizard Platformer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use wizard_platformer::Settings;
    use wizard_platformer::Tuning;
    use wizard_platformer::audio::AudioManager;
    use wizard_platformer::consts::*;
    use wizard_platformer::platform::input::is_game_key;
    use wizard_platformer::platform::{Command, KeyboardState};
    use wizard_platformer::renderer::{RenderState, Scene, VertexSurface};
    use wizard_platformer::sim::{GameEvent, GamePhase, GameState, debug, tick};

    /// LocalStorage key for optional balance overrides
    const TUNING_KEY: &str = "wizard_platformer_tuning";

    /// Levels skipped by the debug skip key
    const DEBUG_SKIP: u32 = 10;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        scene: Scene,
        surface: VertexSurface,
        keys: KeyboardState,
        audio: AudioManager,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
            let mut scene = Scene::new();
            scene.set_reduced_motion(settings.reduced_motion);
            let mut audio = AudioManager::new(&settings);
            if settings.music_enabled {
                audio.start_music();
            }
            Self {
                state: GameState::with_tuning(seed, tuning),
                settings,
                render_state: None,
                scene,
                surface: VertexSurface::new(),
                keys: KeyboardState::new(),
                audio,
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.keys.snapshot();
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            self.handle_events();
            self.audio.update();

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Forward queued simulation events to audio
        fn handle_events(&mut self) {
            for event in self.state.drain_events() {
                if let Some(cue) = event.sound() {
                    self.audio.play(cue);
                }
                match event {
                    GameEvent::DoorOpened => log::debug!("Door open"),
                    GameEvent::GameOver => log::info!("Final score {}", self.state.score),
                    _ => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            self.surface.clear();
            self.scene.render(&self.state, &mut self.surface);
            match render_state.render(&self.surface.vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements and overlays in DOM
        fn update_hud(&self, document: &Document) {
            let hud = self.state.hud();

            set_text(document, "score", &hud.score.to_string());
            set_text(document, "lives", &hud.lives.to_string());
            set_text(document, "level", &hud.level.to_string());
            set_text(
                document,
                "collected",
                &format!("{}/{}", hud.collected, hud.needed),
            );

            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&format!("{} FPS", self.fps)));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            let phase = self.state.phase;
            show(document, "levelComplete", phase == GamePhase::LevelComplete);
            show(document, "gameOver", phase == GamePhase::GameOver);
            show(document, "victory", phase == GamePhase::Victory);

            match phase {
                GamePhase::LevelComplete => {
                    set_text(document, "completedLevel", &hud.level.to_string());
                    set_text(document, "levelScore", &hud.score.to_string());
                }
                GamePhase::GameOver => {
                    set_text(document, "finalScore", &hud.score.to_string());
                }
                GamePhase::Victory => {
                    set_text(document, "victoryScore", &hud.score.to_string());
                }
                GamePhase::Playing => {}
            }
        }

        /// One-shot key commands
        fn command(&mut self, command: Command) {
            match command {
                Command::ToggleMusic => {
                    self.audio.resume();
                    self.audio.toggle_music();
                    self.settings.music_enabled = self.audio.is_music_playing();
                    self.settings.save();
                }
                Command::Confirm => match self.state.phase {
                    GamePhase::LevelComplete => self.state.continue_to_next_level(),
                    GamePhase::GameOver | GamePhase::Victory => self.restart(),
                    GamePhase::Playing => {}
                },
                Command::DebugNextLevel => debug::force_level_complete(&mut self.state),
                Command::DebugAddLife => debug::add_life(&mut self.state),
                Command::DebugSkipLevels => {
                    let target = self.state.level.saturating_add(DEBUG_SKIP);
                    debug::skip_to_level(&mut self.state, target);
                }
                Command::DebugGodMode => debug::god_mode(&mut self.state),
            }
        }

        /// Reset session for restart
        fn restart(&mut self) {
            self.state.restart();
            self.accumulator = 0.0;
            self.keys.clear();
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "overlay" } else { "overlay hidden" });
        }
    }

    /// Balance overrides from LocalStorage, if any
    fn load_tuning() -> Tuning {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(TUNING_KEY).ok().flatten());
        match stored {
            Some(json) => Tuning::from_json_or_default(&json),
            None => Tuning::default(),
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Wizard Platformer starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Fixed logical resolution, scaled for high-DPI displays
        let dpr = window.device_pixel_ratio();
        let width = (VIEW_WIDTH as f64 * dpr) as u32;
        let height = (VIEW_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, load_tuning(), Settings::load())));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_keyboard(&window, game.clone());
        setup_buttons(&document, game.clone());
        setup_focus(&window, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Wizard Platformer running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down: record held key, fire one-shot commands
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if is_game_key(&code) {
                    event.prevent_default();
                }

                let mut g = game.borrow_mut();
                g.audio.resume();
                let fresh = g.keys.key_down(&code);
                if !fresh {
                    return;
                }
                let debug_keys = g.settings.debug_keys;
                if let Some(command) = Command::from_code(&code, debug_keys) {
                    g.command(command);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        // Continue (level complete overlay)
        if let Some(btn) = document.get_element_by_id("continue-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().state.continue_to_next_level();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restart (game over and victory overlays)
        for id in ["restart-btn", "play-again-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Window blur: keyup events are lost while unfocused
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            game.borrow_mut().keys.clear();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Wizard Platformer (native) starting...");
    log::info!("Native mode runs a headless simulation - use `trunk serve` to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => wizard_platformer::Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                wizard_platformer::Tuning::default()
            }
        },
        None => wizard_platformer::Tuning::default(),
    };

    headless_run(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted run: walk right, hopping every second, for a minute of game time
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(tuning: wizard_platformer::Tuning) {
    use wizard_platformer::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    const TICKS: u32 = 60 * 60;

    let mut state = GameState::with_tuning(42, tuning);
    for t in 0..TICKS {
        let input = TickInput {
            left: false,
            right: true,
            jump: t % 60 < 10,
        };
        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::Jumped => {}
                other => log::debug!("tick {}: {:?}", t, other),
            }
        }

        if state.phase == GamePhase::LevelComplete {
            state.continue_to_next_level();
        }
        if matches!(state.phase, GamePhase::GameOver | GamePhase::Victory) {
            break;
        }
    }

    let hud = state.hud();
    log::info!(
        "Headless run done: phase {:?}, level {}, score {}, lives {}, gems {}/{}",
        state.phase,
        hud.level,
        hud.score,
        hud.lives,
        hud.collected,
        hud.needed
    );
}
