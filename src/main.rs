//! Alley Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use alley_run::persistence::local::BrowserStorage;
    use alley_run::persistence::report::FetchGateway;
    use alley_run::persistence::{ScoreReport, record_locally, report_run};
    use alley_run::platform::{
        AnimationFrameScheduler, FrameScheduler, FrameTimer, InputLatch, PerformanceClock,
    };
    use alley_run::{Domain, Engine, GamePhase, Leaderboard, RenderView, Settings, TickInput};

    // The page draws; we only hand it the world as JSON
    #[wasm_bindgen(inline_js = "
        export function render_frame(json) {
            if (typeof window.alleyRunRender === 'function') {
                window.alleyRunRender(json);
            }
        }
    ")]
    extern "C" {
        fn render_frame(json: &str);
    }

    struct Game {
        engine: Engine,
        input: InputLatch,
        timer: FrameTimer,
        clock: PerformanceClock,
        gateway: FetchGateway,
        settings: Settings,
        canvas_width: f32,
    }

    impl Game {
        fn new(domain: Domain, settings: Settings, viewport_width: f32) -> Self {
            let seed = js_sys::Date::now() as u64;
            let tuning = settings.tuning_for(viewport_width);
            log::info!(
                "Layout {} for viewport {viewport_width}",
                settings.effective_layout(viewport_width).as_str()
            );
            Self {
                engine: Engine::new(domain, tuning, seed),
                input: InputLatch::new(),
                timer: FrameTimer::new(),
                clock: PerformanceClock::new(),
                gateway: FetchGateway::new(""),
                settings,
                canvas_width: viewport_width,
            }
        }

        /// Any jump intent starts a fresh run
        fn update(&mut self) {
            let delta = self.timer.tick(&self.clock);
            let mut input = self.input.sample();

            // The idle scene is still drawn while waiting for the first jump.
            // The jump that starts the run is not also a jump in it.
            if self.engine.phase() == GamePhase::Ready && input.jump_pressed {
                self.engine.start();
                input = TickInput::default();
            }

            let frame = self.engine.advance(delta, &input);
            let game_over = frame.game_over();
            match RenderView::new(frame.state, frame.events, &self.settings).to_json() {
                Ok(json) => render_frame(&json),
                Err(e) => log::warn!("Snapshot encoding failed: {e}"),
            }

            if game_over {
                self.finish_run();
            }
        }

        fn finish_run(&mut self) {
            let Some(report) = ScoreReport::from_state(self.engine.snapshot()) else {
                return;
            };

            let mut leaderboard = Leaderboard::load();
            report_run(&mut leaderboard, &report);
            leaderboard.save();

            report_run(&mut self.gateway, &report);

            match BrowserStorage::open() {
                Ok(mut storage) => {
                    if let Err(e) =
                        record_locally(&mut storage, report.domain, report.score, report.beans)
                    {
                        log::warn!("Local stats not saved: {e}");
                    }
                }
                Err(e) => log::warn!("Local stats not saved: {e}"),
            }
        }

        fn restart(&mut self) {
            // Pick up toggles saved by the page since the last run
            self.settings = Settings::load();
            self.engine.reset();
            self.timer.reset();
            self.input.release_all();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Alley Run starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };

        // <canvas data-domain="fire">
        let domain = canvas
            .get_attribute("data-domain")
            .and_then(|d| Domain::from_str(&d))
            .unwrap_or_default();

        let settings = Settings::load();
        let viewport_width = canvas.client_width() as f32;
        let game = Rc::new(RefCell::new(Game::new(domain, settings, viewport_width)));

        refresh_leaderboard_cache();
        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_auto_release(game.clone());

        request_animation_frame(game);

        log::info!("Alley Run running ({domain})");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.code());
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click to jump
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.pointer_down();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: tap jumps, holding a half strafes
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let width = g.canvas_width;
                match event.touches().get(0) {
                    Some(touch) => g.input.touch_start(touch.client_x() as f32, width),
                    None => g.input.pointer_down(),
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if let Some(touch) = event.touches().get(0) {
                    let width = g.canvas_width;
                    g.input.touch_move(touch.client_x() as f32, width);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input.touch_end();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Pull the shared leaderboard into the LocalStorage cache the menu reads
    fn refresh_leaderboard_cache() {
        wasm_bindgen_futures::spawn_local(async {
            match FetchGateway::new("").fetch_leaderboard().await {
                Ok(board) if board.is_empty() => log::info!("Leaderboard is empty; cache kept"),
                Ok(board) => {
                    board.save();
                    log::info!("Leaderboard cache refreshed");
                }
                Err(e) => log::warn!("Leaderboard fetch failed: {e}"),
            }
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        AnimationFrameScheduler.schedule_next_frame(Box::new(move |_time| {
            game_loop(game);
        }));
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().update();
        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Keys held when the window loses focus never see their keyup
    fn setup_auto_release(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.input.release_all();
            // Resume without counting the time away
            g.timer.reset();
            log::info!("Input released (window blur)");
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Called by the page's settings menu; applies from the next run
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn save_settings(json: &str) -> bool {
    match serde_json::from_str::<alley_run::Settings>(json) {
        Ok(settings) => {
            settings.save();
            true
        }
        Err(e) => {
            log::warn!("Rejected settings: {e}");
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Alley Run (native, headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let domain = match args.first() {
        Some(name) => match alley_run::Domain::from_str(name) {
            Some(d) => d,
            None => {
                log::error!("Unknown domain {name:?}; expected one of lightning, fire, water, earth");
                std::process::exit(2);
            }
        },
        None => alley_run::Domain::default(),
    };
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let seconds: f64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(120.0);

    let tuning = match load_tuning() {
        Ok(t) => t,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };

    headless::run(domain, tuning, seed, seconds);
}

/// Tuning from `ALLEY_RUN_TUNING` (a JSON file), else desktop defaults
#[cfg(not(target_arch = "wasm32"))]
fn load_tuning() -> Result<alley_run::Tuning, String> {
    let Ok(path) = std::env::var("ALLEY_RUN_TUNING") else {
        return Ok(alley_run::Tuning::desktop());
    };
    let json = std::fs::read_to_string(&path).map_err(|e| format!("Cannot read {path}: {e}"))?;
    let tuning = alley_run::Tuning::from_json(&json).map_err(|e| format!("{path}: {e}"))?;
    log::info!("Loaded tuning from {path}");
    Ok(tuning)
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use alley_run::consts::NOMINAL_FRAME_MS;
    use alley_run::persistence::{MemoryStore, ScoreReport, record_locally, report_run};
    use alley_run::platform::{Clock, FrameTimer, ManualClock};
    use alley_run::{Domain, Engine, GameEvent, GameState, Leaderboard, TickInput, Tuning};

    /// Frames of lookahead before an obstacle reaches the character
    const JUMP_LEAD_FRAMES: f32 = 30.0;

    /// Jump when the nearest obstacle ahead is close, given current speed
    fn autopilot(state: &GameState) -> TickInput {
        let character = &state.character;
        let front = character.pos.x + character.size.x;
        let lead = JUMP_LEAD_FRAMES * state.tuning.entity_speed * state.stats.speed_scale;
        let threat = state
            .obstacles
            .iter()
            .map(|o| o.pos.x - front)
            .any(|gap| gap >= 0.0 && gap < lead);
        TickInput {
            jump_pressed: threat && !character.airborne,
            ..Default::default()
        }
    }

    pub fn run(domain: Domain, tuning: Tuning, seed: u64, seconds: f64) {
        let mut engine = Engine::new(domain, tuning, seed);
        let clock = ManualClock::new();
        let mut timer = FrameTimer::new();
        engine.start();

        let mut jumps = 0u32;
        let mut tiers = 0u32;
        timer.tick(&clock);
        while clock.now_ms() < seconds * 1000.0 {
            clock.advance(NOMINAL_FRAME_MS as f64);
            let input = autopilot(engine.snapshot());
            let frame = engine.advance(timer.tick(&clock), &input);
            for event in frame.events {
                match event {
                    GameEvent::Jumped => jumps += 1,
                    GameEvent::SpeedTierReached { .. } => tiers += 1,
                    GameEvent::LifeLost { lives } => log::info!("Hit! {lives} lives left"),
                    GameEvent::LifeRestored { lives } => log::info!("+1 Life! ({lives})"),
                    _ => {}
                }
            }
            if frame.game_over() {
                break;
            }
        }

        let state = engine.snapshot();
        log::info!(
            "Run over after {:.1}s: score {}, beans {}, lives {}, speed x{:.2}, {jumps} jumps, {tiers} tiers",
            state.elapsed_ms / 1000.0,
            state.stats.score,
            state.stats.beans_collected,
            state.stats.lives,
            state.stats.speed_scale,
        );

        // Only a finished run is reported
        let Some(report) = ScoreReport::from_state(state) else {
            log::info!("Time limit reached before game over; nothing reported");
            return;
        };

        let mut leaderboard = Leaderboard::new();
        report_run(&mut leaderboard, &report);
        if let Some(rank) = leaderboard.rank(report.domain) {
            log::info!("{} is ranked #{rank}", report.domain);
        }

        let mut store = MemoryStore::new();
        match record_locally(&mut store, report.domain, report.score, report.beans) {
            Ok(stats) => log::info!(
                "Local {}: best {}, lifetime beans {}",
                report.domain,
                stats.high_score,
                stats.total_beans
            ),
            Err(e) => log::warn!("Local stats not saved: {e}"),
        }
    }
}
