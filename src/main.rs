//! Pixel Quest entry point
//!
//! On the web this wires browser events and `setInterval` to the controller.
//! Natively it runs a headless autopilot demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use pixel_quest::{Command, Controller, Settings, TimerDirective};

    /// Name of the optional page function that draws a frame
    const RENDER_HOOK: &str = "renderPixelQuest";

    /// Game instance holding all state
    struct Game {
        controller: Controller,
        /// Handle of the running `setInterval`
        interval: Option<i32>,
        /// Callback of the current interval run (must outlive it)
        tick_callback: Option<Closure<dyn FnMut()>>,
    }

    /// Feed one command to the controller, apply the timer change, redraw
    fn dispatch(game: &Rc<RefCell<Game>>, command: Command) {
        let directive = game.borrow_mut().controller.handle(command);
        if let Some(directive) = directive {
            apply_timer(game, directive);
        }
        publish_frame(game);
    }

    fn apply_timer(game: &Rc<RefCell<Game>>, directive: TimerDirective) {
        let window = web_sys::window().expect("no window");

        match directive {
            TimerDirective::Start { timer, interval_ms } => {
                let handle_game = game.clone();
                let callback = Closure::<dyn FnMut()>::new(move || {
                    dispatch(&handle_game, Command::Tick { timer });
                });
                let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
                    callback.as_ref().unchecked_ref(),
                    interval_ms as i32,
                );

                let mut g = game.borrow_mut();
                if let Some(old) = g.interval.take() {
                    window.clear_interval_with_handle(old);
                }
                match handle {
                    Ok(handle) => g.interval = Some(handle),
                    Err(e) => log::error!("setInterval failed: {:?}", e),
                }
                // Never replaced from inside a tick: ticks only ever stop the timer
                g.tick_callback = Some(callback);
            }
            TimerDirective::Stop => {
                if let Some(handle) = game.borrow_mut().interval.take() {
                    window.clear_interval_with_handle(handle);
                }
            }
        }
    }

    /// Hand the current frame to the page's renderer, if it installed one.
    ///
    /// The hook runs with no borrow of `game` held, so it may call back into
    /// the page controls.
    fn publish_frame(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(hook) = js_sys::Reflect::get(&window, &JsValue::from_str(RENDER_HOOK)) else {
            return;
        };
        let Ok(hook) = hook.dyn_into::<js_sys::Function>() else {
            return;
        };

        let json = game.borrow().controller.snapshot().to_json();
        match json {
            Ok(json) => {
                if let Err(e) = hook.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("Render hook failed: {:?}", e);
                }
            }
            Err(e) => log::error!("Snapshot serialization failed: {}", e),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pixel Quest starting...");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game {
            controller: Controller::new(&settings, seed),
            interval: None,
            tick_callback: None,
        }));

        setup_keyboard(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        publish_frame(&game);
        log::info!("Ready (seed {})", seed);
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key().to_lowercase();
                // Keep arrows and space from scrolling the page
                if key == " " || key.starts_with("arrow") {
                    event.prevent_default();
                }
                dispatch(&game, Command::KeyDown(key));
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                dispatch(&game, Command::KeyUp(event.key()));
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let buttons: [(&str, fn(&Game) -> Command); 4] = [
            ("start-btn", |_| Command::Start),
            ("pause-btn", |_| Command::TogglePause),
            ("reset-btn", |_| Command::Reset),
            ("autopilot-btn", |g| Command::SetAutopilot(!g.controller.autopilot())),
        ];

        for (id, make_command) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let command = make_command(&game.borrow());
                dispatch(&game, command);
            });
            let _ = btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    dispatch(&game, Command::FocusLost);
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                dispatch(&game, Command::FocusLost);
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pixel Quest (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - serve the wasm build to play");

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let settings = pixel_quest::Settings::load_from(path.as_deref());
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });

    match settings.to_json() {
        Ok(json) => log::debug!("Effective settings:\n{}", json),
        Err(e) => log::warn!("Could not serialize settings: {}", e),
    }

    run_demo(&settings, seed);
}

/// Three minutes of game time at the default tick rate
#[cfg(not(target_arch = "wasm32"))]
const DEMO_TICKS: u64 = 60 * 180;

#[cfg(not(target_arch = "wasm32"))]
fn run_demo(settings: &pixel_quest::Settings, seed: u64) {
    use pixel_quest::sim::{GameEvent, GamePhase};
    use pixel_quest::{Command, Controller, TimerDirective};

    let mut controller = Controller::new(settings, seed);
    controller.handle(Command::SetAutopilot(true));

    let mut timer = match controller.handle(Command::Start) {
        Some(TimerDirective::Start { timer, .. }) => Some(timer),
        _ => None,
    };

    let mut ticks = 0;
    while let Some(id) = timer {
        if ticks >= DEMO_TICKS {
            break;
        }
        if controller.handle(Command::Tick { timer: id }) == Some(TimerDirective::Stop) {
            timer = None;
        }
        ticks += 1;

        for event in &controller.world().events {
            if let GameEvent::LevelCleared { level } = event {
                println!("tick {:>5}: level {} cleared", ticks, level);
            }
        }
    }

    let world = controller.world();
    let outcome = if world.phase() == GamePhase::GameOver {
        "game over"
    } else {
        "time up"
    };
    println!(
        "Seed {}: {} after {} ticks - score {}, level {}, lives {}",
        world.seed, outcome, ticks, world.session.score, world.session.level, world.session.lives
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
