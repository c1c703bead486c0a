pub mod assets;
pub mod config;
pub mod diagnostics;
pub mod geometry;
pub mod input;
pub mod player;
pub mod render;
pub mod scheduler;
pub mod screen;
pub mod session;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, KeyboardEvent, Window};

use crate::assets::{ASSET_BASE_URL, AssetCallback, Assets, ImageId};
use crate::config::{GameConfig, World};
use crate::diagnostics::{Diagnostics, LoopStats, js_value_to_string};
use crate::input::{InputState, JUMP_KEYS, LEFT_KEYS, RIGHT_KEYS};
use crate::scheduler::{FrameClock, FrameLoop};
use crate::screen::Transition;
use crate::session::Game;

const CANVAS_ID: &str = "gameCanvas";
const MAX_PIXEL_RATIO: f64 = 2.5;
const DIAGNOSTICS_REFRESH_FRAMES: u64 = 10;

struct App {
    game: Game,
    input: InputState,
    clock: FrameClock,
    assets: Assets,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pixel_ratio: f64,
}

impl App {
    fn stats(&self, running: bool) -> LoopStats {
        let (assets_ready, assets_failed, assets_total) = self.assets.summary();
        LoopStats {
            running,
            frames: self.clock.frames(),
            fps: self.clock.fps(),
            keys_held: self.input.held_count(),
            assets_ready,
            assets_failed,
            assets_total,
            canvas_width: self.canvas.width(),
            canvas_height: self.canvas.height(),
            pixel_ratio: self.pixel_ratio,
        }
    }
}

struct Runtime {
    app: Rc<RefCell<App>>,
    diagnostics: Rc<RefCell<Diagnostics>>,
    frame_loop: FrameLoop,
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("missing window"))
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|win| win.performance())
        .map(|perf| perf.now())
        .unwrap_or(0.0)
}

fn is_game_key(key: &str) -> bool {
    LEFT_KEYS.contains(&key) || RIGHT_KEYS.contains(&key) || JUMP_KEYS.contains(&key)
}

/// Sizes the backing store for the device pixel ratio and maps drawing to world units.
fn configure_canvas(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    world: &World,
) -> Result<f64, JsValue> {
    let dpr = window()?.device_pixel_ratio().clamp(1.0, MAX_PIXEL_RATIO);
    let width = (world.width * dpr).round().max(1.0) as u32;
    let height = (world.height * dpr).round().max(1.0) as u32;

    if canvas.width() != width {
        canvas.set_width(width);
    }
    if canvas.height() != height {
        canvas.set_height(height);
    }

    let style = canvas.style();
    style.set_property("width", &format!("{}px", world.width))?;
    style.set_property("height", &format!("{}px", world.height))?;

    // Resizing the canvas resets the context transform.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    Ok(dpr)
}

fn with_runtime<R>(f: impl FnOnce(&Runtime) -> R) -> Option<R> {
    RUNTIME.with(|runtime| runtime.borrow().as_ref().map(f))
}

/// Stops the frame loop. Returns false if it was not running.
#[wasm_bindgen]
pub fn pause() -> bool {
    with_runtime(|rt| {
        let stopped = rt.frame_loop.stop();
        if stopped {
            let mut diagnostics = rt.diagnostics.borrow_mut();
            diagnostics.event("loop_paused");
            diagnostics.set_status("paused");
            diagnostics.refresh(&rt.app.borrow().game, &rt.app.borrow().stats(false));
        }
        stopped
    })
    .unwrap_or(false)
}

/// Restarts the frame loop. Time spent paused is not simulated.
#[wasm_bindgen]
pub fn resume() -> Result<bool, JsValue> {
    with_runtime(|rt| {
        if rt.frame_loop.is_running() {
            return Ok(false);
        }
        rt.app.borrow_mut().clock.reset();
        let started = rt.frame_loop.start()?;
        let mut diagnostics = rt.diagnostics.borrow_mut();
        diagnostics.event("loop_resumed");
        let playing = rt.app.borrow().game.screen.is_playing();
        diagnostics.set_status(if playing { "in_game" } else { "ready" });
        Ok(started)
    })
    .unwrap_or(Ok(false))
}

#[wasm_bindgen]
pub fn is_running() -> bool {
    with_runtime(|rt| rt.frame_loop.is_running()).unwrap_or(false)
}

/// Hands the session a username captured by the page.
#[wasm_bindgen]
pub fn set_username(name: &str) {
    with_runtime(|rt| {
        rt.app.borrow_mut().game.set_username(name);
        rt.diagnostics.borrow_mut().event("username_set");
    });
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if let Err(err) = start_impl() {
        let message = format!("fatal: {}", js_value_to_string(&err));

        if let Some(win) = web_sys::window() {
            if let Some(doc) = win.document() {
                if let Some(el) = doc.document_element() {
                    let _ = el.set_attribute("data-render-status", "error");
                }
                if let Some(diag) = doc.get_element_by_id("diagnostics-text") {
                    diag.set_text_content(Some(&message));
                }
            }
        }

        crate::diagnostics::error(&message);
    }
}

fn start_impl() -> Result<(), JsValue> {
    let win = window()?;
    let document = win
        .document()
        .ok_or_else(|| JsValue::from_str("missing document"))?;
    let search = win.location().search().unwrap_or_default();
    let config = GameConfig::from_query(&search);

    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("Missing canvas"))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D canvas unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    let pixel_ratio = configure_canvas(&canvas, &ctx, &config.world)?;

    let diagnostics = Rc::new(RefCell::new(Diagnostics::new(
        &document,
        config.show_diagnostics,
    )));
    diagnostics.borrow().set_status("loading");

    let diagnostics_assets = Rc::clone(&diagnostics);
    let on_asset: AssetCallback = Rc::new(move |id: ImageId, result: Result<(), String>| {
        let mut diagnostics = diagnostics_assets.borrow_mut();
        match result {
            Ok(()) => {
                diagnostics.event(format!("asset_ready {}", id.name()));
                if id == ImageId::Title && diagnostics.status().as_deref() == Some("loading") {
                    diagnostics.set_status("ready");
                }
            }
            Err(reason) => {
                crate::diagnostics::warn(&format!(
                    "asset {} failed: {}",
                    id.url(ASSET_BASE_URL),
                    reason
                ));
                diagnostics.event(format!("asset_failed {}", id.name()));
            }
        }
    });
    let assets = Assets::load(ASSET_BASE_URL, on_asset)?;

    diagnostics.borrow_mut().event(format!(
        "start (step {}, dpr {:.2})",
        config.step.name(),
        pixel_ratio
    ));

    let app = Rc::new(RefCell::new(App {
        game: Game::new(config),
        input: InputState::new(),
        clock: FrameClock::new(),
        assets,
        canvas: canvas.clone(),
        ctx,
        pixel_ratio,
    }));

    let app_frame = Rc::clone(&app);
    let diagnostics_frame = Rc::clone(&diagnostics);
    let frame_loop = FrameLoop::new(move |timestamp: f64| {
        let mut app = app_frame.borrow_mut();
        let elapsed = app.clock.tick(timestamp);
        let input = app.input.snapshot();
        app.game.update(elapsed, input);

        let commands = render::compose(&app.game);
        let mut diagnostics = diagnostics_frame.borrow_mut();
        if let Err(err) = render::paint(&app.ctx, &app.assets, &commands) {
            diagnostics.render_fault(js_value_to_string(&err));
        }

        if app.clock.frames() % DIAGNOSTICS_REFRESH_FRAMES == 0 {
            diagnostics.refresh(&app.game, &app.stats(true));
        }
    });

    let app_keydown = Rc::clone(&app);
    let on_keydown = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        let key = event.key();
        let mut app = app_keydown.borrow_mut();
        // Keep arrows and space from scrolling the page mid-run.
        if app.game.screen.is_playing() && is_game_key(&key) {
            event.prevent_default();
        }
        app.input.key_down(&key);
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
    on_keydown.forget();

    let app_keyup = Rc::clone(&app);
    let on_keyup = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        app_keyup.borrow_mut().input.key_up(&event.key());
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("keyup", on_keyup.as_ref().unchecked_ref())?;
    on_keyup.forget();

    let app_pointer = Rc::clone(&app);
    let diagnostics_pointer = Rc::clone(&diagnostics);
    let on_pointerdown = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();

        let mut app = app_pointer.borrow_mut();
        let transition = app.game.pointer_down(now_ms());
        let mut diagnostics = diagnostics_pointer.borrow_mut();
        match transition {
            Transition::Advance { from, to } => {
                diagnostics.event(format!("screen {} -> {}", from.name(), to.name()));
            }
            Transition::StartGame => {
                diagnostics.event("start_game");
                diagnostics.set_status("in_game");
            }
            Transition::Stay(_) => {
                diagnostics.last_event = "pointerdown".to_string();
            }
        }
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback(
        "pointerdown",
        on_pointerdown.as_ref().unchecked_ref(),
    )?;
    on_pointerdown.forget();

    let app_resize = Rc::clone(&app);
    let on_resize = Closure::wrap(Box::new(move |_event: Event| {
        let mut app = app_resize.borrow_mut();
        let world = app.game.config.world;
        let configured = configure_canvas(&app.canvas, &app.ctx, &world);
        match configured {
            Ok(dpr) => app.pixel_ratio = dpr,
            Err(err) => {
                crate::diagnostics::warn(&format!("resize: {}", js_value_to_string(&err)));
            }
        }
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    frame_loop.start()?;
    diagnostics.borrow_mut().event("loop_started");

    RUNTIME.with(|runtime| {
        *runtime.borrow_mut() = Some(Runtime {
            app,
            diagnostics,
            frame_loop,
        });
    });

    Ok(())
}
