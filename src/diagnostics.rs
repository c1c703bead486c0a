use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::session::Game;

pub fn js_value_to_string(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

pub fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

pub fn error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

/// Frame-level numbers the game itself does not track.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoopStats {
    pub running: bool,
    pub frames: u64,
    pub fps: f64,
    pub keys_held: usize,
    pub assets_ready: usize,
    pub assets_failed: usize,
    pub assets_total: usize,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub pixel_ratio: f64,
}

pub fn status_lines(
    game: &Game,
    stats: &LoopStats,
    last_event: &str,
    last_error: Option<&str>,
) -> Vec<String> {
    let player = &game.player;
    vec![
        format!("event: {}", last_event),
        format!("screen: {} (scene {})", game.screen.name(), game.scene.name()),
        format!(
            "player: {:.2},{:.2} v {:.2},{:.2}",
            player.x, player.y, player.vx, player.vy
        ),
        format!(
            "jumping: {} grounded: {} facing: {}",
            player.jumping,
            player.on_ground(&game.config.world),
            if player.facing_right { "right" } else { "left" }
        ),
        format!(
            "wallet: {:.2} atm: {:.2}/{:.2}",
            game.wallet, game.atm_balance, game.atm_max
        ),
        format!(
            "username: {}",
            if game.username.is_empty() {
                "(none)"
            } else {
                game.username.as_str()
            }
        ),
        format!(
            "loop: {} frames {} fps {:.1} keys {}",
            if stats.running { "running" } else { "stopped" },
            stats.frames,
            stats.fps,
            stats.keys_held
        ),
        format!(
            "step: {} ticks {} pending {:.2}ms",
            game.stepper().mode().name(),
            game.stepper().total_ticks(),
            game.stepper().pending_ms()
        ),
        format!(
            "assets: {}/{} ready, {} failed",
            stats.assets_ready, stats.assets_total, stats.assets_failed
        ),
        format!(
            "canvas: {}x{} (dpr {:.2})",
            stats.canvas_width, stats.canvas_height, stats.pixel_ratio
        ),
        format!("render_error: {}", last_error.unwrap_or("none")),
    ]
}

/// Page-side status reporting: the `data-render-status` attribute and the optional
/// `#diagnostics-text` overlay.
pub struct Diagnostics {
    document: Document,
    text: Option<HtmlElement>,
    pub last_event: String,
    pub last_render_error: Option<String>,
}

impl Diagnostics {
    pub fn new(document: &Document, visible: bool) -> Self {
        let text = document
            .get_element_by_id("diagnostics-text")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        if let Some(el) = document.document_element() {
            let _ = el.set_attribute("data-diag-open", if visible { "1" } else { "0" });
        }

        Self {
            document: document.clone(),
            text,
            last_event: "init".to_string(),
            last_render_error: None,
        }
    }

    pub fn set_status(&self, status: &str) {
        if let Some(el) = self.document.document_element() {
            let _ = el.set_attribute("data-render-status", status);
        }
    }

    pub fn status(&self) -> Option<String> {
        self.document
            .document_element()
            .and_then(|el| el.get_attribute("data-render-status"))
    }

    /// Records a lifecycle event and echoes it to the console.
    pub fn event(&mut self, event: impl Into<String>) {
        self.last_event = event.into();
        log(&self.last_event);
    }

    /// Logs a render fault once per distinct message so a broken frame does not flood
    /// the console at 60 Hz. Returns true when the message was logged.
    pub fn render_fault(&mut self, message: String) -> bool {
        if self.last_render_error.as_deref() == Some(message.as_str()) {
            return false;
        }
        warn(&format!("render: {}", message));
        self.last_render_error = Some(message);
        true
    }

    pub fn refresh(&self, game: &Game, stats: &LoopStats) {
        let Some(text) = &self.text else {
            return;
        };
        let lines = status_lines(
            game,
            stats,
            &self.last_event,
            self.last_render_error.as_deref(),
        );
        text.set_text_content(Some(&lines.join("\n")));
    }
}
