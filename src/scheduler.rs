use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::{MAX_FRAME_MS, StepMode};

// rAF timestamps are quantized (1 ms or 0.1 ms), so frames land slightly short of or past
// a tick boundary. Anything this close to a whole tick counts as one.
const TICK_SLACK_MS: f64 = 1.0;

/// Turns animation-frame timestamps into elapsed milliseconds.
#[derive(Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    frames: u64,
    smoothed_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first tick after construction or `reset` only seeds the clock and reports 0.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let elapsed = match self.last_ms {
            Some(previous) => (now_ms - previous).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.frames += 1;
        if elapsed > 0.0 {
            self.smoothed_ms = if self.smoothed_ms == 0.0 {
                elapsed
            } else {
                self.smoothed_ms * 0.9 + elapsed * 0.1
            };
        }
        elapsed
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f64 {
        if self.smoothed_ms > 0.0 {
            1000.0 / self.smoothed_ms
        } else {
            0.0
        }
    }
}

/// Decides how many simulation ticks a frame's elapsed time is worth.
#[derive(Debug)]
pub struct FixedStep {
    mode: StepMode,
    accumulator_ms: f64,
    total_ticks: u64,
}

impl FixedStep {
    pub fn new(mode: StepMode) -> Self {
        Self {
            mode,
            accumulator_ms: 0.0,
            total_ticks: 0,
        }
    }

    pub fn mode(&self) -> StepMode {
        self.mode
    }

    pub fn tick_ms(&self) -> Option<f64> {
        match self.mode {
            StepMode::Fixed { hz } => Some(1000.0 / hz.max(1) as f64),
            StepMode::PerFrame => None,
        }
    }

    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        let ticks = match self.tick_ms() {
            None => 1,
            Some(tick_ms) => {
                self.accumulator_ms += elapsed_ms.clamp(0.0, MAX_FRAME_MS);
                let mut ticks = 0;
                // The remainder may go slightly negative; the debt is repaid next frame.
                while self.accumulator_ms >= tick_ms - TICK_SLACK_MS {
                    self.accumulator_ms -= tick_ms;
                    ticks += 1;
                }
                ticks
            }
        };
        self.total_ticks += ticks as u64;
        ticks
    }

    /// Drops leftover time, e.g. when a run restarts.
    pub fn clear(&mut self) {
        self.accumulator_ms = 0.0;
    }

    pub fn pending_ms(&self) -> f64 {
        self.accumulator_ms
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }
}

struct LoopInner {
    running: Cell<bool>,
    handle: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl LoopInner {
    fn request(&self) -> Result<(), JsValue> {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return Ok(());
        };
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("missing window"))?;
        let id = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        self.handle.set(Some(id));
        Ok(())
    }
}

/// `requestAnimationFrame` loop that re-registers itself until stopped.
pub struct FrameLoop {
    inner: Rc<LoopInner>,
}

impl FrameLoop {
    pub fn new(mut on_frame: impl FnMut(f64) + 'static) -> Self {
        let inner = Rc::new(LoopInner {
            running: Cell::new(false),
            handle: Cell::new(None),
            callback: RefCell::new(None),
        });

        let weak: Weak<LoopInner> = Rc::downgrade(&inner);
        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.handle.set(None);
            if !inner.running.get() {
                return;
            }

            on_frame(timestamp);

            // `on_frame` may have stopped the loop.
            if inner.running.get() {
                if let Err(err) = inner.request() {
                    inner.running.set(false);
                    web_sys::console::error_1(&err);
                }
            }
        }) as Box<dyn FnMut(f64)>);
        *inner.callback.borrow_mut() = Some(callback);

        Self { inner }
    }

    /// Returns false if the loop was already running.
    pub fn start(&self) -> Result<bool, JsValue> {
        if self.inner.running.get() {
            return Ok(false);
        }
        self.inner.running.set(true);
        if let Err(err) = self.inner.request() {
            self.inner.running.set(false);
            return Err(err);
        }
        Ok(true)
    }

    /// Returns false if the loop was already stopped.
    pub fn stop(&self) -> bool {
        if !self.inner.running.replace(false) {
            return false;
        }
        if let Some(id) = self.inner.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        true
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}
