use crate::geometry::Rect;

pub const WORLD_WIDTH: f64 = 1000.0;
pub const WORLD_HEIGHT: f64 = 500.0;
// Floor line measured from the bottom of the main background art.
pub const GROUND_OFFSET: f64 = 116.75;

pub const DEFAULT_TICK_HZ: u32 = 60;
const MIN_TICK_HZ: u32 = 15;
const MAX_TICK_HZ: u32 = 240;
pub const MAX_FRAME_MS: f64 = 250.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct World {
    pub width: f64,
    pub height: f64,
    pub ground_level: f64,
}

impl World {
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            ground_level: WORLD_HEIGHT - GROUND_OFFSET,
        }
    }
}

/// Player tunables. Velocities and gravity are per simulation tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerTuning {
    pub spawn_x: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
    pub jump_impulse: f64,
    pub gravity: f64,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            spawn_x: 100.0,
            width: 50.0,
            height: 80.0,
            speed: 5.0,
            jump_impulse: 15.0,
            gravity: 1.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Economy {
    pub wallet: f64,
    pub atm_balance: f64,
    pub atm_max: f64,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            wallet: 100.0,
            atm_balance: 900.0,
            atm_max: 900.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepMode {
    /// Whole ticks of `1000 / hz` ms drawn from an accumulator.
    Fixed { hz: u32 },
    /// One tick per animation frame regardless of elapsed time.
    PerFrame,
}

impl StepMode {
    pub fn name(&self) -> String {
        match self {
            StepMode::Fixed { hz } => format!("fixed {}Hz", hz),
            StepMode::PerFrame => "per_frame".to_string(),
        }
    }
}

impl Default for StepMode {
    fn default() -> Self {
        StepMode::Fixed {
            hz: DEFAULT_TICK_HZ,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GameConfig {
    pub world: World,
    pub player: PlayerTuning,
    pub economy: Economy,
    pub step: StepMode,
    pub show_diagnostics: bool,
}

impl GameConfig {
    /// Applies `location.search` flags on top of the defaults.
    ///
    /// Recognised: `step=frame`, `tick_hz=<n>`, `diag=1`. Anything else is ignored.
    pub fn from_query(search: &str) -> Self {
        let mut config = Self::default();
        let mut tick_hz = None;
        let mut per_frame = false;

        for pair in search.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "step" => per_frame = value == "frame",
                "tick_hz" => {
                    if let Ok(hz) = value.parse::<u32>() {
                        tick_hz = Some(hz.clamp(MIN_TICK_HZ, MAX_TICK_HZ));
                    }
                }
                "diag" => config.show_diagnostics = value == "1" || value == "true",
                _ => {}
            }
        }

        config.step = if per_frame {
            StepMode::PerFrame
        } else {
            StepMode::Fixed {
                hz: tick_hz.unwrap_or(DEFAULT_TICK_HZ),
            }
        };
        config
    }
}
