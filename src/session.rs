use crate::config::{Economy, GameConfig};
use crate::input::InputSnapshot;
use crate::player::Player;
use crate::scheduler::FixedStep;
use crate::screen::{Screen, Transition};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneId {
    #[default]
    MainRoom,
}

impl SceneId {
    pub fn name(self) -> &'static str {
        match self {
            SceneId::MainRoom => "main_room",
        }
    }
}

/// Everything one play session owns. Replaces page-level globals so sessions can be
/// created, reset and tested independently.
#[derive(Debug)]
pub struct Game {
    pub config: GameConfig,
    pub screen: Screen,
    pub scene: SceneId,
    pub player: Player,
    pub wallet: f64,
    pub atm_balance: f64,
    pub atm_max: f64,
    pub username: String,
    pub start_time_ms: Option<f64>,
    pub completion_time_ms: Option<f64>,
    stepper: FixedStep,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let Economy {
            wallet,
            atm_balance,
            atm_max,
        } = config.economy;

        Self {
            screen: Screen::Title,
            scene: SceneId::MainRoom,
            player: Player::new(&config.player, &config.world),
            wallet,
            atm_balance,
            atm_max,
            username: String::new(),
            start_time_ms: None,
            completion_time_ms: None,
            stepper: FixedStep::new(config.step),
            config,
        }
    }

    /// Pointer press anywhere on the canvas.
    pub fn pointer_down(&mut self, now_ms: f64) -> Transition {
        let transition = self.screen.advance();
        if transition == Transition::StartGame {
            self.start_time_ms = Some(now_ms);
            self.reset();
        }
        self.screen = transition.target();
        transition
    }

    /// Restores the run to its starting values. The screen is left alone.
    pub fn reset(&mut self) {
        self.wallet = self.config.economy.wallet;
        self.atm_balance = self.config.economy.atm_balance;
        self.player.reset(&self.config.player, &self.config.world);
        self.scene = SceneId::MainRoom;
        self.completion_time_ms = None;
        self.stepper.clear();
    }

    /// Advances the simulation by `elapsed_ms`. Returns the number of ticks run.
    pub fn update(&mut self, elapsed_ms: f64, input: InputSnapshot) -> u32 {
        if !self.screen.is_playing() {
            return 0;
        }

        let ticks = self.stepper.advance(elapsed_ms);
        for _ in 0..ticks {
            self.player.step(input, &self.config.world);
        }
        ticks
    }

    pub fn set_username(&mut self, name: &str) {
        self.username = name.trim().to_string();
    }

    /// Stores how long the run took. Returns None when no run has started.
    pub fn record_completion(&mut self, now_ms: f64) -> Option<f64> {
        let elapsed = (now_ms - self.start_time_ms?).max(0.0);
        self.completion_time_ms = Some(elapsed);
        Some(elapsed)
    }

    pub fn stepper(&self) -> &FixedStep {
        &self.stepper
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StepMode;

    const RIGHT: InputSnapshot = InputSnapshot {
        left: false,
        right: true,
        jump: false,
    };

    fn per_frame() -> Game {
        Game::new(GameConfig {
            step: StepMode::PerFrame,
            ..GameConfig::default()
        })
    }

    #[test]
    fn update_is_inert_outside_play() {
        let mut game = per_frame();
        let before = game.player.clone();
        assert_eq!(game.update(16.0, RIGHT), 0);
        game.pointer_down(0.0);
        assert_eq!(game.update(16.0, RIGHT), 0);
        assert_eq!(game.player, before);
    }

    #[test]
    fn start_game_resets_the_run() {
        let mut game = per_frame();
        game.pointer_down(10.0);
        game.wallet = 3.5;
        game.atm_balance = 12.0;
        game.player.x = 640.0;
        game.player.y = 20.0;

        assert_eq!(game.pointer_down(2_500.0), Transition::StartGame);
        assert_eq!(game.screen, Screen::Playing);
        assert_eq!(game.start_time_ms, Some(2_500.0));
        assert_eq!(game.wallet, 100.0);
        assert_eq!(game.atm_balance, 900.0);
        assert_eq!(game.atm_max, 900.0);
        assert_eq!(game.player.x, 100.0);
        assert_eq!(game.player.y, game.config.world.ground_level);
        assert_eq!(game.scene, SceneId::MainRoom);
    }

    #[test]
    fn presses_during_play_change_nothing() {
        let mut game = per_frame();
        game.pointer_down(0.0);
        game.pointer_down(100.0);
        game.update(16.0, RIGHT);
        let x = game.player.x;

        assert_eq!(game.pointer_down(900.0), Transition::Stay(Screen::Playing));
        assert_eq!(game.start_time_ms, Some(100.0));
        assert_eq!(game.player.x, x);
    }

    #[test]
    fn fixed_step_runs_ticks_by_elapsed_time() {
        let mut game = Game::new(GameConfig {
            step: StepMode::Fixed { hz: 50 },
            ..GameConfig::default()
        });
        game.pointer_down(0.0);
        game.pointer_down(0.0);

        assert_eq!(game.update(0.0, RIGHT), 0);
        assert_eq!(game.player.x, 100.0);
        assert_eq!(game.update(60.0, RIGHT), 3);
        assert_eq!(game.player.x, 115.0);
        assert_eq!(game.stepper().total_ticks(), 3);
    }

    #[test]
    fn username_is_trimmed() {
        let mut game = Game::default();
        game.set_username("  lumite \n");
        assert_eq!(game.username, "lumite");
    }

    #[test]
    fn completion_needs_a_started_run() {
        let mut game = Game::default();
        assert_eq!(game.record_completion(1_000.0), None);

        game.pointer_down(0.0);
        game.pointer_down(1_000.0);
        assert_eq!(game.record_completion(61_000.0), Some(60_000.0));
        assert_eq!(game.completion_time_ms, Some(60_000.0));
    }
}
