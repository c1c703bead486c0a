use crate::config::{PlayerTuning, World};
use crate::geometry::Rect;
use crate::input::InputSnapshot;

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub vx: f64,
    pub vy: f64,
    pub speed: f64,
    pub jump_impulse: f64,
    pub gravity: f64,
    pub jumping: bool,
    pub facing_right: bool,
}

impl Player {
    pub fn new(tuning: &PlayerTuning, world: &World) -> Self {
        Self {
            x: tuning.spawn_x,
            y: world.ground_level,
            w: tuning.width,
            h: tuning.height,
            vx: 0.0,
            vy: 0.0,
            speed: tuning.speed,
            jump_impulse: tuning.jump_impulse,
            gravity: tuning.gravity,
            jumping: false,
            facing_right: true,
        }
    }

    /// Back to the spawn point on the ground, at rest.
    pub fn reset(&mut self, tuning: &PlayerTuning, world: &World) {
        *self = Self::new(tuning, world);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn on_ground(&self, world: &World) -> bool {
        self.y >= world.ground_level && !self.jumping
    }

    /// One simulation tick. Velocities are in canvas units per tick.
    pub fn step(&mut self, input: InputSnapshot, world: &World) {
        self.vx = 0.0;

        if input.left {
            self.vx = -self.speed;
            self.facing_right = false;
        }
        // Evaluated after left so right wins when both are held.
        if input.right {
            self.vx = self.speed;
            self.facing_right = true;
        }
        if input.jump && !self.jumping {
            self.vy = -self.jump_impulse;
            self.jumping = true;
        }

        self.vy += self.gravity;
        self.x += self.vx;
        self.y += self.vy;

        if self.y >= world.ground_level {
            self.y = world.ground_level;
            self.vy = 0.0;
            self.jumping = false;
        }

        self.x = self.x.clamp(0.0, (world.width - self.w).max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: InputSnapshot = InputSnapshot {
        left: false,
        right: false,
        jump: false,
    };
    const JUMP: InputSnapshot = InputSnapshot {
        left: false,
        right: false,
        jump: true,
    };

    fn spawn() -> (Player, World) {
        let world = World::default();
        (Player::new(&PlayerTuning::default(), &world), world)
    }

    #[test]
    fn spawns_on_the_ground_facing_right() {
        let (player, world) = spawn();
        assert_eq!((player.x, player.y), (100.0, world.ground_level));
        assert!(player.facing_right);
        assert!(!player.jumping);
        assert!(player.on_ground(&world));
    }

    #[test]
    fn both_directions_held_resolves_to_right() {
        let (mut player, world) = spawn();
        player.facing_right = false;
        player.step(
            InputSnapshot {
                left: true,
                right: true,
                jump: false,
            },
            &world,
        );
        assert!(player.facing_right);
        assert_eq!(player.vx, player.speed);
        assert_eq!(player.x, 105.0);
    }

    #[test]
    fn left_moves_and_turns() {
        let (mut player, world) = spawn();
        player.step(
            InputSnapshot {
                left: true,
                right: false,
                jump: false,
            },
            &world,
        );
        assert!(!player.facing_right);
        assert_eq!(player.vx, -5.0);
        assert_eq!(player.x, 95.0);
    }

    #[test]
    fn horizontal_position_is_clamped_to_the_world() {
        let (mut player, world) = spawn();
        let left = InputSnapshot {
            left: true,
            right: false,
            jump: false,
        };
        let right = InputSnapshot {
            left: false,
            right: true,
            jump: false,
        };

        for start in [-500.0, -0.5, 0.0, 3.0, 947.0, 950.0, 951.0, 5000.0] {
            for input in [IDLE, left, right] {
                player.x = start;
                player.step(input, &world);
                assert!(player.x >= 0.0, "x={} from {}", player.x, start);
                assert!(player.x <= world.width - player.w, "x={} from {}", player.x, start);
            }
        }

        player.x = 0.0;
        for _ in 0..10 {
            player.step(left, &world);
        }
        assert_eq!(player.x, 0.0);
    }

    #[test]
    fn gravity_accelerates_until_landing() {
        let (mut player, world) = spawn();
        player.step(JUMP, &world);
        assert!(player.jumping);
        assert_eq!(player.vy, -15.0 + 1.5);

        let mut previous = player.vy;
        let mut ticks = 0;
        while player.jumping {
            player.step(IDLE, &world);
            if player.jumping {
                assert!(player.vy > previous, "vy {} after {}", player.vy, previous);
                previous = player.vy;
            }
            ticks += 1;
            assert!(ticks < 100, "never landed");
        }
        assert_eq!(player.y, world.ground_level);
        assert_eq!(player.vy, 0.0);
    }

    #[test]
    fn resting_on_the_ground_is_stable() {
        let (mut player, world) = spawn();
        for _ in 0..5 {
            player.step(IDLE, &world);
            assert_eq!(player.y, world.ground_level);
            assert_eq!(player.vy, 0.0);
            assert!(!player.jumping);
        }
    }

    #[test]
    fn holding_jump_in_the_air_does_not_add_impulse() {
        let (mut player, world) = spawn();
        player.step(JUMP, &world);
        let first_vy = player.vy;

        for _ in 0..5 {
            let before = player.vy;
            player.step(JUMP, &world);
            assert!(player.jumping);
            assert_eq!(player.vy, before + player.gravity);
        }
        assert!(player.vy > first_vy);
        assert!(player.y < world.ground_level);
    }

    #[test]
    fn apex_height_matches_the_tuning() {
        let (mut player, world) = spawn();
        player.step(JUMP, &world);
        let mut highest = player.y;
        while player.jumping {
            player.step(IDLE, &world);
            highest = highest.min(player.y);
        }
        // Sum of (15 - 1.5k) over the rising ticks.
        assert_eq!(world.ground_level - highest, 67.5);
    }

    #[test]
    fn reset_restores_spawn_state() {
        let (mut player, world) = spawn();
        player.step(
            InputSnapshot {
                left: true,
                right: false,
                jump: true,
            },
            &world,
        );
        player.reset(&PlayerTuning::default(), &world);
        assert_eq!(player, Player::new(&PlayerTuning::default(), &world));
    }
}
