//! Side-scrolling jump game
//!
//! Obstacles enter from the right and slide left; the player jumps over them.
//! Each obstacle cleared scores, each one touched costs a heart.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::session::Session;
use super::{Action, MiniGame, MiniGameKind};
use crate::consts::SIM_DT;

/// Upward velocity applied on jump (units/s)
pub const JUMP_VELOCITY: f32 = 7.0;
/// Downward acceleration (units/s²)
pub const GRAVITY: f32 = 20.0;
/// Leftward obstacle speed (units/s)
pub const OBSTACLE_SPEED: f32 = 5.0;
/// Obstacles spawn here...
pub const SPAWN_X: f32 = 10.0;
/// ...and are dropped once past here
pub const DESPAWN_X: f32 = -10.0;
/// Seconds between spawns, drawn uniformly from this range
pub const SPAWN_INTERVAL: (f32, f32) = (1.5, 3.0);
/// Obstacle height; the player clears it when airborne above this
pub const OBSTACLE_HEIGHT: f32 = 1.0;
/// Horizontal overlap distance between player and obstacle centers
pub const HIT_HALF_WIDTH: f32 = 0.75;
/// Points per obstacle cleared
pub const CLEAR_POINTS: u32 = 10;

#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub x: f32,
    hit: bool,
    cleared: bool,
}

pub struct Runner {
    session: Session,
    rng: Pcg32,
    /// Player height above ground (player x is fixed at 0)
    pub player_y: f32,
    vel_y: f32,
    pub obstacles: Vec<Obstacle>,
    spawn_timer: f32,
}

impl Runner {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawn_timer = rng.random_range(SPAWN_INTERVAL.0..SPAWN_INTERVAL.1);
        Self {
            session: Session::new(),
            rng,
            player_y: 0.0,
            vel_y: 0.0,
            obstacles: Vec::new(),
            spawn_timer,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.player_y <= 0.0 && self.vel_y <= 0.0
    }

    fn jump(&mut self) {
        if self.session.is_active() && self.is_grounded() {
            self.vel_y = JUMP_VELOCITY;
        }
    }

    fn step_player(&mut self, dt: f32) {
        if self.is_grounded() {
            return;
        }
        self.vel_y -= GRAVITY * dt;
        self.player_y += self.vel_y * dt;
        if self.player_y <= 0.0 {
            self.player_y = 0.0;
            self.vel_y = 0.0;
        }
    }

    fn step_obstacles(&mut self, dt: f32) {
        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            self.obstacles.push(Obstacle {
                x: SPAWN_X,
                hit: false,
                cleared: false,
            });
            self.spawn_timer += self.rng.random_range(SPAWN_INTERVAL.0..SPAWN_INTERVAL.1);
        }

        for obstacle in &mut self.obstacles {
            obstacle.x -= OBSTACLE_SPEED * dt;

            if obstacle.hit || obstacle.cleared {
                continue;
            }
            if obstacle.x.abs() < HIT_HALF_WIDTH && self.player_y < OBSTACLE_HEIGHT {
                obstacle.hit = true;
                if self.session.lose_heart() {
                    return;
                }
            } else if obstacle.x < -HIT_HALF_WIDTH {
                obstacle.cleared = true;
                self.session.add_score(CLEAR_POINTS);
            }
        }

        self.obstacles.retain(|o| o.x >= DESPAWN_X);
    }
}

impl MiniGame for Runner {
    fn kind(&self) -> MiniGameKind {
        MiniGameKind::Runner
    }

    fn on_start(&mut self) {
        self.session = Session::new();
    }

    fn handle(&mut self, action: Action) {
        if self.session.handle_common(action) {
            return;
        }
        if action == Action::Jump {
            self.jump();
        }
    }

    fn tick(&mut self, dt: f32) -> Option<u32> {
        // Substep so an obstacle never moves past the hit window in one step
        let mut remaining = dt;
        while remaining > 0.0 && self.session.is_active() {
            let step = remaining.min(SIM_DT);
            self.step_player(step);
            self.step_obstacles(step);
            remaining -= step;
        }
        self.session.take_final()
    }

    fn session(&self) -> &Session {
        &self.session
    }
}
