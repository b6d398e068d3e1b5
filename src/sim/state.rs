//! Game state and core simulation types
//!
//! Nothing here survives a page reload; the whole state is rebuilt from a seed.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Normalized extra tilt of the board, each axis in [-1, 1]
///
/// Positive `x` rolls the ball toward the player (+Z), positive `z` rolls it
/// to the right (+X).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tilt {
    pub x: f32,
    pub z: f32,
}

/// The rolling ball
#[derive(Debug, Clone)]
pub struct Ball {
    /// Board-local position; y stays pinned to the radius
    pub pos: Vec3,
    /// Velocity on the board plane (x, z)
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Spawn point: near-left corner, two radii in from the edges
    pub fn spawn_position() -> Vec3 {
        Vec3::new(
            -FIELD_WIDTH / 2.0 + BALL_RADIUS * 2.0,
            BALL_RADIUS,
            FIELD_HEIGHT / 2.0 - BALL_RADIUS * 2.0,
        )
    }

    pub fn new() -> Self {
        Self {
            pos: Self::spawn_position(),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        }
    }

    /// Back to the spawn point, at rest
    pub fn reset(&mut self) {
        self.pos = Self::spawn_position();
        self.vel = Vec2::ZERO;
    }

    pub fn speed_sq(&self) -> f32 {
        self.vel.length_squared()
    }

    /// Position on the board plane
    pub fn plane_pos(&self) -> Vec2 {
        crate::plane(self.pos)
    }

    pub fn set_plane_pos(&mut self, p: Vec2) {
        self.pos.x = p.x;
        self.pos.z = p.y;
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// The player's striker
#[derive(Debug, Clone)]
pub struct Striker {
    pub pos: Vec3,
    pub size: Vec3,
}

impl Default for Striker {
    fn default() -> Self {
        Self {
            pos: Self::spawn_position(),
            size: Vec3::new(STRIKER_WIDTH, STRIKER_HEIGHT, STRIKER_DEPTH),
        }
    }
}

impl Striker {
    pub fn spawn_position() -> Vec3 {
        Vec3::new(0.0, STRIKER_HEIGHT / 2.0, FIELD_HEIGHT / 2.0 - STRIKER_SPAWN_INSET)
    }

    pub fn reset(&mut self) {
        self.pos = Self::spawn_position();
    }

    pub fn half_width(&self) -> f32 {
        self.size.x / 2.0
    }

    pub fn half_depth(&self) -> f32 {
        self.size.z / 2.0
    }

    /// Playable region for the striker center: (min, max) on the board plane
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let min = Vec2::new(-FIELD_WIDTH / 2.0 + self.half_width() + STRIKER_MARGIN_X, 0.0);
        let max = Vec2::new(
            FIELD_WIDTH / 2.0 - self.half_width() - STRIKER_MARGIN_X,
            FIELD_HEIGHT / 2.0 - self.half_depth() - STRIKER_MARGIN_Z,
        );
        (min, max)
    }

    /// Move by a board-plane delta (no clamping)
    pub fn nudge(&mut self, delta: Vec2) {
        self.pos.x += delta.x;
        self.pos.z += delta.y;
    }

    /// Keep the striker in the near half of the field, inside the side margins
    pub fn clamp_to_field(&mut self) {
        let (min, max) = self.bounds();
        self.pos.x = self.pos.x.clamp(min.x, max.x);
        self.pos.z = self.pos.z.clamp(min.y, max.y);
        self.pos.y = self.size.y / 2.0;
    }

    pub fn plane_pos(&self) -> Vec2 {
        crate::plane(self.pos)
    }

    /// Collision radius used against the ball
    pub fn contact_distance(&self, ball_radius: f32) -> f32 {
        ball_radius + self.half_width().max(self.half_depth()) * 0.9
    }
}

/// How a defender sweeps across the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    Sine,
    Cosine,
}

/// An oscillating defender
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Rest position on the board plane
    pub base: Vec2,
    pub pos: Vec3,
    pub size: Vec3,
    pub sweep: Sweep,
    /// Angular frequency (rad/s)
    pub frequency: f32,
    pub amplitude: f32,
}

impl Obstacle {
    pub fn new(base: Vec2, sweep: Sweep, frequency: f32) -> Self {
        let size = Vec3::from(OBSTACLE_SIZE);
        Self {
            base,
            pos: Vec3::new(base.x, size.y / 2.0, base.y),
            size,
            sweep,
            frequency,
            amplitude: OBSTACLE_SWING,
        }
    }

    /// The two standard defenders
    pub fn defenders() -> [Obstacle; 2] {
        [
            Obstacle::new(Vec2::new(-0.35, 0.0), Sweep::Sine, 0.8),
            Obstacle::new(Vec2::new(0.35, -0.4), Sweep::Cosine, 0.7),
        ]
    }

    /// Place the defender for elapsed obstacle time `t`
    pub fn update(&mut self, t: f32) {
        let phase = t * self.frequency;
        let offset = match self.sweep {
            Sweep::Sine => phase.sin(),
            Sweep::Cosine => phase.cos(),
        };
        self.pos.x = self.base.x + offset * self.amplitude;
    }

    pub fn plane_pos(&self) -> Vec2 {
        crate::plane(self.pos)
    }
}

/// Score counters for the current page session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub best_score: u32,
    pub streak: u32,
}

impl Scoreboard {
    pub fn record_goal(&mut self) {
        self.score += 1;
        self.streak += 1;
        self.best_score = self.best_score.max(self.score);
    }

    /// A miss or an idle reset breaks the streak but keeps the score
    pub fn break_streak(&mut self) {
        self.streak = 0;
    }
}

/// A single confetti cube
#[derive(Debug, Clone)]
pub struct ConfettiPiece {
    pub pos: Vec3,
    /// Edge length of the cube
    pub size: f32,
    pub vy: f32,
    /// Seconds left
    pub life: f32,
    /// Current rotation about X and Y
    pub rotation: Vec2,
    /// Spin rates about X and Y (rad/s)
    pub spin: Vec2,
    /// Index into the confetti palette
    pub color: usize,
    pub opacity: f32,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Ball entered the goal band
    Goal,
    /// Ball reached the back zone outside the goal
    Miss,
    /// Ball sat still too long
    IdleReset,
}

/// Notable things that happened during a tick, for the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Outcome(Outcome),
    StrikerHit { speed: f32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng: Pcg32,
    pub tilt: Tilt,
    pub ball: Ball,
    pub striker: Striker,
    pub obstacles: [Obstacle; 2],
    pub scoreboard: Scoreboard,
    pub confetti: Vec<ConfettiPiece>,
    /// Simulation clock (seconds)
    pub time: f32,
    /// Clock driving the defenders
    pub obstacle_time: f32,
    /// Sim time of the last goal or miss; None before the first one
    pub last_outcome_time: Option<f32>,
    /// Seconds the ball has been nearly still
    pub idle_timer: f32,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        let mut obstacles = Obstacle::defenders();
        for obstacle in &mut obstacles {
            obstacle.update(0.0);
        }
        Self {
            rng: Pcg32::seed_from_u64(seed),
            tilt: Tilt::default(),
            ball: Ball::new(),
            striker: Striker::default(),
            obstacles,
            scoreboard: Scoreboard::default(),
            confetti: Vec::new(),
            time: 0.0,
            obstacle_time: 0.0,
            last_outcome_time: None,
            idle_timer: 0.0,
            events: Vec::new(),
        }
    }

    /// Put ball and striker back at their spawn points
    pub fn reset_round(&mut self) {
        self.ball.reset();
        self.striker.reset();
    }

    /// Whether a goal or miss may be counted right now
    pub fn outcome_ready(&self) -> bool {
        self.last_outcome_time
            .is_none_or(|t| self.time - t >= OUTCOME_COOLDOWN)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_starts_at_spawn() {
        let state = GameState::new(7);
        assert_eq!(state.ball.pos, Ball::spawn_position());
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.striker.pos, Striker::spawn_position());
        assert_eq!(state.scoreboard, Scoreboard::default());
        assert!(state.confetti.is_empty());
        assert!(state.outcome_ready());
    }

    #[test]
    fn ball_rests_on_surface_at_spawn() {
        let p = Ball::spawn_position();
        assert!((p.y - BALL_RADIUS).abs() < 1e-6);
        assert!((p.x - (-0.63)).abs() < 1e-5);
        assert!((p.z - 1.88).abs() < 1e-5);
    }

    #[test]
    fn goal_raises_best_score() {
        let mut board = Scoreboard::default();
        board.record_goal();
        board.record_goal();
        assert_eq!((board.score, board.streak, board.best_score), (2, 2, 2));
        board.break_streak();
        assert_eq!((board.score, board.streak, board.best_score), (2, 0, 2));
        board.record_goal();
        assert_eq!((board.score, board.streak, board.best_score), (3, 1, 3));
    }

    #[test]
    fn striker_clamped_to_near_half() {
        let mut striker = Striker::default();
        striker.nudge(Vec2::new(-5.0, -5.0));
        striker.clamp_to_field();
        let (min, _) = striker.bounds();
        assert_eq!(striker.pos.x, min.x);
        assert_eq!(striker.pos.z, 0.0);

        striker.nudge(Vec2::new(10.0, 10.0));
        striker.clamp_to_field();
        let (_, max) = striker.bounds();
        assert!((max.x - 0.475).abs() < 1e-5);
        assert!((max.y - 1.665).abs() < 1e-5);
        assert_eq!(striker.pos.x, max.x);
        assert_eq!(striker.pos.z, max.y);
        assert!((striker.pos.y - STRIKER_HEIGHT / 2.0).abs() < 1e-6);
    }

    #[test]
    fn defenders_oscillate_around_base() {
        let [mut a, mut b] = Obstacle::defenders();
        a.update(0.0);
        b.update(0.0);
        assert!((a.pos.x - -0.35).abs() < 1e-6);
        assert!((b.pos.x - 0.5).abs() < 1e-6);

        let t = std::f32::consts::FRAC_PI_2 / 0.8;
        a.update(t);
        assert!((a.pos.x - -0.2).abs() < 1e-5);
        assert!((a.pos.z - 0.0).abs() < 1e-6);
        assert!((b.pos.z - -0.4).abs() < 1e-6);
    }

    #[test]
    fn cooldown_blocks_back_to_back_outcomes() {
        let mut state = GameState::new(1);
        state.time = 10.0;
        state.last_outcome_time = Some(9.5);
        assert!(!state.outcome_ready());
        state.time = 10.3;
        assert!(state.outcome_ready());
    }
}
