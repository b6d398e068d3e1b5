//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Frame dt is clamped by the caller
//! - Seeded RNG only (confetti)
//! - No rendering or browser dependencies

pub mod collision;
pub mod confetti;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionResult, GoalBand, Shot, bounce_off_walls, reflect_velocity, resolve_circle,
};
pub use confetti::{spawn_goal_confetti, update_confetti};
pub use state::{
    Ball, ConfettiPiece, GameEvent, GameState, Obstacle, Outcome, Scoreboard, Striker, Sweep, Tilt,
};
pub use tick::{TickInput, tick};
