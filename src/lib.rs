//! Tilt Kick - a tabletop mini-soccer game on a tiltable board
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, collisions, scoring, confetti)
//! - `board`: Static board layout in board-local space
//! - `clock`: Hands frame driving between the page and an XR session
//! - `game`: A playing session around the simulation (messages, settings)
//! - `input`: Keyboard and XR thumbstick mapping
//! - `hud`: Score HUD layout and timed messages
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser bootstrap, WebXR input and the frame loop

pub mod board;
pub mod clock;
pub mod game;
pub mod hud;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// Lengths are in meters, board-local: X runs left/right, Z runs from the
/// goal (negative) toward the player (positive), Y is up from the field.
pub mod consts {
    use std::f32::consts::PI;

    /// Largest frame step the simulation accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Board root placement in front of the player
    pub const BOARD_ORIGIN: [f32; 3] = [0.0, 0.2, -2.0];
    /// Base tilt toward the player (radians about X)
    pub const BASE_TILT_X: f32 = -PI / 4.0;
    /// Extra tilt at full input (22.5 degrees)
    pub const MAX_EXTRA_TILT: f32 = PI / 8.0;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 1.5;
    pub const FIELD_HEIGHT: f32 = 4.0;

    /// Low borders around the field
    pub const WALL_HEIGHT: f32 = 0.08;
    pub const WALL_THICKNESS: f32 = 0.03;

    /// Painted lines sit just above the field to avoid z-fighting
    pub const LINE_LIFT: f32 = 0.002;
    pub const LINE_THICKNESS: f32 = 0.01;
    pub const PENALTY_BOX_WIDTH: f32 = 0.9;

    /// Goal strip at the far edge
    pub const GOAL_WIDTH: f32 = 0.8;
    pub const GOAL_DEPTH: f32 = 0.25;
    pub const GOAL_SLAB_HEIGHT: f32 = 0.02;

    /// Ball
    pub const BALL_RADIUS: f32 = 0.06;

    /// Striker
    pub const STRIKER_WIDTH: f32 = 0.35;
    pub const STRIKER_DEPTH: f32 = 0.07;
    pub const STRIKER_HEIGHT: f32 = 0.04;
    /// Distance of the striker spawn from the near edge
    pub const STRIKER_SPAWN_INSET: f32 = 0.6;
    pub const STRIKER_SPEED: f32 = 1.8;
    pub const STRIKER_MARGIN_X: f32 = 0.1;
    pub const STRIKER_MARGIN_Z: f32 = 0.3;
    /// Impulse added to the ball along the contact normal
    pub const STRIKER_HIT_STRENGTH: f32 = 6.0;

    /// Defenders
    pub const OBSTACLE_SIZE: [f32; 3] = [0.25, 0.05, 0.25];
    /// Rough collision radius for the square defender
    pub const OBSTACLE_RADIUS: f32 = 0.18;
    pub const OBSTACLE_SWING: f32 = 0.15;

    /// Rolling physics
    pub const TILT_ACCEL: f32 = 7.0;
    /// Velocity retained per frame
    pub const FRICTION: f32 = 0.96;
    /// Velocity factor on wall contact
    pub const WALL_RESTITUTION: f32 = -0.5;

    /// Outcome handling
    pub const OUTCOME_COOLDOWN: f32 = 0.8;
    /// Extra depth past the goal band that counts as the back zone
    pub const BACK_ZONE_SLACK: f32 = 0.02;
    pub const IDLE_SPEED_SQ: f32 = 0.001;
    pub const IDLE_RESET_AFTER: f32 = 3.0;

    /// Input
    pub const KEY_TILT_LERP: f32 = 0.12;
    pub const STICK_DEADZONE: f32 = 0.15;

    /// Confetti
    pub const CONFETTI_PER_GOAL: usize = 20;
    pub const CONFETTI_GRAVITY: f32 = 3.5;
    /// Hard cap regardless of settings
    pub const MAX_CONFETTI: usize = 200;
}

/// Clamp a dt measured between animation frames (milliseconds) into seconds
#[inline]
pub fn frame_dt(now_ms: f64, last_ms: f64) -> f32 {
    (((now_ms - last_ms) / 1000.0) as f32).clamp(0.0, consts::MAX_FRAME_DT)
}

/// Board-plane (x, z) part of a board-local position
#[inline]
pub fn plane(pos: glam::Vec3) -> Vec2 {
    Vec2::new(pos.x, pos.z)
}
