//! Collision detection and response on the board plane
//!
//! Everything here is 2D (x, z): the ball rolls on the surface, so height
//! never matters for contact.

use glam::Vec2;

use super::state::Outcome;
use crate::consts::*;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit normal from the obstacle toward the ball
    pub normal: Vec2,
    /// Overlap removed by position correction
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Resolve a ball against a round obstacle
///
/// When the centers are closer than `min_dist`, the ball is pushed out along
/// the contact normal and its velocity is reflected if it was approaching.
/// Coincident centers have no usable normal and are ignored.
pub fn resolve_circle(
    ball_pos: &mut Vec2,
    ball_vel: &mut Vec2,
    obstacle_pos: Vec2,
    min_dist: f32,
) -> CollisionResult {
    let delta = *ball_pos - obstacle_pos;
    let dist = delta.length();

    if dist <= 0.0 || dist >= min_dist {
        return CollisionResult::miss();
    }

    let normal = delta / dist;
    let penetration = min_dist - dist;
    *ball_pos += normal * penetration;

    if ball_vel.dot(normal) < 0.0 {
        *ball_vel = reflect_velocity(*ball_vel, normal);
    }

    CollisionResult {
        hit: true,
        normal,
        penetration,
    }
}

/// Keep the ball inside the field, damping the velocity component that hit
///
/// Returns true if any edge was touched.
pub fn bounce_off_walls(pos: &mut Vec2, vel: &mut Vec2, half_extent: Vec2) -> bool {
    let mut touched = false;

    if pos.x > half_extent.x {
        pos.x = half_extent.x;
        vel.x *= WALL_RESTITUTION;
        touched = true;
    } else if pos.x < -half_extent.x {
        pos.x = -half_extent.x;
        vel.x *= WALL_RESTITUTION;
        touched = true;
    }

    if pos.y > half_extent.y {
        pos.y = half_extent.y;
        vel.y *= WALL_RESTITUTION;
        touched = true;
    } else if pos.y < -half_extent.y {
        pos.y = -half_extent.y;
        vel.y *= WALL_RESTITUTION;
        touched = true;
    }

    touched
}

/// Field half extents available to the ball center
pub fn ball_bounds(ball_radius: f32) -> Vec2 {
    Vec2::new(
        FIELD_WIDTH / 2.0 - ball_radius,
        FIELD_HEIGHT / 2.0 - ball_radius,
    )
}

/// Where a ball that reached the back zone ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shot {
    Goal,
    Miss,
}

impl From<Shot> for Outcome {
    fn from(shot: Shot) -> Self {
        match shot {
            Shot::Goal => Outcome::Goal,
            Shot::Miss => Outcome::Miss,
        }
    }
}

/// The scoring region at the far edge of the field
#[derive(Debug, Clone, Copy)]
pub struct GoalBand {
    pub z_min: f32,
    pub z_max: f32,
    pub half_x: f32,
}

impl Default for GoalBand {
    fn default() -> Self {
        Self {
            z_min: -FIELD_HEIGHT / 2.0,
            z_max: -FIELD_HEIGHT / 2.0 + GOAL_DEPTH,
            half_x: GOAL_WIDTH / 2.0,
        }
    }
}

impl GoalBand {
    /// Where the back zone starts; nothing is decided nearer than this
    pub fn back_zone(&self) -> f32 {
        self.z_max + BACK_ZONE_SLACK
    }

    /// Decide whether a ball at `pos` scored, missed, or is still in play
    pub fn classify(&self, pos: Vec2) -> Option<Shot> {
        if pos.y > self.back_zone() {
            return None;
        }

        let in_band = pos.y >= self.z_min && pos.y <= self.z_max;
        let in_x = pos.x.abs() <= self.half_x;

        if in_band && in_x {
            Some(Shot::Goal)
        } else if !in_x {
            Some(Shot::Miss)
        } else {
            None
        }
    }
}
