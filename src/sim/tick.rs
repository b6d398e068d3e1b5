//! Per-frame simulation step
//!
//! Advances the whole game by one display frame: input, tilt, striker,
//! rolling physics, defenders, collisions, scoring, idle reset and confetti.

use glam::Vec2;

use super::collision::{GoalBand, Shot, ball_bounds, bounce_off_walls, resolve_circle};
use super::confetti::{spawn_goal_confetti, update_confetti};
use super::state::{GameEvent, GameState, Outcome, Tilt};
use crate::consts::*;
use crate::input::{KeyState, Sticks, smooth_tilt};

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keys currently held
    pub keys: KeyState,
    /// XR thumbsticks, already dead-zone filtered; a stick overrides the keys
    pub sticks: Sticks,
}

/// Advance the game state by one frame of `dt` seconds
///
/// The caller clamps `dt` (see [`crate::frame_dt`]).
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time += dt;

    apply_tilt(state, input);
    move_striker(state, input, dt);
    roll_ball(state, dt);

    state.obstacle_time += dt;
    let t = state.obstacle_time;
    for obstacle in &mut state.obstacles {
        obstacle.update(t);
    }

    resolve_contacts(state);
    check_outcome(state);
    check_idle(state, dt);

    update_confetti(&mut state.confetti, dt);
}

fn apply_tilt(state: &mut GameState, input: &TickInput) {
    match input.sticks.tilt {
        // Stick forward (y = -1) tips like the up arrow
        Some(stick) => {
            state.tilt = Tilt {
                x: -stick.y,
                z: stick.x,
            }
        }
        None => smooth_tilt(&mut state.tilt, input.keys.tilt_target(), KEY_TILT_LERP),
    }
}

fn move_striker(state: &mut GameState, input: &TickInput, dt: f32) {
    // Stick y is negated onto the board's z axis
    let dir = match input.sticks.striker {
        Some(stick) => Vec2::new(stick.x, -stick.y),
        None => input.keys.striker_dir(),
    };
    state.striker.nudge(dir * STRIKER_SPEED * dt);
    state.striker.clamp_to_field();
}

fn roll_ball(state: &mut GameState, dt: f32) {
    let ball = &mut state.ball;

    // Gravity along the tilted surface, then rolling friction
    ball.vel += Vec2::new(state.tilt.z, state.tilt.x) * TILT_ACCEL * dt;
    ball.vel *= FRICTION;

    let mut pos = ball.plane_pos() + ball.vel * dt;
    bounce_off_walls(&mut pos, &mut ball.vel, ball_bounds(ball.radius));
    ball.set_plane_pos(pos);
    ball.pos.y = ball.radius;
}

fn resolve_contacts(state: &mut GameState) {
    let ball = &mut state.ball;
    let mut pos = ball.plane_pos();

    let striker_dist = state.striker.contact_distance(ball.radius);
    let hit = resolve_circle(&mut pos, &mut ball.vel, state.striker.plane_pos(), striker_dist);
    if hit.hit {
        ball.vel += hit.normal * STRIKER_HIT_STRENGTH;
        state.events.push(GameEvent::StrikerHit {
            speed: ball.vel.length(),
        });
    }

    for obstacle in &state.obstacles {
        resolve_circle(
            &mut pos,
            &mut ball.vel,
            obstacle.plane_pos(),
            ball.radius + OBSTACLE_RADIUS,
        );
    }

    ball.set_plane_pos(pos);
}

fn check_outcome(state: &mut GameState) {
    if !state.outcome_ready() {
        return;
    }

    let Some(shot) = GoalBand::default().classify(state.ball.plane_pos()) else {
        return;
    };

    state.last_outcome_time = Some(state.time);
    match shot {
        Shot::Goal => {
            state.scoreboard.record_goal();
            state.reset_round();
            spawn_goal_confetti(state);
        }
        Shot::Miss => {
            state.scoreboard.break_streak();
            state.reset_round();
        }
    }
    state.events.push(GameEvent::Outcome(shot.into()));
}

fn check_idle(state: &mut GameState, dt: f32) {
    if state.ball.speed_sq() >= IDLE_SPEED_SQ {
        state.idle_timer = 0.0;
        return;
    }

    state.idle_timer += dt;
    if state.idle_timer > IDLE_RESET_AFTER {
        state.idle_timer = 0.0;
        state.scoreboard.break_streak();
        state.reset_round();
        state.events.push(GameEvent::Outcome(Outcome::IdleReset));
    }
}
