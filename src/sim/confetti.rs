//! Goal confetti
//!
//! Purely cosmetic cubes that pop out of the goal, fall back and fade.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::state::{ConfettiPiece, GameState};
use crate::board::{colors, goal_center};
use crate::consts::*;

/// Burst a batch of confetti over the goal
pub fn spawn_goal_confetti(state: &mut GameState) {
    let goal = goal_center();
    let room = MAX_CONFETTI.saturating_sub(state.confetti.len());

    for i in 0..CONFETTI_PER_GOAL.min(room) {
        let rng = &mut state.rng;
        let size = 0.02 + rng.random::<f32>() * 0.03;
        let pos = Vec3::new(
            goal.x + (rng.random::<f32>() - 0.5) * 0.7,
            0.1 + rng.random::<f32>() * 0.25,
            goal.z + (rng.random::<f32>() - 0.5) * 0.3,
        );
        let vy = 1.3 + rng.random::<f32>() * 0.7;
        let life = 1.6 + rng.random::<f32>() * 0.6;
        let spin = Vec2::new(
            (rng.random::<f32>() - 0.5) * 6.0,
            (rng.random::<f32>() - 0.5) * 6.0,
        );

        state.confetti.push(ConfettiPiece {
            pos,
            size,
            vy,
            life,
            rotation: Vec2::ZERO,
            spin,
            color: i % colors::CONFETTI.len(),
            opacity: 1.0,
        });
    }
}

/// Advance every piece and drop the spent ones
pub fn update_confetti(pieces: &mut Vec<ConfettiPiece>, dt: f32) {
    for piece in pieces.iter_mut() {
        piece.vy -= CONFETTI_GRAVITY * dt;
        piece.pos.y += piece.vy * dt;
        piece.rotation += piece.spin * dt;
        piece.life -= dt;
        piece.opacity = (piece.life / 2.0).max(0.0);
    }
    pieces.retain(|p| p.life > 0.0 && p.pos.y >= 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_spawns_a_full_burst_near_the_goal() {
        let mut state = GameState::new(42);
        spawn_goal_confetti(&mut state);
        assert_eq!(state.confetti.len(), CONFETTI_PER_GOAL);

        let goal = goal_center();
        for (i, piece) in state.confetti.iter().enumerate() {
            assert!((piece.pos.x - goal.x).abs() <= 0.35);
            assert!((piece.pos.z - goal.z).abs() <= 0.15);
            assert!(piece.pos.y >= 0.1 && piece.pos.y <= 0.35);
            assert!(piece.vy >= 1.3 && piece.vy <= 2.0);
            assert!(piece.life >= 1.6 && piece.life <= 2.2);
            assert!(piece.size >= 0.02 && piece.size <= 0.05);
            assert_eq!(piece.color, i % 5);
        }
    }

    #[test]
    fn same_seed_same_burst() {
        let mut a = GameState::new(9);
        let mut b = GameState::new(9);
        spawn_goal_confetti(&mut a);
        spawn_goal_confetti(&mut b);
        for (p, q) in a.confetti.iter().zip(&b.confetti) {
            assert_eq!(p.pos, q.pos);
            assert_eq!(p.spin, q.spin);
        }
    }

    #[test]
    fn confetti_is_capped() {
        let mut state = GameState::new(3);
        for _ in 0..20 {
            spawn_goal_confetti(&mut state);
        }
        assert_eq!(state.confetti.len(), MAX_CONFETTI);
    }

    #[test]
    fn pieces_rise_fall_and_expire() {
        let mut state = GameState::new(5);
        spawn_goal_confetti(&mut state);
        let start_y = state.confetti[0].pos.y;

        update_confetti(&mut state.confetti, 0.05);
        assert!(state.confetti[0].pos.y > start_y);
        assert!(state.confetti[0].opacity <= 1.0);

        // Gravity brings everything down well within three seconds
        for _ in 0..60 {
            update_confetti(&mut state.confetti, 0.05);
        }
        assert!(state.confetti.is_empty());
    }

    #[test]
    fn opacity_tracks_remaining_life() {
        let mut pieces = vec![ConfettiPiece {
            pos: Vec3::new(0.0, 5.0, 0.0),
            size: 0.03,
            vy: 0.0,
            life: 1.0,
            rotation: Vec2::ZERO,
            spin: Vec2::new(1.0, -1.0),
            color: 0,
            opacity: 1.0,
        }];
        update_confetti(&mut pieces, 0.5);
        assert!((pieces[0].opacity - 0.25).abs() < 1e-6);
        assert!((pieces[0].rotation.x - 0.5).abs() < 1e-6);
        update_confetti(&mut pieces, 0.6);
        assert!(pieces.is_empty());
    }
}
