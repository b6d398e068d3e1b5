//! Frame assembly
//!
//! Turns the game state into one world-space triangle list. Opaque geometry
//! comes first and translucent confetti last so alpha blending layers over it.

use glam::{Mat4, Quat, Vec3};

use super::shapes::{cuboid, uv_sphere};
use super::vertex::Vertex;
use crate::board::{BoardLayout, board_transform, colors};
use crate::settings::Settings;
use crate::sim::GameState;

/// Build the vertices for one frame
pub fn build(state: &GameState, layout: &BoardLayout, settings: &Settings) -> Vec<Vertex> {
    let board = board_transform(&state.tilt, settings.visual_tilt());
    let mut out = Vec::with_capacity(2048);

    let place = |center: Vec3, size: Vec3| {
        board * Mat4::from_scale_rotation_translation(size, Quat::IDENTITY, center)
    };

    for piece in &layout.pieces {
        cuboid(&mut out, place(piece.center, piece.size), piece.color);
    }

    let (rings, segments) = settings.quality.sphere_detail();
    uv_sphere(
        &mut out,
        board * Mat4::from_translation(state.ball.pos),
        state.ball.radius,
        rings,
        segments,
        colors::BALL,
    );

    cuboid(&mut out, place(state.striker.pos, state.striker.size), colors::STRIKER);
    for obstacle in &state.obstacles {
        cuboid(&mut out, place(obstacle.pos, obstacle.size), colors::OBSTACLE);
    }

    for piece in state.confetti.iter().take(settings.max_confetti()) {
        let rotation =
            Quat::from_euler(glam::EulerRot::XYZ, piece.rotation.x, piece.rotation.y, 0.0);
        let model = board
            * Mat4::from_scale_rotation_translation(Vec3::splat(piece.size), rotation, piece.pos);
        let mut color = colors::CONFETTI[piece.color % colors::CONFETTI.len()];
        color[3] *= piece.opacity;
        cuboid(&mut out, model, color);
    }

    out
}
