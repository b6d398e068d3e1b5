//! Static board layout
//!
//! Every piece of the board that never moves, described as an axis-aligned
//! box in board-local space. The renderer tessellates these once per frame;
//! the simulation only needs the derived bounds.

use glam::{Mat4, Quat, Vec3};

use crate::consts::*;
use crate::sim::Tilt;

/// What a static piece is (drives color and tests)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Field,
    Wall,
    Line,
    Goal,
}

/// One static box on the board
#[derive(Debug, Clone, Copy)]
pub struct BoardPiece {
    pub kind: PieceKind,
    pub center: Vec3,
    /// Full extents (width, height, depth)
    pub size: Vec3,
    pub color: [f32; 4],
}

impl BoardPiece {
    fn new(kind: PieceKind, center: Vec3, size: Vec3) -> Self {
        Self {
            kind,
            center,
            size,
            color: colors::for_piece(kind),
        }
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        self.center - self.size / 2.0
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        self.center + self.size / 2.0
    }
}

/// Colors for board and game elements (sRGB, the shader linearizes)
pub mod colors {
    use super::PieceKind;

    pub const FIELD: [f32; 4] = [0.043, 0.4, 0.137, 1.0]; // #0b6623
    pub const WALL: [f32; 4] = [0.133, 0.133, 0.133, 1.0]; // #222222
    pub const LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const GOAL: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const STRIKER: [f32; 4] = [1.0, 0.2, 0.2, 1.0]; // #ff3333
    pub const OBSTACLE: [f32; 4] = [0.2, 0.2, 0.2, 1.0]; // #333333

    /// Confetti palette, cycled by piece index
    pub const CONFETTI: [[f32; 4]; 5] = [
        [1.0, 0.267, 0.267, 1.0],   // #ff4444
        [1.0, 0.733, 0.2, 1.0],     // #ffbb33
        [0.0, 0.784, 0.318, 1.0],   // #00C851
        [0.2, 0.71, 0.898, 1.0],    // #33b5e5
        [0.667, 0.4, 0.8, 1.0],     // #aa66cc
    ];

    pub fn for_piece(kind: PieceKind) -> [f32; 4] {
        match kind {
            PieceKind::Field => FIELD,
            PieceKind::Wall => WALL,
            PieceKind::Line => LINE,
            PieceKind::Goal => GOAL,
        }
    }
}

/// The full static board
#[derive(Debug, Clone)]
pub struct BoardLayout {
    pub pieces: Vec<BoardPiece>,
}

impl BoardLayout {
    /// Field, walls, markings and goal of the standard board
    pub fn standard() -> Self {
        let half_w = FIELD_WIDTH / 2.0;
        let half_h = FIELD_HEIGHT / 2.0;
        let mut pieces = Vec::with_capacity(9);

        // Field is a flat slab whose top face is y = 0
        pieces.push(BoardPiece::new(
            PieceKind::Field,
            Vec3::new(0.0, -0.005, 0.0),
            Vec3::new(FIELD_WIDTH, 0.01, FIELD_HEIGHT),
        ));

        // Back, left and right walls; the near edge stays open
        pieces.push(BoardPiece::new(
            PieceKind::Wall,
            Vec3::new(0.0, WALL_HEIGHT / 2.0, -half_h - WALL_THICKNESS / 2.0),
            Vec3::new(FIELD_WIDTH, WALL_HEIGHT, WALL_THICKNESS),
        ));
        for side in [-1.0, 1.0] {
            pieces.push(BoardPiece::new(
                PieceKind::Wall,
                Vec3::new(side * (half_w + WALL_THICKNESS / 2.0), WALL_HEIGHT / 2.0, 0.0),
                Vec3::new(WALL_THICKNESS, WALL_HEIGHT, FIELD_HEIGHT),
            ));
        }

        // Center line
        pieces.push(line(0.0, 0.0, FIELD_WIDTH * 0.9, LINE_THICKNESS));

        // Penalty box in front of the goal
        let box_z = -FIELD_HEIGHT / 4.0;
        let side_len = FIELD_HEIGHT / 4.0;
        pieces.push(line(0.0, box_z, PENALTY_BOX_WIDTH, LINE_THICKNESS));
        for side in [-1.0, 1.0] {
            pieces.push(line(
                side * PENALTY_BOX_WIDTH / 2.0,
                box_z - side_len / 2.0,
                LINE_THICKNESS,
                side_len,
            ));
        }

        pieces.push(BoardPiece::new(
            PieceKind::Goal,
            goal_center(),
            Vec3::new(GOAL_WIDTH, GOAL_SLAB_HEIGHT, GOAL_DEPTH),
        ));

        Self { pieces }
    }

    pub fn of_kind(&self, kind: PieceKind) -> impl Iterator<Item = &BoardPiece> {
        self.pieces.iter().filter(move |p| p.kind == kind)
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::standard()
    }
}

fn line(x: f32, z: f32, width: f32, depth: f32) -> BoardPiece {
    BoardPiece::new(
        PieceKind::Line,
        Vec3::new(x, LINE_LIFT, z),
        Vec3::new(width, 0.001, depth),
    )
}

/// Center of the goal slab (also the confetti origin)
pub fn goal_center() -> Vec3 {
    Vec3::new(0.0, GOAL_SLAB_HEIGHT / 2.0, -FIELD_HEIGHT / 2.0 + GOAL_DEPTH / 2.0)
}

/// Model matrix of the board root for the given tilt
///
/// `visual_tilt` scales the extra tilt (0 keeps the board at its base angle).
pub fn board_transform(tilt: &Tilt, visual_tilt: f32) -> Mat4 {
    let rx = BASE_TILT_X + tilt.x * MAX_EXTRA_TILT * visual_tilt;
    let rz = tilt.z * MAX_EXTRA_TILT * visual_tilt;
    // Euler XYZ with Y = 0, matching an object rotation of (rx, 0, rz)
    let rotation = Quat::from_euler(glam::EulerRot::XYZ, rx, 0.0, rz);
    Mat4::from_rotation_translation(rotation, Vec3::from(BOARD_ORIGIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_board_has_every_piece() {
        let board = BoardLayout::standard();
        assert_eq!(board.of_kind(PieceKind::Field).count(), 1);
        assert_eq!(board.of_kind(PieceKind::Wall).count(), 3);
        assert_eq!(board.of_kind(PieceKind::Line).count(), 4);
        assert_eq!(board.of_kind(PieceKind::Goal).count(), 1);
    }

    #[test]
    fn goal_sits_inside_field() {
        let board = BoardLayout::standard();
        let field = board.of_kind(PieceKind::Field).next().unwrap();
        let goal = board.of_kind(PieceKind::Goal).next().unwrap();
        assert!(goal.min().x >= field.min().x && goal.max().x <= field.max().x);
        assert!(goal.min().z >= field.min().z - 1e-6);
        assert!((goal.min().z - (-FIELD_HEIGHT / 2.0)).abs() < 1e-6);
    }

    #[test]
    fn side_walls_hug_field_edges() {
        let board = BoardLayout::standard();
        for wall in board.of_kind(PieceKind::Wall).filter(|w| w.size.z > 1.0) {
            let inner = if wall.center.x < 0.0 { wall.max().x } else { wall.min().x };
            assert!((inner.abs() - FIELD_WIDTH / 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn untilted_board_uses_base_angle() {
        let m = board_transform(&Tilt::default(), 1.0);
        let up = m.transform_vector3(Vec3::Y);
        // Base tilt leans the board 45 degrees toward the viewer
        assert!((up.y - BASE_TILT_X.cos()).abs() < 1e-5);
        assert!((m.w_axis.truncate() - Vec3::from(BOARD_ORIGIN)).length() < 1e-6);
    }

    #[test]
    fn visual_tilt_zero_ignores_input() {
        let tilt = Tilt { x: 1.0, z: -1.0 };
        let a = board_transform(&tilt, 0.0);
        let b = board_transform(&Tilt::default(), 1.0);
        assert!(a.abs_diff_eq(b, 1e-6));
    }
}
