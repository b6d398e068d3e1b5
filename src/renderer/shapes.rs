//! Triangle-list mesh generation
//!
//! Meshes are emitted straight into a frame's vertex list, already
//! transformed by a model matrix, so the whole scene is one draw call.

use glam::{Mat3, Mat4, Vec3};
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Face normals and their corner offsets (counter-clockwise from outside)
const CUBE_FACES: [(Vec3, [Vec3; 4]); 6] = [
    (
        Vec3::X,
        [
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.5, 0.5, -0.5),
            Vec3::new(0.5, 0.5, 0.5),
        ],
    ),
    (
        Vec3::NEG_X,
        [
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(-0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, -0.5),
        ],
    ),
    (
        Vec3::Y,
        [
            Vec3::new(-0.5, 0.5, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(0.5, 0.5, -0.5),
            Vec3::new(-0.5, 0.5, -0.5),
        ],
    ),
    (
        Vec3::NEG_Y,
        [
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(-0.5, -0.5, 0.5),
        ],
    ),
    (
        Vec3::Z,
        [
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, 0.5),
        ],
    ),
    (
        Vec3::NEG_Z,
        [
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(-0.5, 0.5, -0.5),
            Vec3::new(0.5, 0.5, -0.5),
        ],
    ),
];

/// Vertices emitted per cuboid
pub const CUBOID_VERTICES: usize = 36;

/// Matrix that carries normals through `model`
fn normal_matrix(model: &Mat4) -> Mat3 {
    Mat3::from_mat4(*model).inverse().transpose()
}

fn emit(out: &mut Vec<Vertex>, model: &Mat4, normals: &Mat3, p: Vec3, n: Vec3, color: [f32; 4]) {
    let position = model.transform_point3(p);
    let normal = (*normals * n).normalize_or_zero();
    out.push(Vertex::new(position.into(), normal.into(), color));
}

/// Unit cube centered at the origin, placed by `model`
///
/// Put the box size into the model's scale.
pub fn cuboid(out: &mut Vec<Vertex>, model: Mat4, color: [f32; 4]) {
    let normals = normal_matrix(&model);
    out.reserve(CUBOID_VERTICES);
    for (normal, [a, b, c, d]) in CUBE_FACES {
        for corner in [a, b, c, a, c, d] {
            emit(out, &model, &normals, corner, normal, color);
        }
    }
}

/// Vertices emitted per sphere of the given detail
pub fn uv_sphere_vertex_count(rings: u32, segments: u32) -> usize {
    (rings * segments * 6) as usize
}

/// Sphere of `radius` centered at the origin, placed by `model`
pub fn uv_sphere(
    out: &mut Vec<Vertex>,
    model: Mat4,
    radius: f32,
    rings: u32,
    segments: u32,
    color: [f32; 4],
) {
    let rings = rings.max(2);
    let segments = segments.max(3);
    let normals = normal_matrix(&model);

    let point = |ring: u32, seg: u32| {
        let theta = PI * ring as f32 / rings as f32;
        let phi = 2.0 * PI * seg as f32 / segments as f32;
        Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin())
    };

    out.reserve(uv_sphere_vertex_count(rings, segments));
    for ring in 0..rings {
        for seg in 0..segments {
            let a = point(ring, seg);
            let b = point(ring + 1, seg);
            let c = point(ring + 1, seg + 1);
            let d = point(ring, seg + 1);
            // Wound counter-clockwise seen from outside
            for n in [a, d, c, a, c, b] {
                emit(out, &model, &normals, n * radius, n, color);
            }
        }
    }
}
