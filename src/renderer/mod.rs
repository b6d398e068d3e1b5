//! WebGPU rendering module
//!
//! The scene is rebuilt on the CPU each frame as a single lit triangle list.

pub mod camera;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
