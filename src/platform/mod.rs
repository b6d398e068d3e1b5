//! Platform layer
//!
//! Browser-only code: bootstrap and frame loop, the WebXR input shim and the
//! 2D canvas HUD. Everything here is compiled for wasm32 only; the rest of
//! the crate stays testable on the host.

#[cfg(target_arch = "wasm32")]
pub mod hud_canvas;
#[cfg(target_arch = "wasm32")]
pub mod web;
#[cfg(target_arch = "wasm32")]
pub mod xr;
