//! WebXR input shim
//!
//! The session is only used for controller input and to drive frames; its
//! layer is cleared each frame and the board renders on the page canvas.
//! Thumbsticks are read through the JS side because the XR bindings in
//! web-sys are unstable.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::input::{StickSample, samples_from_flat};

#[wasm_bindgen(inline_js = "
    export function xr_supported() {
        if (!navigator.xr) {
            return Promise.resolve(false);
        }
        return navigator.xr.isSessionSupported('immersive-ar').catch(() => false);
    }

    export function request_xr_session(onFrame, onEnd) {
        if (!navigator.xr) {
            return Promise.reject(new Error('WebXR not available'));
        }
        return navigator.xr.requestSession('immersive-ar', {
            optionalFeatures: ['local-floor'],
        }).then((session) => {
            const canvas = document.createElement('canvas');
            const gl = canvas.getContext('webgl2', { xrCompatible: true })
                || canvas.getContext('webgl', { xrCompatible: true });
            if (!gl) {
                session.end();
                throw new Error('no XR-compatible WebGL context');
            }
            // A session without a base layer never runs frames
            const layer = new XRWebGLLayer(session, gl);
            session.updateRenderState({ baseLayer: layer });
            window.__tiltKickXr = session;

            const onXrFrame = (time) => {
                if (window.__tiltKickXr !== session) {
                    return;
                }
                session.requestAnimationFrame(onXrFrame);
                // Transparent so the passthrough shows
                gl.bindFramebuffer(gl.FRAMEBUFFER, layer.framebuffer);
                gl.clearColor(0, 0, 0, 0);
                gl.clear(gl.COLOR_BUFFER_BIT);
                onFrame(time);
            };
            session.requestAnimationFrame(onXrFrame);
            session.addEventListener('end', () => {
                if (window.__tiltKickXr === session) {
                    window.__tiltKickXr = null;
                }
                onEnd();
            });
        });
    }

    export function end_xr_session() {
        const session = window.__tiltKickXr;
        if (session) {
            session.end();
        }
    }

    export function xr_session_active() {
        return !!window.__tiltKickXr;
    }

    export function xr_stick_samples() {
        const session = window.__tiltKickXr;
        const out = [];
        if (!session) {
            return new Float32Array(out);
        }
        for (const source of session.inputSources) {
            const pad = source.gamepad;
            if (!pad || pad.axes.length < 2) {
                continue;
            }
            const hand = source.handedness === 'left' ? 1 : source.handedness === 'right' ? 2 : 0;
            // xr-standard puts the thumbstick on axes 2/3 when a touchpad exists
            const base = pad.axes.length >= 4 ? 2 : 0;
            out.push(hand, pad.axes[base], pad.axes[base + 1]);
        }
        return new Float32Array(out);
    }
")]
extern "C" {
    fn xr_supported() -> js_sys::Promise;
    fn request_xr_session(on_frame: &js_sys::Function, on_end: &js_sys::Function) -> js_sys::Promise;
    fn end_xr_session();
    fn xr_session_active() -> bool;
    fn xr_stick_samples() -> Vec<f32>;
}

/// Whether the browser can start an immersive AR session
pub async fn is_supported() -> bool {
    match JsFuture::from(xr_supported()).await {
        Ok(value) => value.as_bool().unwrap_or(false),
        Err(e) => {
            log::warn!("XR support check failed: {:?}", e);
            false
        }
    }
}

/// Start an immersive session; must be called from a user gesture
///
/// `on_frame` receives the session's frame time (ms) once per XR frame, with
/// controller state fresh for that frame. `on_end` runs however the session
/// ends, including from the headset's own menu.
pub async fn start_session(
    on_frame: &js_sys::Function,
    on_end: &js_sys::Function,
) -> anyhow::Result<()> {
    JsFuture::from(request_xr_session(on_frame, on_end))
        .await
        .map_err(|e| anyhow::anyhow!("XR session request rejected: {:?}", e))?;
    log::info!("XR session started");
    Ok(())
}

pub fn end_session() {
    if xr_session_active() {
        log::debug!("Ending XR session");
        end_xr_session();
    }
}

pub fn is_active() -> bool {
    xr_session_active()
}

/// Current thumbstick readings; empty without a session
pub fn stick_samples() -> Vec<StickSample> {
    samples_from_flat(&xr_stick_samples())
}
