//! Browser bootstrap and the animation-frame loop

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, Window};

use super::hud_canvas::HudCanvas;
use super::xr;
use crate::clock::FrameClock;
use crate::game::Game;
use crate::renderer::RenderState;
use crate::settings::Settings;

const CANVAS_ID: &str = "canvas";
const XR_BUTTON_ID: &str = "xr-button";

/// Everything the frame loop touches
struct App {
    game: Game,
    render_state: RenderState,
    hud: Option<HudCanvas>,
    canvas: HtmlCanvasElement,
    clock: FrameClock,
}

/// Callbacks handed to each XR session; the button's listener keeps them alive
struct XrCallbacks {
    frame: Closure<dyn FnMut(f64)>,
    end: Closure<dyn FnMut()>,
}

impl App {
    fn frame(&mut self, dt: f32) {
        self.game.set_stick_samples(&xr::stick_samples());
        self.game.frame(dt);
        self.render();

        if let Some(layout) = self.game.hud_update() {
            if let Some(hud) = &self.hud {
                hud.paint(&layout);
            }
        }
    }

    fn render(&mut self) {
        match self
            .render_state
            .render(&self.game.state, &self.game.settings)
        {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let (w, h) = self.render_state.size;
                self.render_state.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    /// Match the drawing buffer to the canvas' CSS size
    fn fit_canvas(&mut self, window: &Window) {
        let (w, h) = canvas_pixel_size(window, &self.canvas);
        if (w, h) != self.render_state.size {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.render_state.resize(w, h);
        }
    }
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

fn canvas_pixel_size(window: &Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
    let dpr = window.device_pixel_ratio();
    let w = (canvas.client_width() as f64 * dpr) as u32;
    let h = (canvas.client_height() as f64 * dpr) as u32;
    (w.max(1), h.max(1))
}

fn has_webgpu(window: &Window) -> bool {
    js_sys::Reflect::has(&window.navigator(), &JsValue::from_str("gpu")).unwrap_or(false)
}

pub async fn run() -> anyhow::Result<()> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).context("failed to init logger")?;

    log::info!("Tilt Kick starting...");

    let window = web_sys::window().context("no window")?;
    let document = window.document().context("no document")?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .context("no #canvas element")?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("#canvas is not a canvas"))?;

    let (width, height) = canvas_pixel_size(&window, &canvas);
    canvas.set_width(width);
    canvas.set_height(height);

    let mut settings = Settings::load();
    let query = window.location().search().map_err(js_err)?;
    if settings.apply_query(&query) {
        settings.save();
    }

    let seed = js_sys::Date::now() as u64;
    let game = Game::new(seed, settings);
    log::info!("Game initialized with seed: {}", seed);

    let backends = if has_webgpu(&window) {
        wgpu::Backends::BROWSER_WEBGPU
    } else {
        log::warn!("WebGPU unavailable, falling back to WebGL");
        wgpu::Backends::GL
    };
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends,
        ..Default::default()
    });

    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| anyhow::anyhow!("failed to create surface: {e}"))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| anyhow::anyhow!("no suitable GPU adapter: {e}"))?;

    log::info!("Using adapter: {:?}", adapter.get_info().name);

    let render_state = RenderState::new(surface, &adapter, width, height).await?;

    if let Some(loading) = document.get_element_by_id("loading") {
        let _ = loading.set_attribute("class", "hidden");
    }

    let app = Rc::new(RefCell::new(App {
        game,
        render_state,
        hud: HudCanvas::attach(&document),
        canvas,
        clock: FrameClock::new(),
    }));

    setup_key_handlers(&window, app.clone())?;
    setup_resize_handler(&window, app.clone())?;
    setup_xr_button(&document, app.clone())?;

    request_animation_frame(app);

    log::info!("Tilt Kick running!");
    Ok(())
}

fn setup_key_handlers(window: &Window, app: Rc<RefCell<App>>) -> anyhow::Result<()> {
    for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if app.borrow_mut().game.key(&event.code(), pressed) {
                // Arrow keys would otherwise scroll the page
                event.prevent_default();
            }
        });
        window
            .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        closure.forget();
    }

    // Drop held keys when focus leaves, or they stay stuck down
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        app.borrow_mut().game.input.keys = Default::default();
    });
    window
        .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}

fn setup_resize_handler(window: &Window, app: Rc<RefCell<App>>) -> anyhow::Result<()> {
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        if let Some(window) = web_sys::window() {
            app.borrow_mut().fit_canvas(&window);
        }
    });
    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}

/// Button that toggles the immersive session; hidden when XR is unsupported
fn setup_xr_button(document: &Document, app: Rc<RefCell<App>>) -> anyhow::Result<()> {
    let button = match document.get_element_by_id(XR_BUTTON_ID) {
        Some(el) => el,
        None => {
            let el = document.create_element("button").map_err(js_err)?;
            el.set_id(XR_BUTTON_ID);
            el.set_text_content(Some("Enter XR"));
            document
                .body()
                .context("no document body")?
                .append_child(&el)
                .map_err(js_err)?;
            el
        }
    };
    let _ = button.set_attribute("class", "hidden");

    {
        let button = button.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if xr::is_supported().await {
                let _ = button.set_attribute("class", "");
            } else {
                log::info!("Immersive AR not supported, XR button hidden");
            }
        });
    }

    let callbacks = Rc::new(xr_callbacks(app, button.clone()));
    let label_target = button.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
        if xr::is_active() {
            // The session's end callback restores the label
            xr::end_session();
            return;
        }
        let label_target = label_target.clone();
        let callbacks = callbacks.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let started = xr::start_session(
                callbacks.frame.as_ref().unchecked_ref(),
                callbacks.end.as_ref().unchecked_ref(),
            )
            .await;
            match started {
                Ok(()) => label_target.set_text_content(Some("Exit XR")),
                Err(e) => {
                    label_target.set_text_content(Some("Enter XR"));
                    log::warn!("{:#}", e);
                }
            }
        });
    });
    button
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}

/// Session frames drive the game while a session runs; its end hands
/// frames back to the window loop
fn xr_callbacks(app: Rc<RefCell<App>>, button: web_sys::Element) -> XrCallbacks {
    let frame_app = app.clone();
    let frame = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
        let mut app = frame_app.borrow_mut();
        let dt = app.clock.xr_frame(time);
        app.frame(dt);
    });

    let end = Closure::<dyn FnMut()>::new(move || {
        log::info!("XR session ended");
        button.set_text_content(Some("Enter XR"));
        let restart = app.borrow_mut().clock.session_ended();
        if restart {
            request_animation_frame(app.clone());
        }
    });

    XrCallbacks { frame, end }
}

fn request_animation_frame(app: Rc<RefCell<App>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(app, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(app: Rc<RefCell<App>>, time: f64) {
    let dt = app.borrow_mut().clock.window_frame(time);
    match dt {
        Some(dt) => {
            app.borrow_mut().frame(dt);
            request_animation_frame(app);
        }
        None => log::debug!("Window loop parked while XR frames drive the game"),
    }
}
