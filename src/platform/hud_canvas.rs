//! Paints the score HUD on a 2D canvas

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::hud::{HUD_HEIGHT, HUD_WIDTH, HudLayout};

const HUD_CANVAS_ID: &str = "hud";

pub struct HudCanvas {
    ctx: CanvasRenderingContext2d,
}

impl HudCanvas {
    /// Use the page's `#hud` canvas, creating it if the page has none
    ///
    /// None when no 2D context is available; the HUD is then skipped.
    pub fn attach(document: &Document) -> Option<Self> {
        let canvas = match document.get_element_by_id(HUD_CANVAS_ID) {
            Some(el) => el.dyn_into::<HtmlCanvasElement>().ok()?,
            None => {
                let canvas: HtmlCanvasElement =
                    document.create_element("canvas").ok()?.dyn_into().ok()?;
                canvas.set_id(HUD_CANVAS_ID);
                document.body()?.append_child(&canvas).ok()?;
                canvas
            }
        };
        canvas.set_width(HUD_WIDTH);
        canvas.set_height(HUD_HEIGHT);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    pub fn paint(&self, layout: &HudLayout) {
        let (w, h) = (HUD_WIDTH as f64, HUD_HEIGHT as f64);
        let ctx = &self.ctx;

        ctx.set_fill_style_str("#ffffff");
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_fill_style_str("#111111");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        for line in &layout.lines {
            ctx.set_font(&format!("bold {}px sans-serif", line.font_px));
            let _ = ctx.fill_text(&line.text, w / 2.0, h / 2.0 + line.dy as f64);
        }
    }
}
