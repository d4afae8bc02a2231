use folio_core::{CursorStyle, CursorView, RenderSurface};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Window inner size in CSS pixels.
#[inline]
pub fn window_inner_size(window: &web::Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    (w, h)
}

/// First element matching `selector`, or an error naming it.
pub fn require_selector(document: &web::Document, selector: &str) -> anyhow::Result<web::Element> {
    document
        .query_selector(selector)
        .map_err(|e| anyhow::anyhow!("bad selector {}: {:?}", selector, e))?
        .ok_or_else(|| anyhow::anyhow!("missing {}", selector))
}

pub fn require_canvas(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{} is not a canvas: {:?}", id, e)))
}

/// Click listener that keeps the event from reaching the window-level handler.
pub fn add_click_listener(el: &web::Element, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.stop_propagation();
        handler();
    }) as Box<dyn FnMut(_)>);
    _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// The WebGPU canvas: CSS size follows the window, backing store is scaled by pixel ratio.
pub struct CanvasSurface {
    pub canvas: web::HtmlCanvasElement,
}

impl RenderSurface for CanvasSurface {
    fn set_size(&mut self, css_width: f64, css_height: f64, backing_width: u32, backing_height: u32) {
        self.canvas.set_width(backing_width);
        self.canvas.set_height(backing_height);
        let style = self.canvas.style();
        _ = style.set_property("width", &format!("{}px", css_width));
        _ = style.set_property("height", &format!("{}px", css_height));
    }
}

/// Cursor affordance on `document.body`.
pub struct BodyCursor {
    body: Option<web::HtmlElement>,
}

impl BodyCursor {
    pub fn new(document: &web::Document) -> Self {
        Self {
            body: document.body(),
        }
    }
}

impl CursorView for BodyCursor {
    fn set_cursor(&mut self, style: CursorStyle) {
        if let Some(body) = &self.body {
            _ = body.style().set_property("cursor", style.as_css());
        }
    }
}
