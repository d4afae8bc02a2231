use crate::dom::BodyCursor;
use crate::render;
use folio_core::{Camera, Interaction, OrbitControls, SceneLoad};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Application state driven by the animation-frame loop. Event handlers hold
/// clones of the same `Rc` handles.
pub struct FrameContext {
    pub camera: Rc<RefCell<Camera>>,
    pub controls: Rc<RefCell<OrbitControls>>,
    pub interaction: Rc<RefCell<Interaction>>,
    pub scene: Rc<RefCell<SceneLoad>>,

    pub canvas: web::HtmlCanvasElement,
    pub cursor: BodyCursor,
    pub gpu: Option<render::GpuState>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        // Pick against whatever is loaded; pending or failed loads hit nothing
        {
            let camera = self.camera.borrow();
            let scene = self.scene.borrow();
            self.interaction
                .borrow_mut()
                .update(&camera, &*scene, &mut self.cursor);
        }

        self.controls
            .borrow_mut()
            .update(&mut self.camera.borrow_mut());

        if let Some(g) = &mut self.gpu {
            if !g.has_scene() {
                if let Some(loaded) = self.scene.borrow().scene() {
                    g.upload_scene(&loaded.graph);
                }
            }
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(&self.camera.borrow()) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Run `frame` once per display refresh for the lifetime of the page. The
/// next frame is requested before the current one does any work.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        request_frame(&tick_clone);
        frame_ctx.borrow_mut().frame();
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }
}
