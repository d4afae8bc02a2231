#![cfg(target_arch = "wasm32")]
use folio_core::{
    Camera, ContentTable, Interaction, ModalController, OrbitControls, SceneLoad, Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod loader;
mod overlay;
mod render;

use constants::{CANVAS_ID, SCENE_ASSET_PATH};
use dom::CanvasSurface;
use overlay::DomModalView;

/// Keep the canvas and camera projection in step with the window. Runs on
/// every resize event, no debouncing.
fn wire_viewport_resize(
    canvas: &web::HtmlCanvasElement,
    viewport: Rc<RefCell<Viewport>>,
    camera: Rc<RefCell<Camera>>,
) {
    let mut surface = CanvasSurface {
        canvas: canvas.clone(),
    };
    let resize_closure = Closure::wrap(Box::new(move || {
        let Some(window) = web::window() else {
            return;
        };
        let (width, height) = dom::window_inner_size(&window);
        viewport
            .borrow_mut()
            .resize(width, height, &mut camera.borrow_mut(), &mut surface);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    // Resolve every element up front so a broken page fails here, not mid-session
    let canvas = dom::require_canvas(&document, CANVAS_ID)?;
    let modal_view = DomModalView::from_document(&document)?;

    let (width, height) = dom::window_inner_size(&window);
    let viewport = Viewport::new(width, height, window.device_pixel_ratio());
    viewport.apply(&mut CanvasSurface {
        canvas: canvas.clone(),
    });
    let camera = Rc::new(RefCell::new(Camera::portfolio(viewport.aspect())));
    let viewport = Rc::new(RefCell::new(viewport));
    wire_viewport_resize(&canvas, viewport.clone(), camera.clone());

    // Asset load runs alongside everything below; picking sees an empty registry until it lands
    let scene = Rc::new(RefCell::new(SceneLoad::Pending));
    loader::spawn_scene_load(SCENE_ASSET_PATH, scene.clone());

    let controls = Rc::new(RefCell::new(OrbitControls::default()));
    let interaction = Rc::new(RefCell::new(Interaction::default()));
    let modal = Rc::new(RefCell::new(ModalController::new(
        modal_view,
        ContentTable::portfolio(),
    )));

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        camera: camera.clone(),
        controls: controls.clone(),
        interaction: interaction.clone(),
        modal,
    });

    // The loop starts right away; the renderer attaches once the adapter is ready
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        camera,
        controls,
        interaction,
        scene,
        canvas: canvas.clone(),
        cursor: dom::BodyCursor::new(&document),
        gpu: None,
    }));
    frame::start_loop(frame_ctx.clone());

    let gpu = frame::init_gpu(&canvas).await;
    frame_ctx.borrow_mut().gpu = gpu;

    Ok(())
}
