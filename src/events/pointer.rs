use crate::dom;
use crate::overlay::DomModalView;
use folio_core::{Camera, DragMode, Interaction, ModalController, OrbitControls};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub camera: Rc<RefCell<Camera>>,
    pub controls: Rc<RefCell<OrbitControls>>,
    pub interaction: Rc<RefCell<Interaction>>,
    pub modal: Rc<RefCell<ModalController<DomModalView>>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_click(&w);
    wire_modal_close(&w);
    wire_orbit(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let Some(window) = web::window() else {
            return;
        };
        let (width, height) = dom::window_inner_size(&window);
        let x = ev.client_x() as f32;
        let y = ev.client_y() as f32;
        w.interaction
            .borrow_mut()
            .pointer
            .set_from_client(x, y, width as f32, height as f32);

        let mut controls = w.controls.borrow_mut();
        if controls.drag_mode() != DragMode::None {
            let client_height = w.canvas.client_height() as f32;
            controls.pointer_move(ev.pointer_id(), x, y, client_height, &w.camera.borrow());
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_click(w: &InputWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        let hover = w.interaction.borrow().hover().id().map(str::to_owned);
        w.modal.borrow_mut().handle_click(hover.as_deref());
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_modal_close(w: &InputWiring) {
    let (exit_button, overlay) = {
        let modal = w.modal.borrow();
        (modal.view().exit_button().clone(), modal.view().overlay().clone())
    };
    let modal_exit = w.modal.clone();
    dom::add_click_listener(&exit_button, move || {
        modal_exit.borrow_mut().close();
    });
    let modal_overlay = w.modal.clone();
    dom::add_click_listener(&overlay, move || {
        modal_overlay.borrow_mut().close();
    });
}

fn wire_orbit(w: &InputWiring) {
    _ = w.canvas.style().set_property("touch-action", "none");

    let down = {
        let w = w.clone();
        Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let id = ev.pointer_id();
            let mut controls = w.controls.borrow_mut();
            controls.pointer_down(id, ev.button(), ev.client_x() as f32, ev.client_y() as f32);
            if controls.active_pointer() == Some(id) {
                _ = w.canvas.set_pointer_capture(id);
            }
        }) as Box<dyn FnMut(_)>)
    };
    _ = w
        .canvas
        .add_event_listener_with_callback("pointerdown", down.as_ref().unchecked_ref());
    down.forget();

    let up = {
        let w = w.clone();
        Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let id = ev.pointer_id();
            let mut controls = w.controls.borrow_mut();
            if controls.active_pointer() == Some(id) {
                controls.pointer_up(id);
                _ = w.canvas.release_pointer_capture(id);
            }
        }) as Box<dyn FnMut(_)>)
    };
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", up.as_ref().unchecked_ref());
        _ = wnd.add_event_listener_with_callback("pointercancel", up.as_ref().unchecked_ref());
    }
    up.forget();

    let wheel = {
        let controls = w.controls.clone();
        Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            ev.prevent_default();
            controls.borrow_mut().wheel(ev.delta_y() as f32);
        }) as Box<dyn FnMut(_)>)
    };
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = w.canvas.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        wheel.as_ref().unchecked_ref(),
        &opts,
    );
    wheel.forget();

    let context_menu = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("contextmenu", context_menu.as_ref().unchecked_ref());
    context_menu.forget();
}
