use super::grab::CardGrab;
use crate::audio::WebBeep;
use crate::input;
use crate::screen;
use glam::Vec2;
use kiosk_core::KioskSession;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub session: Rc<RefCell<KioskSession>>,
    pub grab: CardGrab,
    pub canvas: web::HtmlCanvasElement,
    pub screen: web::HtmlElement,
    pub beep: WebBeep,
    /// Last pointer position of a camera drag on the canvas.
    pub orbit_from: Rc<Cell<Option<Vec2>>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_canvas_orbit(&w);
    wire_canvas_wheel(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_screen_clicks(&w);
}

// Grabbing starts on the HUD card only; moves and releases are tracked on the
// window so a drag survives the pointer leaving the card.
fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let card = w.grab.element().clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        w.beep.prime();
        let began = w
            .session
            .borrow_mut()
            .pointer_down(input::client_point(&ev));
        if began.is_some() || w.session.borrow().drag().is_dragging() {
            w.grab.begin(ev.pointer_id());
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    _ = card.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

// Empty canvas drags rotate the camera.
fn wire_canvas_orbit(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.button() != 0 || w.session.borrow().drag().is_dragging() {
            return;
        }
        w.orbit_from.set(Some(input::client_point(&ev)));
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_canvas_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let steps = input::wheel_steps(ev.delta_y(), ev.delta_mode());
        if w.session.borrow_mut().zoom(steps) {
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let p = input::client_point(&ev);
        let mut s = w.session.borrow_mut();
        if s.drag().is_dragging() {
            s.pointer_move(p);
            ev.prevent_default();
        } else if let Some(prev) = w.orbit_from.get() {
            s.orbit(p - prev);
            w.orbit_from.set(Some(p));
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if w.orbit_from.take().is_some() {
            _ = w.canvas.release_pointer_capture(ev.pointer_id());
        }
        if w.session.borrow_mut().pointer_up() {
            w.grab.end();
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        for kind in ["pointerup", "pointercancel"] {
            _ = wnd.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
    }
    closure.forget();
}

fn wire_screen_clicks(w: &InputWiring) {
    let w = w.clone();
    let screen_el = w.screen.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(action) = screen::action_from_event(&ev) else {
            return;
        };
        w.beep.prime();
        log::debug!("[screen] tap `{}`", action.name());
        w.session.borrow_mut().user_action(action);
    }) as Box<dyn FnMut(_)>);
    _ = screen_el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
