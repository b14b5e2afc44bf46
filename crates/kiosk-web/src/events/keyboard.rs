use super::grab::CardGrab;
use kiosk_core::{KioskSession, UserAction};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Action(UserAction),
    /// Back to the welcome screen from anywhere.
    Reset,
}

#[inline]
pub fn command_for_key(key: &str) -> Option<KeyCommand> {
    match key {
        "Enter" | "s" | "S" => Some(KeyCommand::Action(UserAction::Start)),
        "p" | "P" => Some(KeyCommand::Action(UserAction::ChoosePayment)),
        "Escape" | "Backspace" => Some(KeyCommand::Action(UserAction::Back)),
        "r" | "R" => Some(KeyCommand::Reset),
        _ => None,
    }
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    session: &Rc<RefCell<KioskSession>>,
    grab: &CardGrab,
) {
    if ev.repeat() {
        return;
    }
    let Some(cmd) = command_for_key(&ev.key()) else {
        return;
    };
    let mut s = session.borrow_mut();
    match cmd {
        KeyCommand::Action(action) => {
            s.user_action(action);
        }
        KeyCommand::Reset => {
            log::info!("[keys] reset");
            // The window pointerup that follows will not see a drag to end.
            if s.reset() {
                grab.end();
            }
        }
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(session: Rc<RefCell<KioskSession>>, grab: CardGrab) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &session, &grab);
    }) as Box<dyn FnMut(_)>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
