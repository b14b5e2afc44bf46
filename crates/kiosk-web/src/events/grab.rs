use std::cell::Cell;
use std::rc::Rc;
use web_sys as web;

/// The HUD card element and the pointer currently captured on it.
#[derive(Clone)]
pub struct CardGrab {
    card: web::HtmlElement,
    pointer: Rc<Cell<Option<i32>>>,
}

impl CardGrab {
    pub fn new(card: web::HtmlElement) -> Self {
        Self {
            card,
            pointer: Rc::new(Cell::new(None)),
        }
    }

    pub fn element(&self) -> &web::HtmlElement {
        &self.card
    }

    pub fn begin(&self, pointer_id: i32) {
        _ = self.card.set_pointer_capture(pointer_id);
        _ = self.card.class_list().add_1("dragging");
        self.pointer.set(Some(pointer_id));
    }

    /// Drop the capture and the grabbing style. Safe to call twice.
    pub fn end(&self) {
        if let Some(id) = self.pointer.take() {
            _ = self.card.release_pointer_capture(id);
        }
        _ = self.card.class_list().remove_1("dragging");
    }
}
