use crate::input;
use kiosk_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn element(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("#{id} is not an HTML element: {:?}", e))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let rect = canvas.get_bounding_client_rect();
        let (w_px, h_px) = input::backing_size(rect.width(), rect.height(), w.device_pixel_ratio());
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
}

/// The canvas' client rect in CSS pixels.
pub fn canvas_viewport(canvas: &web::HtmlCanvasElement) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    input::viewport_from_rect(rect.left(), rect.top(), rect.width(), rect.height())
}

#[inline]
pub fn set_box(el: &web::HtmlElement, style: &str) {
    let s = el.style();
    for decl in style.split(';').filter(|d| !d.is_empty()) {
        if let Some((k, v)) = decl.split_once(':') {
            _ = s.set_property(k, v);
        }
    }
}

#[inline]
pub fn set_hidden(el: &web::HtmlElement, hidden: bool) {
    let cl = el.class_list();
    if hidden {
        _ = cl.add_1("hidden");
    } else {
        _ = cl.remove_1("hidden");
    }
}
