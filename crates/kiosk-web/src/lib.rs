#![cfg(target_arch = "wasm32")]
use instant::Instant;
use kiosk_core::{model, KioskConfig, KioskSession};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;
mod screen;

use constants::{CANVAS_ID, CARD_ID, PROXIMITY_ID, SCREEN_ID};

// Keeps the canvas backing store and the session's viewport in step with the
// element's CSS box.
fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, session: &Rc<RefCell<KioskSession>>) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let session = session.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
        session
            .borrow_mut()
            .set_viewport(dom::canvas_viewport(&canvas_resize));
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn load_config(window: &web::Window) -> KioskConfig {
    let query = window.location().search().unwrap_or_default();
    match KioskConfig::from_query(&query) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("[config] {e}; using defaults");
            KioskConfig::default()
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("kiosk-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let screen_el = dom::element(&document, SCREEN_ID)?;
    let card_el = dom::element(&document, CARD_ID)?;
    let readout = dom::element(&document, PROXIMITY_ID).ok();

    let config = load_config(&window);
    log::info!(
        "[config] trigger={:?} detect={:.2} processing={:?}",
        config.trigger,
        config.detection_distance,
        config.processing_delay
    );

    dom::sync_canvas_backing_size(&canvas);
    let beep = audio::WebBeep::default();
    let scale = config.model_scale;
    let session = Rc::new(RefCell::new(KioskSession::new(
        config,
        dom::canvas_viewport(&canvas),
        Box::new(beep.clone()),
    )));
    wire_canvas_resize(&canvas, &session);

    let mut kiosk = model::placeholder_kiosk(scale);
    if let Err(e) = session.borrow_mut().on_model_loaded(&mut kiosk) {
        log::error!("[model] {e}");
    }

    let grab = events::CardGrab::new(card_el.clone());
    events::wire_global_keydown(session.clone(), grab.clone());
    events::wire_input_handlers(events::InputWiring {
        session: session.clone(),
        grab,
        canvas: canvas.clone(),
        screen: screen_el.clone(),
        beep,
        orbit_from: Rc::new(Cell::new(None)),
    });

    let gpu = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        canvas,
        gpu,
        screen: screen::ScreenPanel::new(screen_el),
        card: card_el,
        readout,
        markers: Vec::new(),
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
