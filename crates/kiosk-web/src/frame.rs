use crate::dom;
use crate::input;
use crate::render;
use crate::screen::{self, ScreenPanel};
use instant::Instant;
use kiosk_core::{markers, KioskSession, MarkerInstance};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub session: Rc<RefCell<KioskSession>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,

    pub screen: ScreenPanel,
    pub card: web::HtmlElement,
    pub readout: Option<web::HtmlElement>,

    pub markers: Vec<MarkerInstance>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = input::clamp_frame_dt(now - self.last_instant);
        self.last_instant = now;

        let mut session = self.session.borrow_mut();
        let snap = session.update(dt);
        let viewport = *session.viewport();

        // DOM overlays
        if let Some(hud) = snap.hud {
            dom::set_box(&self.card, &input::box_style(&viewport, hud.origin, hud.size));
        }
        self.screen
            .sync(snap.flow, session.screen_rect(), &viewport);
        if let Some(el) = &self.readout {
            dom::set_hidden(el, !snap.hotspot_visible);
            if snap.hotspot_visible {
                el.set_text_content(Some(&screen::proximity_text(&snap.proximity)));
                let cl = el.class_list();
                _ = cl.toggle_with_force("near", snap.proximity.is_near);
            }
        }

        // Scene
        let radius = session.config().hotspot_radius;
        match (session.bounds(), session.layout()) {
            (Some(bounds), Some(layout)) => {
                markers::build(&snap, bounds, layout, radius, &mut self.markers)
            }
            _ => self.markers.clear(),
        }
        let camera = session.camera().clone();
        drop(session);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(&camera, &self.markers) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
