use crate::constants::{MAX_FRAME_DT_MS, WHEEL_LINES_PER_STEP, WHEEL_PIXELS_PER_STEP};
use glam::Vec2;
use kiosk_core::Viewport;
use std::time::Duration;
use web_sys as web;

#[inline]
pub fn client_point(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Viewport from a CSS-pixel bounding rect.
#[inline]
pub fn viewport_from_rect(left: f64, top: f64, width: f64, height: f64) -> Viewport {
    Viewport {
        left: left as f32,
        top: top as f32,
        width: width.max(0.0) as f32,
        height: height.max(0.0) as f32,
    }
}

#[inline]
pub fn clamp_frame_dt(dt: Duration) -> Duration {
    dt.min(Duration::from_millis(MAX_FRAME_DT_MS))
}

/// Zoom steps for a wheel event; positive scrolls away from the target.
#[inline]
pub fn wheel_steps(delta_y: f64, delta_mode: u32) -> f32 {
    let steps = match delta_mode {
        0 => delta_y / WHEEL_PIXELS_PER_STEP,
        1 => delta_y / WHEEL_LINES_PER_STEP,
        _ => delta_y,
    };
    steps as f32
}

/// Backing-store size for a CSS size at the given device pixel ratio.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let w = (css_width * dpr) as u32;
    let h = (css_height * dpr) as u32;
    (w.max(1), h.max(1))
}

/// CSS `left/top/width/height` declarations for a viewport-relative box.
pub fn box_style(viewport: &Viewport, origin: Vec2, size: Vec2) -> String {
    format!(
        "left:{:.1}px;top:{:.1}px;width:{:.1}px;height:{:.1}px;",
        viewport.left + origin.x,
        viewport.top + origin.y,
        size.x,
        size.y
    )
}
