// Page wiring and frame pacing for the web front-end

// DOM element ids (see index.html)
pub const CANVAS_ID: &str = "kiosk-canvas";
pub const SCREEN_ID: &str = "kiosk-screen";
pub const CARD_ID: &str = "card-hud";
pub const PROXIMITY_ID: &str = "proximity-readout";

// Attribute carrying a screen button's action name
pub const ACTION_ATTR: &str = "data-action";

// Longest frame step fed to the session; a backgrounded tab resumes with a
// single capped step instead of one huge jump.
pub const MAX_FRAME_DT_MS: u64 = 100;

// Wheel deltas per zoom step, by WheelEvent.deltaMode (pixel, line, page)
pub const WHEEL_PIXELS_PER_STEP: f64 = 100.0;
pub const WHEEL_LINES_PER_STEP: f64 = 3.0;

// Instance buffer capacity (markers per frame)
pub const MAX_MARKERS: usize = 16;

// Scene clear color (linear)
pub const CLEAR_RGB: [f64; 3] = [0.93, 0.94, 0.96];
