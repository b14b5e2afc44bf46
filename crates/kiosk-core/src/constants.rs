// Shared layout, interaction and timing constants used by both web and native frontends.

// Model
pub const MODEL_SCALE: f32 = 1.5; // uniform scale of the group wrapping the loaded scene

// Hotspot
pub const DETECTION_DISTANCE: f32 = 2.0; // card-to-hotspot distance that counts as "near"
pub const HOTSPOT_RADIUS: f32 = 0.8; // visual sphere radius
pub const HOTSPOT_RING_INNER: f32 = 0.8; // glow ring inner radius, fraction of HOTSPOT_RADIUS
pub const HOTSPOT_PULSE_OUTER: f32 = 1.6; // pulsing ring outer radius, fraction of HOTSPOT_RADIUS

// Flow timing
pub const PROCESSING_DELAY_MS: u64 = 1500; // Processing -> Success

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 42.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

// Orbit (rotate + zoom around the camera target)
pub const ORBIT_MIN_DISTANCE: f32 = 2.5;
pub const ORBIT_MAX_DISTANCE: f32 = 10.0;
pub const ORBIT_MIN_POLAR: f32 = 0.45; // radians from straight up
pub const ORBIT_MAX_POLAR: f32 = std::f32::consts::FRAC_PI_2 - 0.2;
pub const ORBIT_ZOOM_STEP: f32 = 1.0 / 0.95; // distance factor per wheel step

// Card HUD (CSS pixels)
pub const CARD_HUD_WIDTH: f32 = 220.0;
pub const CARD_HUD_HEIGHT: f32 = 140.0;
pub const CARD_HUD_MARGIN: f32 = 28.0;
pub const CARD_HUD_LIFT: f32 = 350.0; // raises the default spot above the bottom edge

// Card ghost (world units, used only for the renderer marker)
pub const CARD_GHOST_SIZE: [f32; 2] = [0.85, 0.54];

// Confirmation beep
pub const BEEP_FIRST_HZ: f32 = 880.0;
pub const BEEP_FIRST_SEC: f64 = 0.15;
pub const BEEP_SECOND_HZ: f32 = 1100.0;
pub const BEEP_SECOND_SEC: f64 = 0.2;
pub const BEEP_SECOND_DELAY_SEC: f64 = 0.1;
pub const BEEP_GAIN: f32 = 0.3;
pub const BEEP_GAIN_FLOOR: f32 = 0.01;

// Ray-plane intersections with |n·d| below this are treated as parallel
pub const PARALLEL_EPSILON: f32 = 1e-6;
