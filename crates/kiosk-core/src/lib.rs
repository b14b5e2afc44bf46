pub mod bounds;
pub mod config;
pub mod constants;
pub mod drag;
pub mod error;
pub mod feedback;
pub mod flow;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod layout;
pub mod markers;
pub mod model;
pub mod orbit;
pub mod proximity;
pub mod session;
pub mod state;
pub mod timer;
pub static MARKERS_WGSL: &str = include_str!("../shaders/markers.wgsl");

pub use bounds::{BoundingVolume, KioskModel, Mesh, SceneRoot};
pub use config::KioskConfig;
pub use drag::{DragController, DragState, HudCard};
pub use error::{BoundsError, ConfigError};
pub use feedback::{ConfirmationSink, Silent, Tone, CONFIRMATION_TONES};
pub use flow::{next_state, FlowState, FlowTrigger, KioskFlow, Transition, UserAction};
pub use layout::Layout;
pub use markers::{MarkerInstance, MarkerUniforms};
pub use orbit::Orbit;
pub use proximity::{
    intensity_for_distance, CardDetected, ProximityInput, ProximitySnapshot, ProximityState,
    ProximityTracker, TriggerPolicy,
};
pub use session::{FrameSnapshot, KioskSession, ScreenRect};
pub use state::{Camera, Plane, Ray, Viewport};
pub use timer::SingleShot;
