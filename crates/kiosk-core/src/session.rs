//! One kiosk, wired end to end.
//!
//! [`KioskSession`] owns every component and moves data between them in the
//! order model load → layout → drag → proximity → flow. Frontends feed it
//! pointer events and user actions as they arrive and call [`KioskSession::update`]
//! once per frame; they read back a [`FrameSnapshot`] to draw from.

use crate::bounds::{self, BoundingVolume, KioskModel};
use crate::config::KioskConfig;
use crate::drag::{DragController, HudCard};
use crate::error::BoundsError;
use crate::feedback::ConfirmationSink;
use crate::flow::{FlowState, KioskFlow, Transition, UserAction};
use crate::layout::{self, Layout};
use crate::orbit::Orbit;
use crate::proximity::{ProximityInput, ProximitySnapshot, ProximityState, ProximityTracker};
use crate::state::{Camera, Viewport};
use glam::{Vec2, Vec3};
use std::time::Duration;

/// What the presentation layer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub flow: FlowState,
    pub proximity: ProximitySnapshot,
    pub card_position: Option<Vec3>,
    pub hud: Option<HudCard>,
    pub dragging: bool,
    pub hotspot_visible: bool,
    /// Last flow transition that happened during this update, if any.
    pub transition: Option<Transition>,
    pub elapsed: Duration,
}

impl FrameSnapshot {
    pub fn idle(flow: FlowState) -> Self {
        Self {
            flow,
            proximity: ProximitySnapshot::IDLE,
            card_position: None,
            hud: None,
            dragging: false,
            hotspot_visible: false,
            transition: None,
            elapsed: Duration::ZERO,
        }
    }
}

/// Screen panel rectangle in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub origin: Vec2,
    pub size: Vec2,
}

pub struct KioskSession {
    config: KioskConfig,
    viewport: Viewport,
    bounds: Option<BoundingVolume>,
    layout: Option<Layout>,
    camera: Camera,
    orbit: Option<Orbit>,
    drag: DragController,
    tracker: ProximityTracker,
    flow: KioskFlow,
    feedback: Box<dyn ConfirmationSink>,
    elapsed: Duration,
}

impl KioskSession {
    pub fn new(
        config: KioskConfig,
        viewport: Viewport,
        feedback: Box<dyn ConfirmationSink>,
    ) -> Self {
        let camera = Camera {
            aspect: viewport.aspect(),
            fovy_radians: config.fov_degrees.to_radians(),
            ..Camera::default()
        };
        Self {
            drag: DragController::new(&viewport, 0.0),
            tracker: ProximityTracker::new(Vec3::ZERO, config.detection_distance, config.trigger),
            flow: KioskFlow::new(config.processing_delay),
            config,
            viewport,
            bounds: None,
            layout: None,
            camera,
            orbit: None,
            feedback,
            elapsed: Duration::ZERO,
        }
    }

    pub fn config(&self) -> &KioskConfig {
        &self.config
    }

    pub fn bounds(&self) -> Option<&BoundingVolume> {
        self.bounds.as_ref()
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn proximity(&self) -> ProximityState {
        self.tracker.state()
    }

    pub fn flow_state(&self) -> FlowState {
        self.flow.state()
    }

    /// Resolve a freshly loaded model and derive every anchor from it.
    ///
    /// On failure the previous layout (if any) is kept and the error returned.
    pub fn on_model_loaded(&mut self, model: &mut KioskModel) -> Result<Layout, BoundsError> {
        let bv = bounds::resolve(model)?;
        let layout = layout::plan(&bv);
        log::info!(
            "[layout] camera=({:.2},{:.2},{:.2}) hotspot=({:.2},{:.2},{:.2}) card=({:.2},{:.2},{:.2})",
            layout.camera_pos.x,
            layout.camera_pos.y,
            layout.camera_pos.z,
            layout.hotspot_pos.x,
            layout.hotspot_pos.y,
            layout.hotspot_pos.z,
            layout.card_start_pos.x,
            layout.card_start_pos.y,
            layout.card_start_pos.z
        );

        self.camera = Camera::from_layout(&layout, self.viewport.aspect(), self.config.fov_degrees);
        self.orbit = Some(Orbit::from_pose(layout.camera_pos, layout.camera_target));
        self.drag.set_plane_depth(layout.hotspot_pos.z);
        self.drag.place(layout.card_start_pos);
        self.tracker.set_hotspot(layout.hotspot_pos);
        self.bounds = Some(bv);
        self.layout = Some(layout);
        self.sync_hotspot();
        Ok(layout)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
        self.drag.reset_hud(&viewport);
    }

    pub fn pointer_down(&mut self, client: Vec2) -> Option<Vec3> {
        self.drag.pointer_down(client, &self.viewport, &self.camera)
    }

    pub fn pointer_move(&mut self, client: Vec2) -> Option<Vec3> {
        self.drag.pointer_move(client, &self.viewport, &self.camera)
    }

    pub fn pointer_up(&mut self) -> bool {
        self.drag.pointer_up()
    }

    /// Rotate the camera by a pointer delta in viewport pixels. Ignored while
    /// the card is held or before a model is loaded.
    pub fn orbit(&mut self, delta: Vec2) -> bool {
        let height = self.viewport.height;
        self.move_camera(|o| o.rotate(delta, height))
    }

    /// Dolly by wheel steps; positive moves away. Same gating as [`Self::orbit`].
    pub fn zoom(&mut self, steps: f32) -> bool {
        self.move_camera(|o| o.zoom(steps))
    }

    fn move_camera(&mut self, f: impl FnOnce(&mut Orbit)) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        let Some(orbit) = self.orbit.as_mut() else {
            return false;
        };
        f(orbit);
        self.camera.eye = orbit.eye();
        self.camera.target = orbit.target;
        true
    }

    pub fn user_action(&mut self, action: UserAction) -> Option<Transition> {
        let t = self.flow.apply(action);
        self.sync_hotspot();
        t
    }

    /// Hotspot detection follows the flow state; leaving the payment screen
    /// clears the trigger latch.
    fn sync_hotspot(&mut self) {
        if self.flow.hotspot_active() && self.layout.is_some() {
            self.tracker.activate();
        } else if self.tracker.is_active() || self.tracker.has_triggered() {
            self.tracker.deactivate();
        }
    }

    fn hotspot_enabled(&self) -> bool {
        self.flow.hotspot_active() && self.layout.is_some()
    }

    /// Per-frame step using the drag controller's card position.
    pub fn update(&mut self, dt: Duration) -> FrameSnapshot {
        let position = self.drag.position();
        let dragging = self.drag.is_dragging();
        self.step(position, dragging, dt)
    }

    /// Per-frame step with an externally supplied card position.
    pub fn step(&mut self, position: Option<Vec3>, dragging: bool, dt: Duration) -> FrameSnapshot {
        self.elapsed += dt;
        let mut transition = self.flow.advance(dt);

        let detected = self.tracker.update(ProximityInput {
            position,
            dragging,
            active: self.hotspot_enabled(),
        });
        if detected.is_some() {
            if let Some(t) = self.flow.card_detected(&mut *self.feedback) {
                transition = Some(t);
            }
        }
        self.sync_hotspot();

        FrameSnapshot {
            flow: self.flow.state(),
            proximity: self.tracker.snapshot(),
            card_position: position,
            hud: Some(self.drag.hud()),
            dragging,
            hotspot_visible: self.hotspot_enabled(),
            transition,
            elapsed: self.elapsed,
        }
    }

    /// Where the screen panel lands on the viewport, once a layout exists.
    pub fn screen_rect(&self) -> Option<ScreenRect> {
        let layout = self.layout.as_ref()?;
        let half = layout.screen_size * 0.5;
        let tl = layout.screen_pos + Vec3::new(-half.x, half.y, 0.0);
        let br = layout.screen_pos + Vec3::new(half.x, -half.y, 0.0);
        let a = self.camera.world_to_viewport(tl, &self.viewport)?;
        let b = self.camera.world_to_viewport(br, &self.viewport)?;
        Some(ScreenRect {
            origin: a.min(b),
            size: (b - a).abs(),
        })
    }

    /// Teardown/restart: cancel the pending timer, end any drag and return
    /// to the welcome screen. Returns whether a drag was ended.
    pub fn reset(&mut self) -> bool {
        self.flow.reset();
        let ended = self.drag.pointer_up();
        self.tracker.deactivate();
        self.elapsed = Duration::ZERO;
        ended
    }
}
