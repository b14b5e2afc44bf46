//! Pointer-driven placement of the virtual card.
//!
//! The card is grabbed on a 2D HUD rectangle; while it is held, every
//! pointer position is cast into the scene and intersected with a fixed
//! plane facing the viewer. The hit becomes the card's 3D position.

use crate::constants::{CARD_HUD_HEIGHT, CARD_HUD_LIFT, CARD_HUD_MARGIN, CARD_HUD_WIDTH};
use crate::state::{Camera, Plane, Viewport};
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    /// `None` until the card has been placed for the first time.
    pub position: Option<Vec3>,
    pub is_dragging: bool,
    /// Pointer minus HUD origin at the moment of capture.
    pub pointer_offset: Vec2,
}

/// Screen-space rectangle of the draggable card, relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudCard {
    pub origin: Vec2,
    pub size: Vec2,
}

impl HudCard {
    /// Bottom-right resting spot, lifted clear of the floor of the page.
    pub fn resting(viewport: &Viewport) -> Self {
        Self {
            origin: Vec2::new(
                viewport.width - CARD_HUD_WIDTH - CARD_HUD_MARGIN,
                viewport.height - CARD_HUD_HEIGHT - CARD_HUD_MARGIN - CARD_HUD_LIFT,
            ),
            size: Vec2::new(CARD_HUD_WIDTH, CARD_HUD_HEIGHT),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.origin + self.size;
        p.x >= self.origin.x && p.y >= self.origin.y && p.x <= max.x && p.y <= max.y
    }
}

#[derive(Clone, Debug)]
pub struct DragController {
    state: DragState,
    hud: HudCard,
    plane: Plane,
}

impl DragController {
    pub fn new(viewport: &Viewport, plane_depth: f32) -> Self {
        Self {
            state: DragState::default(),
            hud: HudCard::resting(viewport),
            plane: Plane::facing_viewer(plane_depth),
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn position(&self) -> Option<Vec3> {
        self.state.position
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    pub fn hud(&self) -> HudCard {
        self.hud
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn set_plane_depth(&mut self, depth: f32) {
        self.plane = Plane::facing_viewer(depth);
    }

    /// Put the card somewhere without a pointer (initial placement).
    pub fn place(&mut self, position: Vec3) {
        self.state.position = Some(position);
    }

    /// Move the HUD card back to its resting spot for a (possibly resized)
    /// viewport. Ignored mid-drag.
    pub fn reset_hud(&mut self, viewport: &Viewport) {
        if !self.state.is_dragging {
            self.hud = HudCard::resting(viewport);
        }
    }

    #[inline]
    fn local(pointer: Vec2, viewport: &Viewport) -> Vec2 {
        pointer - Vec2::new(viewport.left, viewport.top)
    }

    /// Begin a drag if `pointer` (client coordinates) lands on the card.
    /// Returns the freshly projected position, if any.
    pub fn pointer_down(
        &mut self,
        pointer: Vec2,
        viewport: &Viewport,
        camera: &Camera,
    ) -> Option<Vec3> {
        if self.state.is_dragging {
            return None;
        }
        let local = Self::local(pointer, viewport);
        if !self.hud.contains(local) {
            return None;
        }
        self.state.is_dragging = true;
        self.state.pointer_offset = local - self.hud.origin;
        log::debug!("[drag] begin at ({:.0},{:.0})", local.x, local.y);
        self.project(pointer, viewport, camera)
    }

    pub fn pointer_move(
        &mut self,
        pointer: Vec2,
        viewport: &Viewport,
        camera: &Camera,
    ) -> Option<Vec3> {
        if !self.state.is_dragging {
            return None;
        }
        self.hud.origin = Self::local(pointer, viewport) - self.state.pointer_offset;
        self.project(pointer, viewport, camera)
    }

    /// Release, wherever the pointer is. Returns whether a drag ended.
    pub fn pointer_up(&mut self) -> bool {
        let was = self.state.is_dragging;
        if was {
            self.state.is_dragging = false;
            log::debug!("[drag] end");
        }
        was
    }

    /// Cast `pointer` onto the drag plane. A miss leaves the position as is.
    pub fn project(&mut self, pointer: Vec2, viewport: &Viewport, camera: &Camera) -> Option<Vec3> {
        let ndc = viewport.to_ndc(pointer)?;
        let hit = camera.ray_from_ndc(ndc).intersect_plane(&self.plane)?;
        self.state.position = Some(hit);
        Some(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (DragController, Viewport, Camera) {
        let vp = Viewport::new(1000.0, 800.0);
        let cam = Camera {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            aspect: vp.aspect(),
            ..Camera::default()
        };
        (DragController::new(&vp, 0.0), vp, cam)
    }

    #[test]
    fn resting_hud_sits_bottom_right() {
        let (drag, _, _) = setup();
        assert_eq!(drag.hud().origin, Vec2::new(752.0, 282.0));
        assert_eq!(drag.position(), None);
    }

    #[test]
    fn pointer_down_outside_card_is_ignored() {
        let (mut drag, vp, cam) = setup();
        assert!(drag.pointer_down(Vec2::new(10.0, 10.0), &vp, &cam).is_none());
        assert!(!drag.is_dragging());
    }

    #[test]
    fn drag_moves_hud_by_offset_and_projects_onto_plane() {
        let (mut drag, vp, cam) = setup();
        let grab = Vec2::new(800.0, 300.0);
        let p = drag.pointer_down(grab, &vp, &cam).expect("hit plane");
        assert!(p.z.abs() < 1e-4);
        assert_eq!(drag.state().pointer_offset, Vec2::new(48.0, 18.0));

        drag.pointer_move(Vec2::new(500.0, 400.0), &vp, &cam).unwrap();
        assert_eq!(drag.hud().origin, Vec2::new(452.0, 382.0));
        let centre = drag.position().unwrap();
        assert!(centre.x.abs() < 1e-3 && centre.y.abs() < 1e-3);

        assert!(drag.pointer_up());
        assert!(!drag.pointer_up());
        assert!(drag.pointer_move(Vec2::new(0.0, 0.0), &vp, &cam).is_none());
    }

    #[test]
    fn repeated_pointer_down_keeps_first_capture() {
        let (mut drag, vp, cam) = setup();
        drag.pointer_down(Vec2::new(800.0, 300.0), &vp, &cam);
        drag.pointer_down(Vec2::new(760.0, 290.0), &vp, &cam);
        assert_eq!(drag.state().pointer_offset, Vec2::new(48.0, 18.0));
    }

    #[test]
    fn parallel_ray_leaves_position_unchanged() {
        let (mut drag, vp, cam) = setup();
        let sideways = Camera {
            eye: Vec3::ZERO,
            target: Vec3::X,
            aspect: vp.aspect(),
            ..Camera::default()
        };
        drag.pointer_down(Vec2::new(800.0, 300.0), &vp, &cam);
        drag.place(Vec3::new(1.0, 2.0, 3.0));
        // viewport centre looks straight down +X, parallel to the z-facing plane
        assert!(drag.pointer_move(Vec2::new(500.0, 400.0), &vp, &sideways).is_none());
        assert!(drag.is_dragging());
        assert_eq!(drag.position(), Some(Vec3::new(1.0, 2.0, 3.0)));
    }
}
