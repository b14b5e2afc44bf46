//! Per-frame marker instances for the renderer.
//!
//! The engine does not draw; it hands the renderer a flat list of quads to
//! place. Every instance is a camera-facing quad that the shader shades
//! either as a rectangle or as a (possibly hollow) disc.

use crate::bounds::BoundingVolume;
use crate::constants::{CARD_GHOST_SIZE, HOTSPOT_PULSE_OUTER, HOTSPOT_RING_INNER};
use crate::drag::HudCard;
use crate::layout::Layout;
use crate::session::FrameSnapshot;
use crate::state::{Camera, Plane, Viewport};
use glam::{Vec2, Vec3};

pub const SHAPE_RECT: f32 = 0.0;
pub const SHAPE_DISC: f32 = 1.0;

const HOTSPOT_RGB: [f32; 3] = [0.98, 0.78, 0.03]; // hsl(47 97% 50%)
const BODY_RGB: [f32; 3] = [0.16, 0.17, 0.19];
const SCREEN_RGB: [f32; 3] = [0.90, 0.90, 0.90];
const CARD_RGB: [f32; 3] = [0.22, 0.45, 0.95];

pub const HOTSPOT_OPACITY_NEAR: f32 = 0.25;
pub const HOTSPOT_OPACITY_FAR: f32 = 0.12;
const GLOW_OPACITY_SPAN: f32 = 0.8;
const PULSE_BASE: f32 = 0.25;
const PULSE_SWING: f32 = 0.15;
const PULSE_RATE: f32 = 8.0; // radians per second

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkerInstance {
    pub pos: [f32; 3],
    pub shape: f32,
    /// Full width/height in world units.
    pub size: [f32; 2],
    /// Hollow-disc inner radius as a fraction of the outer radius.
    pub inner: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

/// Camera block shared by every marker.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkerUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// Billboard axes in world space (w unused).
    pub right: [f32; 4],
    pub up: [f32; 4],
}

impl MarkerUniforms {
    pub fn from_camera(camera: &Camera) -> Self {
        let forward = camera.forward();
        let right = forward.cross(camera.up).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward).try_normalize().unwrap_or(Vec3::Y);
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            right: right.extend(0.0).to_array(),
            up: up.extend(0.0).to_array(),
        }
    }
}

fn rgba(rgb: [f32; 3], a: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], a]
}

fn disc(pos: [f32; 3], radius: f32, inner: f32, color: [f32; 4]) -> MarkerInstance {
    MarkerInstance {
        pos,
        shape: SHAPE_DISC,
        size: [radius * 2.0, radius * 2.0],
        inner,
        _pad: 0.0,
        color,
    }
}

/// Kiosk silhouette, screen panel, the hotspot sphere with its glow and
/// pulse rings while the payment screen is up, and the card last.
pub fn build(
    frame: &FrameSnapshot,
    bounds: &BoundingVolume,
    layout: &Layout,
    hotspot_radius: f32,
    out: &mut Vec<MarkerInstance>,
) {
    out.clear();
    out.push(MarkerInstance {
        pos: bounds.center.to_array(),
        shape: SHAPE_RECT,
        size: [bounds.size.x, bounds.size.y],
        inner: 0.0,
        _pad: 0.0,
        color: rgba(BODY_RGB, 1.0),
    });
    out.push(MarkerInstance {
        pos: layout.screen_pos.to_array(),
        shape: SHAPE_RECT,
        size: layout.screen_size.to_array(),
        inner: 0.0,
        _pad: 0.0,
        color: rgba(SCREEN_RGB, 1.0),
    });

    if frame.hotspot_visible {
        hotspot(frame, layout, hotspot_radius, out);
    }

    if let Some(card) = frame.card_position {
        out.push(MarkerInstance {
            pos: card.to_array(),
            shape: SHAPE_RECT,
            size: CARD_GHOST_SIZE,
            inner: 0.0,
            _pad: 0.0,
            color: rgba(CARD_RGB, if frame.dragging { 0.75 } else { 0.95 }),
        });
    }
}

/// The HUD card itself, for front-ends without a DOM to draw it: its
/// rectangle cast onto the drag plane. `None` when a corner misses the plane.
pub fn hud_card(
    hud: &HudCard,
    viewport: &Viewport,
    camera: &Camera,
    plane: &Plane,
) -> Option<MarkerInstance> {
    let cast = |local: Vec2| {
        let ndc = viewport.to_ndc(local + Vec2::new(viewport.left, viewport.top))?;
        camera.ray_from_ndc(ndc).intersect_plane(plane)
    };
    let tl = cast(hud.origin)?;
    let br = cast(hud.origin + hud.size)?;
    Some(MarkerInstance {
        pos: ((tl + br) * 0.5).to_array(),
        shape: SHAPE_RECT,
        size: [(br.x - tl.x).abs(), (tl.y - br.y).abs()],
        inner: 0.0,
        _pad: 0.0,
        color: rgba(CARD_RGB, 1.0),
    })
}

fn hotspot(
    frame: &FrameSnapshot,
    layout: &Layout,
    hotspot_radius: f32,
    out: &mut Vec<MarkerInstance>,
) {
    let p = layout.hotspot_pos.to_array();
    let prox = frame.proximity;
    let sphere_alpha = if prox.is_near {
        HOTSPOT_OPACITY_NEAR
    } else {
        HOTSPOT_OPACITY_FAR
    };
    out.push(disc(p, hotspot_radius, 0.0, rgba(HOTSPOT_RGB, sphere_alpha)));
    out.push(disc(
        p,
        hotspot_radius,
        HOTSPOT_RING_INNER,
        rgba(HOTSPOT_RGB, prox.intensity * GLOW_OPACITY_SPAN),
    ));
    if prox.is_near {
        let t = frame.elapsed.as_secs_f32();
        let alpha = PULSE_BASE + (t * PULSE_RATE).sin() * PULSE_SWING;
        out.push(disc(
            p,
            hotspot_radius * HOTSPOT_PULSE_OUTER,
            1.0 / HOTSPOT_PULSE_OUTER,
            rgba(HOTSPOT_RGB, alpha),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowState;
    use crate::layout::plan;
    use crate::proximity::ProximitySnapshot;

    fn scene() -> (BoundingVolume, Layout) {
        let bv = BoundingVolume::from_min_max(Vec3::new(-1.0, 0.0, -0.5), Vec3::new(1.0, 3.0, 0.5));
        (bv, plan(&bv))
    }

    #[test]
    fn hotspot_markers_only_while_visible() {
        let (bv, layout) = scene();
        let mut out = Vec::new();
        let mut frame = FrameSnapshot::idle(FlowState::Welcome);
        build(&frame, &bv, &layout, 0.8, &mut out);
        assert_eq!(out.len(), 2);

        frame.hotspot_visible = true;
        build(&frame, &bv, &layout, 0.8, &mut out);
        assert_eq!(out.len(), 4);
        assert_eq!(out[2].color[3], HOTSPOT_OPACITY_FAR);
        assert_eq!(out[3].color[3], 0.0);
    }

    #[test]
    fn near_card_adds_pulse_ring_and_glow() {
        let (bv, layout) = scene();
        let mut out = Vec::new();
        let mut frame = FrameSnapshot::idle(FlowState::Payment);
        frame.hotspot_visible = true;
        frame.proximity = ProximitySnapshot {
            distance: 0.5,
            intensity: 0.75,
            is_near: true,
        };
        build(&frame, &bv, &layout, 0.8, &mut out);
        assert_eq!(out.len(), 5);
        assert_eq!(out[2].color[3], HOTSPOT_OPACITY_NEAR);
        assert!((out[3].color[3] - 0.6).abs() < 1e-6);
        assert!((out[4].size[0] - 2.56).abs() < 1e-5);
    }

    #[test]
    fn billboard_axes_follow_the_camera() {
        let cam = Camera {
            eye: Vec3::new(0.0, 1.0, 5.0),
            target: Vec3::new(0.0, 1.0, 0.0),
            ..Camera::default()
        };
        let u = MarkerUniforms::from_camera(&cam);
        assert!((Vec3::from_slice(&u.right[..3]) - Vec3::X).length() < 1e-6);
        assert!((Vec3::from_slice(&u.up[..3]) - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn hud_card_lands_on_the_drag_plane() {
        let vp = Viewport::new(800.0, 600.0);
        let cam = Camera {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            aspect: vp.aspect(),
            ..Camera::default()
        };
        let hud = HudCard {
            origin: Vec2::new(350.0, 250.0),
            size: Vec2::new(100.0, 100.0),
        };
        let m = hud_card(&hud, &vp, &cam, &Plane::facing_viewer(0.0)).unwrap();
        assert!(m.pos[0].abs() < 1e-4 && m.pos[1].abs() < 1e-4);
        assert!(m.pos[2].abs() < 1e-4);
        assert!((m.size[0] - m.size[1]).abs() < 1e-4);
        assert!(m.size[0] > 0.0);
    }

    #[test]
    fn card_is_drawn_last() {
        let (bv, layout) = scene();
        let mut out = Vec::new();
        let mut frame = FrameSnapshot::idle(FlowState::Options);
        frame.card_position = Some(layout.card_start_pos);
        build(&frame, &bv, &layout, 0.8, &mut out);
        assert_eq!(out.len(), 3);
        assert_eq!(out[2].pos, layout.card_start_pos.to_array());
        assert_eq!(out[2].size, CARD_GHOST_SIZE);
    }
}
