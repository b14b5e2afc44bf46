//! Camera and picking geometry shared with the frontends.
//!
//! These types avoid platform-specific APIs and are used on both native and
//! web targets: the frontends fill in a [`Viewport`] from their window/canvas
//! and the engine turns pointer coordinates into world-space rays with them.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, PARALLEL_EPSILON};
use crate::layout::Layout;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 3.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    /// Camera posed at the planned anchors.
    pub fn from_layout(layout: &Layout, aspect: f32, fov_degrees: f32) -> Self {
        Self {
            eye: layout.camera_pos,
            target: layout.camera_target,
            aspect,
            fovy_radians: fov_degrees.to_radians(),
            ..Self::default()
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// World-space ray through a point given in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: self.eye,
            direction: (p1 - self.eye).normalize_or_zero(),
        }
    }

    /// Project a world point to viewport-relative pixels. `None` when the
    /// point is behind the camera.
    pub fn world_to_viewport(&self, p: Vec3, viewport: &Viewport) -> Option<Vec2> {
        let clip = self.view_proj() * p.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(viewport.ndc_to_pixels(Vec2::new(ndc.x, ndc.y)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Points `p` with `normal · p == distance`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    /// Plane facing the viewer (+Z) at the given depth.
    pub fn facing_viewer(depth: f32) -> Self {
        Self {
            normal: Vec3::Z,
            distance: depth,
        }
    }
}

impl Ray {
    /// Nearest hit in front of the origin; `None` when parallel or behind.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Vec3> {
        let denom = plane.normal.dot(self.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (plane.distance - plane.normal.dot(self.origin)) / denom;
        (t >= 0.0).then(|| self.origin + self.direction * t)
    }
}

/// Client-space rectangle of the drawing surface (CSS pixels on web,
/// logical pixels on native).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    /// Client coordinates to NDC (x right, y up, both in -1..1). `None` for a
    /// degenerate viewport.
    pub fn to_ndc(&self, client: Vec2) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let x = ((client.x - self.left) / self.width) * 2.0 - 1.0;
        let y = -(((client.y - self.top) / self.height) * 2.0 - 1.0);
        Some(Vec2::new(x, y))
    }

    /// NDC back to viewport-relative pixels (origin at the viewport's top-left).
    pub fn ndc_to_pixels(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_corners() {
        let vp = Viewport {
            left: 10.0,
            top: 20.0,
            width: 200.0,
            height: 100.0,
        };
        assert_eq!(vp.to_ndc(Vec2::new(10.0, 20.0)), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(vp.to_ndc(Vec2::new(210.0, 120.0)), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(vp.to_ndc(Vec2::new(110.0, 70.0)), Some(Vec2::ZERO));
        assert_eq!(Viewport::new(0.0, 10.0).to_ndc(Vec2::ZERO), None);
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = Camera {
            eye: Vec3::new(0.0, 0.0, 6.0),
            target: Vec3::ZERO,
            ..Camera::default()
        };
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
        let hit = ray.intersect_plane(&Plane::facing_viewer(1.0)).unwrap();
        assert!((hit - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn parallel_ray_misses_plane() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::X,
        };
        assert_eq!(ray.intersect_plane(&Plane::facing_viewer(0.0)), None);
    }

    #[test]
    fn plane_behind_ray_is_missed() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::Z,
        };
        assert_eq!(ray.intersect_plane(&Plane::facing_viewer(0.0)), None);
    }

    #[test]
    fn projection_round_trips_through_ndc() {
        let cam = Camera {
            eye: Vec3::new(0.0, 1.0, 6.0),
            target: Vec3::new(0.0, 1.0, 0.0),
            aspect: 2.0,
            ..Camera::default()
        };
        let vp = Viewport::new(800.0, 400.0);
        let px = cam.world_to_viewport(Vec3::new(0.0, 1.0, 0.0), &vp).unwrap();
        assert!((px - Vec2::new(400.0, 200.0)).length() < 1e-2);
        assert!(cam.world_to_viewport(Vec3::new(0.0, 1.0, 10.0), &vp).is_none());
    }
}
