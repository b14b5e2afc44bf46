//! Orbit camera around the planned target: rotate and zoom, no pan.
//!
//! Angles are spherical around +Y. `polar` is measured from straight up, so
//! the upper limit keeps the eye above the floor.

use crate::constants::{
    ORBIT_MAX_DISTANCE, ORBIT_MAX_POLAR, ORBIT_MIN_DISTANCE, ORBIT_MIN_POLAR, ORBIT_ZOOM_STEP,
};
use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub target: Vec3,
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
}

impl Orbit {
    /// Spherical coordinates of `eye` around `target`, taken as is. Limits
    /// apply from the first rotate or zoom.
    pub fn from_pose(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        let polar = if distance > 0.0 {
            (offset.y / distance).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };
        Self {
            target,
            azimuth: offset.x.atan2(offset.z),
            polar,
            distance,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        self.target + Vec3::new(sp * sa, cp, sp * ca) * self.distance
    }

    /// Pointer travel in viewport pixels; a drag across the full viewport
    /// height turns one full revolution.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.azimuth -= TAU * delta.x / h;
        self.polar -= TAU * delta.y / h;
        self.clamp();
    }

    /// Positive steps move away from the target.
    pub fn zoom(&mut self, steps: f32) {
        self.distance *= ORBIT_ZOOM_STEP.powf(steps);
        self.clamp();
    }

    fn clamp(&mut self) {
        self.polar = self.polar.clamp(ORBIT_MIN_POLAR, ORBIT_MAX_POLAR);
        self.distance = self.distance.clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }
}
