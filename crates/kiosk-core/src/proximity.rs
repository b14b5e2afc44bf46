//! Card-to-hotspot proximity tracking with a one-shot trigger latch.

use crate::constants::DETECTION_DISTANCE;
use crate::error::ConfigError;
use glam::Vec3;
use std::fmt;
use std::str::FromStr;

/// When a card that is near the hotspot counts as presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriggerPolicy {
    /// Fire once the card is near and no longer being dragged.
    #[default]
    OnRelease,
    /// Fire as soon as the card comes near, drag or not.
    OnApproach,
}

impl TriggerPolicy {
    #[inline]
    fn fires(self, is_near: bool, dragging: bool) -> bool {
        match self {
            TriggerPolicy::OnRelease => is_near && !dragging,
            TriggerPolicy::OnApproach => is_near,
        }
    }
}

impl FromStr for TriggerPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "release" | "on-release" => Ok(TriggerPolicy::OnRelease),
            "approach" | "on-approach" => Ok(TriggerPolicy::OnApproach),
            other => Err(ConfigError::InvalidPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for TriggerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TriggerPolicy::OnRelease => "release",
            TriggerPolicy::OnApproach => "approach",
        })
    }
}

/// Per-tick reading handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximitySnapshot {
    /// Infinite while there is nothing to measure.
    pub distance: f32,
    pub intensity: f32,
    pub is_near: bool,
}

impl ProximitySnapshot {
    pub const IDLE: Self = Self {
        distance: f32::INFINITY,
        intensity: 0.0,
        is_near: false,
    };
}

impl Default for ProximitySnapshot {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Full tracker state, latch included.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProximityState {
    pub distance: f32,
    pub intensity: f32,
    pub is_near: bool,
    pub has_triggered: bool,
}

/// Emitted at most once per activation period.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardDetected {
    pub distance: f32,
    pub position: Vec3,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProximityInput {
    pub position: Option<Vec3>,
    pub dragging: bool,
    pub active: bool,
}

/// Glow intensity for a distance: 1 at the hotspot, 0 at and past the edge.
#[inline]
pub fn intensity_for_distance(distance: f32, detection_distance: f32) -> f32 {
    if detection_distance <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / detection_distance).clamp(0.0, 1.0)
}

#[derive(Clone, Debug)]
pub struct ProximityTracker {
    hotspot: Vec3,
    detection_distance: f32,
    policy: TriggerPolicy,
    active: bool,
    has_triggered: bool,
    last: ProximitySnapshot,
}

impl Default for ProximityTracker {
    fn default() -> Self {
        Self::new(Vec3::ZERO, DETECTION_DISTANCE, TriggerPolicy::default())
    }
}

impl ProximityTracker {
    pub fn new(hotspot: Vec3, detection_distance: f32, policy: TriggerPolicy) -> Self {
        Self {
            hotspot,
            detection_distance,
            policy,
            active: false,
            has_triggered: false,
            last: ProximitySnapshot::IDLE,
        }
    }

    pub fn hotspot(&self) -> Vec3 {
        self.hotspot
    }

    pub fn set_hotspot(&mut self, hotspot: Vec3) {
        self.hotspot = hotspot;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn has_triggered(&self) -> bool {
        self.has_triggered
    }

    pub fn snapshot(&self) -> ProximitySnapshot {
        self.last
    }

    pub fn state(&self) -> ProximityState {
        ProximityState {
            distance: self.last.distance,
            intensity: self.last.intensity,
            is_near: self.last.is_near,
            has_triggered: self.has_triggered,
        }
    }

    /// Switch detection off and clear the latch so the next activation may
    /// fire again.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.has_triggered = false;
        self.last = ProximitySnapshot::IDLE;
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// One tick. Returns the trigger edge, if this tick produced it.
    pub fn update(&mut self, input: ProximityInput) -> Option<CardDetected> {
        if !input.active {
            if self.active || self.has_triggered {
                self.deactivate();
            }
            return None;
        }
        self.active = true;

        let Some(position) = input.position else {
            self.last = ProximitySnapshot::IDLE;
            return None;
        };

        let distance = position.distance(self.hotspot);
        let is_near = distance < self.detection_distance;
        self.last = ProximitySnapshot {
            distance,
            intensity: intensity_for_distance(distance, self.detection_distance),
            is_near,
        };

        if self.has_triggered || !self.policy.fires(is_near, input.dragging) {
            return None;
        }
        self.has_triggered = true;
        log::info!(
            "[hotspot] card detected at d={:.3} ({} policy)",
            distance,
            self.policy
        );
        Some(CardDetected { distance, position })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32) -> ProximityInput {
        ProximityInput {
            position: Some(Vec3::new(x, 0.0, 0.0)),
            dragging: false,
            active: true,
        }
    }

    #[test]
    fn inactive_tracker_reports_idle_and_never_fires() {
        let mut t = ProximityTracker::default();
        let fired = t.update(ProximityInput {
            active: false,
            ..at(0.1)
        });
        assert!(fired.is_none());
        assert_eq!(t.snapshot(), ProximitySnapshot::IDLE);
        assert!(!t.is_active());
    }

    #[test]
    fn absent_position_cannot_be_near() {
        let mut t = ProximityTracker::default();
        let fired = t.update(ProximityInput {
            position: None,
            dragging: false,
            active: true,
        });
        assert!(fired.is_none());
        assert!(!t.snapshot().is_near);
        assert_eq!(t.snapshot().intensity, 0.0);
    }

    #[test]
    fn release_policy_waits_for_drag_to_end() {
        let mut t = ProximityTracker::default();
        assert!(t.update(ProximityInput { dragging: true, ..at(1.0) }).is_none());
        assert!(t.snapshot().is_near);
        let hit = t.update(at(1.0)).expect("fires on release");
        assert!((hit.distance - 1.0).abs() < 1e-6);
        assert!(t.has_triggered());
    }

    #[test]
    fn approach_policy_ignores_drag_state() {
        let mut t = ProximityTracker::new(Vec3::ZERO, 2.0, TriggerPolicy::OnApproach);
        assert!(t.update(ProximityInput { dragging: true, ..at(3.0) }).is_none());
        assert!(t.update(ProximityInput { dragging: true, ..at(1.5) }).is_some());
        assert!(t.update(ProximityInput { dragging: true, ..at(0.5) }).is_none());
    }

    #[test]
    fn latch_clears_on_deactivation() {
        let mut t = ProximityTracker::default();
        assert!(t.update(at(0.5)).is_some());
        assert!(t.update(at(0.2)).is_none());
        t.update(ProximityInput { active: false, ..at(0.2) });
        assert!(!t.has_triggered());
        assert!(t.update(at(0.2)).is_some());
    }

    #[test]
    fn boundary_distance_is_not_near() {
        let mut t = ProximityTracker::default();
        assert!(t.update(at(2.0)).is_none());
        assert!(!t.snapshot().is_near);
        assert_eq!(t.snapshot().intensity, 0.0);
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("release".parse::<TriggerPolicy>(), Ok(TriggerPolicy::OnRelease));
        assert_eq!(" Approach ".parse::<TriggerPolicy>(), Ok(TriggerPolicy::OnApproach));
        assert!("hover".parse::<TriggerPolicy>().is_err());
    }
}
