//! Runtime tunables and their `key=value` parsing.

use crate::constants::{
    CAMERA_FOV_DEGREES, DETECTION_DISTANCE, HOTSPOT_RADIUS, MODEL_SCALE, PROCESSING_DELAY_MS,
};
use crate::error::ConfigError;
use crate::proximity::TriggerPolicy;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct KioskConfig {
    pub detection_distance: f32,
    pub hotspot_radius: f32,
    pub trigger: TriggerPolicy,
    pub processing_delay: Duration,
    pub model_scale: f32,
    pub fov_degrees: f32,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            detection_distance: DETECTION_DISTANCE,
            hotspot_radius: HOTSPOT_RADIUS,
            trigger: TriggerPolicy::OnRelease,
            processing_delay: Duration::from_millis(PROCESSING_DELAY_MS),
            model_scale: MODEL_SCALE,
            fov_degrees: CAMERA_FOV_DEGREES,
        }
    }
}

fn number(key: &str, value: &str) -> Result<f32, ConfigError> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}

impl KioskConfig {
    /// Apply a single `key=value` setting.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key.trim() {
            "detection_distance" => self.detection_distance = number(key, value)?,
            "hotspot_radius" => self.hotspot_radius = number(key, value)?,
            "trigger" => self.trigger = value.parse()?,
            "processing_ms" => {
                let ms = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidNumber {
                        key: key.to_string(),
                        value: value.to_string(),
                    })?;
                self.processing_delay = Duration::from_millis(ms);
            }
            "model_scale" => self.model_scale = number(key, value)?,
            "fov" => self.fov_degrees = number(key, value)?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Defaults overridden by `pairs`, then validated.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut cfg = Self::default();
        for (k, v) in pairs {
            cfg.set(k, v)?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a URL query string such as `?trigger=approach&processing_ms=900`.
    /// Empty segments are skipped.
    pub fn from_query(query: &str) -> Result<Self, ConfigError> {
        let pairs = query
            .trim_start_matches('?')
            .split('&')
            .filter(|seg| !seg.is_empty())
            .map(|seg| seg.split_once('=').unwrap_or((seg, "")));
        Self::from_pairs(pairs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detection_distance <= 0.0 {
            return Err(ConfigError::OutOfRange {
                key: "detection_distance",
                reason: "must be positive",
            });
        }
        if self.hotspot_radius <= 0.0 {
            return Err(ConfigError::OutOfRange {
                key: "hotspot_radius",
                reason: "must be positive",
            });
        }
        if self.processing_delay.is_zero() {
            return Err(ConfigError::OutOfRange {
                key: "processing_ms",
                reason: "must be at least 1ms",
            });
        }
        if self.model_scale <= 0.0 {
            return Err(ConfigError::OutOfRange {
                key: "model_scale",
                reason: "must be positive",
            });
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::OutOfRange {
                key: "fov",
                reason: "must lie between 0 and 180 degrees",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(KioskConfig::default().validate().is_ok());
    }

    #[test]
    fn query_overrides_defaults() {
        let cfg = KioskConfig::from_query("?trigger=approach&processing_ms=900&&fov=50").unwrap();
        assert_eq!(cfg.trigger, TriggerPolicy::OnApproach);
        assert_eq!(cfg.processing_delay, Duration::from_millis(900));
        assert_eq!(cfg.fov_degrees, 50.0);
        assert_eq!(cfg.detection_distance, DETECTION_DISTANCE);
    }

    #[test]
    fn bad_values_are_reported() {
        assert_eq!(
            KioskConfig::from_query("speed=3"),
            Err(ConfigError::UnknownKey("speed".into()))
        );
        assert!(matches!(
            KioskConfig::from_query("detection_distance=far"),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            KioskConfig::from_query("detection_distance=-1"),
            Err(ConfigError::OutOfRange { key: "detection_distance", .. })
        ));
        assert!(matches!(
            KioskConfig::from_query("processing_ms=0"),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn empty_query_gives_defaults() {
        assert_eq!(KioskConfig::from_query("").unwrap(), KioskConfig::default());
    }
}
