//! Tunable parameters for the fan simulation.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts;

/// Every knob the engine reads. Missing fields deserialize to their defaults,
/// so a host can override a subset with a partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanConfig {
    pub influence_radius: f64,
    pub fan_speed: f64,
    pub fan_speed_narrow: f64,
    pub narrow_viewport_width: f64,
    pub damping_factor: f64,
    pub velocity_snap: f64,
    pub bounce_restitution: f64,
    pub bounce_distance: f64,
    pub wheel_divisor: f64,
    pub touch_rotate_sensitivity: f64,
    pub tap_threshold_ms: f64,
    pub activation_pulse_ms: f64,
    pub activated_hold_ms: f64,
    pub enable_debounce_ms: f64,
    pub disable_clear_ms: f64,
    pub hotspot_size: f64,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            influence_radius: consts::INFLUENCE_RADIUS,
            fan_speed: consts::FAN_SPEED,
            fan_speed_narrow: consts::FAN_SPEED_NARROW,
            narrow_viewport_width: consts::NARROW_VIEWPORT_WIDTH,
            damping_factor: consts::DAMPING_FACTOR,
            velocity_snap: consts::VELOCITY_SNAP,
            bounce_restitution: consts::BOUNCE_RESTITUTION,
            bounce_distance: consts::BOUNCE_DISTANCE,
            wheel_divisor: consts::WHEEL_DIVISOR,
            touch_rotate_sensitivity: consts::TOUCH_ROTATE_SENSITIVITY,
            tap_threshold_ms: consts::TAP_THRESHOLD_MS,
            activation_pulse_ms: consts::ACTIVATION_PULSE_MS,
            activated_hold_ms: consts::ACTIVATED_HOLD_MS,
            enable_debounce_ms: consts::ENABLE_DEBOUNCE_MS,
            disable_clear_ms: consts::DISABLE_CLEAR_MS,
            hotspot_size: consts::HOTSPOT_SIZE,
        }
    }
}

impl FanConfig {
    /// Parse a (possibly partial) JSON override. Empty input yields defaults.
    ///
    /// # Errors
    ///
    /// Returns the parse error when `raw` is not a JSON object of numbers.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw)
    }

    /// Thrust coefficient for a viewport of the given width.
    #[must_use]
    pub fn fan_speed_for_width(&self, width: f64) -> f64 {
        if width < self.narrow_viewport_width {
            self.fan_speed_narrow
        } else {
            self.fan_speed
        }
    }
}
