//! Input model: fan state, the activation pulse, and the touch gesture tracker.
//!
//! Input adapters translate raw pointer, wheel and touch events into two
//! control signals (fan position and fan heading) plus a one-shot activation
//! pulse. They never touch the simulated cursor. Whether an adapter runs at
//! all is decided by the engine, which drops events while the fan is disabled.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::config::FanConfig;
use crate::geometry::{Point, normalize_angle};

/// The user-controlled emitter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FanState {
    /// Viewport position, set 1:1 from the pointer.
    pub position: Point,
    /// Heading in radians, always in `[0, 2π)`.
    pub angle: f64,
}

impl FanState {
    /// Set the heading, wrapping it into `[0, 2π)`.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = normalize_angle(angle);
    }
}

/// A click or tap waiting to be consumed by a hovered element.
///
/// The pulse remembers when it was armed; it counts as pending only until the
/// configured lifetime has elapsed, so a stale click never fires on a later
/// frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActivationPulse {
    armed_at: Option<f64>,
}

impl ActivationPulse {
    pub fn arm(&mut self, now_ms: f64) {
        self.armed_at = Some(now_ms);
    }

    /// Whether the pulse is armed and younger than `lifetime_ms`.
    #[must_use]
    pub fn is_pending(&self, now_ms: f64, lifetime_ms: f64) -> bool {
        self.armed_at.is_some_and(|at| now_ms - at < lifetime_ms)
    }

    /// Drop the pulse.
    pub fn consume(&mut self) {
        self.armed_at = None;
    }

    /// Drop the pulse if it has outlived `lifetime_ms`. Returns true if it expired.
    pub fn expire(&mut self, now_ms: f64, lifetime_ms: f64) -> bool {
        if self.armed_at.is_some() && !self.is_pending(now_ms, lifetime_ms) {
            self.armed_at = None;
            return true;
        }
        false
    }
}

/// One active touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchContact {
    /// Browser-assigned contact identifier.
    pub id: i32,
    pub point: Point,
}

/// Reference values captured when a second finger lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateAnchor {
    /// Identifiers of the two contacts, in gesture-start order.
    pub contacts: (i32, i32),
    /// Bearing from the first contact to the second at gesture start.
    pub contact_angle: f64,
    /// Fan heading at gesture start.
    pub fan_angle: f64,
    /// Distance between the two contacts at gesture start.
    pub spread: f64,
}

/// Tracks the touch sequence in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchGesture {
    /// When the most recent touch-start arrived.
    pub started_ms: Option<f64>,
    /// Present while a two-finger rotation is active.
    pub rotate: Option<RotateAnchor>,
    /// Current spread divided by the starting spread, for the overlay.
    pub pinch_ratio: f64,
}

/// Fan control state written by the adapters.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub fan: FanState,
    pub pulse: ActivationPulse,
    pub touch: TouchGesture,
}

fn contact_bearing(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

fn contact_spread(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// The two anchored contacts in anchor order, if exactly those two are down.
/// Browsers do not promise a stable order in the touch list.
fn anchored_pair(contacts: &[TouchContact], ids: (i32, i32)) -> Option<(TouchContact, TouchContact)> {
    let [x, y] = contacts else {
        return None;
    };
    if (x.id, y.id) == ids {
        Some((*x, *y))
    } else if (y.id, x.id) == ids {
        Some((*y, *x))
    } else {
        None
    }
}

impl InputState {
    /// Pointer moved: the fan follows it exactly.
    pub fn pointer_move(&mut self, point: Point) {
        self.fan.position = point;
    }

    /// Wheel turned: rotate the fan by `delta_y / wheel_divisor` radians.
    pub fn wheel(&mut self, delta_y: f64, config: &FanConfig) {
        self.fan.set_angle(self.fan.angle + delta_y / config.wheel_divisor);
    }

    /// Mouse click: arm the activation pulse.
    pub fn click(&mut self, now_ms: f64) {
        self.pulse.arm(now_ms);
    }

    /// Touch started. The fan jumps to the first contact; with exactly two
    /// contacts the rotation anchor is captured.
    pub fn touch_start(&mut self, contacts: &[TouchContact], now_ms: f64) {
        self.touch.started_ms = Some(now_ms);
        if let Some(first) = contacts.first() {
            self.pointer_move(first.point);
        }
        if let [a, b] = contacts {
            self.touch.rotate = Some(RotateAnchor {
                contacts: (a.id, b.id),
                contact_angle: contact_bearing(a.point, b.point),
                fan_angle: self.fan.angle,
                spread: contact_spread(a.point, b.point),
            });
            self.touch.pinch_ratio = 1.0;
        }
    }

    /// Touch moved. The two anchored contacts, matched by identifier, rotate
    /// the fan relative to the anchor; the first contact always positions it.
    pub fn touch_move(&mut self, contacts: &[TouchContact], config: &FanConfig) {
        if let Some(anchor) = self.touch.rotate
            && let Some((a, b)) = anchored_pair(contacts, anchor.contacts)
        {
            let delta = contact_bearing(a.point, b.point) - anchor.contact_angle;
            self.fan.set_angle(anchor.fan_angle + delta * config.touch_rotate_sensitivity);
            if anchor.spread > 0.0 {
                self.touch.pinch_ratio = contact_spread(a.point, b.point) / anchor.spread;
            }
        }
        if let Some(first) = contacts.first() {
            self.pointer_move(first.point);
        }
    }

    /// A contact lifted. Returns true when the sequence was short enough to be
    /// a tap, in which case the pulse is armed.
    pub fn touch_end(&mut self, remaining: usize, now_ms: f64, config: &FanConfig) -> bool {
        if remaining < 2 {
            self.touch.rotate = None;
        }
        let Some(started) = self.touch.started_ms else {
            return false;
        };
        if now_ms - started < config.tap_threshold_ms {
            self.pulse.arm(now_ms);
            return true;
        }
        false
    }
}
