//! Snapshot of one frame for the on-screen debug overlay.

#[cfg(test)]
#[path = "diagnostics_test.rs"]
mod diagnostics_test;

use serde::Serialize;

use crate::consts::{ACCELERATION_VECTOR_SCALE, HEADING_VECTOR_LENGTH, VELOCITY_VECTOR_SCALE};
use crate::geometry::{Point, Vector};
use crate::input::FanState;
use crate::physics::{CursorState, RelativeMeasurement, StepReport};

/// A line to draw, in viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Diagnostics {
    pub cursor: Point,
    pub fan: Point,
    pub fan_angle: f64,
    pub relative: RelativeMeasurement,
    pub velocity: Vector,
    pub speed: f64,
    pub acceleration: Vector,
    pub pinch_ratio: f64,
}

impl Diagnostics {
    #[must_use]
    pub fn capture(cursor: &CursorState, fan: &FanState, step: &StepReport, pinch_ratio: f64) -> Self {
        Self {
            cursor: cursor.position,
            fan: fan.position,
            fan_angle: fan.angle,
            relative: step.relative,
            velocity: cursor.velocity,
            speed: cursor.speed,
            acceleration: step.acceleration,
            pinch_ratio,
        }
    }

    #[must_use]
    pub fn velocity_line(&self) -> Segment {
        Segment { from: self.cursor, to: self.cursor.offset(self.velocity.scale(VELOCITY_VECTOR_SCALE)) }
    }

    #[must_use]
    pub fn acceleration_line(&self) -> Segment {
        Segment { from: self.cursor, to: self.cursor.offset(self.acceleration.scale(ACCELERATION_VECTOR_SCALE)) }
    }

    #[must_use]
    pub fn heading_line(&self) -> Segment {
        Segment { from: self.fan, to: self.fan.offset(Vector::from_polar(self.fan_angle, HEADING_VECTOR_LENGTH)) }
    }

    /// Text block for the overlay, one `<br>`-separated line per value.
    #[must_use]
    pub fn readout(&self) -> String {
        format!(
            "Distance: {:.0}<br>Relative Angle: {:.2}<br>Angle Offset: {:.2}<br>Velocity: {:.2}",
            self.relative.distance.floor(),
            self.relative.bearing,
            self.relative.angle_offset,
            self.speed,
        )
    }
}
