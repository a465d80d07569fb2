//! Directional-force physics: the fan pushes the simulated cursor.
//!
//! Each frame the engine measures where the cursor sits relative to the fan,
//! converts that into an acceleration along the fan-to-cursor line, integrates
//! velocity with explicit Euler, applies frame-rate independent exponential
//! damping, and moves the cursor, reflecting off the viewport edges.
//!
//! There is no fixed timestep. Elapsed wall-clock time is fed straight into the
//! integration, one step per rendered frame.

#[cfg(test)]
#[path = "physics_test.rs"]
mod physics_test;

use serde::{Deserialize, Serialize};

use crate::config::FanConfig;
use crate::geometry::{Point, Rect, Size, Vector, angular_difference, distance, normalize_angle};
use crate::input::FanState;

/// The simulated cursor. Only [`PhysicsEngine`] writes to it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CursorState {
    /// Top-left of the cursor container, in viewport space.
    pub position: Point,
    pub velocity: Vector,
    /// Magnitude of `velocity`, refreshed after damping.
    pub speed: f64,
}

/// Cursor position relative to the fan, recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RelativeMeasurement {
    /// Cursor-to-fan distance, `>= 0`.
    pub distance: f64,
    /// Direction of the line from the fan through the cursor, in `[0, 2π)`.
    /// This is the direction the fan pushes.
    pub bearing: f64,
    /// Misalignment between the fan heading and `bearing`, in `[0, π]`.
    pub angle_offset: f64,
}

impl RelativeMeasurement {
    #[must_use]
    pub fn measure(fan: &FanState, cursor: Point) -> Self {
        let rel = Vector::between(cursor, fan.position);
        let bearing = normalize_angle(rel.y.atan2(rel.x) + std::f64::consts::PI);
        Self {
            distance: distance(cursor, fan.position),
            bearing,
            angle_offset: angular_difference(fan.angle, bearing),
        }
    }
}

/// Magnitude of the push for one frame.
///
/// Falls off linearly with distance (zero at `radius`) and with half the
/// angular offset; never negative, so the fan cannot pull.
#[must_use]
pub fn thrust(rel: &RelativeMeasurement, fan_speed: f64, radius: f64, elapsed_ms: f64) -> f64 {
    let falloff = (radius - rel.distance) / radius - rel.angle_offset / 2.0;
    fan_speed * falloff.max(0.0) * elapsed_ms
}

/// Acceleration vector for one frame, directed along `rel.bearing`.
#[must_use]
pub fn acceleration(rel: &RelativeMeasurement, fan_speed: f64, radius: f64, elapsed_ms: f64) -> Vector {
    Vector::from_polar(rel.bearing, thrust(rel, fan_speed, radius, elapsed_ms))
}

/// Exponentially decay `velocity` over `elapsed_ms`, snapping tiny components to zero.
#[must_use]
pub fn damp(velocity: Vector, config: &FanConfig, elapsed_ms: f64) -> Vector {
    let decay = config.damping_factor.powf(elapsed_ms / 1000.0);
    let snap = |v: f64| if v.abs() < config.velocity_snap { 0.0 } else { v };
    Vector::new(snap(velocity.x * decay), snap(velocity.y * decay))
}

/// Which axes reflected during a position update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounce {
    pub x: bool,
    pub y: bool,
}

/// Reflect one axis if the tentative coordinate pushes the cursor's leading
/// half-extent past the edge it is moving toward. A cursor already outside
/// and heading back in is left to travel. Returns the final coordinate.
fn reflect_axis(
    current: f64,
    velocity: &mut f64,
    min: f64,
    max: f64,
    half_extent: f64,
    config: &FanConfig,
) -> (f64, bool) {
    let tentative = current + *velocity;
    let crosses_min = *velocity < 0.0 && tentative < min + half_extent;
    let crosses_max = *velocity > 0.0 && tentative + half_extent > max;
    if crosses_min || crosses_max {
        *velocity *= config.bounce_restitution;
        return (current + *velocity * config.bounce_distance, true);
    }
    (tentative, false)
}

/// Move `position` by `velocity`, bouncing off `bounds` per axis.
///
/// A bounced axis loses speed by the restitution factor, reverses, and the
/// cursor backs off by the reflected velocity times the bounce distance.
pub fn integrate_position(
    position: Point,
    velocity: &mut Vector,
    bounds: &Rect,
    cursor_size: Size,
    config: &FanConfig,
) -> (Point, Bounce) {
    let half = cursor_size.half();
    let (y, bounce_y) = reflect_axis(position.y, &mut velocity.y, bounds.top, bounds.bottom, half.height, config);
    let (x, bounce_x) = reflect_axis(position.x, &mut velocity.x, bounds.left, bounds.right, half.width, config);
    (Point::new(x, y), Bounce { x: bounce_x, y: bounce_y })
}

/// Everything one step produced, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StepReport {
    pub relative: RelativeMeasurement,
    pub acceleration: Vector,
    pub bounce: Bounce,
}

/// Owns the cursor and the frame clock.
#[derive(Debug, Clone, Default)]
pub struct PhysicsEngine {
    pub cursor: CursorState,
    last_frame_ms: Option<f64>,
    last_step: Option<StepReport>,
}

impl PhysicsEngine {
    #[must_use]
    pub fn new(cursor_position: Point) -> Self {
        Self {
            cursor: CursorState { position: cursor_position, ..CursorState::default() },
            last_frame_ms: None,
            last_step: None,
        }
    }

    /// Forget the frame baseline so the next frame only records a timestamp.
    pub fn reset_clock(&mut self) {
        self.last_frame_ms = None;
    }

    /// Pull the cursor back inside `bounds` after the viewport shrank. Returns
    /// true if it moved. A viewport narrower than the cursor centers it.
    pub fn confine(&mut self, bounds: &Rect, cursor_size: Size) -> bool {
        let half = cursor_size.half();
        let clamp = |v: f64, lo: f64, hi: f64| if lo > hi { (lo + hi) / 2.0 } else { v.clamp(lo, hi) };
        let position = self.cursor.position;
        let confined = Point::new(
            clamp(position.x, bounds.left + half.width, bounds.right - half.width),
            clamp(position.y, bounds.top + half.height, bounds.bottom - half.height),
        );
        self.cursor.position = confined;
        confined != position
    }

    /// Record a frame timestamp. Returns the elapsed time since the previous
    /// frame, or `None` for the first frame after a reset.
    pub fn tick(&mut self, timestamp_ms: f64) -> Option<f64> {
        let previous = self.last_frame_ms.replace(timestamp_ms)?;
        Some((timestamp_ms - previous).max(0.0))
    }

    /// The report from the most recent step, if any.
    #[must_use]
    pub fn last_step(&self) -> Option<&StepReport> {
        self.last_step.as_ref()
    }

    /// Advance the cursor by one frame.
    pub fn step(
        &mut self,
        fan: &FanState,
        bounds: &Rect,
        cursor_size: Size,
        fan_speed: f64,
        config: &FanConfig,
        elapsed_ms: f64,
    ) -> StepReport {
        let relative = RelativeMeasurement::measure(fan, self.cursor.position);
        let accel = acceleration(&relative, fan_speed, config.influence_radius, elapsed_ms);

        let mut velocity = damp(
            Vector::new(self.cursor.velocity.x + accel.x, self.cursor.velocity.y + accel.y),
            config,
            elapsed_ms,
        );
        self.cursor.speed = velocity.length();

        let (position, bounce) = integrate_position(self.cursor.position, &mut velocity, bounds, cursor_size, config);
        if bounce.x || bounce.y {
            log::debug!("cursor bounced (x: {}, y: {})", bounce.x, bounce.y);
        }
        self.cursor.position = position;
        self.cursor.velocity = velocity;

        let report = StepReport { relative, acceleration: accel, bounce };
        self.last_step = Some(report);
        report
    }
}
