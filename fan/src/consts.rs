//! Shared numeric constants for the fan crate.
//!
//! These are the defaults baked into [`crate::config::FanConfig`]; the host may
//! override any of them at start-up.

// ── Physics ─────────────────────────────────────────────────────

/// Radius (CSS pixels) beyond which the fan has no effect on the cursor.
pub const INFLUENCE_RADIUS: f64 = 200.0;

/// Fan thrust coefficient on regular viewports.
pub const FAN_SPEED: f64 = 0.1;

/// Fan thrust coefficient on viewports narrower than [`NARROW_VIEWPORT_WIDTH`].
pub const FAN_SPEED_NARROW: f64 = 0.05;

/// Viewport width breakpoint (CSS pixels) below which [`FAN_SPEED_NARROW`] applies.
pub const NARROW_VIEWPORT_WIDTH: f64 = 786.0;

/// Fraction of velocity that survives one second of travel.
pub const DAMPING_FACTOR: f64 = 0.3;

/// Velocity components below this magnitude snap to zero.
pub const VELOCITY_SNAP: f64 = 0.01;

/// Velocity multiplier applied to an axis that hits a viewport edge.
pub const BOUNCE_RESTITUTION: f64 = -0.5;

/// The bounce-back step is the reflected velocity times this factor.
pub const BOUNCE_DISTANCE: f64 = 2.0;

// ── Input ───────────────────────────────────────────────────────

/// Wheel `deltaY` is divided by this to get radians of fan rotation.
pub const WHEEL_DIVISOR: f64 = 300.0;

/// Multiplier applied to the two-finger rotation delta.
pub const TOUCH_ROTATE_SENSITIVITY: f64 = 1.5;

/// Touches shorter than this (ms) count as a tap.
pub const TAP_THRESHOLD_MS: f64 = 100.0;

// ── Timing ──────────────────────────────────────────────────────

/// Lifetime of an unconsumed activation pulse (ms).
pub const ACTIVATION_PULSE_MS: f64 = 200.0;

/// How long an element keeps its activated flag after a click (ms).
pub const ACTIVATED_HOLD_MS: f64 = 200.0;

/// Delay between `enable()` and the first simulated frame (ms).
pub const ENABLE_DEBOUNCE_MS: f64 = 210.0;

/// Delay between `disable()` and clearing presentation flags (ms).
pub const DISABLE_CLEAR_MS: f64 = 200.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Edge length (CSS pixels) of the cursor's hotspot box.
pub const HOTSPOT_SIZE: f64 = 8.0;

// ── Diagnostics ─────────────────────────────────────────────────

/// Overlay scale for the velocity vector.
pub const VELOCITY_VECTOR_SCALE: f64 = 10.0;

/// Overlay scale for the acceleration vector.
pub const ACCELERATION_VECTOR_SCALE: f64 = 50.0;

/// Overlay length of the fan heading line.
pub const HEADING_VECTOR_LENGTH: f64 = 100.0;
