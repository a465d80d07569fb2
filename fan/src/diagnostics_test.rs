#![allow(clippy::float_cmp)]

use std::f64::consts::FRAC_PI_2;

use super::*;

fn sample() -> Diagnostics {
    Diagnostics {
        cursor: Point::new(100.0, 100.0),
        fan: Point::new(50.0, 100.0),
        fan_angle: FRAC_PI_2,
        relative: RelativeMeasurement { distance: 50.7, bearing: 0.0, angle_offset: FRAC_PI_2 },
        velocity: Vector::new(1.0, -0.5),
        speed: 1.118,
        acceleration: Vector::new(0.2, 0.0),
        pinch_ratio: 1.0,
    }
}

#[test]
fn velocity_line_is_scaled_by_ten() {
    let line = sample().velocity_line();
    assert_eq!(line.from, Point::new(100.0, 100.0));
    assert_eq!(line.to, Point::new(110.0, 95.0));
}

#[test]
fn acceleration_line_is_scaled_by_fifty() {
    let line = sample().acceleration_line();
    assert!((line.to.x - 110.0).abs() < 1e-9);
    assert!((line.to.y - 100.0).abs() < 1e-9);
}

#[test]
fn heading_line_points_along_fan_angle() {
    let line = sample().heading_line();
    assert_eq!(line.from, Point::new(50.0, 100.0));
    assert!((line.to.x - 50.0).abs() < 1e-9);
    assert!((line.to.y - 200.0).abs() < 1e-9);
}

#[test]
fn readout_formats_values() {
    assert_eq!(
        sample().readout(),
        "Distance: 50<br>Relative Angle: 0.00<br>Angle Offset: 1.57<br>Velocity: 1.12"
    );
}

#[test]
fn capture_copies_step_values() {
    let cursor = CursorState { position: Point::new(1.0, 2.0), velocity: Vector::new(3.0, 4.0), speed: 5.0 };
    let fan = FanState { position: Point::new(9.0, 9.0), angle: 1.0 };
    let step = StepReport { acceleration: Vector::new(0.5, 0.5), ..StepReport::default() };
    let d = Diagnostics::capture(&cursor, &fan, &step, 1.0);
    assert_eq!(d.cursor, cursor.position);
    assert_eq!(d.speed, 5.0);
    assert_eq!(d.acceleration, Vector::new(0.5, 0.5));
    assert_eq!(d.fan_angle, 1.0);
}
