use derive_more::{Display, From, Into};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into)]
pub struct PointerId(u32);

/// Direction of `point` seen from `pivot`, in degrees. Screen coordinates:
/// y grows downward, so positive angles turn clockwise.
pub fn pointer_angle(pivot: Point, point: Point) -> f64 {
    let (dx, dy) = (point.x - pivot.x, point.y - pivot.y);
    dy.atan2(dx).to_degrees()
}

/// Maps any angle into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if a >= 360.0 { 0.0 } else { a }
}

/// Shortest signed turn from `from` to `to`, in `(-180, 180]`.
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    let d = normalize_degrees(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}
