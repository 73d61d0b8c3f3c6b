use std::f64::consts::{PI, TAU};
use serde::{Deserialize, Serialize};
use crate::common::AxisBox;
use crate::geometry::{Point, Polygon};

/// Number of values describing one box: `[cx, cy, w, h, angle]`.
pub const RBOX_DIM: usize = 5;

/// A rectangle rotated around its center. The angle is in radians,
/// counter-clockwise, and may be given in any range.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotatedBox {
    pub cx: f32,
    pub cy: f32,
    pub w: f32,
    pub h: f32,
    pub angle: f32,
}

impl RotatedBox {
    pub fn new(cx: f32, cy: f32, w: f32, h: f32, angle: f32) -> Self {
        Self { cx, cy, w, h, angle }
    }

    pub fn to_row(&self) -> [f32; RBOX_DIM] {
        [self.cx, self.cy, self.w, self.h, self.angle]
    }

    /// Returns the center as a double precision point.
    pub fn center(&self) -> Point {
        Point::new(self.cx as f64, self.cy as f64)
    }

    /// Rotation angle wrapped into `[-pi, pi)`.
    pub fn normalized_angle(&self) -> f64 {
        normalize_angle(self.angle as f64)
    }

    /// Computes the area of the box in double precision.
    pub fn area(&self) -> f64 {
        self.w as f64 * self.h as f64
    }

    /// A box with no area is a segment or a point; it overlaps nothing.
    pub fn is_degenerate(&self) -> bool {
        self.area() <= 0.0
    }

    /// Corners in counter-clockwise order, expressed relative to `origin`.
    ///
    /// Shifting the origin close to the boxes being compared keeps the
    /// clipping arithmetic away from large coordinates.
    pub fn corners_around(&self, origin: Point) -> [Point; 4] {
        let (sin, cos) = self.normalized_angle().sin_cos();
        let center = self.center() - origin;
        let (hw, hh) = (self.w as f64 / 2.0, self.h as f64 / 2.0);

        [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
            .map(|(x, y)| center + Point::new(x, y).rotate(sin, cos))
    }

    /// Corners in counter-clockwise order in world coordinates.
    pub fn corners(&self) -> [Point; 4] {
        self.corners_around(Point::default())
    }

    /// The box outline as a polygon relative to `origin`.
    pub fn polygon_around(&self, origin: Point) -> Polygon {
        Polygon::from_points(&self.corners_around(origin))
    }

    /// Smallest axis-aligned box enclosing this rotated box.
    pub fn enclosing_axis_box(&self) -> AxisBox {
        let (sin, cos) = self.normalized_angle().sin_cos();
        let (hw, hh) = (self.w as f64 / 2.0, self.h as f64 / 2.0);
        let ex = hw * cos.abs() + hh * sin.abs();
        let ey = hw * sin.abs() + hh * cos.abs();
        let (cx, cy) = (self.cx as f64, self.cy as f64);
        AxisBox::new(cx - ex, cy - ey, cx + ex, cy + ey)
    }

    /// Sets the center of the box.
    pub fn with_center(mut self, cx: f32, cy: f32) -> Self {
        self.cx = cx;
        self.cy = cy;
        self
    }

    /// Sets the width and height of the box.
    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.w = w;
        self.h = h;
        self
    }

    /// Sets the rotation in radians.
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Total order over all fields, used to pick a canonical operand order so
    /// pairwise results do not depend on argument order.
    pub(crate) fn canonical_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_row()
            .iter()
            .zip(other.to_row().iter())
            .map(|(a, b)| a.total_cmp(b))
            .find(|o| o.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

/// Wraps an angle in radians into `[-pi, pi)`. Non-finite input stays
/// non-finite.
pub fn normalize_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((normalize_angle(-5.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert_eq!(normalize_angle(0.25), 0.25);
        assert!(normalize_angle(f64::NAN).is_nan());
    }

    #[test]
    fn test_corners_are_counter_clockwise() {
        let b = RotatedBox::new(3.0, -2.0, 4.0, 2.0, 0.7);
        let polygon = Polygon::from_points(&b.corners());
        assert!((polygon.signed_area() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_enclosing_axis_box() {
        let b = RotatedBox::new(0.0, 0.0, 2.0, 2.0, std::f32::consts::FRAC_PI_4);
        let aabb = b.enclosing_axis_box();
        let s = std::f64::consts::SQRT_2;
        assert!((aabb.x2 - s).abs() < 1e-6);
        assert!((aabb.y1 + s).abs() < 1e-6);
    }
}
