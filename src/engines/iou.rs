//! The pairwise IoU kernel shared by every engine.

use std::cmp::Ordering;
use crate::common::{IouMethod, RotatedBox};
use crate::geometry::intersection_area;

/// IoU of two boxes with the selected method.
pub fn pair_iou(a: &RotatedBox, b: &RotatedBox, method: IouMethod) -> f64 {
    match method {
        IouMethod::RBox => rbox_iou(a, b),
        IouMethod::Box => box_iou(a, b),
    }
}

/// Exact IoU of two rotated rectangles.
///
/// Operands are put in a canonical order first, so `rbox_iou(a, b)` and
/// `rbox_iou(b, a)` run the very same arithmetic.
pub fn rbox_iou(a: &RotatedBox, b: &RotatedBox) -> f64 {
    let (a, b) = canonical(a, b);
    if a.is_degenerate() || b.is_degenerate() {
        return 0.0;
    }

    let origin = (a.center() + b.center()) * 0.5;
    let inter = intersection_area(&a.polygon_around(origin), &b.polygon_around(origin));
    unit(inter / (a.area() + b.area() - inter))
}

/// IoU of the axis-aligned boxes enclosing each rotated box.
pub fn box_iou(a: &RotatedBox, b: &RotatedBox) -> f64 {
    let (a, b) = canonical(a, b);
    if a.is_degenerate() || b.is_degenerate() {
        return 0.0;
    }

    unit(a.enclosing_axis_box().iou(&b.enclosing_axis_box()))
}

fn canonical<'a>(a: &'a RotatedBox, b: &'a RotatedBox) -> (&'a RotatedBox, &'a RotatedBox) {
    match a.canonical_cmp(b) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    }
}

/// Clamped into `[0, 1]` against round-off; NaN passes through.
fn unit(iou: f64) -> f64 {
    iou.clamp(0.0, 1.0)
}
