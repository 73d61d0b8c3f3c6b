use serde::{Deserialize, Serialize};

/// An axis-aligned box, used by the `IouMethod::Box` approximation.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl AxisBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Overlap area, zero for disjoint boxes.
    pub fn intersect(&self, other: &AxisBox) -> f64 {
        let left = self.x1.max(other.x1);
        let right = self.x2.min(other.x2);
        let top = self.y1.max(other.y1);
        let bottom = self.y2.min(other.y2);
        (right - left).max(0.) * (bottom - top).max(0.)
    }

    /// Unclamped IoU. Empty unions give 0; NaN extents give NaN.
    pub fn iou(&self, other: &AxisBox) -> f64 {
        let inter = self.intersect(other);
        let union = self.area() + other.area() - inter;
        if union == 0. {
            return 0.;
        }
        inter / union
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_box_iou() {
        let a = AxisBox::new(0., 0., 10., 10.);
        let b = AxisBox::new(5., 5., 15., 15.);
        assert!((a.iou(&b) - 25. / 175.).abs() < 1e-12);
        assert_eq!(a.iou(&AxisBox::new(20., 20., 30., 30.)), 0.);
        assert!((a.iou(&a) - 1.).abs() < 1e-12);
    }

    #[test]
    fn test_empty_axis_boxes() {
        let a = AxisBox::new(1., 1., 1., 1.);
        assert_eq!(a.area(), 0.);
        assert_eq!(a.iou(&a), 0.);
    }
}
