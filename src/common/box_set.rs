use std::ops::Index;
use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use crate::common::{BoxElement, RotatedBox, RBOX_DIM};
use crate::{RboxError, Result};

/// Column layout of the ground-plane target arrays:
/// `[x, y, z, lx, ly, lz, yaw, class]`. Only x, y, lx, ly and yaw matter for
/// the 2D boxes.
const GROUND_COLUMNS: [usize; RBOX_DIM] = [0, 1, 3, 4, 6];
const GROUND_MIN_COLS: usize = 7;

/// An ordered, validated set of rotated boxes.
///
/// Construction checks every box for a negative width or height, so the
/// engines never see one.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RotatedBox>", into = "Vec<RotatedBox>")]
pub struct BoxSet {
    boxes: Vec<RotatedBox>,
}

impl BoxSet {
    pub fn new() -> Self {
        Default::default()
    }

    /// Validates and wraps a vector of boxes.
    pub fn from_boxes(boxes: Vec<RotatedBox>) -> Result<Self> {
        for (index, b) in boxes.iter().enumerate() {
            if b.w < 0. || b.h < 0. {
                return Err(RboxError::InvalidShape { index, width: b.w, height: b.h });
            }
        }
        Ok(Self { boxes })
    }

    /// Reads an `N x 5` array with columns `[cx, cy, w, h, angle]`.
    pub fn from_array<T: BoxElement>(boxes: ArrayView2<T>) -> Result<Self> {
        if boxes.ncols() != RBOX_DIM {
            return Err(RboxError::ShapeMismatch(format!(
                "expected (N, {RBOX_DIM}) boxes, got {:?}",
                boxes.shape()
            )));
        }
        let rows = boxes
            .rows()
            .into_iter()
            .map(|r| RotatedBox::new(r[0].to_f32(), r[1].to_f32(), r[2].to_f32(), r[3].to_f32(), r[4].to_f32()))
            .collect();
        Self::from_boxes(rows)
    }

    /// Reads a flat, row-major buffer of `[cx, cy, w, h, angle]` tuples.
    pub fn from_flat<T: BoxElement>(values: &[T]) -> Result<Self> {
        if values.len() % RBOX_DIM != 0 {
            return Err(RboxError::ShapeMismatch(format!(
                "{} values cannot be reshaped into (N, {RBOX_DIM}) boxes",
                values.len()
            )));
        }
        let view = ArrayView2::from_shape((values.len() / RBOX_DIM, RBOX_DIM), values)
            .map_err(|err| RboxError::ShapeMismatch(err.to_string()))?;
        Self::from_array(view)
    }

    /// Reads ground-plane target rows `[x, y, z, lx, ly, lz, yaw, ...]` and
    /// keeps their bird's-eye-view rectangles.
    pub fn from_ground_array<T: BoxElement>(targets: ArrayView2<T>) -> Result<Self> {
        if targets.ncols() < GROUND_MIN_COLS {
            return Err(RboxError::ShapeMismatch(format!(
                "ground targets need at least {GROUND_MIN_COLS} columns, got {:?}",
                targets.shape()
            )));
        }
        let rows = targets
            .rows()
            .into_iter()
            .map(|r| {
                let [x, y, lx, ly, yaw] = GROUND_COLUMNS.map(|c| r[c].to_f32());
                RotatedBox::new(x, y, lx, ly, yaw)
            })
            .collect();
        Self::from_boxes(rows)
    }

    /// Generates `n` random boxes inside `[0, extent)^2` from a fixed seed.
    pub fn random(n: usize, extent: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let max_side = (extent / 4.).max(f32::EPSILON);
        let boxes = (0..n)
            .map(|_| {
                RotatedBox::new(
                    rng.gen_range(0.0..extent.max(f32::EPSILON)),
                    rng.gen_range(0.0..extent.max(f32::EPSILON)),
                    rng.gen_range(0.0..max_side),
                    rng.gen_range(0.0..max_side),
                    rng.gen_range(-std::f32::consts::PI..std::f32::consts::PI),
                )
            })
            .collect();
        Self { boxes }
    }

    /// Returns the boxes at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            boxes: indices.iter().map(|&i| self.boxes[i]).collect(),
        }
    }

    pub fn to_array(&self) -> Array2<f32> {
        let mut out = Array2::zeros((self.len(), RBOX_DIM));
        for (mut row, b) in out.rows_mut().into_iter().zip(self.boxes.iter()) {
            for (dst, src) in row.iter_mut().zip(b.to_row()) {
                *dst = src;
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RotatedBox> {
        self.boxes.iter()
    }
}

impl Index<usize> for BoxSet {
    type Output = RotatedBox;

    fn index(&self, index: usize) -> &RotatedBox {
        &self.boxes[index]
    }
}

impl TryFrom<Vec<RotatedBox>> for BoxSet {
    type Error = RboxError;

    fn try_from(boxes: Vec<RotatedBox>) -> Result<Self> {
        Self::from_boxes(boxes)
    }
}

impl From<BoxSet> for Vec<RotatedBox> {
    fn from(set: BoxSet) -> Self {
        set.boxes
    }
}

impl<'a> IntoIterator for &'a BoxSet {
    type Item = &'a RotatedBox;
    type IntoIter = std::slice::Iter<'a, RotatedBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_rejects_negative_size() {
        let boxes = array![[0f32, 0., 1., 1., 0.], [0., 0., 1., -1., 0.]];
        let err = BoxSet::from_array(boxes.view()).unwrap_err();
        assert_eq!(err, RboxError::InvalidShape { index: 1, width: 1., height: -1. });
    }

    #[test]
    fn test_rejects_wrong_columns() {
        let boxes = array![[0f32, 0., 1., 1.]];
        assert!(matches!(BoxSet::from_array(boxes.view()), Err(RboxError::ShapeMismatch(_))));
        assert!(matches!(BoxSet::from_flat(&[0f32; 7]), Err(RboxError::ShapeMismatch(_))));
    }

    #[test]
    fn test_ground_columns() {
        let targets = array![[1f64, 2., 3., 4., 5., 6., 0.5, 2.]];
        let set = BoxSet::from_ground_array(targets.view()).unwrap();
        assert_eq!(set[0], RotatedBox::new(1., 2., 4., 5., 0.5));
    }

    #[test]
    fn test_random_is_seeded() {
        let a = BoxSet::random(16, 100., 7);
        let b = BoxSet::random(16, 100., 7);
        assert_eq!(a, b);
        assert_eq!(a.to_array().shape(), &[16, RBOX_DIM]);
    }
}
