use ndarray::Array2;
use crate::common::{BoxSet, ComputeDevice, IouMethod};
use crate::engines::keep_mask;

/// An engine that evaluates IoU matrices and greedy suppression.
///
/// Every implementation must return the same IoU values and exactly the same
/// kept sequence as `ReferenceEngine` for the same input.
pub trait Backend: Send + Sync {
    fn device(&self) -> ComputeDevice;

    /// Pairwise IoU, `[i, j] = IoU(a[i], b[j])`.
    fn iou_matrix_with(&self, a: &BoxSet, b: &BoxSet, method: IouMethod) -> Array2<f32>;

    /// Greedy suppression over boxes already sorted by descending score.
    /// A later box is dropped when its IoU with a kept box is strictly above
    /// `iou_threshold`. Returns kept indices in ascending order.
    fn suppress_with(&self, boxes: &BoxSet, iou_threshold: f32, method: IouMethod) -> Vec<usize>;

    fn iou_matrix(&self, a: &BoxSet, b: &BoxSet) -> Array2<f32> {
        self.iou_matrix_with(a, b, IouMethod::RBox)
    }

    fn suppress(&self, boxes: &BoxSet, iou_threshold: f32) -> Vec<usize> {
        self.suppress_with(boxes, iou_threshold, IouMethod::RBox)
    }

    /// Same decision as `suppress`, as one flag per input box.
    fn suppress_mask(&self, boxes: &BoxSet, iou_threshold: f32) -> Vec<bool> {
        keep_mask(boxes.len(), &self.suppress(boxes, iou_threshold))
    }
}
