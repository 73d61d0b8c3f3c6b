//! Rotated-box IoU and non-maximum suppression.
//!
//! The four entry points `rbox_2d_iou`, `rbox_2d_iou_cuda`, `rbox_2d_nms` and
//! `rbox_2d_nms_cuda` take boxes as `N x 5` arrays of `[cx, cy, w, h, angle]`
//! (angle in radians). The `_cuda` variants run on the data-parallel engine
//! and return the same results as the reference ones.

mod error;
mod utils;
pub mod common;
pub mod data;
pub mod engines;
pub mod extern_c_api;
pub mod geometry;

use ndarray::{Array2, ArrayView1, ArrayView2};
use crate::common::{BoxElement, BoxSet, ComputeDevice, IouMethod};
use crate::engines::{backend_for, suppress_scored, Backend, ReferenceEngine};

pub use error::RboxError;

pub type Result<T, E = RboxError> = std::result::Result<T, E>;

/// IoU matrix between two box arrays on the reference engine.
pub fn rbox_2d_iou<T: BoxElement>(boxes_a: ArrayView2<T>, boxes_b: ArrayView2<T>) -> Result<Array2<f32>> {
    box2d_iou(boxes_a, boxes_b, IouMethod::RBox, ComputeDevice::Reference)
}

/// IoU matrix between two box arrays on the accelerated engine.
pub fn rbox_2d_iou_cuda<T: BoxElement>(boxes_a: ArrayView2<T>, boxes_b: ArrayView2<T>) -> Result<Array2<f32>> {
    box2d_iou(boxes_a, boxes_b, IouMethod::RBox, ComputeDevice::Accelerated(0))
}

/// Greedy NMS on the reference engine. `boxes` must already be sorted by
/// descending score; the returned indices are ascending.
pub fn rbox_2d_nms<T: BoxElement>(boxes: ArrayView2<T>, iou_threshold: f32) -> Result<Vec<usize>> {
    let boxes = BoxSet::from_array(boxes)?;
    Ok(ReferenceEngine.suppress(&boxes, iou_threshold))
}

/// Greedy NMS on the accelerated engine; same kept sequence as `rbox_2d_nms`.
pub fn rbox_2d_nms_cuda<T: BoxElement>(boxes: ArrayView2<T>, iou_threshold: f32) -> Result<Vec<usize>> {
    let boxes = BoxSet::from_array(boxes)?;
    Ok(backend_for(ComputeDevice::Accelerated(0))?.suppress(&boxes, iou_threshold))
}

/// IoU matrix with an explicit method and device.
pub fn box2d_iou<T: BoxElement>(
    boxes_a: ArrayView2<T>,
    boxes_b: ArrayView2<T>,
    method: IouMethod,
    device: ComputeDevice,
) -> Result<Array2<f32>> {
    let (a, b) = (BoxSet::from_array(boxes_a)?, BoxSet::from_array(boxes_b)?);
    Ok(backend_for(device)?.iou_matrix_with(&a, &b, method))
}

/// NMS over unsorted boxes with one score each.
///
/// Boxes are ranked by descending score (NaN scores are dropped) before
/// suppression. The kept input indices are returned in that ranking.
pub fn box2d_nms<T: BoxElement>(
    boxes: ArrayView2<T>,
    scores: ArrayView1<f32>,
    iou_threshold: f32,
    method: IouMethod,
    device: ComputeDevice,
) -> Result<Vec<usize>> {
    let boxes = BoxSet::from_array(boxes)?;
    let backend = backend_for(device)?;
    suppress_scored(backend.as_ref(), &boxes, &scores.to_vec(), iou_threshold, method)
}
