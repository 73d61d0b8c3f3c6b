use ndarray::Array2;
use crate::common::{BoxSet, ComputeDevice, IouMethod};
use crate::engines::nms::{exceeds, greedy_suppress};
use crate::engines::{pair_iou, Backend};

/// Sequential engine. Pure, single-threaded, holds no state.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceEngine;

impl Backend for ReferenceEngine {
    fn device(&self) -> ComputeDevice {
        ComputeDevice::Reference
    }

    fn iou_matrix_with(&self, a: &BoxSet, b: &BoxSet, method: IouMethod) -> Array2<f32> {
        log::debug!("Reference IoU: {} x {} boxes ({method})", a.len(), b.len());
        Array2::from_shape_fn((a.len(), b.len()), |(i, j)| pair_iou(&a[i], &b[j], method) as f32)
    }

    fn suppress_with(&self, boxes: &BoxSet, iou_threshold: f32, method: IouMethod) -> Vec<usize> {
        log::debug!("Reference NMS: {} boxes, threshold {iou_threshold} ({method})", boxes.len());
        greedy_suppress(boxes.len(), |i, j| {
            exceeds(pair_iou(&boxes[i], &boxes[j], method), iou_threshold)
        })
    }
}
