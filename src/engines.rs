#[cfg(feature = "accelerated")]
mod accelerated;
mod backend;
mod iou;
mod nms;
mod reference;
mod runner;

#[cfg(feature = "accelerated")]
pub use accelerated::AcceleratedEngine;
pub use backend::Backend;
pub use iou::{box_iou, pair_iou, rbox_iou};
pub use nms::{keep_mask, sort_by_score};
pub(crate) use nms::suppress_scored;
pub use reference::ReferenceEngine;
pub use runner::RboxRunner;

use crate::common::ComputeDevice;
use crate::Result;

/// Builds the engine for `device`. Fails with `DeviceUnavailable` when the
/// accelerated engine cannot start; it never falls back to the reference one.
pub fn backend_for(device: ComputeDevice) -> Result<Box<dyn Backend>> {
    match device {
        ComputeDevice::Reference => Ok(Box::new(ReferenceEngine)),
        ComputeDevice::Accelerated(threads) => accelerated_backend(threads),
    }
}

#[cfg(feature = "accelerated")]
fn accelerated_backend(threads: usize) -> Result<Box<dyn Backend>> {
    Ok(Box::new(AcceleratedEngine::new(threads)?))
}

#[cfg(not(feature = "accelerated"))]
fn accelerated_backend(_threads: usize) -> Result<Box<dyn Backend>> {
    Err(crate::RboxError::DeviceUnavailable(
        "built without the `accelerated` feature".to_string(),
    ))
}
