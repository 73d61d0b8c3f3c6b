use thiserror::Error;

/// Failures surfaced by the IoU and NMS entry points.
///
/// Every variant is raised before any computation starts, so a caller never
/// receives a partially filled result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RboxError {
    #[error("box {index} has a negative size ({width} x {height})")]
    InvalidShape { index: usize, width: f32, height: f32 },

    #[error("box array shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("accelerated backend unavailable: {0}")]
    DeviceUnavailable(String),
}

impl RboxError {
    /// Status code reported through the C API.
    pub fn code(&self) -> i32 {
        match self {
            RboxError::InvalidShape { .. } => -1,
            RboxError::ShapeMismatch(_) => -2,
            RboxError::DeviceUnavailable(_) => -3,
        }
    }
}
