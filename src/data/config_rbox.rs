//! Options for building an IoU/NMS runner.

use std::path::Path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use crate::common::{ComputeDevice, IouMethod};

pub const DEFAULT_IOU_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRbox {
    pub device: ComputeDevice,
    pub method: IouMethod,
    pub iou_threshold: f32,
    pub profile: bool,
}

impl Default for ConfigRbox {
    fn default() -> Self {
        Self {
            device: ComputeDevice::Reference,
            method: IouMethod::RBox,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            profile: false,
        }
    }
}

impl ConfigRbox {
    pub fn new() -> Self {
        Default::default()
    }

    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse rbox config")?;
        Ok(config.sanitized())
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rbox config {}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_device(mut self, device: ComputeDevice) -> Self {
        self.device = device;
        self
    }

    pub fn with_method(mut self, method: IouMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_iou(mut self, x: f32) -> Self {
        self.iou_threshold = x;
        self.sanitized()
    }

    pub fn with_profile(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }

    /// Clamps the IoU threshold into `[0, 1]`; NaN falls back to the default.
    fn sanitized(mut self) -> Self {
        let t = self.iou_threshold;
        if t.is_nan() {
            log::warn!("IoU threshold is NaN, using {DEFAULT_IOU_THRESHOLD}");
            self.iou_threshold = DEFAULT_IOU_THRESHOLD;
        } else if !(0.0..=1.0).contains(&t) {
            self.iou_threshold = t.clamp(0.0, 1.0);
            log::warn!("IoU threshold {t} clamped to {}", self.iou_threshold);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ConfigRbox::new()
            .with_device(ComputeDevice::Accelerated(2))
            .with_method(IouMethod::Box)
            .with_iou(0.3)
            .with_profile(true);
        assert_eq!(config.device, ComputeDevice::Accelerated(2));
        assert_eq!(config.method, IouMethod::Box);
        assert_eq!(config.iou_threshold, 0.3);
        assert!(config.profile);
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(ConfigRbox::new().with_iou(1.7).iou_threshold, 1.0);
        assert_eq!(ConfigRbox::new().with_iou(-0.2).iou_threshold, 0.0);
        assert_eq!(ConfigRbox::new().with_iou(f32::NAN).iou_threshold, DEFAULT_IOU_THRESHOLD);
    }

    #[test]
    fn test_json_round_trip_and_defaults() {
        let config = ConfigRbox::from_json_str(r#"{"device": {"Accelerated": 4}, "method": "box"}"#).unwrap();
        assert_eq!(config.device, ComputeDevice::Accelerated(4));
        assert_eq!(config.method, IouMethod::Box);
        assert_eq!(config.iou_threshold, DEFAULT_IOU_THRESHOLD);

        let json = config.to_json_string().unwrap();
        assert_eq!(ConfigRbox::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(ConfigRbox::from_json_str("{\"iou_threshold\": \"high\"}").is_err());
        assert!(ConfigRbox::from_json_file("/nonexistent/rbox.json").is_err());
    }
}
