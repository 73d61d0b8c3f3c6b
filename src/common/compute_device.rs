use serde::{Deserialize, Serialize};

/// Which engine executes a call. There is no implicit fallback from
/// `Accelerated` to `Reference`: the caller picks one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComputeDevice {
    /// Sequential engine.
    #[default] Reference,
    /// Data-parallel engine with the given number of worker threads. `0` runs
    /// on the global rayon pool.
    Accelerated(usize),
}

// Hardcoded device names. Storing the "proper" spelling and the lowercase version.
const REFERENCE: [&str; 2] = ["Reference", "reference"];
const ACCELERATED: [&str; 2] = ["Accelerated", "accelerated"];

impl ComputeDevice {
    /// Parses a device name. `cpu` is accepted for the reference engine,
    /// `cuda` and `parallel` for the accelerated one.
    pub fn from_str(device: &str, threads: usize) -> Option<Self> {
        match device.to_lowercase().as_str() {
            "reference" | "cpu" => Some(ComputeDevice::Reference),
            "accelerated" | "cuda" | "parallel" => Some(ComputeDevice::Accelerated(threads)),
            _ => None,
        }
    }

    pub fn str(&self) -> &'static str {
        match self {
            ComputeDevice::Reference => REFERENCE[0],
            ComputeDevice::Accelerated(_) => ACCELERATED[0],
        }
    }

    pub fn str_lowercase(&self) -> &'static str {
        match self {
            ComputeDevice::Reference => REFERENCE[1],
            ComputeDevice::Accelerated(_) => ACCELERATED[1],
        }
    }

    pub fn is_accelerated(&self) -> bool {
        matches!(self, ComputeDevice::Accelerated(_))
    }

    pub fn all_compute_devices() -> Vec<String> {
        vec![
            ComputeDevice::Reference.str_lowercase().to_string(),
            ComputeDevice::Accelerated(0).str_lowercase().to_string(),
        ]
    }

    pub fn is_valid_compute_device(device: &str) -> bool {
        ComputeDevice::from_str(device, 0).is_some()
    }
}

impl std::fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComputeDevice::Reference => f.write_str(self.str()),
            ComputeDevice::Accelerated(0) => write!(f, "{} (global pool)", self.str()),
            ComputeDevice::Accelerated(n) => write!(f, "{} ({n} threads)", self.str()),
        }
    }
}
