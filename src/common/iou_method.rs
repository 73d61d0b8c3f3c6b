use serde::{Deserialize, Serialize};

/// How the overlap of two rotated boxes is measured.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IouMethod {
    /// IoU of the axis-aligned boxes enclosing each rotated box.
    Box,
    /// Exact IoU of the rotated rectangles.
    #[default] RBox,
}

impl IouMethod {
    pub fn str(&self) -> &'static str {
        match self {
            IouMethod::Box => "Box",
            IouMethod::RBox => "RBox",
        }
    }
}

impl std::fmt::Display for IouMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.str())
    }
}
