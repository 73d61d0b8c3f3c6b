use half::{bf16, f16};

/// Scalar types a box array may be supplied in. Values are widened to `f32`
/// on ingest; geometry itself runs in `f64`.
pub trait BoxElement: Copy + Send + Sync + 'static {
    fn to_f32(self) -> f32;
}

impl BoxElement for f32 {
    fn to_f32(self) -> f32 {
        self
    }
}

impl BoxElement for f64 {
    fn to_f32(self) -> f32 {
        self as f32
    }
}

impl BoxElement for f16 {
    fn to_f32(self) -> f32 {
        f16::to_f32(self)
    }
}

impl BoxElement for bf16 {
    fn to_f32(self) -> f32 {
        bf16::to_f32(self)
    }
}
