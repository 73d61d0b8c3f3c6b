mod clipping;
mod point;
mod polygon;

pub use clipping::*;
pub use point::Point;
pub use polygon::Polygon;
