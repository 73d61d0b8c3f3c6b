mod axis_box;
mod box_element;
mod box_set;
mod compute_device;
mod iou_method;
mod rotated_box;

pub use axis_box::*;
pub use box_element::*;
pub use box_set::*;
pub use compute_device::*;
pub use iou_method::*;
pub use rotated_box::*;
