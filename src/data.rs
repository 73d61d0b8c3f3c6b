mod config_rbox;
mod time_calc;

pub use config_rbox::{ConfigRbox, DEFAULT_IOU_THRESHOLD};
pub use time_calc::TimeCalc;
