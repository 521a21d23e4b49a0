mod maths_utils;
mod time_utils;

pub use time_utils::{TimeUtils, ymd};

pub use maths_utils::rolling_mean;
pub(crate) use maths_utils::get_min;
