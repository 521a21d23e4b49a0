// Detection algorithms and page parsing
pub mod extrema;
pub mod head_shoulders;
pub mod headlines;
pub mod trend;

pub use {
    head_shoulders::{HeadAndShouldersDetector, detect},
    headlines::{HeadlineSelector, ScrapeError, extract_headlines},
    trend::{check_for_downward_trend, trend_horizon_end},
};
