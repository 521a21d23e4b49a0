//! Post-pattern decline check.

use crate::{config::Pct, utils::get_min};

/// True when the lowest price in `prices[start..end]` sits more than `threshold`
/// below `prices[start]`. An empty or out-of-range window is never a downtrend.
pub fn check_for_downward_trend(prices: &[f64], start: usize, end: usize, threshold: Pct) -> bool {
    let end = end.min(prices.len());
    if start >= end {
        return false;
    }

    let reference = prices[start];
    let Some(min_future) = get_min(&prices[start..end]) else {
        return false;
    };

    (reference - min_future) / reference > threshold.value()
}

/// Exclusive end of the follow-up window after index `start`.
pub fn trend_horizon_end(len: usize, start: usize, horizon: usize) -> usize {
    (start + horizon).min(len.saturating_sub(1))
}
