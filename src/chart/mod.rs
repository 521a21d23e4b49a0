//! PNG chart rendering with plotters.
//!
//! Charts use the row index as x coordinate and label ticks with the row date,
//! so gaps in the calendar (weekends, holidays) do not show as flat segments.

mod backtest_plot;
mod pattern_plot;

pub use {backtest_plot::render_backtest_chart, pattern_plot::render_pattern_chart};

use crate::{config::plot::PLOT, utils::TimeUtils};
use chrono::NaiveDateTime;

pub type ChartResult = Result<(), Box<dyn std::error::Error>>;

/// Y range covering every finite value, padded top and bottom by `PLOT.y_padding_pct`.
pub(crate) fn padded_range<'a>(series: impl IntoIterator<Item = &'a [f64]>) -> Option<(f64, f64)> {
    let (lo, hi) = series
        .into_iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    let span = (hi - lo).max(hi.abs() * 0.01).max(f64::EPSILON);
    let pad = span * PLOT.y_padding_pct;
    Some((lo - pad, hi + pad))
}

pub(crate) fn date_label(timestamps: &[NaiveDateTime], idx: usize) -> String {
    timestamps
        .get(idx)
        .map(TimeUtils::format_date)
        .unwrap_or_default()
}
