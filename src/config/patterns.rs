//! Head-and-shoulders detection configuration

use {
    crate::{
        config::{Pct, constants::csv_columns, constants::patterns as defaults},
        data::SeriesSource,
        utils::ymd,
    },
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
    std::path::PathBuf,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub symbol: String,

    // Input dataset
    pub input_path: PathBuf,
    pub date_column: String,
    pub close_column: String,
    pub volume_column: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    /// Extrema order (neighbours compared on each side).
    pub order: usize,
    /// Allowed relative distance of the second trough from the first.
    pub trough_tolerance: Pct,
    /// Number of points after the right shoulder checked for a decline.
    pub trend_horizon: usize,
    /// Decline (fraction of the right-shoulder price) that confirms a downtrend.
    pub decline_threshold: Pct,

    /// Directory receiving the report and the plot.
    pub output_dir: PathBuf,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            symbol: defaults::SYMBOL.to_string(),
            input_path: PathBuf::from(defaults::INPUT_PATH),
            date_column: csv_columns::DATE.to_string(),
            close_column: csv_columns::CLOSE.to_string(),
            volume_column: csv_columns::VOLUME.to_string(),
            start_date: ymd(defaults::START_DATE),
            end_date: ymd(defaults::END_DATE),
            order: defaults::ORDER,
            trough_tolerance: defaults::TROUGH_TOLERANCE,
            trend_horizon: defaults::TREND_HORIZON,
            decline_threshold: defaults::DECLINE_THRESHOLD,
            output_dir: PathBuf::from("."),
        }
    }
}

impl PatternConfig {
    pub fn source(&self) -> SeriesSource {
        SeriesSource {
            path: self.input_path.clone(),
            date_column: self.date_column.clone(),
            close_column: self.close_column.clone(),
            volume_column: Some(self.volume_column.clone()),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
