//! Moving-average crossover backtest configuration

use {
    crate::{
        config::{constants::backtest as defaults, constants::csv_columns},
        data::SeriesSource,
        utils::ymd,
    },
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
    std::path::PathBuf,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    pub symbol: String,

    // Input dataset
    pub input_path: PathBuf,
    pub date_column: String,
    pub close_column: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    // Moving average windows. Signals compare short vs medium; long is plotted only.
    pub short_window: usize,
    pub medium_window: usize,
    pub long_window: usize,

    pub initial_cash: f64,

    pub ledger_path: PathBuf,
    /// Defaults to `<SYMBOL>_backtest_plot.png` when unset.
    pub plot_path: Option<PathBuf>,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            symbol: defaults::SYMBOL.to_string(),
            input_path: PathBuf::from(defaults::INPUT_PATH),
            date_column: csv_columns::DATE.to_string(),
            close_column: csv_columns::CLOSE.to_string(),
            start_date: ymd(defaults::START_DATE),
            end_date: ymd(defaults::END_DATE),
            short_window: defaults::SHORT_WINDOW,
            medium_window: defaults::MEDIUM_WINDOW,
            long_window: defaults::LONG_WINDOW,
            initial_cash: defaults::INITIAL_CASH,
            ledger_path: PathBuf::from(defaults::LEDGER_PATH),
            plot_path: None,
        }
    }
}

impl BacktestConfig {
    pub fn source(&self) -> SeriesSource {
        SeriesSource {
            path: self.input_path.clone(),
            date_column: self.date_column.clone(),
            close_column: self.close_column.clone(),
            volume_column: None,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    /// Rows before this index have at least one undefined moving average.
    pub fn warmup(&self) -> usize {
        self.short_window
            .max(self.medium_window)
            .max(self.long_window)
            .saturating_sub(1)
    }
}
