//! Compile-time defaults. Runtime config (see `AppConfig`) starts from these.

pub mod scraper {
    use std::time::Duration;

    pub const URL: &str = "https://www.dsb.cn/news";
    pub const KEYWORDS: &[&str] = &["京东", "腾讯", "快手"];
    pub const OUTPUT_PATH: &str = "dailynews.txt";

    /// Exact `class` attribute of a headline anchor on the target site.
    pub const ANCHOR_CLASS: &str = "text-lg font-semibold text-gray-900 hover:text-primary dark:text-white";
    /// Exact `class` attribute of the summary block following a headline.
    pub const EXTRA_CLASS: &str = "text-sm text-foreground/60";

    pub const DWELL: Duration = Duration::from_secs(25);
    pub const SCROLL_STEP_PX: i64 = 100;
    pub const SCROLL_INTERVAL: Duration = Duration::from_millis(500);

    pub const WEBDRIVER_URL: &str = "http://localhost:9515";
    pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
}

pub mod patterns {
    use crate::config::Pct;

    pub const SYMBOL: &str = "GOLD";
    pub const INPUT_PATH: &str = "GOLD.csv";
    /// Extrema order: a point must beat this many neighbours on each side.
    pub const ORDER: usize = 5;
    pub const TROUGH_TOLERANCE: Pct = Pct::new(0.05);
    /// Candles inspected after the right shoulder (roughly one trading month).
    pub const TREND_HORIZON: usize = 20;
    pub const DECLINE_THRESHOLD: Pct = Pct::new(0.05);
    /// The offset scan stops this many points before the end of the series.
    pub const SCAN_TAIL: usize = 3;

    pub const START_DATE: (i32, u32, u32) = (2005, 1, 1);
    pub const END_DATE: (i32, u32, u32) = (2025, 1, 1);
}

pub mod backtest {
    pub const SYMBOL: &str = "002568";
    pub const INPUT_PATH: &str = "002568.csv";
    pub const SHORT_WINDOW: usize = 20;
    pub const MEDIUM_WINDOW: usize = 100;
    pub const LONG_WINDOW: usize = 200;
    pub const INITIAL_CASH: f64 = 100_000.0;
    pub const LEDGER_PATH: &str = "trades_log.txt";

    pub const START_DATE: (i32, u32, u32) = (2021, 1, 1);
    pub const END_DATE: (i32, u32, u32) = (2025, 1, 1);
}

pub mod csv_columns {
    pub const DATE: &str = "Date";
    pub const CLOSE: &str = "Close";
    pub const VOLUME: &str = "Volume";
}
