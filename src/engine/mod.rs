mod backtest;
mod scanner;
mod scrape;

pub use {
    backtest::{
        BacktestOutcome, BacktestSummary, MovingAverages, Portfolio, TradeMarker, generate_signals,
        run_backtest, simulate, transitions,
    },
    scanner::{DetectionRun, run_detection, scan_series, write_report},
    scrape::{run_scraper, scrape_website},
};
