#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod utils;

// Re-export commonly used types outside of crate (for the binaries)
pub use config::{AppConfig, BacktestConfig, PageBackend, PatternConfig, ScraperConfig};
pub use models::{Detection, HeadAndShoulders, NewsMatch, PriceSeries, SeriesError, Signal};

// CLI argument parsing
use {
    chrono::NaiveDate,
    clap::{Args, Parser},
    std::{panic, path::PathBuf},
};

/// Options shared by every tool.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// JSON config file. Missing sections fall back to built-in defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Collect keyword-matching headlines from a news page", long_about = None)]
pub struct ScraperCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Page to scrape
    #[arg(long)]
    pub url: Option<String>,

    /// Keyword to match in titles (repeatable)
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Output text file (overwritten)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// How to fetch the page
    #[arg(long, value_enum)]
    pub backend: Option<PageBackend>,

    /// Run the browser without a window
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// Seconds spent scrolling before the page is captured
    #[arg(long)]
    pub dwell_secs: Option<u64>,
}

impl ScraperCli {
    pub fn apply(&self, config: &mut ScraperConfig) {
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if !self.keywords.is_empty() {
            config.keywords = self.keywords.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if self.headless {
            config.headless = true;
        }
        if let Some(secs) = self.dwell_secs {
            config.dwell_secs = secs;
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Detect head-and-shoulders tops in a price/volume CSV", long_about = None)]
pub struct DetectCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Symbol used for titles and output file names
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// CSV file with date, close and volume columns
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Extrema order (neighbours compared on each side)
    #[arg(long)]
    pub order: Option<usize>,

    /// First date kept (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// First date dropped (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Directory for the report and the chart
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

impl DetectCli {
    pub fn apply(&self, config: &mut PatternConfig) {
        if let Some(symbol) = &self.symbol {
            config.symbol = symbol.clone();
        }
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(order) = self.order {
            config.order = order;
        }
        if self.start.is_some() {
            config.start_date = self.start;
        }
        if self.end.is_some() {
            config.end_date = self.end;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Backtest a moving-average crossover strategy on daily closes", long_about = None)]
pub struct BacktestCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Symbol used for titles and the chart file name
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// CSV file with date and close columns
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Starting cash
    #[arg(long)]
    pub cash: Option<f64>,

    /// First date kept (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// First date dropped (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Trade ledger file (overwritten)
    #[arg(long)]
    pub ledger: Option<PathBuf>,

    /// Chart output file
    #[arg(long)]
    pub plot: Option<PathBuf>,
}

impl BacktestCli {
    pub fn apply(&self, config: &mut BacktestConfig) {
        if let Some(symbol) = &self.symbol {
            config.symbol = symbol.clone();
        }
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(cash) = self.cash {
            config.initial_cash = cash;
        }
        if self.start.is_some() {
            config.start_date = self.start;
        }
        if self.end.is_some() {
            config.end_date = self.end;
        }
        if let Some(ledger) = &self.ledger {
            config.ledger_path = ledger.clone();
        }
        if self.plot.is_some() {
            config.plot_path = self.plot.clone();
        }
    }
}

/// Logger (RUST_LOG, default `info`) plus a panic hook that logs the backtrace.
pub fn init_logging() {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_flags_override_config() {
        let cli = DetectCli::parse_from([
            "hs_detect", "--symbol", "SPY", "--order", "3", "--start", "2010-01-01",
        ]);
        let mut config = PatternConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.symbol, "SPY");
        assert_eq!(config.order, 3);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2010, 1, 1));
        // untouched
        assert_eq!(config.end_date, NaiveDate::from_ymd_opt(2025, 1, 1));
    }

    #[test]
    fn scraper_keywords_replace_defaults() {
        let cli = ScraperCli::parse_from(["news_scraper", "-k", "Rust", "-k", "Tokio", "--backend", "http"]);
        let mut config = ScraperConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.keywords, vec!["Rust".to_string(), "Tokio".to_string()]);
        assert_eq!(config.backend, PageBackend::Http);
        assert!(!config.headless);
    }

    #[test]
    fn backtest_without_flags_keeps_config() {
        let cli = BacktestCli::parse_from(["ma_backtest", "--config", "bt.json"]);
        let mut config = BacktestConfig::default();
        cli.apply(&mut config);

        assert_eq!(cli.common.config, Some(PathBuf::from("bt.json")));
        assert_eq!(config.initial_cash, 100_000.0);
        assert_eq!(config.plot_path, None);
    }
}
