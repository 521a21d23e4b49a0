//! Configuration module for the three tools.

// Can all be private now because we have a public re-export.
mod backtest;
mod patterns;
mod persistence;
mod scraper;
mod types;

// Public
pub mod constants;

// Can't be private because we don't re-export it
pub mod plot;

use {
    anyhow::{Context, Result},
    serde::{Deserialize, Serialize},
    std::{fs, path::Path},
};

// Re-export commonly used items
pub use backtest::BacktestConfig;
pub use patterns::PatternConfig;
pub use persistence::{PERSISTENCE, backtest_plot_path, pattern_plot_path, trend_report_path};
pub use self::scraper::{PageBackend, ScraperConfig};
pub use types::{Pct, ReturnPct};

/// The master runtime configuration. Every section falls back to its compiled-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub patterns: PatternConfig,
    pub backtest: BacktestConfig,
}

impl AppConfig {
    /// Loads a JSON config file, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
