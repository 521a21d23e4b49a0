//! News scraper configuration

use {
    crate::config::constants::scraper as defaults,
    serde::{Deserialize, Serialize},
    std::{path::PathBuf, time::Duration},
};

/// How the page HTML is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PageBackend {
    /// Drive a real browser through a WebDriver server (e.g. chromedriver).
    #[default]
    #[value(name = "webdriver")]
    WebDriver,
    /// Plain HTTP GET. Only sees server-rendered markup.
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub url: String,
    pub keywords: Vec<String>,
    pub output_path: PathBuf,

    pub anchor_class: String,
    pub extra_class: String,

    // Dwell phase: scroll by `scroll_step_px` every `scroll_interval_ms` until `dwell_secs` elapse
    pub dwell_secs: u64,
    pub scroll_step_px: i64,
    pub scroll_interval_ms: u64,

    pub backend: PageBackend,
    pub webdriver_url: String,
    pub headless: bool,
    pub http_timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            url: defaults::URL.to_string(),
            keywords: defaults::KEYWORDS.iter().map(|k| k.to_string()).collect(),
            output_path: PathBuf::from(defaults::OUTPUT_PATH),
            anchor_class: defaults::ANCHOR_CLASS.to_string(),
            extra_class: defaults::EXTRA_CLASS.to_string(),
            dwell_secs: defaults::DWELL.as_secs(),
            scroll_step_px: defaults::SCROLL_STEP_PX,
            scroll_interval_ms: defaults::SCROLL_INTERVAL.as_millis() as u64,
            backend: PageBackend::default(),
            webdriver_url: defaults::WEBDRIVER_URL.to_string(),
            headless: false,
            http_timeout_secs: defaults::HTTP_TIMEOUT.as_secs(),
        }
    }
}

impl ScraperConfig {
    pub fn dwell(&self) -> Duration {
        Duration::from_secs(self.dwell_secs)
    }

    pub fn scroll_interval(&self) -> Duration {
        // A zero period would make tokio's interval panic
        Duration::from_millis(self.scroll_interval_ms.max(1))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
