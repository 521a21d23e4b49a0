use {
    crate::config::{PageBackend, ScraperConfig},
    anyhow::{Context, Result},
    async_trait::async_trait,
    std::time::Duration,
    thirtyfour::{ChromiumLikeCapabilities, DesiredCapabilities, WebDriver, error::WebDriverResult},
};

/// Abstract interface for obtaining the rendered HTML of a page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String>;
}

/// Builds the source selected in config.
pub fn page_source_from_config(config: &ScraperConfig) -> Result<Box<dyn PageSource>> {
    let source: Box<dyn PageSource> = match config.backend {
        PageBackend::WebDriver => Box::new(WebDriverSource::from_config(config)),
        PageBackend::Http => Box::new(HttpSource::new(config.http_timeout())?),
    };
    Ok(source)
}

/// Drives a browser through a WebDriver server, scrolling for a fixed dwell time
/// so lazily loaded items get rendered before the page source is captured.
pub struct WebDriverSource {
    server_url: String,
    headless: bool,
    dwell: Duration,
    scroll_step_px: i64,
    scroll_interval: Duration,
}

impl WebDriverSource {
    pub fn from_config(config: &ScraperConfig) -> Self {
        Self {
            server_url: config.webdriver_url.clone(),
            headless: config.headless,
            dwell: config.dwell(),
            scroll_step_px: config.scroll_step_px,
            scroll_interval: config.scroll_interval(),
        }
    }

    async fn load_and_scroll(&self, driver: &WebDriver, url: &str) -> Result<String> {
        driver.goto(url).await.with_context(|| format!("Failed to open {}", url))?;

        log::info!(
            "Scrolling {} for {}s ({}px every {}ms)",
            url,
            self.dwell.as_secs(),
            self.scroll_step_px,
            self.scroll_interval.as_millis()
        );

        // Bounded dwell: the scroll loop only ends when the timeout fires or a command fails
        let scrolling = scroll_forever(driver, self.scroll_step_px, self.scroll_interval);
        if let Ok(Err(e)) = tokio::time::timeout(self.dwell, scrolling).await {
            return Err(e).context("Scrolling failed");
        }

        let html = driver.source().await.context("Failed to read page source")?;
        Ok(html)
    }
}

async fn scroll_forever(driver: &WebDriver, step_px: i64, period: Duration) -> WebDriverResult<()> {
    let script = format!("window.scrollBy(0, {});", step_px);
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        driver.execute(script.as_str(), Vec::new()).await?;
    }
}

#[async_trait]
impl PageSource for WebDriverSource {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let mut caps = DesiredCapabilities::chrome();
        if self.headless {
            caps.add_arg("--headless=new")?;
        }

        let driver = WebDriver::new(self.server_url.as_str(), caps)
            .await
            .with_context(|| format!("Failed to start browser session via {}", self.server_url))?;

        let result = self.load_and_scroll(&driver, url).await;

        // The session is closed on every path before the outcome propagates
        if let Err(e) = driver.quit().await {
            log::warn!("Failed to close browser session: {}", e);
        }

        result
    }
}

/// Plain HTTP fetch. Sees only server-rendered markup.
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()?;
        let html = response.text().await?;
        Ok(html)
    }
}
