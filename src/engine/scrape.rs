use {
    crate::{
        analysis::{HeadlineSelector, extract_headlines},
        config::ScraperConfig,
        data::{PageSource, save_matches},
        models::NewsMatch,
    },
    anyhow::Result,
    std::path::Path,
};

/// Fetches `url` through `source`, keeps the headlines mentioning any keyword
/// and overwrites `output_path` with them.
pub async fn scrape_website(
    source: &dyn PageSource,
    url: &str,
    keywords: &[String],
    selector: &HeadlineSelector<'_>,
    output_path: &Path,
) -> Result<Vec<NewsMatch>> {
    log::info!("Fetching {}", url);
    let html = source.fetch_html(url).await?;

    let matches = extract_headlines(&html, selector, keywords)?;
    log::info!(
        "{} headlines matched keywords {:?}",
        matches.len(),
        keywords
    );

    save_matches(output_path, &matches)?;
    log::info!("Results written to {}", output_path.display());
    Ok(matches)
}

/// [`scrape_website`] with every parameter taken from config.
pub async fn run_scraper(source: &dyn PageSource, config: &ScraperConfig) -> Result<Vec<NewsMatch>> {
    let selector = HeadlineSelector {
        anchor_class: &config.anchor_class,
        extra_class: &config.extra_class,
    };
    scrape_website(source, &config.url, &config.keywords, &selector, &config.output_path).await
}
