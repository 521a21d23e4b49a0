use {
    anyhow::Result,
    chart_scout::{AppConfig, ScraperCli, data::page_source_from_config, engine::run_scraper, init_logging},
    clap::Parser,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args = ScraperCli::parse();
    let mut config = AppConfig::load(args.common.config.as_deref())?.scraper;
    args.apply(&mut config);

    log::info!(
        "Scraping {} via {:?} for keywords {:?}",
        config.url,
        config.backend,
        config.keywords
    );

    let source = page_source_from_config(&config)?;
    let matches = run_scraper(source.as_ref(), &config).await?;

    log::info!(
        "{} matching headlines saved to {}",
        matches.len(),
        config.output_path.display()
    );
    Ok(())
}
