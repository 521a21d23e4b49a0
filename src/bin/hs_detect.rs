use {
    anyhow::Result,
    chart_scout::{AppConfig, DetectCli, engine::run_detection, init_logging},
    clap::Parser,
    tabled::Table,
};

fn main() -> Result<()> {
    init_logging();

    let args = DetectCli::parse();
    let mut config = AppConfig::load(args.common.config.as_deref())?.patterns;
    args.apply(&mut config);

    log::info!(
        "Detecting head and shoulders on {} ({})",
        config.symbol,
        config.input_path.display()
    );

    let run = run_detection(&config)?;

    if let Some(counts) = run.counts {
        println!("{}", Table::new([counts]));
    }
    log::info!(
        "Report: {} | Chart: {}",
        run.report_path.display(),
        run.plot_path.display()
    );
    Ok(())
}
