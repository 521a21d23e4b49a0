use {
    anyhow::{Result, anyhow},
    chart_scout::{
        AppConfig, BacktestCli,
        chart::render_backtest_chart,
        config::backtest_plot_path,
        data::{load_series, save_ledger},
        engine::run_backtest,
        init_logging,
    },
    clap::Parser,
    tabled::Table,
};

fn main() -> Result<()> {
    init_logging();

    let args = BacktestCli::parse();
    let mut config = AppConfig::load(args.common.config.as_deref())?.backtest;
    args.apply(&mut config);

    let series = load_series(&config.source(), &config.symbol)?;
    let (averages, outcome) = run_backtest(&series, &config)?;

    save_ledger(&config.ledger_path, &outcome.ledger, &outcome.final_position)?;

    if !outcome.ledger.is_empty() {
        println!("{}", Table::new(outcome.ledger.rows()));
    }
    println!("{}", Table::new([outcome.summary()]));

    let plot_path = config
        .plot_path
        .clone()
        .unwrap_or_else(|| backtest_plot_path(&config.symbol));
    render_backtest_chart(&plot_path, &averages, &outcome.markers).map_err(|e| anyhow!("{e}"))?;

    Ok(())
}
