use {
    crate::{
        models::{FinalPosition, TradeLedger, TradeRecord},
        utils::TimeUtils,
    },
    anyhow::{Context, Result},
    std::{
        fs::File,
        io::{BufWriter, Write},
        path::Path,
    },
};

const LEDGER_HEADER: &str = "Date, Price, Cash, Portfolio Value, Action, Shares";
const FINAL_HEADER: &str = "Final Date, Final Price, Final Cash, Final Portfolio Value, Action, Shares";

/// Overwrites `path` with every trade followed by the final position.
pub fn save_ledger(path: &Path, ledger: &TradeLedger, last: &FinalPosition) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create ledger {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_ledger(&mut writer, ledger, last)?;
    writer.flush()?;
    log::info!("Wrote {} trades to {}", ledger.len(), path.display());
    Ok(())
}

pub fn write_ledger<W: Write>(writer: &mut W, ledger: &TradeLedger, last: &FinalPosition) -> Result<()> {
    writeln!(writer, "{}", LEDGER_HEADER)?;
    for record in ledger.records() {
        writeln!(writer, "{}", trade_line(record))?;
    }

    writeln!(writer, "{}", FINAL_HEADER)?;
    writeln!(
        writer,
        "{}, {:.2}, {:.2}, {:.2}, Final, {}",
        TimeUtils::format_date(&last.timestamp),
        last.price,
        last.cash,
        last.portfolio_value(),
        last.shares
    )?;
    Ok(())
}

fn trade_line(record: &TradeRecord) -> String {
    format!(
        "{}, {:.2}, {:.2}, {:.2}, {}, {}",
        TimeUtils::format_date(&record.timestamp),
        record.price,
        record.cash_after,
        record.portfolio_value,
        record.action,
        record.shares_after
    )
}
