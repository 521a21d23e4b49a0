mod ledger;
mod news;
mod pattern;
mod series;
mod signal;

pub use {
    ledger::{FinalPosition, TradeAction, TradeLedger, TradeRecord, TradeRow},
    news::NewsMatch,
    pattern::{Detection, HeadAndShoulders},
    series::{PriceSeries, SeriesError},
    signal::Signal,
};
