// src/models/ledger.rs

use {
    crate::{config::ReturnPct, utils::TimeUtils},
    chrono::NaiveDateTime,
    serde::Serialize,
    strum_macros::Display,
    tabled::Tabled,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum TradeAction {
    Buy,
    Sell,
}

/// One executed transition. Never mutated after it enters the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub timestamp: NaiveDateTime,
    pub action: TradeAction,
    pub price: f64,
    pub cash_after: f64,
    pub shares_after: u64,
    pub portfolio_value: f64,
    pub return_fraction: ReturnPct,
}

/// Console view of a trade.
#[derive(Tabled)]
pub struct TradeRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Action")]
    pub action: String,
    #[tabled(rename = "Price")]
    pub price: String,
    #[tabled(rename = "Cash")]
    pub cash: String,
    #[tabled(rename = "Shares")]
    pub shares: u64,
    #[tabled(rename = "Portfolio Value")]
    pub portfolio_value: String,
    #[tabled(rename = "Return")]
    pub ret: String,
}

impl From<&TradeRecord> for TradeRow {
    fn from(t: &TradeRecord) -> Self {
        Self {
            date: TimeUtils::format_date(&t.timestamp),
            action: t.action.to_string(),
            price: format!("{:.2}", t.price),
            cash: format!("{:.2}", t.cash_after),
            shares: t.shares_after,
            portfolio_value: format!("{:.2}", t.portfolio_value),
            ret: t.return_fraction.to_string(),
        }
    }
}

/// Append-only list of executed trades.
#[derive(Debug, Clone, Default)]
pub struct TradeLedger {
    records: Vec<TradeRecord>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: TradeRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count(&self, action: TradeAction) -> usize {
        self.records.iter().filter(|r| r.action == action).count()
    }

    pub fn rows(&self) -> Vec<TradeRow> {
        self.records.iter().map(TradeRow::from).collect()
    }
}

/// Position held at the last row of the backtest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinalPosition {
    pub timestamp: NaiveDateTime,
    pub price: f64,
    pub cash: f64,
    pub shares: u64,
}

impl FinalPosition {
    /// Cash plus open shares marked at the final close.
    pub fn portfolio_value(&self) -> f64 {
        self.cash + self.shares as f64 * self.price
    }
}
