use chrono::NaiveDateTime;

// One row of an externally supplied price/volume dataset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBar {
    pub timestamp: NaiveDateTime,
    pub close_price: f64,
    pub volume: f64,
}

impl PriceBar {
    // A constructor for convenience
    pub fn new(timestamp: NaiveDateTime, close: f64, volume: f64) -> Self {
        PriceBar {
            timestamp,
            close_price: close,
            volume,
        }
    }

    // Close-only datasets (backtest input) carry no volume
    pub fn close_only(timestamp: NaiveDateTime, close: f64) -> Self {
        Self::new(timestamp, close, 0.0)
    }
}
