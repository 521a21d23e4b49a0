use {
    crate::domain::PriceBar,
    chrono::{NaiveDate, NaiveDateTime},
    serde::{Deserialize, Serialize},
    thiserror::Error,
};

/// Shape failures of externally supplied series data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("prices and volumes must have the same length (prices={prices}, volumes={volumes})")]
    LengthMismatch { prices: usize, volumes: usize },

    #[error("{signals} signals for {rows} rows")]
    SignalMismatch { rows: usize, signals: usize },

    #[error("column `{0}` not found in input header")]
    MissingColumn(String),

    #[error("row {row}: cannot parse {column} value `{value}`")]
    BadCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("series `{0}` is empty")]
    Empty(String),
}

/// Columnar price/volume history of one symbol, oldest first.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PriceSeries {
    pub symbol: String,
    pub timestamps: Vec<NaiveDateTime>,
    pub close_prices: Vec<f64>,
    pub volumes: Vec<f64>,
}

impl PriceSeries {
    pub fn from_bars(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        let len = bars.len();
        let mut ts_vec = Vec::with_capacity(len);
        let mut close_vec = Vec::with_capacity(len);
        let mut vol_vec = Vec::with_capacity(len);

        for bar in bars {
            ts_vec.push(bar.timestamp);
            close_vec.push(bar.close_price);
            vol_vec.push(bar.volume);
        }

        Self {
            symbol: symbol.into(),
            timestamps: ts_vec,
            close_prices: close_vec,
            volumes: vol_vec,
        }
    }

    pub fn len(&self) -> usize {
        self.close_prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close_prices.is_empty()
    }

    pub fn get_bar(&self, idx: usize) -> PriceBar {
        PriceBar::new(self.timestamps[idx], self.close_prices[idx], self.volumes[idx])
    }

    /// Keeps rows with `start <= date < end`. Either bound may be open.
    pub fn within_dates(self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let keep = |ts: &NaiveDateTime| {
            let date = ts.date();
            start.is_none_or(|s| date >= s) && end.is_none_or(|e| date < e)
        };

        let bars: Vec<PriceBar> = (0..self.len())
            .filter(|&i| keep(&self.timestamps[i]))
            .map(|i| self.get_bar(i))
            .collect();

        Self::from_bars(self.symbol, bars)
    }

    /// Drops the first `n` rows.
    pub fn skip(&self, n: usize) -> Self {
        let n = n.min(self.len());
        Self {
            symbol: self.symbol.clone(),
            timestamps: self.timestamps[n..].to_vec(),
            close_prices: self.close_prices[n..].to_vec(),
            volumes: self.volumes[n..].to_vec(),
        }
    }

    pub fn ensure_not_empty(&self) -> Result<(), SeriesError> {
        if self.is_empty() {
            return Err(SeriesError::Empty(self.symbol.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn sample() -> PriceSeries {
        let bars = (1..=5)
            .map(|d| PriceBar::new(day(d), d as f64 * 10.0, d as f64 * 100.0))
            .collect();
        PriceSeries::from_bars("TEST", bars)
    }

    #[test]
    fn from_bars_is_columnar() {
        let s = sample();
        assert_eq!(s.len(), 5);
        assert_eq!(s.close_prices, vec![10.0, 20.0, 30.0, 40.0, 50.0]);
        assert_eq!(s.volumes[4], 500.0);
        assert_eq!(s.get_bar(2).close_price, 30.0);
    }

    #[test]
    fn date_filter_is_half_open() {
        let s = sample().within_dates(
            NaiveDate::from_ymd_opt(2024, 1, 2),
            NaiveDate::from_ymd_opt(2024, 1, 4),
        );
        assert_eq!(s.close_prices, vec![20.0, 30.0]);
    }

    #[test]
    fn date_filter_open_bounds() {
        assert_eq!(sample().within_dates(None, None).len(), 5);
    }

    #[test]
    fn skip_past_end() {
        let s = sample();
        assert_eq!(s.skip(2).close_prices, vec![30.0, 40.0, 50.0]);
        assert!(s.skip(10).is_empty());
        assert!(s.skip(10).ensure_not_empty().is_err());
    }
}
