use {
    crate::{
        domain::PriceBar,
        models::{PriceSeries, SeriesError},
        utils::TimeUtils,
    },
    anyhow::{Context, Result},
    chrono::NaiveDate,
    std::{fs::File, io::Read, path::PathBuf},
};

/// Where a price series comes from and how its columns are named.
#[derive(Debug, Clone)]
pub struct SeriesSource {
    pub path: PathBuf,
    pub date_column: String,
    pub close_column: String,
    /// None for close-only datasets.
    pub volume_column: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Cells treated as missing values; such rows are dropped.
const MISSING_MARKERS: &[&str] = &["", "null", "nan", "NaN", "None"];

/// Loads a CSV file into a series sorted by time and restricted to the configured dates.
pub fn load_series(source: &SeriesSource, symbol: &str) -> Result<PriceSeries> {
    let file = File::open(&source.path)
        .with_context(|| format!("Failed to open price data {}", source.path.display()))?;

    let series = read_series(file, source, symbol)
        .with_context(|| format!("Failed to parse price data {}", source.path.display()))?
        .within_dates(source.start_date, source.end_date);

    log::info!(
        "Loaded {} rows for {} from {}",
        series.len(),
        symbol,
        source.path.display()
    );
    Ok(series)
}

/// Parses CSV content. Column names come from `source`; the date filter is not applied here.
pub fn read_series<R: Read>(reader: R, source: &SeriesSource, symbol: &str) -> Result<PriceSeries> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SeriesError::MissingColumn(name.to_string()))
    };

    let date_idx = find(&source.date_column)?;
    let close_idx = find(&source.close_column)?;
    let volume_idx = source.volume_column.as_deref().map(find).transpose()?;

    let mut bars = Vec::new();
    let mut skipped = 0usize;

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let close_raw = cell(close_idx);
        let volume_raw = volume_idx.map(cell);
        if MISSING_MARKERS.contains(&close_raw) || volume_raw.is_some_and(|v| MISSING_MARKERS.contains(&v)) {
            skipped += 1;
            continue;
        }

        let date_raw = cell(date_idx);
        let timestamp = TimeUtils::parse_timestamp(date_raw).ok_or_else(|| SeriesError::BadCell {
            row,
            column: source.date_column.clone(),
            value: date_raw.to_string(),
        })?;
        let close = parse_number(close_raw, row, &source.close_column)?;
        let volume = match (volume_raw, source.volume_column.as_deref()) {
            (Some(raw), Some(column)) => Some(parse_number(raw, row, column)?),
            _ => None,
        };

        // NAN, inf and friends parse as floats but are missing values too
        if !close.is_finite() || volume.is_some_and(|v| !v.is_finite()) {
            skipped += 1;
            continue;
        }

        let bar = match volume {
            Some(volume) => PriceBar::new(timestamp, close, volume),
            None => PriceBar::close_only(timestamp, close),
        };
        bars.push(bar);
    }

    if skipped > 0 {
        log::warn!("{}: skipped {} rows with missing values", symbol, skipped);
    }

    bars.sort_by_key(|b| b.timestamp);
    Ok(PriceSeries::from_bars(symbol, bars))
}

fn parse_number(raw: &str, row: usize, column: &str) -> Result<f64, SeriesError> {
    raw.replace(',', "")
        .parse::<f64>()
        .map_err(|_| SeriesError::BadCell {
            row,
            column: column.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(volume: bool) -> SeriesSource {
        SeriesSource {
            path: PathBuf::new(),
            date_column: "Date".into(),
            close_column: "Close".into(),
            volume_column: volume.then(|| "Volume".to_string()),
            start_date: None,
            end_date: None,
        }
    }

    #[test]
    fn reads_and_sorts_rows() {
        let csv = "Date,Open,Close,Volume\n\
                   2024-01-03,1,12.5,300\n\
                   2024-01-02,1,11.0,200\n";
        let s = read_series(csv.as_bytes(), &source(true), "X").unwrap();
        assert_eq!(s.close_prices, vec![11.0, 12.5]);
        assert_eq!(s.volumes, vec![200.0, 300.0]);
        assert_eq!(s.symbol, "X");
    }

    #[test]
    fn close_only_dataset() {
        let csv = "日期,收盘\n2021-01-04,30.1\n2021-01-05,30.4\n";
        let src = SeriesSource {
            date_column: "日期".into(),
            close_column: "收盘".into(),
            ..source(false)
        };
        let s = read_series(csv.as_bytes(), &src, "002568").unwrap();
        assert_eq!(s.close_prices, vec![30.1, 30.4]);
        assert_eq!(s.volumes, vec![0.0, 0.0]);
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "Date,Close\n2024-01-02,1\n";
        let err = read_series(csv.as_bytes(), &source(true), "X").unwrap_err();
        assert_eq!(
            err.downcast_ref::<SeriesError>(),
            Some(&SeriesError::MissingColumn("Volume".into()))
        );
    }

    #[test]
    fn rows_with_missing_values_are_skipped() {
        let csv = "Date,Close,Volume\n2024-01-02,,10\n2024-01-03,5,null\n2024-01-04,6,7\n";
        let s = read_series(csv.as_bytes(), &source(true), "X").unwrap();
        assert_eq!(s.close_prices, vec![6.0]);
    }

    #[test]
    fn non_finite_cells_are_skipped() {
        let csv = "Date,Close,Volume\n\
                   2024-01-02,NAN,10\n\
                   2024-01-03,inf,10\n\
                   2024-01-04,-infinity,10\n\
                   2024-01-05,6,INF\n\
                   2024-01-06,7,8\n";
        let s = read_series(csv.as_bytes(), &source(true), "X").unwrap();
        assert_eq!(s.close_prices, vec![7.0]);
        assert_eq!(s.volumes, vec![8.0]);
    }

    #[test]
    fn nan_close_does_not_void_backtest() {
        use crate::{config::BacktestConfig, engine::run_backtest};

        let mut csv = String::from("Date,Close\n");
        for i in 0..60 {
            let close = if i == 3 {
                "NAN".to_string()
            } else {
                format!("{}", 10.0 + ((i * 7) % 5) as f64)
            };
            csv.push_str(&format!("2024-{:02}-{:02},{}\n", 1 + i / 28, 1 + i % 28, close));
        }
        let s = read_series(csv.as_bytes(), &source(false), "X").unwrap();
        assert_eq!(s.len(), 59);

        let config = BacktestConfig {
            short_window: 2,
            medium_window: 4,
            long_window: 5,
            ..Default::default()
        };
        let (ma, outcome) = run_backtest(&s, &config).unwrap();
        assert!(ma.short.iter().chain(&ma.medium).all(|v| v.is_finite()));
        assert!(!outcome.ledger.records().is_empty());
    }

    #[test]
    fn bad_number_is_an_error() {
        let csv = "Date,Close,Volume\n2024-01-02,abc,10\n";
        let err = read_series(csv.as_bytes(), &source(true), "X").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SeriesError>(),
            Some(SeriesError::BadCell { row: 0, .. })
        ));
    }
}
