//! Moving-average crossover backtest.
//!
//! Entry point: [`run_backtest`].
//!
//! # Approach
//! 1. Three trailing SMAs are computed over the close series and the warm-up rows
//!    (where the longest average is undefined) are dropped.
//! 2. Each remaining row gets a [`Signal`]: short MA above medium MA is long,
//!    below is short, equal is flat. The long MA is only plotted.
//! 3. The signal is edge-triggered from the second row on: a Buy fires when it
//!    becomes long, a Sell when it becomes short. Buys go all-in on whole shares,
//!    sells go all-out.
//! 4. Every transition is appended to a [`TradeLedger`]; the position at the last
//!    row is reported as a [`FinalPosition`].

use {
    crate::{
        config::{BacktestConfig, ReturnPct},
        models::{FinalPosition, PriceSeries, SeriesError, Signal, TradeAction, TradeLedger, TradeRecord},
        utils::{TimeUtils, rolling_mean},
    },
    chrono::NaiveDateTime,
    tabled::Tabled,
};

// ─── Indicators ───────────────────────────────────────────────────────────────

/// Close series restricted to rows where every average is defined.
#[derive(Debug, Clone)]
pub struct MovingAverages {
    pub series: PriceSeries,
    pub short: Vec<f64>,
    pub medium: Vec<f64>,
    pub long: Vec<f64>,
}

impl MovingAverages {
    pub fn compute(series: &PriceSeries, config: &BacktestConfig) -> Result<Self, SeriesError> {
        let warmup = config.warmup();
        let closes = &series.close_prices;

        let trimmed = |window: usize| -> Vec<f64> {
            rolling_mean(closes, window)
                .into_iter()
                .skip(warmup)
                .map(|v| v.unwrap_or(f64::NAN))
                .collect()
        };

        let averages = Self {
            series: series.skip(warmup),
            short: trimmed(config.short_window),
            medium: trimmed(config.medium_window),
            long: trimmed(config.long_window),
        };
        averages.series.ensure_not_empty()?;
        Ok(averages)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Long where `short > medium`, short where `short < medium`, flat otherwise.
pub fn generate_signals(short: &[f64], medium: &[f64]) -> Vec<Signal> {
    short
        .iter()
        .zip(medium)
        .map(|(s, m)| {
            if s > m {
                Signal::Long
            } else if s < m {
                Signal::Short
            } else {
                Signal::Flat
            }
        })
        .collect()
}

/// Index and action of every edge-triggered transition. The first row never trades.
pub fn transitions(signals: &[Signal]) -> Vec<(usize, TradeAction)> {
    signals
        .windows(2)
        .enumerate()
        .filter_map(|(i, pair)| match (pair[0], pair[1]) {
            (prev, Signal::Long) if prev != Signal::Long => Some((i + 1, TradeAction::Buy)),
            (prev, Signal::Short) if prev != Signal::Short => Some((i + 1, TradeAction::Sell)),
            _ => None,
        })
        .collect()
}

// ─── Portfolio ────────────────────────────────────────────────────────────────

/// Cash and whole-share position, mutated in place trade by trade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Portfolio {
    pub cash: f64,
    pub shares: u64,
    pub portfolio_value: f64,
}

impl Portfolio {
    pub fn new(initial_cash: f64) -> Self {
        Self {
            cash: initial_cash,
            shares: 0,
            portfolio_value: initial_cash,
        }
    }

    /// Spends all cash on whole shares at `price`.
    pub fn buy(&mut self, timestamp: NaiveDateTime, price: f64) -> TradeRecord {
        let bought = if price > 0.0 {
            (self.cash / price).floor() as u64
        } else {
            0
        };
        self.cash -= bought as f64 * price;
        self.shares += bought;
        self.portfolio_value = self.cash + self.shares as f64 * price;

        let return_fraction = if bought == 0 {
            ReturnPct::ZERO
        } else if self.cash == 0.0 {
            log::warn!(
                "[backtest] {}: buy used all cash, return undefined, recording 0",
                TimeUtils::format_date(&timestamp)
            );
            ReturnPct::ZERO
        } else {
            ReturnPct::new((self.cash + bought as f64 * price) / self.cash - 1.0)
        };

        TradeRecord {
            timestamp,
            action: TradeAction::Buy,
            price,
            cash_after: self.cash,
            shares_after: self.shares,
            portfolio_value: self.portfolio_value,
            return_fraction,
        }
    }

    /// Liquidates the whole position at `price`. `previous_close` is the close of
    /// the row before the sell.
    pub fn sell(&mut self, timestamp: NaiveDateTime, price: f64, previous_close: f64) -> TradeRecord {
        let sold = self.shares;
        self.cash += sold as f64 * price;
        self.shares = 0;
        self.portfolio_value = self.cash;

        let denominator = sold as f64 * previous_close;
        let return_fraction = if sold == 0 || denominator == 0.0 {
            ReturnPct::ZERO
        } else {
            ReturnPct::new((self.cash - sold as f64 * price) / denominator)
        };

        TradeRecord {
            timestamp,
            action: TradeAction::Sell,
            price,
            cash_after: self.cash,
            shares_after: self.shares,
            portfolio_value: self.portfolio_value,
            return_fraction,
        }
    }

    pub fn mark_to_market(&self, price: f64) -> f64 {
        self.cash + self.shares as f64 * price
    }
}

// ─── Simulation ───────────────────────────────────────────────────────────────

/// A trade placed on the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeMarker {
    pub index: usize,
    pub action: TradeAction,
    pub price: f64,
}

#[derive(Debug, Clone)]
pub struct BacktestOutcome {
    pub ledger: TradeLedger,
    pub markers: Vec<TradeMarker>,
    pub final_position: FinalPosition,
    pub initial_cash: f64,
}

impl BacktestOutcome {
    pub fn final_value(&self) -> f64 {
        self.final_position.portfolio_value()
    }

    pub fn summary(&self) -> BacktestSummary {
        let total_return = if self.initial_cash > 0.0 {
            ReturnPct::new(self.final_value() / self.initial_cash - 1.0)
        } else {
            ReturnPct::ZERO
        };
        BacktestSummary {
            trades: self.ledger.len(),
            buys: self.ledger.count(TradeAction::Buy),
            sells: self.ledger.count(TradeAction::Sell),
            initial_cash: format!("{:.2}", self.initial_cash),
            final_value: format!("{:.2}", self.final_value()),
            total_return: total_return.to_string(),
        }
    }
}

/// Console view of a finished run.
#[derive(Debug, Clone, Tabled)]
pub struct BacktestSummary {
    #[tabled(rename = "Trades")]
    pub trades: usize,
    #[tabled(rename = "Buys")]
    pub buys: usize,
    #[tabled(rename = "Sells")]
    pub sells: usize,
    #[tabled(rename = "Initial Cash")]
    pub initial_cash: String,
    #[tabled(rename = "Final Value")]
    pub final_value: String,
    #[tabled(rename = "Total Return")]
    pub total_return: String,
}

/// Replays the signal transitions over `series`. `signals` must be aligned with the series rows.
pub fn simulate(
    series: &PriceSeries,
    signals: &[Signal],
    initial_cash: f64,
) -> Result<BacktestOutcome, SeriesError> {
    series.ensure_not_empty()?;
    if signals.len() != series.len() {
        return Err(SeriesError::SignalMismatch {
            rows: series.len(),
            signals: signals.len(),
        });
    }

    let mut portfolio = Portfolio::new(initial_cash);
    let mut ledger = TradeLedger::new();
    let mut markers = Vec::new();

    for (i, action) in transitions(signals) {
        let timestamp = series.timestamps[i];
        let price = series.close_prices[i];

        let record = match action {
            TradeAction::Buy => portfolio.buy(timestamp, price),
            TradeAction::Sell => portfolio.sell(timestamp, price, series.close_prices[i - 1]),
        };

        log::info!(
            "{}: Date: {}, Price: {:.2}, Cash: {:.2}, Shares: {}, Portfolio Value: {:.2}, Return: {}",
            record.action,
            TimeUtils::format_date(&record.timestamp),
            record.price,
            record.cash_after,
            record.shares_after,
            record.portfolio_value,
            record.return_fraction
        );

        markers.push(TradeMarker { index: i, action, price });
        ledger.append(record);
    }

    let last = series.len() - 1;
    let final_position = FinalPosition {
        timestamp: series.timestamps[last],
        price: series.close_prices[last],
        cash: portfolio.cash,
        shares: portfolio.shares,
    };
    log::info!(
        "Final Portfolio Value: {:.2}",
        portfolio.mark_to_market(final_position.price)
    );

    Ok(BacktestOutcome {
        ledger,
        markers,
        final_position,
        initial_cash,
    })
}

/// Averages, signals and simulation for one configured run.
pub fn run_backtest(
    series: &PriceSeries,
    config: &BacktestConfig,
) -> Result<(MovingAverages, BacktestOutcome), SeriesError> {
    let averages = MovingAverages::compute(series, config)?;
    log::info!(
        "[backtest] {} | windows {}/{}/{} | {} rows after warm-up",
        series.symbol,
        config.short_window,
        config.medium_window,
        config.long_window,
        averages.len()
    );

    let signals = generate_signals(&averages.short, &averages.medium);
    let outcome = simulate(&averages.series, &signals, config.initial_cash)?;
    Ok((averages, outcome))
}
