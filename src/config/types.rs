//! Small numeric value types shared by the analysis and backtest code.

use serde::{Deserialize, Serialize};

/// A fraction clamped between 0 and 1 (e.g. 0.05 = 5%).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Pct(f64);

impl Pct {
    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 {
            0.0
        } else if val > 1.0 {
            1.0
        } else {
            val
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// The band `[reference * (1 - pct), reference * (1 + pct)]`.
    pub fn band_around(self, reference: f64) -> (f64, f64) {
        (reference * (1.0 - self.0), reference * (1.0 + self.0))
    }
}

impl std::fmt::Display for Pct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}%", self.0 * 100.)
    }
}

/// Signed return as a fraction (0.02 = +2%). Not clamped.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ReturnPct(f64);

impl ReturnPct {
    pub const ZERO: Self = Self(0.0);

    pub const fn new(val: f64) -> Self {
        Self(val)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for ReturnPct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}%", self.0 * 100.0)
    }
}
