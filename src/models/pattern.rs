use {chrono::NaiveDateTime, serde::Serialize};

/// A head-and-shoulders candidate. Indices are relative to the slice the detector saw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeadAndShoulders {
    pub left_shoulder: usize,
    pub head: usize,
    pub right_shoulder: usize,
    /// Mean of the two trough prices.
    pub neckline: f64,
}

impl HeadAndShoulders {
    /// Shifts all indices by `offset` (slice-relative -> series-relative).
    pub fn rebased(self, offset: usize) -> Self {
        Self {
            left_shoulder: self.left_shoulder + offset,
            head: self.head + offset,
            right_shoulder: self.right_shoulder + offset,
            neckline: self.neckline,
        }
    }
}

/// One match of the offset scan, with its trend follow-up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    /// Scan offset that produced this match.
    pub offset: usize,
    /// Indices into the full series.
    pub pattern: HeadAndShoulders,
    pub right_shoulder_time: NaiveDateTime,
    /// Exclusive end index of the follow-up window.
    pub horizon_end: usize,
    pub downtrend: bool,
}
