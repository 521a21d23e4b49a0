//! Head-and-shoulders top detection on a close/volume series.
//!
//! The first three order-k maxima are taken as left shoulder (A), head (C) and
//! right shoulder (E); the first two order-k minima as troughs (B, D). The
//! candidate is accepted when the head is the highest of the three peaks, D sits
//! within the trough tolerance of B, and volume falls from A to C to E.

use crate::{
    analysis::extrema::{local_maxima, local_minima},
    config::{Pct, constants::patterns as defaults},
    models::{HeadAndShoulders, SeriesError},
};

#[derive(Debug, Clone, Copy)]
pub struct HeadAndShouldersDetector {
    pub order: usize,
    pub trough_tolerance: Pct,
}

impl Default for HeadAndShouldersDetector {
    fn default() -> Self {
        Self {
            order: defaults::ORDER,
            trough_tolerance: defaults::TROUGH_TOLERANCE,
        }
    }
}

impl HeadAndShouldersDetector {
    pub fn new(order: usize, trough_tolerance: Pct) -> Self {
        Self {
            order,
            trough_tolerance,
        }
    }

    /// Ok(None) when no pattern satisfies the heuristics.
    pub fn detect(
        &self,
        prices: &[f64],
        volumes: &[f64],
    ) -> Result<Option<HeadAndShoulders>, SeriesError> {
        if prices.len() != volumes.len() {
            return Err(SeriesError::LengthMismatch {
                prices: prices.len(),
                volumes: volumes.len(),
            });
        }

        let maxima = local_maxima(prices, self.order);
        let minima = local_minima(prices, self.order);

        let (&[a, c, e, ..], &[b, d, ..]) = (maxima.as_slice(), minima.as_slice()) else {
            return Ok(None);
        };

        // Head must be the highest peak
        if !(prices[c] > prices[a] && prices[c] > prices[e]) {
            return Ok(None);
        }

        // Second trough close to the first
        let (low, high) = self.trough_tolerance.band_around(prices[b]);
        if !(prices[d] >= low && prices[d] <= high) {
            return Ok(None);
        }

        // Volume fades across the formation
        if !(volumes[a] > volumes[c] && volumes[e] < volumes[c]) {
            return Ok(None);
        }

        Ok(Some(HeadAndShoulders {
            left_shoulder: a,
            head: c,
            right_shoulder: e,
            neckline: (prices[b] + prices[d]) / 2.0,
        }))
    }
}

/// Detects with the default trough tolerance and the given extrema order.
pub fn detect(
    prices: &[f64],
    volumes: &[f64],
    order: usize,
) -> Result<Option<HeadAndShoulders>, SeriesError> {
    HeadAndShouldersDetector {
        order,
        ..Default::default()
    }
    .detect(prices, volumes)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Peaks at 1, 5, 9 and troughs at 3, 7 with order 1.
    fn shape(ls: f64, b: f64, head: f64, d: f64, rs: f64) -> Vec<f64> {
        vec![50.0, ls, 60.0, b, 70.0, head, 70.0, d, 60.0, rs, 50.0]
    }

    fn volumes(ls: f64, head: f64, rs: f64) -> Vec<f64> {
        let mut v = vec![500.0; 11];
        v[1] = ls;
        v[5] = head;
        v[9] = rs;
        v
    }

    #[test]
    fn accepts_textbook_pattern() {
        let p = shape(100.0, 40.0, 110.0, 41.0, 95.0);
        let found = detect(&p, &volumes(1200.0, 1000.0, 800.0), 1).unwrap().unwrap();
        assert_eq!(found.left_shoulder, 1);
        assert_eq!(found.head, 5);
        assert_eq!(found.right_shoulder, 9);
        assert_eq!(found.neckline, (40.0 + 41.0) / 2.0);
    }

    #[test]
    fn rejects_rising_volume_into_head() {
        let p = shape(100.0, 40.0, 110.0, 41.0, 95.0);
        assert_eq!(detect(&p, &volumes(1000.0, 1200.0, 800.0), 1).unwrap(), None);
    }

    #[test]
    fn rejects_head_not_highest() {
        let p = shape(100.0, 40.0, 99.0, 41.0, 95.0);
        assert_eq!(detect(&p, &volumes(1200.0, 1000.0, 800.0), 1).unwrap(), None);
    }

    #[test]
    fn rejects_troughs_far_apart() {
        let p = shape(100.0, 40.0, 110.0, 45.0, 95.0);
        assert_eq!(detect(&p, &volumes(1200.0, 1000.0, 800.0), 1).unwrap(), None);
    }

    #[test]
    fn trough_tolerance_is_inclusive() {
        // 42 == 40 * 1.05 sits exactly on the band edge
        let p = shape(100.0, 40.0, 110.0, 42.0, 95.0);
        assert!(detect(&p, &volumes(1200.0, 1000.0, 800.0), 1).unwrap().is_some());
    }

    #[test]
    fn too_few_extrema() {
        let p = vec![1.0, 2.0, 3.0, 2.0, 1.0];
        assert_eq!(detect(&p, &[1.0; 5], 1).unwrap(), None);
        assert_eq!(detect(&[], &[], 5).unwrap(), None);
    }

    #[test]
    fn length_mismatch_is_invalid_argument() {
        let err = detect(&[1.0, 2.0], &[1.0], 5).unwrap_err();
        assert_eq!(
            err,
            SeriesError::LengthMismatch {
                prices: 2,
                volumes: 1
            }
        );
    }

    #[test]
    fn custom_tolerance() {
        let p = shape(100.0, 40.0, 110.0, 45.0, 95.0);
        let detector = HeadAndShouldersDetector::new(1, Pct::new(0.2));
        assert!(detector.detect(&p, &volumes(1200.0, 1000.0, 800.0)).unwrap().is_some());
    }
}
