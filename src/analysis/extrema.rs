//! Order-k local extrema.
//!
//! A point is a local maximum of order `k` when it is strictly greater than every
//! point within `k` positions on either side. Near the edges only the in-range
//! neighbours are compared, and the first and last points never qualify.

use std::cmp::Ordering;

pub fn local_maxima(values: &[f64], order: usize) -> Vec<usize> {
    relative_extrema(values, order, Ordering::Greater)
}

pub fn local_minima(values: &[f64], order: usize) -> Vec<usize> {
    relative_extrema(values, order, Ordering::Less)
}

fn relative_extrema(values: &[f64], order: usize, wanted: Ordering) -> Vec<usize> {
    let n = values.len();
    if n < 3 || order == 0 {
        return Vec::new();
    }

    (1..n - 1)
        .filter(|&i| {
            let lo = i.saturating_sub(order);
            let hi = (i + order).min(n - 1);
            (lo..=hi)
                .filter(|&j| j != i)
                .all(|j| values[i].partial_cmp(&values[j]) == Some(wanted))
        })
        .collect()
}
