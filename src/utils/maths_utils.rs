use {argminmax::ArgMinMax, itertools::Itertools};

#[inline]
pub(crate) fn get_min(vec: &[f64]) -> Option<f64> {
    if vec.is_empty() {
        return None;
    }
    let min_index: usize = vec.argmin();
    Some(vec[min_index])
}

/// Trailing simple moving average. Entry `i` is the mean of `data[i + 1 - window..=i]`,
/// or None while fewer than `window` points are available.
///
/// Every window is summed afresh and a constant window yields its value exactly, so
/// averages of different lengths over a flat stretch compare equal.
pub fn rolling_mean(data: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; data.len()];
    }

    (0..data.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &data[i + 1 - window..=i];
            if slice.iter().all_equal() {
                Some(slice[0])
            } else {
                Some(slice.iter().sum::<f64>() / window as f64)
            }
        })
        .collect()
}
