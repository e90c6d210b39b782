/// Trailing moving average over `data`.
///
/// Point `i` averages the finite samples in `data[i + 1 - window ..= i]`
/// (clipped at the series start). Points with fewer than `min_periods`
/// finite samples are `None`. A zero window is treated as 1 and
/// `min_periods` is clamped to `1..=window`.
pub fn moving_average(data: &[f64], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    let min_periods = min_periods.clamp(1, window);

    (0..data.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let (sum, count) = data[start..=i]
                .iter()
                .filter(|v| v.is_finite())
                .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
            (count >= min_periods).then(|| sum / count as f64)
        })
        .collect()
}
