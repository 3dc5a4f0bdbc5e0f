//! Order statistics shared by describe and outlier capping.

/// Present, finite values of a column in ascending order.
pub fn sorted_present(values: &[Option<f64>]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|x| x.is_finite())
        .collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Percentile of sorted data with linear interpolation between ranks.
///
/// `p` is a fraction in `[0, 1]`. Empty input yields NaN.
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return f64::NAN;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let n = sorted_data.len() as f64;
    let index = p.clamp(0.0, 1.0) * (n - 1.0);
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper || upper >= sorted_data.len() {
        sorted_data[lower]
    } else {
        let fraction = index - lower as f64;
        sorted_data[lower] * (1.0 - fraction) + sorted_data[upper] * fraction
    }
}

/// Arithmetic mean, `None` when empty.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample standard deviation (n - 1 denominator), `None` below two points.
pub fn sample_std(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let m = mean(data)?;
    let variance = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (data.len() - 1) as f64;
    Some(variance.sqrt())
}
