/// Rounds half-way cases towards positive infinity, so `-2.5` becomes `-2`
/// and `2.5` becomes `3`. Every rounding step in the crate goes through this.
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounds to a fixed number of decimal places using [`round_half_up`].
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    round_half_up(value * factor) / factor
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by N).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance =
        values.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}
