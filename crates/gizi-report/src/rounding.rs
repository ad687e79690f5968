//! One-decimal percentages computed from integer counts.

/// `count / denominator` as a percentage rounded half-up to one decimal.
///
/// Works in tenths of a percent on integers so that 1/8 is always 12.5 and
/// 1/6 always 16.7, independent of floating-point representation. Returns
/// None for an empty denominator.
pub fn percent_one_decimal(count: u64, denominator: u64) -> Option<f64> {
    percent_tenths(count, denominator).map(|tenths| tenths as f64 / 10.0)
}

/// The same percentage in integer tenths (`12.5%` is `125`).
pub fn percent_tenths(count: u64, denominator: u64) -> Option<u64> {
    if denominator == 0 {
        return None;
    }
    let count = u128::from(count);
    let denominator = u128::from(denominator);
    let tenths = (count * 2000 + denominator) / (2 * denominator);
    u64::try_from(tenths).ok()
}
