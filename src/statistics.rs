/// A simple statistics module covering the percentile and normal distribution lookups used in sizing.
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::{Data, OrderStatistics};

/// Percentile (0 to 100) of the given numbers, interpolating linearly between the two
/// closest ranks as numpy does by default.
///
/// Returns NaN when there are no numbers.
pub fn percentile(numbers: &[f64], percentile: usize) -> f64 {
    if numbers.is_empty() {
        return f64::NAN;
    }
    let mut data = Data::new(numbers.to_vec());

    let rank = (numbers.len() - 1) as f64 * percentile.min(100) as f64 / 100.;
    let lower_rank = rank.floor();
    // order statistics are 1-based
    let lower = data.order_statistic(lower_rank as usize + 1);
    let upper = if (lower_rank as usize + 1) < numbers.len() {
        data.order_statistic(lower_rank as usize + 2)
    } else {
        lower
    };

    lower + (rank - lower_rank) * (upper - lower)
}

/// Inverse of the standard normal cumulative distribution function.
///
/// Returns NaN for probabilities outside (0, 1).
pub fn standard_normal_inverse_cdf(probability: f64) -> f64 {
    if !(probability > 0. && probability < 1.) {
        return f64::NAN;
    }
    // mean 0 and standard deviation 1 are always valid parameters
    match Normal::new(0., 1.) {
        Ok(normal) => normal.inverse_cdf(probability),
        Err(_) => f64::NAN,
    }
}
