//! Utility functions for the frozen-lake crate

use rand::{Rng, distr::StandardUniform};

/// Sample an index from a categorical distribution.
///
/// Weights need not sum to one. Returns `None` for an empty slice; a
/// non-positive total falls back to a uniform draw.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use frozen_lake::utils::sample_categorical;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let index = sample_categorical(&mut rng, &[0.0, 1.0, 0.0]);
/// assert_eq!(index, Some(1));
/// ```
pub fn sample_categorical<R: Rng>(rng: &mut R, weights: &[f64]) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Some(rng.random_range(0..weights.len()));
    }

    let mut threshold = rng.sample::<f64, _>(StandardUniform) * total;
    for (index, &weight) in weights.iter().enumerate() {
        if threshold < weight {
            return Some(index);
        }
        threshold -= weight;
    }

    // Rounding can leave a sliver past the last bucket; take the last positive weight.
    weights.iter().rposition(|&w| w > 0.0)
}

/// Trailing moving average over `window` entries.
///
/// Mirrors a "valid" convolution: the output has `len - window + 1` entries and is
/// empty when there are fewer values than the window.
pub fn moving_average<I>(values: I, window: usize) -> Vec<f64>
where
    I: IntoIterator,
    I::Item: Into<f64>,
{
    let values: Vec<f64> = values.into_iter().map(Into::into).collect();
    if window == 0 || values.len() < window {
        return Vec::new();
    }

    let mut averages = Vec::with_capacity(values.len() - window + 1);
    let mut sum: f64 = values[..window].iter().sum();
    averages.push(sum / window as f64);
    for i in window..values.len() {
        sum += values[i] - values[i - window];
        averages.push(sum / window as f64);
    }
    averages
}

/// Running fraction of `true` flags: entry `i` is successes in `0..=i` divided by `i + 1`.
pub fn cumulative_rate(flags: &[bool]) -> Vec<f64> {
    let mut hits = 0usize;
    flags
        .iter()
        .enumerate()
        .map(|(i, &flag)| {
            if flag {
                hits += 1;
            }
            hits as f64 / (i + 1) as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_sample_categorical_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(sample_categorical(&mut rng, &[]), None);
    }

    #[test]
    fn test_sample_categorical_point_mass() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(sample_categorical(&mut rng, &[0.0, 0.0, 2.5, 0.0]), Some(2));
        }
    }

    #[test]
    fn test_sample_categorical_zero_total_is_uniform_fallback() {
        let mut rng = StdRng::seed_from_u64(3);
        let index = sample_categorical(&mut rng, &[0.0, 0.0, 0.0]).unwrap();
        assert!(index < 3);
    }

    #[test]
    fn test_moving_average_valid_window() {
        let averages = moving_average([1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(averages, vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_moving_average_short_input() {
        assert!(moving_average([1.0, 2.0], 5).is_empty());
        assert!(moving_average([1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn test_cumulative_rate() {
        let rates = cumulative_rate(&[true, false, true, true]);
        assert_eq!(rates, vec![1.0, 0.5, 2.0 / 3.0, 0.75]);
    }
}
