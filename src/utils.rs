//! Utility functions for the chomp crate

use rand::{Rng, distr::StandardUniform};

/// Calculate Shannon entropy from a probability distribution.
///
/// H = -Σ(p * ln(p)) for p > 0
pub fn shannon_entropy<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    probabilities
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.ln())
        .sum()
}

/// Normalize weights to probabilities that sum to 1.0.
///
/// Returns `None` if the input is empty or the total is zero, negative or
/// not finite.
///
/// # Examples
///
/// ```
/// use chomp::utils::normalize_weights;
///
/// let normalized = normalize_weights(vec![1.0, 2.0, 1.0]).unwrap();
/// assert_eq!(normalized, vec![0.25, 0.5, 0.25]);
/// assert!(normalize_weights(vec![0.0, 0.0]).is_none());
/// ```
pub fn normalize_weights<I>(weights: I) -> Option<Vec<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let weights: Vec<f64> = weights.into_iter().collect();
    let sum: f64 = weights.iter().sum();
    if weights.is_empty() || !sum.is_finite() || sum <= 0.0 {
        return None;
    }
    Some(weights.iter().map(|&w| w / sum).collect())
}

/// Entropy of the distribution obtained by normalizing `weights`.
///
/// Returns 0.0 when the weights cannot be normalized.
///
/// ```
/// use chomp::utils::entropy_from_weights;
///
/// let entropy = entropy_from_weights(vec![1.0, 1.0]);
/// assert!((entropy - std::f64::consts::LN_2).abs() < 1e-9);
/// ```
pub fn entropy_from_weights<I>(weights: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    normalize_weights(weights)
        .map(shannon_entropy)
        .unwrap_or(0.0)
}

/// Sample an index with probability proportional to `weights`.
///
/// Weights need not sum to 1. Returns `None` for an empty slice. If the
/// total weight is not positive the choice falls back to uniform.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use chomp::utils::weighted_index;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let index = weighted_index(&mut rng, &[1.0, 2.0, 1.0]).unwrap();
/// assert!(index < 3);
/// ```
pub fn weighted_index<R>(rng: &mut R, weights: &[f64]) -> Option<usize>
where
    R: Rng + ?Sized,
{
    if weights.is_empty() {
        return None;
    }

    let total: f64 = weights.iter().sum();

    if !total.is_finite() || total <= 0.0 {
        return Some(rng.random_range(0..weights.len()));
    }

    // Generate random threshold in [0, total)
    let mut threshold = rng.sample::<f64, _>(StandardUniform) * total;

    for (index, &weight) in weights.iter().enumerate() {
        if threshold < weight {
            return Some(index);
        }
        threshold -= weight;
    }

    // Fallback: last index (numerical stability)
    Some(weights.len() - 1)
}

/// Running win ratio with both counters floored at one.
///
/// The floor keeps the ratio defined before the first win or loss, so the
/// result always lies in (0, 1).
///
/// ```
/// use chomp::utils::win_ratio;
///
/// assert_eq!(win_ratio(1, 0), 0.5);
/// assert_eq!(win_ratio(3, 1), 0.75);
/// ```
pub fn win_ratio(wins: usize, losses: usize) -> f64 {
    let w = wins.max(1) as f64;
    let l = losses.max(1) as f64;
    w / (w + l)
}
