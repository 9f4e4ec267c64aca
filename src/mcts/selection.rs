//! Move-selection policies over the root's children statistics.
//!
//! Both policies read the same visit counts. The stochastic policy turns
//! them into the distribution `softmax(ln(visits) / temperature)`, which is
//! `visits^(1/temperature)` normalized, and samples from it; the
//! deterministic policy takes the visit-count argmax. Visit count is the
//! robust competitive signal because it reflects sustained confidence across
//! the whole search rather than a single noisy score.

use log::warn;
use rand::Rng;
use rand_distr::weighted::WeightedIndex;
use rand_distr::{Distribution, Gamma};

use crate::mcts::hyperparameters::MIN_TEMPERATURE;

/// Floor added to visit counts before taking logs, so never-visited children
/// keep a tiny positive probability instead of a singular logarithm.
const VISIT_EPS: f64 = 1e-10;

/// How a move is derived from the root statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionPolicy {
    /// Temperature-scaled sampling over visit counts, for self-play training.
    Stochastic { temperature: f64 },
    /// Visit-count argmax, for competitive play.
    Deterministic,
}

/// Probability of each child under temperature-scaled visit sampling.
///
/// A temperature under [`MIN_TEMPERATURE`] degenerates to a one-hot vector
/// on the visit argmax.
pub fn visit_distribution(visits: &[u32], temperature: f64) -> Vec<f64> {
    if visits.is_empty() {
        return Vec::new();
    }
    if temperature < MIN_TEMPERATURE {
        let mut one_hot = vec![0.0; visits.len()];
        one_hot[argmax(visits)] = 1.0;
        return one_hot;
    }

    // softmax of ln(visits)/T, with the max subtracted before exponentiating
    // so large visit ratios cannot overflow.
    let logits: Vec<f64> = visits
        .iter()
        .map(|&v| (v as f64 + VISIT_EPS).ln() / temperature)
        .collect();
    let peak = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = logits.iter().map(|&l| (l - peak).exp()).collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Index of the child picked by `policy`, along with the probability vector
/// the pick was (or would have been) drawn from.
pub(crate) fn choose_child<R: Rng>(
    visits: &[u32],
    policy: &SelectionPolicy,
    rng: &mut R,
) -> Option<(usize, Vec<f64>)> {
    if visits.is_empty() {
        return None;
    }
    match *policy {
        SelectionPolicy::Deterministic => {
            Some((argmax(visits), visit_distribution(visits, 1.0)))
        }
        SelectionPolicy::Stochastic { temperature } => {
            let probabilities = visit_distribution(visits, temperature);
            let index = sample_index(&probabilities, rng);
            Some((index, probabilities))
        }
    }
}

/// Sample an index from a probability vector, falling back to the argmax if
/// the weights are unusable.
pub(crate) fn sample_index<R: Rng>(probabilities: &[f64], rng: &mut R) -> usize {
    match WeightedIndex::new(probabilities) {
        Ok(dist) => dist.sample(rng),
        Err(e) => {
            warn!("degenerate move weights ({}), falling back to argmax", e);
            probabilities
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap_or(0)
        }
    }
}

/// Blend Dirichlet noise into a move distribution for self-play exploration,
/// `(1 - fraction) * probs + fraction * noise`.
///
/// The Dirichlet sample is built from per-entry Gamma draws, which works for
/// a runtime-sized distribution. This is layered on top of the selection
/// policies by the self-play driver, never inside them.
pub fn blend_dirichlet_noise<R: Rng>(
    probabilities: &mut [f64],
    alpha: f64,
    fraction: f64,
    rng: &mut R,
) {
    if probabilities.len() < 2 || fraction <= 0.0 {
        return;
    }
    let gamma = match Gamma::new(alpha, 1.0) {
        Ok(g) => g,
        Err(e) => {
            warn!("skipping Dirichlet noise, bad alpha {}: {}", alpha, e);
            return;
        }
    };
    let draws: Vec<f64> = probabilities.iter().map(|_| gamma.sample(rng)).collect();
    let total: f64 = draws.iter().sum();
    if total <= 0.0 {
        return;
    }
    for (p, g) in probabilities.iter_mut().zip(draws) {
        *p = (1.0 - fraction) * *p + fraction * (g / total);
    }
}

/// First index holding the maximum visit count.
fn argmax(visits: &[u32]) -> usize {
    let mut best = 0;
    for (i, &v) in visits.iter().enumerate() {
        if v > visits[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_distribution_sums_to_one() {
        let probs = visit_distribution(&[10, 5, 0, 85], 1.0);
        let total: f64 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(probs.iter().all(|&p| p > 0.0));
    }

    #[test]
    fn test_temperature_one_is_proportional_to_visits() {
        let probs = visit_distribution(&[30, 10, 60], 1.0);
        assert!((probs[0] - 0.3).abs() < 1e-6);
        assert!((probs[1] - 0.1).abs() < 1e-6);
        assert!((probs[2] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_low_temperature_sharpens() {
        let flat = visit_distribution(&[40, 60], 1.0);
        let sharp = visit_distribution(&[40, 60], 0.25);
        assert!(sharp[1] > flat[1]);
        assert!(sharp[0] < flat[0]);
    }

    #[test]
    fn test_zero_temperature_is_one_hot_argmax() {
        let probs = visit_distribution(&[3, 9, 9, 1], 0.0);
        assert_eq!(probs, vec![0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_deterministic_choice_is_the_visit_argmax() {
        let mut rng = StdRng::seed_from_u64(0);
        let (index, probs) =
            choose_child(&[5, 100, 20], &SelectionPolicy::Deterministic, &mut rng).unwrap();
        assert_eq!(index, 1);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic_tie_goes_to_the_first_child() {
        let mut rng = StdRng::seed_from_u64(0);
        let (index, _) =
            choose_child(&[7, 7, 7], &SelectionPolicy::Deterministic, &mut rng).unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn test_stochastic_sampling_tracks_the_distribution() {
        let mut rng = StdRng::seed_from_u64(11);
        let policy = SelectionPolicy::Stochastic { temperature: 1.0 };
        let mut counts = [0u32; 3];
        for _ in 0..2000 {
            let (index, _) = choose_child(&[80, 15, 5], &policy, &mut rng).unwrap();
            counts[index] += 1;
        }
        assert!(counts[0] > counts[1]);
        assert!(counts[1] > counts[2]);
    }

    #[test]
    fn test_choose_child_empty_returns_none() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(choose_child(&[], &SelectionPolicy::Deterministic, &mut rng).is_none());
    }

    #[test]
    fn test_dirichlet_blend_keeps_a_distribution() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut probs = vec![0.5, 0.3, 0.2];
        blend_dirichlet_noise(&mut probs, 0.3, 0.25, &mut rng);

        let total: f64 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(probs.iter().all(|&p| p >= 0.0));
        assert_ne!(probs, vec![0.5, 0.3, 0.2]);
    }

    #[test]
    fn test_dirichlet_blend_zero_fraction_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut probs = vec![0.5, 0.5];
        blend_dirichlet_noise(&mut probs, 0.3, 0.0, &mut rng);
        assert_eq!(probs, vec![0.5, 0.5]);
    }
}
