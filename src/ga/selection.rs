//! Selection strategies for the GA participant.
//!
//! Selection works on *costs*: fitness already mapped so that lower is
//! better regardless of the problem's sense (see [`to_cost`]).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use crate::problem::Sense;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_coevolve::ga::Selection;
///
/// let sel = Selection::Tournament(3);
/// assert_eq!(Selection::default(), sel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Pick `k` individuals at random and keep the best.
    Tournament(usize),

    /// Fitness-proportionate selection on inverted cost.
    Roulette,

    /// Linear ranking: weight `n - rank`.
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent index.
    ///
    /// Returns `None` for an empty population.
    pub fn select<R: Rng>(&self, costs: &[f64], rng: &mut R) -> Option<usize> {
        if costs.is_empty() {
            return None;
        }
        Some(match self {
            Selection::Tournament(k) => tournament(costs, *k, rng),
            Selection::Roulette => roulette(costs, rng),
            Selection::Rank => rank(costs, rng),
        })
    }
}

/// Maps a fitness to a cost where lower is better. Non-finite fitness maps
/// to `+inf`.
pub fn to_cost(fitness: f64, sense: Sense) -> f64 {
    if !fitness.is_finite() {
        return f64::INFINITY;
    }
    match sense {
        Sense::Minimise => fitness,
        Sense::Maximise => -fitness,
    }
}

fn tournament<R: Rng>(costs: &[f64], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = costs.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if costs[idx] < costs[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

/// weight_i = max_finite_cost - cost_i + epsilon; infinite costs get epsilon.
fn roulette<R: Rng>(costs: &[f64], rng: &mut R) -> usize {
    let n = costs.len();
    if n == 1 {
        return 0;
    }

    let max_cost = costs
        .iter()
        .copied()
        .filter(|c| c.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    let epsilon = 1e-10;

    let weights: Vec<f64> = costs
        .iter()
        .map(|&c| {
            let w = max_cost - c + epsilon;
            if w.is_finite() && w > 0.0 {
                w
            } else {
                epsilon
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1
}

fn rank<R: Rng>(costs: &[f64], rng: &mut R) -> usize {
    let n = costs.len();
    if n == 1 {
        return 0;
    }

    let mut indexed: Vec<(usize, f64)> = costs.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| a.1.total_cmp(&b.1));

    let total = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (rank, &(original_idx, _)) in indexed.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    indexed[n - 1].0
}
