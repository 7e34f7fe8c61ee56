//! GA participant configuration.

use super::selection::Selection;
use crate::vector::Bounds;

/// Configuration for [`GaParticipant`](super::GaParticipant).
///
/// One generation runs per call to `iterate`; there is no generation budget
/// here because the coevolution's caller decides when to stop.
///
/// # Defaults
///
/// ```
/// use u_coevolve::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 20);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_coevolve::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(40)
///     .with_selection(Selection::Rank)
///     .with_mutation_scale(0.05)
///     .with_seed(7);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals.
    pub population_size: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Fraction of the population copied unchanged into the next
    /// generation (at least one individual when positive).
    pub elite_ratio: f64,

    /// Probability of uniform crossover between two parents.
    pub crossover_rate: f64,

    /// Probability that an offspring is mutated.
    pub mutation_rate: f64,

    /// Mutation step as a fraction of the dimension's width.
    pub mutation_scale: f64,

    /// Sampling range used for dimensions the problem leaves unbounded.
    pub unbounded_range: Bounds,

    /// Evaluate offspring with rayon (requires the `parallel` feature).
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            selection: Selection::default(),
            elite_ratio: 0.1,
            crossover_rate: 0.9,
            mutation_rate: 0.3,
            mutation_scale: 0.1,
            unbounded_range: Bounds {
                lower: -10.0,
                upper: 10.0,
            },
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutation_scale(mut self, scale: f64) -> Self {
        self.mutation_scale = scale;
        self
    }

    pub fn with_unbounded_range(mut self, range: Bounds) -> Self {
        self.unbounded_range = range;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of elites carried over each generation.
    pub fn elite_count(&self) -> usize {
        if self.elite_ratio <= 0.0 || self.population_size == 0 {
            return 0;
        }
        ((self.population_size as f64 * self.elite_ratio) as usize)
            .clamp(1, self.population_size)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if let Selection::Tournament(0) = self.selection {
            return Err("tournament size must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.elite_ratio) {
            return Err(format!("elite_ratio must be in [0, 1], got {}", self.elite_ratio));
        }
        if self.elite_count() >= self.population_size {
            return Err("elite_ratio leaves no room for offspring".into());
        }
        if !self.mutation_scale.is_finite() || self.mutation_scale <= 0.0 {
            return Err(format!(
                "mutation_scale must be finite and positive, got {}",
                self.mutation_scale
            ));
        }
        let width = self.unbounded_range.width();
        if !width.is_finite() || width <= 0.0 {
            return Err("unbounded_range must have a finite positive width".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 20);
        assert_eq!(config.selection, Selection::Tournament(3));
        assert_eq!(config.elite_count(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_small_population() {
        assert!(GaConfig::default()
            .with_population_size(1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_all_elites() {
        let config = GaConfig::default().with_elite_ratio(1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_scale() {
        assert!(GaConfig::default()
            .with_mutation_scale(0.0)
            .validate()
            .is_err());
        assert!(GaConfig::default()
            .with_mutation_scale(f64::NAN)
            .validate()
            .is_err());
        assert!(GaConfig::default()
            .with_mutation_scale(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_zero_tournament() {
        assert!(GaConfig::default()
            .with_selection(Selection::Tournament(0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_rates_clamped() {
        let config = GaConfig::default()
            .with_mutation_rate(2.0)
            .with_crossover_rate(-1.0);
        assert_eq!(config.mutation_rate, 1.0);
        assert_eq!(config.crossover_rate, 0.0);
    }

    #[test]
    fn test_elite_count_at_least_one() {
        let config = GaConfig::default()
            .with_population_size(4)
            .with_elite_ratio(0.1);
        assert_eq!(config.elite_count(), 1);
        let none = GaConfig::default().with_elite_ratio(0.0);
        assert_eq!(none.elite_count(), 0);
    }
}
