//! SA configuration and cooling schedules.

use crate::vector::Bounds;

/// Cooling schedule for temperature reduction.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    ///
    /// Typical `alpha`: 0.95–0.99.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling over `steps` temperature levels:
    /// `T_k = T_0 - k * (T_0 - T_min) / steps`.
    Linear {
        /// Number of levels from initial to minimum temperature.
        steps: usize,
    },

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// Reference: Lundy & Mees (1986)
    LundyMees {
        /// Cooling parameter.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.95 }
    }
}

/// Configuration for [`SaParticipant`](super::SaParticipant).
///
/// Each `iterate` runs `moves_per_step` Metropolis moves at the current
/// temperature, then cools once. Once the temperature reaches
/// `min_temperature` it stays there and the search is effectively greedy.
///
/// # Examples
///
/// ```
/// use u_coevolve::sa::{SaConfig, CoolingSchedule};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(10.0)
///     .with_min_temperature(0.001)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.9 })
///     .with_moves_per_step(50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Temperature floor.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Neighbour evaluations per `iterate`.
    pub moves_per_step: usize,

    /// Neighbour step as a fraction of the dimension's width.
    pub step_scale: f64,

    /// Sampling range used for dimensions the problem leaves unbounded.
    pub unbounded_range: Bounds,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 10.0,
            min_temperature: 1e-6,
            cooling: CoolingSchedule::default(),
            moves_per_step: 20,
            step_scale: 0.1,
            unbounded_range: Bounds {
                lower: -10.0,
                upper: 10.0,
            },
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_moves_per_step(mut self, n: usize) -> Self {
        self.moves_per_step = n;
        self
    }

    pub fn with_step_scale(mut self, scale: f64) -> Self {
        self.step_scale = scale;
        self
    }

    pub fn with_unbounded_range(mut self, range: Bounds) -> Self {
        self.unbounded_range = range;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Temperature after cooling from `temperature` at level `step`.
    pub fn cool(&self, temperature: f64, step: usize) -> f64 {
        let next = match self.cooling {
            CoolingSchedule::Geometric { alpha } => temperature * alpha,
            CoolingSchedule::Linear { steps } => {
                self.initial_temperature
                    - (step + 1) as f64 * (self.initial_temperature - self.min_temperature)
                        / steps as f64
            }
            CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
        };
        next.max(self.min_temperature)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_temperature <= 0.0 {
            return Err("initial_temperature must be positive".into());
        }
        if self.min_temperature <= 0.0 {
            return Err("min_temperature must be positive".into());
        }
        if self.min_temperature >= self.initial_temperature {
            return Err("min_temperature must be less than initial_temperature".into());
        }
        if self.moves_per_step == 0 {
            return Err("moves_per_step must be at least 1".into());
        }
        if !self.step_scale.is_finite() || self.step_scale <= 0.0 {
            return Err(format!(
                "step_scale must be finite and positive, got {}",
                self.step_scale
            ));
        }
        let width = self.unbounded_range.width();
        if !width.is_finite() || width <= 0.0 {
            return Err("unbounded_range must have a finite positive width".into());
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if alpha <= 0.0 || alpha >= 1.0 {
                    return Err(format!("geometric alpha must be in (0, 1), got {alpha}"));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if beta <= 0.0 {
                    return Err(format!("lundy-mees beta must be positive, got {beta}"));
                }
            }
            CoolingSchedule::Linear { steps } => {
                if steps == 0 {
                    return Err("linear cooling needs at least 1 step".into());
                }
            }
        }
        Ok(())
    }
}
