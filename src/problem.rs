//! Objective functions and optimisation sense.
//!
//! The engine never looks inside an objective: it only asks for the
//! dimensionality, per-dimension bounds, the optimisation sense and a
//! scalar fitness for a full-length [`Vector`].

use crate::vector::{Bounds, Vector};

/// Direction of optimisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sense {
    /// Lower fitness wins.
    #[default]
    Minimise,
    /// Higher fitness wins.
    Maximise,
}

impl Sense {
    /// Strict improvement test.
    ///
    /// A non-finite candidate is never better. A finite candidate always
    /// beats a non-finite incumbent.
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        if !candidate.is_finite() {
            return false;
        }
        if !incumbent.is_finite() {
            return true;
        }
        match self {
            Sense::Minimise => candidate < incumbent,
            Sense::Maximise => candidate > incumbent,
        }
    }

    /// Better-or-equal test with the same non-finite handling as
    /// [`is_better`](Sense::is_better).
    pub fn is_better_or_equal(self, candidate: f64, incumbent: f64) -> bool {
        if !candidate.is_finite() {
            return false;
        }
        if !incumbent.is_finite() {
            return true;
        }
        match self {
            Sense::Minimise => candidate <= incumbent,
            Sense::Maximise => candidate >= incumbent,
        }
    }

    /// The worst representable fitness under this sense.
    pub fn worst(self) -> f64 {
        match self {
            Sense::Minimise => f64::INFINITY,
            Sense::Maximise => f64::NEG_INFINITY,
        }
    }
}

/// A scalar objective over a fixed number of real dimensions.
///
/// Implementations must be pure: the same vector always yields the same
/// fitness. `Send + Sync` lets leaf participants evaluate in parallel.
pub trait Objective: Send + Sync {
    /// Number of dimensions a full candidate has.
    fn dimension(&self) -> usize;

    /// Bounds of dimension `index`, if any.
    fn bounds(&self, _index: usize) -> Option<Bounds> {
        None
    }

    /// Optimisation sense.
    fn sense(&self) -> Sense {
        Sense::Minimise
    }

    /// Fitness of a full-length candidate.
    fn evaluate(&self, candidate: &Vector) -> f64;
}

/// Closure-backed [`Objective`].
///
/// # Examples
///
/// ```
/// use u_coevolve::{FnObjective, Objective, Sense, Vector};
///
/// let sphere = FnObjective::new(3, |x: &[f64]| x.iter().map(|v| v * v).sum());
/// assert_eq!(sphere.dimension(), 3);
/// assert_eq!(sphere.sense(), Sense::Minimise);
/// assert_eq!(sphere.evaluate(&Vector::from_values(vec![1.0, 2.0, 0.0])), 5.0);
/// ```
pub struct FnObjective<F> {
    dimension: usize,
    bounds: Vec<Option<Bounds>>,
    sense: Sense,
    f: F,
}

impl<F> FnObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    /// Unbounded minimisation objective.
    pub fn new(dimension: usize, f: F) -> Self {
        Self {
            dimension,
            bounds: vec![None; dimension],
            sense: Sense::Minimise,
            f,
        }
    }

    /// Applies the same bounds to every dimension.
    pub fn with_uniform_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = vec![Some(bounds); self.dimension];
        self
    }

    /// Sets per-dimension bounds. Missing entries are treated as unbounded.
    pub fn with_bounds(mut self, bounds: Vec<Option<Bounds>>) -> Self {
        self.bounds = bounds;
        self.bounds.resize(self.dimension, None);
        self
    }

    pub fn with_sense(mut self, sense: Sense) -> Self {
        self.sense = sense;
        self
    }
}

impl<F> Objective for FnObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn bounds(&self, index: usize) -> Option<Bounds> {
        self.bounds.get(index).copied().flatten()
    }

    fn sense(&self) -> Sense {
        self.sense
    }

    fn evaluate(&self, candidate: &Vector) -> f64 {
        (self.f)(candidate.values())
    }
}
