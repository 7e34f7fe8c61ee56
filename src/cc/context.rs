//! The shared composite solution.

use super::distribution::Allocation;
use crate::error::{CcError, Result};
use crate::problem::Objective;
use crate::vector::Vector;

/// Composite candidate assembled from every participant's segment, plus
/// its cached fitness.
///
/// The cached fitness is only trusted right after
/// [`calculate_fitness`](ContextEntity::calculate_fitness) or a committed
/// update. Every direct mutation clears it, so [`fitness`](ContextEntity::fitness)
/// returns `None` instead of a stale value.
#[derive(Debug, Clone, Default)]
pub struct ContextEntity {
    candidate: Vector,
    fitness: Option<f64>,
}

impl ContextEntity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sizes the context for `problem`.
    ///
    /// Each component starts at the midpoint of its bounds, or 0 when
    /// unbounded, and carries the problem's bounds. This neutral vector is
    /// what participants see while they create their initial entities.
    pub fn initialise(&mut self, problem: &dyn Objective) {
        let dimension = problem.dimension();
        let mut candidate = Vector::with_capacity(dimension);
        for i in 0..dimension {
            let bounds = problem.bounds(i);
            let start = bounds.map_or(0.0, |b| {
                if b.width().is_finite() {
                    b.lower + b.width() / 2.0
                } else {
                    b.clamp(0.0)
                }
            });
            candidate.push(start, bounds);
        }
        self.candidate = candidate;
        self.fitness = None;
    }

    pub fn candidate(&self) -> &Vector {
        &self.candidate
    }

    /// Cached fitness, or `None` if the vector changed since the last
    /// recompute.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn len(&self) -> usize {
        self.candidate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidate.is_empty()
    }

    pub fn clear(&mut self) {
        self.candidate.clear();
        self.fitness = None;
    }

    /// Concatenates a segment onto the context.
    pub fn append(&mut self, segment: &Vector) {
        self.candidate.append(segment);
        self.fitness = None;
    }

    /// Evaluates the full vector and caches the result.
    pub fn calculate_fitness(&mut self, problem: &dyn Objective) -> f64 {
        let fitness = problem.evaluate(&self.candidate);
        self.fitness = Some(fitness);
        fitness
    }

    /// Overwrites the components at `allocation`'s indices with `segment`.
    ///
    /// Leaves the fitness stale.
    pub fn write_segment(&mut self, allocation: &Allocation, segment: &Vector) -> Result<()> {
        let overlaid = overlay(&self.candidate, allocation, segment)?;
        self.candidate = overlaid;
        self.fitness = None;
        Ok(())
    }

    /// Commits a vector whose fitness is already known.
    pub(crate) fn commit(&mut self, candidate: Vector, fitness: f64) {
        self.candidate = candidate;
        self.fitness = Some(fitness);
    }
}

/// Copy of `base` with `segment` written at `allocation`'s indices.
pub(crate) fn overlay(base: &Vector, allocation: &Allocation, segment: &Vector) -> Result<Vector> {
    if segment.len() != allocation.len() {
        return Err(CcError::ContributionSize {
            expected: allocation.len(),
            actual: segment.len(),
        });
    }
    let mut full = base.clone();
    for (&index, &value) in allocation.indices().iter().zip(segment.values()) {
        full.set(index, value)?;
    }
    Ok(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::FnObjective;
    use crate::vector::Bounds;

    fn sum() -> FnObjective<impl Fn(&[f64]) -> f64 + Send + Sync> {
        FnObjective::new(4, |x: &[f64]| x.iter().sum())
    }

    #[test]
    fn test_append_then_calculate() {
        let problem = sum();
        let mut ctx = ContextEntity::new();
        ctx.initialise(&problem);
        assert_eq!(ctx.candidate().values(), &[0.0; 4]);
        ctx.clear();
        assert!(ctx.is_empty());
        ctx.append(&Vector::from_values(vec![1.0, 1.0]));
        ctx.append(&Vector::from_values(vec![2.0, 2.0]));
        assert_eq!(ctx.fitness(), None);
        assert_eq!(ctx.calculate_fitness(&problem), 6.0);
        assert_eq!(ctx.fitness(), Some(6.0));
        assert_eq!(ctx.candidate().values(), &[1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_mutation_marks_fitness_stale() {
        let problem = sum();
        let mut ctx = ContextEntity::new();
        ctx.append(&Vector::from_values(vec![1.0, 1.0, 2.0, 2.0]));
        ctx.calculate_fitness(&problem);

        let alloc = Allocation::new(vec![0, 1]);
        ctx.write_segment(&alloc, &Vector::from_values(vec![0.0, 0.0]))
            .unwrap();
        assert_eq!(ctx.candidate().values(), &[0.0, 0.0, 2.0, 2.0]);
        assert_eq!(ctx.fitness(), None);
    }

    #[test]
    fn test_write_segment_size_mismatch() {
        let mut ctx = ContextEntity::new();
        ctx.append(&Vector::zeros(4));
        let alloc = Allocation::new(vec![2, 3]);
        assert_eq!(
            ctx.write_segment(&alloc, &Vector::zeros(3)),
            Err(CcError::ContributionSize {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_clear() {
        let mut ctx = ContextEntity::new();
        ctx.append(&Vector::zeros(2));
        ctx.commit(Vector::zeros(2), 0.0);
        ctx.clear();
        assert!(ctx.is_empty());
        assert_eq!(ctx.fitness(), None);
    }

    #[test]
    fn test_initialise_extreme_bounds_start_at_zero() {
        let problem = FnObjective::new(2, |x: &[f64]| x.iter().sum())
            .with_bounds(vec![Some(Bounds::new(-f64::MAX, f64::MAX).unwrap()), None]);
        let mut ctx = ContextEntity::new();
        ctx.initialise(&problem);
        assert_eq!(ctx.candidate().values(), &[0.0, 0.0]);
    }
}
