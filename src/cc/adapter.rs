//! Per-participant view of the full problem.

use super::context::overlay;
use super::distribution::Allocation;
use crate::problem::{Objective, Sense};
use crate::vector::{Bounds, Vector};

/// Evaluates partial candidates by overlaying them onto a snapshot of the
/// shared context.
///
/// The adapter owns its snapshot and never writes back to the context.
/// All writes go through [`ContextUpdate`](super::ContextUpdate).
pub struct ProblemAdapter<'a> {
    problem: &'a dyn Objective,
    allocation: Allocation,
    context: Vector,
}

impl<'a> ProblemAdapter<'a> {
    pub fn new(problem: &'a dyn Objective, allocation: Allocation, context: Vector) -> Self {
        Self {
            problem,
            allocation,
            context,
        }
    }

    pub fn allocation(&self) -> &Allocation {
        &self.allocation
    }

    pub fn into_allocation(self) -> Allocation {
        self.allocation
    }

    /// The snapshot evaluations are overlaid onto.
    pub fn context(&self) -> &Vector {
        &self.context
    }

    /// Replaces the context snapshot.
    pub fn update_context(&mut self, context: &Vector) {
        self.context.clone_from(context);
    }

    /// Full-length vector with `sub` written at the allocated indices.
    ///
    /// Returns `None` when `sub` does not match the allocation size or the
    /// snapshot is shorter than the allocation requires.
    pub fn overlay(&self, sub: &Vector) -> Option<Vector> {
        overlay(&self.context, &self.allocation, sub).ok()
    }

    /// Snapshot value at local dimension `local`, if the snapshot covers it.
    pub fn snapshot_value(&self, local: usize) -> Option<f64> {
        self.allocation
            .global_index(local)
            .and_then(|g| self.context.get(g))
    }
}

impl std::fmt::Debug for ProblemAdapter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProblemAdapter")
            .field("allocation", &self.allocation)
            .field("context", &self.context)
            .finish()
    }
}

impl Objective for ProblemAdapter<'_> {
    fn dimension(&self) -> usize {
        self.allocation.len()
    }

    fn bounds(&self, index: usize) -> Option<Bounds> {
        self.allocation
            .global_index(index)
            .and_then(|g| self.problem.bounds(g))
    }

    fn sense(&self) -> Sense {
        self.problem.sense()
    }

    /// Fitness of the snapshot with `sub` overlaid.
    ///
    /// A mis-sized `sub` evaluates to the worst fitness for the sense.
    fn evaluate(&self, sub: &Vector) -> f64 {
        match self.overlay(sub) {
            Some(full) => self.problem.evaluate(&full),
            None => self.problem.sense().worst(),
        }
    }
}
