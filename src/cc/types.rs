//! The participant contract shared by leaf algorithms and the orchestrator.

use super::contribution::ContributionSelection;
use crate::error::Result;
use crate::problem::{Objective, Sense};
use crate::vector::Vector;

/// A candidate solution together with its fitness.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pub position: Vector,
    pub fitness: f64,
}

/// Read-only view of one entity in a participant's topology.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub position: &'a Vector,
    pub fitness: f64,
}

/// An independently iterating search algorithm that can take part in a
/// cooperative coevolution.
///
/// The problem is handed in on every call. Inside a coevolution it is the
/// participant's [`ProblemAdapter`](super::ProblemAdapter), already
/// refreshed with the current context, so a participant only ever sees an
/// immutable snapshot of the shared context.
///
/// [`CooperativeCoevolution`](super::CooperativeCoevolution) implements
/// this trait too, which is all it takes to nest one coevolution inside
/// another.
pub trait Participant: Send {
    /// Creates the initial entities. Called exactly once.
    fn initialise(&mut self, problem: &dyn Objective) -> Result<()>;

    /// Runs exactly one step of the algorithm.
    fn iterate(&mut self, problem: &dyn Objective) -> Result<()>;

    /// Best solution currently held.
    fn best_solution(&self) -> Solution;

    /// Entities visible to contribution selection, in iteration order.
    fn topology(&self) -> Vec<Candidate<'_>>;

    fn contribution_selection(&self) -> ContributionSelection;

    fn set_contribution_selection(&mut self, strategy: ContributionSelection);
}

/// Asks `participant` for its contribution using its own selection strategy.
pub fn contribution_of(participant: &dyn Participant, sense: Sense) -> Result<Vector> {
    participant
        .contribution_selection()
        .contribution(participant, sense)
}
