//! Context update: merging a contribution into the shared context.

use super::context::{overlay, ContextEntity};
use super::distribution::Allocation;
use crate::error::Result;
use crate::problem::Objective;
use crate::vector::Vector;

/// Acceptance rule applied when a contribution is merged.
///
/// Both rules refuse a candidate whose fitness is non-finite; such a
/// contribution leaves the context exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContextUpdate {
    /// Greedy: commit only if the resulting fitness is better than or equal
    /// to the cached one. The cached fitness never worsens.
    #[default]
    Selective,

    /// Commit every finite candidate, better or not.
    Unconditional,
}

/// Whether a contribution was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Accepted,
    Rejected,
}

impl UpdateOutcome {
    pub fn is_accepted(self) -> bool {
        self == UpdateOutcome::Accepted
    }
}

impl ContextUpdate {
    /// Merges `contribution` into `context` at `allocation`.
    ///
    /// On acceptance both the vector and the cached fitness change
    /// together. On rejection neither changes.
    ///
    /// # Errors
    ///
    /// [`CcError::ContributionSize`](crate::CcError::ContributionSize) if
    /// the contribution does not match the allocation.
    pub fn update_context(
        self,
        context: &mut ContextEntity,
        contribution: &Vector,
        allocation: &Allocation,
        problem: &dyn Objective,
    ) -> Result<UpdateOutcome> {
        let candidate = overlay(context.candidate(), allocation, contribution)?;
        let fitness = problem.evaluate(&candidate);

        if !fitness.is_finite() {
            log::trace!("rejected contribution with non-finite fitness {fitness}");
            return Ok(UpdateOutcome::Rejected);
        }

        let accept = match self {
            ContextUpdate::Selective => match context.fitness() {
                Some(current) => problem.sense().is_better_or_equal(fitness, current),
                None => true,
            },
            ContextUpdate::Unconditional => true,
        };

        if accept {
            log::trace!("committed contribution, context fitness {fitness}");
            context.commit(candidate, fitness);
            Ok(UpdateOutcome::Accepted)
        } else {
            log::trace!(
                "rejected contribution with fitness {fitness}, context holds {:?}",
                context.fitness()
            );
            Ok(UpdateOutcome::Rejected)
        }
    }
}
