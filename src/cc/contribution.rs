//! Contribution selection: which vector a participant offers the context.

use super::types::Participant;
use crate::error::{CcError, Result};
use crate::problem::Sense;
use crate::vector::Vector;

/// Strategy a participant uses to pick its contribution each round.
///
/// # Examples
///
/// ```
/// use u_coevolve::cc::ContributionSelection;
///
/// assert_eq!(ContributionSelection::default(), ContributionSelection::Placeholder);
/// assert!(ContributionSelection::Placeholder.is_placeholder());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContributionSelection {
    /// Position of the best entity in the participant's whole topology.
    ///
    /// Ties go to the entity found first in topology order.
    TopologyBest,

    /// Inert sentinel for participants not yet attached to a coevolution.
    ///
    /// The orchestrator replaces it with its own default on attach and
    /// refuses to start while any participant still carries it.
    #[default]
    Placeholder,
}

impl ContributionSelection {
    pub fn is_placeholder(self) -> bool {
        self == ContributionSelection::Placeholder
    }

    /// Selects the contribution of `participant`. Never mutates it.
    pub fn contribution(self, participant: &dyn Participant, sense: Sense) -> Result<Vector> {
        match self {
            ContributionSelection::TopologyBest => topology_best(participant, sense),
            ContributionSelection::Placeholder => Err(CcError::InvalidConfig(
                "placeholder contribution strategy cannot select a contribution".into(),
            )),
        }
    }
}

fn topology_best(participant: &dyn Participant, sense: Sense) -> Result<Vector> {
    let topology = participant.topology();
    let mut iter = topology.iter();
    let mut best = iter.next().ok_or(CcError::EmptyTopology)?;
    for candidate in iter {
        if sense.is_better(candidate.fitness, best.fitness) {
            best = candidate;
        }
    }
    Ok(best.position.clone())
}
