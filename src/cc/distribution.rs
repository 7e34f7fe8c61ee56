//! Problem decomposition into per-participant allocations.
//!
//! # Perfect split
//!
//! For `D` dimensions and `k` participants every participant receives
//! `⌊D/k⌋` dimensions and the first `D mod k` participants one extra, as
//! contiguous ascending ranges in participant order. `D = 5, k = 2` yields
//! `{0, 1, 2}` and `{3, 4}`.
//!
//! # Reference
//!
//! Potter & De Jong (1994), "A Cooperative Coevolutionary Approach to
//! Function Optimization"

use super::adapter::ProblemAdapter;
use crate::error::{CcError, Result};
use crate::problem::Objective;
use crate::vector::Vector;

/// Dimension indices of the full problem owned by one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    indices: Vec<usize>,
}

impl Allocation {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Contiguous range `start..start + len`.
    pub fn contiguous(start: usize, len: usize) -> Self {
        Self::new((start..start + len).collect())
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Full-problem index of local dimension `local`.
    pub fn global_index(&self, local: usize) -> Option<usize> {
        self.indices.get(local).copied()
    }
}

/// Decides which dimensions each participant owns.
pub trait ProblemDistribution: Send {
    /// Computes one allocation per participant, in participant order.
    fn distribute(&self, participants: usize, problem: &dyn Objective) -> Result<Vec<Allocation>>;

    /// Distributes the problem and binds one adapter per participant to
    /// `context`.
    ///
    /// The allocations are checked to partition `0..problem.dimension()`
    /// before any adapter is built.
    fn perform_distribution<'a>(
        &self,
        participants: usize,
        problem: &'a dyn Objective,
        context: &Vector,
    ) -> Result<Vec<ProblemAdapter<'a>>> {
        let allocations = self.distribute(participants, problem)?;
        if allocations.len() != participants {
            return Err(CcError::InvalidPartition(format!(
                "{} allocations for {participants} participants",
                allocations.len()
            )));
        }
        validate_partition(&allocations, problem.dimension())?;
        Ok(allocations
            .into_iter()
            .map(|allocation| ProblemAdapter::new(problem, allocation, context.clone()))
            .collect())
    }
}

/// Even contiguous split; sizes differ by at most one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerfectSplit;

impl ProblemDistribution for PerfectSplit {
    fn distribute(&self, participants: usize, problem: &dyn Objective) -> Result<Vec<Allocation>> {
        perfect_split(problem.dimension(), participants)
    }
}

/// Perfect-split allocations for `dimensions` over `participants`.
///
/// # Errors
///
/// [`CcError::NoParticipants`] for `participants == 0`;
/// [`CcError::TooFewDimensions`] when some participant would get nothing.
pub fn perfect_split(dimensions: usize, participants: usize) -> Result<Vec<Allocation>> {
    if participants == 0 {
        return Err(CcError::NoParticipants);
    }
    if dimensions < participants {
        return Err(CcError::TooFewDimensions {
            dimensions,
            participants,
        });
    }

    let base = dimensions / participants;
    let remainder = dimensions % participants;
    let mut start = 0;
    let mut allocations = Vec::with_capacity(participants);
    for i in 0..participants {
        let len = base + usize::from(i < remainder);
        allocations.push(Allocation::contiguous(start, len));
        start += len;
    }
    Ok(allocations)
}

/// Checks that `allocations` cover `0..dimensions` exactly once each, with
/// no empty allocation.
pub fn validate_partition(allocations: &[Allocation], dimensions: usize) -> Result<()> {
    let mut seen = vec![false; dimensions];
    for (i, allocation) in allocations.iter().enumerate() {
        if allocation.is_empty() {
            return Err(CcError::InvalidPartition(format!("allocation {i} is empty")));
        }
        for &index in allocation.indices() {
            match seen.get_mut(index) {
                None => {
                    return Err(CcError::InvalidPartition(format!(
                        "index {index} out of range for {dimensions} dimensions"
                    )))
                }
                Some(true) => {
                    return Err(CcError::InvalidPartition(format!(
                        "index {index} allocated twice"
                    )))
                }
                Some(slot) => *slot = true,
            }
        }
    }
    if let Some(missing) = seen.iter().position(|&s| !s) {
        return Err(CcError::InvalidPartition(format!(
            "index {missing} not allocated"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::FnObjective;

    fn sizes(allocs: &[Allocation]) -> Vec<usize> {
        allocs.iter().map(Allocation::len).collect()
    }

    #[test]
    fn test_even_split() {
        let allocs = perfect_split(4, 2).unwrap();
        assert_eq!(allocs[0].indices(), &[0, 1]);
        assert_eq!(allocs[1].indices(), &[2, 3]);
    }

    #[test]
    fn test_remainder_goes_first() {
        let allocs = perfect_split(5, 2).unwrap();
        assert_eq!(sizes(&allocs), vec![3, 2]);
        assert_eq!(allocs[0].indices(), &[0, 1, 2]);
        assert_eq!(allocs[1].indices(), &[3, 4]);

        let allocs = perfect_split(10, 4).unwrap();
        assert_eq!(sizes(&allocs), vec![3, 3, 2, 2]);
    }

    #[test]
    fn test_one_dimension_each() {
        let allocs = perfect_split(3, 3).unwrap();
        assert_eq!(sizes(&allocs), vec![1, 1, 1]);
        assert_eq!(allocs[2].global_index(0), Some(2));
    }

    #[test]
    fn test_zero_participants() {
        assert_eq!(perfect_split(4, 0), Err(CcError::NoParticipants));
    }

    #[test]
    fn test_too_few_dimensions() {
        assert_eq!(
            perfect_split(2, 3),
            Err(CcError::TooFewDimensions {
                dimensions: 2,
                participants: 3
            })
        );
    }

    #[test]
    fn test_validate_partition_rejects() {
        let overlap = vec![Allocation::new(vec![0, 1]), Allocation::new(vec![1, 2])];
        assert!(validate_partition(&overlap, 3).is_err());

        let gap = vec![Allocation::new(vec![0]), Allocation::new(vec![2])];
        assert!(validate_partition(&gap, 3).is_err());

        let empty = vec![Allocation::new(vec![0, 1, 2]), Allocation::new(vec![])];
        assert!(validate_partition(&empty, 3).is_err());

        let out_of_range = vec![Allocation::new(vec![0, 5])];
        assert!(validate_partition(&out_of_range, 2).is_err());

        let ok = vec![Allocation::new(vec![2, 0]), Allocation::new(vec![1])];
        assert!(validate_partition(&ok, 3).is_ok());
    }

    struct Overlapping;

    impl ProblemDistribution for Overlapping {
        fn distribute(&self, _participants: usize, _problem: &dyn Objective) -> Result<Vec<Allocation>> {
            Ok(vec![Allocation::new(vec![0, 1]), Allocation::new(vec![1])])
        }
    }

    #[test]
    fn test_perform_distribution_binds_adapters() {
        let problem = FnObjective::new(5, |x: &[f64]| x.iter().sum());
        let context = Vector::zeros(5);
        let adapters = PerfectSplit
            .perform_distribution(2, &problem, &context)
            .unwrap();
        assert_eq!(adapters.len(), 2);
        assert_eq!(adapters[0].allocation().len(), 3);
        assert_eq!(adapters[1].allocation().indices(), &[3, 4]);
    }

    #[test]
    fn test_perform_distribution_checks_partition() {
        let problem = FnObjective::new(2, |x: &[f64]| x.iter().sum());
        let result = Overlapping.perform_distribution(2, &problem, &Vector::zeros(2));
        assert!(matches!(result, Err(CcError::InvalidPartition(_))));
    }
}
