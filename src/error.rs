//! Error type shared by the coevolution core and the bundled participants.

use thiserror::Error;

/// Errors raised while configuring or running a cooperative coevolution.
///
/// Configuration problems are detected at attach or initialise time.
/// A contribution whose fitness is non-finite is *not* an error: the
/// context update strategy rejects it silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CcError {
    #[error("no participants attached")]
    NoParticipants,

    #[error("cannot split {dimensions} dimensions across {participants} participants")]
    TooFewDimensions {
        dimensions: usize,
        participants: usize,
    },

    #[error("allocations do not partition the problem: {0}")]
    InvalidPartition(String),

    #[error("participant {index} still uses the placeholder contribution strategy")]
    PlaceholderContribution { index: usize },

    #[error("contribution has {actual} components, allocation expects {expected}")]
    ContributionSize { expected: usize, actual: usize },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("orchestrator has not been initialised")]
    NotInitialised,

    #[error("orchestrator is already initialised")]
    AlreadyInitialised,

    #[error("participant exposes no entities to select a contribution from")]
    EmptyTopology,

    #[error("invalid bounds: lower {lower} > upper {upper}")]
    InvalidBounds { lower: f64, upper: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("participant failure: {0}")]
    Participant(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CcError>;
