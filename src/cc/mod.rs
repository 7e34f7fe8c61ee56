//! Cooperative coevolution.
//!
//! Splits a high-dimensional problem into disjoint groups of dimensions,
//! hands each group to an independent [`Participant`] and reconciles
//! their partial solutions into one shared context every round.
//!
//! # Key Types
//!
//! - [`CooperativeCoevolution`]: the orchestrator; itself a [`Participant`]
//!   so coevolutions nest
//! - [`ContextEntity`]: the composite solution and its cached fitness
//! - [`ProblemDistribution`] / [`PerfectSplit`]: who owns which dimensions
//! - [`ProblemAdapter`]: a participant's view of the full problem
//! - [`ContributionSelection`]: what a participant offers each round
//! - [`ContextUpdate`]: whether an offer is committed
//! - [`CcRunner`]: round loop with budget, stagnation and cancellation
//!
//! # References
//!
//! - Potter & De Jong (1994), "A Cooperative Coevolutionary Approach to
//!   Function Optimization"
//! - van den Bergh & Engelbrecht (2004), "A Cooperative Approach to
//!   Particle Swarm Optimization", *IEEE TEC* 8(3)

mod adapter;
mod coevolution;
mod config;
mod context;
mod contribution;
mod distribution;
mod runner;
mod types;
mod update;

pub use adapter::ProblemAdapter;
pub use coevolution::{CcState, CooperativeCoevolution, RoundReport};
pub use config::CcConfig;
pub use context::ContextEntity;
pub use contribution::ContributionSelection;
pub use distribution::{perfect_split, validate_partition, Allocation, PerfectSplit, ProblemDistribution};
pub use runner::{CcResult, CcRunner};
pub use types::{contribution_of, Candidate, Participant, Solution};
pub use update::{ContextUpdate, UpdateOutcome};
