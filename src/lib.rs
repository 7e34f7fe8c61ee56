//! Cooperative coevolution engine.
//!
//! Decomposes a high-dimensional optimisation problem into disjoint groups
//! of dimensions, assigns each group to an independently iterating search
//! algorithm and reconciles their partial solutions into one shared
//! context solution every round.
//!
//! - **[`cc`]**: the orchestrator, context, problem distribution,
//!   contribution selection and context update strategies.
//! - **[`ga`]**: a stepwise real-valued Genetic Algorithm participant.
//! - **[`sa`]**: a stepwise Simulated Annealing participant.
//!
//! Any type implementing [`cc::Participant`] can own an allocation,
//! including another [`cc::CooperativeCoevolution`].
//!
//! # Architecture
//!
//! The objective is a pure function behind the [`Objective`] trait. The
//! engine never inspects it beyond dimension, bounds and optimisation
//! sense. Rounds run sequentially on the caller's thread; the `parallel`
//! feature only parallelises evaluation inside the GA participant.

pub mod cc;
mod error;
pub mod ga;
mod problem;
pub mod sa;
mod vector;

pub use error::{CcError, Result};
pub use problem::{FnObjective, Objective, Sense};
pub use vector::{Bounds, Vector};
