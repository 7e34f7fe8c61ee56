//! Genetic Algorithm participant.
//!
//! A real-valued generational GA that runs one generation per
//! [`Participant::iterate`](crate::cc::Participant::iterate), so it can own
//! one allocation of a cooperative coevolution. It also runs standalone
//! against any [`Objective`](crate::Objective).
//!
//! # Key Types
//!
//! - [`GaConfig`]: population size, selection, operator rates, seed
//! - [`GaParticipant`]: the stepwise GA
//! - [`Selection`]: tournament, roulette and rank selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod participant;
mod selection;

pub use config::GaConfig;
pub use participant::{GaParticipant, Individual};
pub use selection::{to_cost, Selection};

pub(crate) use participant::{dimension_range, random_position};
