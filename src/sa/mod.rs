//! Simulated Annealing (SA) participant.
//!
//! A single-solution trajectory search that accepts worsening moves with a
//! probability that decreases as the temperature falls. Stepped one
//! temperature level per [`Participant::iterate`](crate::cc::Participant::iterate).
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod participant;

pub use config::{CoolingSchedule, SaConfig};
pub use participant::SaParticipant;
