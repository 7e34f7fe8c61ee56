//! Convenience loop around [`CooperativeCoevolution`].
//!
//! The orchestrator only knows how to run one round; deciding when to stop
//! belongs to the caller. [`CcRunner`] is that caller for the common case:
//! a round budget, optional stagnation detection and a cancellation flag.

use super::coevolution::{CcState, CooperativeCoevolution};
use super::types::{Participant, Solution};
use crate::error::Result;
use crate::problem::Objective;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of a cooperative coevolution run.
#[derive(Debug, Clone)]
pub struct CcResult {
    /// Final context and its cached fitness.
    pub best: Solution,

    /// Rounds executed by this run.
    pub iterations: usize,

    /// Whether the run stopped on the stagnation limit.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Context fitness after initialisation and after every round.
    pub fitness_history: Vec<f64>,

    /// Contributions committed across all rounds.
    pub accepted_contributions: usize,

    /// Contributions discarded across all rounds.
    pub rejected_contributions: usize,
}

/// Drives a [`CooperativeCoevolution`] until a stopping condition holds.
pub struct CcRunner;

impl CcRunner {
    /// Runs until `max_iterations` rounds or the stagnation limit.
    ///
    /// Initialises the orchestrator first if needed.
    pub fn run(cc: &mut CooperativeCoevolution, problem: &dyn Objective) -> Result<CcResult> {
        Self::run_with_cancel(cc, problem, None)
    }

    /// Runs with an optional cancellation token, checked before each round.
    pub fn run_with_cancel(
        cc: &mut CooperativeCoevolution,
        problem: &dyn Objective,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<CcResult> {
        if cc.state() == CcState::Uninitialised {
            cc.initialise(problem)?;
        }

        let sense = problem.sense();
        let max_iterations = cc.config().max_iterations;
        let stagnation_limit = cc.config().stagnation_limit;

        let mut best_fitness = cc.best_solution().fitness;
        // The budget may be effectively unbounded when stagnation decides.
        let mut fitness_history = Vec::with_capacity(max_iterations.min(1024).saturating_add(1));
        fitness_history.push(best_fitness);

        let mut iterations = 0usize;
        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;
        let mut accepted_contributions = 0usize;
        let mut rejected_contributions = 0usize;

        while iterations < max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let report = cc.iterate_round(problem)?;
            iterations += 1;
            accepted_contributions += report.accepted;
            rejected_contributions += report.rejected;

            let fitness = cc.best_solution().fitness;
            fitness_history.push(fitness);

            if sense.is_better(fitness, best_fitness) {
                best_fitness = fitness;
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            if stagnation_limit > 0 && stagnation_counter >= stagnation_limit {
                stagnated = true;
                break;
            }
        }

        let best = cc.best_solution();
        log::info!(
            "coevolution stopped after {iterations} rounds (stagnated: {stagnated}, cancelled: {cancelled}), fitness {}",
            best.fitness
        );

        Ok(CcResult {
            best,
            iterations,
            stagnated,
            cancelled,
            fitness_history,
            accepted_contributions,
            rejected_contributions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cc::CcConfig;
    use crate::ga::{GaConfig, GaParticipant};
    use crate::problem::FnObjective;
    use crate::vector::Bounds;

    fn sphere(n: usize) -> FnObjective<impl Fn(&[f64]) -> f64 + Send + Sync> {
        FnObjective::new(n, |x: &[f64]| x.iter().map(|v| v * v).sum())
            .with_uniform_bounds(Bounds::symmetric(5.12).unwrap())
    }

    fn build(config: CcConfig, k: u64) -> CooperativeCoevolution {
        let mut cc = CooperativeCoevolution::new(config).unwrap();
        for seed in 0..k {
            let ga = GaConfig::default()
                .with_population_size(20)
                .with_seed(seed)
                .with_parallel(false);
            cc.add_participant(GaParticipant::new(ga)).unwrap();
        }
        cc
    }

    #[test]
    fn test_run_sphere_converges() {
        let problem = sphere(12);
        let mut cc = build(CcConfig::default().with_max_iterations(150), 4);
        let result = CcRunner::run(&mut cc, &problem).unwrap();

        assert_eq!(result.iterations, 150);
        assert!(
            result.best.fitness < result.fitness_history[0],
            "expected improvement from {}, got {}",
            result.fitness_history[0],
            result.best.fitness
        );
        assert!(result.best.fitness < 5.0, "got {}", result.best.fitness);
        assert_eq!(result.best.position.len(), 12);
    }

    #[test]
    fn test_fitness_history_non_increasing() {
        let problem = sphere(8);
        let mut cc = build(CcConfig::default().with_max_iterations(60), 2);
        let result = CcRunner::run(&mut cc, &problem).unwrap();

        assert_eq!(result.fitness_history.len(), 61);
        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "context fitness worsened: {} -> {}",
                window[0],
                window[1]
            );
        }
        assert_eq!(
            result.accepted_contributions + result.rejected_contributions,
            60 * 2
        );
    }

    #[test]
    fn test_cancellation() {
        let problem = sphere(4);
        let mut cc = build(CcConfig::default(), 2);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = CcRunner::run_with_cancel(&mut cc, &problem, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(cc.state(), CcState::Initialised);
    }

    #[test]
    fn test_stagnation_stops_flat_problem() {
        let problem = FnObjective::new(4, |_: &[f64]| 1.0);
        let mut cc = build(
            CcConfig::default()
                .with_max_iterations(100)
                .with_stagnation_limit(5),
            2,
        );
        let result = CcRunner::run(&mut cc, &problem).unwrap();
        assert!(result.stagnated);
        assert_eq!(result.iterations, 5);
    }

    #[test]
    fn test_unbounded_budget_stops_on_stagnation() {
        let problem = FnObjective::new(4, |_: &[f64]| 1.0);
        for max_iterations in [usize::MAX, 1usize << 62] {
            let config = CcConfig::default()
                .with_max_iterations(max_iterations)
                .with_stagnation_limit(3);
            assert!(config.validate().is_ok());
            let mut cc = build(config, 2);
            let result = CcRunner::run(&mut cc, &problem).unwrap();
            assert!(result.stagnated);
            assert_eq!(result.iterations, 3);
            assert_eq!(result.fitness_history.len(), 4);
        }
    }
}
