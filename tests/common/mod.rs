#![allow(dead_code)]

use u_coevolve::cc::{Candidate, ContributionSelection, Participant, Solution};
use u_coevolve::{Objective, Result, Vector};

/// Participant that replays a fixed list of proposals, one per step.
///
/// On each step it probes its adapter with an all-zero sub-vector and
/// records the fitness, which reveals the rest of the context it was shown.
/// It also records the contribution strategy it carried at every step.
pub struct Scripted {
    pub best: Vector,
    pub proposals: Vec<Vec<f64>>,
    pub step: usize,
    pub probes: Vec<f64>,
    pub strategies_seen: Vec<ContributionSelection>,
    pub strategy: ContributionSelection,
    pub strategy_sets: usize,
}

impl Scripted {
    pub fn new(initial: Vec<f64>, proposals: Vec<Vec<f64>>) -> Self {
        Self {
            best: Vector::from_values(initial),
            proposals,
            step: 0,
            probes: Vec::new(),
            strategies_seen: Vec::new(),
            strategy: ContributionSelection::Placeholder,
            strategy_sets: 0,
        }
    }
}

impl Participant for Scripted {
    fn initialise(&mut self, _problem: &dyn Objective) -> Result<()> {
        Ok(())
    }

    fn iterate(&mut self, problem: &dyn Objective) -> Result<()> {
        self.probes
            .push(problem.evaluate(&Vector::zeros(problem.dimension())));
        self.strategies_seen.push(self.strategy);
        if let Some(next) = self.proposals.get(self.step) {
            self.best = Vector::from_values(next.clone());
        }
        self.step += 1;
        Ok(())
    }

    fn best_solution(&self) -> Solution {
        Solution {
            position: self.best.clone(),
            fitness: 0.0,
        }
    }

    fn topology(&self) -> Vec<Candidate<'_>> {
        vec![Candidate {
            position: &self.best,
            fitness: 0.0,
        }]
    }

    fn contribution_selection(&self) -> ContributionSelection {
        self.strategy
    }

    fn set_contribution_selection(&mut self, strategy: ContributionSelection) {
        self.strategy = strategy;
        self.strategy_sets += 1;
    }
}

/// Participant wrapper that exposes a shared log of observations.
pub struct Observed {
    pub inner: Scripted,
    pub log: std::sync::Arc<std::sync::Mutex<Vec<(f64, ContributionSelection, usize)>>>,
}

impl Participant for Observed {
    fn initialise(&mut self, problem: &dyn Objective) -> Result<()> {
        self.inner.initialise(problem)
    }

    fn iterate(&mut self, problem: &dyn Objective) -> Result<()> {
        self.inner.iterate(problem)?;
        if let Ok(mut log) = self.log.lock() {
            log.push((
                self.inner.probes.last().copied().unwrap_or(f64::NAN),
                self.inner.strategy,
                self.inner.strategy_sets,
            ));
        }
        Ok(())
    }

    fn best_solution(&self) -> Solution {
        self.inner.best_solution()
    }

    fn topology(&self) -> Vec<Candidate<'_>> {
        self.inner.topology()
    }

    fn contribution_selection(&self) -> ContributionSelection {
        self.inner.contribution_selection()
    }

    fn set_contribution_selection(&mut self, strategy: ContributionSelection) {
        self.inner.set_contribution_selection(strategy);
    }
}
