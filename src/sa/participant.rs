//! Simulated annealing stepped one temperature level at a time.

use super::config::SaConfig;
use crate::cc::{Candidate, ContributionSelection, Participant, Solution};
use crate::error::{CcError, Result};
use crate::ga::{dimension_range, random_position};
use crate::problem::Objective;
use crate::vector::Vector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Single-solution SA participant.
///
/// Its topology holds two entities, the best-so-far and the current
/// position, in that order. Both are re-evaluated at the start of every
/// step because the surrounding context may have changed.
pub struct SaParticipant {
    config: SaConfig,
    rng: StdRng,
    current: Option<Solution>,
    best: Option<Solution>,
    temperature: f64,
    step: usize,
    accepted_moves: usize,
    improving_moves: usize,
    contribution_selection: ContributionSelection,
}

impl SaParticipant {
    pub fn new(config: SaConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let temperature = config.initial_temperature;
        Self {
            config,
            rng,
            current: None,
            best: None,
            temperature,
            step: 0,
            accepted_moves: 0,
            improving_moves: 0,
            contribution_selection: ContributionSelection::Placeholder,
        }
    }

    pub fn with_contribution_selection(mut self, strategy: ContributionSelection) -> Self {
        self.contribution_selection = strategy;
        self
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Accepted moves, improving or not.
    pub fn accepted_moves(&self) -> usize {
        self.accepted_moves
    }

    pub fn improving_moves(&self) -> usize {
        self.improving_moves
    }

    fn neighbour(&mut self, position: &Vector, problem: &dyn Objective) -> Vector {
        let mut next = position.clone();
        if next.is_empty() {
            return next;
        }
        let i = self.rng.random_range(0..next.len());
        let range = dimension_range(problem, i, self.config.unbounded_range);
        let step = self.config.step_scale * range.width();
        if step.is_finite() {
            next[i] += self.rng.random_range(-step..=step);
        }
        next.clamp_to_bounds();
        next
    }
}

impl Participant for SaParticipant {
    fn initialise(&mut self, problem: &dyn Objective) -> Result<()> {
        self.config.validate().map_err(CcError::InvalidConfig)?;

        let position = random_position(problem, self.config.unbounded_range, &mut self.rng);
        let fitness = problem.evaluate(&position);
        let solution = Solution { position, fitness };
        self.best = Some(solution.clone());
        self.current = Some(solution);
        self.temperature = self.config.initial_temperature;
        self.step = 0;
        Ok(())
    }

    fn iterate(&mut self, problem: &dyn Objective) -> Result<()> {
        let (Some(mut current), Some(mut best)) = (self.current.take(), self.best.take()) else {
            return Err(CcError::Participant(
                "SA participant iterated before initialise".into(),
            ));
        };
        let sense = problem.sense();

        current.fitness = problem.evaluate(&current.position);
        best.fitness = problem.evaluate(&best.position);
        if sense.is_better(current.fitness, best.fitness) {
            best = current.clone();
        }

        for _ in 0..self.config.moves_per_step {
            let position = self.neighbour(&current.position, problem);
            let fitness = problem.evaluate(&position);

            let accept = if sense.is_better(fitness, current.fitness) {
                self.improving_moves += 1;
                true
            } else if fitness.is_finite() {
                // Metropolis criterion on the sense-adjusted delta
                let delta = (fitness - current.fitness).abs();
                let probability = (-delta / self.temperature).exp();
                self.rng.random_range(0.0..1.0) < probability
            } else {
                false
            };

            if accept {
                current = Solution { position, fitness };
                self.accepted_moves += 1;
                if sense.is_better(current.fitness, best.fitness) {
                    best = current.clone();
                }
            }
        }

        self.temperature = self.config.cool(self.temperature, self.step);
        self.step += 1;
        self.current = Some(current);
        self.best = Some(best);
        Ok(())
    }

    fn best_solution(&self) -> Solution {
        self.best.clone().unwrap_or(Solution {
            position: Vector::new(),
            fitness: f64::NAN,
        })
    }

    fn topology(&self) -> Vec<Candidate<'_>> {
        [&self.best, &self.current]
            .into_iter()
            .flatten()
            .map(|s| Candidate {
                position: &s.position,
                fitness: s.fitness,
            })
            .collect()
    }

    fn contribution_selection(&self) -> ContributionSelection {
        self.contribution_selection
    }

    fn set_contribution_selection(&mut self, strategy: ContributionSelection) {
        self.contribution_selection = strategy;
    }
}
