//! Generational GA over real vectors, stepped one generation at a time.

use super::config::GaConfig;
use super::selection::to_cost;
use crate::cc::{Candidate, ContributionSelection, Participant, Solution};
use crate::error::{CcError, Result};
use crate::problem::Objective;
use crate::vector::{Bounds, Vector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A member of the population with its most recent fitness.
#[derive(Debug, Clone)]
pub struct Individual {
    pub position: Vector,
    pub fitness: f64,
}

/// Genetic algorithm that takes part in a cooperative coevolution.
///
/// Each [`iterate`](Participant::iterate) re-evaluates the population
/// against the current problem (its context may have moved since the last
/// round), keeps the elites and breeds the rest with selection, uniform
/// crossover and bounded uniform mutation.
///
/// New participants carry [`ContributionSelection::Placeholder`]; the
/// orchestrator installs its own default when the participant is attached.
pub struct GaParticipant {
    config: GaConfig,
    rng: StdRng,
    population: Vec<Individual>,
    best: usize,
    generation: usize,
    contribution_selection: ContributionSelection,
}

impl GaParticipant {
    pub fn new(config: GaConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self {
            config,
            rng,
            population: Vec::new(),
            best: 0,
            generation: 0,
            contribution_selection: ContributionSelection::Placeholder,
        }
    }

    pub fn with_contribution_selection(mut self, strategy: ContributionSelection) -> Self {
        self.contribution_selection = strategy;
        self
    }

    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Generations completed.
    pub fn generation(&self) -> usize {
        self.generation
    }

    fn evaluate_all(population: &mut [Individual], problem: &dyn Objective, parallel: bool) {
        #[cfg(feature = "parallel")]
        if parallel {
            population.par_iter_mut().for_each(|ind| {
                ind.fitness = problem.evaluate(&ind.position);
            });
            return;
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        for ind in population.iter_mut() {
            ind.fitness = problem.evaluate(&ind.position);
        }
    }

    fn update_best(&mut self, problem: &dyn Objective) {
        let sense = problem.sense();
        self.best = (0..self.population.len())
            .min_by(|&a, &b| {
                to_cost(self.population[a].fitness, sense)
                    .total_cmp(&to_cost(self.population[b].fitness, sense))
            })
            .unwrap_or(0);
    }

    fn crossover(&mut self, p1: &Vector, p2: &Vector) -> Vector {
        if self.rng.random_range(0.0..1.0) >= self.config.crossover_rate {
            return p1.clone();
        }
        let mut child = p1.clone();
        for i in 0..child.len() {
            if self.rng.random_bool(0.5) {
                child[i] = p2[i];
            }
        }
        child
    }

    fn mutate(&mut self, child: &mut Vector, problem: &dyn Objective) {
        let n = child.len();
        if n == 0 {
            return;
        }
        let forced = self.rng.random_range(0..n);
        let gene_rate = 1.0 / n as f64;
        for i in 0..n {
            if i != forced && self.rng.random_range(0.0..1.0) >= gene_rate {
                continue;
            }
            let range = dimension_range(problem, i, self.config.unbounded_range);
            let step = self.config.mutation_scale * range.width();
            if step.is_finite() {
                child[i] += self.rng.random_range(-step..=step);
            }
        }
        child.clamp_to_bounds();
    }
}

/// Sampling range of dimension `index`: the problem's bounds when their
/// width is finite, otherwise `fallback`.
///
/// Bounds such as `[-f64::MAX, f64::MAX]` have finite ends but an infinite
/// width and cannot be sampled uniformly.
pub(crate) fn dimension_range(problem: &dyn Objective, index: usize, fallback: Bounds) -> Bounds {
    match problem.bounds(index) {
        Some(b) if b.width().is_finite() => b,
        _ => fallback,
    }
}

/// Uniformly random position within the problem's bounds.
pub(crate) fn random_position<R: Rng>(problem: &dyn Objective, fallback: Bounds, rng: &mut R) -> Vector {
    let dimension = problem.dimension();
    let mut position = Vector::with_capacity(dimension);
    for i in 0..dimension {
        let range = dimension_range(problem, i, fallback);
        let value = if range.width() > 0.0 {
            rng.random_range(range.lower..=range.upper)
        } else {
            range.lower
        };
        position.push(value, problem.bounds(i));
    }
    position
}

impl Participant for GaParticipant {
    fn initialise(&mut self, problem: &dyn Objective) -> Result<()> {
        self.config.validate().map_err(CcError::InvalidConfig)?;

        let fallback = self.config.unbounded_range;
        self.population = (0..self.config.population_size)
            .map(|_| Individual {
                position: random_position(problem, fallback, &mut self.rng),
                fitness: f64::NAN,
            })
            .collect();
        Self::evaluate_all(&mut self.population, problem, self.config.parallel);
        self.update_best(problem);
        self.generation = 0;
        Ok(())
    }

    fn iterate(&mut self, problem: &dyn Objective) -> Result<()> {
        if self.population.is_empty() {
            return Err(CcError::Participant(
                "GA participant iterated before initialise".into(),
            ));
        }
        let sense = problem.sense();

        // Context may have changed since the last generation.
        Self::evaluate_all(&mut self.population, problem, self.config.parallel);
        self.population.sort_by(|a, b| {
            to_cost(a.fitness, sense).total_cmp(&to_cost(b.fitness, sense))
        });

        let elite_count = self.config.elite_count();
        let costs: Vec<f64> = self
            .population
            .iter()
            .map(|ind| to_cost(ind.fitness, sense))
            .collect();

        let mut offspring = Vec::with_capacity(self.config.population_size - elite_count);
        while elite_count + offspring.len() < self.config.population_size {
            let selection = self.config.selection;
            let i1 = selection.select(&costs, &mut self.rng).unwrap_or(0);
            let i2 = selection.select(&costs, &mut self.rng).unwrap_or(0);
            let p1 = self.population[i1].position.clone();
            let p2 = self.population[i2].position.clone();

            let mut child = self.crossover(&p1, &p2);
            if self.rng.random_range(0.0..1.0) < self.config.mutation_rate {
                self.mutate(&mut child, problem);
            }
            offspring.push(Individual {
                position: child,
                fitness: f64::NAN,
            });
        }
        Self::evaluate_all(&mut offspring, problem, self.config.parallel);

        self.population.truncate(elite_count);
        self.population.extend(offspring);
        self.update_best(problem);
        self.generation += 1;
        Ok(())
    }

    fn best_solution(&self) -> Solution {
        match self.population.get(self.best) {
            Some(ind) => Solution {
                position: ind.position.clone(),
                fitness: ind.fitness,
            },
            None => Solution {
                position: Vector::new(),
                fitness: f64::NAN,
            },
        }
    }

    fn topology(&self) -> Vec<Candidate<'_>> {
        self.population
            .iter()
            .map(|ind| Candidate {
                position: &ind.position,
                fitness: ind.fitness,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{FnObjective, Sense};

    fn sphere(n: usize) -> FnObjective<impl Fn(&[f64]) -> f64 + Send + Sync> {
        FnObjective::new(n, |x: &[f64]| x.iter().map(|v| v * v).sum())
            .with_uniform_bounds(Bounds::symmetric(5.12).unwrap())
    }

    #[test]
    fn test_initialise_respects_bounds() {
        let problem = sphere(5);
        let mut ga = GaParticipant::new(GaConfig::default().with_seed(1));
        ga.initialise(&problem).unwrap();
        assert_eq!(ga.population().len(), 20);
        for ind in ga.population() {
            assert_eq!(ind.position.len(), 5);
            assert!(ind.position.values().iter().all(|v| v.abs() <= 5.12));
            assert!(ind.fitness.is_finite());
        }
    }

    #[test]
    fn test_standalone_sphere_improves() {
        let problem = sphere(3);
        let mut ga = GaParticipant::new(GaConfig::default().with_seed(42));
        ga.initialise(&problem).unwrap();
        let start = ga.best_solution().fitness;
        for _ in 0..200 {
            ga.iterate(&problem).unwrap();
        }
        let end = ga.best_solution().fitness;
        assert!(end < start, "expected improvement: {start} -> {end}");
        assert!(end < 1.0, "got {end}");
        assert_eq!(ga.generation(), 200);
    }

    #[test]
    fn test_maximise_sense() {
        let problem = FnObjective::new(2, |x: &[f64]| x[0] + x[1])
            .with_uniform_bounds(Bounds::new(0.0, 1.0).unwrap())
            .with_sense(Sense::Maximise);
        let mut ga = GaParticipant::new(GaConfig::default().with_seed(3));
        ga.initialise(&problem).unwrap();
        for _ in 0..100 {
            ga.iterate(&problem).unwrap();
        }
        assert!(ga.best_solution().fitness > 1.8);
    }

    #[test]
    fn test_same_seed_same_run() {
        let problem = sphere(4);
        let run = |seed| {
            let mut ga = GaParticipant::new(GaConfig::default().with_seed(seed));
            ga.initialise(&problem).unwrap();
            for _ in 0..10 {
                ga.iterate(&problem).unwrap();
            }
            ga.best_solution()
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn test_iterate_before_initialise() {
        let problem = sphere(2);
        let mut ga = GaParticipant::new(GaConfig::default());
        assert!(matches!(
            ga.iterate(&problem),
            Err(CcError::Participant(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let problem = sphere(2);
        let mut ga = GaParticipant::new(GaConfig::default().with_population_size(1));
        assert!(matches!(
            ga.initialise(&problem),
            Err(CcError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_defaults_to_placeholder() {
        let ga = GaParticipant::new(GaConfig::default());
        assert!(ga.contribution_selection().is_placeholder());
        let ga = ga.with_contribution_selection(ContributionSelection::TopologyBest);
        assert_eq!(ga.contribution_selection(), ContributionSelection::TopologyBest);
    }

    #[test]
    fn test_infinite_mutation_scale_rejected() {
        let problem = sphere(2);
        let config = GaConfig::default()
            .with_mutation_scale(f64::INFINITY)
            .with_mutation_rate(1.0);
        let mut ga = GaParticipant::new(config);
        assert!(matches!(
            ga.initialise(&problem),
            Err(CcError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_extreme_bounds_sample_from_fallback() {
        let problem = FnObjective::new(3, |x: &[f64]| x.iter().map(|v| v * v).sum())
            .with_uniform_bounds(Bounds::new(-f64::MAX, f64::MAX).unwrap());
        let config = GaConfig::default()
            .with_mutation_rate(1.0)
            .with_mutation_scale(1.0)
            .with_seed(11);
        let mut ga = GaParticipant::new(config);
        ga.initialise(&problem).unwrap();
        for ind in ga.population() {
            assert!(ind.position.values().iter().all(|v| v.abs() <= 10.0));
        }
        for _ in 0..20 {
            ga.iterate(&problem).unwrap();
        }
        assert!(ga
            .population()
            .iter()
            .all(|ind| ind.position.values().iter().all(|v| v.is_finite())));
    }

    #[test]
    fn test_topology_covers_population() {
        let problem = sphere(2);
        let mut ga = GaParticipant::new(GaConfig::default().with_seed(5));
        ga.initialise(&problem).unwrap();
        assert_eq!(ga.topology().len(), 20);
    }
}
