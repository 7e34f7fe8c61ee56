//! The cooperative coevolution orchestrator.
//!
//! # Protocol
//!
//! **Initialise** (once):
//! 1. Size the context for the full problem
//! 2. Distribute the dimensions and bind one adapter per participant
//! 3. Clear the context
//! 4. In participant order: initialise the participant, append its best
//!    position to the context (segments of a non-contiguous distribution
//!    are written at their own indices instead)
//! 5. Evaluate and cache the context fitness
//!
//! **Round** (every `iterate`), visiting participants in the same order:
//! 1. Push the current context into the participant's adapter
//! 2. Run one step of the participant
//! 3. Ask it for its contribution
//! 4. Merge the contribution with the configured [`ContextUpdate`]
//!
//! A participant visited later in a round sees what earlier ones committed
//! in that round.
//!
//! # References
//!
//! - Potter & De Jong (1994), "A Cooperative Coevolutionary Approach to
//!   Function Optimization"
//! - van den Bergh & Engelbrecht (2004), "A Cooperative Approach to
//!   Particle Swarm Optimization"

use super::adapter::ProblemAdapter;
use super::config::CcConfig;
use super::context::ContextEntity;
use super::contribution::ContributionSelection;
use super::distribution::{Allocation, PerfectSplit, ProblemDistribution};
use super::types::{contribution_of, Candidate, Participant, Solution};
use super::update::ContextUpdate;
use crate::error::{CcError, Result};
use crate::problem::{Objective, Sense};
use crate::vector::Vector;

/// Lifecycle of an orchestrator. Termination is decided by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CcState {
    Uninitialised,
    Initialised,
    Iterating,
    /// A participant failed during initialisation. Participants are
    /// initialised at most once, so the orchestrator cannot be retried.
    Failed,
}

/// Outcome of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    /// 1-based round number.
    pub round: usize,
    /// Contributions committed to the context this round.
    pub accepted: usize,
    /// Contributions discarded this round.
    pub rejected: usize,
}

/// Owns the shared context, the participants and the strategies, and
/// drives the round-robin protocol.
///
/// # Examples
///
/// ```
/// use u_coevolve::cc::{CcConfig, CooperativeCoevolution, Participant};
/// use u_coevolve::ga::{GaConfig, GaParticipant};
/// use u_coevolve::FnObjective;
///
/// let sphere = FnObjective::new(6, |x: &[f64]| x.iter().map(|v| v * v).sum());
///
/// let mut cc = CooperativeCoevolution::new(CcConfig::default()).unwrap();
/// for seed in 0..3 {
///     let config = GaConfig::default().with_population_size(10).with_seed(seed);
///     cc.add_participant(GaParticipant::new(config)).unwrap();
/// }
///
/// cc.initialise(&sphere).unwrap();
/// let start = cc.best_solution().fitness;
/// for _ in 0..20 {
///     cc.iterate(&sphere).unwrap();
/// }
/// assert!(cc.best_solution().fitness <= start);
/// assert_eq!(cc.context().len(), 6);
/// ```
pub struct CooperativeCoevolution {
    config: CcConfig,
    distribution: Box<dyn ProblemDistribution>,
    participants: Vec<Box<dyn Participant>>,
    allocations: Vec<Allocation>,
    context: ContextEntity,
    sense: Sense,
    state: CcState,
    rounds: usize,
}

impl CooperativeCoevolution {
    /// Creates an orchestrator with the [`PerfectSplit`] distribution.
    pub fn new(config: CcConfig) -> Result<Self> {
        config.validate().map_err(CcError::InvalidConfig)?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: CcConfig) -> Self {
        Self {
            config,
            distribution: Box::new(PerfectSplit),
            participants: Vec::new(),
            allocations: Vec::new(),
            context: ContextEntity::new(),
            sense: Sense::default(),
            state: CcState::Uninitialised,
            rounds: 0,
        }
    }

    /// Replaces the problem distribution strategy.
    pub fn with_distribution(mut self, distribution: Box<dyn ProblemDistribution>) -> Self {
        self.distribution = distribution;
        self
    }

    /// Sets the context update rule.
    pub fn set_context_update(&mut self, update: ContextUpdate) {
        self.config.context_update = update;
    }

    /// Attaches a participant at the end of the visiting order.
    ///
    /// A participant still carrying [`ContributionSelection::Placeholder`]
    /// gets this orchestrator's default strategy installed here.
    ///
    /// # Errors
    ///
    /// [`CcError::AlreadyInitialised`] once the coevolution has started;
    /// [`CcError::PlaceholderContribution`] if there is no usable default
    /// to substitute.
    pub fn add_participant<P: Participant + 'static>(&mut self, participant: P) -> Result<()> {
        self.add_boxed_participant(Box::new(participant))
    }

    /// Boxed form of [`add_participant`](Self::add_participant).
    pub fn add_boxed_participant(&mut self, mut participant: Box<dyn Participant>) -> Result<()> {
        if self.state != CcState::Uninitialised {
            return Err(CcError::AlreadyInitialised);
        }
        if participant.contribution_selection().is_placeholder() {
            let default = self.config.contribution_selection;
            if default.is_placeholder() {
                return Err(CcError::PlaceholderContribution {
                    index: self.participants.len(),
                });
            }
            participant.set_contribution_selection(default);
        }
        self.participants.push(participant);
        Ok(())
    }

    pub fn config(&self) -> &CcConfig {
        &self.config
    }

    pub fn context(&self) -> &ContextEntity {
        &self.context
    }

    /// Allocations in participant order; empty before initialisation.
    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn participants(&self) -> &[Box<dyn Participant>] {
        &self.participants
    }

    pub fn state(&self) -> CcState {
        self.state
    }

    /// Completed rounds.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Runs one round and reports how many contributions were committed.
    ///
    /// Errors raised by a participant's own step are returned unchanged.
    pub fn iterate_round(&mut self, problem: &dyn Objective) -> Result<RoundReport> {
        if matches!(self.state, CcState::Uninitialised | CcState::Failed) {
            return Err(CcError::NotInitialised);
        }

        let update = self.config.context_update;
        let mut adapters: Vec<ProblemAdapter<'_>> = self
            .allocations
            .iter()
            .map(|allocation| ProblemAdapter::new(problem, allocation.clone(), Vector::new()))
            .collect();

        let mut report = RoundReport {
            round: self.rounds + 1,
            accepted: 0,
            rejected: 0,
        };

        for (index, adapter) in adapters.iter_mut().enumerate() {
            adapter.update_context(self.context.candidate());

            let participant = &mut self.participants[index];
            participant.iterate(&*adapter)?;

            let contribution = contribution_of(&**participant, self.sense)?;
            let outcome = update.update_context(
                &mut self.context,
                &contribution,
                adapter.allocation(),
                problem,
            )?;

            if outcome.is_accepted() {
                report.accepted += 1;
            } else {
                report.rejected += 1;
            }
        }

        self.rounds += 1;
        self.state = CcState::Iterating;
        log::debug!(
            "round {}: {} accepted, {} rejected, context fitness {:?}",
            report.round,
            report.accepted,
            report.rejected,
            self.context.fitness()
        );
        Ok(report)
    }
}

impl CooperativeCoevolution {
    /// Initialises every participant against its adapter and builds the
    /// initial context. Nothing on `self` but the participants changes.
    fn assemble(
        &mut self,
        problem: &dyn Objective,
        adapters: Vec<ProblemAdapter<'_>>,
    ) -> Result<(ContextEntity, Vec<Allocation>)> {
        let mut context = ContextEntity::new();
        let mut segments = Vec::with_capacity(adapters.len());
        for (participant, adapter) in self.participants.iter_mut().zip(&adapters) {
            participant.initialise(adapter)?;
            let best = participant.best_solution();
            if best.position.len() != adapter.allocation().len() {
                return Err(CcError::DimensionMismatch {
                    expected: adapter.allocation().len(),
                    actual: best.position.len(),
                });
            }
            context.append(&best.position);
            segments.push(best.position);
        }

        if context.len() != problem.dimension() {
            return Err(CcError::DimensionMismatch {
                expected: problem.dimension(),
                actual: context.len(),
            });
        }

        let allocations: Vec<Allocation> = adapters
            .into_iter()
            .map(ProblemAdapter::into_allocation)
            .collect();

        // Concatenation only lines up with contiguous, in-order allocations.
        if !is_concatenation_order(&allocations) {
            context.initialise(problem);
            for (allocation, segment) in allocations.iter().zip(&segments) {
                context.write_segment(allocation, segment)?;
            }
        }
        Ok((context, allocations))
    }
}

/// True when walking the allocations in order visits `0, 1, 2, ...`.
fn is_concatenation_order(allocations: &[Allocation]) -> bool {
    allocations
        .iter()
        .flat_map(|a| a.indices().iter().copied())
        .enumerate()
        .all(|(position, index)| position == index)
}

impl Default for CooperativeCoevolution {
    fn default() -> Self {
        Self::with_valid_config(CcConfig::default())
    }
}

impl Participant for CooperativeCoevolution {
    /// # Errors
    ///
    /// Fails if already initialised, if no participants are attached, if any
    /// participant still uses the placeholder contribution strategy, if the
    /// distribution is impossible, or if a participant's best position does
    /// not match its allocation.
    ///
    /// Errors found before any participant is initialised leave the
    /// orchestrator untouched and can be retried. A participant failure, or
    /// a wrong-sized best position, moves it to [`CcState::Failed`] and
    /// leaves the context empty; further calls return
    /// [`CcError::AlreadyInitialised`].
    fn initialise(&mut self, problem: &dyn Objective) -> Result<()> {
        if self.state != CcState::Uninitialised {
            return Err(CcError::AlreadyInitialised);
        }
        if self.participants.is_empty() {
            return Err(CcError::NoParticipants);
        }
        if let Some(index) = self
            .participants
            .iter()
            .position(|p| p.contribution_selection().is_placeholder())
        {
            return Err(CcError::PlaceholderContribution { index });
        }

        let adapters = {
            let mut scratch = ContextEntity::new();
            scratch.initialise(problem);
            self.distribution.perform_distribution(
                self.participants.len(),
                problem,
                scratch.candidate(),
            )?
        };

        // From here on participants are touched; any failure is terminal.
        let (context, allocations) = match self.assemble(problem, adapters) {
            Ok(assembled) => assembled,
            Err(e) => {
                self.state = CcState::Failed;
                log::debug!("initialisation failed: {e}");
                return Err(e);
            }
        };

        self.sense = problem.sense();
        self.context = context;
        self.allocations = allocations;
        let fitness = self.context.calculate_fitness(problem);
        self.state = CcState::Initialised;

        log::debug!(
            "initialised {} participants over {} dimensions, allocation sizes {:?}, context fitness {fitness}",
            self.participants.len(),
            problem.dimension(),
            self.allocations.iter().map(Allocation::len).collect::<Vec<_>>()
        );
        Ok(())
    }

    fn iterate(&mut self, problem: &dyn Objective) -> Result<()> {
        self.iterate_round(problem).map(|_| ())
    }

    /// Copy of the context and its cached fitness. Never re-evaluates.
    fn best_solution(&self) -> Solution {
        Solution {
            position: self.context.candidate().clone(),
            fitness: self.context.fitness().unwrap_or(f64::NAN),
        }
    }

    fn topology(&self) -> Vec<Candidate<'_>> {
        vec![Candidate {
            position: self.context.candidate(),
            fitness: self.context.fitness().unwrap_or(f64::NAN),
        }]
    }

    fn contribution_selection(&self) -> ContributionSelection {
        self.config.contribution_selection
    }

    fn set_contribution_selection(&mut self, strategy: ContributionSelection) {
        self.config.contribution_selection = strategy;
    }
}
