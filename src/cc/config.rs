//! Cooperative coevolution configuration.

use super::contribution::ContributionSelection;
use super::update::ContextUpdate;

/// Configuration for [`CooperativeCoevolution`](super::CooperativeCoevolution)
/// and [`CcRunner`](super::CcRunner).
///
/// # Examples
///
/// ```
/// use u_coevolve::cc::{CcConfig, ContextUpdate};
///
/// let config = CcConfig::default()
///     .with_context_update(ContextUpdate::Selective)
///     .with_max_iterations(200)
///     .with_stagnation_limit(25);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CcConfig {
    /// Rule applied when merging each contribution into the context.
    pub context_update: ContextUpdate,

    /// Strategy installed on participants attached with the placeholder,
    /// and used for the orchestrator's own contribution when nested.
    pub contribution_selection: ContributionSelection,

    /// Maximum rounds for [`CcRunner`](super::CcRunner).
    pub max_iterations: usize,

    /// Rounds without improvement of the context fitness before the runner
    /// stops. 0 disables stagnation-based termination.
    pub stagnation_limit: usize,
}

impl Default for CcConfig {
    fn default() -> Self {
        Self {
            context_update: ContextUpdate::Selective,
            contribution_selection: ContributionSelection::TopologyBest,
            max_iterations: 1000,
            stagnation_limit: 0,
        }
    }
}

impl CcConfig {
    pub fn with_context_update(mut self, update: ContextUpdate) -> Self {
        self.context_update = update;
        self
    }

    pub fn with_contribution_selection(mut self, selection: ContributionSelection) -> Self {
        self.contribution_selection = selection;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.contribution_selection.is_placeholder() {
            return Err("default contribution selection cannot be the placeholder".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        Ok(())
    }
}
