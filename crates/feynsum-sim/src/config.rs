//! Run configuration.
//!
//! Truncation is a disclosed approximation: every parameter that affects the
//! result (budget, renormalization, cadence, seed, worker count) lives here,
//! is serializable, and is recorded alongside the run outcome so results are
//! reproducible.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Truncation policy: bound the live-state count after each cadence-th layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruncationPolicy {
    /// Maximum number of live basis states kept after pruning.
    pub budget: usize,
    /// Rescale survivors so their squared magnitudes sum to the
    /// pre-truncation total.
    pub renormalize: bool,
    /// Prune after every `cadence` layers.
    pub cadence: usize,
}

impl TruncationPolicy {
    /// Create a policy with the given budget, pruning every layer without
    /// renormalization.
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            renormalize: false,
            cadence: 1,
        }
    }

    /// Enable or disable renormalization after pruning.
    #[must_use]
    pub fn with_renormalize(mut self, renormalize: bool) -> Self {
        self.renormalize = renormalize;
        self
    }

    /// Prune only after every `cadence` layers.
    #[must_use]
    pub fn with_cadence(mut self, cadence: usize) -> Self {
        self.cadence = cadence;
        self
    }

    fn validate(&self) -> SimResult<()> {
        if self.budget == 0 {
            return Err(SimError::ZeroBudget);
        }
        if self.cadence == 0 {
            return Err(SimError::ZeroCadence);
        }
        Ok(())
    }
}

/// Configuration for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Optional truncation policy; `None` simulates exactly (memory
    /// permitting).
    pub truncation: Option<TruncationPolicy>,
    /// Seed for the sampling RNG.
    pub seed: u64,
    /// Worker threads for layer application; `None` uses the rayon default.
    pub num_workers: Option<usize>,
    /// Hard cap on live states; exceeding it mid-run is a fatal
    /// [`SimError::ResourceExhausted`].
    pub max_live_states: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            truncation: None,
            seed: 0,
            num_workers: None,
            max_live_states: None,
        }
    }
}

impl SimConfig {
    /// Create the default (exact, single-seeded) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the truncation policy.
    #[must_use]
    pub fn with_truncation(mut self, policy: TruncationPolicy) -> Self {
        self.truncation = Some(policy);
        self
    }

    /// Set the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the worker thread count.
    #[must_use]
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = Some(num_workers);
        self
    }

    /// Set the live-state memory cap.
    #[must_use]
    pub fn with_max_live_states(mut self, max: usize) -> Self {
        self.max_live_states = Some(max);
        self
    }

    /// Validate the configuration before a run starts.
    pub fn validate(&self) -> SimResult<()> {
        if let Some(policy) = &self.truncation {
            policy.validate()?;
        }
        Ok(())
    }
}
