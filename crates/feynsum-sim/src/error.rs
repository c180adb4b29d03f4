//! Error types for the simulation crate.

use thiserror::Error;

/// Errors produced by the sparse simulator.
///
/// Everything except [`SimError::ResourceExhausted`] is rejected before the
/// run starts; resource exhaustion is the only mid-run fatal condition.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Truncation budget of zero keeps no states at all.
    #[error("truncation budget must be at least 1")]
    ZeroBudget,

    /// Pruning cadence of zero layers is meaningless.
    #[error("pruning cadence must be at least 1 layer")]
    ZeroCadence,

    /// Basis-state keys are 64-bit, so circuits are capped at 64 qubits.
    #[error("circuit has {0} qubits but basis keys support at most 64")]
    TooManyQubits(usize),

    /// The next layer would exceed the configured live-state cap.
    #[error("projected {needed} live states exceeds the configured limit of {limit}")]
    ResourceExhausted {
        /// Upper bound on live states the next layer could produce.
        needed: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// Sampling from a state with no live basis states.
    #[error("cannot sample from an empty state")]
    EmptyState,

    /// Worker pool construction failed.
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),

    /// Circuit IR error.
    #[error("circuit IR error: {0}")]
    Ir(#[from] feynsum_ir::IrError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
