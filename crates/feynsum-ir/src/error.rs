//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur while constructing gates or circuits.
///
/// All of these are construction-time errors: once a [`crate::Gate`] or
/// [`crate::Circuit`] exists, it is valid and immutable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A gate references a qubit outside the circuit width.
    #[error("gate '{gate_name}' references qubit {qubit} but circuit only has {num_qubits} qubits")]
    QubitOutOfRange {
        /// Name of the offending gate.
        gate_name: &'static str,
        /// The out-of-range qubit.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        num_qubits: usize,
    },

    /// The same qubit appears twice in a multi-qubit gate.
    #[error("duplicate qubit {qubit} in gate '{gate_name}'")]
    DuplicateQubit {
        /// Name of the offending gate.
        gate_name: &'static str,
        /// The duplicated qubit.
        qubit: QubitId,
    },

    /// Gate requires a different number of qubits.
    #[error("gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: &'static str,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: usize,
    },

    /// A gate parameter is not a finite number.
    #[error("gate '{gate_name}' has non-finite parameter {value}")]
    NonFiniteParameter {
        /// Name of the gate.
        gate_name: &'static str,
        /// The offending parameter value.
        value: f64,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
