//! feynsum circuit intermediate representation.
//!
//! This crate provides the gate model and circuit layering for the feynsum
//! sparse amplitude simulator. Circuits are validated at construction: once
//! a [`Gate`] or [`Circuit`] exists, every qubit index is in range and every
//! parameter is finite, so the simulation hot path has no recoverable errors.
//!
//! # Core components
//!
//! - [`QubitId`] — qubit addressing; qubit `i` is bit `i` of a basis key
//! - [`GateKind`], [`Gate`] — typed one- and two-qubit unitaries with
//!   precomputed local matrices
//! - [`Circuit`] — builder API mirroring OPENQASM gate names
//! - [`Layer`], [`layers`] — qubit-disjoint layers for parallel application
//!
//! # Example: Building a Bell circuit
//!
//! ```rust
//! use feynsum_ir::{Circuit, QubitId, layers};
//!
//! let mut circuit = Circuit::new(2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! // H and CX share qubit 0, so they end up in separate layers.
//! assert_eq!(layers(&circuit).len(), 2);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod layer;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateKind, LocalUnitary, ZERO_THRESHOLD, is_zero};
pub use layer::{Layer, layers};
pub use qubit::QubitId;
