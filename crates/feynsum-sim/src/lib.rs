//! `feynsum-sim` — sparse Feynman-path amplitude simulation.
//!
//! Simulates a quantum circuit by maintaining a sparse mapping from basis
//! states to complex amplitudes, applying gates layer by layer with
//! fork-join parallelism, and optionally truncating low-magnitude states to
//! bound memory. Truncation is a *disclosed* approximation: its parameters
//! travel with the result and the discarded probability mass is reported.
//!
//! # Quick start
//!
//! ```rust
//! use feynsum_sim::{SimConfig, Simulator};
//! use feynsum_ir::Circuit;
//!
//! // Bell state: h q[0]; cx q[0],q[1];
//! let circuit = Circuit::bell().unwrap();
//! let outcome = Simulator::new(&circuit, SimConfig::default())
//!     .unwrap()
//!     .run()
//!     .unwrap();
//!
//! // Only |00⟩ and |11⟩ are live, each at magnitude 1/√2.
//! assert_eq!(outcome.state.len(), 2);
//! assert!((outcome.state.amplitude(0b00).norm() - 0.5f64.sqrt()).abs() < 1e-12);
//! assert!((outcome.state.amplitude(0b11).norm() - 0.5f64.sqrt()).abs() < 1e-12);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod prune;
pub mod sampler;
pub mod simulator;
pub mod state;

pub use config::{SimConfig, TruncationPolicy};
pub use engine::{ApplyResult, apply_layer};
pub use error::{SimError, SimResult};
pub use prune::{PruneResult, truncate};
pub use sampler::{Sampler, key_to_bitstring};
pub use simulator::{RunOutcome, RunStats, Simulator};
pub use state::SparseState;
