//! Top-level simulation driver.

use tracing::debug;

use feynsum_ir::{Circuit, Layer, layers};

use crate::config::SimConfig;
use crate::engine::apply_layer;
use crate::error::{SimError, SimResult};
use crate::prune::truncate;
use crate::sampler::Sampler;
use crate::state::SparseState;

/// Basis-state keys are stored in a `u64`.
const MAX_QUBITS: usize = 64;

/// Aggregate statistics for one run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Number of layers applied.
    pub num_layers: usize,
    /// Total individual gate applications.
    pub num_gate_apps: usize,
    /// Probability mass discarded by truncation over the whole run.
    ///
    /// Zero means the run was exact; anything else quantifies the disclosed
    /// approximation.
    pub discarded_mass: f64,
}

/// The final state of a run, together with the configuration that produced
/// it and the run statistics.
///
/// The configuration is carried here deliberately: truncated results are
/// only meaningful alongside the budget, cadence and renormalization flag
/// that produced them.
#[derive(Debug)]
pub struct RunOutcome {
    /// Final (possibly truncated) state snapshot, read-only.
    pub state: SparseState,
    /// The configuration the run used.
    pub config: SimConfig,
    /// Run statistics.
    pub stats: RunStats,
}

impl RunOutcome {
    /// Build a seeded sampler over the final state, using the run's
    /// configured seed.
    pub fn sampler(&self) -> SimResult<Sampler> {
        Sampler::new(&self.state, self.config.seed)
    }
}

/// Sparse Feynman-path simulator for one circuit.
///
/// Owns the layered circuit and configuration; [`run`](Self::run) is pure
/// with respect to the simulator and can be repeated, producing identical
/// results for identical inputs, seed and worker count.
pub struct Simulator {
    layers: Vec<Layer>,
    num_qubits: usize,
    config: SimConfig,
}

impl Simulator {
    /// Create a simulator, validating the configuration and circuit width.
    pub fn new(circuit: &Circuit, config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        if circuit.num_qubits() > MAX_QUBITS {
            return Err(SimError::TooManyQubits(circuit.num_qubits()));
        }
        Ok(Self {
            layers: layers(circuit),
            num_qubits: circuit.num_qubits(),
            config,
        })
    }

    /// Run the simulation from |0…0⟩ through every layer.
    pub fn run(&self) -> SimResult<RunOutcome> {
        match self.config.num_workers {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::WorkerPool(e.to_string()))?;
                pool.install(|| self.run_inner())
            }
            None => self.run_inner(),
        }
    }

    fn run_inner(&self) -> SimResult<RunOutcome> {
        let mut state = SparseState::zero(self.num_qubits);
        let mut stats = RunStats::default();

        for (i, layer) in self.layers.iter().enumerate() {
            let applied = apply_layer(&state, layer, self.config.max_live_states)?;
            state = applied.state;
            stats.num_gate_apps += applied.num_gate_apps;
            stats.num_layers += 1;

            if let Some(policy) = &self.config.truncation {
                if (i + 1) % policy.cadence == 0 {
                    let pruned = truncate(state, policy);
                    state = pruned.state;
                    stats.discarded_mass += pruned.discarded_mass;
                }
            }

            debug!(
                layer = i,
                gates = layer.len(),
                live = state.len(),
                mass = state.norm_sqr(),
                "applied layer"
            );
        }

        Ok(RunOutcome {
            state,
            config: self.config.clone(),
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TruncationPolicy;
    use feynsum_ir::QubitId;

    #[test]
    fn test_invalid_config_rejected_before_run() {
        let circuit = Circuit::bell().unwrap();
        let config = SimConfig::new().with_truncation(TruncationPolicy::new(0));
        assert!(matches!(
            Simulator::new(&circuit, config),
            Err(SimError::ZeroBudget)
        ));
    }

    #[test]
    fn test_too_many_qubits_rejected() {
        let circuit = Circuit::new(65);
        assert!(matches!(
            Simulator::new(&circuit, SimConfig::default()),
            Err(SimError::TooManyQubits(65))
        ));
    }

    #[test]
    fn test_empty_circuit_leaves_zero_state() {
        let circuit = Circuit::new(3);
        let outcome = Simulator::new(&circuit, SimConfig::default())
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(outcome.state.len(), 1);
        assert!((outcome.state.amplitude(0).re - 1.0).abs() < 1e-12);
        assert_eq!(outcome.stats.num_layers, 0);
    }

    #[test]
    fn test_stats_track_layers_and_apps() {
        let mut circuit = Circuit::new(2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();
        let outcome = Simulator::new(&circuit, SimConfig::default())
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(outcome.stats.num_layers, 2);
        assert!(outcome.stats.num_gate_apps >= 2);
        assert_eq!(outcome.stats.discarded_mass, 0.0);
    }
}
