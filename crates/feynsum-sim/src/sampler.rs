//! Amplitude extraction and weighted sampling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

use crate::error::{SimError, SimResult};
use crate::state::SparseState;

/// Weighted sampler over a final state snapshot.
///
/// Samples basis states proportionally to squared amplitude magnitude, from
/// the *surviving* mass only: if the run truncated, the distribution is an
/// approximation of the true one, renormalized over the kept states.
/// Sampling is reproducible given the same state and seed.
pub struct Sampler {
    keys: Vec<u64>,
    /// Cumulative squared magnitudes over `keys`, canonical (key-sorted)
    /// order.
    cumulative: Vec<f64>,
    rng: StdRng,
}

impl Sampler {
    /// Build a sampler with a seeded RNG.
    ///
    /// Fails with [`SimError::EmptyState`] if no basis state is live.
    pub fn new(state: &SparseState, seed: u64) -> SimResult<Self> {
        Self::from_rng(state, StdRng::seed_from_u64(seed))
    }

    /// Build a sampler with a caller-supplied RNG.
    pub fn from_rng(state: &SparseState, rng: StdRng) -> SimResult<Self> {
        if state.is_empty() {
            return Err(SimError::EmptyState);
        }
        let pairs = state.nonzeros_sorted();
        let mut keys = Vec::with_capacity(pairs.len());
        let mut cumulative = Vec::with_capacity(pairs.len());
        let mut running = 0.0f64;
        for (key, amp) in pairs {
            running += amp.norm_sqr();
            keys.push(key);
            cumulative.push(running);
        }
        Ok(Self {
            keys,
            cumulative,
            rng,
        })
    }

    /// Total probability mass the sampler draws from.
    pub fn total_mass(&self) -> f64 {
        *self.cumulative.last().unwrap_or(&0.0)
    }

    /// Draw one basis state.
    pub fn sample(&mut self) -> u64 {
        let r = self.rng.gen_range(0.0..self.total_mass());
        let idx = self.cumulative.partition_point(|&c| c <= r);
        self.keys[idx.min(self.keys.len() - 1)]
    }

    /// Draw `shots` basis states, returning key → multiplicity.
    pub fn sample_counts(&mut self, shots: usize) -> FxHashMap<u64, usize> {
        let mut counts = FxHashMap::default();
        for _ in 0..shots {
            *counts.entry(self.sample()).or_insert(0) += 1;
        }
        counts
    }
}

/// Format a basis key as a bitstring, qubit 0 leftmost.
pub fn key_to_bitstring(key: u64, num_qubits: usize) -> String {
    (0..num_qubits)
        .map(|i| if (key >> i) & 1 == 1 { '1' } else { '0' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_empty_state_rejected() {
        let state = SparseState::from_contributions(1, vec![]);
        assert!(matches!(
            Sampler::new(&state, 0),
            Err(SimError::EmptyState)
        ));
    }

    #[test]
    fn test_deterministic_single_outcome() {
        // |1⟩ always samples to 1.
        let state =
            SparseState::from_contributions(1, vec![(1, Complex64::new(1.0, 0.0))]);
        let mut sampler = Sampler::new(&state, 7).unwrap();
        for _ in 0..100 {
            assert_eq!(sampler.sample(), 1);
        }
    }

    #[test]
    fn test_same_seed_same_samples() {
        let state = SparseState::from_contributions(
            2,
            vec![
                (0, Complex64::new(0.5, 0.0)),
                (1, Complex64::new(0.5, 0.0)),
                (2, Complex64::new(0.5, 0.0)),
                (3, Complex64::new(0.5, 0.0)),
            ],
        );
        let a: Vec<u64> = {
            let mut s = Sampler::new(&state, 99).unwrap();
            (0..50).map(|_| s.sample()).collect()
        };
        let b: Vec<u64> = {
            let mut s = Sampler::new(&state, 99).unwrap();
            (0..50).map(|_| s.sample()).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_counts_sum_to_shots() {
        let state = SparseState::from_contributions(
            1,
            vec![
                (0, Complex64::new(0.8, 0.0)),
                (1, Complex64::new(0.6, 0.0)),
            ],
        );
        let mut sampler = Sampler::new(&state, 3).unwrap();
        let counts = sampler.sample_counts(1000);
        assert_eq!(counts.values().sum::<usize>(), 1000);
    }

    #[test]
    fn test_bitstring_qubit_order() {
        assert_eq!(key_to_bitstring(0b01, 2), "10");
        assert_eq!(key_to_bitstring(0b10, 2), "01");
        assert_eq!(key_to_bitstring(0b101, 4), "1010");
    }
}
