//! Sparse state store: basis-state keys mapped to complex amplitudes.

use num_complex::Complex64;
use rustc_hash::FxHashMap;

use feynsum_ir::is_zero;

/// A sparse superposition: mapping from n-bit basis-state keys to complex
/// amplitudes.
///
/// Published snapshots are immutable; the engine replaces the store at each
/// layer boundary instead of mutating it in place. An absent key means
/// amplitude zero — which, after truncation, may be an artifact of pruning
/// rather than a true zero.
#[derive(Debug, Clone)]
pub struct SparseState {
    amplitudes: FxHashMap<u64, Complex64>,
    num_qubits: usize,
}

impl SparseState {
    /// The all-zero initial state |0…0⟩ with amplitude 1.
    pub fn zero(num_qubits: usize) -> Self {
        let mut amplitudes = FxHashMap::default();
        amplitudes.insert(0u64, Complex64::new(1.0, 0.0));
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Build a state from weighted contributions with accumulation
    /// semantics: amplitudes contributed to the same key are complex-summed
    /// (the superposition rule), and negligible totals are dropped.
    pub fn from_contributions(
        num_qubits: usize,
        contributions: impl IntoIterator<Item = (u64, Complex64)>,
    ) -> Self {
        let mut amplitudes: FxHashMap<u64, Complex64> = FxHashMap::default();
        for (key, amp) in contributions {
            *amplitudes.entry(key).or_default() += amp;
        }
        amplitudes.retain(|_, amp| !is_zero(*amp));
        Self {
            amplitudes,
            num_qubits,
        }
    }

    pub(crate) fn from_map(num_qubits: usize, amplitudes: FxHashMap<u64, Complex64>) -> Self {
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Number of qubits the keys span.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Amplitude of a basis state; absent keys are zero.
    ///
    /// If the run truncated, zero may mean the state was pruned away rather
    /// than that its true amplitude is zero.
    #[inline]
    pub fn amplitude(&self, key: u64) -> Complex64 {
        self.amplitudes
            .get(&key)
            .copied()
            .unwrap_or(Complex64::new(0.0, 0.0))
    }

    /// Enumerate all live (key, amplitude) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, Complex64)> + '_ {
        self.amplitudes.iter().map(|(&k, &a)| (k, a))
    }

    /// Number of live basis states.
    #[inline]
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Whether no basis state is live.
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Total probability mass: Σ |amplitude|².
    ///
    /// Approximately 1 for exact runs; less after truncation without
    /// renormalization.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.values().map(Complex64::norm_sqr).sum()
    }

    /// Live pairs sorted by key.
    ///
    /// This is the canonical enumeration order used for chunked parallel
    /// application and sampling, making runs bit-reproducible for a fixed
    /// worker count.
    pub fn nonzeros_sorted(&self) -> Vec<(u64, Complex64)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_unstable_by_key(|&(k, _)| k);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_state() {
        let state = SparseState::zero(4);
        assert_eq!(state.len(), 1);
        assert!((state.amplitude(0) - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert!((state.norm_sqr() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_absent_key_is_zero() {
        let state = SparseState::zero(4);
        assert_eq!(state.amplitude(7), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_contributions_accumulate() {
        // Two paths landing on the same key interfere by complex addition.
        let state = SparseState::from_contributions(
            2,
            vec![
                (0b01, Complex64::new(0.5, 0.0)),
                (0b01, Complex64::new(0.25, 0.25)),
                (0b10, Complex64::new(0.5, 0.0)),
            ],
        );
        assert_eq!(state.len(), 2);
        assert!((state.amplitude(0b01) - Complex64::new(0.75, 0.25)).norm() < 1e-12);
    }

    #[test]
    fn test_destructive_interference_drops_key() {
        let state = SparseState::from_contributions(
            1,
            vec![
                (1, Complex64::new(0.5, 0.0)),
                (1, Complex64::new(-0.5, 0.0)),
            ],
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_sorted_enumeration() {
        let state = SparseState::from_contributions(
            3,
            vec![
                (5, Complex64::new(0.1, 0.0)),
                (1, Complex64::new(0.2, 0.0)),
                (3, Complex64::new(0.3, 0.0)),
            ],
        );
        let keys: Vec<u64> = state.nonzeros_sorted().iter().map(|&(k, _)| k).collect();
        assert_eq!(keys, vec![1, 3, 5]);
    }
}
