//! Truncation: discard low-magnitude basis states to bound memory.

use tracing::debug;

use crate::config::TruncationPolicy;
use crate::state::SparseState;

/// Result of one pruning pass.
#[derive(Debug)]
pub struct PruneResult {
    /// The (possibly truncated) state.
    pub state: SparseState,
    /// Probability mass discarded by this pass, before any renormalization.
    pub discarded_mass: f64,
}

/// Keep the `budget` largest-magnitude basis states, ties broken by
/// ascending key.
///
/// A budget at or above the live count is an exact no-op. With
/// `renormalize` set, survivors are rescaled so their squared magnitudes sum
/// to the pre-truncation total.
pub fn truncate(state: SparseState, policy: &TruncationPolicy) -> PruneResult {
    if state.len() <= policy.budget {
        return PruneResult {
            state,
            discarded_mass: 0.0,
        };
    }

    let mut pairs: Vec<_> = state.iter().collect();
    // Largest magnitude first; equal magnitudes keep the numerically
    // smallest key for determinism.
    pairs.sort_unstable_by(|a, b| {
        b.1.norm_sqr()
            .total_cmp(&a.1.norm_sqr())
            .then(a.0.cmp(&b.0))
    });

    let total_mass: f64 = pairs.iter().map(|(_, a)| a.norm_sqr()).sum();
    pairs.truncate(policy.budget);
    let kept_mass: f64 = pairs.iter().map(|(_, a)| a.norm_sqr()).sum();
    let discarded_mass = total_mass - kept_mass;

    if policy.renormalize && kept_mass > 0.0 {
        let scale = (total_mass / kept_mass).sqrt();
        for (_, amp) in &mut pairs {
            *amp *= scale;
        }
    }

    debug!(
        budget = policy.budget,
        discarded_mass, "truncated state to budget"
    );

    PruneResult {
        state: SparseState::from_contributions(state.num_qubits(), pairs),
        discarded_mass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn state_of(pairs: Vec<(u64, f64)>) -> SparseState {
        SparseState::from_contributions(
            4,
            pairs
                .into_iter()
                .map(|(k, re)| (k, Complex64::new(re, 0.0))),
        )
    }

    #[test]
    fn test_budget_at_or_above_count_is_noop() {
        let state = state_of(vec![(0, 0.6), (1, 0.8)]);
        let before: Vec<_> = state.nonzeros_sorted();
        let result = truncate(state, &TruncationPolicy::new(2));
        assert_eq!(result.state.nonzeros_sorted(), before);
        assert_eq!(result.discarded_mass, 0.0);
    }

    #[test]
    fn test_keeps_largest_magnitudes() {
        let state = state_of(vec![(0, 0.1), (1, 0.7), (2, 0.69), (3, 0.15)]);
        let result = truncate(state, &TruncationPolicy::new(2));
        let keys: Vec<u64> = result.state.nonzeros_sorted().iter().map(|p| p.0).collect();
        assert_eq!(keys, vec![1, 2]);
        assert!(result.discarded_mass > 0.0);
    }

    #[test]
    fn test_ties_break_by_ascending_key() {
        let state = state_of(vec![(7, 0.5), (2, 0.5), (5, 0.5), (1, 0.1)]);
        let result = truncate(state, &TruncationPolicy::new(2));
        let keys: Vec<u64> = result.state.nonzeros_sorted().iter().map(|p| p.0).collect();
        assert_eq!(keys, vec![2, 5]);
    }

    #[test]
    fn test_renormalize_restores_mass() {
        let state = state_of(vec![(0, 0.6), (1, 0.6), (2, 0.4), (3, 0.3)]);
        let total = state.norm_sqr();
        let policy = TruncationPolicy::new(2).with_renormalize(true);
        let result = truncate(state, &policy);
        assert!((result.state.norm_sqr() - total).abs() < 1e-12);
    }

    #[test]
    fn test_without_renormalize_mass_shrinks() {
        let state = state_of(vec![(0, 0.6), (1, 0.6), (2, 0.4), (3, 0.3)]);
        let total = state.norm_sqr();
        let result = truncate(state, &TruncationPolicy::new(2));
        assert!(result.state.norm_sqr() < total);
        assert!(
            (total - result.state.norm_sqr() - result.discarded_mass).abs() < 1e-12
        );
    }
}
