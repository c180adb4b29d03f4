//! Gate application engine: transforms a sparse state, one layer at a time.
//!
//! Each layer builds a brand-new store from the previous, immutable one.
//! Live states are partitioned into contiguous chunks of the canonically
//! ordered snapshot; chunks accumulate into private buffers in parallel, and
//! the buffers are merged by complex summation in fixed chunk order — the
//! only synchronization point per layer. Within a run this makes results
//! bit-reproducible for a fixed worker count; different worker counts may
//! differ in the last floating-point bits because addition order changes.

use num_complex::Complex64;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use feynsum_ir::{Gate, Layer, is_zero};

use crate::error::{SimError, SimResult};
use crate::state::SparseState;

/// Result of applying one layer.
#[derive(Debug)]
pub struct ApplyResult {
    /// The next state snapshot.
    pub state: SparseState,
    /// Number of individual gate applications performed.
    pub num_gate_apps: usize,
}

/// Apply one layer of qubit-disjoint gates to `prev`, producing the next
/// store.
///
/// `max_live` is the configured live-state cap: if the layer's worst-case
/// fan-out projects past it, the call fails with
/// [`SimError::ResourceExhausted`] before allocating. Amplitudes that fall
/// below the zero threshold are clamped to zero and dropped; there are no
/// other failure modes in this path.
pub fn apply_layer(
    prev: &SparseState,
    layer: &Layer,
    max_live: Option<usize>,
) -> SimResult<ApplyResult> {
    let snapshot = prev.nonzeros_sorted();

    if let Some(limit) = max_live {
        // Worst-case projection: every input state fans out maximally.
        let projected = snapshot.len().saturating_mul(layer.max_fanout());
        if projected > limit {
            return Err(SimError::ResourceExhausted {
                needed: projected,
                limit,
            });
        }
    }

    if snapshot.is_empty() {
        return Ok(ApplyResult {
            state: SparseState::from_map(prev.num_qubits(), FxHashMap::default()),
            num_gate_apps: 0,
        });
    }

    // Contiguous chunks over the sorted snapshot; a handful per worker keeps
    // the merge cheap while still balancing load.
    let num_chunks = rayon::current_num_threads() * 4;
    let chunk_size = snapshot.len().div_ceil(num_chunks.max(1)).max(1);

    let partials: Vec<(FxHashMap<u64, Complex64>, usize)> = snapshot
        .par_chunks(chunk_size)
        .map(|chunk| {
            let mut acc = FxHashMap::with_capacity_and_hasher(
                chunk.len().saturating_mul(2),
                Default::default(),
            );
            let mut apps = 0usize;
            for &(key, amp) in chunk {
                push_gates(layer.gates(), key, amp, &mut acc, &mut apps);
            }
            (acc, apps)
        })
        .collect();

    // Merge partial buffers in chunk index order (canonical merge order).
    let mut merged: FxHashMap<u64, Complex64> = FxHashMap::default();
    let mut num_gate_apps = 0usize;
    for (partial, apps) in partials {
        num_gate_apps += apps;
        if merged.is_empty() {
            merged = partial;
        } else {
            for (key, amp) in partial {
                *merged.entry(key).or_default() += amp;
            }
        }
    }
    merged.retain(|_, amp| !is_zero(*amp));

    Ok(ApplyResult {
        state: SparseState::from_map(prev.num_qubits(), merged),
        num_gate_apps,
    })
}

/// Push one weighted basis state through the layer's gate list.
///
/// Gates in a layer touch disjoint qubits, so sequential push application
/// composes their local updates as independent tensor factors: the fan-out
/// of one input state is the product of each gate's local fan-out.
fn push_gates(
    gates: &[Gate],
    key: u64,
    amp: Complex64,
    acc: &mut FxHashMap<u64, Complex64>,
    apps: &mut usize,
) {
    if is_zero(amp) {
        return; // underflow clamps to zero, not an error
    }
    match gates.split_first() {
        None => {
            *acc.entry(key).or_default() += amp;
        }
        Some((gate, rest)) => {
            *apps += 1;
            gate.push_apply(key, amp, |new_key, contribution| {
                push_gates(rest, new_key, contribution, acc, apps);
            });
        }
    }
}
