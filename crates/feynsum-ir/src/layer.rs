//! Circuit layering: grouping gates into qubit-disjoint layers.
//!
//! A [`Layer`] is a maximal set of gates acting on pairwise-disjoint qubits,
//! so every gate in a layer can be applied independently to the same input
//! state. Layering is a greedy scan over the gate sequence that keeps a
//! "last occupied layer" index per qubit: each gate lands one past the
//! maximum of that value over its targets. This is the unique layering that
//! maximizes early parallelism while preserving every qubit's causal order.

use crate::circuit::Circuit;
use crate::gate::Gate;

/// An ordered group of gates with pairwise-disjoint qubit targets.
///
/// Derived once per circuit and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Layer {
    gates: Vec<Gate>,
}

impl Layer {
    /// The gates of this layer, in original circuit order.
    #[inline]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates in the layer.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the layer is empty (never the case for layers from
    /// [`layers`]).
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Upper bound on the fan-out of one input basis state under this layer:
    /// the product of each gate's fan-out bound.
    pub fn max_fanout(&self) -> usize {
        self.gates
            .iter()
            .map(Gate::max_fanout)
            .fold(1usize, usize::saturating_mul)
    }
}

/// Group a circuit's gates into layers.
///
/// A gate is never moved before an earlier gate that shares a qubit, nor
/// after a later one; gates without conflicts join the earliest still-open
/// layer.
pub fn layers(circuit: &Circuit) -> Vec<Layer> {
    // last_occupied[q] = 1 + index of the last layer touching qubit q.
    let mut last_occupied = vec![0usize; circuit.num_qubits()];
    let mut result: Vec<Layer> = vec![];

    for gate in circuit.gates() {
        let layer_idx = gate
            .qubits()
            .iter()
            .map(|q| last_occupied[q.0 as usize])
            .max()
            .unwrap_or(0);
        if layer_idx == result.len() {
            result.push(Layer { gates: vec![] });
        }
        result[layer_idx].gates.push(gate.clone());
        for q in gate.qubits() {
            last_occupied[q.0 as usize] = layer_idx + 1;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::QubitId;
    use std::collections::HashSet;

    fn layer_qubits(layer: &Layer) -> Vec<QubitId> {
        layer
            .gates()
            .iter()
            .flat_map(|g| g.qubits().iter().copied())
            .collect()
    }

    #[test]
    fn test_disjoint_gates_share_layer() {
        let mut circuit = Circuit::new(3);
        circuit
            .h(QubitId(0))
            .unwrap()
            .h(QubitId(1))
            .unwrap()
            .h(QubitId(2))
            .unwrap();
        let ls = layers(&circuit);
        assert_eq!(ls.len(), 1);
        assert_eq!(ls[0].len(), 3);
    }

    #[test]
    fn test_shared_qubit_opens_new_layer() {
        let mut circuit = Circuit::new(2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();
        let ls = layers(&circuit);
        assert_eq!(ls.len(), 2);
    }

    #[test]
    fn test_late_gate_joins_earliest_open_layer() {
        // cx(0,1) occupies layer 0; h(2) has no conflict and joins it even
        // though it appears later in the input.
        let mut circuit = Circuit::new(3);
        circuit
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .h(QubitId(0))
            .unwrap()
            .h(QubitId(2))
            .unwrap();
        let ls = layers(&circuit);
        assert_eq!(ls.len(), 2);
        assert_eq!(ls[0].len(), 2); // cx(0,1) and h(2)
        assert_eq!(ls[1].len(), 1); // h(0)
    }

    #[test]
    fn test_layers_are_qubit_disjoint() {
        let circuit = Circuit::qft(6).unwrap();
        for layer in layers(&circuit) {
            let qs = layer_qubits(&layer);
            let unique: HashSet<_> = qs.iter().copied().collect();
            assert_eq!(qs.len(), unique.len());
        }
    }

    #[test]
    fn test_per_qubit_order_preserved() {
        let circuit = Circuit::qft(6).unwrap();
        let ls = layers(&circuit);
        // Flattening layers in order must preserve each qubit's gate order
        // from the original circuit.
        for q in 0..circuit.num_qubits() {
            let q = QubitId::from(q);
            let original: Vec<_> = circuit
                .gates()
                .iter()
                .filter(|g| g.qubits().contains(&q))
                .map(|g| g.kind())
                .collect();
            let layered: Vec<_> = ls
                .iter()
                .flat_map(|l| l.gates().iter())
                .filter(|g| g.qubits().contains(&q))
                .map(|g| g.kind())
                .collect();
            assert_eq!(original, layered);
        }
    }

    #[test]
    fn test_layer_fanout_bound() {
        let mut circuit = Circuit::new(2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .h(QubitId(1))
            .unwrap()
            .rz(0.1, QubitId(0))
            .unwrap();
        let ls = layers(&circuit);
        assert_eq!(ls[0].max_fanout(), 4); // two branching gates
        assert_eq!(ls[1].max_fanout(), 1); // rz is nonbranching
    }
}
