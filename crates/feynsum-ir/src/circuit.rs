//! High-level circuit builder API.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::error::IrResult;
use crate::gate::{Gate, GateKind};
use crate::qubit::QubitId;

/// An ordered sequence of validated gates over a fixed number of qubits.
///
/// The builder methods mirror the OPENQASM gate names the parsing
/// collaborator emits; each validates its operands immediately, so a
/// constructed circuit is always well-formed.
#[derive(Debug, Clone)]
pub struct Circuit {
    num_qubits: usize,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create a new empty circuit over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: vec![],
        }
    }

    /// Number of qubits in the circuit.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The gates in input order.
    #[inline]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Append an already-constructed gate.
    pub fn push(&mut self, gate: Gate) -> &mut Self {
        self.gates.push(gate);
        self
    }

    fn apply(&mut self, kind: GateKind, qubits: Vec<QubitId>) -> IrResult<&mut Self> {
        let gate = Gate::new(kind, qubits, self.num_qubits)?;
        self.gates.push(gate);
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::H, vec![qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::X, vec![qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Y, vec![qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Z, vec![qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::S, vec![qubit])
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Sdg, vec![qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::T, vec![qubit])
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Tdg, vec![qubit])
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::SX, vec![qubit])
    }

    /// Apply sqrt(X)-dagger gate.
    pub fn sxdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::SXdg, vec![qubit])
    }

    /// Apply rotation around X.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Rx(theta), vec![qubit])
    }

    /// Apply rotation around Y.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Ry(theta), vec![qubit])
    }

    /// Apply rotation around Z.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Rz(theta), vec![qubit])
    }

    /// Apply phase gate.
    pub fn phase(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Phase(theta), vec![qubit])
    }

    /// Apply universal single-qubit gate U(θ, φ, λ).
    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::U { theta, phi, lambda }, vec![qubit])
    }

    /// Apply an explicit 2×2 unitary (row = output, col = input).
    pub fn unitary1(&mut self, m: [[Complex64; 2]; 2], qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Unitary1(m), vec![qubit])
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply controlled-X (CNOT).
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CX, vec![control, target])
    }

    /// Apply controlled-Z.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CZ, vec![control, target])
    }

    /// Apply controlled phase.
    pub fn cphase(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::CPhase(theta), vec![control, target])
    }

    /// Apply SWAP.
    pub fn swap(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Swap, vec![a, b])
    }

    /// Apply FSim(θ, φ).
    pub fn fsim(&mut self, theta: f64, phi: f64, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::FSim { theta, phi }, vec![a, b])
    }

    /// Apply an explicit 4×4 unitary; the local basis index over `(a, b)` is
    /// `bit(a) << 1 | bit(b)`.
    pub fn unitary2(&mut self, m: [[Complex64; 4]; 4], a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.apply(GateKind::Unitary2(m), vec![a, b])
    }

    // =========================================================================
    // Three-qubit gates, decomposed into the 1/2-qubit set
    // =========================================================================

    /// Apply Toffoli (CCX), decomposed into H, T, Tdg and CX gates so the
    /// engine only ever sees one- and two-qubit unitaries.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.h(target)?
            .cx(c2, target)?
            .tdg(target)?
            .cx(c1, target)?
            .t(target)?
            .cx(c2, target)?
            .tdg(target)?
            .cx(c1, target)?
            .t(c2)?
            .t(target)?
            .h(target)
    }

    /// Apply Fredkin (CSWAP), decomposed via CX and CCX.
    pub fn cswap(&mut self, control: QubitId, t1: QubitId, t2: QubitId) -> IrResult<&mut Self> {
        self.cx(t1, t2)?.ccx(control, t2, t1)?.cx(t1, t2)
    }

    // =========================================================================
    // Convenience constructors
    // =========================================================================

    /// Build the 2-qubit Bell circuit: `h q[0]; cx q[0],q[1];`.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Circuit::new(2);
        circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
        Ok(circuit)
    }

    /// Build an n-qubit GHZ circuit.
    pub fn ghz(n: usize) -> IrResult<Self> {
        let mut circuit = Circuit::new(n);
        circuit.h(QubitId(0))?;
        for i in 1..n {
            circuit.cx(QubitId(0), QubitId::from(i))?;
        }
        Ok(circuit)
    }

    /// Build the n-qubit quantum Fourier transform out of `h` and `cphase`
    /// gates, with a final qubit-order reversal via `swap`.
    pub fn qft(n: usize) -> IrResult<Self> {
        let mut circuit = Circuit::new(n);
        for i in 0..n {
            circuit.h(QubitId::from(i))?;
            for j in 1..(n - i) {
                let theta = 2.0 * PI / (1u64 << (j + 1)) as f64;
                circuit.cphase(theta, QubitId::from(i + j), QubitId::from(i))?;
            }
        }
        for i in 0..(n / 2) {
            circuit.swap(QubitId::from(i), QubitId::from(n - 1 - i))?;
        }
        Ok(circuit)
    }
}
