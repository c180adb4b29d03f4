//! Quantum gate types.
//!
//! A [`Gate`] is an immutable value object: a [`GateKind`] plus the qubits it
//! touches, validated once at construction and reused for the whole run. The
//! local 2×2 or 4×4 unitary is precomputed so the hot path never recomputes
//! trigonometry.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// Magnitude below which an amplitude or matrix entry is treated as zero.
///
/// Underflow is expected steady-state behaviour of the simulator, not a
/// fault: contributions below this threshold are silently dropped.
pub const ZERO_THRESHOLD: f64 = 1e-12;

/// Check whether a complex value is negligible.
#[inline]
pub fn is_zero(c: Complex64) -> bool {
    c.norm_sqr() < ZERO_THRESHOLD * ZERO_THRESHOLD
}

/// Gates with known semantics, covering the native transpiler vocabulary
/// (`rz`, `sx`, `cx`, ...) and the closed-form vocabulary of structured
/// algorithms (`h`, `cphase`, ...). Explicit-matrix variants cover anything
/// outside the named set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate: diag(1, e^{iθ}).
    Phase(f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    U {
        /// Rotation angle θ.
        theta: f64,
        /// Phase φ.
        phi: f64,
        /// Phase λ.
        lambda: f64,
    },
    /// Controlled-X (CNOT); qubit order is `[control, target]`.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// Controlled phase gate; qubit order is `[control, target]`.
    CPhase(f64),
    /// SWAP gate.
    Swap,
    /// FSim(θ, φ) entangling gate (iSWAP-like swap angle θ, phase φ on |11⟩).
    FSim {
        /// Swap angle θ.
        theta: f64,
        /// Conditional phase φ.
        phi: f64,
    },
    /// Explicit single-qubit unitary, row-major (row = output, col = input).
    Unitary1([[Complex64; 2]; 2]),
    /// Explicit two-qubit unitary, row-major; the local basis index is
    /// `b0 << 1 | b1` over the two listed qubits.
    Unitary2([[Complex64; 4]; 4]),
}

impl GateKind {
    /// Get the OPENQASM-style name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::I => "id",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::H => "h",
            GateKind::S => "s",
            GateKind::Sdg => "sdg",
            GateKind::T => "t",
            GateKind::Tdg => "tdg",
            GateKind::SX => "sx",
            GateKind::SXdg => "sxdg",
            GateKind::Rx(_) => "rx",
            GateKind::Ry(_) => "ry",
            GateKind::Rz(_) => "rz",
            GateKind::Phase(_) => "p",
            GateKind::U { .. } => "u",
            GateKind::CX => "cx",
            GateKind::CZ => "cz",
            GateKind::CPhase(_) => "cphase",
            GateKind::Swap => "swap",
            GateKind::FSim { .. } => "fsim",
            GateKind::Unitary1(_) => "unitary1",
            GateKind::Unitary2(_) => "unitary2",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::I
            | GateKind::X
            | GateKind::Y
            | GateKind::Z
            | GateKind::H
            | GateKind::S
            | GateKind::Sdg
            | GateKind::T
            | GateKind::Tdg
            | GateKind::SX
            | GateKind::SXdg
            | GateKind::Rx(_)
            | GateKind::Ry(_)
            | GateKind::Rz(_)
            | GateKind::Phase(_)
            | GateKind::U { .. }
            | GateKind::Unitary1(_) => 1,

            GateKind::CX
            | GateKind::CZ
            | GateKind::CPhase(_)
            | GateKind::Swap
            | GateKind::FSim { .. }
            | GateKind::Unitary2(_) => 2,
        }
    }

    /// Numeric parameters of this gate.
    pub fn params(&self) -> Vec<f64> {
        match *self {
            GateKind::Rx(t) | GateKind::Ry(t) | GateKind::Rz(t) | GateKind::Phase(t) => vec![t],
            GateKind::CPhase(t) => vec![t],
            GateKind::U { theta, phi, lambda } => vec![theta, phi, lambda],
            GateKind::FSim { theta, phi } => vec![theta, phi],
            // Flattened so construction rejects non-finite matrix entries.
            GateKind::Unitary1(m) => m.iter().flatten().flat_map(|c| [c.re, c.im]).collect(),
            GateKind::Unitary2(m) => m.iter().flatten().flat_map(|c| [c.re, c.im]).collect(),
            _ => vec![],
        }
    }

    /// Build the local unitary matrix of this gate (row = output, col = input).
    ///
    /// For two-qubit gates the local basis index is `b0 << 1 | b1` where `b0`
    /// and `b1` are the bits of the first and second listed qubit.
    fn unitary(&self) -> LocalUnitary {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        match *self {
            GateKind::I => LocalUnitary::One([[one, zero], [zero, one]]),
            GateKind::X => LocalUnitary::One([[zero, one], [one, zero]]),
            GateKind::Y => LocalUnitary::One([
                [zero, Complex64::new(0.0, -1.0)],
                [Complex64::new(0.0, 1.0), zero],
            ]),
            GateKind::Z => LocalUnitary::One([[one, zero], [zero, -one]]),
            GateKind::H => {
                let r = Complex64::new(FRAC_1_SQRT_2, 0.0);
                LocalUnitary::One([[r, r], [r, -r]])
            }
            GateKind::S => LocalUnitary::One([[one, zero], [zero, Complex64::new(0.0, 1.0)]]),
            GateKind::Sdg => LocalUnitary::One([[one, zero], [zero, Complex64::new(0.0, -1.0)]]),
            GateKind::T => LocalUnitary::One([
                [one, zero],
                [zero, Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)],
            ]),
            GateKind::Tdg => LocalUnitary::One([
                [one, zero],
                [zero, Complex64::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)],
            ]),
            GateKind::SX => {
                let p = Complex64::new(0.5, 0.5);
                let m = Complex64::new(0.5, -0.5);
                LocalUnitary::One([[p, m], [m, p]])
            }
            GateKind::SXdg => {
                let p = Complex64::new(0.5, 0.5);
                let m = Complex64::new(0.5, -0.5);
                LocalUnitary::One([[m, p], [p, m]])
            }
            GateKind::Rx(rot) => {
                let c = Complex64::new((rot / 2.0).cos(), 0.0);
                let s = Complex64::new(0.0, -(rot / 2.0).sin());
                LocalUnitary::One([[c, s], [s, c]])
            }
            GateKind::Ry(rot) => {
                let c = Complex64::new((rot / 2.0).cos(), 0.0);
                let s = Complex64::new((rot / 2.0).sin(), 0.0);
                LocalUnitary::One([[c, -s], [s, c]])
            }
            GateKind::Rz(rot) => LocalUnitary::One([
                [Complex64::from_polar(1.0, -rot / 2.0), zero],
                [zero, Complex64::from_polar(1.0, rot / 2.0)],
            ]),
            GateKind::Phase(rot) => {
                LocalUnitary::One([[one, zero], [zero, Complex64::from_polar(1.0, rot)]])
            }
            GateKind::U { theta, phi, lambda } => {
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let s = Complex64::new((theta / 2.0).sin(), 0.0);
                LocalUnitary::One([
                    [c, -s * Complex64::from_polar(1.0, lambda)],
                    [
                        s * Complex64::from_polar(1.0, phi),
                        c * Complex64::from_polar(1.0, phi + lambda),
                    ],
                ])
            }
            GateKind::CX => {
                let mut m = [[zero; 4]; 4];
                m[0][0] = one;
                m[1][1] = one;
                m[3][2] = one;
                m[2][3] = one;
                LocalUnitary::Two(m)
            }
            GateKind::CZ => {
                let mut m = [[zero; 4]; 4];
                m[0][0] = one;
                m[1][1] = one;
                m[2][2] = one;
                m[3][3] = -one;
                LocalUnitary::Two(m)
            }
            GateKind::CPhase(rot) => {
                let mut m = [[zero; 4]; 4];
                m[0][0] = one;
                m[1][1] = one;
                m[2][2] = one;
                m[3][3] = Complex64::from_polar(1.0, rot);
                LocalUnitary::Two(m)
            }
            GateKind::Swap => {
                let mut m = [[zero; 4]; 4];
                m[0][0] = one;
                m[2][1] = one;
                m[1][2] = one;
                m[3][3] = one;
                LocalUnitary::Two(m)
            }
            GateKind::FSim { theta, phi } => {
                let c = Complex64::new(theta.cos(), 0.0);
                let s = Complex64::new(0.0, -theta.sin());
                let mut m = [[zero; 4]; 4];
                m[0][0] = one;
                m[1][1] = c;
                m[1][2] = s;
                m[2][1] = s;
                m[2][2] = c;
                m[3][3] = Complex64::from_polar(1.0, -phi);
                LocalUnitary::Two(m)
            }
            GateKind::Unitary1(m) => LocalUnitary::One(m),
            GateKind::Unitary2(m) => LocalUnitary::Two(m),
        }
    }
}

/// The local unitary of a gate, expressed on its own 2- or 4-dimensional
/// basis (row = output assignment, col = input assignment).
#[derive(Debug, Clone, PartialEq)]
pub enum LocalUnitary {
    /// 2×2 single-qubit matrix.
    One([[Complex64; 2]; 2]),
    /// 4×4 two-qubit matrix.
    Two([[Complex64; 4]; 4]),
}

impl LocalUnitary {
    /// Dimension of the local basis (2 or 4).
    #[inline]
    pub fn dim(&self) -> usize {
        match self {
            LocalUnitary::One(_) => 2,
            LocalUnitary::Two(_) => 4,
        }
    }

    /// Apply the matrix to a local amplitude vector.
    ///
    /// Pure function: `out[r] = Σ_c M[r][c] · input[c]`. The input length
    /// must equal [`dim`](Self::dim).
    pub fn apply(&self, input: &[Complex64]) -> Vec<Complex64> {
        debug_assert_eq!(input.len(), self.dim());
        match self {
            LocalUnitary::One(m) => (0..2)
                .map(|r| m[r][0] * input[0] + m[r][1] * input[1])
                .collect(),
            LocalUnitary::Two(m) => (0..4)
                .map(|r| (0..4).map(|c| m[r][c] * input[c]).sum())
                .collect(),
        }
    }

    /// Largest number of nonzero entries in any column.
    ///
    /// This bounds how many output states a single input basis state can fan
    /// out to under this gate.
    fn max_fanout(&self) -> usize {
        match self {
            LocalUnitary::One(m) => (0..2)
                .map(|c| (0..2).filter(|&r| !is_zero(m[r][c])).count())
                .max()
                .unwrap_or(1),
            LocalUnitary::Two(m) => (0..4)
                .map(|c| (0..4).filter(|&r| !is_zero(m[r][c])).count())
                .max()
                .unwrap_or(1),
        }
    }
}

/// A validated gate bound to specific qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    kind: GateKind,
    qubits: Vec<QubitId>,
    unitary: LocalUnitary,
    max_fanout: usize,
}

impl Gate {
    /// Construct a gate, validating qubit indices and parameters.
    ///
    /// Fails if the qubit count does not match the gate arity, any index is
    /// `>= num_qubits`, a qubit is duplicated, or a parameter is non-finite.
    pub fn new(kind: GateKind, qubits: Vec<QubitId>, num_qubits: usize) -> IrResult<Self> {
        let name = kind.name();

        for p in kind.params() {
            if !p.is_finite() {
                return Err(IrError::NonFiniteParameter {
                    gate_name: name,
                    value: p,
                });
            }
        }

        let expected = kind.num_qubits();
        if qubits.len() != expected as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: name,
                expected,
                got: qubits.len(),
            });
        }

        for (i, &q) in qubits.iter().enumerate() {
            if q.0 as usize >= num_qubits {
                return Err(IrError::QubitOutOfRange {
                    gate_name: name,
                    qubit: q,
                    num_qubits,
                });
            }
            if qubits[..i].contains(&q) {
                return Err(IrError::DuplicateQubit {
                    gate_name: name,
                    qubit: q,
                });
            }
        }

        let unitary = kind.unitary();
        let max_fanout = unitary.max_fanout();
        Ok(Self {
            kind,
            qubits,
            unitary,
            max_fanout,
        })
    }

    /// The kind of this gate.
    #[inline]
    pub fn kind(&self) -> &GateKind {
        &self.kind
    }

    /// Get the OPENQASM-style name of this gate.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The qubits this gate touches.
    #[inline]
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// The precomputed local unitary.
    #[inline]
    pub fn unitary(&self) -> &LocalUnitary {
        &self.unitary
    }

    /// Upper bound on output states per input basis state.
    #[inline]
    pub fn max_fanout(&self) -> usize {
        self.max_fanout
    }

    /// Whether this gate can map one basis state to more than one.
    #[inline]
    pub fn is_branching(&self) -> bool {
        self.max_fanout > 1
    }

    /// Push one weighted basis state through the gate.
    ///
    /// Emits each (new key, contribution) pair, where the contribution is the
    /// matrix entry times `amp`. Entries below [`ZERO_THRESHOLD`] are
    /// skipped. The new key is `key` with the target bit(s) replaced by the
    /// output assignment; all other bits are unchanged.
    #[inline]
    pub fn push_apply(&self, key: u64, amp: Complex64, mut emit: impl FnMut(u64, Complex64)) {
        match &self.unitary {
            LocalUnitary::One(m) => {
                let q = self.qubits[0].0;
                let col = ((key >> q) & 1) as usize;
                for (row, r) in m.iter().enumerate() {
                    let entry = r[col];
                    if is_zero(entry) {
                        continue;
                    }
                    let new_key = (key & !(1u64 << q)) | ((row as u64) << q);
                    emit(new_key, entry * amp);
                }
            }
            LocalUnitary::Two(m) => {
                let qa = self.qubits[0].0;
                let qb = self.qubits[1].0;
                let col = ((((key >> qa) & 1) << 1) | ((key >> qb) & 1)) as usize;
                let cleared = key & !(1u64 << qa) & !(1u64 << qb);
                for (row, r) in m.iter().enumerate() {
                    let entry = r[col];
                    if is_zero(entry) {
                        continue;
                    }
                    let ra = (row as u64) >> 1;
                    let rb = (row as u64) & 1;
                    let new_key = cleared | (ra << qa) | (rb << qb);
                    emit(new_key, entry * amp);
                }
            }
        }
    }
}
