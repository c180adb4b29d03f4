//! Qubit addressing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit within a circuit, in `[0, num_qubits)`.
///
/// Fixed for the lifetime of the circuit. Doubles as the bit position of the
/// qubit inside a basis-state key: bit `i` of a key holds the classical value
/// of qubit `i` in that branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Bit position of this qubit in a basis-state key.
    #[inline]
    pub fn bit(self) -> u64 {
        1u64 << self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl From<usize> for QubitId {
    fn from(id: usize) -> Self {
        QubitId(u32::try_from(id).expect("QubitId overflow: exceeds u32::MAX"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(3)), "q3");
    }

    #[test]
    fn test_qubit_bit() {
        assert_eq!(QubitId(0).bit(), 1);
        assert_eq!(QubitId(5).bit(), 32);
    }
}
