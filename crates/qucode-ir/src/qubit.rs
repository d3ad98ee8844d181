//! Qubit addressing and classical bitstrings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};

/// Index of a qubit within a register or circuit.
///
/// Qubit `i` corresponds to bit `i` of a statevector index (little-endian).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The bit position of this qubit in a statevector index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
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

/// Check that `targets` are all in `[0, num_qubits)` and pairwise distinct.
pub fn validate_targets(
    targets: &[QubitId],
    num_qubits: u32,
    gate_name: Option<&str>,
) -> IrResult<()> {
    for (i, q) in targets.iter().enumerate() {
        if q.0 >= num_qubits {
            return Err(IrError::InvalidTargets {
                targets: targets.iter().map(|q| q.0).collect(),
                num_qubits,
                reason: format!("{q} is out of range"),
            });
        }
        if targets[..i].contains(q) {
            return Err(IrError::DuplicateTarget {
                qubit: *q,
                gate_name: gate_name.map(str::to_string),
            });
        }
    }
    Ok(())
}

/// A classical measurement record: bit `i` is the value read from qubit `i`.
///
/// Displays with qubit 0 as the leftmost character, so the basis index 5 of a
/// 3-qubit register (qubits 0 and 2 set) prints as `"101"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BitString(Vec<u8>);

impl BitString {
    /// Decode a basis index of an `num_qubits`-qubit register.
    pub fn from_index(index: usize, num_qubits: usize) -> Self {
        Self((0..num_qubits).map(|q| ((index >> q) & 1) as u8).collect())
    }

    /// Encode back into a basis index.
    pub fn to_index(&self) -> usize {
        self.0
            .iter()
            .enumerate()
            .fold(0, |acc, (q, &b)| acc | (usize::from(b) << q))
    }

    /// Read the value of one qubit.
    pub fn bit(&self, qubit: QubitId) -> Option<u8> {
        self.0.get(qubit.index()).copied()
    }

    /// The bits, qubit 0 first.
    pub fn bits(&self) -> &[u8] {
        &self.0
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no bits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b}")?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(0),
                '1' => Ok(1),
                _ => Err(IrError::InvalidBitString(s.to_string())),
            })
            .collect::<IrResult<Vec<u8>>>()
            .map(BitString)
    }
}
