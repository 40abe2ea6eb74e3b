//! Measurement map: which classical bit receives which qubit's outcome.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use qsv_ir::{ClbitId, QubitId};

/// A partial, injective map from measured qubits to classical bits.
///
/// Keys are final qubit identities; bits are the caller's original bit
/// identifiers. Iteration is in ascending qubit order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<QubitId, ClbitId>",
    into = "BTreeMap<QubitId, ClbitId>"
)]
pub struct MeasurementMap {
    by_qubit: BTreeMap<QubitId, ClbitId>,
    by_clbit: BTreeMap<ClbitId, QubitId>,
}

impl MeasurementMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `qubit` is measured into `clbit`.
    ///
    /// Keeps the map injective: if `clbit` already belonged to another
    /// qubit, that entry is dropped and the displaced qubit is returned.
    pub fn insert(&mut self, qubit: QubitId, clbit: ClbitId) -> Option<QubitId> {
        if let Some(old_bit) = self.by_qubit.insert(qubit, clbit) {
            self.by_clbit.remove(&old_bit);
        }
        match self.by_clbit.insert(clbit, qubit) {
            Some(displaced) if displaced != qubit => {
                self.by_qubit.remove(&displaced);
                Some(displaced)
            }
            _ => None,
        }
    }

    /// Bit receiving the outcome of `qubit`.
    pub fn get(&self, qubit: QubitId) -> Option<ClbitId> {
        self.by_qubit.get(&qubit).copied()
    }

    /// Qubit whose outcome lands in `clbit`.
    pub fn qubit_for(&self, clbit: ClbitId) -> Option<QubitId> {
        self.by_clbit.get(&clbit).copied()
    }

    /// Check if `qubit` is measured.
    pub fn contains_qubit(&self, qubit: QubitId) -> bool {
        self.by_qubit.contains_key(&qubit)
    }

    /// Check if `clbit` receives a measurement.
    pub fn contains_clbit(&self, clbit: ClbitId) -> bool {
        self.by_clbit.contains_key(&clbit)
    }

    /// Number of measured qubits.
    pub fn len(&self) -> usize {
        self.by_qubit.len()
    }

    /// True if nothing is measured.
    pub fn is_empty(&self) -> bool {
        self.by_qubit.is_empty()
    }

    /// Iterate `(qubit, bit)` pairs in qubit order.
    pub fn iter(&self) -> impl Iterator<Item = (QubitId, ClbitId)> + '_ {
        self.by_qubit.iter().map(|(&q, &c)| (q, c))
    }

    /// Measured qubits in ascending order.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.by_qubit.keys().copied()
    }

    /// Target bits in ascending order.
    pub fn clbits(&self) -> impl Iterator<Item = ClbitId> + '_ {
        self.by_clbit.keys().copied()
    }
}

impl TryFrom<BTreeMap<QubitId, ClbitId>> for MeasurementMap {
    type Error = String;

    fn try_from(entries: BTreeMap<QubitId, ClbitId>) -> Result<Self, String> {
        let mut map = Self::new();
        for (qubit, clbit) in entries {
            if let Some(other) = map.insert(qubit, clbit) {
                return Err(format!("{clbit} is assigned to both {other} and {qubit}"));
            }
        }
        Ok(map)
    }
}

impl From<MeasurementMap> for BTreeMap<QubitId, ClbitId> {
    fn from(map: MeasurementMap) -> Self {
        map.by_qubit
    }
}

impl FromIterator<(QubitId, ClbitId)> for MeasurementMap {
    /// Later pairs win on bit collisions.
    fn from_iter<I: IntoIterator<Item = (QubitId, ClbitId)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (qubit, clbit) in iter {
            map.insert(qubit, clbit);
        }
        map
    }
}
