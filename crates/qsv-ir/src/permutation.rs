//! Implicit qubit permutations.
//!
//! Routing and SWAP elimination relabel qubits instead of emitting SWAP
//! gates. The accumulated relabeling is stored on the circuit as a
//! [`QubitPermutation`] mapping each original qubit to its final identity.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// A relabeling of qubits, original identity to final identity.
///
/// Qubits without an entry map to themselves, so an empty permutation is
/// the identity over any register. Equality ignores fixed points, so an
/// explicit `q0 -> q0` entry compares equal to no entry at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<QubitId, QubitId>",
    into = "BTreeMap<QubitId, QubitId>"
)]
pub struct QubitPermutation {
    /// Original qubit to final qubit.
    forward: BTreeMap<QubitId, QubitId>,
    /// Final qubit to original qubit.
    backward: BTreeMap<QubitId, QubitId>,
}

impl PartialEq for QubitPermutation {
    fn eq(&self, other: &Self) -> bool {
        let moved = |p: &Self| {
            p.forward
                .iter()
                .filter(|(from, to)| from != to)
                .map(|(&from, &to)| (from, to))
                .collect::<Vec<_>>()
        };
        moved(self) == moved(other)
    }
}

impl Eq for QubitPermutation {}

impl QubitPermutation {
    /// Create the identity permutation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity over an explicit set of qubits.
    pub fn identity(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        let mut perm = Self::new();
        for q in qubits {
            perm.forward.insert(q, q);
            perm.backward.insert(q, q);
        }
        perm
    }

    /// Build a permutation from `(original, final)` pairs.
    ///
    /// Fails if an original qubit is listed twice or two originals share a
    /// final identity.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (QubitId, QubitId)>) -> IrResult<Self> {
        let mut perm = Self::new();
        for (from, to) in pairs {
            if perm.forward.contains_key(&from) {
                return Err(IrError::InvalidPermutation(format!(
                    "{from} is mapped more than once"
                )));
            }
            if let Some(other) = perm.backward.get(&to) {
                return Err(IrError::InvalidPermutation(format!(
                    "{other} and {from} both map to {to}"
                )));
            }
            perm.forward.insert(from, to);
            perm.backward.insert(to, from);
        }
        Ok(perm)
    }

    /// Exchange the final identities `a` and `b`.
    ///
    /// Whichever original qubits currently end on `a` and `b` trade places,
    /// as an elided SWAP at the end of the circuit would.
    pub fn swap(&mut self, a: QubitId, b: QubitId) {
        if a == b {
            return;
        }
        let from_a = self.backward.get(&a).copied().unwrap_or(a);
        let from_b = self.backward.get(&b).copied().unwrap_or(b);

        self.forward.insert(from_a, b);
        self.forward.insert(from_b, a);
        self.backward.insert(b, from_a);
        self.backward.insert(a, from_b);
    }

    /// Final identity of `qubit`, if it has an explicit entry.
    pub fn get(&self, qubit: QubitId) -> Option<QubitId> {
        self.forward.get(&qubit).copied()
    }

    /// Final identity of `qubit`; qubits without an entry are fixed points.
    pub fn apply(&self, qubit: QubitId) -> QubitId {
        self.get(qubit).unwrap_or(qubit)
    }

    /// Original identity of a final qubit.
    pub fn preimage(&self, qubit: QubitId) -> QubitId {
        self.backward.get(&qubit).copied().unwrap_or(qubit)
    }

    /// The inverse relabeling.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            forward: self.backward.clone(),
            backward: self.forward.clone(),
        }
    }

    /// True if every qubit maps to itself.
    pub fn is_identity(&self) -> bool {
        self.forward.iter().all(|(from, to)| from == to)
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// True if there are no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterate explicit `(original, final)` pairs in original order.
    pub fn iter(&self) -> impl Iterator<Item = (QubitId, QubitId)> + '_ {
        self.forward.iter().map(|(&from, &to)| (from, to))
    }

    /// Check that this is a bijection of `qubits` onto itself.
    pub fn validate_over(&self, qubits: &BTreeSet<QubitId>) -> IrResult<()> {
        let mut images = BTreeSet::new();
        for (from, to) in self.iter() {
            if !qubits.contains(&from) {
                return Err(IrError::InvalidPermutation(format!(
                    "{from} is not a declared qubit"
                )));
            }
            if !qubits.contains(&to) {
                return Err(IrError::InvalidPermutation(format!(
                    "{from} maps to undeclared qubit {to}"
                )));
            }
            if !images.insert(to) {
                return Err(IrError::InvalidPermutation(format!(
                    "{to} is the image of more than one qubit"
                )));
            }
        }
        // Qubits without an entry are fixed points and must not collide.
        for q in qubits {
            if !self.forward.contains_key(q) && !images.insert(*q) {
                return Err(IrError::InvalidPermutation(format!(
                    "{q} is both a fixed point and the image of another qubit"
                )));
            }
        }
        Ok(())
    }
}

impl TryFrom<BTreeMap<QubitId, QubitId>> for QubitPermutation {
    type Error = IrError;

    fn try_from(map: BTreeMap<QubitId, QubitId>) -> IrResult<Self> {
        Self::from_pairs(map)
    }
}

impl From<QubitPermutation> for BTreeMap<QubitId, QubitId> {
    fn from(perm: QubitPermutation) -> Self {
        perm.forward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qubits(n: u32) -> BTreeSet<QubitId> {
        (0..n).map(QubitId).collect()
    }

    #[test]
    fn test_empty_is_identity() {
        let perm = QubitPermutation::new();
        assert!(perm.is_identity());
        assert_eq!(perm.apply(QubitId(7)), QubitId(7));
        assert!(perm.validate_over(&qubits(3)).is_ok());
    }

    #[test]
    fn test_swap_exchanges_images() {
        let mut perm = QubitPermutation::identity(qubits(3));
        perm.swap(QubitId(0), QubitId(2));
        assert_eq!(perm.apply(QubitId(0)), QubitId(2));
        assert_eq!(perm.apply(QubitId(2)), QubitId(0));
        assert_eq!(perm.apply(QubitId(1)), QubitId(1));
        assert!(!perm.is_identity());

        // A second swap on the same wires undoes the first.
        perm.swap(QubitId(2), QubitId(0));
        assert!(perm.is_identity());
    }

    #[test]
    fn test_swaps_compose() {
        let mut perm = QubitPermutation::new();
        perm.swap(QubitId(0), QubitId(1));
        perm.swap(QubitId(1), QubitId(2));
        // q0 -> q1 -> q2, q2 -> q1, q1 -> q0
        assert_eq!(perm.apply(QubitId(0)), QubitId(2));
        assert_eq!(perm.apply(QubitId(2)), QubitId(1));
        assert_eq!(perm.apply(QubitId(1)), QubitId(0));
        assert!(perm.validate_over(&qubits(3)).is_ok());
        assert_eq!(perm.preimage(QubitId(2)), QubitId(0));
    }

    #[test]
    fn test_from_pairs_rejects_collisions() {
        let err = QubitPermutation::from_pairs([
            (QubitId(0), QubitId(1)),
            (QubitId(1), QubitId(1)),
        ]);
        assert!(matches!(err, Err(IrError::InvalidPermutation(_))));

        let err = QubitPermutation::from_pairs([
            (QubitId(0), QubitId(1)),
            (QubitId(0), QubitId(0)),
        ]);
        assert!(matches!(err, Err(IrError::InvalidPermutation(_))));
    }

    #[test]
    fn test_validate_rejects_partial_cycle() {
        // q0 -> q1 while q1 stays fixed: not a bijection.
        let perm = QubitPermutation::from_pairs([(QubitId(0), QubitId(1))]).unwrap();
        assert!(perm.validate_over(&qubits(2)).is_err());

        // Undeclared qubit.
        let perm = QubitPermutation::from_pairs([
            (QubitId(0), QubitId(5)),
            (QubitId(5), QubitId(0)),
        ])
        .unwrap();
        assert!(perm.validate_over(&qubits(2)).is_err());
    }

    #[test]
    fn test_inverse() {
        let perm = QubitPermutation::from_pairs([
            (QubitId(0), QubitId(2)),
            (QubitId(1), QubitId(0)),
            (QubitId(2), QubitId(1)),
        ])
        .unwrap();
        let inv = perm.inverse();
        for q in qubits(3) {
            assert_eq!(inv.apply(perm.apply(q)), q);
        }
    }

    #[test]
    fn test_deserialize_restores_inverse() {
        let perm = QubitPermutation::from_pairs([
            (QubitId(0), QubitId(1)),
            (QubitId(1), QubitId(0)),
        ])
        .unwrap();
        let json = serde_json::to_string(&perm).unwrap();
        let back: QubitPermutation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, perm);
        assert_eq!(back.preimage(QubitId(0)), QubitId(1));

        // Two originals sharing an image is rejected on the way in.
        let bad = r#"{"0": 1, "1": 1}"#;
        assert!(serde_json::from_str::<QubitPermutation>(bad).is_err());
    }

    #[test]
    fn test_equality_ignores_fixed_points() {
        let mut swapped_back = QubitPermutation::new();
        swapped_back.swap(QubitId(0), QubitId(1));
        swapped_back.swap(QubitId(0), QubitId(1));
        assert!(swapped_back.is_identity());
        assert_eq!(swapped_back, QubitPermutation::new());
        assert_eq!(QubitPermutation::identity(qubits(3)), QubitPermutation::new());

        let mut swapped = QubitPermutation::identity(qubits(2));
        swapped.swap(QubitId(0), QubitId(1));
        assert_ne!(swapped, QubitPermutation::new());
    }
}
