//! Translating backend output into classical-bit results.
//!
//! A state-vector backend reports basis-state indices over the pure
//! circuit's qubits, in final qubit identity order. [`ReadoutLayout`]
//! precomputes, for every classical bit, which bit of such an index holds
//! its outcome, then turns sampled indices or probability vectors into
//! bitstrings over the caller's classical bits.
//!
//! Bitstrings list bits in ascending [`ClbitId`] order, `c0` first.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use qsv_ir::{Circuit, ClbitId};

use crate::error::ReadoutError;
use crate::measurement::MeasurementMap;

/// How a basis-state index encodes the circuit's qubits, taken in
/// ascending qubit order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasisOrder {
    /// First qubit is the most significant bit of the index.
    #[default]
    BigEndian,
    /// First qubit is the least significant bit of the index.
    LittleEndian,
}

/// Measurement outcome counts keyed by bitstring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Occurrences of `bitstring` (zero if never seen).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Most frequent bitstring; ties resolve to the smallest string.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, &v)| (k.as_str(), v))
    }

    /// Iterate `(bitstring, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// Precomputed routing from basis-state index bits to classical bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadoutLayout {
    num_qubits: usize,
    /// Each classical bit and the index bit it reads, if measured.
    bits: Vec<(ClbitId, Option<u32>)>,
}

impl ReadoutLayout {
    /// Build the layout for a normalized circuit and its measurement map.
    ///
    /// Every bit declared by `circuit` or named in `measurements` is read
    /// out. Declared bits that receive no measurement read as `0`.
    pub fn new(
        circuit: &Circuit,
        measurements: &MeasurementMap,
        order: BasisOrder,
    ) -> Result<Self, ReadoutError> {
        let num_qubits = circuit.num_qubits();
        if num_qubits >= usize::BITS as usize {
            return Err(ReadoutError::TooManyQubits(num_qubits));
        }

        let shift_of = |position: usize| -> u32 {
            match order {
                BasisOrder::BigEndian => (num_qubits - 1 - position) as u32,
                BasisOrder::LittleEndian => position as u32,
            }
        };

        let mut bits: BTreeMap<ClbitId, Option<u32>> =
            circuit.clbits().map(|c| (c, None)).collect();
        for (qubit, clbit) in measurements.iter() {
            let position = circuit
                .qubits()
                .position(|q| q == qubit)
                .ok_or(ReadoutError::UnknownQubit(qubit))?;
            bits.insert(clbit, Some(shift_of(position)));
        }

        Ok(Self {
            num_qubits,
            bits: bits.into_iter().collect(),
        })
    }

    /// Include additional classical bits, for instance bits of the source
    /// circuit that the caller wants in every bitstring. Bits without a
    /// measurement always read as `0`.
    #[must_use]
    pub fn with_clbits(self, clbits: impl IntoIterator<Item = ClbitId>) -> Self {
        let mut bits: BTreeMap<ClbitId, Option<u32>> = self.bits.into_iter().collect();
        for clbit in clbits {
            bits.entry(clbit).or_insert(None);
        }
        Self {
            num_qubits: self.num_qubits,
            bits: bits.into_iter().collect(),
        }
    }

    /// Classical bits in readout order.
    pub fn clbits(&self) -> impl Iterator<Item = ClbitId> + '_ {
        self.bits.iter().map(|(c, _)| *c)
    }

    /// Number of qubits addressed by basis indices.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn check_index(&self, index: usize) -> Result<(), ReadoutError> {
        if index >> self.num_qubits != 0 {
            return Err(ReadoutError::IndexOutOfRange {
                index,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    /// Bit values for basis state `index`.
    pub fn readout(&self, index: usize) -> Result<Vec<bool>, ReadoutError> {
        self.check_index(index)?;
        Ok(self
            .bits
            .iter()
            .map(|(_, shift)| shift.is_some_and(|s| (index >> s) & 1 == 1))
            .collect())
    }

    /// Bitstring for basis state `index`.
    pub fn bitstring(&self, index: usize) -> Result<String, ReadoutError> {
        Ok(self
            .readout(index)?
            .into_iter()
            .map(|b| if b { '1' } else { '0' })
            .collect())
    }

    /// Aggregate sampled basis indices into counts.
    pub fn counts(
        &self,
        samples: impl IntoIterator<Item = usize>,
    ) -> Result<Counts, ReadoutError> {
        let mut counts = Counts::new();
        for index in samples {
            counts.insert(self.bitstring(index)?, 1);
        }
        Ok(counts)
    }

    /// Fold probabilities over all basis states into bitstring probabilities.
    pub fn marginal_probabilities(
        &self,
        probs: &[f64],
    ) -> Result<BTreeMap<String, f64>, ReadoutError> {
        let expected = 1usize << self.num_qubits;
        if probs.len() != expected {
            return Err(ReadoutError::StateSizeMismatch {
                expected,
                got: probs.len(),
            });
        }
        let mut out = BTreeMap::new();
        for (index, &p) in probs.iter().enumerate() {
            *out.entry(self.bitstring(index)?).or_insert(0.0) += p;
        }
        Ok(out)
    }
}
