//! Commands: operations bound to qubits and bits.

use serde::{Deserialize, Serialize};

use crate::gate::{Gate, StandardGate};
use crate::qubit::{ClbitId, QubitId};

/// What a command does, independent of its operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// A unitary gate.
    Gate(Gate),
    /// Computational-basis measurement into a classical bit.
    Measure,
    /// Scheduling barrier. Has no effect on the state.
    Barrier,
}

impl Operation {
    /// Name of the operation.
    pub fn name(&self) -> &str {
        match self {
            Operation::Gate(g) => g.name(),
            Operation::Measure => "measure",
            Operation::Barrier => "barrier",
        }
    }
}

/// An operation applied to an ordered list of qubits.
///
/// `clbits` is non-empty only for measurements (exactly one bit) and for
/// gates conditioned on classical bits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// The operation.
    pub op: Operation,
    /// Qubit operands, in the order the operation expects them.
    pub qubits: Vec<QubitId>,
    /// Classical bit operands.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<ClbitId>,
}

impl Command {
    /// Create a gate command.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            op: Operation::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate command.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate command.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a gate command conditioned on classical bits.
    pub fn conditional(
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
        condition: impl IntoIterator<Item = ClbitId>,
    ) -> Self {
        Self {
            op: Operation::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
            clbits: condition.into_iter().collect(),
        }
    }

    /// Create a measurement of `qubit` into `clbit`.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            op: Operation::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a barrier across the given qubits.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            op: Operation::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.op, Operation::Measure)
    }

    /// Check if this is a gate.
    pub fn is_gate(&self) -> bool {
        matches!(self.op, Operation::Gate(_))
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.op, Operation::Barrier)
    }

    /// Check if the command references any classical bit.
    pub fn has_clbits(&self) -> bool {
        !self.clbits.is_empty()
    }

    /// Get the gate if this is a gate command.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.op {
            Operation::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Name of the operation.
    pub fn name(&self) -> &str {
        self.op.name()
    }

    /// Copy of this command with every qubit passed through `map`.
    ///
    /// Bits are left untouched.
    #[must_use]
    pub fn map_qubits(&self, mut map: impl FnMut(QubitId) -> QubitId) -> Self {
        Self {
            op: self.op.clone(),
            qubits: self.qubits.iter().map(|&q| map(q)).collect(),
            clbits: self.clbits.clone(),
        }
    }
}
