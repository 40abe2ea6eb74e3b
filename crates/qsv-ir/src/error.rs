//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors raised while building or validating a circuit.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A command references a qubit the circuit does not declare.
    #[error("Qubit {qubit} not found in circuit{}", format_op_context(.op_name))]
    QubitNotFound {
        /// The undeclared qubit.
        qubit: QubitId,
        /// Operation that referenced it, if known.
        op_name: Option<String>,
    },

    /// A command references a classical bit the circuit does not declare.
    #[error("Classical bit {clbit} not found in circuit{}", format_op_context(.op_name))]
    ClbitNotFound {
        /// The undeclared bit.
        clbit: ClbitId,
        /// Operation that referenced it, if known.
        op_name: Option<String>,
    },

    /// The same qubit appears twice in one command.
    #[error("Duplicate qubit {qubit} in operation{}", format_op_context(.op_name))]
    DuplicateQubit {
        /// The repeated qubit.
        qubit: QubitId,
        /// Operation that repeated it, if known.
        op_name: Option<String>,
    },

    /// Gate applied to the wrong number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Arity of the gate.
        expected: u32,
        /// Number of qubits supplied.
        got: u32,
    },

    /// A measurement must bind exactly one qubit to exactly one bit.
    #[error("Measurement must bind one qubit to one bit, got {qubits} qubit(s) and {clbits} bit(s)")]
    MalformedMeasure {
        /// Number of qubits on the command.
        qubits: usize,
        /// Number of bits on the command.
        clbits: usize,
    },

    /// The implicit permutation is not a bijection over the declared qubits.
    #[error("Invalid implicit permutation: {0}")]
    InvalidPermutation(String),

    /// A custom gate matrix has the wrong number of entries.
    #[error("Matrix for {num_qubits}-qubit gate needs {expected} entries, got {got}")]
    MatrixSizeMismatch {
        /// Arity of the gate.
        num_qubits: u32,
        /// Required number of entries.
        expected: usize,
        /// Number of entries supplied.
        got: usize,
    },
}

#[allow(clippy::ref_option)]
fn format_op_context(op_name: &Option<String>) -> String {
    match op_name {
        Some(name) => format!(" (operation: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
