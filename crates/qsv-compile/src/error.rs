//! Error types for the compile crate.

use qsv_ir::{ClbitId, QubitId};
use thiserror::Error;

/// Reasons a circuit cannot be normalized for a state-vector backend.
///
/// Every variant is terminal: no partial output is produced.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum NormalizeError {
    /// A qubit is used again after it was measured.
    #[error("Circuit contains a mid-circuit measurement: {qubit} is used by command {command_index} after being measured")]
    MidCircuitMeasurement {
        /// Final identity of the qubit.
        qubit: QubitId,
        /// Position of the offending command in the input.
        command_index: usize,
    },

    /// A non-measurement command references classical bits.
    #[error("Circuit contains an operation on a bit: '{operation}' at command {command_index}")]
    UnsupportedClassicalOperation {
        /// Name of the offending operation.
        operation: String,
        /// Position of the offending command in the input.
        command_index: usize,
    },

    /// Two measurements write the same classical bit.
    #[error("Classical bit {clbit} receives measurements of both {first} and {second}")]
    DuplicateMeasurementBit {
        /// The shared bit.
        clbit: ClbitId,
        /// Qubit measured first (final identity).
        first: QubitId,
        /// Qubit measured second (final identity).
        second: QubitId,
    },

    /// Structural error in the input circuit.
    #[error("IR error: {0}")]
    Ir(#[from] qsv_ir::IrError),
}

/// Result type for normalization.
pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// A circuit that does not fit a backend's capability contract.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CapabilityError {
    /// Circuit too large for target.
    #[error("Circuit requires {required} qubits but backend '{backend}' only has {available}")]
    CircuitTooLarge {
        /// Backend name.
        backend: String,
        /// Qubits in the circuit.
        required: usize,
        /// Qubits on the backend.
        available: u32,
    },

    /// Backend cannot measure.
    #[error("Backend '{0}' does not support measurement")]
    MeasurementUnsupported(String),

    /// Backend cannot condition on classical bits.
    #[error("Backend '{0}' does not support classically controlled operations")]
    ClassicalControlUnsupported(String),

    /// Gate not in the backend's gate set.
    #[error("Gate '{gate}' is not supported by backend '{backend}'")]
    UnsupportedGate {
        /// Backend name.
        backend: String,
        /// Gate name.
        gate: String,
    },

    /// Circuit still carries an implicit permutation.
    #[error("Backend '{0}' requires an identity qubit permutation")]
    ImplicitPermutation(String),
}

/// Errors when translating backend output back to classical bits.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ReadoutError {
    /// The measurement map names a qubit the circuit does not have.
    #[error("Measured qubit {0} is not part of the circuit")]
    UnknownQubit(QubitId),

    /// Probability vector does not cover the state space.
    #[error("Expected {expected} probabilities, got {got}")]
    StateSizeMismatch {
        /// `2^n` for an `n`-qubit circuit.
        expected: usize,
        /// Length supplied.
        got: usize,
    },

    /// Circuit too wide to address basis states with a `usize` index.
    #[error("Circuit has {0} qubits, too many to index basis states")]
    TooManyQubits(usize),

    /// Basis index outside the state space.
    #[error("Basis index {index} out of range for {num_qubits} qubits")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Width of the state.
        num_qubits: usize,
    },
}
