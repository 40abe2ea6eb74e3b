//! Unitary gate types.
//!
//! Angles are plain radians. Circuits handed to a state-vector backend are
//! fully bound, so there is no symbolic parameter layer here.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// Gates with fixed, well-known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
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
    /// Rotation around X.
    Rx(f64),
    /// Rotation around Y.
    Ry(f64),
    /// Rotation around Z.
    Rz(f64),
    /// Phase gate.
    P(f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(f64, f64, f64),

    /// Controlled-X (CNOT).
    CX,
    /// Controlled-Y.
    CY,
    /// Controlled-Z.
    CZ,
    /// Controlled-Hadamard.
    CH,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// Controlled rotation around X.
    CRx(f64),
    /// Controlled rotation around Y.
    CRy(f64),
    /// Controlled rotation around Z.
    CRz(f64),
    /// Controlled phase.
    CP(f64),
    /// XX rotation.
    RXX(f64),
    /// YY rotation.
    RYY(f64),
    /// ZZ rotation.
    RZZ(f64),

    /// Toffoli (CCX).
    CCX,
    /// Fredkin (CSWAP).
    CSwap,
}

impl StandardGate {
    /// Lower-case gate name, as used in gate sets.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U(..) => "u",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::CRx(_) => "crx",
            StandardGate::CRy(_) => "cry",
            StandardGate::CRz(_) => "crz",
            StandardGate::CP(_) => "cp",
            StandardGate::RXX(_) => "rxx",
            StandardGate::RYY(_) => "ryy",
            StandardGate::RZZ(_) => "rzz",
            StandardGate::CCX => "ccx",
            StandardGate::CSwap => "cswap",
        }
    }

    /// Number of qubits the gate acts on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::SXdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_)
            | StandardGate::U(..) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::Swap
            | StandardGate::ISwap
            | StandardGate::CRx(_)
            | StandardGate::CRy(_)
            | StandardGate::CRz(_)
            | StandardGate::CP(_)
            | StandardGate::RXX(_)
            | StandardGate::RYY(_)
            | StandardGate::RZZ(_) => 2,

            StandardGate::CCX | StandardGate::CSwap => 3,
        }
    }

    /// Angle parameters in declaration order.
    pub fn params(&self) -> Vec<f64> {
        match *self {
            StandardGate::Rx(a)
            | StandardGate::Ry(a)
            | StandardGate::Rz(a)
            | StandardGate::P(a)
            | StandardGate::CRx(a)
            | StandardGate::CRy(a)
            | StandardGate::CRz(a)
            | StandardGate::CP(a)
            | StandardGate::RXX(a)
            | StandardGate::RYY(a)
            | StandardGate::RZZ(a) => vec![a],
            StandardGate::U(theta, phi, lambda) => vec![theta, phi, lambda],
            _ => vec![],
        }
    }
}

/// A user-defined gate, optionally carrying its unitary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// Gate name.
    pub name: String,
    /// Number of qubits it acts on.
    pub num_qubits: u32,
    /// Angle parameters.
    pub params: Vec<f64>,
    /// Row-major unitary, `2^n x 2^n` entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<Complex64>>,
}

impl CustomGate {
    /// Create a custom gate without parameters or matrix.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            params: vec![],
            matrix: None,
        }
    }

    /// Attach angle parameters.
    #[must_use]
    pub fn with_params(mut self, params: Vec<f64>) -> Self {
        self.params = params;
        self
    }

    /// Attach the unitary matrix, checking its size against the arity.
    pub fn with_matrix(mut self, matrix: Vec<Complex64>) -> IrResult<Self> {
        let dim = 1usize << self.num_qubits;
        if matrix.len() != dim * dim {
            return Err(IrError::MatrixSizeMismatch {
                num_qubits: self.num_qubits,
                expected: dim * dim,
                got: matrix.len(),
            });
        }
        self.matrix = Some(matrix);
        Ok(self)
    }
}

/// Either a standard or a custom gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// Gate with known semantics.
    Standard(StandardGate),
    /// User-defined gate.
    Custom(CustomGate),
}

impl GateKind {
    /// Gate name.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => &g.name,
        }
    }

    /// Number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits,
        }
    }
}

/// A gate with optional label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The gate itself.
    pub kind: GateKind,
    /// Optional label carried through compilation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Wrap a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
            label: None,
        }
    }

    /// Wrap a custom gate.
    pub fn custom(gate: CustomGate) -> Self {
        Self {
            kind: GateKind::Custom(gate),
            label: None,
        }
    }

    /// Attach a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Gate name.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::custom(gate)
    }
}
