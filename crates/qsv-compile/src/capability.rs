//! Backend capability contract.
//!
//! Describes what a simulation backend will execute, and checks circuits
//! against it before submission. A state-vector backend takes only pure
//! circuits; [`Capabilities::requires_normalization`] tells the caller
//! whether a circuit must go through the [`Normalizer`](crate::Normalizer)
//! first.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use qsv_ir::{Circuit, GateKind, Operation};

use crate::error::CapabilityError;

/// Names of gates a backend accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSet {
    gates: BTreeSet<String>,
}

impl GateSet {
    /// Every standard gate.
    pub fn universal() -> Self {
        Self::from_names([
            "id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "sx", "sxdg", "rx", "ry", "rz",
            "p", "u", "cx", "cy", "cz", "ch", "swap", "iswap", "crx", "cry", "crz", "cp", "rxx",
            "ryy", "rzz", "ccx", "cswap",
        ])
    }

    /// Build a gate set from gate names.
    pub fn from_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            gates: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a gate name is in the set.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.contains(gate)
    }

    /// Number of gates in the set.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// True if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

/// What a simulation backend can execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Backend name.
    pub name: String,
    /// Maximum number of qubits.
    pub num_qubits: u32,
    /// Accepted gates. Custom gates are accepted when they carry a matrix.
    pub gate_set: GateSet,
    /// Whether the backend executes `Measure` commands itself.
    pub supports_measurement: bool,
    /// Whether the backend executes classically conditioned gates.
    pub supports_classical_control: bool,
    /// Whether this is a simulator.
    pub is_simulator: bool,
}

impl Capabilities {
    /// A pure state-vector simulator.
    pub fn statevector(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            gate_set: GateSet::universal(),
            supports_measurement: false,
            supports_classical_control: false,
            is_simulator: true,
        }
    }

    /// Restrict the accepted gates.
    #[must_use]
    pub fn with_gate_set(mut self, gate_set: GateSet) -> Self {
        self.gate_set = gate_set;
        self
    }

    /// True if `circuit` still contains anything a pure backend rejects.
    pub fn requires_normalization(&self, circuit: &Circuit) -> bool {
        !circuit.implicit_permutation().is_identity()
            || (!self.supports_measurement && circuit.has_measurements())
            || (!self.supports_classical_control && circuit.has_clbit_references())
    }

    /// Check `circuit` against this contract.
    pub fn check(&self, circuit: &Circuit) -> Result<(), CapabilityError> {
        if circuit.num_qubits() > self.num_qubits as usize {
            return Err(CapabilityError::CircuitTooLarge {
                backend: self.name.clone(),
                required: circuit.num_qubits(),
                available: self.num_qubits,
            });
        }
        if !circuit.implicit_permutation().is_identity() {
            return Err(CapabilityError::ImplicitPermutation(self.name.clone()));
        }

        for command in circuit {
            if command.has_clbits() && !self.supports_classical_control {
                return Err(CapabilityError::ClassicalControlUnsupported(self.name.clone()));
            }
            match &command.op {
                Operation::Measure => {
                    if !self.supports_measurement {
                        return Err(CapabilityError::MeasurementUnsupported(self.name.clone()));
                    }
                }
                Operation::Gate(gate) => {
                    let accepted = match &gate.kind {
                        GateKind::Standard(g) => self.gate_set.contains(g.name()),
                        GateKind::Custom(g) => g.matrix.is_some() || self.gate_set.contains(&g.name),
                    };
                    if !accepted {
                        return Err(CapabilityError::UnsupportedGate {
                            backend: self.name.clone(),
                            gate: gate.name().to_string(),
                        });
                    }
                }
                Operation::Barrier => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use qsv_ir::{ClbitId, Command, CustomGate, QubitId, StandardGate};

    #[test]
    fn test_statevector_defaults() {
        let caps = Capabilities::statevector("sv", 20);
        assert!(caps.is_simulator);
        assert!(!caps.supports_measurement);
        assert!(caps.gate_set.contains("cswap"));
        assert_eq!(caps.gate_set.len(), 31);
    }

    #[test]
    fn test_measured_circuit_needs_normalization() {
        let caps = Capabilities::statevector("sv", 4);
        let circuit = Circuit::bell().unwrap();
        assert!(caps.requires_normalization(&circuit));
        assert_eq!(
            caps.check(&circuit),
            Err(CapabilityError::MeasurementUnsupported("sv".into()))
        );
    }

    #[test]
    fn test_too_many_qubits() {
        let caps = Capabilities::statevector("sv", 2);
        let circuit = Circuit::with_size("wide", 3, 0);
        assert!(matches!(
            caps.check(&circuit),
            Err(CapabilityError::CircuitTooLarge { required: 3, available: 2, .. })
        ));
    }

    #[test]
    fn test_permutation_rejected() {
        let caps = Capabilities::statevector("sv", 2);
        let mut circuit = Circuit::with_size("perm", 2, 0);
        circuit.add_implicit_swap(QubitId(0), QubitId(1)).unwrap();
        assert!(caps.requires_normalization(&circuit));
        assert_eq!(
            caps.check(&circuit),
            Err(CapabilityError::ImplicitPermutation("sv".into()))
        );
    }

    #[test]
    fn test_conditional_gate_rejected() {
        let caps = Capabilities::statevector("sv", 2);
        let mut circuit = Circuit::with_size("cond", 1, 1);
        circuit
            .conditional(StandardGate::X, [QubitId(0)], [ClbitId(0)])
            .unwrap();
        assert_eq!(
            caps.check(&circuit),
            Err(CapabilityError::ClassicalControlUnsupported("sv".into()))
        );
    }

    #[test]
    fn test_barrier_on_bits_rejected() {
        let caps = Capabilities::statevector("sv", 1);
        let mut circuit = Circuit::with_size("barrier", 1, 1);
        circuit
            .push(Command {
                op: Operation::Barrier,
                qubits: vec![QubitId(0)],
                clbits: vec![ClbitId(0)],
            })
            .unwrap();
        assert!(caps.requires_normalization(&circuit));
        assert_eq!(
            caps.check(&circuit),
            Err(CapabilityError::ClassicalControlUnsupported("sv".into()))
        );
    }

    #[test]
    fn test_restricted_gate_set() {
        let caps = Capabilities::statevector("sv", 2).with_gate_set(GateSet::from_names(["h", "cz"]));
        let mut circuit = Circuit::with_size("ok", 2, 0);
        circuit.h(QubitId(0)).unwrap().cz(QubitId(0), QubitId(1)).unwrap();
        assert!(caps.check(&circuit).is_ok());
        assert!(!caps.requires_normalization(&circuit));

        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        assert!(matches!(
            caps.check(&circuit),
            Err(CapabilityError::UnsupportedGate { gate, .. }) if gate == "cx"
        ));
    }

    #[test]
    fn test_custom_gate_needs_matrix() {
        let caps = Capabilities::statevector("sv", 1);
        let mut circuit = Circuit::with_size("custom", 1, 0);
        circuit.gate(CustomGate::new("mystery", 1), [QubitId(0)]).unwrap();
        assert!(caps.check(&circuit).is_err());

        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let mut circuit = Circuit::with_size("custom", 1, 0);
        let gate = CustomGate::new("ident", 1)
            .with_matrix(vec![one, zero, zero, one])
            .unwrap();
        circuit.gate(gate, [QubitId(0)]).unwrap();
        assert!(caps.check(&circuit).is_ok());
    }
}
