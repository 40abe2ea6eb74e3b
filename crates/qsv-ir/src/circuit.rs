//! High-level circuit builder API.

use std::collections::BTreeSet;

use crate::command::{Command, Operation};
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::permutation::QubitPermutation;
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit: declared registers, commands in program order, a
/// global phase and an implicit qubit permutation.
///
/// Every command added through the builder is checked against the declared
/// registers, so a `Circuit` is always structurally valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Declared qubits.
    qubits: BTreeSet<QubitId>,
    /// Declared classical bits.
    clbits: BTreeSet<ClbitId>,
    /// Commands in program order.
    commands: Vec<Command>,
    /// Global phase in radians.
    phase: f64,
    /// Relabeling applied at the end of the circuit.
    permutation: QubitPermutation,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: BTreeSet::new(),
            clbits: BTreeSet::new(),
            commands: vec![],
            phase: 0.0,
            permutation: QubitPermutation::new(),
        }
    }

    /// Create a circuit with qubits `q0..q{n-1}` and bits `c0..c{m-1}`.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        circuit.qubits.extend((0..num_qubits).map(QubitId));
        circuit.clbits.extend((0..num_clbits).map(ClbitId));
        circuit
    }

    /// Add a qubit with the next free id.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = self.qubits.last().map_or(QubitId(0), |q| QubitId(q.0 + 1));
        self.qubits.insert(id);
        id
    }

    /// Add a classical bit with the next free id.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = self.clbits.last().map_or(ClbitId(0), |c| ClbitId(c.0 + 1));
        self.clbits.insert(id);
        id
    }

    /// Declare a specific qubit. Returns false if it was already declared.
    pub fn declare_qubit(&mut self, qubit: QubitId) -> bool {
        self.qubits.insert(qubit)
    }

    /// Declare a specific classical bit. Returns false if it was already declared.
    pub fn declare_clbit(&mut self, clbit: ClbitId) -> bool {
        self.clbits.insert(clbit)
    }

    /// Append a command after validating its operands.
    pub fn push(&mut self, command: Command) -> IrResult<&mut Self> {
        self.validate_command(&command)?;
        self.commands.push(command);
        Ok(self)
    }

    fn validate_command(&self, command: &Command) -> IrResult<()> {
        let op_name = || Some(command.name().to_string());

        for (i, &qubit) in command.qubits.iter().enumerate() {
            if !self.qubits.contains(&qubit) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    op_name: op_name(),
                });
            }
            if command.qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    op_name: op_name(),
                });
            }
        }
        for &clbit in &command.clbits {
            if !self.clbits.contains(&clbit) {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    op_name: op_name(),
                });
            }
        }

        match &command.op {
            Operation::Gate(gate) => {
                let got = command.qubits.len() as u32;
                if gate.num_qubits() != got {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected: gate.num_qubits(),
                        got,
                    });
                }
            }
            Operation::Measure => {
                if command.qubits.len() != 1 || command.clbits.len() != 1 {
                    return Err(IrError::MalformedMeasure {
                        qubits: command.qubits.len(),
                        clbits: command.clbits.len(),
                    });
                }
            }
            Operation::Barrier => {}
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Command::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Command::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Command::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Command::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Command::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Command::single_qubit_gate(StandardGate::Sdg, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Command::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Command::single_qubit_gate(StandardGate::Tdg, qubit))
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Command::single_qubit_gate(StandardGate::SX, qubit))
    }

    /// Apply sqrt(X)-dagger gate.
    pub fn sxdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Command::single_qubit_gate(StandardGate::SXdg, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Command::single_qubit_gate(StandardGate::Rx(theta), qubit))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Command::single_qubit_gate(StandardGate::Ry(theta), qubit))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Command::single_qubit_gate(StandardGate::Rz(theta), qubit))
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Command::single_qubit_gate(StandardGate::P(theta), qubit))
    }

    /// Apply universal U gate.
    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Command::single_qubit_gate(
            StandardGate::U(theta, phi, lambda),
            qubit,
        ))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Command::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Command::two_qubit_gate(StandardGate::CY, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Command::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply controlled-Hadamard gate.
    pub fn ch(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Command::two_qubit_gate(StandardGate::CH, control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Command::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    /// Apply iSWAP gate.
    pub fn iswap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Command::two_qubit_gate(StandardGate::ISwap, q1, q2))
    }

    /// Apply controlled-Rx gate.
    pub fn crx(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Command::two_qubit_gate(StandardGate::CRx(theta), control, target))
    }

    /// Apply controlled-Ry gate.
    pub fn cry(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Command::two_qubit_gate(StandardGate::CRy(theta), control, target))
    }

    /// Apply controlled-Rz gate.
    pub fn crz(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Command::two_qubit_gate(StandardGate::CRz(theta), control, target))
    }

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Command::two_qubit_gate(StandardGate::CP(theta), control, target))
    }

    /// Apply RXX gate.
    pub fn rxx(&mut self, theta: f64, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Command::two_qubit_gate(StandardGate::RXX(theta), q1, q2))
    }

    /// Apply RYY gate.
    pub fn ryy(&mut self, theta: f64, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Command::two_qubit_gate(StandardGate::RYY(theta), q1, q2))
    }

    /// Apply RZZ gate.
    pub fn rzz(&mut self, theta: f64, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Command::two_qubit_gate(StandardGate::RZZ(theta), q1, q2))
    }

    // =========================================================================
    // Three-qubit gates
    // =========================================================================

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Command::gate(StandardGate::CCX, [c1, c2, target]))
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn cswap(&mut self, control: QubitId, t1: QubitId, t2: QubitId) -> IrResult<&mut Self> {
        self.push(Command::gate(StandardGate::CSwap, [control, t1, t2]))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Command::gate(gate, qubits))
    }

    /// Apply a gate conditioned on classical bits.
    pub fn conditional(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
        condition: impl IntoIterator<Item = ClbitId>,
    ) -> IrResult<&mut Self> {
        self.push(Command::conditional(gate, qubits, condition))
    }

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.push(Command::measure(qubit, clbit))
    }

    /// Measure every qubit into the bit with the same index.
    ///
    /// Missing bits are declared on the fly.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().copied().collect();
        for qubit in qubits {
            let clbit = ClbitId(qubit.0);
            self.clbits.insert(clbit);
            self.push(Command::measure(qubit, clbit))?;
        }
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.push(Command::barrier(qubits))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().copied().collect();
        self.push(Command::barrier(qubits))
    }

    /// Add to the global phase (radians).
    pub fn add_phase(&mut self, phase: f64) -> &mut Self {
        self.phase += phase;
        self
    }

    // =========================================================================
    // Implicit permutation
    // =========================================================================

    /// Replace the implicit permutation.
    ///
    /// The permutation must be a bijection over the declared qubits.
    pub fn set_implicit_permutation(&mut self, permutation: QubitPermutation) -> IrResult<()> {
        permutation.validate_over(&self.qubits)?;
        self.permutation = permutation;
        Ok(())
    }

    /// Record an elided SWAP between the final identities `a` and `b`.
    pub fn add_implicit_swap(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        for qubit in [a, b] {
            if !self.qubits.contains(&qubit) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    op_name: Some("implicit_swap".into()),
                });
            }
        }
        self.permutation.swap(a, b);
        Ok(self)
    }

    /// The implicit permutation, original identity to final identity.
    pub fn implicit_permutation(&self) -> &QubitPermutation {
        &self.permutation
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Global phase in radians.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Number of declared qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Number of declared classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Declared qubits in ascending order.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.qubits.iter().copied()
    }

    /// Declared classical bits in ascending order.
    pub fn clbits(&self) -> impl Iterator<Item = ClbitId> + '_ {
        self.clbits.iter().copied()
    }

    /// Declared qubit set.
    pub fn qubit_set(&self) -> &BTreeSet<QubitId> {
        &self.qubits
    }

    /// Check if a qubit is declared.
    pub fn contains_qubit(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }

    /// Commands in program order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Iterate commands in program order.
    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Number of commands.
    pub fn num_commands(&self) -> usize {
        self.commands.len()
    }

    /// Count commands with the given operation name.
    pub fn count_ops(&self, name: &str) -> usize {
        self.commands.iter().filter(|c| c.name() == name).count()
    }

    /// Check if any command is a measurement.
    pub fn has_measurements(&self) -> bool {
        self.commands.iter().any(Command::is_measure)
    }

    /// Check if any command references a classical bit.
    pub fn has_clbit_references(&self) -> bool {
        self.commands.iter().any(Command::has_clbits)
    }

    /// A pure circuit has no measurements, no bit references and an
    /// identity permutation.
    pub fn is_pure(&self) -> bool {
        !self.has_measurements() && !self.has_clbit_references() && self.permutation.is_identity()
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Bell state with both qubits measured.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        let (q0, q1) = (QubitId(0), QubitId(1));

        circuit
            .h(q0)?
            .cx(q0, q1)?
            .measure(q0, ClbitId(0))?
            .measure(q1, ClbitId(1))?;

        Ok(circuit)
    }

    /// GHZ state over `n` qubits with every qubit measured.
    pub fn ghz(n: u32) -> IrResult<Self> {
        if n == 0 {
            return Ok(Self::new("ghz"));
        }

        let mut circuit = Self::with_size("ghz", n, n);
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        for i in 0..n {
            circuit.measure(QubitId(i), ClbitId(i))?;
        }

        Ok(circuit)
    }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
