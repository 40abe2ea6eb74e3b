//! Property-based tests for circuit normalization.
//!
//! Circuits are generated as a unitary body, an optional block of terminal
//! measurements and a random implicit permutation, which is exactly the
//! shape the normalizer accepts.

use std::collections::BTreeSet;

use proptest::prelude::*;
use qsv_compile::normalize;
use qsv_ir::{Circuit, ClbitId, QubitId, QubitPermutation};

/// Gate operations used to build circuit bodies.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    X(u32),
    Rz(f64, u32),
    CX(u32, u32),
    Barrier,
}

impl GateOp {
    fn apply(self, circuit: &mut Circuit) {
        match self {
            GateOp::H(q) => {
                let _ = circuit.h(QubitId(q));
            }
            GateOp::X(q) => {
                let _ = circuit.x(QubitId(q));
            }
            GateOp::Rz(theta, q) => {
                let _ = circuit.rz(theta, QubitId(q));
            }
            GateOp::CX(c, t) => {
                let _ = circuit.cx(QubitId(c), QubitId(t));
            }
            GateOp::Barrier => {
                let _ = circuit.barrier_all();
            }
        }
    }
}

fn arb_gate_op(num_qubits: u32) -> impl Strategy<Value = GateOp> {
    if num_qubits < 2 {
        prop_oneof![
            (0..num_qubits).prop_map(GateOp::H),
            (0..num_qubits).prop_map(GateOp::X),
            (-3.2_f64..3.2, 0..num_qubits).prop_map(|(t, q)| GateOp::Rz(t, q)),
            Just(GateOp::Barrier),
        ]
        .boxed()
    } else {
        prop_oneof![
            (0..num_qubits).prop_map(GateOp::H),
            (0..num_qubits).prop_map(GateOp::X),
            (-3.2_f64..3.2, 0..num_qubits).prop_map(|(t, q)| GateOp::Rz(t, q)),
            (0..num_qubits, 0..num_qubits)
                .prop_filter("Control and target must differ", |(c, t)| c != t)
                .prop_map(|(c, t)| GateOp::CX(c, t)),
            Just(GateOp::Barrier),
        ]
        .boxed()
    }
}

/// A circuit ready for normalization: body, terminal measurements of a
/// random subset of qubits into distinct bits, a phase and a permutation.
fn arb_measured_circuit() -> impl Strategy<Value = Circuit> {
    (1_u32..=6).prop_flat_map(|n| {
        (
            prop::collection::vec(arb_gate_op(n), 0..=20),
            prop::collection::vec(any::<bool>(), n as usize),
            Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
            Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
            -10.0_f64..10.0,
        )
            .prop_map(move |(ops, measured, images, bits, phase)| {
                let mut circuit = Circuit::with_size("prop", n, n);
                for op in ops {
                    op.apply(&mut circuit);
                }
                for (q, measure) in measured.into_iter().enumerate() {
                    if measure {
                        let _ = circuit.measure(QubitId(q as u32), ClbitId(bits[q]));
                    }
                }
                circuit.add_phase(phase);
                let permutation = QubitPermutation::from_pairs(
                    images
                        .into_iter()
                        .enumerate()
                        .map(|(q, image)| (QubitId(q as u32), QubitId(image))),
                );
                if let Ok(permutation) = permutation {
                    let _ = circuit.set_implicit_permutation(permutation);
                }
                circuit
            })
    })
}

proptest! {
    /// Global phase is copied exactly.
    #[test]
    fn test_phase_conserved(circuit in arb_measured_circuit()) {
        let (pure, _) = normalize(&circuit).expect("terminal measurements normalize");
        prop_assert_eq!(pure.phase().to_bits(), circuit.phase().to_bits());
    }

    /// The output qubit set is the permutation image of the input set.
    #[test]
    fn test_qubit_set_preserved(circuit in arb_measured_circuit()) {
        let (pure, _) = normalize(&circuit).expect("terminal measurements normalize");
        let permutation = circuit.implicit_permutation();
        let image: BTreeSet<QubitId> = circuit.qubits().map(|q| permutation.apply(q)).collect();
        prop_assert_eq!(pure.qubit_set(), &image);
    }

    /// One map entry per measurement, no measurement or bit reference left.
    #[test]
    fn test_measurements_fully_extracted(circuit in arb_measured_circuit()) {
        let (pure, map) = normalize(&circuit).expect("terminal measurements normalize");
        let permutation = circuit.implicit_permutation();

        prop_assert_eq!(map.len(), circuit.count_ops("measure"));
        for command in circuit.iter().filter(|c| c.is_measure()) {
            let final_qubit = permutation.apply(command.qubits[0]);
            prop_assert_eq!(map.get(final_qubit), Some(command.clbits[0]));
        }
        prop_assert!(pure.is_pure());
    }

    /// Non-measurement commands keep their relative order.
    #[test]
    fn test_order_preserved(circuit in arb_measured_circuit()) {
        let (pure, _) = normalize(&circuit).expect("terminal measurements normalize");
        let permutation = circuit.implicit_permutation();
        let expected: Vec<_> = circuit
            .iter()
            .filter(|c| !c.is_measure())
            .map(|c| c.map_qubits(|q| permutation.apply(q)))
            .collect();
        prop_assert_eq!(pure.commands(), expected.as_slice());
    }

    /// Normalizing a normalized circuit changes nothing.
    #[test]
    fn test_idempotent(circuit in arb_measured_circuit()) {
        let (pure, _) = normalize(&circuit).expect("terminal measurements normalize");
        let (again, map) = normalize(&pure).expect("pure circuits normalize");
        prop_assert_eq!(&again, &pure);
        prop_assert!(map.is_empty());
    }
}
