//! Measurement and implicit-permutation stripping.
//!
//! State-vector backends accept pure circuits only: unitary commands over a
//! fixed qubit ordering, with no measurements, no classical bits and no
//! pending relabeling. [`Normalizer`] converts a general circuit into that
//! shape and returns the measurements it removed as a [`MeasurementMap`],
//! so that sampled outcomes can later be routed to the right bits.
//!
//! Only end-of-circuit measurement is supported. A qubit that is touched
//! after being measured, or a gate that reads classical bits, makes the
//! whole circuit unsupported.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, instrument};

use qsv_ir::{Circuit, ClbitId, IrError, Operation, QubitId};

use crate::config::{BitReusePolicy, NormalizerConfig};
use crate::error::{NormalizeError, NormalizeResult};
use crate::measurement::MeasurementMap;

/// A pure circuit together with the measurements stripped from its source.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCircuit {
    circuit: Circuit,
    measurements: MeasurementMap,
}

impl NormalizedCircuit {
    /// The measurement-free, permutation-free circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Final qubit identity to classical bit.
    pub fn measurements(&self) -> &MeasurementMap {
        &self.measurements
    }

    /// Split into circuit and measurement map.
    pub fn into_parts(self) -> (Circuit, MeasurementMap) {
        (self.circuit, self.measurements)
    }
}

/// Converts circuits into the pure shape a state-vector backend executes.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    /// Create a normalizer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with an explicit configuration.
    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize `circuit`.
    ///
    /// Qubit references are translated through the implicit permutation
    /// before anything else, so the output circuit and the measurement map
    /// both use final qubit identities. Bits are never relabeled. The input
    /// is left untouched and nothing is returned on failure.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn run(&self, circuit: &Circuit) -> NormalizeResult<NormalizedCircuit> {
        let permutation = circuit.implicit_permutation();
        let final_of: FxHashMap<QubitId, QubitId> = circuit
            .qubits()
            .map(|q| (q, permutation.apply(q)))
            .collect();

        let mut pure = Circuit::new(circuit.name());
        for &qubit in final_of.values() {
            pure.declare_qubit(qubit);
        }
        for clbit in circuit.clbits() {
            pure.declare_clbit(clbit);
        }

        let mut measurements = MeasurementMap::new();
        let mut measured: FxHashSet<QubitId> = FxHashSet::default();

        for (index, command) in circuit.iter().enumerate() {
            let qubits = command
                .qubits
                .iter()
                .map(|q| {
                    final_of.get(q).copied().ok_or_else(|| IrError::QubitNotFound {
                        qubit: *q,
                        op_name: Some(command.name().to_string()),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(&qubit) = qubits.iter().find(|q| measured.contains(q)) {
                debug!("Rejecting command {}: {} already measured", index, qubit);
                return Err(NormalizeError::MidCircuitMeasurement {
                    qubit,
                    command_index: index,
                });
            }

            match &command.op {
                Operation::Measure => {
                    let (qubit, clbit) = match (qubits.as_slice(), command.clbits.as_slice()) {
                        ([qubit], [clbit]) => (*qubit, *clbit),
                        _ => {
                            return Err(IrError::MalformedMeasure {
                                qubits: qubits.len(),
                                clbits: command.clbits.len(),
                            }
                            .into());
                        }
                    };
                    self.record_measurement(&mut measurements, qubit, clbit)?;
                    measured.insert(qubit);
                }
                Operation::Gate(_) | Operation::Barrier => {
                    if command.has_clbits() {
                        debug!("Rejecting command {}: '{}' reads bits", index, command.name());
                        return Err(NormalizeError::UnsupportedClassicalOperation {
                            operation: command.name().to_string(),
                            command_index: index,
                        });
                    }
                    pure.push(command.map_qubits(|q| permutation.apply(q)))?;
                }
            }
        }

        pure.add_phase(circuit.phase());

        debug!(
            "Normalized {} commands: {} kept, {} measurements stripped",
            circuit.num_commands(),
            pure.num_commands(),
            measurements.len()
        );

        Ok(NormalizedCircuit {
            circuit: pure,
            measurements,
        })
    }

    fn record_measurement(
        &self,
        measurements: &mut MeasurementMap,
        qubit: QubitId,
        clbit: ClbitId,
    ) -> NormalizeResult<()> {
        if let Some(first) = measurements.qubit_for(clbit) {
            match self.config.bit_reuse {
                BitReusePolicy::Reject => {
                    return Err(NormalizeError::DuplicateMeasurementBit {
                        clbit,
                        first,
                        second: qubit,
                    });
                }
                BitReusePolicy::Overwrite => {
                    debug!("{} overwrites measurement of {} into {}", qubit, first, clbit);
                }
            }
        }
        measurements.insert(qubit, clbit);
        Ok(())
    }
}

/// Normalize `circuit` with the default configuration.
///
/// Returns the pure circuit and the map from final qubit identity to the
/// bit that receives its measurement.
pub fn normalize(circuit: &Circuit) -> NormalizeResult<(Circuit, MeasurementMap)> {
    Normalizer::new().run(circuit).map(NormalizedCircuit::into_parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsv_ir::{QubitPermutation, StandardGate};
    use std::f64::consts::PI;

    #[test]
    fn test_bell_strips_measurements() {
        let circuit = Circuit::bell().unwrap();
        let (pure, map) = normalize(&circuit).unwrap();

        assert!(pure.is_pure());
        assert_eq!(pure.num_commands(), 2);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(QubitId(0)), Some(ClbitId(0)));
        assert_eq!(map.get(QubitId(1)), Some(ClbitId(1)));
        assert_eq!(pure.name(), "bell");
        assert_eq!(pure.num_clbits(), 2);
    }

    #[test]
    fn test_input_untouched() {
        let mut circuit = Circuit::bell().unwrap();
        circuit.add_implicit_swap(QubitId(0), QubitId(1)).unwrap();
        let before = circuit.clone();
        normalize(&circuit).unwrap();
        assert_eq!(circuit, before);
    }

    #[test]
    fn test_three_cycle_permutation() {
        let mut circuit = Circuit::with_size("cycle", 3, 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(1), QubitId(2)).unwrap();
        circuit.measure(QubitId(2), ClbitId(0)).unwrap();
        circuit
            .set_implicit_permutation(
                QubitPermutation::from_pairs([
                    (QubitId(0), QubitId(1)),
                    (QubitId(1), QubitId(2)),
                    (QubitId(2), QubitId(0)),
                ])
                .unwrap(),
            )
            .unwrap();

        let (pure, map) = normalize(&circuit).unwrap();
        assert_eq!(pure.commands()[0].qubits, vec![QubitId(1)]);
        assert_eq!(pure.commands()[1].qubits, vec![QubitId(2), QubitId(0)]);
        assert_eq!(map.get(QubitId(0)), Some(ClbitId(0)));
        assert!(pure.implicit_permutation().is_identity());
    }

    #[test]
    fn test_barrier_passes_through() {
        let mut circuit = Circuit::with_size("barrier", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.barrier_all().unwrap();
        circuit.cz(QubitId(0), QubitId(1)).unwrap();

        let (pure, _) = normalize(&circuit).unwrap();
        assert_eq!(pure.count_ops("barrier"), 1);
        assert_eq!(pure.num_commands(), 3);
    }

    #[test]
    fn test_second_measurement_is_mid_circuit() {
        let mut circuit = Circuit::with_size("remeasure", 1, 2);
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(1)).unwrap();

        assert_eq!(
            normalize(&circuit).unwrap_err(),
            NormalizeError::MidCircuitMeasurement {
                qubit: QubitId(0),
                command_index: 1,
            }
        );
    }

    #[test]
    fn test_bit_reuse_rejected_by_default() {
        let mut circuit = Circuit::with_size("reuse", 2, 1);
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.measure(QubitId(1), ClbitId(0)).unwrap();

        assert_eq!(
            normalize(&circuit).unwrap_err(),
            NormalizeError::DuplicateMeasurementBit {
                clbit: ClbitId(0),
                first: QubitId(0),
                second: QubitId(1),
            }
        );
    }

    #[test]
    fn test_bit_reuse_overwrite_keeps_later_measurement() {
        let mut circuit = Circuit::with_size("reuse", 2, 1);
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.measure(QubitId(1), ClbitId(0)).unwrap();

        let normalizer = Normalizer::with_config(
            NormalizerConfig::new().with_bit_reuse(BitReusePolicy::Overwrite),
        );
        let normalized = normalizer.run(&circuit).unwrap();
        let map = normalized.measurements();
        assert_eq!(map.len(), 1);
        assert_eq!(map.qubit_for(ClbitId(0)), Some(QubitId(1)));
    }

    #[test]
    fn test_mid_circuit_error_reports_final_identity() {
        let mut circuit = Circuit::with_size("perm", 2, 1);
        circuit.measure(QubitId(1), ClbitId(0)).unwrap();
        circuit.x(QubitId(1)).unwrap();
        circuit.add_implicit_swap(QubitId(0), QubitId(1)).unwrap();

        assert!(matches!(
            normalize(&circuit),
            Err(NormalizeError::MidCircuitMeasurement { qubit: QubitId(0), command_index: 1 })
        ));
    }

    #[test]
    fn test_phase_copied() {
        let mut circuit = Circuit::with_size("phase", 1, 0);
        circuit.rz(PI / 3.0, QubitId(0)).unwrap();
        circuit.add_phase(1.25 * PI);
        let (pure, _) = normalize(&circuit).unwrap();
        assert_eq!(pure.phase(), circuit.phase());
        assert_eq!(
            pure.commands()[0].as_gate().map(|g| g.kind.clone()),
            Some(qsv_ir::GateKind::Standard(StandardGate::Rz(PI / 3.0)))
        );
    }
}
