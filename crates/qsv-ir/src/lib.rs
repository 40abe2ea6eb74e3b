//! qsv circuit model
//!
//! Circuits in this crate are flat command lists in program order, with a
//! global phase and an implicit qubit permutation left behind by routing.
//! They are the input of the normalizer in `qsv-compile`, which turns them
//! into the pure, measurement-free shape a state-vector backend accepts.
//!
//! # Core Components
//!
//! - [`QubitId`], [`ClbitId`]: identifiers for quantum and classical registers
//! - [`StandardGate`], [`CustomGate`], [`Gate`]: unitary operations
//! - [`Operation`], [`Command`]: operations bound to operands
//! - [`QubitPermutation`]: implicit relabeling, original to final identity
//! - [`Circuit`]: builder that validates every command it receives
//!
//! # Example
//!
//! ```rust
//! use qsv_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! // Routing decided to relabel the two wires instead of swapping them.
//! circuit.add_implicit_swap(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_commands(), 4);
//! assert!(!circuit.is_pure());
//! ```

pub mod circuit;
pub mod command;
pub mod error;
pub mod gate;
pub mod permutation;
pub mod qubit;

pub use circuit::Circuit;
pub use command::{Command, Operation};
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, GateKind, StandardGate};
pub use permutation::QubitPermutation;
pub use qubit::{ClbitId, QubitId};
