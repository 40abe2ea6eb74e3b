//! qsv circuit preparation for state-vector backends
//!
//! A state-vector simulator executes pure circuits: unitary gates over a
//! fixed set of qubits, nothing else. This crate takes a general
//! [`qsv_ir::Circuit`] and prepares it for such a backend.
//!
//! # Components
//!
//! - [`Normalizer`], [`normalize`]: strip end-of-circuit measurements and
//!   resolve the implicit qubit permutation
//! - [`MeasurementMap`]: which classical bit each measured qubit feeds
//! - [`Capabilities`]: check a circuit against what a backend accepts
//! - [`ReadoutLayout`], [`Counts`]: turn sampled basis states back into
//!   classical bitstrings
//!
//! # Example
//!
//! ```rust
//! use qsv_compile::{BasisOrder, Capabilities, ReadoutLayout, normalize};
//! use qsv_ir::{Circuit, ClbitId, QubitId};
//!
//! let circuit = Circuit::bell().unwrap();
//! let (pure, measurements) = normalize(&circuit).unwrap();
//!
//! let backend = Capabilities::statevector("sv", 8);
//! backend.check(&pure).unwrap();
//! assert_eq!(measurements.get(QubitId(1)), Some(ClbitId(1)));
//!
//! let layout = ReadoutLayout::new(&pure, &measurements, BasisOrder::BigEndian).unwrap();
//! let counts = layout.counts([0b00, 0b11, 0b11]).unwrap();
//! assert_eq!(counts.get("11"), 2);
//! ```

pub mod capability;
pub mod config;
pub mod error;
pub mod measurement;
pub mod normalize;
pub mod results;

pub use capability::{Capabilities, GateSet};
pub use config::{BitReusePolicy, NormalizerConfig};
pub use error::{CapabilityError, NormalizeError, NormalizeResult, ReadoutError};
pub use measurement::MeasurementMap;
pub use normalize::{NormalizedCircuit, Normalizer, normalize};
pub use results::{BasisOrder, Counts, ReadoutLayout};
