//! Normalizer configuration.

use serde::{Deserialize, Serialize};

/// What to do when two measurements write the same classical bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitReusePolicy {
    /// Fail with `DuplicateMeasurementBit`.
    #[default]
    Reject,
    /// Keep the later measurement and drop the earlier entry.
    Overwrite,
}

/// Options for [`Normalizer`](crate::Normalizer).
///
/// Missing fields deserialize to their defaults, so an empty document is a
/// valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Handling of classical bits shared between measurements.
    pub bit_reuse: BitReusePolicy,
}

impl NormalizerConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bit reuse policy.
    #[must_use]
    pub fn with_bit_reuse(mut self, policy: BitReusePolicy) -> Self {
        self.bit_reuse = policy;
        self
    }
}
