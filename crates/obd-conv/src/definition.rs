//! Per-PID decode rules
//!
//! Describes how the data bytes of one PID break down into signals.

use serde::{Deserialize, Serialize};

/// Identifier of a decoded signal, opaque to the decoder.
///
/// Assigned by whoever provisions the dictionary; the decoder only carries
/// it through to the output map.
pub type SignalId = u32;

/// Layout and scaling of one signal embedded in a PID's data bytes
///
/// `first_bit` is a zero-based bit index counted from the most significant
/// bit of the first data byte outward, so bit 0 of a 2-byte record names
/// the MSB of byte 0 and bit 15 the LSB of byte 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalFormat {
    /// Signal identifier surfaced in the decode output
    #[serde(rename = "id")]
    pub signal_id: SignalId,

    /// First bit of the field within the PID's data bytes
    #[serde(rename = "first_bit", default)]
    pub first_bit_position: u16,

    /// Width of the field in bits
    #[serde(rename = "bits")]
    pub size_in_bits: u16,

    /// Scale factor: physical = raw * factor + offset
    #[serde(default = "default_factor")]
    pub factor: f64,

    /// Offset: physical = raw * factor + offset
    #[serde(default)]
    pub offset: f64,
}

fn default_factor() -> f64 {
    1.0
}

impl SignalFormat {
    /// Create an unscaled signal layout
    pub fn new(signal_id: SignalId, first_bit_position: u16, size_in_bits: u16) -> Self {
        Self {
            signal_id,
            first_bit_position,
            size_in_bits,
            factor: 1.0,
            offset: 0.0,
        }
    }

    /// Add scale/offset
    pub fn with_scaling(mut self, factor: f64, offset: f64) -> Self {
        self.factor = factor;
        self.offset = offset;
        self
    }

    /// Check this layout against a PID record of `len_bytes` data bytes.
    ///
    /// Passes iff the bit range lies inside the record, fields of a byte or
    /// wider are byte-aligned in both position and width, and the width fits
    /// the 64-bit accumulator used by [`extract_raw`](Self::extract_raw).
    pub fn is_valid_for(&self, len_bytes: usize) -> bool {
        let total_bits = len_bytes * 8;
        let first = self.first_bit_position as usize;
        let width = self.size_in_bits as usize;

        (1..=64).contains(&width)
            && first < total_bits
            && first + width <= total_bits
            && (width < 8 || (width % 8 == 0 && first % 8 == 0))
    }

    /// Extract the raw field value from one PID's data bytes.
    ///
    /// `window` is exactly the record's `size_in_bytes` bytes; callers must
    /// have checked [`is_valid_for`](Self::is_valid_for) first.
    ///
    /// Sub-byte fields are shifted right by `first_bit % 8` and masked, so
    /// they anchor at the low end of their byte. Wider fields concatenate
    /// whole bytes big-endian.
    pub fn extract_raw(&self, window: &[u8]) -> u64 {
        let byte_index = (self.first_bit_position / 8) as usize;
        if self.size_in_bits < 8 {
            let raw = window[byte_index] >> (self.first_bit_position % 8);
            u64::from(raw & (0xFF >> (8 - self.size_in_bits)))
        } else {
            let num_bytes = (self.size_in_bits / 8) as usize;
            window[byte_index..byte_index + num_bytes]
                .iter()
                .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
        }
    }

    /// Apply scaling and offset to a raw field value
    pub fn apply(&self, raw: u64) -> f64 {
        raw as f64 * self.factor + self.offset
    }

    /// Extract and scale in one step
    pub fn decode(&self, window: &[u8]) -> f64 {
        self.apply(self.extract_raw(window))
    }
}

/// Complete decode rule for a single PID
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PidDefinition {
    /// Number of data bytes the ECU returns for this PID
    #[serde(rename = "size")]
    pub size_in_bytes: usize,

    /// Signals embedded in the data bytes, in declaration order.
    ///
    /// Order matters when two formats share a `signal_id`: the last one
    /// decoded wins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<SignalFormat>,
}

impl PidDefinition {
    /// Create a definition with no signals
    pub fn new(size_in_bytes: usize) -> Self {
        Self {
            size_in_bytes,
            signals: Vec::new(),
        }
    }

    /// Append a signal layout
    pub fn with_signal(mut self, signal: SignalFormat) -> Self {
        self.signals.push(signal);
        self
    }

    /// Record length in bits
    pub fn size_in_bits(&self) -> usize {
        self.size_in_bytes * 8
    }
}
