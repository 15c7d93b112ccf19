//! obd-conv - Decoder-dictionary driven conversion of OBD-II PID payloads
//!
//! A library describing, per Parameter ID (PID), how an ECU's response bytes
//! break down into numeric signals: record length, bit-level layout, and
//! scale/offset. The dictionary is consumed by a response decoder that walks
//! concatenated PID records.
//!
//! # Quick Start
//!
//! ```rust
//! use obd_conv::{DecoderDictionary, PidDefinition, SignalFormat};
//!
//! let mut dictionary = DecoderDictionary::new();
//!
//! // Engine RPM: 2 bytes, one 16-bit signal, physical = raw / 4
//! dictionary.register(
//!     0x0C,
//!     PidDefinition::new(2).with_signal(SignalFormat::new(2600, 0, 16).with_scaling(0.25, 0.0)),
//! );
//!
//! let signal = &dictionary.signals(0x0C).unwrap()[0];
//! assert_eq!(signal.decode(&[0x1A, 0xF8]), 1726.0);
//! ```
//!
//! # YAML Definition Files
//!
//! ```yaml
//! meta:
//!   name: Demo engine ECU
//!   version: "1.0"
//!
//! pids:
//!   0x05:
//!     size: 1
//!     signals:
//!       - id: 100          # coolant temperature
//!         first_bit: 0
//!         bits: 8
//!         offset: -40.0
//!
//!   0x0C:
//!     size: 2
//!     signals:
//!       - id: 2600         # engine RPM
//!         first_bit: 0
//!         bits: 16
//!         factor: 0.25
//! ```

pub mod definition;
pub mod dictionary;
pub mod error;

// Re-export main types
pub use definition::{PidDefinition, SignalFormat, SignalId};
pub use dictionary::{DecoderDictionary, DictionaryMeta};
pub use error::{format_pid, parse_pid, DictionaryError, DictionaryResult};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::definition::{PidDefinition, SignalFormat, SignalId};
    pub use crate::dictionary::DecoderDictionary;
    pub use crate::error::{DictionaryError, DictionaryResult};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_workflow() {
        let yaml = r#"
meta:
  name: Test ECU
  version: "1.0"

pids:
  0x03:
    size: 2
    signals:
      - id: 1
        first_bit: 0
        bits: 4
      - id: 2
        first_bit: 4
        bits: 4

  0x0C:
    size: 2
    signals:
      - id: 2600
        first_bit: 0
        bits: 16
        factor: 0.25
"#;

        let dictionary = DecoderDictionary::from_yaml(yaml).unwrap();
        assert_eq!(dictionary.len(), 2);

        // Fuel system status style nibble pair
        let signals = dictionary.signals(0x03).unwrap();
        assert_eq!(signals[0].decode(&[0xAB, 0x00]), 0x0B as f64);
        assert_eq!(signals[1].decode(&[0xAB, 0x00]), 0x0A as f64);

        // 16-bit RPM
        let rpm = &dictionary.signals(0x0C).unwrap()[0];
        assert_eq!(rpm.decode(&[0x1A, 0xF8]), 1726.0);
    }
}
