//! obd-j1979 - SAE J1979 ECU response decoding
//!
//! Decodes the positive responses an ECU returns to OBD-II diagnostic
//! requests: supported-PID bitmaps, emission data driven by an external
//! decoder dictionary, stored/pending/permanent DTCs, and the VIN.
//!
//! The decoder consumes already-reassembled ISO-TP payloads; transport,
//! request scheduling and negative responses (0x7F ...) are the transport
//! layer's concern.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use obd_conv::{DecoderDictionary, PidDefinition, SignalFormat};
//! use obd_j1979::{ObdDecoder, ServiceId};
//!
//! let mut dictionary = DecoderDictionary::new();
//! dictionary.register(
//!     0x0C,
//!     PidDefinition::new(2).with_signal(SignalFormat::new(2600, 0, 16).with_scaling(0.25, 0.0)),
//! );
//!
//! let decoder = ObdDecoder::with_dictionary(Arc::new(dictionary));
//!
//! // 0x41 = positive response to service 01, then the echoed PID and data
//! let info = decoder
//!     .decode_emission_pids(ServiceId::CurrentData, &[0x0C], &[0x41, 0x0C, 0x1A, 0xF8])
//!     .unwrap();
//! assert_eq!(info.values[&2600], 1726.0);
//!
//! let dtcs = decoder
//!     .decode_dtcs(ServiceId::StoredDtc, &[0x43, 0x01, 0x01, 0x23])
//!     .unwrap();
//! assert_eq!(dtcs.codes, vec!["P0123"]);
//! ```

pub mod decoder;
pub mod dtc;
pub mod error;
pub mod pid;
pub mod service;

pub use decoder::{EmissionInfo, ObdDecoder};
pub use dtc::{format_dtc, DtcDomain, DtcInfo};
pub use error::{DecodeError, DecodeResult};
pub use pid::{is_range_selector, Pid, PIDS_PER_RANGE, SUPPORTED_PID_SELECTORS};
pub use service::{ServiceId, POSITIVE_RESPONSE_BASE};

// Re-export the dictionary types for convenience
pub use obd_conv::{DecoderDictionary, PidDefinition, SignalFormat, SignalId};
