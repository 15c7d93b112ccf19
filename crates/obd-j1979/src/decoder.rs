//! Decoding of positive ECU responses
//!
//! Every J1979 positive response starts with `0x40 + SID`; the body layout
//! then depends on the service. [`ObdDecoder`] routes the shared envelope
//! check into four body decoders: supported-PID bitmaps, emission data,
//! DTC lists, and the VIN.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{trace, warn};

use obd_conv::{DecoderDictionary, SignalId};

use crate::dtc::{format_dtc, DtcInfo};
use crate::error::{DecodeError, DecodeResult};
use crate::pid::{self, Pid};
use crate::service::ServiceId;

/// Minimum supported-PID payload: response byte + selector + 4 bitmap bytes
const MIN_SUPPORTED_PID_RESPONSE_LEN: usize = 6;
/// Minimum emission payload: response byte + PID + one data byte
const MIN_EMISSION_RESPONSE_LEN: usize = 3;
/// Minimum DTC payload: response byte + count byte
const MIN_DTC_RESPONSE_LEN: usize = 2;
/// Minimum VIN payload: response byte + info type + item count
const MIN_VIN_RESPONSE_LEN: usize = 3;

/// Decoded emission response: the service echoed back plus one value per
/// decoded signal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionInfo {
    /// Service the response answers (01 or 02)
    pub sid: ServiceId,
    /// Decoded physical values keyed by signal identifier
    pub values: HashMap<SignalId, f64>,
}

/// Stateless decoder for J1979 positive responses.
///
/// The only state is a reference to the current decoder dictionary, shared
/// immutably; swapping rules between calls means publishing a new `Arc`.
/// One decode call consumes one ISO-TP-reassembled payload.
#[derive(Debug, Clone, Default)]
pub struct ObdDecoder {
    dictionary: Option<Arc<DecoderDictionary>>,
}

impl ObdDecoder {
    /// Create a decoder with no dictionary installed.
    ///
    /// Supported-PID, DTC and VIN decoding work without one; emission
    /// decoding requires [`set_decoder_dictionary`](Self::set_decoder_dictionary).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with a dictionary installed
    pub fn with_dictionary(dictionary: Arc<DecoderDictionary>) -> Self {
        Self {
            dictionary: Some(dictionary),
        }
    }

    /// Replace the decoder dictionary.
    ///
    /// Takes effect for the next decode call; in-flight calls are
    /// unaffected since the previous dictionary stays alive behind its
    /// own `Arc`.
    pub fn set_decoder_dictionary(&mut self, dictionary: Arc<DecoderDictionary>) {
        self.dictionary = Some(dictionary);
    }

    /// Get the installed dictionary, if any
    pub fn dictionary(&self) -> Option<&Arc<DecoderDictionary>> {
        self.dictionary.as_ref()
    }

    /// Decode a supported-PID bitmap response (services 01/02, selector PIDs).
    ///
    /// The body is a sequence of 5-byte records: one range-selector PID
    /// followed by 4 bitmap bytes covering the 32 PIDs above the selector.
    /// Returns the advertised PIDs sorted ascending, with the selectors
    /// themselves and numbers outside the service's namespace discarded.
    pub fn decode_supported_pids(&self, sid: ServiceId, data: &[u8]) -> DecodeResult<Vec<Pid>> {
        if data.len() < MIN_SUPPORTED_PID_RESPONSE_LEN || data[0] != sid.positive_response_byte() {
            warn!("invalid supported-PID response for service {sid}");
            return Err(DecodeError::InvalidEnvelope(sid.request_byte()));
        }

        let mut supported = Vec::new();
        // 1-based count of range selectors seen so far; selectors sit at
        // payload indices 1, 6, 11, ...
        let mut range_index = 0;
        for (i, &byte) in data.iter().enumerate().skip(1) {
            if i % 5 == 1 {
                range_index += 1;
                continue;
            }
            for j in 0..8 {
                if byte & (1 << j) != 0 {
                    // MSB of the first bitmap byte after selector R advertises
                    // PID R+1, so the LSB-first bit j maps to this number.
                    let number = (i - range_index) * 8 - j;
                    if let Some(pid) = pid::resolve_supported_pid(sid, number) {
                        supported.push(pid);
                    }
                }
            }
        }

        supported.sort_unstable();
        supported.dedup();

        if supported.is_empty() {
            return Err(DecodeError::EmptyDecode);
        }
        Ok(supported)
    }

    /// Decode an emission-data response (services 01/02).
    ///
    /// `pids` is the request echo the decoder expects to see back, in order.
    /// The payload must match it exactly against the dictionary's declared
    /// record lengths before any extraction happens; a dictionary miss
    /// mid-walk aborts the rest of the payload but keeps the signals already
    /// decoded.
    pub fn decode_emission_pids(
        &self,
        sid: ServiceId,
        pids: &[Pid],
        data: &[u8],
    ) -> DecodeResult<EmissionInfo> {
        if data.len() < MIN_EMISSION_RESPONSE_LEN || data[0] != sid.positive_response_byte() {
            warn!("invalid response to PID request for service {sid}");
            return Err(DecodeError::InvalidEnvelope(sid.request_byte()));
        }
        let dictionary = self.dictionary.as_deref().ok_or_else(|| {
            warn!("emission decode requested with no decoder dictionary");
            DecodeError::MissingDictionary
        })?;
        if !is_pid_response_valid(dictionary, pids, data) {
            warn!("PID response for service {sid} does not match the request");
            return Err(DecodeError::InvalidResponseShape);
        }

        let mut values = HashMap::new();
        if let Err(unknown) = decode_pid_records(dictionary, data, &mut values) {
            // Alignment is lost at the unknown PID; keep what was decoded
            // before it.
            if values.is_empty() {
                return Err(DecodeError::UnknownPid(unknown));
            }
        }

        if values.is_empty() {
            return Err(DecodeError::EmptyDecode);
        }
        Ok(EmissionInfo { sid, values })
    }

    /// Decode a DTC response (services 03/07/0A).
    ///
    /// The body is a count byte followed by `count` 2-byte codes. A zero
    /// count is a successful, empty report.
    pub fn decode_dtcs(&self, sid: ServiceId, data: &[u8]) -> DecodeResult<DtcInfo> {
        if data.len() < MIN_DTC_RESPONSE_LEN || data[0] != sid.positive_response_byte() {
            return Err(DecodeError::InvalidEnvelope(sid.request_byte()));
        }

        let count = data[1] as usize;
        if count == 0 {
            return Ok(DtcInfo {
                sid,
                codes: Vec::new(),
            });
        }

        if data.len() != 2 + 2 * count {
            // Corrupt frame
            return Err(DecodeError::InvalidResponseShape);
        }

        let codes = data[2..]
            .chunks_exact(2)
            .map(|pair| format_dtc(pair[0], pair[1]))
            .collect();

        Ok(DtcInfo { sid, codes })
    }

    /// Decode a VIN response (service 09, info type 02).
    ///
    /// The byte after the info type counts data items and is skipped; the
    /// rest of the payload is the VIN. No character-set validation happens
    /// at this layer: bytes that are not valid UTF-8 come through as
    /// replacement characters instead of failing the decode.
    pub fn decode_vin(&self, data: &[u8]) -> DecodeResult<String> {
        let sid = ServiceId::VehicleInfo;
        if data.len() < MIN_VIN_RESPONSE_LEN
            || data[0] != sid.positive_response_byte()
            || data[1] != pid::vehicle_info::VIN
        {
            return Err(DecodeError::InvalidEnvelope(sid.request_byte()));
        }

        let vin = String::from_utf8_lossy(&data[3..]).into_owned();
        if vin.is_empty() {
            return Err(DecodeError::EmptyDecode);
        }
        Ok(vin)
    }
}

/// Check that a payload echoes the expected PIDs, in order, with exactly the
/// record lengths the dictionary declares.
///
/// A mismatch anywhere means the payload cannot be walked safely: once a
/// record boundary is wrong every later PID byte would be misread.
fn is_pid_response_valid(dictionary: &DecoderDictionary, pids: &[Pid], data: &[u8]) -> bool {
    let mut index = 1;
    for &pid in pids {
        if index >= data.len() || data[index] != pid {
            warn!("cannot find PID 0x{pid:02X} in ECU response");
            return false;
        }
        match dictionary.size_in_bytes(pid) {
            Some(size) => index += size + 1,
            None => {
                warn!("PID 0x{pid:02X} not found in decoder dictionary");
                return false;
            }
        }
    }
    if index != data.len() {
        warn!(
            "expected response length {index}, actual response length {}",
            data.len()
        );
    }
    index == data.len()
}

/// Walk the concatenated PID records of an emission payload.
///
/// Starts past the response byte, reading one PID byte then its declared
/// data window per record. Each formula that passes validation contributes
/// one value; a later formula with the same signal id overwrites an earlier
/// one. Returns the offending PID if a record has no dictionary entry -
/// alignment is lost at that point, so the rest of the payload is dropped.
fn decode_pid_records(
    dictionary: &DecoderDictionary,
    data: &[u8],
    values: &mut HashMap<SignalId, f64>,
) -> Result<(), Pid> {
    let mut cursor = 1;
    while cursor < data.len() {
        let pid = data[cursor];
        cursor += 1;

        let Some(definition) = dictionary.get(pid) else {
            trace!("PID 0x{pid:02X} missing in decoder dictionary, dropping rest of payload");
            return Err(pid);
        };

        let len = definition.size_in_bytes;
        if cursor + len > data.len() {
            // Truncated record: stop instead of overshooting the cursor.
            break;
        }

        let window = &data[cursor..cursor + len];
        for signal in &definition.signals {
            if signal.is_valid_for(len) {
                values.insert(signal.signal_id, signal.decode(window));
            }
        }
        cursor += len;
    }
    Ok(())
}
