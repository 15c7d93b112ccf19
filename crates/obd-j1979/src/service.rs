//! J1979 service identifiers

use serde::{Deserialize, Serialize};

/// Offset between a request SID and its positive-response byte
pub const POSITIVE_RESPONSE_BASE: u8 = 0x40;

/// J1979 diagnostic services handled by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ServiceId {
    /// Service 01 - current powertrain diagnostic data
    CurrentData = 0x01,
    /// Service 02 - freeze frame data
    FreezeFrame = 0x02,
    /// Service 03 - stored (confirmed) DTCs
    StoredDtc = 0x03,
    /// Service 04 - clear DTCs. Listed for namespace completeness; the
    /// decoder never builds requests, so no decode operation is attached.
    ClearDtc = 0x04,
    /// Service 07 - pending DTCs (current or last drive cycle)
    PendingDtc = 0x07,
    /// Service 09 - vehicle information (VIN, calibration IDs)
    VehicleInfo = 0x09,
    /// Service 0A - permanent DTCs
    PermanentDtc = 0x0A,
}

impl ServiceId {
    /// The raw request SID
    pub fn request_byte(self) -> u8 {
        self as u8
    }

    /// The byte a positive ECU response starts with (0x40 + SID)
    pub fn positive_response_byte(self) -> u8 {
        POSITIVE_RESPONSE_BASE + self as u8
    }

    /// Look up a service by its request SID
    pub fn from_repr(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(ServiceId::CurrentData),
            0x02 => Some(ServiceId::FreezeFrame),
            0x03 => Some(ServiceId::StoredDtc),
            0x04 => Some(ServiceId::ClearDtc),
            0x07 => Some(ServiceId::PendingDtc),
            0x09 => Some(ServiceId::VehicleInfo),
            0x0A => Some(ServiceId::PermanentDtc),
            _ => None,
        }
    }

    /// Check if this service reports DTCs
    pub fn reports_dtcs(self) -> bool {
        matches!(
            self,
            ServiceId::StoredDtc | ServiceId::PendingDtc | ServiceId::PermanentDtc
        )
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:02X}", *self as u8)
    }
}
