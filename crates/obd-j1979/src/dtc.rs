//! DTC (Diagnostic Trouble Code) decoding for services 03/07/0A
//!
//! J1979 reports each DTC as a 2-byte code; the canonical rendering is a
//! five-character string such as `P0123`.

use serde::Serialize;

use crate::service::ServiceId;

/// DTC domain selected by the top two bits of the first code byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DtcDomain {
    /// P codes - engine, transmission
    Powertrain,
    /// C codes - ABS, steering, suspension
    Chassis,
    /// B codes - airbags, climate control
    Body,
    /// U codes - bus communication
    Network,
}

impl DtcDomain {
    /// Get domain from the first byte of a 2-byte DTC
    pub fn from_first_byte(first_byte: u8) -> Self {
        match first_byte >> 6 {
            0 => DtcDomain::Powertrain,
            1 => DtcDomain::Chassis,
            2 => DtcDomain::Body,
            _ => DtcDomain::Network,
        }
    }

    /// Get domain prefix character
    pub fn prefix(&self) -> char {
        match self {
            DtcDomain::Powertrain => 'P',
            DtcDomain::Chassis => 'C',
            DtcDomain::Body => 'B',
            DtcDomain::Network => 'U',
        }
    }
}

impl std::fmt::Display for DtcDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DtcDomain::Powertrain => "powertrain",
            DtcDomain::Chassis => "chassis",
            DtcDomain::Body => "body",
            DtcDomain::Network => "network",
        };
        f.write_str(s)
    }
}

/// Format a 2-byte DTC as its five-character code string.
///
/// The first byte carries the domain (bits 7-6), the first digit (bits 5-4)
/// and the second digit (low nibble); the second byte carries the last two
/// digits, one per nibble.
pub fn format_dtc(first_byte: u8, second_byte: u8) -> String {
    format!(
        "{}{:01X}{:01X}{:01X}{:01X}",
        DtcDomain::from_first_byte(first_byte).prefix(),
        (first_byte & 0x30) >> 4,
        first_byte & 0x0F,
        second_byte >> 4,
        second_byte & 0x0F
    )
}

/// Decoded DTC response: the service echoed back plus the codes in payload
/// order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DtcInfo {
    /// Service the response answers (03, 07 or 0A)
    pub sid: ServiceId,
    /// Five-character DTC strings in payload order
    pub codes: Vec<String>,
}

impl DtcInfo {
    /// Number of reported codes
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check if the ECU reported no DTCs
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_from_first_byte() {
        assert_eq!(DtcDomain::from_first_byte(0x01), DtcDomain::Powertrain);
        assert_eq!(DtcDomain::from_first_byte(0x44), DtcDomain::Chassis);
        assert_eq!(DtcDomain::from_first_byte(0x92), DtcDomain::Body);
        assert_eq!(DtcDomain::from_first_byte(0xC1), DtcDomain::Network);
    }

    #[test]
    fn test_format_dtc_all_domains() {
        assert_eq!(format_dtc(0x01, 0x23), "P0123");
        assert_eq!(format_dtc(0x44, 0x20), "C0420");
        assert_eq!(format_dtc(0x92, 0x34), "B1234");
        assert_eq!(format_dtc(0xC1, 0x00), "U0100");
    }

    #[test]
    fn test_format_dtc_hex_digits_uppercase() {
        assert_eq!(format_dtc(0x0F, 0xAB), "P0FAB");
        assert_eq!(format_dtc(0x3F, 0xFF), "P3FFF");
    }

    #[test]
    fn test_format_dtc_shape() {
        // Every 2-byte pair renders as [PCBU][0-3] + three hex digits
        for first in [0x00u8, 0x37, 0x6A, 0x85, 0xB2, 0xDF, 0xFF] {
            for second in [0x00u8, 0x5C, 0xE9, 0xFF] {
                let code = format_dtc(first, second);
                let mut chars = code.chars();
                assert!(matches!(chars.next(), Some('P' | 'C' | 'B' | 'U')));
                assert!(matches!(chars.next(), Some('0'..='3')));
                assert!(chars.all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
                assert_eq!(code.len(), 5);
            }
        }
    }
}
