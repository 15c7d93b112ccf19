//! Error types for decoder-dictionary handling

use thiserror::Error;

/// Errors that can occur while building a decoder dictionary
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// Invalid PID string format in a definition file
    #[error("invalid PID format: {0}")]
    InvalidPidFormat(String),

    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for dictionary operations
pub type DictionaryResult<T> = Result<T, DictionaryError>;

/// Parse a PID string (hex) to u8
///
/// Accepts formats: "0C", "0x0C", "0X0C", "0c"
pub fn parse_pid(s: &str) -> DictionaryResult<u8> {
    let s = s.trim().trim_start_matches("0x").trim_start_matches("0X");
    u8::from_str_radix(s, 16).map_err(|_| DictionaryError::InvalidPidFormat(s.to_string()))
}

/// Format a PID as hex string (uppercase, no prefix)
pub fn format_pid(pid: u8) -> String {
    format!("{:02X}", pid)
}
