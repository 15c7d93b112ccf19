//! Decoder dictionary - the container for per-PID decode rules
//!
//! Provides lookup by PID (u8) for the response decoders. A dictionary is
//! built once (programmatically or from YAML), then published behind an
//! `Arc` and never mutated; swapping in updated rules means building a new
//! dictionary and replacing the reference.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::definition::{PidDefinition, SignalFormat};
use crate::error::{format_pid, parse_pid, DictionaryResult};

/// PID-indexed set of decode rules
#[derive(Debug, Clone, Default)]
pub struct DecoderDictionary {
    /// Map of PID → decode rule
    pids: HashMap<u8, PidDefinition>,
    /// Metadata about the definition set
    meta: DictionaryMeta,
}

/// Metadata about a dictionary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryMeta {
    /// Name of the definition set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Version string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DecoderDictionary {
    /// Create a new empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dictionary with metadata
    pub fn with_meta(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            pids: HashMap::new(),
            meta: DictionaryMeta {
                name: Some(name.into()),
                version: Some(version.into()),
                description: None,
            },
        }
    }

    /// Load definitions from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> DictionaryResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load definitions from a YAML string
    pub fn from_yaml(yaml: &str) -> DictionaryResult<Self> {
        let file: DefinitionFile = serde_yaml::from_str(yaml)?;
        let mut dictionary = Self::new();

        if let Some(meta) = file.meta {
            dictionary.meta = meta;
        }

        if let Some(pids) = file.pids {
            for (pid_str, def) in pids {
                let pid = parse_pid(&pid_str)?;
                dictionary.register(pid, def);
            }
        }

        Ok(dictionary)
    }

    /// Register a decode rule for a PID, replacing any existing rule
    pub fn register(&mut self, pid: u8, def: PidDefinition) {
        self.pids.insert(pid, def);
    }

    /// Check if a PID has a decode rule
    pub fn contains(&self, pid: u8) -> bool {
        self.pids.contains_key(&pid)
    }

    /// Get the decode rule for a PID
    pub fn get(&self, pid: u8) -> Option<&PidDefinition> {
        self.pids.get(&pid)
    }

    /// Get the declared response length of a PID in bytes
    pub fn size_in_bytes(&self, pid: u8) -> Option<usize> {
        self.pids.get(&pid).map(|def| def.size_in_bytes)
    }

    /// Get the signals embedded in a PID, in declaration order
    pub fn signals(&self, pid: u8) -> Option<&[SignalFormat]> {
        self.pids.get(&pid).map(|def| def.signals.as_slice())
    }

    /// Iterate over the registered PIDs
    pub fn pids(&self) -> impl Iterator<Item = u8> + '_ {
        self.pids.keys().copied()
    }

    /// Number of registered PIDs
    pub fn len(&self) -> usize {
        self.pids.len()
    }

    /// Check if the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
    }

    /// Get metadata
    pub fn meta(&self) -> &DictionaryMeta {
        &self.meta
    }

    /// Set metadata
    pub fn set_meta(&mut self, meta: DictionaryMeta) {
        self.meta = meta;
    }

    /// Export definitions to YAML
    pub fn to_yaml(&self) -> DictionaryResult<String> {
        let pids = self
            .pids
            .iter()
            .map(|(&pid, def)| (format!("0x{}", format_pid(pid)), def.clone()))
            .collect();

        let file = DefinitionFile {
            meta: Some(self.meta.clone()),
            pids: Some(pids),
        };

        Ok(serde_yaml::to_string(&file)?)
    }
}

/// YAML file structure for definitions
#[derive(Debug, Serialize, Deserialize)]
struct DefinitionFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<DictionaryMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pids: Option<HashMap<String, PidDefinition>>,
}
