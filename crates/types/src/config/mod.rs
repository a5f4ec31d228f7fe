// Path: crates/types/src/config/mod.rs

//! Configuration structures for the contract call executor.
use crate::error::ContractError;
use crate::{MAX_CALL_ARGS_BYTES, MAX_RECORD_BYTES};
use serde::{Deserialize, Serialize};

/// Limits and switches applied to every contract call.
///
/// Typically loaded from the `[execution]` table of a node's TOML config:
///
/// ```toml
/// [execution]
/// max_args_bytes = 65536
/// max_record_bytes = 262144
/// log_calls = true
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// The largest raw argument buffer a call may carry.
    #[serde(default = "default_max_args_bytes")]
    pub max_args_bytes: usize,
    /// The largest packed value a single storage write may carry.
    #[serde(default = "default_max_record_bytes")]
    pub max_record_bytes: usize,
    /// Emit an `info` event for every completed call.
    #[serde(default = "default_log_calls")]
    pub log_calls: bool,
}

fn default_max_args_bytes() -> usize {
    MAX_CALL_ARGS_BYTES
}
fn default_max_record_bytes() -> usize {
    MAX_RECORD_BYTES
}
fn default_log_calls() -> bool {
    true
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            max_args_bytes: default_max_args_bytes(),
            max_record_bytes: default_max_record_bytes(),
            log_calls: default_log_calls(),
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    execution: ExecutionConfig,
}

impl ExecutionConfig {
    /// Parses the `[execution]` table out of a TOML document. A missing table
    /// yields the defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, String> {
        let file: ConfigFile = toml::from_str(s).map_err(|e| e.to_string())?;
        file.execution.validate()?;
        Ok(file.execution)
    }

    /// Checks that the limits are usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_args_bytes == 0 {
            return Err("max_args_bytes must be greater than zero".into());
        }
        if self.max_record_bytes == 0 {
            return Err("max_record_bytes must be greater than zero".into());
        }
        Ok(())
    }

    /// Rejects an argument buffer larger than `max_args_bytes`.
    pub fn check_args_len(&self, len: usize) -> Result<(), ContractError> {
        if len > self.max_args_bytes {
            return Err(ContractError::ArgsTooLarge {
                limit: self.max_args_bytes,
                got: len,
            });
        }
        Ok(())
    }
}
