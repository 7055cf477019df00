//! Configuration structures for the CU-CP
//!
//! ```yaml
//! log_level: info
//! ue_task_queue_capacity: 16
//! pdu_session:
//!   drb_qos_policy: first_flow
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::logging::LogLevel;

/// Default depth of each per-UE task queue.
pub const DEFAULT_UE_TASK_QUEUE_CAPACITY: usize = 16;

/// How the DRB-wide QoS is derived when several QoS flows map to one DRB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrbQosPolicy {
    /// 5QI, ARP and GBR of the lowest-QFI acknowledged flow.
    #[default]
    FirstFlow,
    /// 5QI and ARP of the lowest-QFI acknowledged flow, GBR/MBR summed over
    /// every acknowledged GBR flow of the DRB.
    AggregateGbr,
}

impl fmt::Display for DrbQosPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrbQosPolicy::FirstFlow => write!(f, "first_flow"),
            DrbQosPolicy::AggregateGbr => write!(f, "aggregate_gbr"),
        }
    }
}

/// PDU session procedure settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PduSessionConfig {
    /// DRB QoS derivation on modification
    #[serde(default)]
    pub drb_qos_policy: DrbQosPolicy,
}

/// CU-CP configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuCpConfig {
    /// Default log level (overridden by `RUST_LOG`)
    #[serde(default)]
    pub log_level: LogLevel,
    /// Depth of each per-UE task queue
    #[serde(default = "default_ue_task_queue_capacity")]
    pub ue_task_queue_capacity: usize,
    /// PDU session procedure settings
    #[serde(default)]
    pub pdu_session: PduSessionConfig,
}

fn default_ue_task_queue_capacity() -> usize {
    DEFAULT_UE_TASK_QUEUE_CAPACITY
}

impl Default for CuCpConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            ue_task_queue_capacity: DEFAULT_UE_TASK_QUEUE_CAPACITY,
            pdu_session: PduSessionConfig::default(),
        }
    }
}

impl CuCpConfig {
    /// Parses a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a YAML configuration file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serializes the configuration to YAML.
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}
