//! Configuration Loading for the CU-CP
//!
//! Wraps `CuCpConfig` from `nextgsim-common` with validation and error
//! handling specific to the CU-CP application.
//!
//! # Example
//!
//! ```rust,ignore
//! use nextgsim_cucp::app::{load_cucp_config, validate_cucp_config};
//!
//! let config = load_cucp_config("config/cucp.yaml")?;
//! validate_cucp_config(&config)?;
//! ```

use std::path::Path;

use nextgsim_common::config::CuCpConfig;
use thiserror::Error;

/// Largest accepted per-UE task queue depth.
pub const MAX_UE_TASK_QUEUE_CAPACITY: usize = 1024;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ConfigValidationError),
}

/// Errors that can occur during configuration validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// UE task queue depth out of range
    #[error("Invalid UE task queue capacity: {0}")]
    InvalidQueueCapacity(String),
}

/// Loads a CU-CP configuration from a YAML file.
///
/// Only parsing is done here; call `validate_cucp_config` afterwards.
pub fn load_cucp_config<P: AsRef<Path>>(path: P) -> Result<CuCpConfig, ConfigError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    load_cucp_config_from_str(&contents)
}

/// Loads a CU-CP configuration from a YAML string.
pub fn load_cucp_config_from_str(yaml: &str) -> Result<CuCpConfig, ConfigError> {
    serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Validates a CU-CP configuration.
///
/// # Validation Rules
///
/// - UE task queue capacity must be between 1 and `MAX_UE_TASK_QUEUE_CAPACITY`
pub fn validate_cucp_config(config: &CuCpConfig) -> Result<(), ConfigValidationError> {
    if config.ue_task_queue_capacity == 0
        || config.ue_task_queue_capacity > MAX_UE_TASK_QUEUE_CAPACITY
    {
        return Err(ConfigValidationError::InvalidQueueCapacity(format!(
            "{} must be between 1 and {}",
            config.ue_task_queue_capacity, MAX_UE_TASK_QUEUE_CAPACITY
        )));
    }
    Ok(())
}
