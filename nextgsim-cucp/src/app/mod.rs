//! CU-CP application support
//!
//! Configuration loading and validation.

mod config_loader;

pub use config_loader::{
    load_cucp_config, load_cucp_config_from_str, validate_cucp_config, ConfigError,
    ConfigValidationError, MAX_UE_TASK_QUEUE_CAPACITY,
};
