//! Common types and utilities for the nextgsim CU-CP
//!
//! This crate provides the identifiers, QoS types, configuration structures
//! and logging helpers shared by the NGAP, E1AP and F1AP message crates and
//! by the CU-CP procedures.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{CuCpConfig, DrbQosPolicy, PduSessionConfig, DEFAULT_UE_TASK_QUEUE_CAPACITY};
pub use error::Error;
pub use logging::{
    init_logging, init_logging_with_filter, log_interface_message, Direction, HexDump, Interface,
    LogLevel,
};
pub use types::*;
