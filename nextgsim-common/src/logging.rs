//! Logging infrastructure for the nextgsim CU-CP
//!
//! Configurable logging on top of `tracing`, plus helpers to trace the
//! messages exchanged with the CU-UP (E1AP), the DU (F1AP), the AMF (NGAP)
//! and the UE (RRC) with an optional hex dump of opaque containers.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level - most verbose
    Trace,
    /// Debug level
    Debug,
    /// Info level (default)
    #[default]
    Info,
    /// Warn level
    Warn,
    /// Error level - least verbose
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("unknown log level: {s}")),
        }
    }
}

/// Initialize the tracing subscriber with the specified log level.
///
/// Call once at startup. `RUST_LOG` takes precedence over `level`.
///
/// # Example
///
/// ```
/// use nextgsim_common::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Debug);
/// ```
pub fn init_logging(level: LogLevel) {
    init_logging_with_filter(&level.to_string());
}

/// Initialize logging with a custom filter string.
///
/// # Example
///
/// ```
/// use nextgsim_common::logging::init_logging_with_filter;
///
/// // Info everywhere, debug for the modification routine
/// init_logging_with_filter("info,nextgsim_cucp::routines=debug");
/// ```
pub fn init_logging_with_filter(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // A second initialization (e.g. from several tests) is not an error.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .try_init();
}

/// Protocol direction for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Incoming/received message
    Rx,
    /// Outgoing/transmitted message
    Tx,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Rx => write!(f, "RX"),
            Direction::Tx => write!(f, "TX"),
        }
    }
}

/// Interfaces terminated by the CU-CP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface {
    /// N2 towards the AMF
    Ngap,
    /// E1 towards the CU-UP
    E1ap,
    /// F1-C towards the DU
    F1ap,
    /// RRC towards the UE
    Rrc,
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interface::Ngap => write!(f, "NGAP"),
            Interface::E1ap => write!(f, "E1AP"),
            Interface::F1ap => write!(f, "F1AP"),
            Interface::Rrc => write!(f, "RRC"),
        }
    }
}

/// Log a message exchanged on one of the CU-CP interfaces.
///
/// The summary goes out at debug level; when `container` is non-empty its hex
/// dump follows at trace level.
///
/// # Example
///
/// ```
/// use nextgsim_common::logging::{log_interface_message, Direction, Interface};
///
/// log_interface_message(Interface::E1ap, Direction::Tx, 7, "BearerContextModificationRequest", &[]);
/// ```
pub fn log_interface_message(
    interface: Interface,
    direction: Direction,
    ue_index: u64,
    msg_type: &str,
    container: &[u8],
) {
    tracing::debug!(
        interface = %interface,
        direction = %direction,
        ue = ue_index,
        "ue={} {} {} {}",
        ue_index,
        direction,
        interface,
        msg_type
    );
    if !container.is_empty() {
        tracing::trace!(
            interface = %interface,
            len = container.len(),
            hex = %HexDump(container),
            "{} container",
            interface
        );
    }
}

/// Wrapper for hex dump formatting
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
