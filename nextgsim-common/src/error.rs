//! Error type of the shared nextgsim CU-CP helpers

use thiserror::Error;

/// Failures of the configuration (de)serialization helpers in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML could not be parsed or emitted.
    #[error("YAML error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}
