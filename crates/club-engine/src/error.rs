//! Error types for the club engine binary.
//!
//! [`EngineError`] wraps every failure `main` can hit so it can be
//! reported on stderr with a non-zero exit status.

use std::path::PathBuf;

/// Top-level error for the club engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Engine settings could not be loaded.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// The input log could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Input {
        /// Path of the input log.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The simulation aborted on malformed input.
    ///
    /// Displays as the offending line alone.
    #[error("{source}")]
    Fatal {
        /// The underlying fatal error.
        #[from]
        source: club_core::FatalError,
    },

    /// The report could not be serialized.
    #[error("failed to serialize report: {source}")]
    Json {
        /// The underlying serializer error.
        #[from]
        source: serde_json::Error,
    },
}
