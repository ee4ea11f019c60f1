//! Error types for the club engine.
//!
//! Two classes of failure exist and they never mix:
//!
//! - Semantic errors (club not open, unknown client, ...) are ordinary
//!   output records, see [`SemanticError`](club_types::SemanticError).
//!   They never appear here.
//! - Fatal errors abort the whole run. [`ClubError`] covers failures of the
//!   state machine itself; [`FatalError`] wraps everything a run over the
//!   text log can hit and carries the offending line.

use club_ledger::{LedgerAnomaly, LedgerError};
use club_types::TimeOfDay;

use crate::config::ConfigError;
use crate::validation::ValidationError;

/// Errors raised by the state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClubError {
    /// An event is earlier than the previously processed one.
    #[error("event at {got} is earlier than previous event at {previous}")]
    OutOfOrder {
        /// Time of the previously processed event.
        previous: TimeOfDay,
        /// Time of the rejected event.
        got: TimeOfDay,
    },

    /// Settling a session failed.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },

    /// A table total overflowed while accruing a session.
    #[error("arithmetic overflow accruing table {table_index}")]
    AccrualOverflow {
        /// Zero-based index of the table.
        table_index: usize,
    },

    /// A table index produced internally does not name a table.
    #[error("table index {0} out of range")]
    NoSuchTable(usize),

    /// The ledger does not match the accrued table totals at close.
    #[error("{0}")]
    Anomaly(LedgerAnomaly),
}

/// Errors that abort a run over the text log.
///
/// The [`Display`](core::fmt::Display) form of line-level variants is the
/// offending line itself, which is what the caller reports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FatalError {
    /// A header line is missing.
    #[error("missing header line: {what}")]
    MissingHeader {
        /// Which header line is missing.
        what: &'static str,
    },

    /// A header line is malformed.
    #[error("{line}")]
    InvalidHeader {
        /// The offending line.
        line: String,
        /// What is wrong with it.
        reason: HeaderError,
    },

    /// An event line failed validation.
    #[error("{line}")]
    InvalidEvent {
        /// The offending line.
        line: String,
        /// Which validation stage rejected it.
        reason: ValidationError,
    },

    /// An event line is earlier than the one before it.
    #[error("{line}")]
    OutOfOrder {
        /// The offending line.
        line: String,
        /// Time of the previous event.
        previous: TimeOfDay,
    },

    /// The state machine failed.
    #[error("club error: {source}")]
    Club {
        /// The underlying club error.
        #[from]
        source: ClubError,
    },
}

impl FatalError {
    /// The raw input line that caused the failure, if there is one.
    pub fn offending_line(&self) -> Option<&str> {
        match self {
            Self::InvalidHeader { line, .. }
            | Self::InvalidEvent { line, .. }
            | Self::OutOfOrder { line, .. } => Some(line),
            Self::MissingHeader { .. } | Self::Club { .. } => None,
        }
    }

    /// A diagnostic describing why the run was aborted.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::InvalidHeader { reason, .. } => reason.to_string(),
            Self::InvalidEvent { reason, .. } => reason.to_string(),
            Self::OutOfOrder { previous, .. } => {
                format!("event is earlier than previous event at {previous}")
            }
            Self::MissingHeader { .. } | Self::Club { .. } => self.to_string(),
        }
    }
}

/// Why a header line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    /// The line is not a non-empty run of ASCII digits that fits the field.
    #[error("expected a non-negative integer")]
    InvalidNumber,

    /// The opening or closing time does not parse.
    #[error("invalid opening hours: {0}")]
    InvalidTime(#[from] club_types::TimeParseError),

    /// The opening hours are not a valid window.
    #[error("invalid opening hours: {0}")]
    Config(#[from] ConfigError),
}
