//! Enumeration types for the club event log.
//!
//! Event kinds carry the numeric codes used in the text log. Codes 1-4
//! come from the input log; 11-13 are emitted only by the processor.

use core::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

/// The kind of a log record, identified by its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A client walked into the club (code 1).
    ClientArrived,
    /// A client sat down at a table (code 2).
    ClientSatAtTable,
    /// A client asked to wait for a free table (code 3).
    ClientWaiting,
    /// A client left the club (code 4).
    ClientLeft,
    /// A client was sent away: the waiting queue was full, or the day
    /// ended (code 11).
    ClientLeftQueueIdle,
    /// A waiting client was seated at a freed table (code 12).
    ClientSeated,
    /// A semantic error in response to an input event (code 13).
    Error,
}

impl EventKind {
    /// The numeric code written to the log.
    pub const fn code(self) -> u8 {
        match self {
            Self::ClientArrived => 1,
            Self::ClientSatAtTable => 2,
            Self::ClientWaiting => 3,
            Self::ClientLeft => 4,
            Self::ClientLeftQueueIdle => 11,
            Self::ClientSeated => 12,
            Self::Error => 13,
        }
    }

    /// Look up a kind by numeric code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::ClientArrived),
            2 => Some(Self::ClientSatAtTable),
            3 => Some(Self::ClientWaiting),
            4 => Some(Self::ClientLeft),
            11 => Some(Self::ClientLeftQueueIdle),
            12 => Some(Self::ClientSeated),
            13 => Some(Self::Error),
            _ => None,
        }
    }

    /// Whether this kind may appear in the input log.
    pub const fn is_input(self) -> bool {
        matches!(
            self,
            Self::ClientArrived | Self::ClientSatAtTable | Self::ClientWaiting | Self::ClientLeft
        )
    }

    /// Number of arguments an input record of this kind carries.
    pub const fn arity(self) -> usize {
        match self {
            Self::ClientSatAtTable | Self::ClientSeated => 2,
            Self::ClientArrived
            | Self::ClientWaiting
            | Self::ClientLeft
            | Self::ClientLeftQueueIdle
            | Self::Error => 1,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// Semantic errors
// ---------------------------------------------------------------------------

/// A non-fatal error: the input event was well-formed but not allowed in
/// the current club state.
///
/// Each variant is written to the log as an error record with its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SemanticError {
    /// Arrival outside opening hours.
    NotOpenYet,
    /// Arrival of a client who is already inside.
    YouShallNotPass,
    /// The client named by the event is not in the club.
    ClientUnknown,
    /// The requested table is taken.
    PlaceIsBusy,
    /// The client asked to wait while a table is free.
    #[serde(rename = "ICanWaitNoLonger!")]
    ICanWaitNoLonger,
}

impl SemanticError {
    /// The token written to the log.
    pub const fn token(self) -> &'static str {
        match self {
            Self::NotOpenYet => "NotOpenYet",
            Self::YouShallNotPass => "YouShallNotPass",
            Self::ClientUnknown => "ClientUnknown",
            Self::PlaceIsBusy => "PlaceIsBusy",
            Self::ICanWaitNoLonger => "ICanWaitNoLonger!",
        }
    }

    /// Look up an error by its log token.
    pub fn from_token(token: &str) -> Option<Self> {
        [
            Self::NotOpenYet,
            Self::YouShallNotPass,
            Self::ClientUnknown,
            Self::PlaceIsBusy,
            Self::ICanWaitNoLonger,
        ]
        .into_iter()
        .find(|e| e.token() == token)
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
