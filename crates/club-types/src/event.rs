//! Input events and output log records.
//!
//! An [`Event`] is one validated line of the input log. An
//! [`OutputRecord`] is one line of the derived log: either an input event
//! echoed verbatim, or a record generated by the processor.
//!
//! Both render with [`Display`](core::fmt::Display) in the log line
//! format `HH:MM <code> [args...]`.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::{EventKind, SemanticError};
use crate::ids::{ClientName, TableNumber};
use crate::time::TimeOfDay;

/// What happened in an input event, with its typed arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventAction {
    /// The client walked in.
    ClientArrived {
        /// Who arrived.
        client: ClientName,
    },
    /// The client sat down at a table, possibly moving from another one.
    ClientSatAtTable {
        /// Who sat down.
        client: ClientName,
        /// The 1-based table number as written in the log.
        table: TableNumber,
    },
    /// The client asked to wait for a table.
    ClientWaiting {
        /// Who is waiting.
        client: ClientName,
    },
    /// The client left.
    ClientLeft {
        /// Who left.
        client: ClientName,
    },
}

impl EventAction {
    /// The log kind of this action.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::ClientArrived { .. } => EventKind::ClientArrived,
            Self::ClientSatAtTable { .. } => EventKind::ClientSatAtTable,
            Self::ClientWaiting { .. } => EventKind::ClientWaiting,
            Self::ClientLeft { .. } => EventKind::ClientLeft,
        }
    }

    /// The client the action is about.
    pub const fn client(&self) -> &ClientName {
        match self {
            Self::ClientArrived { client }
            | Self::ClientSatAtTable { client, .. }
            | Self::ClientWaiting { client }
            | Self::ClientLeft { client } => client,
        }
    }
}

/// One validated input event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// When the event happened.
    pub time: TimeOfDay,
    /// What happened.
    pub action: EventAction,
}

impl Event {
    /// Create an event.
    pub const fn new(time: TimeOfDay, action: EventAction) -> Self {
        Self { time, action }
    }

    /// Shorthand for [`EventAction::ClientArrived`].
    pub const fn arrived(time: TimeOfDay, client: ClientName) -> Self {
        Self::new(time, EventAction::ClientArrived { client })
    }

    /// Shorthand for [`EventAction::ClientSatAtTable`].
    pub const fn sat(time: TimeOfDay, client: ClientName, table: TableNumber) -> Self {
        Self::new(time, EventAction::ClientSatAtTable { client, table })
    }

    /// Shorthand for [`EventAction::ClientWaiting`].
    pub const fn waiting(time: TimeOfDay, client: ClientName) -> Self {
        Self::new(time, EventAction::ClientWaiting { client })
    }

    /// Shorthand for [`EventAction::ClientLeft`].
    pub const fn left(time: TimeOfDay, client: ClientName) -> Self {
        Self::new(time, EventAction::ClientLeft { client })
    }

    /// The log kind of this event.
    pub const fn kind(&self) -> EventKind {
        self.action.kind()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time, self.kind())?;
        match &self.action {
            EventAction::ClientSatAtTable { client, table } => write!(f, " {client} {table}"),
            EventAction::ClientArrived { client }
            | EventAction::ClientWaiting { client }
            | EventAction::ClientLeft { client } => write!(f, " {client}"),
        }
    }
}

/// One line of the derived log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputRecord {
    /// An input event, echoed as it was accepted.
    Input {
        /// The echoed event.
        event: Event,
    },
    /// The client was sent away (code 11): the queue was full, or the
    /// club closed with the client still inside.
    ClientLeftQueueIdle {
        /// When the client was sent away.
        time: TimeOfDay,
        /// Who was sent away.
        client: ClientName,
    },
    /// A waiting client took a freed table (code 12).
    ClientSeated {
        /// When the client was seated.
        time: TimeOfDay,
        /// Who was seated.
        client: ClientName,
        /// The table taken.
        table: TableNumber,
    },
    /// A semantic error in response to the preceding input event (code 13).
    Error {
        /// Time of the offending event.
        time: TimeOfDay,
        /// What went wrong.
        error: SemanticError,
    },
}

impl OutputRecord {
    /// The time stamp of the record.
    pub const fn time(&self) -> TimeOfDay {
        match self {
            Self::Input { event } => event.time,
            Self::ClientLeftQueueIdle { time, .. }
            | Self::ClientSeated { time, .. }
            | Self::Error { time, .. } => *time,
        }
    }

    /// The log kind of the record.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Input { event } => event.kind(),
            Self::ClientLeftQueueIdle { .. } => EventKind::ClientLeftQueueIdle,
            Self::ClientSeated { .. } => EventKind::ClientSeated,
            Self::Error { .. } => EventKind::Error,
        }
    }

    /// Whether the record was generated by the processor rather than echoed.
    pub const fn is_derived(&self) -> bool {
        !matches!(self, Self::Input { .. })
    }
}

impl From<Event> for OutputRecord {
    fn from(event: Event) -> Self {
        Self::Input { event }
    }
}

impl fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input { event } => fmt::Display::fmt(event, f),
            Self::ClientLeftQueueIdle { time, client } => {
                write!(f, "{time} {} {client}", EventKind::ClientLeftQueueIdle)
            }
            Self::ClientSeated {
                time,
                client,
                table,
            } => write!(f, "{time} {} {client} {table}", EventKind::ClientSeated),
            Self::Error { time, error } => write!(f, "{time} {} {error}", EventKind::Error),
        }
    }
}
