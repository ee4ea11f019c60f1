//! Settled-session entries and their builder.
//!
//! A [`SessionEntry`] is the immutable record of one table session. The
//! [`SessionBuilder`] computes the duration and charge from the session
//! bounds, so an entry can never disagree with the billing rule.

use serde::{Deserialize, Serialize};

use club_types::{ClientName, TimeOfDay};

use crate::LedgerError;
use crate::billing::session_charge;

// ---------------------------------------------------------------------------
// Closure reasons
// ---------------------------------------------------------------------------

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SessionClosure {
    /// The client left the club.
    Departure,
    /// The club closed with the client still at the table.
    EndOfDay,
}

// ---------------------------------------------------------------------------
// Session entry
// ---------------------------------------------------------------------------

/// One settled table session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    /// Zero-based index of the table.
    pub table_index: usize,
    /// The client who occupied the table.
    pub client: ClientName,
    /// When the client sat down.
    pub start: TimeOfDay,
    /// When the session was settled.
    pub end: TimeOfDay,
    /// Occupied minutes, `end - start`, clamped at zero.
    pub minutes: u32,
    /// Money charged for the session.
    pub charge: u64,
    /// Why the session ended.
    pub closure: SessionClosure,
}

// ---------------------------------------------------------------------------
// Session builder
// ---------------------------------------------------------------------------

/// Builder for constructing validated [`SessionEntry`] values.
///
/// # Examples
///
/// ```
/// use club_ledger::{SessionBuilder, SessionClosure};
/// use club_types::{ClientName, TimeOfDay};
///
/// let entry = ClientName::parse("client1").ok().map(|client| {
///     SessionBuilder::new(0, SessionClosure::Departure)
///         .client(client)
///         .start(TimeOfDay::new(10, 0))
///         .end(TimeOfDay::new(11, 30))
///         .hour_cost(10)
///         .build()
/// });
///
/// assert_eq!(entry.and_then(Result::ok).map(|e| e.charge), Some(20));
/// ```
#[derive(Debug)]
pub struct SessionBuilder {
    table_index: usize,
    closure: SessionClosure,
    client: Option<ClientName>,
    start: Option<TimeOfDay>,
    end: Option<TimeOfDay>,
    hour_cost: Option<u64>,
}

impl SessionBuilder {
    /// Start building an entry for the given table and closure reason.
    pub const fn new(table_index: usize, closure: SessionClosure) -> Self {
        Self {
            table_index,
            closure,
            client: None,
            start: None,
            end: None,
            hour_cost: None,
        }
    }

    /// Set the client who occupied the table.
    #[must_use]
    pub fn client(mut self, client: ClientName) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the session start.
    #[must_use]
    pub const fn start(mut self, start: TimeOfDay) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the settlement time.
    #[must_use]
    pub const fn end(mut self, end: TimeOfDay) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the price of one started hour.
    #[must_use]
    pub const fn hour_cost(mut self, hour_cost: u64) -> Self {
        self.hour_cost = Some(hour_cost);
        self
    }

    /// Validate inputs and produce a [`SessionEntry`].
    ///
    /// An `end` earlier than `start` yields a zero-minute session.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MissingField`] if a field was not set, or
    /// [`LedgerError::Overflow`] if the charge overflows.
    pub fn build(self) -> Result<SessionEntry, LedgerError> {
        let client = self.client.ok_or(LedgerError::MissingField("client"))?;
        let start = self.start.ok_or(LedgerError::MissingField("start"))?;
        let end = self.end.ok_or(LedgerError::MissingField("end"))?;
        let hour_cost = self.hour_cost.ok_or(LedgerError::MissingField("hour_cost"))?;

        let minutes = end.minutes_since(start);
        let charge = session_charge(minutes, hour_cost)?;

        Ok(SessionEntry {
            table_index: self.table_index,
            client,
            start,
            end,
            minutes,
            charge,
            closure: self.closure,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> ClientName {
        ClientName::parse("client1").unwrap()
    }

    #[test]
    fn builder_computes_minutes_and_charge() {
        let entry = SessionBuilder::new(1, SessionClosure::EndOfDay)
            .client(client())
            .start(TimeOfDay::new(9, 48))
            .end(TimeOfDay::new(19, 0))
            .hour_cost(10)
            .build()
            .unwrap();
        assert_eq!(entry.minutes, 552);
        assert_eq!(entry.charge, 100);
        assert_eq!(entry.table_index, 1);
        assert_eq!(entry.closure, SessionClosure::EndOfDay);
    }

    #[test]
    fn missing_fields_are_reported() {
        let result = SessionBuilder::new(0, SessionClosure::Departure)
            .start(TimeOfDay::new(9, 0))
            .end(TimeOfDay::new(10, 0))
            .hour_cost(10)
            .build();
        assert_eq!(result, Err(LedgerError::MissingField("client")));

        let result = SessionBuilder::new(0, SessionClosure::Departure)
            .client(client())
            .start(TimeOfDay::new(9, 0))
            .hour_cost(10)
            .build();
        assert_eq!(result, Err(LedgerError::MissingField("end")));
    }

    #[test]
    fn zero_length_session_is_free() {
        let entry = SessionBuilder::new(0, SessionClosure::Departure)
            .client(client())
            .start(TimeOfDay::new(12, 0))
            .end(TimeOfDay::new(12, 0))
            .hour_cost(10)
            .build()
            .unwrap();
        assert_eq!(entry.minutes, 0);
        assert_eq!(entry.charge, 0);
    }

    #[test]
    fn end_before_start_clamps_to_zero() {
        let entry = SessionBuilder::new(0, SessionClosure::EndOfDay)
            .client(client())
            .start(TimeOfDay::new(20, 0))
            .end(TimeOfDay::new(19, 0))
            .hour_cost(10)
            .build()
            .unwrap();
        assert_eq!(entry.minutes, 0);
        assert_eq!(entry.charge, 0);
    }
}
