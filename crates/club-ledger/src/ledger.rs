//! The session ledger: an append-only log of every settled table session.
//!
//! # Design
//!
//! - **Append-only**: entries are never modified or deleted.
//! - **Settle once**: each session produces exactly one entry.
//! - **Integer money**: charges and sums are `u64`, all arithmetic checked.

use tracing::debug;

use club_types::{ClientName, TimeOfDay};

use crate::reconcile::{ReconcileResult, TableTotals, reconcile};
use crate::session::{SessionBuilder, SessionClosure, SessionEntry};
use crate::LedgerError;

// ---------------------------------------------------------------------------
// Session parameters
// ---------------------------------------------------------------------------

/// Parameters for recording one settled session.
///
/// Packs the arguments of a settlement into a single struct to keep call
/// sites readable.
#[derive(Debug, Clone)]
pub struct SessionParams {
    /// Zero-based index of the table.
    pub table_index: usize,
    /// The client who occupied the table.
    pub client: ClientName,
    /// When the client sat down.
    pub start: TimeOfDay,
    /// When the session is settled.
    pub end: TimeOfDay,
    /// Price of one started hour.
    pub hour_cost: u64,
    /// Why the session ended.
    pub closure: SessionClosure,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The ledger of all settled sessions for one day.
#[derive(Debug, Default, Clone)]
pub struct SessionLedger {
    /// All entries, in settlement order.
    entries: Vec<SessionEntry>,
}

impl SessionLedger {
    /// Create a new empty ledger.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Return the number of entries in the ledger.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return whether the ledger has no entries.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Settle a session and append it.
    ///
    /// Builds and validates a [`SessionEntry`] via the [`SessionBuilder`]
    /// and returns a reference to the appended entry.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_session(&mut self, params: SessionParams) -> Result<&SessionEntry, LedgerError> {
        let entry = SessionBuilder::new(params.table_index, params.closure)
            .client(params.client)
            .start(params.start)
            .end(params.end)
            .hour_cost(params.hour_cost)
            .build()?;

        debug!(
            table = entry.table_index,
            client = %entry.client,
            start = %entry.start,
            end = %entry.end,
            minutes = entry.minutes,
            charge = entry.charge,
            closure = ?entry.closure,
            "Session settled"
        );

        self.entries.push(entry);
        self.entries
            .last()
            .ok_or(LedgerError::MissingField("entry after append"))
    }

    /// Return all entries, in settlement order.
    pub fn all_entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    /// Return the entries for one table, in settlement order.
    pub fn entries_for_table(&self, table_index: usize) -> impl Iterator<Item = &SessionEntry> {
        self.entries
            .iter()
            .filter(move |e| e.table_index == table_index)
    }

    /// Total money charged at one table.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the sum overflows.
    pub fn revenue_for_table(&self, table_index: usize) -> Result<u64, LedgerError> {
        self.entries_for_table(table_index)
            .try_fold(0_u64, |acc, e| acc.checked_add(e.charge))
            .ok_or(LedgerError::Overflow {
                context: "table revenue",
            })
    }

    /// Total occupied minutes at one table.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the sum overflows.
    pub fn minutes_for_table(&self, table_index: usize) -> Result<u32, LedgerError> {
        self.entries_for_table(table_index)
            .try_fold(0_u32, |acc, e| acc.checked_add(e.minutes))
            .ok_or(LedgerError::Overflow {
                context: "table minutes",
            })
    }

    /// Total money charged across all tables.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the sum overflows.
    pub fn total_revenue(&self) -> Result<u64, LedgerError> {
        self.entries
            .iter()
            .try_fold(0_u64, |acc, e| acc.checked_add(e.charge))
            .ok_or(LedgerError::Overflow {
                context: "total revenue",
            })
    }

    /// Cross-check the ledger against the accrued totals of every table.
    ///
    /// `totals[i]` holds the accrued figures of table `i`.
    pub fn reconcile(&self, totals: &[TableTotals]) -> ReconcileResult {
        reconcile(&self.entries, totals)
    }
}
