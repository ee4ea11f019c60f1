//! Session ledger and billing for the computer club day simulation.
//!
//! Every table session that ends, whether by departure, by being sent away
//! from a full queue, or by the club closing, is settled exactly once and
//! recorded here. The per-table revenue and occupied minutes that the
//! report prints must equal the sums over this ledger.
//!
//! # Architecture
//!
//! - [`billing`] -- The billing rule: whole hours, rounded up.
//! - [`session`] -- The [`SessionBuilder`] for validated entry construction.
//! - [`ledger`] -- The [`SessionLedger`]: append-only log with queries.
//! - [`reconcile`] -- Cross-check of ledger sums against table totals.
//!
//! # Billing Rule
//!
//! ```text
//! charge = ceil(minutes / 60) * hour_cost
//! ```
//!
//! A zero-minute session costs nothing. The ledger never panics; all
//! arithmetic is checked and overflow is returned as an error.
//!
//! # Usage
//!
//! ```
//! use club_ledger::{SessionClosure, SessionLedger, SessionParams};
//! use club_ledger::reconcile::{ReconcileResult, TableTotals};
//! use club_types::{ClientName, TimeOfDay};
//!
//! let mut ledger = SessionLedger::new();
//! let client = ClientName::parse("client1").ok();
//!
//! if let Some(client) = client {
//!     ledger
//!         .record_session(SessionParams {
//!             table_index: 0,
//!             client,
//!             start: TimeOfDay::new(9, 48),
//!             end: TimeOfDay::new(19, 0),
//!             hour_cost: 10,
//!             closure: SessionClosure::EndOfDay,
//!         })
//!         .ok();
//! }
//!
//! assert_eq!(ledger.revenue_for_table(0).ok(), Some(100));
//! let totals = [TableTotals { revenue: 100, minutes: 552 }];
//! assert_eq!(ledger.reconcile(&totals), ReconcileResult::Balanced);
//! ```

pub mod billing;
pub mod ledger;
pub mod reconcile;
pub mod session;

// Re-export primary types at crate root.
pub use billing::{billable_hours, session_charge};
pub use ledger::{SessionLedger, SessionParams};
pub use reconcile::{ReconcileResult, TableTotals};
pub use session::{SessionBuilder, SessionClosure, SessionEntry};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when recording ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A checked arithmetic operation overflowed.
    #[error("arithmetic overflow while computing {context}")]
    Overflow {
        /// What was being computed.
        context: &'static str,
    },

    /// A required field was not set on the builder.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

// ---------------------------------------------------------------------------
// Anomaly type
// ---------------------------------------------------------------------------

/// A mismatch between the ledger and the accrued totals of one table.
///
/// Sessions are settled exactly once; an anomaly means a session was lost
/// or counted twice somewhere between the processor and the table record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAnomaly {
    /// Zero-based index of the table that does not balance.
    pub table_index: usize,
    /// Revenue and minutes summed over the ledger.
    pub ledger: TableTotals,
    /// Revenue and minutes accrued on the table record.
    pub accrued: TableTotals,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl core::fmt::Display for LedgerAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}
