//! The final report of a club day.
//!
//! Rendered as text:
//!
//! ```text
//! 09:00
//! 08:48 1 client1
//! 08:48 13 NotOpenYet
//! ...
//! 19:00
//! 1 70 05:58
//! 2 30 02:18
//! ```
//!
//! and serialized as JSON through serde.

use core::fmt;

use serde::Serialize;

use club_ledger::TableTotals;
use club_types::{OutputRecord, TableNumber, TimeOfDay};

/// Revenue and usage of one table over the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    /// 1-based table number.
    pub number: TableNumber,
    /// Money earned.
    pub revenue: u64,
    /// Occupied time as hours and minutes; hours are not wrapped at 24.
    pub occupied: TimeOfDay,
    /// Occupied time in minutes.
    pub occupied_minutes: u32,
}

impl TableSummary {
    /// Summarize the table at zero-based `index` from its accrued totals.
    pub fn new(index: usize, totals: TableTotals) -> Self {
        Self {
            number: TableNumber::from_index(index),
            revenue: totals.revenue,
            occupied: TimeOfDay::from_minutes(totals.minutes),
            occupied_minutes: totals.minutes,
        }
    }
}

/// Everything the day produced, in output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Opening time, printed first.
    pub open_time: TimeOfDay,
    /// Closing time, printed after the records.
    pub close_time: TimeOfDay,
    /// Every echoed input event followed by the records it caused, then
    /// the closing records.
    pub records: Vec<OutputRecord>,
    /// One summary per table, in table order.
    pub tables: Vec<TableSummary>,
}

impl Report {
    /// Total revenue over all tables, or `None` on overflow.
    pub fn total_revenue(&self) -> Option<u64> {
        self.tables
            .iter()
            .try_fold(0_u64, |sum, table| sum.checked_add(table.revenue))
    }

    /// Number of semantic error records.
    pub fn error_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| matches!(record, OutputRecord::Error { .. }))
            .count()
    }

    /// Render the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which does not occur for well-formed
    /// reports.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.open_time)?;
        for record in &self.records {
            writeln!(f, "{record}")?;
        }
        writeln!(f, "{}", self.close_time)?;
        for table in &self.tables {
            writeln!(f, "{} {} {}", table.number, table.revenue, table.occupied)?;
        }
        Ok(())
    }
}
