//! Reconciliation of the session ledger against table totals.
//!
//! Tables accrue revenue and occupied minutes as sessions settle; the
//! ledger records the same sessions independently. For every table T:
//!
//! ```text
//! sum(ledger charges for T) == accrued revenue of T
//! sum(ledger minutes for T) == accrued minutes of T
//! ```
//!
//! Both sides are fed from the same settlement call, so this holds by
//! construction. A violation means a session was dropped or counted twice.

use serde::{Deserialize, Serialize};

use crate::session::SessionEntry;
use crate::LedgerAnomaly;

/// Revenue and occupied minutes of one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableTotals {
    /// Money charged.
    pub revenue: u64,
    /// Minutes occupied.
    pub minutes: u32,
}

/// The result of reconciling the ledger against table totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileResult {
    /// Every table balances.
    Balanced,
    /// At least one table does not balance; the first is reported.
    Anomaly(LedgerAnomaly),
}

/// Compare per-table ledger sums with the accrued `totals`.
///
/// Entries naming a table index outside `totals` are reported as an
/// anomaly against that index with zero accrued totals.
pub fn reconcile(entries: &[SessionEntry], totals: &[TableTotals]) -> ReconcileResult {
    let mut sums = vec![TableTotals::default(); totals.len()];

    for entry in entries {
        let Some(sum) = sums.get_mut(entry.table_index) else {
            return ReconcileResult::Anomaly(LedgerAnomaly {
                table_index: entry.table_index,
                ledger: TableTotals {
                    revenue: entry.charge,
                    minutes: entry.minutes,
                },
                accrued: TableTotals::default(),
                message: format!(
                    "LEDGER_ANOMALY: session recorded for unknown table {}",
                    entry.table_index
                ),
            });
        };
        match (
            sum.revenue.checked_add(entry.charge),
            sum.minutes.checked_add(entry.minutes),
        ) {
            (Some(revenue), Some(minutes)) => {
                sum.revenue = revenue;
                sum.minutes = minutes;
            }
            _ => {
                return ReconcileResult::Anomaly(LedgerAnomaly {
                    table_index: entry.table_index,
                    ledger: *sum,
                    accrued: totals.get(entry.table_index).copied().unwrap_or_default(),
                    message: format!(
                        "LEDGER_ANOMALY: arithmetic overflow while summing table {}",
                        entry.table_index
                    ),
                });
            }
        }
    }

    let mismatch = sums
        .iter()
        .zip(totals)
        .enumerate()
        .find(|(_, (ledger, accrued))| ledger != accrued);

    match mismatch {
        None => ReconcileResult::Balanced,
        Some((table_index, (ledger, accrued))) => ReconcileResult::Anomaly(LedgerAnomaly {
            table_index,
            ledger: *ledger,
            accrued: *accrued,
            message: format!(
                "LEDGER_ANOMALY: table {table_index} ledger has {} money / {} min, table accrued {} money / {} min",
                ledger.revenue, ledger.minutes, accrued.revenue, accrued.minutes
            ),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use club_types::{ClientName, TimeOfDay};

    use super::*;
    use crate::session::{SessionBuilder, SessionClosure};

    fn entry(table_index: usize, minutes: u32) -> SessionEntry {
        SessionBuilder::new(table_index, SessionClosure::Departure)
            .client(ClientName::parse("c").unwrap())
            .start(TimeOfDay::MIDNIGHT)
            .end(TimeOfDay::from_minutes(minutes))
            .hour_cost(10)
            .build()
            .unwrap()
    }

    #[test]
    fn empty_ledger_balances_against_idle_tables() {
        let totals = [TableTotals::default(); 3];
        assert_eq!(reconcile(&[], &totals), ReconcileResult::Balanced);
    }

    #[test]
    fn matching_totals_balance() {
        let entries = [entry(0, 90), entry(1, 30), entry(0, 60)];
        let totals = [
            TableTotals {
                revenue: 30,
                minutes: 150,
            },
            TableTotals {
                revenue: 10,
                minutes: 30,
            },
        ];
        assert_eq!(reconcile(&entries, &totals), ReconcileResult::Balanced);
    }

    #[test]
    fn double_counted_session_is_an_anomaly() {
        let entries = [entry(0, 90)];
        let totals = [TableTotals {
            revenue: 40,
            minutes: 180,
        }];
        let ReconcileResult::Anomaly(anomaly) = reconcile(&entries, &totals) else {
            panic!("expected anomaly");
        };
        assert_eq!(anomaly.table_index, 0);
        assert_eq!(anomaly.ledger.revenue, 20);
        assert_eq!(anomaly.accrued.revenue, 40);
        assert!(anomaly.to_string().starts_with("LEDGER_ANOMALY"));
    }

    #[test]
    fn session_for_unknown_table_is_an_anomaly() {
        let entries = [entry(5, 10)];
        let totals = [TableTotals::default()];
        assert!(matches!(
            reconcile(&entries, &totals),
            ReconcileResult::Anomaly(LedgerAnomaly { table_index: 5, .. })
        ));
    }
}
