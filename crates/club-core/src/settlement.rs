//! End-of-day settlement.
//!
//! [`ClubState::settle`] consumes the state, so a day can be settled only
//! once. Every client still inside is sent away at closing time in name
//! order; seated clients have their session settled against closing time.
//! The ledger is then reconciled against the table totals.

use tracing::{info, warn};

use club_ledger::{ReconcileResult, SessionClosure, SessionLedger, TableTotals};
use club_types::OutputRecord;

use crate::config::ClubConfig;
use crate::error::ClubError;
use crate::report::{Report, TableSummary};
use crate::state::{ClubState, Table};

/// A club day after closing: read-only, ready for reporting.
#[derive(Debug, Clone)]
pub struct SettledDay {
    config: ClubConfig,
    tables: Vec<Table>,
    records: Vec<OutputRecord>,
    ledger: SessionLedger,
}

impl ClubState {
    /// Close the day.
    ///
    /// For each client still present, in lexicographic name order, emits a
    /// kind-11 record at closing time and settles their table if they hold
    /// one. Tables keep their occupant; no further events follow.
    ///
    /// # Errors
    ///
    /// Returns [`ClubError::Anomaly`] if the ledger and the table totals
    /// disagree, or another [`ClubError`] if settling a session fails.
    pub fn settle(mut self) -> Result<SettledDay, ClubError> {
        let close = self.config.close_time();
        let remaining = std::mem::take(&mut self.clients);
        let remaining_count = remaining.len();

        for (client, table) in remaining {
            self.emit(OutputRecord::ClientLeftQueueIdle { time: close, client });
            if let Some(index) = table {
                self.settle_table(index, close, SessionClosure::EndOfDay)?;
            }
        }
        self.queue.clear();

        let totals: Vec<TableTotals> = self.tables.iter().map(Table::totals).collect();
        if let ReconcileResult::Anomaly(anomaly) = self.ledger.reconcile(&totals) {
            warn!(
                table = anomaly.table_index,
                ledger_revenue = anomaly.ledger.revenue,
                accrued_revenue = anomaly.accrued.revenue,
                "LEDGER ANOMALY: {}",
                anomaly.message
            );
            return Err(ClubError::Anomaly(anomaly));
        }

        info!(
            %close,
            sent_away = remaining_count,
            sessions = self.ledger.len(),
            records = self.records.len(),
            "Club day settled"
        );

        Ok(SettledDay {
            config: self.config,
            tables: self.tables,
            records: self.records,
            ledger: self.ledger,
        })
    }
}

impl SettledDay {
    /// The club parameters.
    pub const fn config(&self) -> &ClubConfig {
        &self.config
    }

    /// Tables as they stood at closing time.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// The complete derived log.
    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    /// Every settled session of the day.
    pub const fn ledger(&self) -> &SessionLedger {
        &self.ledger
    }

    /// Build the final report.
    pub fn report(&self) -> Report {
        let tables = self
            .tables
            .iter()
            .enumerate()
            .map(|(index, table)| TableSummary::new(index, table.totals()))
            .collect();
        Report {
            open_time: self.config.open_time(),
            close_time: self.config.close_time(),
            records: self.records.clone(),
            tables,
        }
    }
}
