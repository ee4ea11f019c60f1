//! Mutable simulation state for one club day.
//!
//! [`ClubState`] owns the tables, the set of clients in the club, the
//! waiting queue, the derived output records, and the session ledger.
//! Every mutation goes through a method here so that the client map and
//! the table occupancy stay consistent:
//!
//! - a client mapped to `Some(index)` is the occupant of table `index`;
//! - a table whose occupant is not mapped to it was left by a client sent
//!   away from a full queue; it stays occupied and unbilled for the rest
//!   of the day.
//!
//! The queue holds names, not clients: a name may appear more than once
//! and need not be in the club until it is seated.
//!
//! The transition rules themselves live in [`processor`](crate::processor)
//! and [`settlement`](crate::settlement).

use std::collections::{BTreeMap, VecDeque};

use tracing::debug;

use club_ledger::{SessionClosure, SessionLedger, SessionParams, TableTotals};
use club_types::{ClientName, OutputRecord, TableNumber, TimeOfDay};

use crate::config::ClubConfig;
use crate::error::ClubError;

/// Where a client stands relative to the club.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientStatus {
    /// Not in the club.
    Absent,
    /// In the club, seated at the given zero-based table index or without
    /// a table.
    Present(Option<usize>),
}

/// The client currently using a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    /// Who sits at the table.
    pub client: ClientName,
    /// When the current session started.
    pub since: TimeOfDay,
}

/// One table: its current occupant and what it has earned so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    occupant: Option<Occupant>,
    totals: TableTotals,
}

impl Table {
    /// Whether a client sits at the table.
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// The current occupant, if any.
    pub const fn occupant(&self) -> Option<&Occupant> {
        self.occupant.as_ref()
    }

    /// Revenue and occupied minutes accrued from settled sessions.
    pub const fn totals(&self) -> TableTotals {
        self.totals
    }
}

/// The state of the club while the day's events are replayed.
#[derive(Debug, Clone)]
pub struct ClubState {
    pub(crate) config: ClubConfig,
    pub(crate) tables: Vec<Table>,
    /// Clients in the club, ordered by name, mapped to their table.
    pub(crate) clients: BTreeMap<ClientName, Option<usize>>,
    pub(crate) queue: VecDeque<ClientName>,
    pub(crate) records: Vec<OutputRecord>,
    pub(crate) ledger: SessionLedger,
    /// Time of the last processed event.
    pub(crate) watermark: Option<TimeOfDay>,
}

impl ClubState {
    /// Open a club with every table free and nobody inside.
    pub fn new(config: ClubConfig) -> Self {
        Self {
            config,
            tables: (0..config.table_count()).map(|_| Table::default()).collect(),
            clients: BTreeMap::new(),
            queue: VecDeque::new(),
            records: Vec::new(),
            ledger: SessionLedger::new(),
            watermark: None,
        }
    }

    /// The club parameters.
    pub const fn config(&self) -> &ClubConfig {
        &self.config
    }

    /// All tables in index order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Where `client` stands.
    pub fn status(&self, client: &ClientName) -> ClientStatus {
        self.clients
            .get(client)
            .map_or(ClientStatus::Absent, |table| ClientStatus::Present(*table))
    }

    /// Clients in the club, in name order.
    #[cfg(test)]
    pub(crate) fn present_clients(&self) -> impl Iterator<Item = &ClientName> {
        self.clients.keys()
    }

    /// The waiting queue, front first.
    #[cfg(test)]
    pub(crate) fn queue(&self) -> impl Iterator<Item = &ClientName> {
        self.queue.iter()
    }

    /// Number of clients in the waiting queue.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Output records emitted so far.
    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    /// Sessions settled so far.
    pub const fn ledger(&self) -> &SessionLedger {
        &self.ledger
    }

    /// Time of the last processed event.
    pub const fn watermark(&self) -> Option<TimeOfDay> {
        self.watermark
    }

    /// Whether at least one table is free.
    pub fn has_free_table(&self) -> bool {
        self.tables.iter().any(|table| !table.is_occupied())
    }

    pub(crate) fn emit(&mut self, record: OutputRecord) {
        self.records.push(record);
    }

    /// Add `client` to the club without a table.
    pub(crate) fn admit(&mut self, client: ClientName) {
        self.clients.insert(client, None);
    }

    pub(crate) fn enqueue(&mut self, client: ClientName) {
        self.queue.push_back(client);
    }

    /// Seat `client` at table `index`, starting a session at `time`.
    ///
    /// A table the client held before is freed without settling, and the
    /// client leaves the waiting queue. The target table must be free.
    pub(crate) fn seat(
        &mut self,
        client: ClientName,
        index: usize,
        time: TimeOfDay,
    ) -> Result<(), ClubError> {
        if let Some(Some(previous)) = self.clients.get(&client).copied() {
            debug!(%client, table = previous, "Previous table abandoned unsettled");
            self.vacate(previous)?;
        }
        self.queue.retain(|queued| queued != &client);

        let table = self
            .tables
            .get_mut(index)
            .ok_or(ClubError::NoSuchTable(index))?;
        table.occupant = Some(Occupant {
            client: client.clone(),
            since: time,
        });
        self.clients.insert(client, Some(index));
        Ok(())
    }

    /// Settle the session at table `index` against `end`.
    ///
    /// Records the session in the ledger and accrues it to the table.
    /// The occupant stays in place; a free table settles nothing.
    pub(crate) fn settle_table(
        &mut self,
        index: usize,
        end: TimeOfDay,
        closure: SessionClosure,
    ) -> Result<(), ClubError> {
        let table = self
            .tables
            .get_mut(index)
            .ok_or(ClubError::NoSuchTable(index))?;
        let Some(occupant) = table.occupant.clone() else {
            return Ok(());
        };

        let entry = self.ledger.record_session(SessionParams {
            table_index: index,
            client: occupant.client,
            start: occupant.since,
            end,
            hour_cost: self.config.hour_cost(),
            closure,
        })?;

        let overflow = || ClubError::AccrualOverflow { table_index: index };
        table.totals = TableTotals {
            revenue: table
                .totals
                .revenue
                .checked_add(entry.charge)
                .ok_or_else(overflow)?,
            minutes: table
                .totals
                .minutes
                .checked_add(entry.minutes)
                .ok_or_else(overflow)?,
        };
        Ok(())
    }

    /// Free table `index` without settling it.
    pub(crate) fn vacate(&mut self, index: usize) -> Result<(), ClubError> {
        let table = self
            .tables
            .get_mut(index)
            .ok_or(ClubError::NoSuchTable(index))?;
        table.occupant = None;
        Ok(())
    }

    /// Seat the front of the waiting queue at the freed table `index`.
    pub(crate) fn promote_from_queue(
        &mut self,
        index: usize,
        time: TimeOfDay,
    ) -> Result<(), ClubError> {
        let Some(next) = self.queue.pop_front() else {
            return Ok(());
        };
        debug!(client = %next, table = index, "Promoted from queue");
        self.seat(next.clone(), index, time)?;
        self.emit(OutputRecord::ClientSeated {
            time,
            client: next,
            table: TableNumber::from_index(index),
        });
        Ok(())
    }

    /// Remove `client` from the club at `time`.
    ///
    /// The client's table, if any, is settled and freed, and the front of
    /// the queue takes it.
    pub(crate) fn depart(
        &mut self,
        client: &ClientName,
        time: TimeOfDay,
    ) -> Result<(), ClubError> {
        let table = self.clients.remove(client).flatten();
        self.queue.retain(|queued| queued != client);

        if let Some(index) = table {
            self.settle_table(index, time, SessionClosure::Departure)?;
            self.vacate(index)?;
            self.promote_from_queue(index, time)?;
        }
        Ok(())
    }

    /// Drop `client` from the club and the queue, leaving any table they
    /// hold as it is.
    pub(crate) fn expel(&mut self, client: &ClientName) {
        self.clients.remove(client);
        self.queue.retain(|queued| queued != client);
    }
}
