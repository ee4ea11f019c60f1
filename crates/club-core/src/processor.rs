//! The event processor: one state transition per input event.
//!
//! Every accepted event is first echoed to the output records. Then
//! exactly one rule applies, and it may emit a semantic error (kind 13),
//! a kick (kind 11), or a queue promotion (kind 12), never more than one
//! of them. Semantic errors are ordinary records; only an event earlier
//! than the watermark fails the call.

use tracing::debug;

use club_types::{
    ClientName, Event, EventAction, OutputRecord, SemanticError, TableNumber, TimeOfDay,
};

use crate::error::ClubError;
use crate::state::{ClientStatus, ClubState, Table};

impl ClubState {
    /// Apply one validated event.
    ///
    /// # Errors
    ///
    /// Returns [`ClubError::OutOfOrder`] if `event.time` is earlier than
    /// the previous event, before touching any state. Returns other
    /// [`ClubError`] variants only on internal accounting failures.
    pub fn process(&mut self, event: &Event) -> Result<(), ClubError> {
        if let Some(previous) = self.watermark {
            if event.time < previous {
                return Err(ClubError::OutOfOrder {
                    previous,
                    got: event.time,
                });
            }
        }
        self.watermark = Some(event.time);
        self.emit(OutputRecord::from(event.clone()));

        let time = event.time;
        match &event.action {
            EventAction::ClientArrived { client } => {
                self.on_arrived(client, time);
                Ok(())
            }
            EventAction::ClientSatAtTable { client, table } => self.on_sat(client, table, time),
            EventAction::ClientWaiting { client } => self.on_waiting(client, time),
            EventAction::ClientLeft { client } => self.on_left(client, time),
        }
    }

    fn reject(&mut self, time: TimeOfDay, error: SemanticError) {
        debug!(%time, %error, "Event rejected");
        self.emit(OutputRecord::Error { time, error });
    }

    fn on_arrived(&mut self, client: &ClientName, time: TimeOfDay) {
        if !self.config.is_open_at(time) {
            self.reject(time, SemanticError::NotOpenYet);
        } else if self.status(client) != ClientStatus::Absent {
            self.reject(time, SemanticError::YouShallNotPass);
        } else {
            debug!(%client, %time, "Client arrived");
            self.admit(client.clone());
        }
    }

    fn on_sat(
        &mut self,
        client: &ClientName,
        table: &TableNumber,
        time: TimeOfDay,
    ) -> Result<(), ClubError> {
        if self.status(client) == ClientStatus::Absent {
            self.reject(time, SemanticError::ClientUnknown);
            return Ok(());
        }
        let Some(index) = table.to_index(self.config.table_count()) else {
            debug!(%client, %table, "Table out of range, ignored");
            return Ok(());
        };
        if self.tables.get(index).is_some_and(Table::is_occupied) {
            self.reject(time, SemanticError::PlaceIsBusy);
            return Ok(());
        }
        debug!(%client, table = index, %time, "Client seated");
        self.seat(client.clone(), index, time)
    }

    fn on_waiting(&mut self, client: &ClientName, time: TimeOfDay) -> Result<(), ClubError> {
        if self.has_free_table() {
            self.reject(time, SemanticError::ICanWaitNoLonger);
            return Ok(());
        }
        let queue_full = u32::try_from(self.queue_len())
            .ok()
            .is_none_or(|len| len >= self.config.table_count());
        if queue_full {
            debug!(%client, %time, "Queue full, client sent away");
            self.emit(OutputRecord::ClientLeftQueueIdle {
                time,
                client: client.clone(),
            });
            self.expel(client);
            return Ok(());
        }
        debug!(%client, position = self.queue_len(), "Client queued");
        self.enqueue(client.clone());
        Ok(())
    }

    fn on_left(&mut self, client: &ClientName, time: TimeOfDay) -> Result<(), ClubError> {
        if self.status(client) == ClientStatus::Absent {
            self.reject(time, SemanticError::ClientUnknown);
            return Ok(());
        }
        debug!(%client, %time, "Client left");
        self.depart(client, time)
    }
}
