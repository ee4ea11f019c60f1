//! Event processing, day settlement, and reporting for the computer club
//! day simulation.
//!
//! The club replays a chronologically ordered log of client events
//! against a fixed set of tables and a waiting queue, emitting a derived
//! log and settling table revenue at departure and at closing time.
//!
//! # Modules
//!
//! - [`config`] -- [`ClubConfig`]: table count, opening hours, hour cost.
//! - [`validation`] -- Staged validation of tokenized event lines.
//! - [`codec`] -- Header and event line parsing for the text log.
//! - [`state`] -- [`ClubState`]: tables, clients, queue, records, ledger.
//! - [`processor`] -- The per-event state transition.
//! - [`settlement`] -- End-of-day close-out into a [`SettledDay`].
//! - [`report`] -- The final [`Report`] and its text rendering.
//! - [`runner`] -- [`run_simulation`] over the text log.
//! - [`error`] -- [`ClubError`] and [`FatalError`].

pub mod codec;
pub mod config;
pub mod error;
pub mod processor;
pub mod report;
pub mod runner;
pub mod settlement;
pub mod state;
pub mod validation;

pub use config::{ClubConfig, ConfigError};
pub use error::{ClubError, FatalError, HeaderError};
pub use report::{Report, TableSummary};
pub use runner::{run_events, run_simulation};
pub use settlement::SettledDay;
pub use state::{ClientStatus, ClubState, Occupant, Table};
pub use validation::{CandidateEvent, ValidationError};
