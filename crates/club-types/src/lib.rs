//! Shared type definitions for the computer club day simulation.
//!
//! This crate is the single source of truth for the values that flow
//! between the log codec, the event processor, the session ledger, and
//! the report.
//!
//! # Modules
//!
//! - [`time`] -- Minute-resolution [`TimeOfDay`] with permissive parsing
//! - [`enums`] -- [`EventKind`] codes and [`SemanticError`] tokens
//! - [`ids`] -- Validated [`ClientName`] and [`TableNumber`] tokens
//! - [`event`] -- Input [`Event`]s and derived [`OutputRecord`]s

pub mod enums;
pub mod event;
pub mod ids;
pub mod time;

// Re-export all public types at crate root for convenience.
pub use enums::{EventKind, SemanticError};
pub use event::{Event, EventAction, OutputRecord};
pub use ids::{ClientName, TableNumber, TokenError};
pub use time::{MINUTES_PER_HOUR, TimeOfDay, TimeParseError};
