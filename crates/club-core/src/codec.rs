//! Text codec for the input log.
//!
//! The log starts with three header lines:
//!
//! ```text
//! <table count>
//! <open HH:MM> <close HH:MM>
//! <hour cost>
//! ```
//!
//! followed by one event per line, `HH:MM <kind> <args...>`, tokens
//! separated by whitespace. This module only splits and converts; event
//! validity is decided by [`validation`](crate::validation).

use club_types::{Event, TimeOfDay};

use crate::config::ClubConfig;
use crate::error::{FatalError, HeaderError};
use crate::validation::{CandidateEvent, ValidationError, validate_event};

/// Split an event line into tokens.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyLine`] for an empty line. A line of
/// only whitespace yields an empty time token, rejected by validation.
pub fn tokenize(line: &str) -> Result<CandidateEvent<'_>, ValidationError> {
    if line.is_empty() {
        return Err(ValidationError::EmptyLine);
    }
    let mut tokens = line.split_whitespace();
    let time = tokens.next().unwrap_or_default();
    let kind = tokens.next();
    let args = tokens.collect();
    Ok(CandidateEvent { time, kind, args })
}

/// Tokenize and validate one event line.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first failing stage.
pub fn parse_event_line(line: &str) -> Result<Event, ValidationError> {
    validate_event(&tokenize(line)?)
}

/// Parse a count header line: one or more ASCII digits, nothing else.
///
/// # Errors
///
/// Returns [`HeaderError::InvalidNumber`] if the line is empty, has any
/// non-digit character, or does not fit in `T`.
pub fn parse_number<T: core::str::FromStr>(line: &str) -> Result<T, HeaderError> {
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HeaderError::InvalidNumber);
    }
    line.parse().map_err(|_err| HeaderError::InvalidNumber)
}

/// Parse the opening-hours header line: two whitespace-separated times.
///
/// Tokens after the second are ignored.
///
/// # Errors
///
/// Returns [`HeaderError::InvalidTime`] if either time is missing or
/// malformed.
pub fn parse_opening_hours(line: &str) -> Result<(TimeOfDay, TimeOfDay), HeaderError> {
    let mut tokens = line.split_whitespace();
    let open = TimeOfDay::parse(tokens.next().unwrap_or_default())?;
    let close = TimeOfDay::parse(tokens.next().unwrap_or_default())?;
    Ok((open, close))
}

/// Parse the three header lines into a [`ClubConfig`].
///
/// Consumes exactly three lines from `lines`.
///
/// # Errors
///
/// Returns [`FatalError::MissingHeader`] if the input ends early, or
/// [`FatalError::InvalidHeader`] carrying the offending line.
pub fn parse_header<'a, I>(lines: &mut I) -> Result<ClubConfig, FatalError>
where
    I: Iterator<Item = &'a str>,
{
    let invalid = |line: &str, reason: HeaderError| FatalError::InvalidHeader {
        line: line.to_owned(),
        reason,
    };

    let line = lines.next().ok_or(FatalError::MissingHeader {
        what: "table count",
    })?;
    let table_count: u32 = parse_number(line).map_err(|e| invalid(line, e))?;

    let hours_line = lines.next().ok_or(FatalError::MissingHeader {
        what: "opening hours",
    })?;
    let (open, close) = parse_opening_hours(hours_line).map_err(|e| invalid(hours_line, e))?;

    let line = lines.next().ok_or(FatalError::MissingHeader { what: "hour cost" })?;
    let hour_cost: u64 = parse_number(line).map_err(|e| invalid(line, e))?;

    ClubConfig::new(table_count, open, close, hour_cost)
        .map_err(|e| invalid(hours_line, HeaderError::Config(e)))
}
