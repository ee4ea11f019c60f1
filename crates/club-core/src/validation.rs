//! Event validation pipeline.
//!
//! A candidate event is the tokenized form of one log line: a time token,
//! a kind token, and zero or more argument tokens. The pipeline runs in
//! order:
//!
//! 1. Time -- is the time token shaped `HH:MM`?
//! 2. Kind -- is the kind token a number naming an input kind (1-4)?
//! 3. Arity -- does the argument count match the kind?
//! 4. Arguments -- is the client a valid name, the table a digit string?
//!
//! Each stage returns `Ok` or a [`ValidationError`]. Any failure rejects
//! the whole line; a rejected event never reaches the processor. Whether
//! a table number is in range is decided by the processor, not here.

use club_types::{
    ClientName, Event, EventAction, EventKind, TableNumber, TimeOfDay, TimeParseError, TokenError,
};

/// Why a candidate event was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The line is empty.
    #[error("empty line")]
    EmptyLine,

    /// The time token is not shaped `HH:MM`.
    #[error("invalid time: {0}")]
    Time(#[from] TimeParseError),

    /// The line has a time but no kind.
    #[error("missing event kind")]
    MissingKind,

    /// The kind token is not a decimal number.
    #[error("event kind is not a number: {0:?}")]
    KindNotNumeric(String),

    /// The kind number is not one of the input kinds 1-4.
    #[error("event kind {0} is not an input kind")]
    NotAnInputKind(String),

    /// The number of arguments does not match the kind.
    #[error("event kind {kind} takes {expected} argument(s), got {got}")]
    WrongArgumentCount {
        /// The event kind.
        kind: EventKind,
        /// Arguments the kind requires.
        expected: usize,
        /// Arguments present on the line.
        got: usize,
    },

    /// An argument failed its character check.
    #[error("invalid argument: {0}")]
    Argument(#[from] TokenError),
}

/// One log line split into tokens, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEvent<'a> {
    /// The time token.
    pub time: &'a str,
    /// The kind token, if present.
    pub kind: Option<&'a str>,
    /// Remaining tokens.
    pub args: Vec<&'a str>,
}

/// Validate a candidate through the full pipeline.
///
/// Returns the typed [`Event`] if every stage passes.
pub fn validate_event(candidate: &CandidateEvent<'_>) -> Result<Event, ValidationError> {
    // Stage 1: Time
    let time = validate_time(candidate.time)?;

    // Stage 2: Kind
    let kind = validate_kind(candidate.kind)?;

    // Stage 3: Arity
    validate_arity(kind, &candidate.args)?;

    // Stage 4: Arguments
    let action = build_action(kind, &candidate.args)?;

    Ok(Event::new(time, action))
}

/// Stage 1: the time token must parse. Range is not checked.
fn validate_time(token: &str) -> Result<TimeOfDay, ValidationError> {
    Ok(TimeOfDay::parse(token)?)
}

/// Stage 2: the kind token must be all digits and name an input kind.
fn validate_kind(token: Option<&str>) -> Result<EventKind, ValidationError> {
    let token = token.ok_or(ValidationError::MissingKind)?;
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::KindNotNumeric(token.to_owned()));
    }
    token
        .parse::<u8>()
        .ok()
        .and_then(EventKind::from_code)
        .filter(|kind| kind.is_input())
        .ok_or_else(|| ValidationError::NotAnInputKind(token.to_owned()))
}

/// Stage 3: kinds 1, 3, 4 take one argument; kind 2 takes two.
fn validate_arity(kind: EventKind, args: &[&str]) -> Result<(), ValidationError> {
    let expected = kind.arity();
    if args.len() == expected {
        Ok(())
    } else {
        Err(ValidationError::WrongArgumentCount {
            kind,
            expected,
            got: args.len(),
        })
    }
}

/// Stage 4: parse each argument into its typed token.
///
/// Arity has already been checked, so the slice patterns always match.
fn build_action(kind: EventKind, args: &[&str]) -> Result<EventAction, ValidationError> {
    let wrong_count = || ValidationError::WrongArgumentCount {
        kind,
        expected: kind.arity(),
        got: args.len(),
    };
    match (kind, args) {
        (EventKind::ClientSatAtTable, [client, table]) => Ok(EventAction::ClientSatAtTable {
            client: ClientName::parse(client)?,
            table: TableNumber::parse(table)?,
        }),
        (EventKind::ClientArrived, [client]) => Ok(EventAction::ClientArrived {
            client: ClientName::parse(client)?,
        }),
        (EventKind::ClientWaiting, [client]) => Ok(EventAction::ClientWaiting {
            client: ClientName::parse(client)?,
        }),
        (EventKind::ClientLeft, [client]) => Ok(EventAction::ClientLeft {
            client: ClientName::parse(client)?,
        }),
        _ => Err(wrong_count()),
    }
}
