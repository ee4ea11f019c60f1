//! Whole-day drivers.
//!
//! [`run_simulation`] takes the complete text log, parses the header,
//! replays every event line in order, settles the day, and returns the
//! [`Report`]. The first malformed or out-of-order line aborts the run;
//! no partial report is produced.
//!
//! [`run_events`] does the same for already-typed events.

use tracing::info;

use club_types::Event;

use crate::codec::{parse_event_line, parse_header};
use crate::config::ClubConfig;
use crate::error::{ClubError, FatalError};
use crate::report::Report;
use crate::settlement::SettledDay;
use crate::state::ClubState;

/// Replay `events` in order against a fresh club and settle the day.
///
/// # Errors
///
/// Returns [`ClubError::OutOfOrder`] for the first event earlier than its
/// predecessor, or another [`ClubError`] if settlement fails.
pub fn run_events<I>(config: ClubConfig, events: I) -> Result<SettledDay, ClubError>
where
    I: IntoIterator<Item = Event>,
{
    let mut state = ClubState::new(config);
    for event in events {
        state.process(&event)?;
    }
    state.settle()
}

/// Run a full club day from the text log.
///
/// # Errors
///
/// Returns [`FatalError`] carrying the offending line for a malformed
/// header, a malformed event line, or an event earlier than the one
/// before it.
pub fn run_simulation(input: &str) -> Result<Report, FatalError> {
    let mut lines = input.lines();
    let config = parse_header(&mut lines)?;

    info!(
        tables = config.table_count(),
        open = %config.open_time(),
        close = %config.close_time(),
        hour_cost = config.hour_cost(),
        "Club day starting"
    );

    let mut state = ClubState::new(config);
    let mut processed: usize = 0;
    for line in lines {
        let event = parse_event_line(line).map_err(|reason| FatalError::InvalidEvent {
            line: line.to_owned(),
            reason,
        })?;
        state.process(&event).map_err(|err| match err {
            ClubError::OutOfOrder { previous, .. } => FatalError::OutOfOrder {
                line: line.to_owned(),
                previous,
            },
            other => FatalError::from(other),
        })?;
        processed = processed.saturating_add(1);
    }

    let report = state.settle()?.report();

    info!(
        events = processed,
        records = report.records.len(),
        errors = report.error_count(),
        revenue = report.total_revenue().unwrap_or(u64::MAX),
        "Club day complete"
    );

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use club_types::{ClientName, TimeOfDay};

    use super::*;
    use crate::validation::ValidationError;

    const HEADER: &str = "2\n09:00 19:00\n10\n";

    #[test]
    fn header_only_is_an_empty_day() {
        let report = run_simulation(HEADER).unwrap();
        assert_eq!(report.to_string(), "09:00\n19:00\n1 0 00:00\n2 0 00:00\n");
    }

    #[test]
    fn malformed_line_aborts_with_that_line() {
        let input = format!("{HEADER}09:00 1 a\n09:05 1 bad!name\n09:10 1 c\n");
        let err = run_simulation(&input).unwrap_err();
        assert_eq!(err.to_string(), "09:05 1 bad!name");
        assert!(matches!(
            err,
            FatalError::InvalidEvent {
                reason: ValidationError::Argument(_),
                ..
            }
        ));
    }

    #[test]
    fn empty_line_in_events_is_fatal() {
        let input = format!("{HEADER}09:00 1 a\n\n09:10 1 c\n");
        let err = run_simulation(&input).unwrap_err();
        assert_eq!(err.offending_line(), Some(""));
    }

    #[test]
    fn backwards_time_aborts_with_that_line() {
        let input = format!("{HEADER}10:00 1 a\n09:59 1 b\n");
        let err = run_simulation(&input).unwrap_err();
        assert_eq!(
            err,
            FatalError::OutOfOrder {
                line: "09:59 1 b".to_owned(),
                previous: TimeOfDay::new(10, 0),
            }
        );
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let input = "1\r\n09:00 19:00\r\n10\r\n09:30 1 a\r\n";
        let report = run_simulation(input).unwrap();
        assert_eq!(report.records.len(), 2);
    }

    #[test]
    fn run_events_settles_typed_events() {
        let config = ClubConfig::new(1, TimeOfDay::new(9, 0), TimeOfDay::new(19, 0), 10).unwrap();
        let a = ClientName::parse("a").unwrap();
        let day = run_events(
            config,
            [
                Event::arrived(TimeOfDay::new(9, 0), a.clone()),
                Event::left(TimeOfDay::new(9, 30), a),
            ],
        )
        .unwrap();
        assert_eq!(day.records().len(), 2);
        assert!(day.ledger().is_empty());
    }
}
