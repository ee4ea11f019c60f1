//! Minute-resolution time of day.
//!
//! [`TimeOfDay`] is the only notion of time in the simulation. It is a
//! plain `(hours, minutes)` pair ordered lexicographically, convertible to
//! and from a count of minutes since midnight for duration arithmetic.
//!
//! Parsing checks the shape of the text only: exactly five characters,
//! two ASCII digits, a colon, two ASCII digits. The numeric range is not
//! checked, so `25:61` parses. Usage totals built with
//! [`TimeOfDay::from_minutes`] may likewise carry hours beyond 23.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of minutes in one hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Errors produced when text does not have the `HH:MM` shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeParseError {
    /// The text is not exactly five characters long.
    #[error("expected 5 characters in HH:MM, got {len}")]
    WrongLength {
        /// Length of the rejected text in bytes.
        len: usize,
    },

    /// The third character is not a colon.
    #[error("expected ':' at position 2")]
    MissingColon,

    /// One of the hour or minute characters is not an ASCII digit.
    #[error("expected ASCII digit at position {position}")]
    NotADigit {
        /// Zero-based position of the offending character.
        position: usize,
    },
}

/// A time of day with minute resolution.
///
/// Field order matters: the derived [`Ord`] compares hours first, then
/// minutes, which matches ordering by minutes since midnight for any value
/// produced by [`TimeOfDay::parse`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct TimeOfDay {
    hours: u32,
    minutes: u32,
}

impl TimeOfDay {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: Self = Self {
        hours: 0,
        minutes: 0,
    };

    /// Build a time from its components without range checks.
    pub const fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    /// Parse `HH:MM`.
    ///
    /// Only the shape is validated; see the module docs.
    pub fn parse(text: &str) -> Result<Self, TimeParseError> {
        let bytes = text.as_bytes();
        let [h1, h2, colon, m1, m2] = bytes else {
            return Err(TimeParseError::WrongLength { len: bytes.len() });
        };
        if *colon != b':' {
            return Err(TimeParseError::MissingColon);
        }
        let hours = two_digits(*h1, *h2, 0)?;
        let minutes = two_digits(*m1, *m2, 3)?;
        Ok(Self { hours, minutes })
    }

    /// Hour component.
    pub const fn hours(self) -> u32 {
        self.hours
    }

    /// Minute component.
    pub const fn minutes(self) -> u32 {
        self.minutes
    }

    /// Minutes since midnight, `hours * 60 + minutes`.
    ///
    /// Saturates instead of overflowing; parsed times never come close.
    pub const fn to_minutes(self) -> u32 {
        self.hours
            .saturating_mul(MINUTES_PER_HOUR)
            .saturating_add(self.minutes)
    }

    /// Inverse of [`TimeOfDay::to_minutes`]: `hours = n / 60`, `minutes = n % 60`.
    ///
    /// No wraparound at 24 hours: 1500 minutes is `25:00`.
    pub const fn from_minutes(total: u32) -> Self {
        Self {
            hours: total / MINUTES_PER_HOUR,
            minutes: total % MINUTES_PER_HOUR,
        }
    }

    /// Minutes elapsed from `earlier` to `self`, clamped at zero.
    pub const fn minutes_since(self, earlier: Self) -> u32 {
        self.to_minutes().saturating_sub(earlier.to_minutes())
    }
}

/// Decode two ASCII digits into their numeric value.
fn two_digits(tens: u8, ones: u8, offset: usize) -> Result<u32, TimeParseError> {
    let digit = |byte: u8, position: usize| {
        if byte.is_ascii_digit() {
            Ok(u32::from(byte.saturating_sub(b'0')))
        } else {
            Err(TimeParseError::NotADigit { position })
        }
    };
    let high = digit(tens, offset)?;
    let low = digit(ones, offset.saturating_add(1))?;
    Ok(high.saturating_mul(10).saturating_add(low))
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_time() {
        let t = TimeOfDay::parse("09:48").unwrap();
        assert_eq!(t.hours(), 9);
        assert_eq!(t.minutes(), 48);
        assert_eq!(t.to_minutes(), 588);
    }

    #[test]
    fn parse_is_permissive_about_range() {
        let t = TimeOfDay::parse("25:61").unwrap();
        assert_eq!(t, TimeOfDay::new(25, 61));
    }

    #[test]
    fn rejects_wrong_shapes() {
        assert_eq!(
            TimeOfDay::parse("9:48"),
            Err(TimeParseError::WrongLength { len: 4 })
        );
        assert_eq!(
            TimeOfDay::parse("09:480"),
            Err(TimeParseError::WrongLength { len: 6 })
        );
        assert_eq!(TimeOfDay::parse("09-48"), Err(TimeParseError::MissingColon));
        assert_eq!(
            TimeOfDay::parse("0a:48"),
            Err(TimeParseError::NotADigit { position: 1 })
        );
        assert_eq!(
            TimeOfDay::parse("09:4x"),
            Err(TimeParseError::NotADigit { position: 4 })
        );
        assert!(TimeOfDay::parse("").is_err());
        assert!(TimeOfDay::parse("+9:48").is_err());
    }

    #[test]
    fn non_ascii_input_is_rejected_not_panicking() {
        // "é" is two bytes, so this is five bytes but not five digits.
        assert_eq!(
            TimeOfDay::parse("é:12"),
            Err(TimeParseError::NotADigit { position: 0 })
        );
    }

    #[test]
    fn ordering_is_hours_then_minutes() {
        let early = TimeOfDay::new(8, 59);
        let late = TimeOfDay::new(9, 0);
        assert!(early < late);
        assert!(TimeOfDay::new(9, 0) <= late);
        assert!(TimeOfDay::new(19, 0) >= TimeOfDay::new(18, 59));
    }

    #[test]
    fn from_minutes_does_not_wrap_at_midnight() {
        assert_eq!(TimeOfDay::from_minutes(552).to_string(), "09:12");
        assert_eq!(TimeOfDay::from_minutes(1500).to_string(), "25:00");
        assert_eq!(TimeOfDay::from_minutes(0), TimeOfDay::MIDNIGHT);
    }

    #[test]
    fn minutes_since_clamps_at_zero() {
        let open = TimeOfDay::new(9, 0);
        let later = TimeOfDay::new(19, 0);
        assert_eq!(later.minutes_since(open), 600);
        assert_eq!(open.minutes_since(later), 0);
    }

    #[test]
    fn display_and_parse_agree() {
        let t = TimeOfDay::parse("07:05").unwrap();
        assert_eq!(t.to_string(), "07:05");
        assert_eq!("07:05".parse::<TimeOfDay>().unwrap(), t);
    }

    #[test]
    fn serializes_as_hh_mm_string() {
        let t = TimeOfDay::new(19, 0);
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"19:00\"");
        let back: TimeOfDay = serde_json::from_str("\"19:00\"").unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<TimeOfDay>("\"7:00\"").is_err());
    }
}
