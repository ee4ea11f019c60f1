//! Validated string identifiers used in the event log.
//!
//! Client names and table numbers arrive as raw tokens. Wrapping them in
//! distinct newtypes keeps the two from being mixed up and guarantees
//! that a value which exists has already passed its character check.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors produced when a token fails its character check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token is empty.
    #[error("{kind} must not be empty")]
    Empty {
        /// Which identifier was being parsed.
        kind: &'static str,
    },

    /// The token contains a character outside the allowed set.
    #[error("{kind} contains invalid character {found:?}")]
    InvalidCharacter {
        /// Which identifier was being parsed.
        kind: &'static str,
        /// The first offending character.
        found: char,
    },
}

/// Generates a newtype wrapper around a non-empty [`String`] whose every
/// character satisfies `$allowed`.
macro_rules! define_token {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal, $allowed:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate `raw` and wrap it.
            pub fn parse(raw: &str) -> Result<Self, TokenError> {
                if raw.is_empty() {
                    return Err(TokenError::Empty { kind: $label });
                }
                let allowed: fn(char) -> bool = $allowed;
                if let Some(found) = raw.chars().find(|c| !allowed(*c)) {
                    return Err(TokenError::InvalidCharacter { kind: $label, found });
                }
                Ok(Self(raw.to_owned()))
            }

            /// The token text exactly as it appeared in the log.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TokenError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(token: $name) -> Self {
                token.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_token! {
    /// A client name: one or more of `A-Z`, `a-z`, `0-9`, `_`, `-`.
    ClientName, "client name", |c| c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

define_token! {
    /// A 1-based table number as written in the log: one or more ASCII digits.
    ///
    /// The raw digits are kept so that echoed records reproduce the input
    /// verbatim (`007` stays `007`). Range against the table count is
    /// checked by the processor, not here.
    TableNumber, "table number", |c| c.is_ascii_digit()
}

impl TableNumber {
    /// Numeric value, or `None` if it does not fit in a `u32`.
    pub fn value(&self) -> Option<u32> {
        self.0.parse().ok()
    }

    /// Zero-based table index if the number names one of `table_count`
    /// tables.
    pub fn to_index(&self, table_count: u32) -> Option<usize> {
        let number = self.value()?;
        let index = number.checked_sub(1)?;
        if index < table_count {
            usize::try_from(index).ok()
        } else {
            None
        }
    }

    /// The canonical table number for a zero-based index.
    pub fn from_index(index: usize) -> Self {
        Self(index.saturating_add(1).to_string())
    }
}
