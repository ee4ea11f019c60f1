//! Club parameters for one simulated day.
//!
//! The three header lines of the input log (table count, opening hours,
//! hourly price) become a [`ClubConfig`]. Construction enforces the one
//! invariant the rest of the engine leans on: the club closes strictly
//! after it opens.

use serde::Serialize;

use club_types::TimeOfDay;

/// Errors that can occur when building a [`ClubConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The closing time is not strictly after the opening time.
    #[error("closing time {close} is not after opening time {open}")]
    CloseNotAfterOpen {
        /// Configured opening time.
        open: TimeOfDay,
        /// Configured closing time.
        close: TimeOfDay,
    },
}

/// Fixed parameters of the club for the simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClubConfig {
    table_count: u32,
    open_time: TimeOfDay,
    close_time: TimeOfDay,
    hour_cost: u64,
}

impl ClubConfig {
    /// Create a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CloseNotAfterOpen`] if `close_time <= open_time`.
    pub fn new(
        table_count: u32,
        open_time: TimeOfDay,
        close_time: TimeOfDay,
        hour_cost: u64,
    ) -> Result<Self, ConfigError> {
        if close_time <= open_time {
            return Err(ConfigError::CloseNotAfterOpen {
                open: open_time,
                close: close_time,
            });
        }
        Ok(Self {
            table_count,
            open_time,
            close_time,
            hour_cost,
        })
    }

    /// Number of tables in the club.
    pub const fn table_count(&self) -> u32 {
        self.table_count
    }

    /// Opening time; arrivals before it are refused.
    pub const fn open_time(&self) -> TimeOfDay {
        self.open_time
    }

    /// Closing time; arrivals at or after it are refused and remaining
    /// sessions are settled against it.
    pub const fn close_time(&self) -> TimeOfDay {
        self.close_time
    }

    /// Price of one started hour at a table.
    pub const fn hour_cost(&self) -> u64 {
        self.hour_cost
    }

    /// Whether the club accepts arrivals at `time`: `open <= time < close`.
    pub fn is_open_at(&self, time: TimeOfDay) -> bool {
        self.open_time <= time && time < self.close_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config_exposes_fields() {
        let cfg = ClubConfig::new(3, TimeOfDay::new(9, 0), TimeOfDay::new(19, 0), 10);
        assert!(cfg.is_ok());
        if let Ok(cfg) = cfg {
            assert_eq!(cfg.table_count(), 3);
            assert_eq!(cfg.open_time(), TimeOfDay::new(9, 0));
            assert_eq!(cfg.close_time(), TimeOfDay::new(19, 0));
            assert_eq!(cfg.hour_cost(), 10);
        }
    }

    #[test]
    fn close_must_be_after_open() {
        let same = ClubConfig::new(1, TimeOfDay::new(9, 0), TimeOfDay::new(9, 0), 10);
        assert!(matches!(same, Err(ConfigError::CloseNotAfterOpen { .. })));

        let reversed = ClubConfig::new(1, TimeOfDay::new(19, 0), TimeOfDay::new(9, 0), 10);
        assert!(reversed.is_err());
    }

    #[test]
    fn opening_window_is_half_open() {
        let cfg = ClubConfig::new(1, TimeOfDay::new(9, 0), TimeOfDay::new(19, 0), 10);
        assert!(cfg.is_ok());
        if let Ok(cfg) = cfg {
            assert!(!cfg.is_open_at(TimeOfDay::new(8, 59)));
            assert!(cfg.is_open_at(TimeOfDay::new(9, 0)));
            assert!(cfg.is_open_at(TimeOfDay::new(18, 59)));
            assert!(!cfg.is_open_at(TimeOfDay::new(19, 0)));
        }
    }

    #[test]
    fn zero_tables_is_allowed() {
        assert!(ClubConfig::new(0, TimeOfDay::new(9, 0), TimeOfDay::new(19, 0), 10).is_ok());
    }
}
