//! The billing rule: every started hour is paid in full.

use club_types::MINUTES_PER_HOUR;

use crate::LedgerError;

/// Number of hours billed for a session of `minutes`: `ceil(minutes / 60)`.
///
/// A zero-minute session bills zero hours; there is no minimum charge.
pub const fn billable_hours(minutes: u32) -> u32 {
    minutes.div_ceil(MINUTES_PER_HOUR)
}

/// Money charged for a session of `minutes` at `hour_cost` per started hour.
///
/// # Errors
///
/// Returns [`LedgerError::Overflow`] if the charge does not fit in a `u64`.
pub fn session_charge(minutes: u32, hour_cost: u64) -> Result<u64, LedgerError> {
    u64::from(billable_hours(minutes))
        .checked_mul(hour_cost)
        .ok_or(LedgerError::Overflow {
            context: "session charge",
        })
}
