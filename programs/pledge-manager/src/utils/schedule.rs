//! Height-based payment schedule arithmetic.
//! - next_due = last_payment_block + interval
//! - a payment is due at any height >= next_due (inclusive)
//! - no catch-up: each payment re-anchors the schedule at the height it ran

use crate::error::PledgeError;

/// Height at which the next payment becomes eligible.
pub fn next_due_block(last_payment_block: u64, interval: u64) -> Result<u64, PledgeError> {
    last_payment_block
        .checked_add(interval)
        .ok_or(PledgeError::MathOverflow)
}

/// True if `height` has reached the next due height.
pub fn is_due(height: u64, last_payment_block: u64, interval: u64) -> Result<bool, PledgeError> {
    Ok(height >= next_due_block(last_payment_block, interval)?)
}

/// Payments still allowed before the quota is exhausted.
pub fn payments_remaining(duration: u64, payments_made: u64) -> u64 {
    duration.saturating_sub(payments_made)
}

/// Heights left until the next payment is due; 0 if already due.
pub fn blocks_until_due(
    height: u64,
    last_payment_block: u64,
    interval: u64,
) -> Result<u64, PledgeError> {
    Ok(next_due_block(last_payment_block, interval)?.saturating_sub(height))
}
