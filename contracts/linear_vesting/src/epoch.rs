//! Epoch clock and epoch-stepped vesting math.
//!
//! Pure functions over timestamps; no storage, no `Env`. Epochs are 1-based:
//! epoch `1` starts at `start`, and the index is clamped to `epoch_count` once
//! the full duration has elapsed.

use settlement_errors::ContractError;

/// Epoch index at `now`: `0` before `start`, otherwise
/// `min(epoch_count, (now - start) / epoch_duration + 1)`.
///
/// `epoch_duration` must be non-zero; grants validate this at initialization.
pub fn current_epoch(now: u64, start: u64, epoch_duration: u64, epoch_count: u32) -> u32 {
    if now < start {
        return 0;
    }
    let index = (now - start) / epoch_duration + 1;
    clamp_to_count(index, epoch_count)
}

/// Number of fully completed epochs at `now`, `0` before `start`.
pub fn elapsed_epochs(now: u64, start: u64, epoch_duration: u64, epoch_count: u32) -> u32 {
    if now < start {
        return 0;
    }
    clamp_to_count((now - start) / epoch_duration, epoch_count)
}

/// Amount of `total` vested at `now`.
///
/// Zero until the cliff has ended (`now >= cliff_end`); afterwards
/// `total * elapsed_epochs / epoch_count`, which reaches `total` exactly when
/// every epoch has completed.
pub fn vested_amount(
    total: i128,
    now: u64,
    start: u64,
    cliff_end: u64,
    epoch_duration: u64,
    epoch_count: u32,
) -> Result<i128, ContractError> {
    if now < cliff_end {
        return Ok(0);
    }
    let elapsed = elapsed_epochs(now, start, epoch_duration, epoch_count);
    if elapsed == epoch_count {
        return Ok(total);
    }
    total
        .checked_mul(elapsed as i128)
        .ok_or(ContractError::Overflow)?
        .checked_div(epoch_count as i128)
        .ok_or(ContractError::Overflow)
}

fn clamp_to_count(index: u64, epoch_count: u32) -> u32 {
    if index >= epoch_count as u64 {
        epoch_count
    } else {
        index as u32
    }
}
