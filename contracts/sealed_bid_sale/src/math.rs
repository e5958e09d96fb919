//! Overflow-safe arithmetic helpers for settlement calculations.
//!
//! All functions use checked arithmetic and return `Overflow` / `Underflow`
//! instead of wrapping or panicking.

use settlement_errors::ContractError;

/// Basis points denominator.
pub const BPS_DENOMINATOR: i128 = 10_000;

#[inline]
pub fn add_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

#[inline]
pub fn sub_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::Underflow)
}

#[inline]
pub fn mul_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_mul(b).ok_or(ContractError::Overflow)
}

/// `a * b / c`, rounded down. `c` must be non-zero.
#[inline]
pub fn mul_div_floor(a: i128, b: i128, c: i128) -> Result<i128, ContractError> {
    mul_i128(a, b)?
        .checked_div(c)
        .ok_or(ContractError::Overflow)
}

/// Basis-point share of an amount: `amount * bps / 10_000`, rounded down.
#[inline]
pub fn bps(amount: i128, bps: u32) -> Result<i128, ContractError> {
    mul_div_floor(amount, bps as i128, BPS_DENOMINATOR)
}
