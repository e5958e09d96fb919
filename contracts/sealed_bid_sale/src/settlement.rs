//! Price-time ranking, pro-rata clearing of the marginal bid, and fee splits.
//!
//! These functions only compute; the contract writes their results and moves
//! tokens.

use settlement_errors::ContractError;
use soroban_sdk::{Env, Vec};

use crate::math;
use crate::types::{Fill, RankedBid};

/// Scale applied to `clearing_price`: bid-token units per `PRICE_SCALE` ask-token units.
pub const PRICE_SCALE: i128 = 10_000_000;

/// Largest capital or token amount a bid may carry. Keeps every cross product
/// of two amounts inside `i128`.
pub const MAX_BID_AMOUNT: i128 = i64::MAX as i128;

/// Most bids one sale accepts. Settlement decrypts every bid and opens a
/// vesting grant per winner in a single invocation, at roughly 5M CPU
/// instructions per bid against the 100M per-transaction limit.
pub const MAX_BIDS: u32 = 12;

/// Outcome of walking the ranking against the available supply.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Clearing {
    /// One fill per ranked bid, in ranking order; losing bids carry zeros.
    pub fills: Vec<Fill>,
    pub capital_raised: i128,
    pub tokens_allocated: i128,
    pub clearing_price: i128,
    pub winners: u32,
}

/// A basis-point split of an amount between the protocol and the referrer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FeeSplit {
    pub protocol: i128,
    pub referrer: i128,
    /// What remains after both fees.
    pub net: i128,
}

/// Returns `true` if `a` has priority over `b`: a strictly higher price
/// `capital / tokens`, or the same price and an earlier sequence.
pub fn outranks(a: &RankedBid, b: &RankedBid) -> Result<bool, ContractError> {
    let lhs = math::mul_i128(a.capital, b.tokens)?;
    let rhs = math::mul_i128(b.capital, a.tokens)?;
    if lhs != rhs {
        return Ok(lhs > rhs);
    }
    Ok(a.sequence < b.sequence)
}

/// Sort bids by price-time priority, best first.
pub fn rank(e: &Env, bids: &Vec<RankedBid>) -> Result<Vec<RankedBid>, ContractError> {
    let mut ranked: Vec<RankedBid> = Vec::new(e);
    for bid in bids.iter() {
        let mut position = ranked.len();
        for (i, existing) in ranked.iter().enumerate() {
            if outranks(&bid, &existing)? {
                position = i as u32;
                break;
            }
        }
        ranked.insert(position, bid);
    }
    Ok(ranked)
}

/// Tokens that can be allocated so that token fees on the allocation still fit
/// in `supplied`: `supplied * 10_000 / (10_000 + protocol_bps + referrer_bps)`.
pub fn allocatable_supply(
    supplied: i128,
    protocol_bps: u32,
    referrer_bps: u32,
) -> Result<i128, ContractError> {
    let denominator = math::add_i128(
        math::BPS_DENOMINATOR,
        protocol_bps as i128 + referrer_bps as i128,
    )?;
    math::mul_div_floor(supplied, math::BPS_DENOMINATOR, denominator)
}

/// Fill ranked bids from `available` tokens.
///
/// Each bid receives `min(requested, remaining)`. A partially filled bid clears
/// `capital * filled / requested`, rounded down.
pub fn clear(e: &Env, ranked: &Vec<RankedBid>, available: i128) -> Result<Clearing, ContractError> {
    let mut fills: Vec<Fill> = Vec::new(e);
    let mut remaining = available;
    let mut capital_raised = 0i128;
    let mut clearing_price = 0i128;
    let mut winners = 0u32;

    for bid in ranked.iter() {
        let filled = bid.tokens.min(remaining).max(0);
        let capital_cleared = if filled == bid.tokens {
            bid.capital
        } else {
            math::mul_div_floor(bid.capital, filled, bid.tokens)?
        };
        if filled > 0 {
            remaining = math::sub_i128(remaining, filled)?;
            capital_raised = math::add_i128(capital_raised, capital_cleared)?;
            clearing_price = math::mul_div_floor(bid.capital, PRICE_SCALE, bid.tokens)?;
            winners += 1;
        }
        fills.push_back(Fill {
            investor: bid.investor.clone(),
            tokens: filled,
            capital_cleared: if filled > 0 { capital_cleared } else { 0 },
        });
    }

    Ok(Clearing {
        fills,
        capital_raised,
        tokens_allocated: math::sub_i128(available, remaining)?,
        clearing_price,
        winners,
    })
}

/// Split `amount` into protocol and referrer fees by basis points.
pub fn split_fees(amount: i128, protocol_bps: u32, referrer_bps: u32) -> Result<FeeSplit, ContractError> {
    let protocol = math::bps(amount, protocol_bps)?;
    let referrer = math::bps(amount, referrer_bps)?;
    let net = math::sub_i128(math::sub_i128(amount, protocol)?, referrer)?;
    Ok(FeeSplit {
        protocol,
        referrer,
        net,
    })
}
