use soroban_sdk::{Address, Env, Symbol};

use crate::types::SettlementResult;

/// Emitted once when the sale is configured.
///
/// # Topics
/// * `Symbol` - "sale_initialized"
/// * `Address` - The project admin
///
/// # Data
/// * `Address` - Bid token
/// * `Address` - Ask token
/// * `u64` - Bidding deadline
pub fn emit_sale_initialized(
    e: &Env,
    project_admin: &Address,
    bid_token: &Address,
    ask_token: &Address,
    sale_end: u64,
) {
    let topics = (Symbol::new(e, "sale_initialized"), project_admin.clone());
    e.events()
        .publish(topics, (bid_token.clone(), ask_token.clone(), sale_end));
}

/// Emitted when an investor submits a sealed bid. Only the escrowed capital is
/// public.
///
/// # Topics
/// * `Symbol` - "bid_submitted"
/// * `Address` - The investor
///
/// # Data
/// * `i128` - Escrowed capital
/// * `u32` - Submission sequence
pub fn emit_bid_submitted(e: &Env, investor: &Address, capital: i128, sequence: u32) {
    let topics = (Symbol::new(e, "bid_submitted"), investor.clone());
    e.events().publish(topics, (capital, sequence));
}

pub fn emit_tokens_supplied(e: &Env, project_admin: &Address, amount: i128, total: i128) {
    let topics = (Symbol::new(e, "tokens_supplied"), project_admin.clone());
    e.events().publish(topics, (amount, total));
}

/// Emitted during settlement for a bid that did not decrypt to a valid request.
/// Its capital stays fully refundable.
///
/// # Topics
/// * `Symbol` - "bid_rejected"
/// * `Address` - The investor
///
/// # Data
/// * `u32` - Error code explaining the rejection
pub fn emit_bid_rejected(e: &Env, investor: &Address, reason: u32) {
    let topics = (Symbol::new(e, "bid_rejected"), investor.clone());
    e.events().publish(topics, reason);
}

/// # Topics
/// * `Symbol` - "sale_settled"
///
/// # Data
/// * `i128` - Capital raised
/// * `i128` - Tokens allocated
/// * `i128` - Clearing price
/// * `u32` - Number of winning bids
pub fn emit_sale_settled(e: &Env, result: &SettlementResult) {
    let topics = (Symbol::new(e, "sale_settled"),);
    let data = (
        result.capital_raised,
        result.tokens_allocated,
        result.clearing_price,
        result.winners,
    );
    e.events().publish(topics, data);
}

pub fn emit_grant_assigned(e: &Env, investor: &Address, grant_id: u64, tokens: i128) {
    let topics = (Symbol::new(e, "grant_assigned"), investor.clone());
    e.events().publish(topics, (grant_id, tokens));
}

pub fn emit_excess_claimed(e: &Env, investor: &Address, amount: i128) {
    let topics = (Symbol::new(e, "excess_claimed"), investor.clone());
    e.events().publish(topics, amount);
}

/// # Topics
/// * `Symbol` - "sale_cancelled"
/// * `Address` - The project admin
///
/// # Data
/// * `i128` - Ask tokens returned to the admin
pub fn emit_sale_cancelled(e: &Env, project_admin: &Address, returned_tokens: i128) {
    let topics = (Symbol::new(e, "sale_cancelled"), project_admin.clone());
    e.events().publish(topics, returned_tokens);
}

pub fn emit_capital_withdrawn(e: &Env, investor: &Address, amount: i128) {
    let topics = (Symbol::new(e, "capital_withdrawn"), investor.clone());
    e.events().publish(topics, amount);
}

/// # Topics
/// * `Symbol` - "unclaimed_withdrawn"
/// * `Address` - The project admin
///
/// # Data
/// * `i128` - Bid tokens swept after the refund window closed
pub fn emit_unclaimed_withdrawn(e: &Env, project_admin: &Address, amount: i128) {
    let topics = (Symbol::new(e, "unclaimed_withdrawn"), project_admin.clone());
    e.events().publish(topics, amount);
}
