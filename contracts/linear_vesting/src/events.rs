use soroban_sdk::{Address, Env, Symbol};

use crate::types::VestingGrant;

/// Emitted when the admin allows or revokes a grant creator.
///
/// # Topics
/// * `Symbol` - "creator_updated"
/// * `Address` - The creator
///
/// # Data
/// * `bool` - Whether the creator is now allowed
pub fn emit_creator_updated(e: &Env, creator: &Address, enabled: bool) {
    let topics = (Symbol::new(e, "creator_updated"), creator.clone());
    e.events().publish(topics, enabled);
}

/// Emitted when a grant slot is reserved.
pub fn emit_grant_created(e: &Env, grant_id: u64, creator: &Address) {
    let topics = (Symbol::new(e, "grant_created"), grant_id);
    e.events().publish(topics, creator.clone());
}

/// Emitted when a grant is configured.
///
/// # Topics
/// * `Symbol` - "grant_initialized"
/// * `u64` - The grant id
///
/// # Data
/// * `Address` - The beneficiary
/// * `i128` - Total amount
/// * `u64` - Start timestamp
/// * `u64` - Cliff end timestamp
pub fn emit_grant_initialized(e: &Env, grant_id: u64, grant: &VestingGrant) {
    let topics = (Symbol::new(e, "grant_initialized"), grant_id);
    let data = (
        grant.owner.clone(),
        grant.total_amount,
        grant.start,
        grant.cliff_end,
    );
    e.events().publish(topics, data);
}

/// Emitted when vested tokens are released to the owner.
///
/// # Topics
/// * `Symbol` - "tokens_released"
/// * `u64` - The grant id
///
/// # Data
/// * `i128` - Amount released in this call
/// * `i128` - Cumulative amount released
pub fn emit_tokens_released(e: &Env, grant_id: u64, amount: i128, released: i128) {
    let topics = (Symbol::new(e, "tokens_released"), grant_id);
    e.events().publish(topics, (amount, released));
}
