//! Linear Epoch Vesting Contract
//!
//! Holds an arena of independently owned vesting grants. Each grant releases
//! its total in equal steps at epoch boundaries once the cliff has ended.
//!
//! ## Key design decisions
//!
//! - **Factory arena**: `create_vesting_grant` reserves a fresh slot and runs its
//!   one-shot initializer in the same call. Slot `0` is a template created already
//!   initialized, so it can never be configured.
//! - **One-shot initialization**: the initialized check runs before any auth, so
//!   re-initialization fails the same way for every caller.
//! - **Checks-Effects-Interactions**: `released` and the committed balance are
//!   updated *before* the token transfer.
//! - **Funded grants**: a grant is only configured when the contract already holds
//!   enough unreserved balance of its token.
//! - **Public release**: anyone may call `release`; tokens only ever go to the
//!   grant owner.

#![no_std]

pub mod epoch;
mod events;
pub mod types;

pub use types::{GrantParams, GrantSlot, VestingGrant};

use settlement_errors::{require_non_zero, ContractError};
use soroban_sdk::{contract, contractimpl, log, token::TokenClient, Address, Env};
use types::DataKey;



#[cfg(test)]
mod test_factory;

/// Id of the template slot.
pub const TEMPLATE_GRANT_ID: u64 = 0;

// ─── TTL constants ────────────────────────────────────────────────────────────

/// Minimum ledger sequence TTL before a bump is requested (~1 day at 5 s/ledger).
const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
const BUMP_TARGET: u32 = 518_400;

// ─── Helpers ───────────────────────────────────────────────────────────────

fn read_admin(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ContractError::NotInitialized)
}

fn require_admin(e: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    if read_admin(e)? != *caller {
        return Err(ContractError::NotRegistryAdmin);
    }
    Ok(())
}

fn is_creator(e: &Env, caller: &Address) -> bool {
    e.storage()
        .instance()
        .get(&DataKey::Creator(caller.clone()))
        .unwrap_or(false)
}

fn load_slot(e: &Env, grant_id: u64) -> Result<GrantSlot, ContractError> {
    let key = DataKey::Slot(grant_id);
    let storage = e.storage().persistent();
    let slot: GrantSlot = storage.get(&key).ok_or(ContractError::GrantNotFound)?;
    storage.extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
    Ok(slot)
}

fn save_slot(e: &Env, grant_id: u64, slot: &GrantSlot) {
    let key = DataKey::Slot(grant_id);
    e.storage().persistent().set(&key, slot);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

fn load_grant(e: &Env, grant_id: u64) -> Result<VestingGrant, ContractError> {
    let key = DataKey::Grant(grant_id);
    let storage = e.storage().persistent();
    let grant: VestingGrant = storage.get(&key).ok_or(ContractError::GrantNotFound)?;
    storage.extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
    Ok(grant)
}

fn save_grant(e: &Env, grant_id: u64, grant: &VestingGrant) {
    let key = DataKey::Grant(grant_id);
    e.storage().persistent().set(&key, grant);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

fn committed(e: &Env, token: &Address) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::Committed(token.clone()))
        .unwrap_or(0)
}

fn set_committed(e: &Env, token: &Address, amount: i128) {
    e.storage()
        .instance()
        .set(&DataKey::Committed(token.clone()), &amount);
}

/// Validate grant parameters and derive the stored grant.
fn build_grant(e: &Env, params: &GrantParams) -> Result<VestingGrant, ContractError> {
    require_non_zero(e, &params.owner)?;
    require_non_zero(e, &params.token)?;
    if params.total_amount <= 0
        || params.duration == 0
        || params.cliff_offset == 0
        || params.epoch_duration == 0
        || params.epoch_count == 0
    {
        return Err(ContractError::ZeroValue);
    }
    if params.cliff_offset >= params.duration {
        return Err(ContractError::InvalidVestingTerms);
    }
    let span = params
        .epoch_duration
        .checked_mul(params.epoch_count as u64)
        .ok_or(ContractError::Overflow)?;
    if span != params.duration {
        return Err(ContractError::InvalidVestingTerms);
    }
    params
        .start
        .checked_add(params.duration)
        .ok_or(ContractError::Overflow)?;
    let cliff_end = params
        .start
        .checked_add(params.cliff_offset)
        .and_then(|t| t.checked_add(1))
        .ok_or(ContractError::Overflow)?;

    Ok(VestingGrant {
        owner: params.owner.clone(),
        token: params.token.clone(),
        total_amount: params.total_amount,
        start: params.start,
        duration: params.duration,
        cliff_end,
        epoch_duration: params.epoch_duration,
        epoch_count: params.epoch_count,
        released: 0,
    })
}

fn reserve_slot(e: &Env, creator: &Address) -> Result<u64, ContractError> {
    if !is_creator(e, creator) && read_admin(e)? != *creator {
        return Err(ContractError::NotGrantCreator);
    }

    let grant_id: u64 = e
        .storage()
        .instance()
        .get(&DataKey::NextGrantId)
        .ok_or(ContractError::NotInitialized)?;
    let next = grant_id.checked_add(1).ok_or(ContractError::Overflow)?;
    e.storage().instance().set(&DataKey::NextGrantId, &next);

    save_slot(
        e,
        grant_id,
        &GrantSlot {
            creator: creator.clone(),
            initialized: false,
        },
    );
    events::emit_grant_created(e, grant_id, creator);
    Ok(grant_id)
}

/// Validate, check funding and store the grant. The slot must be uninitialized.
fn configure(
    e: &Env,
    caller: &Address,
    grant_id: u64,
    mut slot: GrantSlot,
    params: &GrantParams,
) -> Result<VestingGrant, ContractError> {
    if slot.creator != *caller {
        return Err(ContractError::NotGrantCreator);
    }

    let grant = build_grant(e, params)?;

    let reserved = committed(e, &grant.token)
        .checked_add(grant.total_amount)
        .ok_or(ContractError::Overflow)?;
    let balance = TokenClient::new(e, &grant.token).balance(&e.current_contract_address());
    if balance < reserved {
        return Err(ContractError::VestingUnderfunded);
    }

    slot.initialized = true;
    save_slot(e, grant_id, &slot);
    save_grant(e, grant_id, &grant);
    set_committed(e, &grant.token, reserved);

    events::emit_grant_initialized(e, grant_id, &grant);
    Ok(grant)
}

fn vested_at(grant: &VestingGrant, timestamp: u64) -> Result<i128, ContractError> {
    epoch::vested_amount(
        grant.total_amount,
        timestamp,
        grant.start,
        grant.cliff_end,
        grant.epoch_duration,
        grant.epoch_count,
    )
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct LinearVesting;

#[contractimpl]
impl LinearVesting {
    // ── Admin setup ────────────────────────────────────────────────────────

    /// One-time initialization. Stores `admin` and creates the template slot.
    pub fn initialize(e: Env, admin: Address) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        require_non_zero(&e, &admin)?;
        admin.require_auth();

        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage()
            .instance()
            .set(&DataKey::NextGrantId, &(TEMPLATE_GRANT_ID + 1));
        save_slot(
            &e,
            TEMPLATE_GRANT_ID,
            &GrantSlot {
                creator: e.current_contract_address(),
                initialized: true,
            },
        );
        Ok(())
    }

    /// Allow or revoke an address (typically a sale contract) as grant creator.
    pub fn set_grant_creator(
        e: Env,
        admin: Address,
        creator: Address,
        enabled: bool,
    ) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        require_non_zero(&e, &creator)?;
        if enabled {
            e.storage()
                .instance()
                .set(&DataKey::Creator(creator.clone()), &true);
        } else {
            e.storage()
                .instance()
                .remove(&DataKey::Creator(creator.clone()));
        }
        events::emit_creator_updated(&e, &creator, enabled);
        Ok(())
    }

    /// Returns `true` if `creator` may create grants.
    pub fn is_grant_creator(e: Env, creator: Address) -> bool {
        is_creator(&e, &creator)
    }

    // ── Grant factory ──────────────────────────────────────────────────────

    /// Reserve an unconfigured grant slot owned by `creator`.
    ///
    /// Requirements:
    /// - `creator` is the admin or an allowed grant creator
    pub fn new_grant(e: Env, creator: Address) -> Result<u64, ContractError> {
        creator.require_auth();
        reserve_slot(&e, &creator)
    }

    /// Configure a reserved grant. Succeeds at most once per slot.
    ///
    /// Fails with `AlreadyInitialized` for a configured grant or the template,
    /// whoever the caller is. Otherwise only the slot's creator may configure it,
    /// and the contract must already hold enough unreserved `token` balance.
    pub fn initialize_grant(
        e: Env,
        caller: Address,
        grant_id: u64,
        params: GrantParams,
    ) -> Result<VestingGrant, ContractError> {
        let slot = load_slot(&e, grant_id)?;
        if slot.initialized {
            return Err(ContractError::AlreadyInitialized);
        }
        caller.require_auth();
        configure(&e, &caller, grant_id, slot, &params)
    }

    /// Factory entry point: reserve a slot and configure it in one call.
    /// Returns the new grant id.
    pub fn create_vesting_grant(
        e: Env,
        creator: Address,
        params: GrantParams,
    ) -> Result<u64, ContractError> {
        creator.require_auth();
        let grant_id = reserve_slot(&e, &creator)?;
        let slot = load_slot(&e, grant_id)?;
        configure(&e, &creator, grant_id, slot, &params)?;
        Ok(grant_id)
    }

    // ── Release ────────────────────────────────────────────────────────────

    /// Transfer everything vested but not yet released to the grant owner.
    ///
    /// Callable by anyone. Fails with `CliffNotEnded` while
    /// `now < cliff_end`. Returns `0` without transferring when nothing new has
    /// vested.
    pub fn release(e: Env, grant_id: u64) -> Result<i128, ContractError> {
        let mut grant = load_grant(&e, grant_id)?;
        let now = e.ledger().timestamp();
        if now < grant.cliff_end {
            log!(&e, "cliff not ended", grant_id, now, grant.cliff_end);
            return Err(ContractError::CliffNotEnded);
        }

        let vested = vested_at(&grant, now)?;
        let releasable = vested
            .checked_sub(grant.released)
            .ok_or(ContractError::Underflow)?;
        if releasable <= 0 {
            return Ok(0);
        }

        // CEI: record the release before transferring.
        grant.released = vested;
        save_grant(&e, grant_id, &grant);
        let outstanding = committed(&e, &grant.token)
            .checked_sub(releasable)
            .ok_or(ContractError::Underflow)?;
        set_committed(&e, &grant.token, outstanding);

        TokenClient::new(&e, &grant.token).transfer(
            &e.current_contract_address(),
            &grant.owner,
            &releasable,
        );

        events::emit_tokens_released(&e, grant_id, releasable, grant.released);
        Ok(releasable)
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn get_admin(e: Env) -> Result<Address, ContractError> {
        read_admin(&e)
    }

    /// Returns the configured grant.
    pub fn get_grant(e: Env, grant_id: u64) -> Result<VestingGrant, ContractError> {
        load_grant(&e, grant_id)
    }

    /// Returns `true` if the slot exists and has been configured (the template
    /// always reports `true`).
    pub fn is_initialized(e: Env, grant_id: u64) -> bool {
        e.storage()
            .persistent()
            .get::<_, GrantSlot>(&DataKey::Slot(grant_id))
            .map(|slot| slot.initialized)
            .unwrap_or(false)
    }

    /// Number of slots handed out, template included.
    pub fn grant_count(e: Env) -> u64 {
        e.storage()
            .instance()
            .get(&DataKey::NextGrantId)
            .unwrap_or(0)
    }

    /// Amount vested at `timestamp`.
    pub fn vested_amount(e: Env, grant_id: u64, timestamp: u64) -> Result<i128, ContractError> {
        let grant = load_grant(&e, grant_id)?;
        vested_at(&grant, timestamp)
    }

    /// Amount `release` would transfer now.
    pub fn releasable_amount(e: Env, grant_id: u64) -> Result<i128, ContractError> {
        let grant = load_grant(&e, grant_id)?;
        let vested = vested_at(&grant, e.ledger().timestamp())?;
        Ok(vested.saturating_sub(grant.released).max(0))
    }

    /// Total unreleased amount reserved for grants of `token`.
    pub fn committed_amount(e: Env, token: Address) -> i128 {
        committed(&e, &token)
    }

    pub fn get_cliff_end(e: Env, grant_id: u64) -> Result<u64, ContractError> {
        Ok(load_grant(&e, grant_id)?.cliff_end)
    }

    /// Current 1-based epoch of the grant.
    pub fn get_current_epoch(e: Env, grant_id: u64) -> Result<u32, ContractError> {
        let now = e.ledger().timestamp();
        Self::get_current_epoch_at_timestamp(e, grant_id, now)
    }

    /// Epoch of the grant at `timestamp`.
    pub fn get_current_epoch_at_timestamp(
        e: Env,
        grant_id: u64,
        timestamp: u64,
    ) -> Result<u32, ContractError> {
        let grant = load_grant(&e, grant_id)?;
        Ok(epoch::current_epoch(
            timestamp,
            grant.start,
            grant.epoch_duration,
            grant.epoch_count,
        ))
    }
}
