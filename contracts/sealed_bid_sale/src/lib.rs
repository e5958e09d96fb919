//! Sealed-Bid Token Sale Contract
//!
//! Investors escrow capital in the bid token and submit the ask-token amount they
//! want as a ciphertext sealed to the sale's public key. After the bidding
//! deadline the project admin (or the protocol signer) reveals the private key,
//! bids are decrypted and ranked by price-time priority, fees are split, and every
//! winner's allocation is moved into a linear vesting grant.
//!
//! ## Key design decisions
//!
//! - **Derived phases**: the sale status is computed on every call from the stored
//!   deadline and the settled/cancelled timestamps.
//! - **Per-bid rejection**: a bid that fails to decrypt, carries another bidder's
//!   salt, or requests a non-positive amount gets zero allocation and a full
//!   refund instead of blocking settlement.
//! - **Checks-Effects-Interactions**: allocations, the settlement result and the
//!   settled timestamp are written before any token moves.
//! - **Registry roles**: fee receiver, signer and vesting factory are resolved
//!   through the address registry when they are needed.
//! - **Bounded settlement**: at most `settlement::MAX_BIDS` bids are accepted so
//!   settlement always fits in one invocation.
//! - **Unclaimed capital**: refunds still owed are tracked, and whatever is left
//!   once the refund window closes can be swept to the project admin.

#![no_std]

mod collaborators;
mod events;
pub mod math;
pub mod sealed_bid;
pub mod settlement;
pub mod types;

pub use collaborators::{GrantParams, ROLE_FEE_RECEIVER, ROLE_SIGNER, ROLE_VESTING};
pub use types::*;

use collaborators::{RegistryClient, VestingClient};
use settlement_errors::{require_non_zero, ContractError};
use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, BytesN, Env, Map, Symbol, Vec};


#[cfg(test)]
mod test_sealed_bid;







// ─── TTL constants ────────────────────────────────────────────────────────────

const BUMP_THRESHOLD: u32 = 17_280;
const BUMP_TARGET: u32 = 518_400;

// ─── Storage helpers ───────────────────────────────────────────────────────

fn load_config(e: &Env) -> Result<SaleConfig, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}

fn load_times(e: &Env) -> Result<SaleTimes, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Times)
        .ok_or(ContractError::NotInitialized)
}

fn load_sealed_bid_config(e: &Env) -> Result<SealedBidConfig, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::SealedBidConfig)
        .ok_or(ContractError::NotInitialized)
}

fn load_vesting_terms(e: &Env) -> Result<VestingTerms, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::VestingTerms)
        .ok_or(ContractError::NotInitialized)
}

fn read_i128(e: &Env, key: &DataKey) -> i128 {
    e.storage().instance().get(key).unwrap_or(0)
}

fn persist<V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(e: &Env, key: &DataKey, value: &V) {
    e.storage().persistent().set(key, value);
    e.storage()
        .persistent()
        .extend_ttl(key, BUMP_THRESHOLD, BUMP_TARGET);
}

fn load_bidders(e: &Env) -> Vec<Address> {
    e.storage()
        .persistent()
        .get(&DataKey::Bidders)
        .unwrap_or(Vec::new(e))
}

fn load_bid(e: &Env, investor: &Address) -> Result<Bid, ContractError> {
    e.storage()
        .persistent()
        .get(&DataKey::Bid(investor.clone()))
        .ok_or(ContractError::BidNotFound)
}

fn load_allocation(e: &Env, investor: &Address) -> Result<Allocation, ContractError> {
    e.storage()
        .persistent()
        .get(&DataKey::Allocation(investor.clone()))
        .ok_or(ContractError::BidNotFound)
}

fn status_at(times: &SaleTimes, now: u64) -> SaleStatus {
    if times.cancelled_at.is_some() {
        SaleStatus::Cancelled
    } else if times.settled_at.is_some() {
        SaleStatus::Settled
    } else if now < times.sale_end {
        SaleStatus::Active
    } else {
        SaleStatus::BiddingClosed
    }
}

fn require_project_admin(config: &SaleConfig, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    if *caller != config.project_admin {
        return Err(ContractError::NotProjectAdmin);
    }
    Ok(())
}

/// Resolve a registry role; an unset role counts as the zero address.
fn resolve_role(e: &Env, registry: &Address, role: &Symbol) -> Result<Address, ContractError> {
    let address = RegistryClient::new(e, registry)
        .get_address(role)
        .ok_or(ContractError::ZeroAddress)?;
    require_non_zero(e, &address)?;
    Ok(address)
}

fn refund_deadline(since: u64, config: &SaleConfig) -> Result<u64, ContractError> {
    since
        .checked_add(config.refund_period_seconds)
        .ok_or(ContractError::Overflow)
}

fn release_refund(e: &Env, amount: i128) -> Result<(), ContractError> {
    let outstanding = math::sub_i128(read_i128(e, &DataKey::OutstandingRefunds), amount)?;
    e.storage()
        .instance()
        .set(&DataKey::OutstandingRefunds, &outstanding);
    Ok(())
}

// ─── Validation ────────────────────────────────────────────────────────────

fn validate_config(e: &Env, config: &SaleConfig) -> Result<(), ContractError> {
    for address in [
        &config.bid_token,
        &config.ask_token,
        &config.project_admin,
        &config.referrer_fee_receiver,
        &config.registry,
    ] {
        require_non_zero(e, address)?;
    }

    if config.sale_period_seconds == 0
        || config.refund_period_seconds == 0
        || config.minimum_invest_amount <= 0
        || config.protocol_fee_on_capital_bps == 0
        || config.protocol_fee_on_tokens_bps == 0
        || config.referrer_fee_on_capital_bps == 0
        || config.referrer_fee_on_tokens_bps == 0
    {
        return Err(ContractError::ZeroValue);
    }

    let capital_bps =
        config.protocol_fee_on_capital_bps as u64 + config.referrer_fee_on_capital_bps as u64;
    let token_bps =
        config.protocol_fee_on_tokens_bps as u64 + config.referrer_fee_on_tokens_bps as u64;
    if capital_bps > math::BPS_DENOMINATOR as u64 || token_bps > math::BPS_DENOMINATOR as u64 {
        return Err(ContractError::InvalidFeeBps);
    }
    Ok(())
}

fn validate_vesting_terms(terms: &VestingTerms) -> Result<(), ContractError> {
    if terms.cliff_offset_seconds == 0
        || terms.duration_seconds == 0
        || terms.epoch_duration_seconds == 0
        || terms.epoch_count == 0
    {
        return Err(ContractError::ZeroValue);
    }
    if terms.cliff_offset_seconds >= terms.duration_seconds {
        return Err(ContractError::InvalidVestingTerms);
    }
    let span = terms
        .epoch_duration_seconds
        .checked_mul(terms.epoch_count as u64)
        .ok_or(ContractError::InvalidVestingTerms)?;
    if span != terms.duration_seconds {
        return Err(ContractError::InvalidVestingTerms);
    }
    Ok(())
}

/// Decrypt a stored bid into its requested token amount.
///
/// Errors here reject the single bid, never the settlement.
fn decrypt_request(e: &Env, bid: &Bid, private_key: &BytesN<32>) -> Result<i128, ContractError> {
    let (amount, salt) = sealed_bid::open(e, &bid.sealed_bid, private_key)?;
    if salt != sealed_bid::bidder_salt(e, &bid.investor) {
        return Err(ContractError::InvalidCiphertext);
    }
    if amount <= 0 {
        return Err(ContractError::AmountMustBePositive);
    }
    if amount > settlement::MAX_BID_AMOUNT {
        return Err(ContractError::Overflow);
    }
    Ok(amount)
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct SealedBidSale;

#[contractimpl]
impl SealedBidSale {
    // ── Setup ──────────────────────────────────────────────────────────────

    /// Configure the sale and open bidding for `sale_period_seconds`.
    ///
    /// # Errors
    /// * `AlreadyInitialized` - the sale is already configured
    /// * `ZeroAddress` - a configured address is zero, or the registry does not
    ///   resolve `fee_recv` or `vesting`
    /// * `ZeroValue` - a period, the minimum investment or a fee is zero
    /// * `InvalidFeeBps` - capital or token fees sum above 100%
    /// * `InvalidVestingTerms` - epochs do not tile the duration, or the cliff
    ///   is not shorter than it
    /// * `InvalidPublicKey` - the key is not a non-identity subgroup point
    pub fn initialize(
        e: Env,
        config: SaleConfig,
        sealed_bid_config: SealedBidConfig,
        vesting_terms: VestingTerms,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Config) {
            return Err(ContractError::AlreadyInitialized);
        }
        config.project_admin.require_auth();

        validate_config(&e, &config)?;
        validate_vesting_terms(&vesting_terms)?;
        if !sealed_bid::is_valid_point(&e, &sealed_bid_config.public_key) {
            return Err(ContractError::InvalidPublicKey);
        }
        resolve_role(&e, &config.registry, &ROLE_FEE_RECEIVER)?;
        resolve_role(&e, &config.registry, &ROLE_VESTING)?;

        let now = e.ledger().timestamp();
        let sale_end = now
            .checked_add(config.sale_period_seconds)
            .ok_or(ContractError::Overflow)?;
        let times = SaleTimes {
            sale_start: now,
            sale_end,
            settled_at: None,
            cancelled_at: None,
        };

        let storage = e.storage().instance();
        storage.set(&DataKey::Config, &config);
        storage.set(&DataKey::SealedBidConfig, &sealed_bid_config);
        storage.set(&DataKey::VestingTerms, &vesting_terms);
        storage.set(&DataKey::Times, &times);
        storage.set(&DataKey::TotalEscrowed, &0i128);
        storage.set(&DataKey::TokensSupplied, &0i128);

        events::emit_sale_initialized(
            &e,
            &config.project_admin,
            &config.bid_token,
            &config.ask_token,
            sale_end,
        );
        Ok(())
    }

    /// Escrow ask tokens to be sold. May be called repeatedly until settlement.
    pub fn supply_tokens(e: Env, caller: Address, amount: i128) -> Result<i128, ContractError> {
        let config = load_config(&e)?;
        require_project_admin(&config, &caller)?;
        match status_at(&load_times(&e)?, e.ledger().timestamp()) {
            SaleStatus::Settled => return Err(ContractError::AlreadySettled),
            SaleStatus::Cancelled => return Err(ContractError::SaleCancelled),
            _ => {}
        }
        if amount <= 0 {
            return Err(ContractError::AmountMustBePositive);
        }

        let total = math::add_i128(read_i128(&e, &DataKey::TokensSupplied), amount)?;
        e.storage().instance().set(&DataKey::TokensSupplied, &total);

        TokenClient::new(&e, &config.ask_token).transfer(
            &caller,
            &e.current_contract_address(),
            &amount,
        );
        events::emit_tokens_supplied(&e, &caller, amount, total);
        Ok(total)
    }

    // ── Bidding ────────────────────────────────────────────────────────────

    /// Submit one sealed bid and escrow `capital` bid tokens.
    ///
    /// The investor must have approved this contract for `capital` beforehand.
    /// The ciphertext must carry `bidder_salt(investor)` or it will be rejected
    /// at settlement. Fails with `BidLimitReached` once `MAX_BIDS` bids are in.
    pub fn submit_bid(
        e: Env,
        investor: Address,
        sealed_bid: SealedBid,
        capital: i128,
    ) -> Result<Bid, ContractError> {
        investor.require_auth();
        let config = load_config(&e)?;
        let now = e.ledger().timestamp();
        if status_at(&load_times(&e)?, now) != SaleStatus::Active {
            return Err(ContractError::SaleNotActive);
        }
        let key = DataKey::Bid(investor.clone());
        if e.storage().persistent().has(&key) {
            return Err(ContractError::BidAlreadySubmitted);
        }
        let mut bidders = load_bidders(&e);
        if bidders.len() >= settlement::MAX_BIDS {
            return Err(ContractError::BidLimitReached);
        }
        if capital < config.minimum_invest_amount {
            return Err(ContractError::InvestmentBelowMinimum);
        }
        if capital > settlement::MAX_BID_AMOUNT {
            return Err(ContractError::Overflow);
        }
        if !sealed_bid::is_valid_point(&e, &sealed_bid.ephemeral_key) {
            return Err(ContractError::InvalidCiphertext);
        }

        let bid = Bid {
            investor: investor.clone(),
            sealed_bid,
            capital,
            submitted_at: now,
            sequence: bidders.len(),
        };
        persist(&e, &key, &bid);
        bidders.push_back(investor.clone());
        persist(&e, &DataKey::Bidders, &bidders);
        let escrowed = math::add_i128(read_i128(&e, &DataKey::TotalEscrowed), capital)?;
        e.storage().instance().set(&DataKey::TotalEscrowed, &escrowed);

        let contract = e.current_contract_address();
        TokenClient::new(&e, &config.bid_token).transfer_from(
            &contract,
            &investor,
            &contract,
            &capital,
        );

        events::emit_bid_submitted(&e, &investor, capital, bid.sequence);
        Ok(bid)
    }

    // ── Settlement ─────────────────────────────────────────────────────────

    /// Reveal the private key, clear the sale and pay everyone out.
    ///
    /// `caller` must be the project admin or the registry `signer`. Token
    /// allocations are moved into vesting grants that start now; the vesting
    /// factory must list this sale as a grant creator.
    pub fn settle(
        e: Env,
        caller: Address,
        private_key: BytesN<32>,
    ) -> Result<SettlementResult, ContractError> {
        caller.require_auth();
        let config = load_config(&e)?;
        if caller != config.project_admin {
            let signer = RegistryClient::new(&e, &config.registry).get_address(&ROLE_SIGNER);
            if signer != Some(caller.clone()) {
                return Err(ContractError::NotSettlementAuthority);
            }
        }

        let mut times = load_times(&e)?;
        let now = e.ledger().timestamp();
        match status_at(&times, now) {
            SaleStatus::Active => return Err(ContractError::BiddingNotClosed),
            SaleStatus::Settled => return Err(ContractError::AlreadySettled),
            SaleStatus::Cancelled => return Err(ContractError::SaleCancelled),
            SaleStatus::BiddingClosed => {}
        }

        sealed_bid::verify_key_pair(&e, &private_key, &load_sealed_bid_config(&e)?.public_key)?;
        let supplied = read_i128(&e, &DataKey::TokensSupplied);
        if supplied <= 0 {
            return Err(ContractError::TokensNotSupplied);
        }
        let fee_receiver = resolve_role(&e, &config.registry, &ROLE_FEE_RECEIVER)?;
        let vesting = resolve_role(&e, &config.registry, &ROLE_VESTING)?;
        let terms = load_vesting_terms(&e)?;

        // Decrypt and rank.
        let bidders = load_bidders(&e);
        let mut escrow: Map<Address, i128> = Map::new(&e);
        let mut candidates: Vec<RankedBid> = Vec::new(&e);
        let mut rejected_bids = 0u32;
        for investor in bidders.iter() {
            let bid = load_bid(&e, &investor)?;
            escrow.set(investor.clone(), bid.capital);
            match decrypt_request(&e, &bid, &private_key) {
                Ok(tokens) => candidates.push_back(RankedBid {
                    investor: investor.clone(),
                    capital: bid.capital,
                    tokens,
                    sequence: bid.sequence,
                }),
                Err(reason) => {
                    rejected_bids += 1;
                    events::emit_bid_rejected(&e, &investor, reason as u32);
                }
            }
        }
        let ranked = settlement::rank(&e, &candidates)?;

        // Clear and split fees.
        let available = settlement::allocatable_supply(
            supplied,
            config.protocol_fee_on_tokens_bps,
            config.referrer_fee_on_tokens_bps,
        )?;
        let clearing = settlement::clear(&e, &ranked, available)?;
        let capital_fees = settlement::split_fees(
            clearing.capital_raised,
            config.protocol_fee_on_capital_bps,
            config.referrer_fee_on_capital_bps,
        )?;
        let token_fees = settlement::split_fees(
            clearing.tokens_allocated,
            config.protocol_fee_on_tokens_bps,
            config.referrer_fee_on_tokens_bps,
        )?;
        let unsold_tokens = math::sub_i128(
            math::sub_i128(supplied, clearing.tokens_allocated)?,
            math::add_i128(token_fees.protocol, token_fees.referrer)?,
        )?;

        let result = SettlementResult {
            capital_raised: clearing.capital_raised,
            tokens_allocated: clearing.tokens_allocated,
            tokens_supplied: supplied,
            clearing_price: clearing.clearing_price,
            protocol_capital_fee: capital_fees.protocol,
            referrer_capital_fee: capital_fees.referrer,
            net_capital: capital_fees.net,
            protocol_token_fee: token_fees.protocol,
            referrer_token_fee: token_fees.referrer,
            unsold_tokens,
            winners: clearing.winners,
            rejected_bids,
            settled_at: now,
        };

        // Effects: every bidder gets an allocation, rejected and losing bids
        // with their whole escrow as excess.
        let mut filled: Map<Address, Fill> = Map::new(&e);
        for fill in clearing.fills.iter() {
            filled.set(fill.investor.clone(), fill);
        }
        let mut outstanding = 0i128;
        for investor in bidders.iter() {
            let capital = escrow.get(investor.clone()).unwrap_or(0);
            let (tokens, capital_cleared) = match filled.get(investor.clone()) {
                Some(fill) => (fill.tokens, fill.capital_cleared),
                None => (0, 0),
            };
            let allocation = Allocation {
                tokens,
                capital_cleared,
                excess_capital: math::sub_i128(capital, capital_cleared)?,
                excess_claimed: false,
                grant_id: None,
            };
            outstanding = math::add_i128(outstanding, allocation.excess_capital)?;
            persist(&e, &DataKey::Allocation(investor.clone()), &allocation);
        }
        e.storage()
            .instance()
            .set(&DataKey::OutstandingRefunds, &outstanding);
        e.storage().instance().set(&DataKey::Result, &result);
        times.settled_at = Some(now);
        e.storage().instance().set(&DataKey::Times, &times);

        // Interactions.
        let contract = e.current_contract_address();
        let bid_token = TokenClient::new(&e, &config.bid_token);
        let ask_token = TokenClient::new(&e, &config.ask_token);
        for (to, amount) in [
            (&fee_receiver, capital_fees.protocol),
            (&config.referrer_fee_receiver, capital_fees.referrer),
            (&config.project_admin, capital_fees.net),
        ] {
            if amount > 0 {
                bid_token.transfer(&contract, to, &amount);
            }
        }
        for (to, amount) in [
            (&fee_receiver, token_fees.protocol),
            (&config.referrer_fee_receiver, token_fees.referrer),
            (&config.project_admin, unsold_tokens),
        ] {
            if amount > 0 {
                ask_token.transfer(&contract, to, &amount);
            }
        }

        let vesting_client = VestingClient::new(&e, &vesting);
        for fill in clearing.fills.iter() {
            if fill.tokens <= 0 {
                continue;
            }
            ask_token.transfer(&contract, &vesting, &fill.tokens);
            let grant_id = vesting_client.create_vesting_grant(
                &contract,
                &GrantParams {
                    owner: fill.investor.clone(),
                    token: config.ask_token.clone(),
                    start: now,
                    duration: terms.duration_seconds,
                    cliff_offset: terms.cliff_offset_seconds,
                    epoch_duration: terms.epoch_duration_seconds,
                    epoch_count: terms.epoch_count,
                    total_amount: fill.tokens,
                },
            );
            let key = DataKey::Allocation(fill.investor.clone());
            let mut allocation = load_allocation(&e, &fill.investor)?;
            allocation.grant_id = Some(grant_id);
            persist(&e, &key, &allocation);
            events::emit_grant_assigned(&e, &fill.investor, grant_id, fill.tokens);
        }

        events::emit_sale_settled(&e, &result);
        Ok(result)
    }

    // ── Refunds ────────────────────────────────────────────────────────────

    /// Return capital that did not clear. Once per investor, within the refund
    /// window after settlement.
    pub fn claim_excess_capital(e: Env, investor: Address) -> Result<i128, ContractError> {
        investor.require_auth();
        let config = load_config(&e)?;
        let times = load_times(&e)?;
        let now = e.ledger().timestamp();
        let settled_at = match (status_at(&times, now), times.settled_at) {
            (SaleStatus::Settled, Some(at)) => at,
            _ => return Err(ContractError::SaleNotSettled),
        };
        if now >= refund_deadline(settled_at, &config)? {
            return Err(ContractError::RefundWindowClosed);
        }

        let mut allocation = load_allocation(&e, &investor)?;
        if allocation.excess_claimed {
            return Err(ContractError::AlreadyClaimed);
        }
        if allocation.excess_capital <= 0 {
            return Err(ContractError::NoExcessCapital);
        }
        allocation.excess_claimed = true;
        persist(&e, &DataKey::Allocation(investor.clone()), &allocation);
        release_refund(&e, allocation.excess_capital)?;

        TokenClient::new(&e, &config.bid_token).transfer(
            &e.current_contract_address(),
            &investor,
            &allocation.excess_capital,
        );
        events::emit_excess_claimed(&e, &investor, allocation.excess_capital);
        Ok(allocation.excess_capital)
    }

    /// Cancel the sale before settlement and return supplied tokens to the admin.
    pub fn cancel_sale(e: Env, caller: Address) -> Result<(), ContractError> {
        let config = load_config(&e)?;
        require_project_admin(&config, &caller)?;
        let mut times = load_times(&e)?;
        let now = e.ledger().timestamp();
        match status_at(&times, now) {
            SaleStatus::Settled => return Err(ContractError::AlreadySettled),
            SaleStatus::Cancelled => return Err(ContractError::SaleCancelled),
            _ => {}
        }

        let supplied = read_i128(&e, &DataKey::TokensSupplied);
        times.cancelled_at = Some(now);
        e.storage().instance().set(&DataKey::Times, &times);
        e.storage().instance().set(&DataKey::TokensSupplied, &0i128);
        e.storage().instance().set(
            &DataKey::OutstandingRefunds,
            &read_i128(&e, &DataKey::TotalEscrowed),
        );

        if supplied > 0 {
            TokenClient::new(&e, &config.ask_token).transfer(
                &e.current_contract_address(),
                &config.project_admin,
                &supplied,
            );
        }
        events::emit_sale_cancelled(&e, &config.project_admin, supplied);
        Ok(())
    }

    /// Return an investor's full escrow after cancellation, once, within the
    /// refund window.
    pub fn withdraw_capital_if_cancelled(e: Env, investor: Address) -> Result<i128, ContractError> {
        investor.require_auth();
        let config = load_config(&e)?;
        let times = load_times(&e)?;
        let cancelled_at = times.cancelled_at.ok_or(ContractError::SaleNotCancelled)?;
        if e.ledger().timestamp() >= refund_deadline(cancelled_at, &config)? {
            return Err(ContractError::RefundWindowClosed);
        }

        let bid = load_bid(&e, &investor)?;
        let key = DataKey::Withdrawn(investor.clone());
        if e.storage().persistent().has(&key) {
            return Err(ContractError::AlreadyClaimed);
        }
        persist(&e, &key, &true);
        release_refund(&e, bid.capital)?;

        TokenClient::new(&e, &config.bid_token).transfer(
            &e.current_contract_address(),
            &investor,
            &bid.capital,
        );
        events::emit_capital_withdrawn(&e, &investor, bid.capital);
        Ok(bid.capital)
    }

    /// Send capital nobody claimed during the refund window to the project
    /// admin. Works after settlement or cancellation once the window closes.
    ///
    /// # Errors
    /// * `NotProjectAdmin` - caller is not the project admin
    /// * `SaleNotSettled` - the sale is neither settled nor cancelled
    /// * `RefundWindowOpen` - investors can still claim
    /// * `NoUnclaimedCapital` - every refund was claimed, or this already ran
    pub fn withdraw_unclaimed_capital(e: Env, caller: Address) -> Result<i128, ContractError> {
        let config = load_config(&e)?;
        require_project_admin(&config, &caller)?;
        let times = load_times(&e)?;
        let closed_at = match (times.settled_at, times.cancelled_at) {
            (Some(at), _) | (None, Some(at)) => at,
            (None, None) => return Err(ContractError::SaleNotSettled),
        };
        if e.ledger().timestamp() < refund_deadline(closed_at, &config)? {
            return Err(ContractError::RefundWindowOpen);
        }

        let amount = read_i128(&e, &DataKey::OutstandingRefunds);
        if amount <= 0 {
            return Err(ContractError::NoUnclaimedCapital);
        }
        e.storage()
            .instance()
            .set(&DataKey::OutstandingRefunds, &0i128);

        TokenClient::new(&e, &config.bid_token).transfer(
            &e.current_contract_address(),
            &config.project_admin,
            &amount,
        );
        events::emit_unclaimed_withdrawn(&e, &config.project_admin, amount);
        Ok(amount)
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn get_sale_config(e: Env) -> Result<SaleConfig, ContractError> {
        load_config(&e)
    }

    pub fn get_sealed_bid_config(e: Env) -> Result<SealedBidConfig, ContractError> {
        load_sealed_bid_config(&e)
    }

    pub fn get_vesting_terms(e: Env) -> Result<VestingTerms, ContractError> {
        load_vesting_terms(&e)
    }

    /// Current phase of the sale.
    pub fn get_status(e: Env) -> Result<SaleStatus, ContractError> {
        Ok(status_at(&load_times(&e)?, e.ledger().timestamp()))
    }

    pub fn get_sale_times(e: Env) -> Result<SaleTimes, ContractError> {
        load_times(&e)
    }

    pub fn get_bid(e: Env, investor: Address) -> Result<Bid, ContractError> {
        load_bid(&e, &investor)
    }

    /// Investors in submission order.
    pub fn get_bidders(e: Env) -> Vec<Address> {
        load_bidders(&e)
    }

    /// Total capital escrowed by all bids.
    pub fn get_total_escrowed(e: Env) -> i128 {
        read_i128(&e, &DataKey::TotalEscrowed)
    }

    pub fn get_tokens_supplied(e: Env) -> i128 {
        read_i128(&e, &DataKey::TokensSupplied)
    }

    /// Capital still claimable through `claim_excess_capital` or
    /// `withdraw_capital_if_cancelled`.
    pub fn get_outstanding_refunds(e: Env) -> i128 {
        read_i128(&e, &DataKey::OutstandingRefunds)
    }

    pub fn get_settlement_result(e: Env) -> Result<SettlementResult, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::Result)
            .ok_or(ContractError::SaleNotSettled)
    }

    pub fn get_allocation(e: Env, investor: Address) -> Result<Allocation, ContractError> {
        if !e.storage().instance().has(&DataKey::Result) {
            return Err(ContractError::SaleNotSettled);
        }
        load_allocation(&e, &investor)
    }
}
