//! Grant factory, one-shot initialization and creator permission tests.

#![cfg(test)]

use crate::test_helpers::*;
use crate::{LinearVesting, LinearVestingClient, TEMPLATE_GRANT_ID};
use settlement_errors::{ContractError, ZERO_ACCOUNT};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env, String};

// ═══════════════════════════════════════════════════════════════════
// 1. Contract setup
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_initialize_creates_template() {
    let e = Env::default();
    let s = setup(&e);
    assert_eq!(s.client.get_admin(), s.admin);
    assert!(s.client.is_initialized(&TEMPLATE_GRANT_ID));
    assert_eq!(s.client.grant_count(), 1);
}

#[test]
fn test_initialize_twice_fails() {
    let e = Env::default();
    let s = setup(&e);
    assert_eq!(
        s.client.try_initialize(&s.admin).err(),
        Some(Ok(ContractError::AlreadyInitialized))
    );
}

#[test]
fn test_initialize_rejects_zero_admin() {
    let e = Env::default();
    e.mock_all_auths();
    let contract_id = e.register(LinearVesting, ());
    let client = LinearVestingClient::new(&e, &contract_id);
    let zero = Address::from_string(&String::from_str(&e, ZERO_ACCOUNT));
    assert_eq!(
        client.try_initialize(&zero).err(),
        Some(Ok(ContractError::ZeroAddress))
    );
}

#[test]
fn test_set_grant_creator_requires_admin() {
    let e = Env::default();
    let s = setup(&e);
    let other = Address::generate(&e);
    let candidate = Address::generate(&e);
    assert_eq!(
        s.client
            .try_set_grant_creator(&other, &candidate, &true)
            .err(),
        Some(Ok(ContractError::NotRegistryAdmin))
    );
    assert!(!s.client.is_grant_creator(&candidate));
}

#[test]
fn test_revoked_creator_cannot_create() {
    let e = Env::default();
    let s = setup(&e);
    assert!(s.client.is_grant_creator(&s.creator));
    s.client.set_grant_creator(&s.admin, &s.creator, &false);
    assert!(!s.client.is_grant_creator(&s.creator));
    assert_eq!(
        s.client.try_new_grant(&s.creator).err(),
        Some(Ok(ContractError::NotGrantCreator))
    );
}

// ═══════════════════════════════════════════════════════════════════
// 2. One-shot grant initialization
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_create_vesting_grant_assigns_sequential_ids() {
    let e = Env::default();
    let s = setup(&e);
    let owner = Address::generate(&e);
    let first = s
        .client
        .create_vesting_grant(&s.creator, &params(&owner, &s.token, 100));
    let second = s
        .client
        .create_vesting_grant(&s.creator, &params(&owner, &s.token, 100));
    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert_eq!(s.client.grant_count(), 3);

    let grant = s.client.get_grant(&first);
    assert_eq!(grant.owner, owner);
    assert_eq!(grant.total_amount, 100);
    assert_eq!(grant.released, 0);
    assert_eq!(grant.cliff_end, START + CLIFF + 1);
}

#[test]
fn test_template_cannot_be_initialized_by_anyone() {
    let e = Env::default();
    let s = setup(&e);
    let owner = Address::generate(&e);
    let p = params(&owner, &s.token, 100);

    for caller in [s.admin.clone(), s.creator.clone(), s.contract_id.clone()] {
        assert_eq!(
            s.client
                .try_initialize_grant(&caller, &TEMPLATE_GRANT_ID, &p)
                .err(),
            Some(Ok(ContractError::AlreadyInitialized))
        );
    }
}

#[test]
fn test_initialized_grant_cannot_be_reinitialized() {
    let e = Env::default();
    let s = setup(&e);
    let owner = Address::generate(&e);
    let attacker = Address::generate(&e);
    let id = s
        .client
        .create_vesting_grant(&s.creator, &params(&owner, &s.token, 100));

    let hijack = params(&attacker, &s.token, 100);
    assert_eq!(
        s.client.try_initialize_grant(&attacker, &id, &hijack).err(),
        Some(Ok(ContractError::AlreadyInitialized))
    );
    assert_eq!(
        s.client.try_initialize_grant(&s.creator, &id, &hijack).err(),
        Some(Ok(ContractError::AlreadyInitialized))
    );
    assert_eq!(s.client.get_grant(&id).owner, owner);
}

#[test]
fn test_reserved_slot_only_configurable_by_creator() {
    let e = Env::default();
    let s = setup(&e);
    let owner = Address::generate(&e);
    let other = Address::generate(&e);
    let id = s.client.new_grant(&s.creator);
    assert!(!s.client.is_initialized(&id));

    let p = params(&owner, &s.token, 100);
    assert_eq!(
        s.client.try_initialize_grant(&other, &id, &p).err(),
        Some(Ok(ContractError::NotGrantCreator))
    );
    s.client.initialize_grant(&s.creator, &id, &p);
    assert!(s.client.is_initialized(&id));
}

#[test]
fn test_unknown_slot_is_not_found() {
    let e = Env::default();
    let s = setup(&e);
    let owner = Address::generate(&e);
    assert_eq!(
        s.client
            .try_initialize_grant(&s.creator, &99, &params(&owner, &s.token, 100))
            .err(),
        Some(Ok(ContractError::GrantNotFound))
    );
    assert_eq!(
        s.client.try_get_grant(&99).err(),
        Some(Ok(ContractError::GrantNotFound))
    );
    assert!(!s.client.is_initialized(&99));
}

#[test]
fn test_stranger_cannot_reserve_slots() {
    let e = Env::default();
    let s = setup(&e);
    let stranger = Address::generate(&e);
    assert_eq!(
        s.client.try_new_grant(&stranger).err(),
        Some(Ok(ContractError::NotGrantCreator))
    );
}

// ═══════════════════════════════════════════════════════════════════
// 3. Funding
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_underfunded_grant_is_rejected() {
    let e = Env::default();
    let s = setup_with_funding(&e, 1_000);
    let owner = Address::generate(&e);
    assert_eq!(
        s.client
            .try_create_vesting_grant(&s.creator, &params(&owner, &s.token, 1_001))
            .err(),
        Some(Ok(ContractError::VestingUnderfunded))
    );
}

#[test]
fn test_committed_balance_counts_against_funding() {
    let e = Env::default();
    let s = setup_with_funding(&e, 1_000);
    let owner = Address::generate(&e);
    s.client
        .create_vesting_grant(&s.creator, &params(&owner, &s.token, 700));
    assert_eq!(
        s.client
            .try_create_vesting_grant(&s.creator, &params(&owner, &s.token, 301))
            .err(),
        Some(Ok(ContractError::VestingUnderfunded))
    );
    s.client
        .create_vesting_grant(&s.creator, &params(&owner, &s.token, 300));
    assert_eq!(s.client.committed_amount(&s.token), 1_000);
}

// ═══════════════════════════════════════════════════════════════════
// 4. Parameter validation
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_zero_values_rejected() {
    let e = Env::default();
    let s = setup(&e);
    let owner = Address::generate(&e);

    let mut p = params(&owner, &s.token, 0);
    assert_eq!(
        s.client.try_create_vesting_grant(&s.creator, &p).err(),
        Some(Ok(ContractError::ZeroValue))
    );

    p = params(&owner, &s.token, 100);
    p.epoch_count = 0;
    assert_eq!(
        s.client.try_create_vesting_grant(&s.creator, &p).err(),
        Some(Ok(ContractError::ZeroValue))
    );

    p = params(&owner, &s.token, 100);
    p.epoch_duration = 0;
    assert_eq!(
        s.client.try_create_vesting_grant(&s.creator, &p).err(),
        Some(Ok(ContractError::ZeroValue))
    );

    p = params(&owner, &s.token, 100);
    p.cliff_offset = 0;
    assert_eq!(
        s.client.try_create_vesting_grant(&s.creator, &p).err(),
        Some(Ok(ContractError::ZeroValue))
    );
}

#[test]
fn test_inconsistent_terms_rejected() {
    let e = Env::default();
    let s = setup(&e);
    let owner = Address::generate(&e);

    let mut p = params(&owner, &s.token, 100);
    p.cliff_offset = DURATION;
    assert_eq!(
        s.client.try_create_vesting_grant(&s.creator, &p).err(),
        Some(Ok(ContractError::InvalidVestingTerms))
    );

    p = params(&owner, &s.token, 100);
    p.duration = DURATION + 1;
    assert_eq!(
        s.client.try_create_vesting_grant(&s.creator, &p).err(),
        Some(Ok(ContractError::InvalidVestingTerms))
    );
}

#[test]
fn test_zero_owner_rejected() {
    let e = Env::default();
    let s = setup(&e);
    let zero = Address::from_string(&String::from_str(&e, ZERO_ACCOUNT));
    assert_eq!(
        s.client
            .try_create_vesting_grant(&s.creator, &params(&zero, &s.token, 100))
            .err(),
        Some(Ok(ContractError::ZeroAddress))
    );
}

#[test]
fn test_failed_grant_leaves_no_commitment() {
    let e = Env::default();
    let s = setup(&e);
    let owner = Address::generate(&e);
    let mut p = params(&owner, &s.token, 100);
    p.epoch_count = 0;
    let _ = s.client.try_create_vesting_grant(&s.creator, &p);
    assert_eq!(s.client.committed_amount(&s.token), 0);
    assert_eq!(s.client.grant_count(), 1);
}
