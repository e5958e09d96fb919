//! Client interfaces for the contracts a sale calls into.
//!
//! Declared with `#[contractclient]` instead of importing the other crates so the
//! sale wasm does not link their exported functions.

use soroban_sdk::{contractclient, contracttype, symbol_short, Address, Env, Symbol};

/// Registry role of the protocol fee receiver.
pub const ROLE_FEE_RECEIVER: Symbol = symbol_short!("fee_recv");
/// Registry role allowed to settle alongside the project admin.
pub const ROLE_SIGNER: Symbol = symbol_short!("signer");
/// Registry role of the vesting factory.
pub const ROLE_VESTING: Symbol = symbol_short!("vesting");

#[contractclient(name = "RegistryClient")]
pub trait RegistryInterface {
    fn get_address(e: Env, role: Symbol) -> Option<Address>;
}

/// Grant parameters as the vesting factory expects them.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrantParams {
    pub owner: Address,
    pub token: Address,
    pub start: u64,
    pub duration: u64,
    pub cliff_offset: u64,
    pub epoch_duration: u64,
    pub epoch_count: u32,
    pub total_amount: i128,
}

#[contractclient(name = "VestingClient")]
pub trait VestingInterface {
    fn create_vesting_grant(e: Env, creator: Address, params: GrantParams) -> u64;
}
