//! Zero-address guard.
//!
//! Soroban addresses have no null value. The all-zero account and contract
//! strkeys stand in for the zero address and are rejected wherever an address is
//! required.

use soroban_sdk::{Address, Env, String};

use crate::ContractError;

/// Account strkey with an all-zero ed25519 key.
pub const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

/// Contract strkey with an all-zero contract id.
pub const ZERO_CONTRACT: &str = "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSC4";

/// Returns `true` if `address` is one of the zero strkeys.
pub fn is_zero_address(e: &Env, address: &Address) -> bool {
    let account = Address::from_string(&String::from_str(e, ZERO_ACCOUNT));
    let contract = Address::from_string(&String::from_str(e, ZERO_CONTRACT));
    *address == account || *address == contract
}

/// Fails with `ZeroAddress` if `address` is a zero strkey.
pub fn require_non_zero(e: &Env, address: &Address) -> Result<(), ContractError> {
    if is_zero_address(e, address) {
        return Err(ContractError::ZeroAddress);
    }
    Ok(())
}
