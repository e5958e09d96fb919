#![no_std]

//! # Address Registry Contract
//!
//! Resolves protocol role keys to addresses so sale and vesting contracts never
//! hard-code who receives fees, who may settle, or which vesting factory to use.
//!
//! ## Features
//! - Set, replace and remove role addresses
//! - Resolve a role (`None` when unset)
//! - Enumerate configured roles
//! - Emit events for every registry change
//!
//! ## Security
//! - Admin-controlled updates
//! - Zero addresses are rejected
//! - Emits events for audit trail

use settlement_errors::{require_non_zero, ContractError};
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol, Vec};

mod events;

/// Role entry stored per key.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleEntry {
    /// Role key, e.g. `fee_recv`
    pub role: Symbol,
    /// Address currently bound to the role
    pub address: Address,
    /// Timestamp of the last update
    pub updated_at: u64,
}

/// Storage keys for the registry contract
#[contracttype]
#[derive(Clone)]
enum DataKey {
    /// Admin address
    Admin,
    /// Role key -> RoleEntry
    Role(Symbol),
    /// List of all configured role keys
    Roles,
}

#[contract]
pub struct AddressRegistry;

#[contractimpl]
impl AddressRegistry {
    /// Initialize the registry contract with an admin address.
    ///
    /// # Errors
    /// * `AlreadyInitialized` - if contract is already initialized
    /// * `ZeroAddress` - if `admin` is a zero address
    pub fn initialize(e: Env, admin: Address) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        require_non_zero(&e, &admin)?;

        admin.require_auth();

        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage()
            .instance()
            .set(&DataKey::Roles, &Vec::<Symbol>::new(&e));

        events::emit_registry_initialized(&e, &admin);
        Ok(())
    }

    /// Bind `address` to `role`, replacing any previous binding.
    ///
    /// # Returns
    /// The stored `RoleEntry`
    ///
    /// # Errors
    /// * `NotInitialized` - if the registry has no admin
    /// * `ZeroAddress` - if `address` is a zero address
    pub fn set_address(e: Env, role: Symbol, address: Address) -> Result<RoleEntry, ContractError> {
        let admin = Self::get_admin(e.clone())?;
        admin.require_auth();
        require_non_zero(&e, &address)?;

        let key = DataKey::Role(role.clone());
        if !e.storage().instance().has(&key) {
            let mut roles: Vec<Symbol> = e
                .storage()
                .instance()
                .get(&DataKey::Roles)
                .unwrap_or_else(|| Vec::new(&e));
            roles.push_back(role.clone());
            e.storage().instance().set(&DataKey::Roles, &roles);
        }

        let entry = RoleEntry {
            role,
            address,
            updated_at: e.ledger().timestamp(),
        };
        e.storage().instance().set(&key, &entry);

        events::emit_role_set(&e, &entry);
        Ok(entry)
    }

    /// Remove the binding for `role`.
    ///
    /// # Errors
    /// * `RoleNotSet` - if the role has no address
    pub fn remove_address(e: Env, role: Symbol) -> Result<(), ContractError> {
        let admin = Self::get_admin(e.clone())?;
        admin.require_auth();

        let key = DataKey::Role(role.clone());
        if !e.storage().instance().has(&key) {
            return Err(ContractError::RoleNotSet);
        }
        e.storage().instance().remove(&key);

        let roles: Vec<Symbol> = e
            .storage()
            .instance()
            .get(&DataKey::Roles)
            .unwrap_or_else(|| Vec::new(&e));
        if let Some(index) = roles.first_index_of(&role) {
            let mut roles = roles;
            roles.remove(index);
            e.storage().instance().set(&DataKey::Roles, &roles);
        }

        events::emit_role_removed(&e, &role);
        Ok(())
    }

    /// Resolve `role` to its address, `None` when unset.
    pub fn get_address(e: Env, role: Symbol) -> Option<Address> {
        e.storage()
            .instance()
            .get::<_, RoleEntry>(&DataKey::Role(role))
            .map(|entry| entry.address)
    }

    /// Full entry for `role`.
    ///
    /// # Errors
    /// * `RoleNotSet` - if the role has no address
    pub fn get_entry(e: Env, role: Symbol) -> Result<RoleEntry, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::Role(role))
            .ok_or(ContractError::RoleNotSet)
    }

    /// All role keys currently bound.
    pub fn get_roles(e: Env) -> Vec<Symbol> {
        e.storage()
            .instance()
            .get(&DataKey::Roles)
            .unwrap_or_else(|| Vec::new(&e))
    }

    /// Get the admin address.
    ///
    /// # Errors
    /// * `NotInitialized` - if contract is not initialized
    pub fn get_admin(e: Env) -> Result<Address, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ContractError::NotInitialized)
    }

    /// Transfer admin rights to a new address.
    ///
    /// # Events
    /// Emits `admin_transferred` with the new admin address
    pub fn transfer_admin(e: Env, new_admin: Address) -> Result<(), ContractError> {
        let admin = Self::get_admin(e.clone())?;
        admin.require_auth();
        require_non_zero(&e, &new_admin)?;

        e.storage().instance().set(&DataKey::Admin, &new_admin);

        events::emit_admin_transferred(&e, &new_admin);
        Ok(())
    }
}
