use soroban_sdk::{Address, Env, Symbol};

use crate::RoleEntry;

pub fn emit_registry_initialized(e: &Env, admin: &Address) {
    e.events()
        .publish((Symbol::new(e, "registry_initialized"),), admin.clone());
}

/// Emitted when a role is bound or rebound.
///
/// # Topics
/// * `Symbol` - "role_set"
/// * `Symbol` - The role key
///
/// # Data
/// * `RoleEntry` - The stored entry
pub fn emit_role_set(e: &Env, entry: &RoleEntry) {
    let topics = (Symbol::new(e, "role_set"), entry.role.clone());
    e.events().publish(topics, entry.clone());
}

pub fn emit_role_removed(e: &Env, role: &Symbol) {
    let topics = (Symbol::new(e, "role_removed"), role.clone());
    e.events().publish(topics, ());
}

pub fn emit_admin_transferred(e: &Env, new_admin: &Address) {
    e.events()
        .publish((Symbol::new(e, "admin_transferred"),), new_admin.clone());
}
