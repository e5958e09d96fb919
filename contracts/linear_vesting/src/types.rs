use soroban_sdk::{contracttype, Address};

// ─── Grant state ───────────────────────────────────────────────────────────

/// Parameters a creator supplies to configure a grant.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrantParams {
    /// Beneficiary; released tokens always go here.
    pub owner: Address,
    /// Token being vested.
    pub token: Address,
    /// Ledger timestamp at which epoch 1 begins.
    pub start: u64,
    /// Total vesting duration in seconds.
    pub duration: u64,
    /// Cliff length measured from `start`.
    pub cliff_offset: u64,
    /// Length of one epoch in seconds.
    pub epoch_duration: u64,
    /// Number of epochs; `epoch_duration * epoch_count == duration`.
    pub epoch_count: u32,
    /// Total amount to vest.
    pub total_amount: i128,
}

/// A configured vesting grant.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingGrant {
    pub owner: Address,
    pub token: Address,
    pub total_amount: i128,
    pub start: u64,
    pub duration: u64,
    /// `start + cliff_offset + 1`: the cliff moment itself still blocks release.
    pub cliff_end: u64,
    pub epoch_duration: u64,
    pub epoch_count: u32,
    /// Cumulative amount released so far.
    pub released: i128,
}

/// Arena bookkeeping for one grant id.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrantSlot {
    /// Address allowed to configure the slot.
    pub creator: Address,
    /// Set once the grant is configured; never cleared.
    pub initialized: bool,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract admin address.
    Admin,
    /// Next grant id to hand out. Id 0 is the template.
    NextGrantId,
    /// Addresses allowed to create grants (sale contracts).
    Creator(Address),
    /// Slot bookkeeping per grant id.
    Slot(u64),
    /// Configured grant per id.
    Grant(u64),
    /// Unreleased amount promised to grants, per token.
    Committed(Address),
}
