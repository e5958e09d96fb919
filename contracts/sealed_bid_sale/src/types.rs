use soroban_sdk::{contracttype, Address, BytesN};

// ─── Configuration ─────────────────────────────────────────────────────────

/// Sale parameters. Immutable once the sale is initialized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    /// Token investors pay with (capital).
    pub bid_token: Address,
    /// Token being sold.
    pub ask_token: Address,
    pub sale_period_seconds: u64,
    /// Window after settlement (or cancellation) in which capital can be refunded.
    pub refund_period_seconds: u64,
    pub minimum_invest_amount: i128,
    pub protocol_fee_on_capital_bps: u32,
    pub protocol_fee_on_tokens_bps: u32,
    pub referrer_fee_on_capital_bps: u32,
    pub referrer_fee_on_tokens_bps: u32,
    pub project_admin: Address,
    pub referrer_fee_receiver: Address,
    /// Address registry resolving `fee_recv`, `signer` and `vesting`.
    pub registry: Address,
}

/// Vesting applied to every winner's allocation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingTerms {
    pub cliff_offset_seconds: u64,
    pub duration_seconds: u64,
    pub epoch_duration_seconds: u64,
    pub epoch_count: u32,
}

/// Encryption key bids are sealed to.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SealedBidConfig {
    /// BLS12-381 G1 point, uncompressed `x || y`.
    pub public_key: BytesN<96>,
}

// ─── Bids ──────────────────────────────────────────────────────────────────

/// Encrypted token request.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SealedBid {
    /// Ephemeral public key `R = k * G`.
    pub ephemeral_key: BytesN<96>,
    /// `amount (16 bytes BE) || salt (32 bytes)` masked with the keystream.
    pub ciphertext: BytesN<48>,
    pub tag: BytesN<32>,
}

/// A submitted bid. Never mutated after submission.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bid {
    pub investor: Address,
    pub sealed_bid: SealedBid,
    /// Escrowed bid-token amount.
    pub capital: i128,
    pub submitted_at: u64,
    /// Submission order, used to break price ties.
    pub sequence: u32,
}

// ─── Lifecycle ─────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaleStatus {
    Active,
    BiddingClosed,
    Settled,
    Cancelled,
}

/// Stored phase boundaries; the status is derived from these on every call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleTimes {
    pub sale_start: u64,
    pub sale_end: u64,
    pub settled_at: Option<u64>,
    pub cancelled_at: Option<u64>,
}

// ─── Settlement ────────────────────────────────────────────────────────────

/// Aggregate outcome of settlement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettlementResult {
    pub capital_raised: i128,
    pub tokens_allocated: i128,
    pub tokens_supplied: i128,
    /// Bid-token units per `PRICE_SCALE` ask-token units of the marginal filled bid.
    pub clearing_price: i128,
    pub protocol_capital_fee: i128,
    pub referrer_capital_fee: i128,
    pub net_capital: i128,
    pub protocol_token_fee: i128,
    pub referrer_token_fee: i128,
    pub unsold_tokens: i128,
    pub winners: u32,
    pub rejected_bids: u32,
    pub settled_at: u64,
}

/// Per-investor settlement outcome.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Allocation {
    pub tokens: i128,
    pub capital_cleared: i128,
    /// `capital - capital_cleared`, refundable during the refund window.
    pub excess_capital: i128,
    pub excess_claimed: bool,
    /// Vesting grant holding `tokens`, if any were allocated.
    pub grant_id: Option<u64>,
}

/// A decrypted bid ready for ranking.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RankedBid {
    pub investor: Address,
    pub capital: i128,
    /// Requested ask-token amount.
    pub tokens: i128,
    pub sequence: u32,
}

/// Tokens and capital cleared for one ranked bid.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fill {
    pub investor: Address,
    pub tokens: i128,
    pub capital_cleared: i128,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    SealedBidConfig,
    VestingTerms,
    Times,
    /// Ordered list of investors who bid.
    Bidders,
    TotalEscrowed,
    TokensSupplied,
    Result,
    Bid(Address),
    Allocation(Address),
    /// Set once capital is withdrawn after cancellation.
    Withdrawn(Address),
    /// Bid-token capital investors may still claim back.
    OutstandingRefunds,
}
