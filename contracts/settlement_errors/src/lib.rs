#![no_std]

use soroban_sdk::contracterror;

pub mod address;

pub use address::{is_zero_address, require_non_zero, ZERO_ACCOUNT, ZERO_CONTRACT};

/// @title  ErrorCategory
/// @notice Groups errors by kind for monitoring, alerting, and dashboards.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `ContractError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid or missing configuration at creation/initialization (codes 1-99).
    Configuration,
    /// Caller lacks the role required by a privileged operation (codes 100-199).
    Authorization,
    /// Operation invoked in the wrong lifecycle state (codes 200-299).
    Lifecycle,
    /// Operation attempted before or after its time window (codes 300-399).
    Temporal,
    /// Key or ciphertext failed a cryptographic check (codes 400-499).
    Cryptography,
    /// Checked arithmetic failure (codes 700-799).
    Arithmetic,
}

/// @title  ContractError
/// @notice Canonical error enum shared by the sale, vesting and registry contracts.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///
/// Error Code Layout:
///   1   -  99 : Configuration
///   100 - 199 : Authorization
///   200 - 299 : Lifecycle
///   300 - 399 : Temporal
///   400 - 499 : Cryptography
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // --- Configuration (1-99) ---
    /// Contract has not been initialized yet.
    /// Contracts: sale, vesting, registry
    NotInitialized = 1,

    /// Contract, sale or grant has already been initialized.
    /// Contracts: sale, vesting, registry
    AlreadyInitialized = 2,

    /// A required address is the zero address or an unresolved registry role.
    /// Contracts: sale, vesting, registry
    ZeroAddress = 3,

    /// A required numeric parameter is zero.
    /// Contracts: sale, vesting
    ZeroValue = 4,

    /// Fee basis points sum to more than 10_000.
    /// Contracts: sale
    InvalidFeeBps = 5,

    /// Vesting cliff/duration/epoch parameters are inconsistent.
    /// Contracts: sale, vesting
    InvalidVestingTerms = 6,

    /// The sealed-bid public key is not a usable curve point.
    /// Contracts: sale
    InvalidPublicKey = 7,

    // --- Authorization (100-199) ---
    /// Caller is not the project admin of the sale.
    /// Contracts: sale
    NotProjectAdmin = 100,

    /// Caller is neither the project admin nor the protocol signer.
    /// Contracts: sale
    NotSettlementAuthority = 101,

    /// Caller is not the registry or vesting admin.
    /// Contracts: vesting, registry
    NotRegistryAdmin = 102,

    /// Caller is not allowed to create or configure this grant.
    /// Contracts: vesting
    NotGrantCreator = 103,

    // --- Lifecycle (200-299) ---
    /// Bidding is not open.
    SaleNotActive = 200,

    /// Settlement attempted while bidding is still open.
    BiddingNotClosed = 201,

    /// Sale has already been settled.
    AlreadySettled = 202,

    /// Sale has been cancelled.
    SaleCancelled = 203,

    /// Operation requires a settled sale.
    SaleNotSettled = 204,

    /// Operation requires a cancelled sale.
    SaleNotCancelled = 205,

    /// Investor already submitted a bid to this sale.
    BidAlreadySubmitted = 206,

    /// No bid recorded for this investor.
    BidNotFound = 207,

    /// Refund or withdrawal has already been claimed.
    AlreadyClaimed = 208,

    /// Investor has no uncleared capital to claim.
    NoExcessCapital = 209,

    /// Escrowed capital is below the sale minimum.
    InvestmentBelowMinimum = 210,

    /// Project has not supplied any tokens for sale.
    TokensNotSupplied = 211,

    /// Amount argument must be strictly positive.
    AmountMustBePositive = 212,

    /// No grant slot exists for the given id.
    GrantNotFound = 213,

    /// Vesting contract balance does not back the new grant.
    VestingUnderfunded = 214,

    /// Registry role has no address.
    RoleNotSet = 215,

    /// Sale already holds the maximum number of bids.
    BidLimitReached = 216,

    /// No unclaimed capital is left to withdraw.
    NoUnclaimedCapital = 217,

    // --- Temporal (300-399) ---
    /// Release attempted before the cliff has ended.
    CliffNotEnded = 300,

    /// Refund window has closed.
    RefundWindowClosed = 301,

    /// Refund window is still open.
    RefundWindowOpen = 302,

    // --- Cryptography (400-499) ---
    /// Private key is not canonical or does not match the published public key.
    InvalidPrivateKey = 400,

    /// Ciphertext is malformed (ephemeral key outside the G1 subgroup).
    InvalidCiphertext = 401,

    /// Ciphertext tag does not verify under the supplied key.
    IntegrityCheckFailed = 402,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    Overflow = 700,

    /// Integer underflow detected during a checked arithmetic operation.
    Underflow = 701,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every ContractError variant.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;

    /// @return true when retrying the same call later can succeed.
    fn is_recoverable(&self) -> bool {
        self.category() == ErrorCategory::Temporal
    }
}

impl ErrorExt for ContractError {
    fn category(&self) -> ErrorCategory {
        match *self as u32 {
            1..=99 => ErrorCategory::Configuration,
            100..=199 => ErrorCategory::Authorization,
            200..=299 => ErrorCategory::Lifecycle,
            300..=399 => ErrorCategory::Temporal,
            400..=499 => ErrorCategory::Cryptography,
            _ => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Already initialized",
            ContractError::ZeroAddress => "Zero address supplied where an address is required",
            ContractError::ZeroValue => "Zero supplied where a positive value is required",
            ContractError::InvalidFeeBps => "Fee basis points exceed 10000 in total",
            ContractError::InvalidVestingTerms => {
                "Vesting cliff, duration and epochs are inconsistent"
            }
            ContractError::InvalidPublicKey => "Sealed-bid public key is not a valid G1 point",
            ContractError::NotProjectAdmin => "Caller is not the project admin",
            ContractError::NotSettlementAuthority => {
                "Caller is neither the project admin nor the protocol signer"
            }
            ContractError::NotRegistryAdmin => "Caller is not the admin",
            ContractError::NotGrantCreator => "Caller may not create or configure this grant",
            ContractError::SaleNotActive => "Bidding is not open",
            ContractError::BiddingNotClosed => "Bidding has not closed yet",
            ContractError::AlreadySettled => "Sale has already been settled",
            ContractError::SaleCancelled => "Sale has been cancelled",
            ContractError::SaleNotSettled => "Sale has not been settled",
            ContractError::SaleNotCancelled => "Sale has not been cancelled",
            ContractError::BidAlreadySubmitted => "Investor already submitted a bid",
            ContractError::BidNotFound => "No bid recorded for this investor",
            ContractError::AlreadyClaimed => "Already claimed",
            ContractError::NoExcessCapital => "No uncleared capital to claim",
            ContractError::InvestmentBelowMinimum => "Capital is below the minimum investment",
            ContractError::TokensNotSupplied => "No tokens supplied for the sale",
            ContractError::AmountMustBePositive => "Amount must be strictly positive (> 0)",
            ContractError::GrantNotFound => "No vesting grant for the given id",
            ContractError::VestingUnderfunded => "Vesting balance does not back the grant",
            ContractError::RoleNotSet => "Registry role has no address",
            ContractError::BidLimitReached => "Sale has reached its bid limit",
            ContractError::NoUnclaimedCapital => "No unclaimed capital left to withdraw",
            ContractError::CliffNotEnded => "Vesting cliff has not ended",
            ContractError::RefundWindowClosed => "Refund window has closed",
            ContractError::RefundWindowOpen => "Refund window is still open",
            ContractError::InvalidPrivateKey => "Private key does not match the sale public key",
            ContractError::InvalidCiphertext => "Sealed bid ciphertext is malformed",
            ContractError::IntegrityCheckFailed => "Sealed bid failed its integrity check",
            ContractError::Overflow => "Integer overflow in checked arithmetic",
            ContractError::Underflow => "Integer underflow in checked arithmetic",
        }
    }
}

#[cfg(test)]
mod test_errors;
