#[cfg(test)]
mod tests {
    extern crate std;
    use crate::{
        is_zero_address, require_non_zero, ContractError, ErrorCategory, ErrorExt, ZERO_ACCOUNT,
        ZERO_CONTRACT,
    };
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::{Address, Env, String};
    use std::vec::Vec;

    fn all_variants() -> Vec<ContractError> {
        std::vec![
            ContractError::NotInitialized,
            ContractError::AlreadyInitialized,
            ContractError::ZeroAddress,
            ContractError::ZeroValue,
            ContractError::InvalidFeeBps,
            ContractError::InvalidVestingTerms,
            ContractError::InvalidPublicKey,
            ContractError::NotProjectAdmin,
            ContractError::NotSettlementAuthority,
            ContractError::NotRegistryAdmin,
            ContractError::NotGrantCreator,
            ContractError::SaleNotActive,
            ContractError::BiddingNotClosed,
            ContractError::AlreadySettled,
            ContractError::SaleCancelled,
            ContractError::SaleNotSettled,
            ContractError::SaleNotCancelled,
            ContractError::BidAlreadySubmitted,
            ContractError::BidNotFound,
            ContractError::AlreadyClaimed,
            ContractError::NoExcessCapital,
            ContractError::InvestmentBelowMinimum,
            ContractError::TokensNotSupplied,
            ContractError::AmountMustBePositive,
            ContractError::GrantNotFound,
            ContractError::VestingUnderfunded,
            ContractError::RoleNotSet,
            ContractError::BidLimitReached,
            ContractError::NoUnclaimedCapital,
            ContractError::CliffNotEnded,
            ContractError::RefundWindowClosed,
            ContractError::RefundWindowOpen,
            ContractError::InvalidPrivateKey,
            ContractError::InvalidCiphertext,
            ContractError::IntegrityCheckFailed,
            ContractError::Overflow,
            ContractError::Underflow,
        ]
    }

    // --- Wire code tests ---

    #[test]
    fn test_codes_configuration() {
        assert_eq!(ContractError::NotInitialized as u32, 1);
        assert_eq!(ContractError::AlreadyInitialized as u32, 2);
        assert_eq!(ContractError::ZeroAddress as u32, 3);
        assert_eq!(ContractError::ZeroValue as u32, 4);
        assert_eq!(ContractError::InvalidFeeBps as u32, 5);
        assert_eq!(ContractError::InvalidVestingTerms as u32, 6);
        assert_eq!(ContractError::InvalidPublicKey as u32, 7);
    }

    #[test]
    fn test_codes_authorization() {
        assert_eq!(ContractError::NotProjectAdmin as u32, 100);
        assert_eq!(ContractError::NotSettlementAuthority as u32, 101);
        assert_eq!(ContractError::NotRegistryAdmin as u32, 102);
        assert_eq!(ContractError::NotGrantCreator as u32, 103);
    }

    #[test]
    fn test_codes_lifecycle_temporal_crypto() {
        assert_eq!(ContractError::SaleNotActive as u32, 200);
        assert_eq!(ContractError::RoleNotSet as u32, 215);
        assert_eq!(ContractError::BidLimitReached as u32, 216);
        assert_eq!(ContractError::NoUnclaimedCapital as u32, 217);
        assert_eq!(ContractError::CliffNotEnded as u32, 300);
        assert_eq!(ContractError::RefundWindowClosed as u32, 301);
        assert_eq!(ContractError::RefundWindowOpen as u32, 302);
        assert_eq!(ContractError::InvalidPrivateKey as u32, 400);
        assert_eq!(ContractError::IntegrityCheckFailed as u32, 402);
        assert_eq!(ContractError::Overflow as u32, 700);
        assert_eq!(ContractError::Underflow as u32, 701);
    }

    #[test]
    fn test_codes_are_unique() {
        let variants = all_variants();
        for (i, a) in variants.iter().enumerate() {
            for b in variants.iter().skip(i + 1) {
                assert_ne!(*a as u32, *b as u32, "{:?} and {:?} share a code", a, b);
            }
        }
    }

    // --- Category mapping tests ---

    #[test]
    fn test_category_by_code_range() {
        for err in all_variants() {
            let expected = match err as u32 {
                1..=99 => ErrorCategory::Configuration,
                100..=199 => ErrorCategory::Authorization,
                200..=299 => ErrorCategory::Lifecycle,
                300..=399 => ErrorCategory::Temporal,
                400..=499 => ErrorCategory::Cryptography,
                700..=799 => ErrorCategory::Arithmetic,
                other => panic!("code {} outside every category block", other),
            };
            assert_eq!(err.category(), expected, "{:?}", err);
        }
    }

    #[test]
    fn test_category_spot_checks() {
        assert_eq!(
            ContractError::ZeroAddress.category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            ContractError::NotSettlementAuthority.category(),
            ErrorCategory::Authorization
        );
        assert_eq!(
            ContractError::BidAlreadySubmitted.category(),
            ErrorCategory::Lifecycle
        );
        assert_eq!(
            ContractError::CliffNotEnded.category(),
            ErrorCategory::Temporal
        );
        assert_eq!(
            ContractError::IntegrityCheckFailed.category(),
            ErrorCategory::Cryptography
        );
        assert_eq!(ContractError::Overflow.category(), ErrorCategory::Arithmetic);
    }

    #[test]
    fn test_only_temporal_errors_are_recoverable() {
        assert!(ContractError::CliffNotEnded.is_recoverable());
        assert!(ContractError::RefundWindowClosed.is_recoverable());
        assert!(!ContractError::AlreadyInitialized.is_recoverable());
        assert!(!ContractError::IntegrityCheckFailed.is_recoverable());
    }

    // --- Description tests ---

    #[test]
    fn test_descriptions_non_empty() {
        for err in all_variants() {
            assert!(!err.description().is_empty(), "{:?}", err);
        }
    }

    #[test]
    fn test_description_values() {
        assert_eq!(
            ContractError::CliffNotEnded.description(),
            "Vesting cliff has not ended"
        );
        assert_eq!(
            ContractError::AlreadyInitialized.description(),
            "Already initialized"
        );
    }

    // --- Zero address ---

    #[test]
    fn test_zero_strkeys_are_zero() {
        let e = Env::default();
        let account = Address::from_string(&String::from_str(&e, ZERO_ACCOUNT));
        let contract = Address::from_string(&String::from_str(&e, ZERO_CONTRACT));
        assert!(is_zero_address(&e, &account));
        assert!(is_zero_address(&e, &contract));
        assert_eq!(
            require_non_zero(&e, &account),
            Err(ContractError::ZeroAddress)
        );
    }

    #[test]
    fn test_generated_address_is_not_zero() {
        let e = Env::default();
        let addr = Address::generate(&e);
        assert!(!is_zero_address(&e, &addr));
        assert_eq!(require_non_zero(&e, &addr), Ok(()));
    }
}
