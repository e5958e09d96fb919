//! Tests for the sealed bid codec.

#![cfg(test)]

use crate::sealed_bid::{self, G1_GENERATOR, G1_IDENTITY};
use crate::test_helpers::{env, ephemeral, sale_secret};
use settlement_errors::ContractError;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, BytesN, Env};

fn keypair(e: &Env) -> (BytesN<32>, BytesN<96>) {
    let secret = sale_secret(e);
    let public = sealed_bid::derive_public_key(e, &secret).unwrap();
    (secret, public)
}

fn salt(e: &Env, fill: u8) -> BytesN<32> {
    BytesN::from_array(e, &[fill; 32])
}

#[test]
fn test_open_recovers_sealed_amount_and_salt() {
    let e = env();
    let (secret, public) = keypair(&e);
    for (amount, seed) in [(1i128, 1u8), (5_000_000, 2), (i64::MAX as i128, 3), (-7, 4)] {
        let sealed = sealed_bid::seal(&e, amount, &salt(&e, seed), &public, &ephemeral(&e, seed))
            .unwrap();
        assert_eq!(
            sealed_bid::open(&e, &sealed, &secret),
            Ok((amount, salt(&e, seed)))
        );
    }
}

#[test]
fn test_ciphertext_hides_plaintext_layout() {
    let e = env();
    let (_, public) = keypair(&e);
    let a = sealed_bid::seal(&e, 1_000, &salt(&e, 9), &public, &ephemeral(&e, 1)).unwrap();
    let b = sealed_bid::seal(&e, 1_000, &salt(&e, 9), &public, &ephemeral(&e, 2)).unwrap();
    assert_ne!(a.ciphertext, b.ciphertext);
    assert_ne!(a.ephemeral_key, b.ephemeral_key);
}

#[test]
fn test_generator_is_public_key_of_one() {
    let e = env();
    let mut one = [0u8; 32];
    one[31] = 1;
    let public = sealed_bid::derive_public_key(&e, &BytesN::from_array(&e, &one)).unwrap();
    assert_eq!(public, BytesN::from_array(&e, &G1_GENERATOR));
}

#[test]
fn test_wrong_key_fails_integrity_check() {
    let e = env();
    let (_, public) = keypair(&e);
    let sealed = sealed_bid::seal(&e, 42, &salt(&e, 1), &public, &ephemeral(&e, 1)).unwrap();
    let wrong = BytesN::from_array(&e, &[0x22; 32]);
    assert_eq!(
        sealed_bid::open(&e, &sealed, &wrong),
        Err(ContractError::IntegrityCheckFailed)
    );
}

#[test]
fn test_tampered_ciphertext_fails_integrity_check() {
    let e = env();
    let (secret, public) = keypair(&e);
    let mut sealed = sealed_bid::seal(&e, 42, &salt(&e, 1), &public, &ephemeral(&e, 1)).unwrap();
    let mut bytes = sealed.ciphertext.to_array();
    bytes[0] ^= 0x01;
    sealed.ciphertext = BytesN::from_array(&e, &bytes);
    assert_eq!(
        sealed_bid::open(&e, &sealed, &secret),
        Err(ContractError::IntegrityCheckFailed)
    );
}

#[test]
fn test_tampered_tag_fails_integrity_check() {
    let e = env();
    let (secret, public) = keypair(&e);
    let mut sealed = sealed_bid::seal(&e, 42, &salt(&e, 1), &public, &ephemeral(&e, 1)).unwrap();
    let mut bytes = sealed.tag.to_array();
    bytes[31] ^= 0x80;
    sealed.tag = BytesN::from_array(&e, &bytes);
    assert_eq!(
        sealed_bid::open(&e, &sealed, &secret),
        Err(ContractError::IntegrityCheckFailed)
    );
}

#[test]
fn test_swapped_ephemeral_key_fails_integrity_check() {
    let e = env();
    let (secret, public) = keypair(&e);
    let mut sealed = sealed_bid::seal(&e, 42, &salt(&e, 1), &public, &ephemeral(&e, 1)).unwrap();
    sealed.ephemeral_key = BytesN::from_array(&e, &G1_GENERATOR);
    assert_eq!(
        sealed_bid::open(&e, &sealed, &secret),
        Err(ContractError::IntegrityCheckFailed)
    );
}

#[test]
fn test_identity_ephemeral_key_is_invalid_ciphertext() {
    let e = env();
    let (secret, public) = keypair(&e);
    let mut sealed = sealed_bid::seal(&e, 42, &salt(&e, 1), &public, &ephemeral(&e, 1)).unwrap();
    sealed.ephemeral_key = BytesN::from_array(&e, &G1_IDENTITY);
    assert_eq!(
        sealed_bid::open(&e, &sealed, &secret),
        Err(ContractError::InvalidCiphertext)
    );
}

#[test]
fn test_non_canonical_scalars_rejected() {
    let e = env();
    let zero = BytesN::from_array(&e, &[0u8; 32]);
    let too_big = BytesN::from_array(&e, &[0xff; 32]);
    assert!(!sealed_bid::is_canonical_scalar(&zero));
    assert!(!sealed_bid::is_canonical_scalar(&too_big));
    assert!(sealed_bid::is_canonical_scalar(&sale_secret(&e)));
    assert_eq!(
        sealed_bid::derive_public_key(&e, &zero),
        Err(ContractError::InvalidPrivateKey)
    );

    let (_, public) = keypair(&e);
    let sealed = sealed_bid::seal(&e, 42, &salt(&e, 1), &public, &ephemeral(&e, 1)).unwrap();
    assert_eq!(
        sealed_bid::open(&e, &sealed, &too_big),
        Err(ContractError::InvalidPrivateKey)
    );
}

#[test]
fn test_identity_public_key_cannot_be_sealed_to() {
    let e = env();
    let identity = BytesN::from_array(&e, &G1_IDENTITY);
    assert!(!sealed_bid::is_valid_point(&e, &identity));
    assert_eq!(
        sealed_bid::seal(&e, 1, &salt(&e, 1), &identity, &ephemeral(&e, 1)),
        Err(ContractError::InvalidPublicKey)
    );
}

#[test]
fn test_verify_key_pair() {
    let e = env();
    let (secret, public) = keypair(&e);
    assert_eq!(sealed_bid::verify_key_pair(&e, &secret, &public), Ok(()));
    let other = BytesN::from_array(&e, &[0x33; 32]);
    assert_eq!(
        sealed_bid::verify_key_pair(&e, &other, &public),
        Err(ContractError::InvalidPrivateKey)
    );
}

#[test]
fn test_bidder_salt_is_per_address() {
    let e = env();
    let alice = Address::generate(&e);
    let bob = Address::generate(&e);
    assert_eq!(
        sealed_bid::bidder_salt(&e, &alice),
        sealed_bid::bidder_salt(&e, &alice)
    );
    assert_ne!(
        sealed_bid::bidder_salt(&e, &alice),
        sealed_bid::bidder_salt(&e, &bob)
    );
}
