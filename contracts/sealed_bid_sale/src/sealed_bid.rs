//! Sealed bid encryption over BLS12-381 G1.
//!
//! ECIES with SHA-256: the bidder picks an ephemeral scalar `k`, publishes
//! `R = k * G` and derives a shared secret from `S = k * P`. The plaintext
//! `amount (i128 BE) || salt` is masked with a SHA-256 keystream and
//! authenticated with an encrypt-then-MAC tag. The holder of `d` (with
//! `P = d * G`) recomputes `S = d * R`.
//!
//! Curve operations use the host functions behind `env.crypto().bls12_381()`.

use settlement_errors::ContractError;
use soroban_sdk::crypto::bls12_381::{Fr, G1Affine};
use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{Address, Bytes, BytesN, Env};

use crate::types::SealedBid;

const DOMAIN_KDF: &[u8] = b"sealed-bid/kdf/v1";
const DOMAIN_STREAM: &[u8] = b"sealed-bid/stream/v1";
const DOMAIN_MAC: &[u8] = b"sealed-bid/mac/v1";

/// Plaintext length: 16-byte amount followed by a 32-byte salt.
pub const PLAINTEXT_LEN: usize = 48;

/// G1 generator, uncompressed `x || y`.
pub const G1_GENERATOR: [u8; 96] = [
    0x17, 0xf1, 0xd3, 0xa7, 0x31, 0x97, 0xd7, 0x94, 0x26, 0x95, 0x63, 0x8c, 0x4f, 0xa9, 0xac, 0x0f,
    0xc3, 0x68, 0x8c, 0x4f, 0x97, 0x74, 0xb9, 0x05, 0xa1, 0x4e, 0x3a, 0x3f, 0x17, 0x1b, 0xac, 0x58,
    0x6c, 0x55, 0xe8, 0x3f, 0xf9, 0x7a, 0x1a, 0xef, 0xfb, 0x3a, 0xf0, 0x0a, 0xdb, 0x22, 0xc6, 0xbb,
    0x08, 0xb3, 0xf4, 0x81, 0xe3, 0xaa, 0xa0, 0xf1, 0xa0, 0x9e, 0x30, 0xed, 0x74, 0x1d, 0x8a, 0xe4,
    0xfc, 0xf5, 0xe0, 0x95, 0xd5, 0xd0, 0x0a, 0xf6, 0x00, 0xdb, 0x18, 0xcb, 0x2c, 0x04, 0xb3, 0xed,
    0xd0, 0x3c, 0xc7, 0x44, 0xa2, 0x88, 0x8a, 0xe4, 0x0c, 0xaa, 0x23, 0x29, 0x46, 0xc5, 0xe7, 0xe1,
];

/// Point at infinity: infinity flag set, everything else zero.
pub const G1_IDENTITY: [u8; 96] = {
    let mut bytes = [0u8; 96];
    bytes[0] = 0x40;
    bytes
};

/// Scalar field order `r`, big-endian.
const SCALAR_ORDER: [u8; 32] = [
    0x73, 0xed, 0xa7, 0x53, 0x29, 0x9d, 0x7d, 0x48, 0x33, 0x39, 0xd8, 0x08, 0x09, 0xa1, 0xd8, 0x05,
    0x53, 0xbd, 0xa4, 0x02, 0xff, 0xfe, 0x5b, 0xfe, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01,
];

/// Returns `true` if `scalar` is in `1..r`.
pub fn is_canonical_scalar(scalar: &BytesN<32>) -> bool {
    let bytes = scalar.to_array();
    bytes != [0u8; 32] && bytes < SCALAR_ORDER
}

/// Returns `true` if `point` is a non-identity point of the prime-order subgroup.
///
/// Bytes that do not encode a point on the curve at all never reach a `false`
/// return: the host traps inside `g1_is_in_subgroup` and the whole invocation
/// aborts instead of failing with a contract error.
pub fn is_valid_point(e: &Env, point: &BytesN<96>) -> bool {
    if point.to_array() == G1_IDENTITY {
        return false;
    }
    let affine = G1Affine::from_bytes(point.clone());
    e.crypto().bls12_381().g1_is_in_subgroup(&affine)
}

fn scalar_mul(e: &Env, point: &BytesN<96>, scalar: &BytesN<32>) -> BytesN<96> {
    let affine = G1Affine::from_bytes(point.clone());
    let fr = Fr::from_bytes(scalar.clone());
    e.crypto().bls12_381().g1_mul(&affine, &fr).to_bytes()
}

/// `secret * G`.
pub fn derive_public_key(e: &Env, secret: &BytesN<32>) -> Result<BytesN<96>, ContractError> {
    if !is_canonical_scalar(secret) {
        return Err(ContractError::InvalidPrivateKey);
    }
    let generator = BytesN::from_array(e, &G1_GENERATOR);
    Ok(scalar_mul(e, &generator, secret))
}

/// Fails with `InvalidPrivateKey` unless `private_key * G == public_key`.
pub fn verify_key_pair(
    e: &Env,
    private_key: &BytesN<32>,
    public_key: &BytesN<96>,
) -> Result<(), ContractError> {
    if derive_public_key(e, private_key)? != *public_key {
        return Err(ContractError::InvalidPrivateKey);
    }
    Ok(())
}

/// Salt binding a ciphertext to its submitter: `SHA256(XDR(investor))`.
pub fn bidder_salt(e: &Env, investor: &Address) -> BytesN<32> {
    e.crypto().sha256(&investor.clone().to_xdr(e)).into()
}

fn shared_secret(e: &Env, point: &BytesN<96>) -> BytesN<32> {
    let mut buf = Bytes::from_slice(e, DOMAIN_KDF);
    buf.extend_from_array(&point.to_array());
    e.crypto().sha256(&buf).into()
}

fn keystream(e: &Env, shared: &BytesN<32>) -> [u8; PLAINTEXT_LEN] {
    let mut out = [0u8; PLAINTEXT_LEN];
    for (i, chunk) in out.chunks_mut(32).enumerate() {
        let mut buf = Bytes::from_slice(e, DOMAIN_STREAM);
        buf.extend_from_array(&shared.to_array());
        buf.extend_from_array(&(i as u32).to_be_bytes());
        let block: BytesN<32> = e.crypto().sha256(&buf).into();
        chunk.copy_from_slice(&block.to_array()[..chunk.len()]);
    }
    out
}

fn mac(e: &Env, shared: &BytesN<32>, ciphertext: &BytesN<48>) -> BytesN<32> {
    let mut buf = Bytes::from_slice(e, DOMAIN_MAC);
    buf.extend_from_array(&shared.to_array());
    buf.extend_from_array(&ciphertext.to_array());
    e.crypto().sha256(&buf).into()
}

fn xor(a: &[u8; PLAINTEXT_LEN], b: &[u8; PLAINTEXT_LEN]) -> [u8; PLAINTEXT_LEN] {
    let mut out = [0u8; PLAINTEXT_LEN];
    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
        *o = x ^ y;
    }
    out
}

/// Encrypt `amount || salt` to `public_key` with ephemeral scalar `ephemeral_secret`.
///
/// Used by bidders (and tests) off-chain; the contract only ever opens bids.
/// `ephemeral_secret` must be fresh per bid.
pub fn seal(
    e: &Env,
    amount: i128,
    salt: &BytesN<32>,
    public_key: &BytesN<96>,
    ephemeral_secret: &BytesN<32>,
) -> Result<SealedBid, ContractError> {
    if !is_valid_point(e, public_key) {
        return Err(ContractError::InvalidPublicKey);
    }
    let ephemeral_key = derive_public_key(e, ephemeral_secret)?;
    let shared = shared_secret(e, &scalar_mul(e, public_key, ephemeral_secret));

    let mut plaintext = [0u8; PLAINTEXT_LEN];
    plaintext[..16].copy_from_slice(&amount.to_be_bytes());
    plaintext[16..].copy_from_slice(&salt.to_array());

    let ciphertext = BytesN::from_array(e, &xor(&plaintext, &keystream(e, &shared)));
    let tag = mac(e, &shared, &ciphertext);
    Ok(SealedBid {
        ephemeral_key,
        ciphertext,
        tag,
    })
}

/// Decrypt a sealed bid with the sale's private key, returning `(amount, salt)`.
///
/// A wrong key or any modified byte fails with `IntegrityCheckFailed`.
pub fn open(
    e: &Env,
    sealed: &SealedBid,
    private_key: &BytesN<32>,
) -> Result<(i128, BytesN<32>), ContractError> {
    if !is_canonical_scalar(private_key) {
        return Err(ContractError::InvalidPrivateKey);
    }
    if !is_valid_point(e, &sealed.ephemeral_key) {
        return Err(ContractError::InvalidCiphertext);
    }
    let shared = shared_secret(e, &scalar_mul(e, &sealed.ephemeral_key, private_key));
    if mac(e, &shared, &sealed.ciphertext) != sealed.tag {
        return Err(ContractError::IntegrityCheckFailed);
    }

    let plaintext = xor(&sealed.ciphertext.to_array(), &keystream(e, &shared));
    let mut amount = [0u8; 16];
    amount.copy_from_slice(&plaintext[..16]);
    let mut salt = [0u8; 32];
    salt.copy_from_slice(&plaintext[16..]);
    Ok((i128::from_be_bytes(amount), BytesN::from_array(e, &salt)))
}
