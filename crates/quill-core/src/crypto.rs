//! Digest and key-derivation primitives
//!
//! Pure, stateless helpers shared by the key and mnemonic modules and
//! exposed to the boundary crate: the two SHA-2 widths used on the wire,
//! the Keccak-256 digest used for ECDSA pre-hashing and EVM addresses,
//! and a PBKDF2 key-derivation function with a selectable HMAC variant.
//!
//! Two calls with identical inputs always produce identical outputs;
//! nothing here keeps state between calls.

use hmac::Hmac;
use sha2::{Digest, Sha256, Sha384, Sha512};
use sha3::Keccak256;

/// SHA-2 with a 256-bit output.
#[must_use]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-2 with a 384-bit output.
#[must_use]
pub fn sha384(data: &[u8]) -> [u8; 48] {
    Sha384::digest(data).into()
}

/// Keccak-256 (the pre-standardization SHA-3 variant used by EVM tooling).
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// HMAC variant selecting the hash inside [`pbkdf2`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pbkdf2Variant {
    /// HMAC-SHA-256
    HmacSha256,
    /// HMAC-SHA-384
    HmacSha384,
    /// HMAC-SHA-512
    HmacSha512,
}

/// Derive `key_length` bytes from `password` and `salt` with PBKDF2.
///
/// The output length is exactly `key_length`; the same inputs always
/// produce the same output.
#[must_use]
pub fn pbkdf2(
    variant: Pbkdf2Variant,
    password: &[u8],
    salt: &[u8],
    rounds: u32,
    key_length: usize,
) -> Vec<u8> {
    let mut out = vec![0; key_length];

    match variant {
        Pbkdf2Variant::HmacSha256 => {
            pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, rounds, &mut out);
        }
        Pbkdf2Variant::HmacSha384 => {
            pbkdf2::pbkdf2_hmac::<Sha384>(password, salt, rounds, &mut out);
        }
        Pbkdf2Variant::HmacSha512 => {
            pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, rounds, &mut out);
        }
    }

    out
}

/// HMAC-SHA-512 over `data`, keyed by `key`.
///
/// Shared by hierarchical key derivation and mnemonic seed expansion.
pub(crate) fn hmac_sha512(key: &[u8], data: &[&[u8]]) -> [u8; 64] {
    use hmac::Mac;

    let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts keys of any size");

    for part in data {
        mac.update(part);
    }

    mac.finalize().into_bytes().into()
}
