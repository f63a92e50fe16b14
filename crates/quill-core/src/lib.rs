//! Quill Core
//!
//! Key management and transaction signing for the Quill ledger client.
//!
//! # Keys
//!
//! [`PrivateKey`]/[`PublicKey`] cover two curve families — Ed25519 and
//! ECDSA over secp256k1 — behind one surface: generation, parsing (raw,
//! DER, PEM, password-encrypted PEM), serialization, signing and
//! verification. Ed25519 keys carrying a chain code support hardened
//! hierarchical derivation; keys can also be recovered from [`Mnemonic`]
//! phrases, including a legacy phrase scheme kept for backward recovery.
//!
//! # Multi-party signing
//!
//! A [`TransactionSources`] value owns an unsigned transaction payload
//! and accumulates signatures from any number of [`Signer`]s — local
//! private keys or externally-backed capabilities — by producing new
//! values, never by mutating shared state. [`TransactionSources::to_bytes`]
//! yields the final wire bytes handed to the network-execution layer.
//!
//! # Scheduling
//!
//! Everything in this crate is synchronous, reentrant, bounded
//! computation: no I/O, no background threads, no internal retries.

pub mod crypto;
mod error;
mod key;
mod mnemonic;
mod signer;
mod sources;

pub use error::{Error, MnemonicEntropyError, MnemonicParseError, Result};
pub use key::{EvmAddress, PrivateKey, PublicKey};
pub use mnemonic::Mnemonic;
pub use signer::Signer;
pub use sources::TransactionSources;
