//! Asymmetric key abstraction
//!
//! Private and public keys over the two supported curve families:
//! Ed25519 and ECDSA over secp256k1. The two variants share one surface
//! (generate, parse, serialize, sign/verify) but keep their mathematical
//! differences explicit — hierarchical derivation exists only for Ed25519
//! keys carrying a chain code, EVM addresses only for ECDSA keys.

mod private;
mod public;

pub use private::PrivateKey;
pub use public::{EvmAddress, PublicKey};

use once_cell::sync::Lazy;
use pkcs8::ObjectIdentifier;
use secp256k1::{All, Secp256k1};

pub(crate) const ED25519_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");
pub(crate) const SECP256K1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.10");

/// Shared secp256k1 context; construction is expensive, so build it once.
pub(crate) static SECP: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);
