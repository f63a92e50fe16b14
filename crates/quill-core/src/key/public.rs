//! Public keys: parsing, serialization and verification

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use ed25519_dalek::Verifier as _;
use pkcs8::der::asn1::BitStringRef;
use pkcs8::der::{Decode, Encode};
use pkcs8::spki::SubjectPublicKeyInfoRef;
use pkcs8::AlgorithmIdentifierRef;

use super::{ED25519_OID, SECP, SECP256K1_OID};
use crate::Error;

/// A public key for the ledger network.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(PublicKeyData);

#[derive(Clone, Copy)]
enum PublicKeyData {
    Ed25519(ed25519_dalek::VerifyingKey),
    EcdsaSecp256k1(secp256k1::PublicKey),
}

impl PartialEq for PublicKeyData {
    fn eq(&self, other: &Self) -> bool {
        // equal iff the curve and the encoded point match.
        match (self, other) {
            (Self::Ed25519(l), Self::Ed25519(r)) => l == r,
            (Self::EcdsaSecp256k1(l), Self::EcdsaSecp256k1(r)) => l == r,
            _ => false,
        }
    }
}

impl Eq for PublicKeyData {}

impl Hash for PublicKeyData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Ed25519(key) => key.to_bytes().hash(state),
            Self::EcdsaSecp256k1(key) => key.serialize().hash(state),
        }
    }
}

impl PublicKey {
    pub(super) fn ed25519(key: ed25519_dalek::VerifyingKey) -> Self {
        Self(PublicKeyData::Ed25519(key))
    }

    pub(super) fn ecdsa(key: secp256k1::PublicKey) -> Self {
        Self(PublicKeyData::EcdsaSecp256k1(key))
    }

    /// Returns `true` if this is an Ed25519 key.
    #[must_use]
    pub fn is_ed25519(&self) -> bool {
        matches!(&self.0, PublicKeyData::Ed25519(_))
    }

    /// Returns `true` if this is an ECDSA(secp256k1) key.
    #[must_use]
    pub fn is_ecdsa(&self) -> bool {
        matches!(&self.0, PublicKeyData::EcdsaSecp256k1(_))
    }

    /// Parse a public key from bytes, inferring the encoding from the
    /// length: 32 bytes is a raw Ed25519 point, 33 or 65 a SEC1-encoded
    /// secp256k1 point, anything else DER.
    pub fn from_bytes(bytes: &[u8]) -> crate::Result<Self> {
        match bytes.len() {
            32 => Self::from_bytes_ed25519(bytes),
            33 | 65 => Self::from_bytes_ecdsa(bytes),
            _ => Self::from_bytes_der(bytes),
        }
    }

    /// Parse an Ed25519 public key from raw or DER bytes.
    pub fn from_bytes_ed25519(bytes: &[u8]) -> crate::Result<Self> {
        let data = if let Ok(bytes) = bytes.try_into() {
            ed25519_dalek::VerifyingKey::from_bytes(bytes).map_err(Error::key_parse)?
        } else {
            return Self::from_bytes_der(bytes);
        };

        Ok(Self::ed25519(data))
    }

    /// Parse an ECDSA(secp256k1) public key from raw (compressed or
    /// uncompressed SEC1 point) or DER bytes.
    pub fn from_bytes_ecdsa(bytes: &[u8]) -> crate::Result<Self> {
        let data = if bytes.len() == 33 || bytes.len() == 65 {
            secp256k1::PublicKey::from_slice(bytes).map_err(Error::key_parse)?
        } else {
            return Self::from_bytes_der(bytes);
        };

        Ok(Self::ecdsa(data))
    }

    /// Parse a public key from DER-encoded `SubjectPublicKeyInfo` bytes.
    pub fn from_bytes_der(bytes: &[u8]) -> crate::Result<Self> {
        let info = SubjectPublicKeyInfoRef::from_der(bytes)
            .map_err(|err| Error::key_parse(err.to_string()))?;

        let key = info
            .subject_public_key
            .as_bytes()
            .ok_or_else(|| Error::key_parse("subject public key has unused bits"))?;

        if info.algorithm.oid == SECP256K1_OID {
            return Self::from_bytes_ecdsa(key);
        }

        if info.algorithm.oid == ED25519_OID {
            return Self::from_bytes_ed25519(key);
        }

        Err(Error::key_parse(format!("unsupported key algorithm: {}", info.algorithm.oid)))
    }

    /// This key's raw point encoding: 32 bytes for Ed25519, the 33-byte
    /// compressed SEC1 point for ECDSA.
    #[must_use]
    pub fn to_bytes_raw(&self) -> Vec<u8> {
        match &self.0 {
            PublicKeyData::Ed25519(key) => key.to_bytes().to_vec(),
            PublicKeyData::EcdsaSecp256k1(key) => key.serialize().to_vec(),
        }
    }

    /// This key as DER-encoded `SubjectPublicKeyInfo`.
    #[must_use]
    pub fn to_bytes_der(&self) -> Vec<u8> {
        let raw = self.to_bytes_raw();

        let info = SubjectPublicKeyInfoRef {
            algorithm: self.algorithm(),
            subject_public_key: BitStringRef::from_bytes(&raw)
                .expect("raw point encodings are short enough for a BIT STRING"),
        };

        info.to_der().expect("DER encoding of a valid key cannot fail")
    }

    /// This key in its conventional byte form: raw for Ed25519, DER for
    /// ECDSA.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match &self.0 {
            PublicKeyData::Ed25519(_) => self.to_bytes_raw(),
            PublicKeyData::EcdsaSecp256k1(_) => self.to_bytes_der(),
        }
    }

    /// Hex form of [`to_bytes_raw`](Self::to_bytes_raw).
    #[must_use]
    pub fn to_string_raw(&self) -> String {
        hex::encode(self.to_bytes_raw())
    }

    /// Hex form of [`to_bytes_der`](Self::to_bytes_der).
    #[must_use]
    pub fn to_string_der(&self) -> String {
        hex::encode(self.to_bytes_der())
    }

    fn algorithm(&self) -> AlgorithmIdentifierRef<'_> {
        AlgorithmIdentifierRef {
            parameters: None,
            oid: match &self.0 {
                PublicKeyData::Ed25519(_) => ED25519_OID,
                PublicKeyData::EcdsaSecp256k1(_) => SECP256K1_OID,
            },
        }
    }

    /// Verify `signature` over `message`.
    ///
    /// Wrong-but-well-formed signatures are an ordinary
    /// [`Error::SignatureVerify`], never a panic. A signature whose format
    /// does not match this key's curve fails the same way.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> crate::Result<()> {
        match &self.0 {
            PublicKeyData::Ed25519(key) => {
                let signature =
                    ed25519_dalek::Signature::from_slice(signature).map_err(Error::signature_verify)?;

                key.verify(message, &signature).map_err(Error::signature_verify)
            }

            PublicKeyData::EcdsaSecp256k1(key) => {
                let signature = secp256k1::ecdsa::Signature::from_compact(signature)
                    .map_err(Error::signature_verify)?;

                let digest = crate::crypto::keccak256(message);
                let message = secp256k1::Message::from_digest_slice(&digest)
                    .expect("keccak256 digests are 32 bytes");

                SECP.verify_ecdsa(&message, &signature, key).map_err(Error::signature_verify)
            }
        }
    }

    /// The EVM account address for this key: the rightmost 20 bytes of
    /// the Keccak-256 digest of the uncompressed point encoding.
    ///
    /// Returns `None` for Ed25519 keys — the address form is only defined
    /// for ECDSA(secp256k1) keys.
    #[must_use]
    pub fn to_evm_address(&self) -> Option<EvmAddress> {
        match &self.0 {
            PublicKeyData::Ed25519(_) => None,
            PublicKeyData::EcdsaSecp256k1(key) => {
                // uncompressed SEC1 encoding, without the 0x04 tag.
                let point = key.serialize_uncompressed();
                let digest = crate::crypto::keccak256(&point[1..]);

                let mut address = [0; 20];
                address.copy_from_slice(&digest[12..]);

                Some(EvmAddress(address))
            }
        }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_string_der())
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);

        Self::from_bytes(&hex::decode(s).map_err(Error::key_parse)?)
    }
}

/// A 20-byte EVM account address derived from an ECDSA public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvmAddress(pub [u8; 20]);

impl EvmAddress {
    /// The raw address bytes.
    #[must_use]
    pub fn to_bytes(self) -> [u8; 20] {
        self.0
    }
}

impl fmt::Debug for EvmAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

impl fmt::Display for EvmAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
