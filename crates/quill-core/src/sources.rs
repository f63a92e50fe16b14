//! Transaction sources: an unsigned payload plus collected signatures
//!
//! [`TransactionSources`] is the aggregate that multiple independent
//! signers enrich before a transaction is handed to the execution layer.
//! Values are immutable: signing returns a *new* sources value and never
//! mutates the one it was called on, so concurrent holders of the same
//! value observe no interference. The (potentially large) payload is
//! structurally shared between derived values; only the signature set is
//! copied on write.
//!
//! The canonical signing bytes are the payload itself — they do not
//! depend on how many signatures have been collected, so signing is
//! insensitive to ordering. A given public key contributes at most one
//! signature: re-signing replaces the previous entry instead of
//! duplicating it.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::{Error, PublicKey, Signer};

/// Version tag leading the serialized wire form.
const WIRE_VERSION: u8 = 1;

/// An immutable serialized-transaction payload with a growing,
/// deduplicated set of `(public key, signature)` pairs.
#[derive(Clone)]
pub struct TransactionSources {
    payload: Arc<[u8]>,

    /// Keyed by the raw public-key encoding, which also fixes the
    /// canonical signature order in [`to_bytes`](Self::to_bytes).
    signatures: BTreeMap<Vec<u8>, SignaturePair>,
}

#[derive(Clone)]
struct SignaturePair {
    public_key: PublicKey,
    signature: Vec<u8>,
}

impl TransactionSources {
    /// Build sources from an unsigned payload, then apply `signers` in
    /// order.
    ///
    /// # Errors
    /// [`Error::RequestParse`] if the payload is empty, [`Error::Signer`]
    /// if one of the signers fails.
    pub fn from_bytes(payload: &[u8], signers: &[Signer]) -> crate::Result<Self> {
        if payload.is_empty() {
            return Err(Error::request_parse("transaction payload is empty"));
        }

        let sources = Self { payload: payload.into(), signatures: BTreeMap::new() };

        sources.sign_with(signers)
    }

    /// The canonical signing bytes handed to every signer.
    ///
    /// Identical for every signer regardless of how many signatures were
    /// already collected.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The collected signatures, in canonical (public-key) order.
    pub fn signatures(&self) -> impl Iterator<Item = (&PublicKey, &[u8])> + '_ {
        self.signatures.values().map(|pair| (&pair.public_key, pair.signature.as_slice()))
    }

    /// Number of distinct public keys that have signed.
    #[must_use]
    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }

    /// Sign with each of `signers` and return the enriched sources.
    ///
    /// `self` is unaffected; callers that want the accumulated result
    /// must adopt the returned value. Signing with a public key that has
    /// already signed replaces its entry.
    ///
    /// # Errors
    /// [`Error::Signer`] when a signer fails. Signatures collected before
    /// the failing signer are preserved in the error's `partial` field
    /// and the error names the failing signer; they are not silently
    /// dropped.
    pub fn sign_with(&self, signers: &[Signer]) -> crate::Result<Self> {
        let mut next = self.clone();

        for (index, signer) in signers.iter().enumerate() {
            match signer.sign(&next.payload) {
                Ok((public_key, signature)) => {
                    next.signatures.insert(
                        public_key.to_bytes_raw(),
                        SignaturePair { public_key, signature },
                    );
                }
                Err(source) => {
                    return Err(Error::Signer {
                        public_key: Box::new(signer.public_key()),
                        index,
                        partial: Box::new(next),
                        source,
                    });
                }
            }
        }

        Ok(next)
    }

    /// Sign with exactly one signer; same contract as
    /// [`sign_with`](Self::sign_with).
    pub fn sign_single(&self, signer: &Signer) -> crate::Result<Self> {
        self.sign_with(std::slice::from_ref(signer))
    }

    /// Check that a signature attributed to `public_key` exists and
    /// verifies against the canonical signing bytes.
    ///
    /// # Errors
    /// [`Error::SignatureVerify`] if no signature from that key exists,
    /// or the one that does fails verification.
    pub fn verify(&self, public_key: &PublicKey) -> crate::Result<()> {
        let pair = self
            .signatures
            .get(&public_key.to_bytes_raw())
            .ok_or_else(|| Error::signature_verify("no signature from the given key"))?;

        pair.public_key.verify(&self.payload, &pair.signature)
    }

    /// Merge the signature sets of two sources for the same payload.
    ///
    /// Entries from `other` win on shared public keys, which is
    /// indistinguishable from keeping ours: signing is deterministic for
    /// a given payload and key.
    ///
    /// # Errors
    /// [`Error::RequestParse`] when the payloads differ.
    pub fn merge(&self, other: &Self) -> crate::Result<Self> {
        if self.payload != other.payload {
            return Err(Error::request_parse("cannot merge sources for different payloads"));
        }

        let mut merged = self.clone();
        for (key, pair) in &other.signatures {
            merged.signatures.insert(key.clone(), pair.clone());
        }

        Ok(merged)
    }

    /// Serialize payload plus signature set into the final wire bytes.
    ///
    /// Deterministic for a given payload and signature *set*: signatures
    /// are emitted in canonical public-key order, not insertion order.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            1 + 4
                + self.payload.len()
                + 4
                + self
                    .signatures
                    .values()
                    .map(|pair| 8 + pair.public_key.to_bytes_raw().len() + pair.signature.len())
                    .sum::<usize>(),
        );

        out.push(WIRE_VERSION);
        out.extend_from_slice(&(self.payload.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.payload);

        out.extend_from_slice(&(self.signatures.len() as u32).to_be_bytes());
        for (raw_key, pair) in &self.signatures {
            out.extend_from_slice(&(raw_key.len() as u32).to_be_bytes());
            out.extend_from_slice(raw_key);
            out.extend_from_slice(&(pair.signature.len() as u32).to_be_bytes());
            out.extend_from_slice(&pair.signature);
        }

        out
    }

    /// Re-hydrate sources previously serialized with
    /// [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    /// [`Error::RequestParse`] on framing problems, [`Error::KeyParse`]
    /// when an embedded public key does not parse.
    pub fn from_signed_bytes(bytes: &[u8]) -> crate::Result<Self> {
        let mut reader = Reader { bytes, position: 0 };

        let version = reader.take(1)?[0];
        if version != WIRE_VERSION {
            return Err(Error::request_parse(format!("unsupported wire version {version}")));
        }

        let payload_len = reader.take_u32()? as usize;
        let payload = reader.take(payload_len)?;
        if payload.is_empty() {
            return Err(Error::request_parse("transaction payload is empty"));
        }

        let mut signatures = BTreeMap::new();
        let count = reader.take_u32()? as usize;

        for _ in 0..count {
            let key_len = reader.take_u32()? as usize;
            let raw_key = reader.take(key_len)?;

            let signature_len = reader.take_u32()? as usize;
            let signature = reader.take(signature_len)?;

            let public_key = PublicKey::from_bytes(raw_key)?;

            signatures.insert(
                raw_key.to_vec(),
                SignaturePair { public_key, signature: signature.to_vec() },
            );
        }

        if !reader.is_empty() {
            return Err(Error::request_parse("trailing bytes after signature set"));
        }

        Ok(Self { payload: payload.into(), signatures })
    }
}

impl fmt::Debug for TransactionSources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionSources")
            .field("payload_len", &self.payload.len())
            .field("signers", &self.signatures.keys().map(hex::encode).collect::<Vec<_>>())
            .finish()
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> crate::Result<&'a [u8]> {
        let end = self
            .position
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| Error::request_parse("truncated sources"))?;

        let slice = &self.bytes[self.position..end];
        self.position = end;

        Ok(slice)
    }

    fn take_u32(&mut self) -> crate::Result<u32> {
        let bytes = self.take(4)?;

        Ok(u32::from_be_bytes(bytes.try_into().expect("take(4) returns 4 bytes")))
    }

    fn is_empty(&self) -> bool {
        self.position == self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::TransactionSources;
    use crate::{Error, PrivateKey, Signer};

    fn signer() -> Signer {
        Signer::private_key(PrivateKey::generate_ed25519())
    }

    #[test]
    fn test_empty_payload_is_rejected() {
        let result = TransactionSources::from_bytes(b"", &[]);

        assert!(matches!(result, Err(Error::RequestParse(_))));
    }

    #[test]
    fn test_signing_leaves_the_original_untouched() {
        let unsigned = TransactionSources::from_bytes(b"payload", &[]).unwrap();

        let signed = unsigned.sign_single(&signer()).unwrap();

        assert_eq!(unsigned.signature_count(), 0);
        assert_eq!(signed.signature_count(), 1);
    }

    #[test]
    fn test_incremental_and_batch_signing_agree() {
        let a = signer();
        let b = signer();

        let unsigned = TransactionSources::from_bytes(b"payload", &[]).unwrap();

        let incremental =
            unsigned.sign_with(&[a.clone()]).unwrap().sign_with(&[b.clone()]).unwrap();
        let batch = TransactionSources::from_bytes(b"payload", &[a, b]).unwrap();

        assert_eq!(incremental.to_bytes(), batch.to_bytes());
    }

    #[test]
    fn test_signing_order_does_not_change_the_wire_bytes() {
        let a = signer();
        let b = signer();

        let unsigned = TransactionSources::from_bytes(b"payload", &[]).unwrap();

        let ab = unsigned.sign_with(&[a.clone(), b.clone()]).unwrap();
        let ba = unsigned.sign_with(&[b, a]).unwrap();

        assert_eq!(ab.to_bytes(), ba.to_bytes());
    }

    #[test]
    fn test_resigning_replaces_instead_of_duplicating() {
        let a = signer();

        let sources = TransactionSources::from_bytes(b"payload", &[]).unwrap();

        let twice = sources.sign_single(&a).unwrap().sign_single(&a).unwrap();

        assert_eq!(twice.signature_count(), 1);
    }

    #[test]
    fn test_verify_succeeds_for_a_signer_and_fails_for_others() {
        let a = signer();
        let stranger = signer();

        let sources = TransactionSources::from_bytes(b"payload", &[a.clone()]).unwrap();

        sources.verify(&a.public_key()).unwrap();

        let result = sources.verify(&stranger.public_key());
        assert!(matches!(result, Err(Error::SignatureVerify(_))));
    }

    #[test]
    fn test_failing_signer_preserves_partial_progress() {
        let good = signer();

        let bad_key = PrivateKey::generate_ed25519().public_key();
        let bad = Signer::arbitrary(bad_key, |_| Err("token unplugged".into()));

        let unsigned = TransactionSources::from_bytes(b"payload", &[]).unwrap();

        match unsigned.sign_with(&[good.clone(), bad]) {
            Err(Error::Signer { public_key, index, partial, .. }) => {
                assert_eq!(*public_key, bad_key);
                assert_eq!(index, 1);
                assert_eq!(partial.signature_count(), 1);
                partial.verify(&good.public_key()).unwrap();
            }
            other => panic!("expected a signer failure, got {other:?}"),
        }

        // the value that was signed against is unaffected.
        assert_eq!(unsigned.signature_count(), 0);
    }

    #[test]
    fn test_wire_round_trip() {
        let a = signer();
        let b = Signer::private_key(PrivateKey::generate_ecdsa());

        let sources = TransactionSources::from_bytes(b"payload", &[a, b]).unwrap();

        let restored = TransactionSources::from_signed_bytes(&sources.to_bytes()).unwrap();

        assert_eq!(restored.payload(), sources.payload());
        assert_eq!(restored.to_bytes(), sources.to_bytes());
    }

    #[test]
    fn test_truncated_wire_bytes_are_rejected() {
        let sources = TransactionSources::from_bytes(b"payload", &[signer()]).unwrap();

        let bytes = sources.to_bytes();

        for len in [0, 1, 4, bytes.len() - 1] {
            let result = TransactionSources::from_signed_bytes(&bytes[..len]);
            assert!(result.is_err(), "truncation to {len} bytes must fail");
        }
    }

    #[test]
    fn test_merge_unions_signature_sets() {
        let a = signer();
        let b = signer();

        let unsigned = TransactionSources::from_bytes(b"payload", &[]).unwrap();

        let left = unsigned.sign_single(&a).unwrap();
        let right = unsigned.sign_single(&b).unwrap();

        let merged = left.merge(&right).unwrap();

        assert_eq!(merged.signature_count(), 2);
        merged.verify(&a.public_key()).unwrap();
        merged.verify(&b.public_key()).unwrap();
    }

    #[test]
    fn test_merge_rejects_different_payloads() {
        let left = TransactionSources::from_bytes(b"payload one", &[]).unwrap();
        let right = TransactionSources::from_bytes(b"payload two", &[]).unwrap();

        assert!(matches!(left.merge(&right), Err(Error::RequestParse(_))));
    }

    #[test]
    fn test_payload_is_shared_not_copied() {
        let unsigned = TransactionSources::from_bytes(&[0xab; 4096], &[]).unwrap();

        let signed = unsigned.sign_single(&signer()).unwrap();

        assert!(std::sync::Arc::ptr_eq(&unsigned.payload, &signed.payload));
    }
}
