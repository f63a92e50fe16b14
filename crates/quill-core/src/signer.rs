//! Signing capabilities
//!
//! A [`Signer`] pairs a public key with an opaque signing operation. The
//! two shapes are interchangeable everywhere the core asks for a signer:
//!
//! - a wrapper around a locally held [`PrivateKey`], which can never fail
//!   to sign, and
//! - an arbitrary capability backed by caller-supplied logic — a remote
//!   service, a hardware token — which may fail and reports that failure
//!   to the signing operation that invoked it.
//!
//! Signers are `Send + Sync` so signing may happen from any execution
//! context. A single external signer must not be invoked concurrently
//! with itself unless its backing logic documents reentrancy; the core
//! leaves that contract to the signer. Resources captured by an external
//! signer are released when the last clone of the signer is dropped,
//! on every exit path of the operation holding it.

use std::fmt;
use std::sync::Arc;

use crate::error::BoxStdError;
use crate::{PrivateKey, PublicKey};

type SignFn = dyn Fn(&[u8]) -> Result<Vec<u8>, BoxStdError> + Send + Sync;

/// A capability that can sign arbitrary bytes on behalf of one public key.
#[derive(Clone)]
pub struct Signer(SignerData);

#[derive(Clone)]
enum SignerData {
    PrivateKey(PrivateKey),
    Arbitrary {
        public_key: Box<PublicKey>,
        sign_fn: Arc<SignFn>,
    },
}

impl Signer {
    /// A signer backed by a locally held private key.
    #[must_use]
    pub fn private_key(key: PrivateKey) -> Self {
        Self(SignerData::PrivateKey(key))
    }

    /// A signer backed by caller-supplied logic.
    ///
    /// `sign_fn` must produce a signature whose algorithm matches
    /// `public_key`, or later verification of the signed payload fails.
    /// It is invoked exactly once per signing operation.
    pub fn arbitrary<F>(public_key: PublicKey, sign_fn: F) -> Self
    where
        F: Fn(&[u8]) -> Result<Vec<u8>, BoxStdError> + Send + Sync + 'static,
    {
        Self(SignerData::Arbitrary { public_key: Box::new(public_key), sign_fn: Arc::new(sign_fn) })
    }

    /// The public key this signer signs for, without signing anything.
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        match &self.0 {
            SignerData::PrivateKey(key) => key.public_key(),
            SignerData::Arbitrary { public_key, .. } => **public_key,
        }
    }

    /// Produce exactly one signature over `message`.
    pub(crate) fn sign(&self, message: &[u8]) -> Result<(PublicKey, Vec<u8>), BoxStdError> {
        match &self.0 {
            SignerData::PrivateKey(key) => Ok((key.public_key(), key.sign(message))),
            SignerData::Arbitrary { public_key, sign_fn } => {
                let signature = sign_fn(message)?;

                Ok((**public_key, signature))
            }
        }
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            SignerData::PrivateKey(_) => f.debug_tuple("PrivateKey").field(&"[redacted]").finish(),
            SignerData::Arbitrary { public_key, .. } => {
                f.debug_tuple("Arbitrary").field(public_key).field(&"Fn").finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Signer;
    use crate::PrivateKey;

    #[test]
    fn test_private_key_signer_signs_and_verifies() {
        let key = PrivateKey::generate_ed25519();
        let signer = Signer::private_key(key.clone());

        let (public_key, signature) = signer.sign(b"message").unwrap();

        assert_eq!(public_key, key.public_key());
        public_key.verify(b"message", &signature).unwrap();
    }

    #[test]
    fn test_arbitrary_signer_delegates() {
        let key = PrivateKey::generate_ecdsa();
        let signing_key = key.clone();

        let signer = Signer::arbitrary(key.public_key(), move |message| {
            Ok(signing_key.sign(message))
        });

        let (public_key, signature) = signer.sign(b"message").unwrap();

        assert_eq!(public_key, key.public_key());
        public_key.verify(b"message", &signature).unwrap();
    }

    #[test]
    fn test_arbitrary_signer_reports_failure() {
        let key = PrivateKey::generate_ed25519();

        let signer = Signer::arbitrary(key.public_key(), |_| Err("token unplugged".into()));

        assert!(signer.sign(b"message").is_err());
    }

    #[test]
    fn test_release_runs_when_last_clone_drops() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        struct Guard(Arc<AtomicBool>);

        impl Drop for Guard {
            fn drop(&mut self) {
                self.0.store(true, Ordering::SeqCst);
            }
        }

        let released = Arc::new(AtomicBool::new(false));
        let guard = Guard(released.clone());

        let key = PrivateKey::generate_ed25519();
        let signer = Signer::arbitrary(key.public_key(), move |_| {
            let _ = &guard;
            Err("unused".into())
        });

        let second = signer.clone();
        drop(signer);
        assert!(!released.load(Ordering::SeqCst));

        drop(second);
        assert!(released.load(Ordering::SeqCst));
    }
}
