//! Error taxonomy for the signing core
//!
//! Every fallible operation in this crate returns [`Result`] and reports a
//! specific [`Error`] kind at the point of failure. Nothing in the core
//! retries, and no failure is ever downgraded to a default value — a key
//! that fails to parse stays a parse error, it never becomes a fresh key.
//!
//! The pass-through kinds ([`Error::GrpcStatus`], [`Error::PreCheckStatus`],
//! [`Error::MaxPaymentExceeded`], [`Error::BadEntityId`]) are owned by the
//! network-execution layer; they are represented here so the boundary
//! crate's last-error channel can carry their detail payloads.

use std::error::Error as StdError;
use std::result::Result as StdResult;

use crate::{PublicKey, TransactionSources};

/// `Result<T, Error>`
pub type Result<T> = StdResult<T, Error>;

pub(crate) type BoxStdError = Box<dyn StdError + Send + Sync + 'static>;

/// Any possible error from a fallible function in this crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Failed to parse a [`PrivateKey`](crate::PrivateKey) or [`PublicKey`].
    #[error("failed to parse a key: {0}")]
    KeyParse(#[source] BoxStdError),

    /// Failed to derive a child [`PrivateKey`](crate::PrivateKey).
    ///
    /// Raised when deriving from an ECDSA key (hierarchical derivation is
    /// not defined for the supported secp256k1 usage) or from an Ed25519
    /// key without a chain code.
    #[error("failed to derive a key: {0}")]
    KeyDerive(#[source] BoxStdError),

    /// A signature failed verification.
    ///
    /// This is an ordinary failure for well-formed but wrong signatures,
    /// not a fatal condition.
    #[error("failed to verify a signature: {0}")]
    SignatureVerify(#[source] BoxStdError),

    /// Failed to parse a [`Mnemonic`](crate::Mnemonic).
    #[error("failed to parse a mnemonic: {0}")]
    MnemonicParse(#[from] MnemonicParseError),

    /// Failed to convert a [`Mnemonic`](crate::Mnemonic) to a private key.
    #[error("failed to convert a mnemonic to entropy: {0}")]
    MnemonicEntropy(#[from] MnemonicEntropyError),

    /// An external signer failed to produce a signature.
    ///
    /// Signatures collected before the failing signer are preserved in
    /// `partial`; callers that want the partial progress can adopt it.
    #[error("signer {index} for key {public_key} failed: {source}")]
    Signer {
        /// Public key paired with the failing signer.
        public_key: Box<PublicKey>,
        /// Position of the failing signer in the batch.
        index: usize,
        /// Sources with every signature collected before the failure.
        partial: Box<TransactionSources>,
        /// The signer's own error.
        #[source]
        source: BoxStdError,
    },

    /// Failed to parse a request crossing the boundary.
    #[error("failed to parse a request: {0}")]
    RequestParse(#[source] BoxStdError),

    /// An entity identifier carried a checksum that does not match the
    /// configured ledger.
    ///
    /// Constructed by the network-execution layer; carried here so the
    /// boundary can report both checksums.
    #[error(
        "entity id {shard}.{realm}.{num} has checksum {}, expected {}",
        String::from_utf8_lossy(present_checksum),
        String::from_utf8_lossy(expected_checksum)
    )]
    BadEntityId {
        /// Shard of the offending identifier.
        shard: u64,
        /// Realm of the offending identifier.
        realm: u64,
        /// Entity number of the offending identifier.
        num: u64,
        /// The checksum that was present in the string form.
        present_checksum: [u8; 5],
        /// The checksum that was expected for the configured ledger.
        expected_checksum: [u8; 5],
    },

    /// The transport returned a non-ok status (pass-through).
    #[error("transport failure with status code {0}")]
    GrpcStatus(i32),

    /// A node rejected the request during precheck (pass-through).
    #[error("request failed precheck with status {status}")]
    PreCheckStatus {
        /// The precheck status code reported by the node.
        status: i32,
        /// Transaction the status applies to, when one was assigned.
        transaction_id: Option<String>,
    },

    /// The cost of a query exceeded the configured payment limit
    /// (pass-through).
    #[error("query cost of {actual} exceeds maximum allowed payment of {max}")]
    MaxPaymentExceeded {
        /// The maximum the caller allowed.
        max: i64,
        /// The actual cost reported by the network.
        actual: i64,
    },
}

impl Error {
    pub(crate) fn key_parse<E: Into<BoxStdError>>(error: E) -> Self {
        Self::KeyParse(error.into())
    }

    pub(crate) fn key_derive<E: Into<BoxStdError>>(error: E) -> Self {
        Self::KeyDerive(error.into())
    }

    pub(crate) fn signature_verify<E: Into<BoxStdError>>(error: E) -> Self {
        Self::SignatureVerify(error.into())
    }

    pub(crate) fn request_parse<E: Into<BoxStdError>>(error: E) -> Self {
        Self::RequestParse(error.into())
    }
}

/// Reason a mnemonic phrase failed to parse.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MnemonicParseError {
    /// The phrase has an unexpected word count.
    #[error("bad length: expected `12`, `22` or `24` words, found `{0}`")]
    BadLength(usize),

    /// One or more words are not in the word list. Carries the positions
    /// of every unknown word.
    #[error("unknown words at indices {0:?}")]
    UnknownWords(Vec<usize>),

    /// The checksum embedded in the final word(s) does not match the one
    /// recomputed over the word indices.
    #[error("checksum mismatch: expected `{expected:02x}`, found `{actual:02x}`")]
    ChecksumMismatch {
        /// The checksum recomputed from the entropy.
        expected: u8,
        /// The checksum actually embedded in the phrase.
        actual: u8,
    },
}

/// Reason a mnemonic could not be converted to key entropy.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MnemonicEntropyError {
    /// The phrase has the wrong word count for the requested recovery
    /// scheme.
    #[error("bad length: expected `{expected}` words, found `{actual}` words")]
    BadLength {
        /// The count the scheme requires.
        expected: usize,
        /// The count the phrase actually has.
        actual: usize,
    },

    /// The recomputed checksum does not match the embedded one.
    #[error("checksum mismatch: expected `{expected:02x}`, found `{actual:02x}`")]
    ChecksumMismatch {
        /// The checksum recomputed from the entropy.
        expected: u8,
        /// The checksum actually embedded in the phrase.
        actual: u8,
    },

    /// A passphrase was supplied for a legacy phrase; the legacy scheme
    /// has no passphrase input.
    #[error("used a passphrase with a legacy mnemonic")]
    LegacyWithPassphrase,
}
