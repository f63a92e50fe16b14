//! Mnemonic phrase recovery
//!
//! Two phrase schemes share this type:
//!
//! - The standard scheme: 12 or 24 words from the BIP-39 English list,
//!   with the usual SHA-256 checksum bits folded into the final word.
//! - The legacy scheme: 22 words from a fixed 4096-word dictionary
//!   bundled with the crate. Words carry 12-bit indices packed into 33
//!   bytes; the last byte is a CRC-8 checksum and the leading 32 bytes
//!   are XOR-masked with it. Retained for backward recovery only — new
//!   phrases are always generated under the standard scheme.
//!
//! A phrase is tagged legacy or standard at parse time and the tag never
//! changes afterwards. Phrases that fail their checksum are never
//! constructed.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::crypto::{self, Pbkdf2Variant};
use crate::error::{MnemonicEntropyError, MnemonicParseError};
use crate::{Error, PrivateKey};

/// Rounds of PBKDF2-HMAC-SHA-512 used to stretch a phrase into a seed.
const SEED_ROUNDS: u32 = 2048;

/// Word count of a legacy phrase.
const LEGACY_WORD_COUNT: usize = 22;

static BIP39_WORD_LIST: Lazy<&'static [&'static str]> = Lazy::new(|| {
    let list = bip39::Language::English.words_by_prefix("");
    // the list is sorted, which makes word lookup a binary search.
    assert!(list.windows(2).all(|pair| pair[0] < pair[1]));
    list
});

static LEGACY_WORD_LIST: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let list: Vec<_> = include_str!("legacy-words.txt").split_whitespace().collect();
    assert_eq!(list.len(), 4096);
    assert!(list.windows(2).all(|pair| pair[0] < pair[1]));
    list
});

/// A mnemonic phrase that can recover a private key.
pub struct Mnemonic(MnemonicData);

enum MnemonicData {
    Legacy(Box<[&'static str; LEGACY_WORD_COUNT]>),
    Standard(Vec<&'static str>),
}

impl Mnemonic {
    /// The phrase's words, in order.
    #[must_use]
    pub fn words(&self) -> &[&'static str] {
        match &self.0 {
            MnemonicData::Legacy(words) => &words[..],
            MnemonicData::Standard(words) => words,
        }
    }

    /// Returns `true` if this phrase was parsed under the legacy scheme.
    ///
    /// Fixed at parse time; a phrase never changes schemes.
    #[must_use]
    pub fn is_legacy(&self) -> bool {
        matches!(&self.0, MnemonicData::Legacy(_))
    }

    /// Generate a new 12-word phrase from 128 bits of entropy.
    #[must_use]
    pub fn generate_12() -> Self {
        let mut entropy = Zeroizing::new([0u8; 16]);
        rand::rngs::OsRng.fill_bytes(entropy.as_mut_slice());

        Self::from_entropy(entropy.as_slice())
    }

    /// Generate a new 24-word phrase from 256 bits of entropy.
    #[must_use]
    pub fn generate_24() -> Self {
        let mut entropy = Zeroizing::new([0u8; 32]);
        rand::rngs::OsRng.fill_bytes(entropy.as_mut_slice());

        Self::from_entropy(entropy.as_slice())
    }

    fn from_entropy(entropy: &[u8]) -> Self {
        assert!(entropy.len() == 16 || entropy.len() == 32);

        let checksum = checksum_byte(entropy);

        let mut bytes = Vec::with_capacity(entropy.len() + 1);
        bytes.extend_from_slice(entropy);
        bytes.push(if entropy.len() == 16 { checksum & 0xf0 } else { checksum });

        let mut words = Vec::with_capacity(bytes.len() * 8 / 11);
        let mut buffer = 0_u32;
        let mut offset: u8 = 0;

        for byte in bytes {
            buffer = (buffer << 8) | u32::from(byte);
            offset += 8;
            if offset >= 11 {
                let index = (buffer >> (offset - 11) & 0x7ff) as usize;
                words.push(BIP39_WORD_LIST[index]);
                offset -= 11;
            }
        }

        Self(MnemonicData::Standard(words))
    }

    /// Parse a phrase from its words.
    ///
    /// 22 words select the legacy scheme, 12 or 24 the standard one; any
    /// other count is [`MnemonicParseError::BadLength`]. Words not in the
    /// scheme's dictionary are reported all at once via
    /// [`MnemonicParseError::UnknownWords`], and an embedded checksum that
    /// does not match the recomputed one is
    /// [`MnemonicParseError::ChecksumMismatch`].
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> crate::Result<Self> {
        if words.len() == LEGACY_WORD_COUNT {
            return Self::from_words_legacy(words);
        }

        if words.len() != 12 && words.len() != 24 {
            return Err(MnemonicParseError::BadLength(words.len()).into());
        }

        let mut indices = Vec::with_capacity(words.len());
        let mut unknown = Vec::new();

        for (position, word) in words.iter().enumerate() {
            match BIP39_WORD_LIST.binary_search(&word.as_ref()) {
                Ok(index) => indices.push(index as u16),
                Err(_) => unknown.push(position),
            }
        }

        if !unknown.is_empty() {
            return Err(MnemonicParseError::UnknownWords(unknown).into());
        }

        let (entropy, actual) = indices_to_entropy_and_checksum(&indices);

        let expected = checksum_byte(&entropy);
        let expected = if indices.len() == 12 { expected & 0xf0 } else { expected };

        if expected != actual {
            return Err(MnemonicParseError::ChecksumMismatch { expected, actual }.into());
        }

        let words = indices.into_iter().map(|index| BIP39_WORD_LIST[index as usize]).collect();

        Ok(Self(MnemonicData::Standard(words)))
    }

    fn from_words_legacy<S: AsRef<str>>(words: &[S]) -> crate::Result<Self> {
        let mut indices = [0_u16; LEGACY_WORD_COUNT];
        let mut resolved = [""; LEGACY_WORD_COUNT];
        let mut unknown = Vec::new();

        for (position, word) in words.iter().enumerate() {
            match LEGACY_WORD_LIST.binary_search(&word.as_ref()) {
                Ok(index) => {
                    indices[position] = index as u16;
                    resolved[position] = LEGACY_WORD_LIST[index];
                }
                Err(_) => unknown.push(position),
            }
        }

        if !unknown.is_empty() {
            return Err(MnemonicParseError::UnknownWords(unknown).into());
        }

        if let Err((expected, actual)) = legacy_entropy(&indices) {
            return Err(MnemonicParseError::ChecksumMismatch { expected, actual }.into());
        }

        Ok(Self(MnemonicData::Legacy(Box::new(resolved))))
    }

    /// Recover a [`PrivateKey`] from this phrase.
    ///
    /// Standard phrases are stretched into a 64-byte seed with
    /// PBKDF2-HMAC-SHA-512 salted by `"mnemonic" + passphrase`, then
    /// expanded into a derivable Ed25519 master key. Legacy phrases
    /// recover their embedded entropy directly and reject any non-empty
    /// passphrase with [`MnemonicEntropyError::LegacyWithPassphrase`].
    ///
    /// Deterministic: the same phrase and passphrase always produce the
    /// same key.
    pub fn to_private_key(&self, passphrase: &str) -> crate::Result<PrivateKey> {
        match &self.0 {
            MnemonicData::Legacy(_) if !passphrase.is_empty() => {
                Err(Error::from(MnemonicEntropyError::LegacyWithPassphrase))
            }

            MnemonicData::Legacy(words) => {
                let entropy = Zeroizing::new(legacy_entropy(&legacy_indices(words)).map_err(
                    |(expected, actual)| {
                        Error::from(MnemonicEntropyError::ChecksumMismatch { expected, actual })
                    },
                )?);

                PrivateKey::from_bytes_ed25519(entropy.as_slice())
            }

            MnemonicData::Standard(_) => {
                Ok(PrivateKey::from_mnemonic_seed(&self.to_seed(passphrase)))
            }
        }
    }

    /// Recover a [`PrivateKey`] under the legacy scheme.
    ///
    /// Standard phrases must have exactly 24 words
    /// ([`MnemonicEntropyError::BadLength`] otherwise); their raw BIP-39
    /// entropy becomes the key after a checksum recheck.
    pub fn to_legacy_private_key(&self) -> crate::Result<PrivateKey> {
        let entropy = match &self.0 {
            MnemonicData::Legacy(words) => {
                let entropy = legacy_entropy(&legacy_indices(words)).map_err(
                    |(expected, actual)| {
                        Error::from(MnemonicEntropyError::ChecksumMismatch { expected, actual })
                    },
                )?;

                Zeroizing::new(entropy.to_vec())
            }

            MnemonicData::Standard(words) => {
                if words.len() != 24 {
                    return Err(Error::from(MnemonicEntropyError::BadLength {
                        expected: 24,
                        actual: words.len(),
                    }));
                }

                let indices = standard_indices(words);
                let (entropy, actual) = indices_to_entropy_and_checksum(&indices);

                let expected = checksum_byte(&entropy);
                if expected != actual {
                    return Err(Error::from(MnemonicEntropyError::ChecksumMismatch {
                        expected,
                        actual,
                    }));
                }

                Zeroizing::new(entropy)
            }
        };

        PrivateKey::from_bytes(&entropy)
    }

    /// Stretch this phrase into a 64-byte seed.
    fn to_seed(&self, passphrase: &str) -> Zeroizing<Vec<u8>> {
        let mut salt = String::from("mnemonic");
        salt.push_str(passphrase);

        Zeroizing::new(crypto::pbkdf2(
            Pbkdf2Variant::HmacSha512,
            self.to_string().as_bytes(),
            salt.as_bytes(),
            SEED_ROUNDS,
            64,
        ))
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("words", &self.words())
            .field("is_legacy", &self.is_legacy())
            .finish()
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((first, rest)) = self.words().split_first() {
            f.write_str(first)?;

            for word in rest {
                write!(f, " {word}")?;
            }
        }

        Ok(())
    }
}

impl FromStr for Mnemonic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_words(&s.split_whitespace().collect::<Vec<_>>())
    }
}

/// The BIP-39 checksum byte: the first byte of SHA-256 over the entropy.
fn checksum_byte(entropy: &[u8]) -> u8 {
    crypto::sha256(entropy)[0]
}

/// Unpack 11-bit word indices into entropy bytes plus the embedded
/// checksum byte (high nibble only for 12-word phrases).
fn indices_to_entropy_and_checksum(indices: &[u16]) -> (Vec<u8>, u8) {
    debug_assert!(matches!(indices.len(), 12 | 24));

    let mut output = Vec::with_capacity(if indices.len() == 12 { 17 } else { 33 });
    let mut buffer = 0_u32;
    let mut offset: u8 = 0;

    for &index in indices {
        debug_assert!(index <= 0x7ff);

        buffer = (buffer << 11) | u32::from(index);
        offset += 11;
        while offset >= 8 {
            output.push((buffer >> (offset - 8)) as u8);
            offset -= 8;
        }
    }

    if offset != 0 {
        // leftover checksum bits land in the high end of the final byte.
        output.push((buffer << (8 - offset)) as u8);
    }

    let checksum = output.pop().expect("12 or 24 indices always produce output");
    let checksum = if indices.len() == 12 { checksum & 0xf0 } else { checksum };

    (output, checksum)
}

fn standard_indices(words: &[&'static str]) -> Vec<u16> {
    words
        .iter()
        .map(|word| {
            BIP39_WORD_LIST
                .binary_search(word)
                .expect("constructed phrases only contain list words") as u16
        })
        .collect()
}

fn legacy_indices(words: &[&'static str; LEGACY_WORD_COUNT]) -> [u16; LEGACY_WORD_COUNT] {
    let mut indices = [0_u16; LEGACY_WORD_COUNT];

    for (slot, word) in indices.iter_mut().zip(words.iter()) {
        *slot = LEGACY_WORD_LIST
            .binary_search(word)
            .expect("constructed phrases only contain list words") as u16;
    }

    indices
}

/// Recover the 32-byte legacy entropy, or the `(expected, actual)`
/// checksum pair on mismatch.
fn legacy_entropy(indices: &[u16; LEGACY_WORD_COUNT]) -> Result<[u8; 32], (u8, u8)> {
    let data = legacy_indices_to_bytes(indices);

    let (&stored, masked) = data.split_last().expect("33 bytes");

    let mut entropy = [0_u8; 32];
    for (slot, &byte) in entropy.iter_mut().zip(masked) {
        *slot = byte ^ stored;
    }

    let expected = legacy_crc8(&entropy);
    if stored != expected {
        return Err((expected, stored));
    }

    Ok(entropy)
}

/// Pack 22 twelve-bit indices into 33 bytes, big-endian.
fn legacy_indices_to_bytes(indices: &[u16; LEGACY_WORD_COUNT]) -> [u8; 33] {
    let mut output = [0_u8; 33];
    let mut position = 0;
    let mut buffer = 0_u32;
    let mut offset: u8 = 0;

    for &index in indices {
        debug_assert!(index <= 0xfff);

        buffer = (buffer << 12) | u32::from(index);
        offset += 12;
        while offset >= 8 {
            output[position] = (buffer >> (offset - 8)) as u8;
            position += 1;
            offset -= 8;
        }
    }

    // 22 indices * 12 bits fill the 33 bytes exactly.
    debug_assert_eq!(position, 33);
    debug_assert_eq!(offset, 0);

    output
}

/// CRC-8 over the entropy, as the legacy scheme computes it: all but the
/// final byte participate.
fn legacy_crc8(data: &[u8]) -> u8 {
    let mut crc = 0xff_u8;

    for &byte in &data[..data.len() - 1] {
        crc ^= byte;
        for _ in 0..8 {
            crc = (crc >> 1) ^ if crc & 1 == 0 { 0 } else { 0xb2 };
        }
    }

    crc ^ 0xff
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{
        legacy_crc8, Mnemonic, LEGACY_WORD_COUNT, LEGACY_WORD_LIST,
    };
    use crate::error::{MnemonicEntropyError, MnemonicParseError};
    use crate::Error;

    const KNOWN_GOOD_MNEMONICS: &[&str] = &[
        "inmate flip alley wear offer often piece magnet surge toddler submit right radio absent pear floor belt raven price stove replace reduce plate home",
        "tiny denial casual grass skull spare awkward indoor ethics dash enough flavor good daughter early hard rug staff capable swallow raise flavor empty angle",
        "ramp april job flavor surround pyramid fish sea good know blame gate village viable include mixed term draft among monitor swear swing novel track",
        "evoke rich bicycle fire promote climb zero squeeze little spoil slight damage",
    ];

    /// Build a legacy phrase for `entropy`, storing `crc` as the
    /// checksum byte. Passing the true CRC produces a valid phrase.
    fn legacy_phrase(entropy: &[u8; 32], crc: u8) -> String {
        let mut data = [0_u8; 33];
        for (slot, &byte) in data.iter_mut().zip(entropy.iter()) {
            *slot = byte ^ crc;
        }
        data[32] = crc;

        // unpack 33 bytes into 22 twelve-bit indices.
        let mut words = Vec::with_capacity(LEGACY_WORD_COUNT);
        let mut buffer = 0_u32;
        let mut offset: u8 = 0;
        for &byte in &data {
            buffer = (buffer << 8) | u32::from(byte);
            offset += 8;
            if offset >= 12 {
                let index = ((buffer >> (offset - 12)) & 0xfff) as usize;
                words.push(LEGACY_WORD_LIST[index]);
                offset -= 12;
            }
        }

        words.join(" ")
    }

    #[test]
    fn test_known_good_phrases_parse() {
        for phrase in KNOWN_GOOD_MNEMONICS {
            let mnemonic = Mnemonic::from_str(phrase).unwrap();

            assert!(!mnemonic.is_legacy());
            assert_eq!(mnemonic.to_string(), *phrase);
        }
    }

    #[test]
    fn test_generate_round_trips() {
        let mnemonic = Mnemonic::generate_24();

        let parsed = Mnemonic::from_str(&mnemonic.to_string()).unwrap();

        assert!(!parsed.is_legacy());
        assert_eq!(parsed.words(), mnemonic.words());
    }

    #[test]
    fn test_generate_12_round_trips() {
        let mnemonic = Mnemonic::generate_12();

        let parsed = Mnemonic::from_str(&mnemonic.to_string()).unwrap();

        assert_eq!(parsed.words().len(), 12);
    }

    #[test]
    fn test_bad_lengths_are_rejected() {
        for length in [0, 1, 11, 13, 21, 23, 25, 48] {
            let words = vec!["apple"; length];

            let result = Mnemonic::from_words(&words);

            match result {
                Err(Error::MnemonicParse(MnemonicParseError::BadLength(reported))) => {
                    assert_eq!(reported, length);
                }
                other => panic!("expected BadLength for {length} words, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unknown_words_are_reported_with_positions() {
        // one word at a time
        const PHRASE: &str =
            "obvious favorite remain caution remove laptop base vacant alone fever slush dune";

        for position in 0..12 {
            let mut words: Vec<_> = PHRASE.split_whitespace().collect();
            words[position] = "lorum";

            match Mnemonic::from_words(&words) {
                Err(Error::MnemonicParse(MnemonicParseError::UnknownWords(reported))) => {
                    assert_eq!(reported, vec![position]);
                }
                other => panic!("expected UnknownWords, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_multiple_unknown_words_reported_together() {
        // typos at positions 6, 12 and 17
        const PHRASE: &str = concat!(
            "abandon ability able about above absent ",
            "adsorb abstract absurd abuse access accident ",
            "acount accuse achieve acid acoustic acquired ",
            "across act action actor actress actual"
        );

        match Mnemonic::from_str(PHRASE) {
            Err(Error::MnemonicParse(MnemonicParseError::UnknownWords(reported))) => {
                assert_eq!(reported, vec![6, 12, 17]);
            }
            other => panic!("expected UnknownWords, got {other:?}"),
        }
    }

    #[test]
    fn test_checksum_mismatch_24_words() {
        const PHRASE: &str = concat!(
            "abandon ability able about above absent ",
            "absorb abstract absurd abuse access accident ",
            "account accuse achieve acid acoustic acquire ",
            "across act action actor actress actual"
        );

        match Mnemonic::from_str(PHRASE) {
            Err(Error::MnemonicParse(MnemonicParseError::ChecksumMismatch { expected, actual })) => {
                assert_eq!(expected, 0xba);
                assert_eq!(actual, 0x17);
            }
            other => panic!("expected ChecksumMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_checksum_mismatch_12_words() {
        const PHRASE: &str =
            "abandon ability able about above absent absorb abstract absurd abuse access accident";

        match Mnemonic::from_str(PHRASE) {
            Err(Error::MnemonicParse(MnemonicParseError::ChecksumMismatch { expected, actual })) => {
                assert_eq!(expected, 0x10);
                assert_eq!(actual, 0xb0);
            }
            other => panic!("expected ChecksumMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_to_private_key_known_answer() {
        let mnemonic = Mnemonic::from_str(KNOWN_GOOD_MNEMONICS[0]).unwrap();

        let key = mnemonic.to_private_key("").unwrap();

        assert_eq!(
            key.to_string_raw(),
            "853f15aecd22706b105da1d709b4ac05b4906170c2b9c7495dff9af49e1391da"
        );
        assert!(key.is_derivable());
    }

    #[test]
    fn test_to_private_key_is_deterministic() {
        let mnemonic = Mnemonic::generate_24();

        let a = mnemonic.to_private_key("hunter2").unwrap();
        let b = mnemonic.to_private_key("hunter2").unwrap();

        assert_eq!(a.to_bytes_raw(), b.to_bytes_raw());
    }

    #[test]
    fn test_passphrase_changes_the_key() {
        let mnemonic = Mnemonic::generate_24();

        let without = mnemonic.to_private_key("").unwrap();
        let with = mnemonic.to_private_key("passphrase").unwrap();

        assert_ne!(without.to_bytes_raw(), with.to_bytes_raw());
    }

    #[test]
    fn test_legacy_recovery_from_24_words() {
        const PHRASE: &str = concat!(
            "obvious favorite remain caution ",
            "remove laptop base vacant ",
            "increase video erase pass ",
            "sniff sausage knock grid ",
            "argue salt romance way ",
            "alone fever slush dune"
        );

        let mnemonic = Mnemonic::from_str(PHRASE).unwrap();
        let key = mnemonic.to_legacy_private_key().unwrap();

        assert_eq!(
            key.to_string_raw(),
            "98aa82d6125b5efa04bf8372be7931d05cd77f5ef3330b97d6ee7c006eaaf312"
        );
    }

    #[test]
    fn test_legacy_recovery_requires_24_words() {
        let mnemonic = Mnemonic::from_str(KNOWN_GOOD_MNEMONICS[3]).unwrap();

        match mnemonic.to_legacy_private_key() {
            Err(Error::MnemonicEntropy(MnemonicEntropyError::BadLength { expected, actual })) => {
                assert_eq!(expected, 24);
                assert_eq!(actual, 12);
            }
            other => panic!("expected BadLength, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_phrase_round_trips() {
        let entropy = [0x42_u8; 32];

        let phrase = legacy_phrase(&entropy, legacy_crc8(&entropy));

        let mnemonic = Mnemonic::from_str(&phrase).unwrap();
        assert!(mnemonic.is_legacy());
        assert_eq!(mnemonic.words().len(), LEGACY_WORD_COUNT);

        let key = mnemonic.to_legacy_private_key().unwrap();
        assert_eq!(key.to_bytes_raw(), entropy.to_vec());

        // the empty-passphrase recovery path agrees.
        let key = mnemonic.to_private_key("").unwrap();
        assert_eq!(key.to_bytes_raw(), entropy.to_vec());
    }

    #[test]
    fn test_legacy_phrase_with_bad_checksum_is_rejected() {
        let entropy: [u8; 32] =
            core::array::from_fn(|i| i as u8);

        let crc = legacy_crc8(&entropy);
        let phrase = legacy_phrase(&entropy, crc ^ 1);

        match Mnemonic::from_str(&phrase) {
            Err(Error::MnemonicParse(MnemonicParseError::ChecksumMismatch { expected, actual })) => {
                assert_eq!(expected, crc);
                assert_eq!(actual, crc ^ 1);
            }
            other => panic!("expected ChecksumMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_phrase_with_unknown_word_is_rejected() {
        let entropy = [0x42_u8; 32];
        let phrase = legacy_phrase(&entropy, legacy_crc8(&entropy));

        let mut words: Vec<_> = phrase.split_whitespace().collect();
        words[3] = "notinanylist";

        match Mnemonic::from_words(&words) {
            Err(Error::MnemonicParse(MnemonicParseError::UnknownWords(reported))) => {
                assert_eq!(reported, vec![3]);
            }
            other => panic!("expected UnknownWords, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_phrase_rejects_passphrase() {
        let entropy = [0x42_u8; 32];
        let phrase = legacy_phrase(&entropy, legacy_crc8(&entropy));

        let mnemonic = Mnemonic::from_str(&phrase).unwrap();

        assert!(matches!(
            mnemonic.to_private_key("secret"),
            Err(Error::MnemonicEntropy(MnemonicEntropyError::LegacyWithPassphrase))
        ));
    }

    #[test]
    fn test_entropy_to_words_known_answers() {
        const ENTROPY: &[&str] = &[
            "744b201a7c399733691c2fda5c6f605ceb0c016882cb14f64ea9eb5b6d68298b",
            "e2674c8eb2fcada0c433984da6f52bac56466f914b49bd1a8087ed8b12b15248",
            "b1615de02c5da95e15ee0f646f7c5cb02f41e69c9c71df683c1fc78db9b825c7",
            "4e172857ab9ac2563fee9c829a4b2e9b",
        ];

        for (entropy, phrase) in ENTROPY.iter().zip(KNOWN_GOOD_MNEMONICS) {
            let mnemonic = Mnemonic::from_entropy(&hex::decode(entropy).unwrap());

            assert_eq!(mnemonic.to_string(), *phrase);
        }
    }
}
