//! End-to-end multi-signer scenarios over the public API.

use proptest::prelude::*;
use quill_core::{Error, Mnemonic, PrivateKey, Signer, TransactionSources};

#[test]
fn two_party_signing_produces_identical_wire_bytes_either_way() {
    let a = Signer::private_key(PrivateKey::generate_ed25519());
    let b = Signer::private_key(PrivateKey::generate_ecdsa());

    let payload = b"transfer 10 units from 0.0.1001 to 0.0.1002";

    let stepwise = TransactionSources::from_bytes(payload, &[])
        .unwrap()
        .sign_with(&[a.clone()])
        .unwrap()
        .sign_with(&[b.clone()])
        .unwrap();

    let together = TransactionSources::from_bytes(payload, &[a, b]).unwrap();

    assert_eq!(stepwise.to_bytes(), together.to_bytes());
}

#[test]
fn independent_holders_do_not_observe_each_other() {
    let payload = b"shared transaction";
    let shared = TransactionSources::from_bytes(payload, &[]).unwrap();

    let alice = Signer::private_key(PrivateKey::generate_ed25519());
    let bob = Signer::private_key(PrivateKey::generate_ed25519());

    let alice_view = shared.sign_single(&alice).unwrap();
    let bob_view = shared.sign_single(&bob).unwrap();

    // each holder only sees their own signature until they merge.
    assert_eq!(alice_view.signature_count(), 1);
    assert_eq!(bob_view.signature_count(), 1);
    assert_eq!(shared.signature_count(), 0);

    let combined = alice_view.merge(&bob_view).unwrap();
    assert_eq!(combined.signature_count(), 2);
    combined.verify(&alice.public_key()).unwrap();
    combined.verify(&bob.public_key()).unwrap();
}

#[test]
fn external_signer_participates_like_a_local_one() {
    // simulates a hardware-backed signer: the key never leaves the closure.
    let held_key = PrivateKey::generate_ed25519();
    let public_key = held_key.public_key();

    let external = Signer::arbitrary(public_key, move |message| Ok(held_key.sign(message)));
    let local = Signer::private_key(PrivateKey::generate_ecdsa());

    let sources = TransactionSources::from_bytes(b"payload", &[external, local]).unwrap();

    assert_eq!(sources.signature_count(), 2);
    sources.verify(&public_key).unwrap();
}

#[test]
fn mnemonic_recovered_key_signs_deterministically() {
    let mnemonic = Mnemonic::generate_24();

    let first = mnemonic.to_private_key("").unwrap();
    let second = mnemonic.to_private_key("").unwrap();

    let payload = b"payload";
    let a = TransactionSources::from_bytes(payload, &[Signer::private_key(first)]).unwrap();
    let b = TransactionSources::from_bytes(payload, &[Signer::private_key(second)]).unwrap();

    assert_eq!(a.to_bytes(), b.to_bytes());
}

#[test]
fn signer_failure_reports_the_culprit_and_keeps_progress() {
    let good = Signer::private_key(PrivateKey::generate_ed25519());
    let flaky_key = PrivateKey::generate_ecdsa().public_key();
    let flaky = Signer::arbitrary(flaky_key, |_| Err("remote signer timed out".into()));

    let result = TransactionSources::from_bytes(b"payload", &[good.clone(), flaky]);

    match result {
        Err(Error::Signer { public_key, index, partial, .. }) => {
            assert_eq!(*public_key, flaky_key);
            assert_eq!(index, 1);
            partial.verify(&good.public_key()).unwrap();
        }
        other => panic!("expected Error::Signer, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn prop_private_key_raw_round_trip(seed in proptest::array::uniform32(any::<u8>())) {
        let key = PrivateKey::from_bytes_ed25519(&seed).unwrap();
        let restored = PrivateKey::from_bytes_ed25519(&key.to_bytes_raw()).unwrap();

        prop_assert_eq!(key.to_bytes_raw(), restored.to_bytes_raw());
        prop_assert_eq!(key.public_key(), restored.public_key());
    }

    #[test]
    fn prop_der_round_trip(seed in proptest::array::uniform32(any::<u8>())) {
        let key = PrivateKey::from_bytes_ed25519(&seed).unwrap();
        let restored = PrivateKey::from_bytes_der(&key.to_bytes_der()).unwrap();

        prop_assert_eq!(key.to_bytes_raw(), restored.to_bytes_raw());
    }

    #[test]
    fn prop_sign_verify_round_trip(
        seed in proptest::array::uniform32(any::<u8>()),
        message in proptest::collection::vec(any::<u8>(), 0..512),
    ) {
        let key = PrivateKey::from_bytes_ed25519(&seed).unwrap();

        let signature = key.sign(&message);
        prop_assert!(key.public_key().verify(&message, &signature).is_ok());
    }

    #[test]
    fn prop_sources_wire_round_trip(
        payload in proptest::collection::vec(any::<u8>(), 1..256),
        seeds in proptest::collection::vec(proptest::array::uniform32(any::<u8>()), 0..4),
    ) {
        let signers: Vec<_> = seeds
            .iter()
            .map(|seed| Signer::private_key(PrivateKey::from_bytes_ed25519(seed).unwrap()))
            .collect();

        let sources = TransactionSources::from_bytes(&payload, &signers).unwrap();
        let restored = TransactionSources::from_signed_bytes(&sources.to_bytes()).unwrap();

        prop_assert_eq!(restored.to_bytes(), sources.to_bytes());
        prop_assert_eq!(restored.payload(), sources.payload());
    }
}
