//! Integration tests: blind → sign → unblind → verify across parameter sets.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rlwe_blind::lattice::{RingElement, ALL_LEVELS};
use rlwe_blind::{BlindSignature, Error, SecurityLevel};

fn setup(level: SecurityLevel, seed: u64) -> (BlindSignature, ChaCha20Rng) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut scheme = BlindSignature::from_level(level).unwrap();
    scheme.generate_keys(&mut rng).unwrap();
    (scheme, rng)
}

fn sign(scheme: &BlindSignature, rng: &mut ChaCha20Rng, message: &[u8]) -> RingElement {
    let blinded = scheme.compute_blinded_message(rng, message).unwrap();
    let blind_sig = scheme.blind_sign(rng, &blinded.blinded).unwrap();
    scheme
        .compute_signature(&blind_sig, &blinded.factor, &scheme.public_key().b)
        .unwrap()
}

#[test]
fn test_protocol_all_levels() {
    for level in ALL_LEVELS {
        let (scheme, mut rng) = setup(level, 42);
        let message = b"Hello, Blind Signature!";
        let signature = sign(&scheme, &mut rng, message);

        assert!(
            scheme.verify(message, &signature).unwrap(),
            "valid signature rejected at {level}"
        );
    }
}

#[test]
fn test_wrong_message_rejected() {
    for level in [SecurityLevel::TestSmall, SecurityLevel::Kyber512, SecurityLevel::Moderate] {
        let (scheme, mut rng) = setup(level, 7);
        let signature = sign(&scheme, &mut rng, b"secret: 0xDEADBEEF");

        assert!(scheme.verify(b"secret: 0xDEADBEEF", &signature).unwrap());
        assert!(
            !scheme.verify(b"secret: 0xDEADBEEE", &signature).unwrap(),
            "forged message accepted at {level}"
        );
    }
}

#[test]
fn test_many_messages() {
    let (scheme, mut rng) = setup(SecurityLevel::TestSmall, 1);
    for i in 0..50u32 {
        let message = format!("message #{i}");
        let signature = sign(&scheme, &mut rng, message.as_bytes());
        assert!(scheme.verify(message.as_bytes(), &signature).unwrap(), "{message}");
    }
}

#[test]
fn test_empty_and_long_messages() {
    let (scheme, mut rng) = setup(SecurityLevel::Moderate, 3);

    let signature = sign(&scheme, &mut rng, b"");
    assert!(scheme.verify(b"", &signature).unwrap());

    let long = vec![0xA5u8; 10_000];
    let signature = sign(&scheme, &mut rng, &long);
    assert!(scheme.verify(&long, &signature).unwrap());
}

#[test]
fn test_signature_from_other_key_rejected() {
    let (alice, mut rng) = setup(SecurityLevel::TestSmall, 11);
    let (bob, _) = setup(SecurityLevel::TestSmall, 12);

    let signature = sign(&alice, &mut rng, b"ballot");
    assert!(alice.verify(b"ballot", &signature).unwrap());
    assert!(!bob.verify(b"ballot", &signature).unwrap());
}

#[test]
fn test_regenerated_keys_invalidate_old_signatures() {
    let (mut scheme, mut rng) = setup(SecurityLevel::TestSmall, 5);
    let signature = sign(&scheme, &mut rng, b"ticket");
    assert!(scheme.verify(b"ticket", &signature).unwrap());

    scheme.generate_keys(&mut rng).unwrap();
    assert!(!scheme.verify(b"ticket", &signature).unwrap());
}

#[test]
fn test_custom_parameters() {
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    let mut scheme = BlindSignature::new(64, 7681, 0.0).unwrap();
    scheme.generate_keys(&mut rng).unwrap();

    let signature = sign(&scheme, &mut rng, b"custom ring");
    assert!(scheme.verify(b"custom ring", &signature).unwrap());
    assert_eq!(scheme.parameters().name, "Custom");
}

#[test]
fn test_signature_ring_must_match() {
    let (scheme, _) = setup(SecurityLevel::TestTiny, 0);
    let other = RingElement::zero(32, 7681).unwrap();
    assert!(matches!(
        scheme.verify(b"m", &other),
        Err(Error::IncompatibleRings { .. })
    ));
}

#[test]
fn test_signature_byte_encoding_roundtrip() {
    let (scheme, mut rng) = setup(SecurityLevel::TestSmall, 21);
    let signature = sign(&scheme, &mut rng, b"persist me");

    let restored = RingElement::from_bytes(&signature.to_bytes()).unwrap();
    assert!(scheme.verify(b"persist me", &restored).unwrap());
}
