use crate::kyber::{Kyber1024, Kyber512, Kyber768};
use qcrypt_api::{Kem, Serialize, SerializeSecret};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

#[test]
fn kyber512_keygen_sizes() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let (pk, sk) = Kyber512::keypair(&mut rng).unwrap();
    assert_eq!(pk.as_ref().len(), 800);
    assert_eq!(sk.as_ref().len(), 1632);
}

#[test]
fn kyber768_keygen_sizes() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let (pk, sk) = Kyber768::keypair(&mut rng).unwrap();
    assert_eq!(pk.as_ref().len(), 1184);
    assert_eq!(sk.as_ref().len(), 2400);
}

#[test]
fn kyber1024_keygen_sizes() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let (pk, sk) = Kyber1024::keypair(&mut rng).unwrap();
    assert_eq!(pk.as_ref().len(), 1568);
    assert_eq!(sk.as_ref().len(), 3168);
}

#[test]
fn kyber512_encaps_decaps() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let (pk, sk) = Kyber512::keypair(&mut rng).unwrap();

    let (ct, ss1) = Kyber512::encapsulate(&mut rng, &pk).unwrap();
    assert_eq!(ct.as_ref().len(), 768);
    assert_eq!(ss1.as_ref().len(), 32);

    let ss2 = Kyber512::decapsulate(&sk, &ct).unwrap();
    assert_eq!(ss1.as_ref(), ss2.as_ref());
}

#[test]
fn kyber768_encaps_decaps() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let (pk, sk) = Kyber768::keypair(&mut rng).unwrap();

    let (ct, ss1) = Kyber768::encapsulate(&mut rng, &pk).unwrap();
    assert_eq!(ct.as_ref().len(), 1088);

    let ss2 = Kyber768::decapsulate(&sk, &ct).unwrap();
    assert_eq!(ss1.as_ref(), ss2.as_ref());
}

#[test]
fn kyber1024_encaps_decaps() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let (pk, sk) = Kyber1024::keypair(&mut rng).unwrap();

    let (ct, ss1) = Kyber1024::encapsulate(&mut rng, &pk).unwrap();
    assert_eq!(ct.as_ref().len(), 1568);

    let ss2 = Kyber1024::decapsulate(&sk, &ct).unwrap();
    assert_eq!(ss1.as_ref(), ss2.as_ref());
}

#[test]
fn tampered_ciphertext_still_decapsulates() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let (pk, sk) = Kyber512::keypair(&mut rng).unwrap();
    let (mut ct, ss_honest) = Kyber512::encapsulate(&mut rng, &pk).unwrap();

    ct.as_mut()[0] ^= 0xFF;

    // Decapsulation must succeed (implicit rejection)...
    let ss_bogus = Kyber512::decapsulate(&sk, &ct).unwrap();
    // ...and hand back a secret unrelated to the honest one
    assert_ne!(ss_honest.as_ref(), ss_bogus.as_ref());
}

#[test]
fn wrong_key_sizes_are_rejected() {
    let mut rng = ChaChaRng::seed_from_u64(42);

    let bad_pk = crate::kyber::KyberPublicKey::new(vec![0u8; 100]);
    let bad_sk = crate::kyber::KyberSecretKey::new(vec![0u8; 100]);
    let bad_ct = crate::kyber::KyberCiphertext::new(vec![0u8; 100]);

    let result = Kyber512::encapsulate(&mut rng, &bad_pk);
    assert!(result.is_err());

    let (pk, sk) = Kyber512::keypair(&mut rng).unwrap();
    let (ct, _) = Kyber512::encapsulate(&mut rng, &pk).unwrap();

    assert!(Kyber512::decapsulate(&bad_sk, &ct).is_err());
    assert!(Kyber512::decapsulate(&sk, &bad_ct).is_err());
}

#[test]
fn cross_parameter_keys_are_rejected() {
    let mut rng = ChaChaRng::seed_from_u64(42);

    // A 768-level keypair fed into the 512- and 1024-level paths must be
    // caught by the length validation, never silently coerced.
    let (pk_768, sk_768) = Kyber768::keypair(&mut rng).unwrap();
    let (ct_768, _) = Kyber768::encapsulate(&mut rng, &pk_768).unwrap();

    assert!(Kyber512::encapsulate(&mut rng, &pk_768).is_err());
    assert!(Kyber512::decapsulate(&sk_768, &ct_768).is_err());
    assert!(Kyber1024::decapsulate(&sk_768, &ct_768).is_err());
}

#[test]
fn serialization_round_trips() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let (pk, sk) = Kyber768::keypair(&mut rng).unwrap();
    let (ct, ss) = Kyber768::encapsulate(&mut rng, &pk).unwrap();

    let pk2 = crate::kyber::KyberPublicKey::from_bytes(&pk.to_bytes()).unwrap();
    assert_eq!(pk2.as_ref(), pk.as_ref());

    let sk2 = crate::kyber::KyberSecretKey::from_bytes(&sk.to_bytes_zeroizing()).unwrap();
    assert_eq!(sk2.as_ref(), sk.as_ref());

    let ct2 = crate::kyber::KyberCiphertext::from_bytes(&ct.to_bytes()).unwrap();

    // The deserialized artifacts still agree on the shared secret
    let ss2 = Kyber768::decapsulate(&sk2, &ct2).unwrap();
    assert_eq!(ss.as_ref(), ss2.as_ref());
}

#[test]
fn distinct_encapsulations_yield_distinct_secrets() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let (pk, _) = Kyber512::keypair(&mut rng).unwrap();

    let (ct1, ss1) = Kyber512::encapsulate(&mut rng, &pk).unwrap();
    let (ct2, ss2) = Kyber512::encapsulate(&mut rng, &pk).unwrap();

    assert_ne!(ct1.as_ref(), ct2.as_ref());
    assert_ne!(ss1.as_ref(), ss2.as_ref());
}

#[test]
fn key_level_introspection() {
    use crate::kyber::SecurityLevel;

    let mut rng = ChaChaRng::seed_from_u64(42);
    let (pk, sk) = Kyber1024::keypair(&mut rng).unwrap();
    assert_eq!(pk.level(), Some(SecurityLevel::Level1024));
    assert_eq!(sk.level(), Some(SecurityLevel::Level1024));
    assert_eq!(SecurityLevel::Level1024.rank(), 4);
}
