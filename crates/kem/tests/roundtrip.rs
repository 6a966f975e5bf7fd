//! Round-trip and agreement properties across all three parameter sets.

use qcrypt_api::{Kem, Serialize};
use qcrypt_kem::kyber::{Kyber1024, Kyber512, Kyber768, KyberCiphertext, KyberPublicKey};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

fn agreement_loop<K: Kem>(iterations: usize, seed: u64)
where
    K::SharedSecret: AsRef<[u8]>,
{
    let mut rng = ChaChaRng::seed_from_u64(seed);
    for i in 0..iterations {
        let keypair = K::keypair(&mut rng).unwrap();
        let pk = K::public_key(&keypair);
        let sk = K::secret_key(&keypair);

        let (ct, ss_sender) = K::encapsulate(&mut rng, &pk).unwrap();
        let ss_receiver = K::decapsulate(&sk, &ct).unwrap();

        assert_eq!(
            ss_sender.as_ref(),
            ss_receiver.as_ref(),
            "{} disagreed on iteration {}",
            K::name(),
            i
        );
    }
}

#[test]
fn agreement_kyber512() {
    agreement_loop::<Kyber512>(25, 0xA11CE);
}

#[test]
fn agreement_kyber768() {
    agreement_loop::<Kyber768>(25, 0xB0B);
}

#[test]
fn agreement_kyber1024() {
    agreement_loop::<Kyber1024>(25, 0xCAFE);
}

// The full-depth soak from the design requirements. Slow; run with
// `cargo test -- --ignored` before a release.
#[test]
#[ignore]
fn agreement_soak_all_levels() {
    agreement_loop::<Kyber512>(1000, 1);
    agreement_loop::<Kyber768>(1000, 2);
    agreement_loop::<Kyber1024>(1000, 3);
}

#[test]
fn cross_party_agreement() {
    // Alice and Bob generate independent keypairs; one public key and one
    // ciphertext cross the wire; both arrive at the same secret.
    let mut alice_rng = ChaChaRng::seed_from_u64(101);
    let mut bob_rng = ChaChaRng::seed_from_u64(202);

    let alice_keys = Kyber768::keypair(&mut alice_rng).unwrap();
    let _bob_keys = Kyber768::keypair(&mut bob_rng).unwrap();

    // Bob receives Alice's public key over the untrusted channel
    let alice_pk_wire = Kyber768::public_key(&alice_keys).to_bytes();
    let alice_pk_at_bob = KyberPublicKey::from_bytes(&alice_pk_wire).unwrap();

    let (ct, bob_secret) = Kyber768::encapsulate(&mut bob_rng, &alice_pk_at_bob).unwrap();

    // Alice receives Bob's ciphertext
    let ct_wire = ct.to_bytes();
    let ct_at_alice = KyberCiphertext::from_bytes(&ct_wire).unwrap();

    let alice_secret =
        Kyber768::decapsulate(&Kyber768::secret_key(&alice_keys), &ct_at_alice).unwrap();

    assert_eq!(alice_secret.as_ref(), bob_secret.as_ref());
}

#[test]
fn packing_is_idempotent_bit_for_bit() {
    let mut rng = ChaChaRng::seed_from_u64(303);

    let keypair = Kyber1024::keypair(&mut rng).unwrap();
    let pk = Kyber1024::public_key(&keypair);
    let (ct, _) = Kyber1024::encapsulate(&mut rng, &pk).unwrap();

    let pk_bytes = pk.to_bytes();
    let pk_again = KyberPublicKey::from_bytes(&pk_bytes).unwrap().to_bytes();
    assert_eq!(pk_bytes, pk_again);

    let ct_bytes = ct.to_bytes();
    let ct_again = KyberCiphertext::from_bytes(&ct_bytes).unwrap().to_bytes();
    assert_eq!(ct_bytes, ct_again);
}

#[test]
fn implicit_rejection_is_deterministic_per_flip() {
    let mut rng = ChaChaRng::seed_from_u64(404);
    let keypair = Kyber512::keypair(&mut rng).unwrap();
    let pk = Kyber512::public_key(&keypair);
    let sk = Kyber512::secret_key(&keypair);

    let (ct, honest) = Kyber512::encapsulate(&mut rng, &pk).unwrap();

    // Flip one bit at several positions, including the first and last byte
    let ct_len = ct.to_bytes().len();
    for pos in [0usize, 1, ct_len / 2, ct_len - 2, ct_len - 1] {
        let mut corrupted = ct.to_bytes();
        corrupted[pos] ^= 0x80;
        let corrupted = KyberCiphertext::from_bytes(&corrupted).unwrap();

        let first = Kyber512::decapsulate(&sk, &corrupted).unwrap();
        let second = Kyber512::decapsulate(&sk, &corrupted).unwrap();

        assert_ne!(honest.as_ref(), first.as_ref(), "flip at {}", pos);
        assert_eq!(first.as_ref(), second.as_ref(), "flip at {}", pos);
    }
}

#[test]
fn constant_time_compare_has_no_positional_behavior() {
    use qcrypt_internal::constant_time::ct_verify;

    let base = vec![0x33u8; 1088];
    assert_eq!(ct_verify(&base, &base), 0);

    // Differences only in the first byte, only in the last byte, and in
    // both, all report nonzero through the same interface
    let mut first = base.clone();
    first[0] ^= 1;
    let mut last = base.clone();
    last[1087] ^= 1;

    assert_ne!(ct_verify(&base, &first), 0);
    assert_ne!(ct_verify(&base, &last), 0);
    assert_ne!(ct_verify(&first, &last), 0);
}
