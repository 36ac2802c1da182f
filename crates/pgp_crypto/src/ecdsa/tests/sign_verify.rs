// Copyright (C) Microsoft Corporation. All rights reserved.

use test_log::test;

use super::testvectors::*;
use super::*;

fn p256_key() -> EcKey {
    EcKey::new(EcCurve::NistP256, mpi(&P256_Q), mpi(&P256_D))
}

#[test]
fn test_sign_verify_supported_curves() {
    let rng = Rng {};
    for &curve in CURVES {
        let key = Ecdsa.generate(&rng, curve).unwrap();
        let digest = random_digest(HashAlgo::Sha256.digest_size());
        let sig = Ecdsa.sign(&rng, HashAlgo::Sha256, &digest, &key).unwrap();
        assert!(sig.r.bits() <= curve.bits());
        assert!(sig.s.bits() <= curve.bits());

        let public = key.to_public();
        assert!(Ecdsa
            .verify(&sig, HashAlgo::Sha256, &digest, &public)
            .is_ok());
    }
}

#[test]
fn test_sign_verify_digest_sizes() {
    let rng = Rng {};
    let key = Ecdsa.generate(&rng, EcCurve::NistP384).unwrap();
    for hash_alg in [HashAlgo::Sha1, HashAlgo::Sha256, HashAlgo::Sha384, HashAlgo::Sha512] {
        let digest = random_digest(hash_alg.digest_size());
        let sig = Ecdsa.sign(&rng, hash_alg, &digest, &key).unwrap();
        assert!(Ecdsa.verify(&sig, hash_alg, &digest, &key).is_ok());
    }
}

#[test]
fn test_verify_known_vector() {
    let key = EcKey::public(EcCurve::NistP256, mpi(&P256_Q));
    let sig = EcSignature {
        r: mpi(&P256_SIG_R),
        s: mpi(&P256_SIG_S),
    };
    assert!(Ecdsa
        .verify(&sig, HashAlgo::Sha256, &P256_DIGEST, &key)
        .is_ok());
}

#[test]
fn test_sign_verify_message() {
    let rng = Rng {};
    let digest = sha256(b"sample");
    assert_eq!(digest, P256_DIGEST);

    let key = p256_key();
    let sig = Ecdsa.sign(&rng, HashAlgo::Sha256, &digest, &key).unwrap();
    assert!(Ecdsa
        .verify(&sig, HashAlgo::Sha256, &sha256(b"sample"), &key)
        .is_ok());
    assert_eq!(
        Ecdsa.verify(&sig, HashAlgo::Sha256, &sha256(b"Sample"), &key),
        Err(CryptoError::SignatureInvalid)
    );
}

#[test]
fn test_sign_known_key() {
    let rng = Rng {};
    let key = p256_key();
    let sig = Ecdsa
        .sign(&rng, HashAlgo::Sha256, &P256_DIGEST, &key)
        .unwrap();
    assert!(Ecdsa
        .verify(&sig, HashAlgo::Sha256, &P256_DIGEST, &key.to_public())
        .is_ok());

    // signatures are randomized, the DER form still round-trips
    let der = sig.to_der().unwrap();
    assert_eq!(EcSignature::from_der(&der).unwrap(), sig);
}

#[test]
fn test_tampered_digest_rejected() {
    let key = EcKey::public(EcCurve::NistP256, mpi(&P256_Q));
    let sig = EcSignature {
        r: mpi(&P256_SIG_R),
        s: mpi(&P256_SIG_S),
    };
    let mut digest = P256_DIGEST;
    digest[0] ^= 0x80;
    assert_eq!(
        Ecdsa.verify(&sig, HashAlgo::Sha256, &digest, &key),
        Err(CryptoError::SignatureInvalid)
    );
}

#[test]
fn test_tampered_signature_rejected() {
    let key = EcKey::public(EcCurve::NistP256, mpi(&P256_Q));
    let r = mpi(&P256_SIG_R);
    let s = mpi(&P256_SIG_S);

    let bad_r = EcSignature {
        r: flip_low_bit(&r),
        s: s.clone(),
    };
    assert_eq!(
        Ecdsa.verify(&bad_r, HashAlgo::Sha256, &P256_DIGEST, &key),
        Err(CryptoError::SignatureInvalid)
    );

    let bad_s = EcSignature {
        r,
        s: flip_low_bit(&s),
    };
    assert_eq!(
        Ecdsa.verify(&bad_s, HashAlgo::Sha256, &P256_DIGEST, &key),
        Err(CryptoError::SignatureInvalid)
    );
}

#[test]
fn test_verify_with_other_key_rejected() {
    let rng = Rng {};
    let other = Ecdsa.generate(&rng, EcCurve::NistP256).unwrap();
    let sig = EcSignature {
        r: mpi(&P256_SIG_R),
        s: mpi(&P256_SIG_S),
    };
    assert_eq!(
        Ecdsa.verify(&sig, HashAlgo::Sha256, &P256_DIGEST, &other.to_public()),
        Err(CryptoError::SignatureInvalid)
    );
}

#[test]
fn test_verify_malformed_point() {
    let key = EcKey::public(EcCurve::NistP256, mpi(&[0x04, 0x01, 0x02]));
    let sig = EcSignature {
        r: mpi(&P256_SIG_R),
        s: mpi(&P256_SIG_S),
    };
    assert_eq!(
        Ecdsa.verify(&sig, HashAlgo::Sha256, &P256_DIGEST, &key),
        Err(CryptoError::BadParameters)
    );
}

#[test]
fn test_sign_without_private_key() {
    let rng = CountingRng::default();

    let public = EcKey::public(EcCurve::NistP256, mpi(&P256_Q));
    assert_eq!(
        Ecdsa
            .sign(&rng, HashAlgo::Sha256, &P256_DIGEST, &public)
            .unwrap_err(),
        CryptoError::BadParameters
    );

    let empty = EcKey::new(EcCurve::NistP256, mpi(&P256_Q), Mpi::new());
    assert_eq!(
        Ecdsa
            .sign(&rng, HashAlgo::Sha256, &P256_DIGEST, &empty)
            .unwrap_err(),
        CryptoError::BadParameters
    );

    assert_eq!(rng.calls(), 0);
}

#[test]
fn test_key_debug_redacts_scalar() {
    let text = format!("{:?}", p256_key());
    assert!(text.contains("[REDACTED]"));
    assert!(!text.contains("c9af"));
}

#[cfg(feature = "use-symcrypt")]
#[test]
fn test_unsupported_curves_not_implemented() {
    let rng = CountingRng::default();
    for curve in [
        EcCurve::Secp256k1,
        EcCurve::BrainpoolP256r1,
        EcCurve::BrainpoolP384r1,
        EcCurve::BrainpoolP512r1,
    ] {
        assert_eq!(
            Ecdsa.generate(&rng, curve).unwrap_err(),
            CryptoError::NotImplemented
        );

        let mut point = vec![0x04u8];
        point.extend(std::iter::repeat_n(0x01u8, 2 * curve.bytes()));
        let key = EcKey::new(curve, mpi(&point), mpi(&[0x01]));
        let digest = [0u8; 32];
        assert_eq!(
            Ecdsa.sign(&rng, HashAlgo::Sha256, &digest, &key).unwrap_err(),
            CryptoError::NotImplemented
        );
        let sig = EcSignature {
            r: mpi(&[0x01]),
            s: mpi(&[0x01]),
        };
        assert_eq!(
            Ecdsa.verify(&sig, HashAlgo::Sha256, &digest, &key),
            Err(CryptoError::NotImplemented)
        );
        assert_eq!(
            Ecdsa.validate_key(&rng, &key, true),
            Err(CryptoError::NotImplemented)
        );
    }
    assert_eq!(rng.calls(), 0);
}
