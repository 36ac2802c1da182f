// Copyright (C) Microsoft Corporation. All rights reserved.

use openssl::pkey::PKey;
use openssl::pkey::Private;
use openssl::pkey::Public;
use openssl::pkey_ctx::PkeyCtx;

use super::*;
use crate::ossl::*;

fn load_public(key: &DsaKey) -> Result<PKey<Public>, CryptoError> {
    let p = Bn::from_mpi(&key.p)?;
    let q = Bn::from_mpi(&key.q)?;
    let g = Bn::from_mpi(&key.g)?;
    let y = Bn::from_mpi(&key.y)?;

    let mut bld = ParamBld::new()?;
    bld.push_bn(c"p", &p)?;
    bld.push_bn(c"q", &q)?;
    bld.push_bn(c"g", &g)?;
    bld.push_bn(c"pub", &y)?;
    let params = bld.to_param()?;
    pkey_from_params(c"DSA", &params, KeySelection::PublicKey)
}

fn load_pair(key: &DsaKey, x: &Mpi) -> Result<PKey<Private>, CryptoError> {
    let p = Bn::from_mpi(&key.p)?;
    let q = Bn::from_mpi(&key.q)?;
    let g = Bn::from_mpi(&key.g)?;
    let y = Bn::from_mpi(&key.y)?;
    let x = Bn::from_mpi(x)?;

    let mut bld = ParamBld::new()?;
    bld.push_bn(c"p", &p)?;
    bld.push_bn(c"q", &q)?;
    bld.push_bn(c"g", &g)?;
    bld.push_bn(c"pub", &y)?;
    bld.push_bn(c"priv", &x)?;
    let params = bld.to_param()?;
    pkey_from_params(c"DSA", &params, KeySelection::KeyPair)
}

impl KeyAlgo for Dsa {
    type Key = DsaKey;
    type GenParams = u32;

    fn validate_key(
        &self,
        _rng: &dyn RngOp,
        key: &DsaKey,
        secret: bool,
    ) -> Result<(), CryptoError> {
        if !secret {
            let pkey = load_public(key).map_err(|_| CryptoError::BadParameters)?;
            pkey_check(&pkey, KeySelection::Parameters)?;
            return pkey_check(&pkey, KeySelection::PublicKey);
        }
        let Some(x) = key.secret() else {
            tracing::debug!("private key not set");
            return Err(CryptoError::BadParameters);
        };
        let pkey = load_pair(key, x).map_err(|_| CryptoError::BadParameters)?;
        pkey_check(&pkey, KeySelection::KeyPair)
    }

    fn generate(&self, _rng: &dyn RngOp, bits: u32) -> Result<DsaKey, CryptoError> {
        let dsa = openssl::dsa::Dsa::generate(bits).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack, bits, "DSA key generation failed");
            CryptoError::Generic
        })?;
        Ok(DsaKey {
            p: Bn::borrowed(dsa.p()).to_mpi()?,
            q: Bn::borrowed(dsa.q()).to_mpi()?,
            g: Bn::borrowed(dsa.g()).to_mpi()?,
            y: Bn::borrowed(dsa.pub_key()).to_mpi()?,
            x: Some(Bn::borrowed(dsa.priv_key()).to_mpi()?),
        })
    }
}

impl SignatureAlgo for Dsa {
    type Signature = DsaSignature;

    fn sign(
        &self,
        _rng: &dyn RngOp,
        _hash_alg: HashAlgo,
        digest: &[u8],
        key: &DsaKey,
    ) -> Result<DsaSignature, CryptoError> {
        let Some(x) = key.secret() else {
            tracing::error!("private key not set");
            return Err(CryptoError::BadParameters);
        };
        let pkey = load_pair(key, x)?;

        let mut ctx = PkeyCtx::new(&pkey).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack, "context allocation failed");
            CryptoError::Generic
        })?;
        ctx.sign_init().map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack, "failed to initialize signing");
            CryptoError::Generic
        })?;
        let mut der = Vec::new();
        ctx.sign_to_vec(digest, &mut der)
            .map_err(|openssl_error_stack| {
                tracing::error!(?openssl_error_stack, "signing failed");
                CryptoError::Generic
            })?;
        DsaSignature::from_der(&der)
    }

    fn verify(
        &self,
        sig: &DsaSignature,
        _hash_alg: HashAlgo,
        digest: &[u8],
        key: &DsaKey,
    ) -> Result<(), CryptoError> {
        let pkey = load_public(key).map_err(|_| {
            tracing::error!("failed to load key");
            CryptoError::BadParameters
        })?;

        let mut ctx = PkeyCtx::new(&pkey).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack, "context allocation failed");
            CryptoError::SignatureInvalid
        })?;
        ctx.verify_init().map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack, "failed to initialize verify");
            CryptoError::SignatureInvalid
        })?;
        let der = sig.to_der()?;
        match ctx.verify(digest, &der) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CryptoError::SignatureInvalid),
            Err(openssl_error_stack) => {
                tracing::debug!(?openssl_error_stack, "signature rejected");
                Err(CryptoError::SignatureInvalid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use test_log::test;

    use super::*;

    // Parameter generation is slow; share one key across tests.
    static KEY: LazyLock<DsaKey> = LazyLock::new(|| Dsa.generate(&Rng {}, 1024).unwrap());

    fn flip_low_bit(value: &Mpi) -> Mpi {
        let mut bytes = value.as_bytes().to_vec();
        if let Some(last) = bytes.last_mut() {
            *last ^= 0x01;
        }
        Mpi::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_dsa_generate_layout() {
        let key = &*KEY;
        assert_eq!(key.p.bits(), 1024);
        assert!(key.q.bits() <= 256);
        assert!(key.secret().is_some());
    }

    #[test]
    fn test_dsa_validate() {
        let rng = Rng {};
        assert!(Dsa.validate_key(&rng, &KEY, true).is_ok());
        assert!(Dsa.validate_key(&rng, &KEY.to_public(), false).is_ok());
        assert_eq!(
            Dsa.validate_key(&rng, &KEY.to_public(), true),
            Err(CryptoError::BadParameters)
        );
    }

    #[test]
    fn test_dsa_validate_rejects_mismatched_pair() {
        let rng = Rng {};
        let mut key = KEY.clone();
        key.y = flip_low_bit(&key.y);
        assert_eq!(
            Dsa.validate_key(&rng, &key, true),
            Err(CryptoError::BadParameters)
        );
    }

    #[test]
    fn test_dsa_sign_verify() {
        let rng = Rng {};
        for hash_alg in [HashAlgo::Sha1, HashAlgo::Sha256] {
            let digest = vec![0x6du8; hash_alg.digest_size()];
            let sig = Dsa.sign(&rng, hash_alg, &digest, &KEY).unwrap();
            assert!(Dsa
                .verify(&sig, hash_alg, &digest, &KEY.to_public())
                .is_ok());

            let der = sig.to_der().unwrap();
            assert_eq!(DsaSignature::from_der(&der).unwrap(), sig);
        }
    }

    #[test]
    fn test_dsa_tamper_detection() {
        let rng = Rng {};
        let digest = [0x42u8; 20];
        let sig = Dsa.sign(&rng, HashAlgo::Sha1, &digest, &KEY).unwrap();

        let mut bad_digest = digest;
        bad_digest[19] ^= 0x01;
        assert_eq!(
            Dsa.verify(&sig, HashAlgo::Sha1, &bad_digest, &KEY),
            Err(CryptoError::SignatureInvalid)
        );

        let bad_r = DsaSignature {
            r: flip_low_bit(&sig.r),
            s: sig.s.clone(),
        };
        assert_eq!(
            Dsa.verify(&bad_r, HashAlgo::Sha1, &digest, &KEY),
            Err(CryptoError::SignatureInvalid)
        );

        let bad_s = DsaSignature {
            r: sig.r.clone(),
            s: flip_low_bit(&sig.s),
        };
        assert_eq!(
            Dsa.verify(&bad_s, HashAlgo::Sha1, &digest, &KEY),
            Err(CryptoError::SignatureInvalid)
        );
    }

    #[test]
    fn test_dsa_sign_without_private_key() {
        let rng = CountingRng::default();
        assert_eq!(
            Dsa.sign(&rng, HashAlgo::Sha1, &[0u8; 20], &KEY.to_public())
                .unwrap_err(),
            CryptoError::BadParameters
        );
        assert_eq!(rng.calls(), 0);
    }
}
