// Copyright (C) Microsoft Corporation. All rights reserved.

use std::cmp::Ordering;

use openssl::bn::BigNum;
use openssl::bn::BigNumContext;
use openssl::ec::EcGroup;
use openssl::ec::PointConversionForm;
use openssl::nid::Nid;
use openssl::pkey::PKey;
use openssl::pkey::Private;
use openssl::pkey::Public;
use openssl::pkey_ctx::PkeyCtx;

use super::*;
use crate::ossl::*;

fn curve_nid(curve: EcCurve) -> Nid {
    match curve {
        EcCurve::NistP256 => Nid::X9_62_PRIME256V1,
        EcCurve::NistP384 => Nid::SECP384R1,
        EcCurve::NistP521 => Nid::SECP521R1,
        EcCurve::Secp256k1 => Nid::SECP256K1,
        EcCurve::BrainpoolP256r1 => Nid::BRAINPOOL_P256R1,
        EcCurve::BrainpoolP384r1 => Nid::BRAINPOOL_P384R1,
        EcCurve::BrainpoolP512r1 => Nid::BRAINPOOL_P512R1,
    }
}

fn ec_group(curve: EcCurve) -> Result<EcGroup, CryptoError> {
    EcGroup::from_curve_name(curve_nid(curve)).map_err(|openssl_error_stack| {
        tracing::error!(?openssl_error_stack, ?curve, "failed to create EC group");
        CryptoError::Generic
    })
}

fn load_public(key: &EcKey) -> Result<PKey<Public>, CryptoError> {
    let mut bld = ParamBld::new()?;
    bld.push_utf8(c"group", key.curve.native_name())?;
    bld.push_octets(c"pub", key.p.value())?;
    let params = bld.to_param()?;
    pkey_from_params(c"EC", &params, KeySelection::PublicKey)
}

fn load_pair(key: &EcKey, x: &Mpi) -> Result<PKey<Private>, CryptoError> {
    let x = Bn::from_mpi(x)?;
    let mut bld = ParamBld::new()?;
    bld.push_utf8(c"group", key.curve.native_name())?;
    bld.push_octets(c"pub", key.p.value())?;
    bld.push_bn(c"priv", &x)?;
    let params = bld.to_param()?;
    pkey_from_params(c"EC", &params, KeySelection::KeyPair)
}

// 1 <= x < order
fn check_scalar(curve: EcCurve, x: &Mpi) -> Result<(), CryptoError> {
    let group = ec_group(curve)?;
    let mut ctx = BigNumContext::new().map_err(|openssl_error_stack| {
        tracing::error!(?openssl_error_stack);
        CryptoError::Generic
    })?;
    let mut order = BigNum::new().map_err(|openssl_error_stack| {
        tracing::error!(?openssl_error_stack);
        CryptoError::Generic
    })?;
    group
        .order(&mut order, &mut ctx)
        .map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack, "failed to get curve order");
            CryptoError::Generic
        })?;

    let x = Bn::from_mpi(x)?;
    let Some(scalar) = x.get() else {
        return Err(CryptoError::Generic);
    };
    if scalar.num_bits() == 0 || scalar.ucmp(&order) != Ordering::Less {
        tracing::debug!(?curve, "private scalar out of range");
        return Err(CryptoError::BadParameters);
    }
    Ok(())
}

impl KeyAlgo for Ecdsa {
    type Key = EcKey;
    type GenParams = EcCurve;

    fn validate_key(
        &self,
        _rng: &dyn RngOp,
        key: &EcKey,
        secret: bool,
    ) -> Result<(), CryptoError> {
        if !secret {
            let pkey = load_public(key).map_err(|_| CryptoError::BadParameters)?;
            return pkey_check(&pkey, KeySelection::PublicKey);
        }
        let Some(x) = key.secret() else {
            tracing::debug!("private key not set");
            return Err(CryptoError::BadParameters);
        };
        check_scalar(key.curve, x)?;
        let pkey = load_pair(key, x).map_err(|_| CryptoError::BadParameters)?;
        pkey_check(&pkey, KeySelection::KeyPair)
    }

    fn generate(&self, _rng: &dyn RngOp, curve: EcCurve) -> Result<EcKey, CryptoError> {
        let group = ec_group(curve)?;
        let pair = openssl::ec::EcKey::generate(&group).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack, "EC key generation failed");
            CryptoError::Generic
        })?;
        let mut ctx = BigNumContext::new().map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::Generic
        })?;
        let point = pair
            .public_key()
            .to_bytes(&group, PointConversionForm::UNCOMPRESSED, &mut ctx)
            .map_err(|openssl_error_stack| {
                tracing::error!(?openssl_error_stack, "failed to export EC point");
                CryptoError::Generic
            })?;
        let x = Bn::borrowed(pair.private_key()).to_mpi()?;
        Ok(EcKey::new(curve, Mpi::from_bytes(&point)?, x))
    }
}

impl SignatureAlgo for Ecdsa {
    type Signature = EcSignature;

    fn sign(
        &self,
        _rng: &dyn RngOp,
        _hash_alg: HashAlgo,
        digest: &[u8],
        key: &EcKey,
    ) -> Result<EcSignature, CryptoError> {
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
        EcSignature::from_der(&der)
    }

    fn verify(
        &self,
        sig: &EcSignature,
        _hash_alg: HashAlgo,
        digest: &[u8],
        key: &EcKey,
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
