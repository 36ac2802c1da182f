// Copyright (C) Microsoft Corporation. All rights reserved.

use symcrypt::ecc::CurveType;
use symcrypt::ecc::EcKeyUsage;

use super::*;

const P256_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xbc, 0xe6, 0xfa, 0xad, 0xa7, 0x17, 0x9e, 0x84, 0xf3, 0xb9, 0xca, 0xc2, 0xfc, 0x63, 0x25, 0x51,
];

const P384_ORDER: [u8; 48] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xc7, 0x63, 0x4d, 0x81, 0xf4, 0x37, 0x2d, 0xdf,
    0x58, 0x1a, 0x0d, 0xb2, 0x48, 0xb0, 0xa7, 0x7a, 0xec, 0xec, 0x19, 0x6a, 0xcc, 0xc5, 0x29, 0x73,
];

const P521_ORDER: [u8; 66] = [
    0x01, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xfa, 0x51, 0x86, 0x87, 0x83, 0xbf, 0x2f, 0x96, 0x6b, 0x7f, 0xcc, 0x01, 0x48, 0xf7,
    0x09, 0xa5, 0xd0, 0x3b, 0xb5, 0xc9, 0xb8, 0x89, 0x9c, 0x47, 0xae, 0xbb, 0x6f, 0xb7, 0x1e, 0x91,
    0x38, 0x64,
];

// SymCrypt only ships the NIST prime curves.
fn curve_params(curve: EcCurve) -> Result<(CurveType, &'static [u8]), CryptoError> {
    match curve {
        EcCurve::NistP256 => Ok((CurveType::NistP256, &P256_ORDER)),
        EcCurve::NistP384 => Ok((CurveType::NistP384, &P384_ORDER)),
        EcCurve::NistP521 => Ok((CurveType::NistP521, &P521_ORDER)),
        _ => Err(CryptoError::NotImplemented),
    }
}

// SymCrypt takes the bare `x || y` coordinates.
fn public_xy(key: &EcKey) -> Result<&[u8], CryptoError> {
    match key.p.value().split_first() {
        Some((0x04, xy)) if xy.len() == 2 * key.curve.bytes() => Ok(xy),
        _ => {
            tracing::debug!(curve = ?key.curve, "public point is not uncompressed");
            Err(CryptoError::BadParameters)
        }
    }
}

// Left-padded scalar with 1 <= x < order.
fn checked_scalar(x: &Mpi, order: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let scalar = x.to_padded(order.len()).ok_or(CryptoError::BadParameters)?;
    if scalar.iter().all(|&b| b == 0) || scalar.as_slice() >= order {
        tracing::debug!("private scalar out of range");
        return Err(CryptoError::BadParameters);
    }
    Ok(scalar)
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
        let (curve_type, order) = curve_params(key.curve)?;
        let xy = public_xy(key)?;
        if !secret {
            symcrypt::ecc::EcKey::set_public_key(curve_type, xy, EcKeyUsage::EcDsa).map_err(
                |symcrypt_error_stack| {
                    tracing::debug!(?symcrypt_error_stack, "public point rejected");
                    CryptoError::BadParameters
                },
            )?;
            return Ok(());
        }

        let Some(x) = key.secret() else {
            tracing::debug!("private key not set");
            return Err(CryptoError::BadParameters);
        };
        let scalar = checked_scalar(x, order)?;
        let pair =
            symcrypt::ecc::EcKey::set_key_pair(curve_type, &scalar, Some(xy), EcKeyUsage::EcDsa)
                .map_err(|symcrypt_error_stack| {
                    tracing::debug!(?symcrypt_error_stack, "key pair rejected");
                    CryptoError::BadParameters
                })?;
        let derived = pair.export_public_key().map_err(|symcrypt_error_stack| {
            tracing::error!(?symcrypt_error_stack);
            CryptoError::Generic
        })?;
        if derived.as_slice() != xy {
            tracing::debug!("public point does not match private scalar");
            return Err(CryptoError::BadParameters);
        }
        Ok(())
    }

    fn generate(&self, _rng: &dyn RngOp, curve: EcCurve) -> Result<EcKey, CryptoError> {
        let (curve_type, _) = curve_params(curve)?;
        let pair = symcrypt::ecc::EcKey::generate_key_pair(curve_type, EcKeyUsage::EcDsa)
            .map_err(|symcrypt_error_stack| {
                tracing::error!(?symcrypt_error_stack, "EC key generation failed");
                CryptoError::Generic
            })?;
        let xy = pair.export_public_key().map_err(|symcrypt_error_stack| {
            tracing::error!(?symcrypt_error_stack);
            CryptoError::Generic
        })?;
        let x = pair.export_private_key().map_err(|symcrypt_error_stack| {
            tracing::error!(?symcrypt_error_stack);
            CryptoError::Generic
        })?;
        let mut point = Vec::with_capacity(1 + xy.len());
        point.push(0x04);
        point.extend_from_slice(&xy);
        Ok(EcKey::new(
            curve,
            Mpi::from_bytes(&point)?,
            Mpi::from_bytes(&x)?,
        ))
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
        let (curve_type, order) = curve_params(key.curve)?;
        let xy = public_xy(key).map_err(|_| CryptoError::Generic)?;
        let scalar = x.to_padded(order.len()).ok_or(CryptoError::Generic)?;

        let pair =
            symcrypt::ecc::EcKey::set_key_pair(curve_type, &scalar, Some(xy), EcKeyUsage::EcDsa)
                .map_err(|symcrypt_error_stack| {
                    tracing::error!(?symcrypt_error_stack, "failed to load key");
                    CryptoError::Generic
                })?;
        let raw = pair.ecdsa_sign(digest).map_err(|symcrypt_error_stack| {
            tracing::error!(?symcrypt_error_stack, "signing failed");
            CryptoError::Generic
        })?;
        let (r, s) = raw.split_at(raw.len() / 2);
        Ok(EcSignature {
            r: Mpi::from_bytes(r)?,
            s: Mpi::from_bytes(s)?,
        })
    }

    fn verify(
        &self,
        sig: &EcSignature,
        _hash_alg: HashAlgo,
        digest: &[u8],
        key: &EcKey,
    ) -> Result<(), CryptoError> {
        let (curve_type, order) = curve_params(key.curve)?;
        let xy = public_xy(key)?;
        let (Some(r), Some(s)) = (sig.r.to_padded(order.len()), sig.s.to_padded(order.len()))
        else {
            tracing::debug!("signature component longer than curve order");
            return Err(CryptoError::SignatureInvalid);
        };

        let public = symcrypt::ecc::EcKey::set_public_key(curve_type, xy, EcKeyUsage::EcDsa)
            .map_err(|symcrypt_error_stack| {
                tracing::error!(?symcrypt_error_stack, "failed to load key");
                CryptoError::BadParameters
            })?;
        public
            .ecdsa_verify(&[r, s].concat(), digest)
            .map_err(|symcrypt_error_stack| {
                tracing::debug!(?symcrypt_error_stack, "signature rejected");
                CryptoError::SignatureInvalid
            })
    }
}
