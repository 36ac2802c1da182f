// Copyright (C) Microsoft Corporation. All rights reserved.

use ::rsa::BigUint;
use symcrypt::hash::HashAlgorithm;
use symcrypt::rsa::RsaKeyUsage;

use super::*;

// DigestInfo prefixes SymCrypt can emit.
fn digest_info_alg(hash_alg: HashAlgo) -> Result<HashAlgorithm, CryptoError> {
    match hash_alg {
        HashAlgo::Md5 => Ok(HashAlgorithm::Md5),
        HashAlgo::Sha1 => Ok(HashAlgorithm::Sha1),
        HashAlgo::Sha256 => Ok(HashAlgorithm::Sha256),
        HashAlgo::Sha384 => Ok(HashAlgorithm::Sha384),
        HashAlgo::Sha512 => Ok(HashAlgorithm::Sha512),
        _ => Err(CryptoError::NotImplemented),
    }
}

fn load_public(key: &RsaKey) -> Result<symcrypt::rsa::RsaKey, CryptoError> {
    symcrypt::rsa::RsaKey::set_public_key(
        key.n.value(),
        key.e.value(),
        RsaKeyUsage::SignAndEncrypt,
    )
    .map_err(|symcrypt_error_stack| {
        tracing::error!(?symcrypt_error_stack, "failed to load RSA public key");
        CryptoError::BadParameters
    })
}

fn load_pair(key: &RsaKey) -> Result<symcrypt::rsa::RsaKey, CryptoError> {
    let Some(secret) = &key.secret else {
        tracing::error!("private key not set");
        return Err(CryptoError::BadParameters);
    };
    symcrypt::rsa::RsaKey::set_key_pair(
        key.n.value(),
        key.e.value(),
        secret.p.value(),
        secret.q.value(),
        RsaKeyUsage::SignAndEncrypt,
    )
    .map_err(|symcrypt_error_stack| {
        tracing::error!(?symcrypt_error_stack, "failed to load RSA key pair");
        CryptoError::BadParameters
    })
}

// SymCrypt rebuilds its key from the primes alone, so `d` and `u` are
// checked here without reducing `d` to one canonical form.
fn check_secret(key: &RsaKey, secret: &RsaSecret) -> Result<(), CryptoError> {
    let n = BigUint::from_bytes_be(key.n.value());
    let e = BigUint::from_bytes_be(key.e.value());
    let d = BigUint::from_bytes_be(secret.d.value());
    let p = BigUint::from_bytes_be(secret.p.value());
    let q = BigUint::from_bytes_be(secret.q.value());
    let u = BigUint::from_bytes_be(secret.u.value());
    let one = BigUint::from(1u32);
    let two = BigUint::from(2u32);

    if p < two || q < two || &p * &q != n {
        tracing::debug!("RSA modulus does not match its primes");
        return Err(CryptoError::BadParameters);
    }

    // e * d = 1 mod (p - 1) and mod (q - 1)
    let ed = &e * &d;
    if &ed % (&p - &one) != one || &ed % (&q - &one) != one {
        tracing::debug!("RSA private exponent does not match its primes");
        return Err(CryptoError::BadParameters);
    }

    // p * u = 1 mod q
    if (&p * &u) % &q != one {
        tracing::debug!("RSA CRT coefficient does not match its primes");
        return Err(CryptoError::BadParameters);
    }
    Ok(())
}

impl KeyAlgo for Rsa {
    type Key = RsaKey;
    type GenParams = u32;

    fn validate_key(
        &self,
        _rng: &dyn RngOp,
        key: &RsaKey,
        secret: bool,
    ) -> Result<(), CryptoError> {
        if !secret {
            load_public(key)?;
            return Ok(());
        }
        let Some(secret) = &key.secret else {
            tracing::debug!("private key not set");
            return Err(CryptoError::BadParameters);
        };

        // SymCrypt must also accept the primes it will sign and decrypt with.
        load_pair(key)?;
        check_secret(key, secret)
    }

    fn generate(&self, _rng: &dyn RngOp, bits: u32) -> Result<RsaKey, CryptoError> {
        let pair = symcrypt::rsa::RsaKey::generate_key_pair(bits, None, RsaKeyUsage::SignAndEncrypt)
            .map_err(|symcrypt_error_stack| {
                tracing::error!(?symcrypt_error_stack, bits, "RSA key generation failed");
                CryptoError::Generic
            })?;
        let blob = pair
            .export_key_pair_blob()
            .map_err(|symcrypt_error_stack| {
                tracing::error!(?symcrypt_error_stack);
                CryptoError::Generic
            })?;

        // The blob's coefficient is q^-1 mod p, so its q is the OpenPGP p.
        Ok(RsaKey {
            n: Mpi::from_bytes(&blob.modulus)?,
            e: Mpi::from_bytes(&blob.pub_exp)?,
            secret: Some(RsaSecret {
                d: Mpi::from_bytes(&blob.private_exp)?,
                p: Mpi::from_bytes(&blob.q)?,
                q: Mpi::from_bytes(&blob.p)?,
                u: Mpi::from_bytes(&blob.crt_coefficient)?,
            }),
        })
    }
}

impl SignatureAlgo for Rsa {
    type Signature = RsaSignature;

    fn sign(
        &self,
        _rng: &dyn RngOp,
        hash_alg: HashAlgo,
        digest: &[u8],
        key: &RsaKey,
    ) -> Result<RsaSignature, CryptoError> {
        if key.secret.is_none() {
            tracing::error!("private key not set");
            return Err(CryptoError::BadParameters);
        }
        let alg = digest_info_alg(hash_alg)?;
        let pair = load_pair(key).map_err(|_| CryptoError::Generic)?;
        let s = pair
            .pkcs1_sign(digest, alg)
            .map_err(|symcrypt_error_stack| {
                tracing::error!(?symcrypt_error_stack, "RSA signing failed");
                CryptoError::Generic
            })?;
        Ok(RsaSignature {
            s: Mpi::from_bytes(&s)?,
        })
    }

    fn verify(
        &self,
        sig: &RsaSignature,
        hash_alg: HashAlgo,
        digest: &[u8],
        key: &RsaKey,
    ) -> Result<(), CryptoError> {
        let alg = digest_info_alg(hash_alg)?;
        let public = load_public(key)?;
        // OpenPGP strips leading zeros that PKCS#1 requires.
        let Some(s) = sig.s.to_padded(key.n.value().len()) else {
            tracing::debug!("signature longer than modulus");
            return Err(CryptoError::SignatureInvalid);
        };
        public
            .pkcs1_verify(digest, &s, alg)
            .map_err(|symcrypt_error_stack| {
                tracing::debug!(?symcrypt_error_stack, "signature rejected");
                CryptoError::SignatureInvalid
            })
    }
}

impl EncryptionAlgo for Rsa {
    type Ciphertext = RsaEncrypted;

    fn encrypt(
        &self,
        _rng: &dyn RngOp,
        plaintext: &[u8],
        key: &RsaKey,
    ) -> Result<RsaEncrypted, CryptoError> {
        let public = load_public(key)?;
        let m = public
            .pkcs1_encrypt(plaintext)
            .map_err(|symcrypt_error_stack| {
                tracing::error!(?symcrypt_error_stack, "RSA encryption failed");
                CryptoError::Generic
            })?;
        Ok(RsaEncrypted {
            m: Mpi::from_bytes(&m)?,
        })
    }

    fn decrypt(
        &self,
        _rng: &dyn RngOp,
        ciphertext: &RsaEncrypted,
        key: &RsaKey,
    ) -> Result<Vec<u8>, CryptoError> {
        let pair = load_pair(key)?;
        let Some(m) = ciphertext.m.to_padded(key.n.value().len()) else {
            tracing::error!("ciphertext longer than modulus");
            return Err(CryptoError::BadParameters);
        };
        pair.pkcs1_decrypt(&m).map_err(|symcrypt_error_stack| {
            tracing::error!(?symcrypt_error_stack, "RSA decryption failed");
            CryptoError::Generic
        })
    }
}
