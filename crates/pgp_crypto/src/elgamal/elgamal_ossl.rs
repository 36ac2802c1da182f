// Copyright (C) Microsoft Corporation. All rights reserved.

use std::cmp::Ordering;

use foreign_types::ForeignTypeRef;
use openssl::bn::BigNum;
use openssl::bn::BigNumContext;
use openssl::bn::BigNumContextRef;
use openssl::bn::BigNumRef;
use openssl::error::ErrorStack;

use super::*;
use crate::ossl::*;

// Shortest padding string allowed by EME-PKCS1-v1_5.
const MIN_PS_LEN: usize = 8;

// Attempts to replace one zero byte of the padding string.
const MAX_PS_REDRAWS: usize = 64;

fn ossl_error(openssl_error_stack: ErrorStack) -> CryptoError {
    tracing::error!(?openssl_error_stack);
    CryptoError::Generic
}

fn to_bn(mpi: &Mpi) -> Result<BigNum, CryptoError> {
    Bn::from_mpi(mpi)?.into_owned()
}

struct Group {
    p: BigNum,
    g: BigNum,
    y: BigNum,
}

// p odd, 1 < g < p and 1 < y < p.
fn load_group(key: &ElgamalKey) -> Result<Group, CryptoError> {
    let group = Group {
        p: to_bn(&key.p)?,
        g: to_bn(&key.g)?,
        y: to_bn(&key.y)?,
    };
    let one = BigNum::from_u32(1).map_err(ossl_error)?;
    let in_range = |v: &BigNumRef| {
        v.ucmp(&one) == Ordering::Greater && v.ucmp(&group.p) == Ordering::Less
    };
    if !group.p.is_bit_set(0) || !in_range(&group.g) || !in_range(&group.y) {
        tracing::debug!("ElGamal group parameters out of range");
        return Err(CryptoError::BadParameters);
    }
    Ok(group)
}

fn new_ctx() -> Result<BigNumContext, CryptoError> {
    BigNumContext::new().map_err(ossl_error)
}

#[allow(unsafe_code)]
fn mod_inverse(
    a: &BigNumRef,
    n: &BigNumRef,
    ctx: &mut BigNumContextRef,
) -> Result<Bn<'static>, CryptoError> {
    // SAFETY: all handles are valid; a null result asks for a fresh BIGNUM.
    let raw = unsafe {
        openssl_sys::BN_mod_inverse(std::ptr::null_mut(), a.as_ptr(), n.as_ptr(), ctx.as_ptr())
    };
    // SAFETY: the returned BIGNUM is new and owned by the caller.
    let inv = unsafe { Bn::from_raw(raw) };
    if inv.is_empty() {
        tracing::error!(openssl_error_stack = ?ErrorStack::get(), "BN_mod_inverse failed");
        return Err(CryptoError::Generic);
    }
    Ok(inv)
}

// EM = 00 || 02 || PS || 00 || M, with PS non-zero random bytes.
fn pad(rng: &dyn RngOp, msg: &[u8], k: usize) -> Result<Vec<u8>, CryptoError> {
    if msg.len() + MIN_PS_LEN + 3 > k {
        tracing::error!(len = msg.len(), k, "message too long for modulus");
        return Err(CryptoError::BadParameters);
    }
    let ps_len = k - msg.len() - 3;
    let mut em = vec![0u8; k];
    em[1] = 0x02;

    let ps = &mut em[2..2 + ps_len];
    rng.rand_bytes(ps)?;
    let mut byte = [0u8; 1];
    for b in ps.iter_mut() {
        let mut redraws = 0;
        while *b == 0 {
            if redraws == MAX_PS_REDRAWS {
                tracing::error!("RNG keeps returning zero padding bytes");
                return Err(CryptoError::RngError);
            }
            rng.rand_bytes(&mut byte)?;
            *b = byte[0];
            redraws += 1;
        }
    }
    em[k - msg.len()..].copy_from_slice(msg);
    Ok(em)
}

// Walks the whole block without branching on its contents so that every
// malformed encoding fails the same way.
fn unpad(em: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if em.len() < MIN_PS_LEN + 3 {
        tracing::error!("EME-PKCS1-v1_5 decoding failed");
        return Err(CryptoError::Generic);
    }

    let mut bad = em[0] | (em[1] ^ 0x02);
    let mut found = 0u8;
    let mut sep = 0usize;
    for (i, &b) in em.iter().enumerate().skip(2) {
        // 1 if b == 0
        let is_zero = (((b as u16).wrapping_sub(1) >> 8) as u8) & 1;
        let first = is_zero & !found & 1;
        sep |= i & 0usize.wrapping_sub(first as usize);
        found |= is_zero;
    }
    bad |= found ^ 1;
    // 1 if the padding string is shorter than MIN_PS_LEN
    bad |= (sep.wrapping_sub(MIN_PS_LEN + 2) >> (usize::BITS - 1)) as u8;

    if bad != 0 {
        tracing::error!("EME-PKCS1-v1_5 decoding failed");
        return Err(CryptoError::Generic);
    }
    Ok(em[sep + 1..].to_vec())
}

// Uniform k in [1, p - 2], drawn with 64 bits of slack before reduction.
fn ephemeral(
    rng: &dyn RngOp,
    p_minus_1: &BigNumRef,
    ctx: &mut BigNumContextRef,
) -> Result<BigNum, CryptoError> {
    let mut buf = vec![0u8; p_minus_1.num_bytes() as usize + 8];
    loop {
        rng.rand_bytes(&mut buf)?;
        let raw = BigNum::from_slice(&buf).map_err(ossl_error)?;
        let mut k = BigNum::new().map_err(ossl_error)?;
        k.nnmod(&raw, p_minus_1, ctx).map_err(ossl_error)?;
        if k.num_bits() > 0 {
            return Ok(k);
        }
    }
}

impl KeyAlgo for Elgamal {
    type Key = ElgamalKey;
    type GenParams = u32;

    fn validate_key(
        &self,
        _rng: &dyn RngOp,
        key: &ElgamalKey,
        secret: bool,
    ) -> Result<(), CryptoError> {
        let group = load_group(key)?;
        if !secret {
            return Ok(());
        }
        let Some(x) = key.secret() else {
            tracing::debug!("private key not set");
            return Err(CryptoError::BadParameters);
        };

        let x = to_bn(x)?;
        let mut ctx = new_ctx()?;
        let mont = MontCtx::new(&group.p, &mut ctx)?;
        let mut y = BigNum::new().map_err(ossl_error)?;
        mont.mod_exp(&mut y, &group.g, &x, &mut ctx)?;
        if y.ucmp(&group.y) != Ordering::Equal {
            tracing::debug!("public value does not match private exponent");
            return Err(CryptoError::BadParameters);
        }
        Ok(())
    }

    fn generate(&self, _rng: &dyn RngOp, _bits: u32) -> Result<ElgamalKey, CryptoError> {
        Err(CryptoError::NotImplemented)
    }
}

impl EncryptionAlgo for Elgamal {
    type Ciphertext = ElgamalEncrypted;

    fn encrypt(
        &self,
        rng: &dyn RngOp,
        plaintext: &[u8],
        key: &ElgamalKey,
    ) -> Result<ElgamalEncrypted, CryptoError> {
        let group = load_group(key)?;
        let em = pad(rng, plaintext, group.p.num_bytes() as usize)?;
        let m = BigNum::from_slice(&em).map_err(ossl_error)?;

        let mut ctx = new_ctx()?;
        let mont = MontCtx::new(&group.p, &mut ctx)?;
        let recp = RecpCtx::new(&group.p, &mut ctx)?;

        let mut p_minus_1 = group.p.to_owned().map_err(ossl_error)?;
        p_minus_1.sub_word(1).map_err(ossl_error)?;
        let k = ephemeral(rng, &p_minus_1, &mut ctx)?;

        let mut c1 = BigNum::new().map_err(ossl_error)?;
        mont.mod_exp(&mut c1, &group.g, &k, &mut ctx)?;
        let mut yk = BigNum::new().map_err(ossl_error)?;
        mont.mod_exp(&mut yk, &group.y, &k, &mut ctx)?;
        let mut c2 = BigNum::new().map_err(ossl_error)?;
        recp.mod_mul(&mut c2, &yk, &m, &mut ctx)?;

        Ok(ElgamalEncrypted {
            g: Bn::from(c1).to_mpi()?,
            m: Bn::from(c2).to_mpi()?,
        })
    }

    fn decrypt(
        &self,
        _rng: &dyn RngOp,
        ciphertext: &ElgamalEncrypted,
        key: &ElgamalKey,
    ) -> Result<Vec<u8>, CryptoError> {
        let Some(x) = key.secret() else {
            tracing::error!("private key not set");
            return Err(CryptoError::BadParameters);
        };
        let group = load_group(key)?;
        let x = to_bn(x)?;
        let c1 = to_bn(&ciphertext.g)?;
        let c2 = to_bn(&ciphertext.m)?;
        if c1.num_bits() == 0
            || c1.ucmp(&group.p) != Ordering::Less
            || c2.ucmp(&group.p) != Ordering::Less
        {
            tracing::error!("ciphertext out of range");
            return Err(CryptoError::BadParameters);
        }

        let mut ctx = new_ctx()?;
        let mont = MontCtx::new(&group.p, &mut ctx)?;
        let recp = RecpCtx::new(&group.p, &mut ctx)?;

        let mut s = BigNum::new().map_err(ossl_error)?;
        mont.mod_exp(&mut s, &c1, &x, &mut ctx)?;
        let s_inv = mod_inverse(&s, &group.p, &mut ctx)?;
        let Some(s_inv) = s_inv.get() else {
            return Err(CryptoError::Generic);
        };
        let mut m = BigNum::new().map_err(ossl_error)?;
        recp.mod_mul(&mut m, &c2, s_inv, &mut ctx)?;

        let em = Bn::borrowed(&m)
            .to_mpi()?
            .to_padded(group.p.num_bytes() as usize)
            .ok_or(CryptoError::Generic)?;
        unpad(&em)
    }
}
