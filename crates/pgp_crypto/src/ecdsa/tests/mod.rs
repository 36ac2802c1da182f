// Copyright (C) Microsoft Corporation. All rights reserved.

mod sign_verify;

use super::*;

#[cfg(feature = "use-openssl")]
pub(super) const CURVES: &[EcCurve] = &EcCurve::ALL;

#[cfg(feature = "use-symcrypt")]
pub(super) const CURVES: &[EcCurve] = &[EcCurve::NistP256, EcCurve::NistP384, EcCurve::NistP521];

pub(super) fn mpi(bytes: &[u8]) -> Mpi {
    Mpi::from_bytes(bytes).unwrap()
}

// Flips the least significant bit of the value.
pub(super) fn flip_low_bit(value: &Mpi) -> Mpi {
    let mut bytes = value.as_bytes().to_vec();
    if let Some(last) = bytes.last_mut() {
        *last ^= 0x01;
    }
    mpi(&bytes)
}

pub(super) fn random_digest(len: usize) -> Vec<u8> {
    let mut digest = vec![0u8; len];
    Rng {}.rand_bytes(&mut digest).unwrap();
    digest
}

#[cfg(feature = "use-openssl")]
pub(super) fn sha256(msg: &[u8]) -> [u8; 32] {
    use openssl::md::Md;
    use openssl::md_ctx::MdCtx;

    let mut ctx = MdCtx::new().unwrap();
    ctx.digest_init(Md::sha256()).unwrap();
    ctx.digest_update(msg).unwrap();
    let mut digest = [0u8; 32];
    ctx.digest_final(&mut digest).unwrap();
    digest
}

#[cfg(feature = "use-symcrypt")]
pub(super) fn sha256(msg: &[u8]) -> [u8; 32] {
    symcrypt::hash::sha256(msg)
}
