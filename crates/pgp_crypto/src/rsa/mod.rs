// Copyright (C) Microsoft Corporation. All rights reserved.

//! RSA with PKCS#1 v1.5 signatures and encryption.
//!
//! OpenPGP stores the secret primes with `p < q` and the CRT coefficient as
//! `u = p^-1 mod q`; conversions to and from provider key blobs keep that
//! convention.
//!
//! # Provider support
//!
//! - **SymCrypt**: every operation
//! - **OpenSSL**: none; every operation returns [`CryptoError::NotImplemented`]

cfg_if::cfg_if! {
    if #[cfg(feature = "use-openssl")] {
        mod rsa_ossl;
    } else if #[cfg(feature = "use-symcrypt")] {
        mod rsa_symcrypt;
    }
}

use super::*;

/// Private part of an RSA key.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaSecret {
    /// Private exponent.
    pub d: Mpi,

    /// Smaller prime.
    pub p: Mpi,

    /// Larger prime.
    pub q: Mpi,

    /// `p^-1 mod q`.
    pub u: Mpi,
}

impl std::fmt::Debug for RsaSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RsaSecret([REDACTED])")
    }
}

/// RSA key in wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKey {
    /// Modulus.
    pub n: Mpi,

    /// Public exponent.
    pub e: Mpi,

    /// Private part, absent for public keys.
    pub secret: Option<RsaSecret>,
}

impl RsaKey {
    /// Creates a public key.
    pub fn public(n: Mpi, e: Mpi) -> Self {
        Self { n, e, secret: None }
    }

    /// Copy of the key without its private part.
    pub fn to_public(&self) -> Self {
        Self::public(self.n.clone(), self.e.clone())
    }
}

/// PKCS#1 v1.5 signature value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsaSignature {
    /// `s = m^d mod n`.
    pub s: Mpi,
}

/// PKCS#1 v1.5 ciphertext.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsaEncrypted {
    /// `c = m^e mod n`.
    pub m: Mpi,
}

/// RSA algorithm component. Key generation takes the modulus size in bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rsa;
