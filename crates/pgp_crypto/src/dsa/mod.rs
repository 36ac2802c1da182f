// Copyright (C) Microsoft Corporation. All rights reserved.

//! DSA (FIPS 186) over precomputed digests.
//!
//! # Provider support
//!
//! - **OpenSSL**: every operation
//! - **SymCrypt**: none; every operation returns [`CryptoError::NotImplemented`]

cfg_if::cfg_if! {
    if #[cfg(feature = "use-openssl")] {
        mod dsa_ossl;
    } else if #[cfg(feature = "use-symcrypt")] {
        mod dsa_symcrypt;
    }
}

use super::*;

/// DSA key in wire format.
#[derive(Clone, PartialEq, Eq)]
pub struct DsaKey {
    /// Prime modulus.
    pub p: Mpi,

    /// Subgroup order.
    pub q: Mpi,

    /// Subgroup generator.
    pub g: Mpi,

    /// Public value `g^x mod p`.
    pub y: Mpi,

    /// Private exponent, absent for public keys.
    pub x: Option<Mpi>,
}

impl DsaKey {
    /// Private exponent, if one is present and non-empty.
    pub fn secret(&self) -> Option<&Mpi> {
        self.x.as_ref().filter(|x| !x.is_empty())
    }

    /// Copy of the key without its private part.
    pub fn to_public(&self) -> Self {
        Self {
            x: None,
            ..self.clone()
        }
    }
}

impl std::fmt::Debug for DsaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DsaKey")
            .field("p", &self.p)
            .field("q", &self.q)
            .field("g", &self.g)
            .field("y", &self.y)
            .field("x", &self.secret().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// `(r, s)` signature in wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DsaSignature {
    /// `r` component.
    pub r: Mpi,

    /// `s` component.
    pub s: Mpi,
}

impl DsaSignature {
    /// Encodes the signature as DER `SEQUENCE { INTEGER r, INTEGER s }`.
    pub fn to_der(&self) -> Result<Vec<u8>, CryptoError> {
        der::encode_rs(&self.r, &self.s)
    }

    /// Decodes a DER `SEQUENCE { INTEGER r, INTEGER s }`.
    pub fn from_der(der: &[u8]) -> Result<Self, CryptoError> {
        let (r, s) = der::decode_rs(der)?;
        Ok(Self { r, s })
    }
}

/// DSA algorithm component. Key generation takes the size of `p` in bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dsa;
