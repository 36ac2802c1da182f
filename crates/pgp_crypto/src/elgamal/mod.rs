// Copyright (C) Microsoft Corporation. All rights reserved.

//! ElGamal encryption of OpenPGP session keys.
//!
//! The payload is wrapped in EME-PKCS1-v1_5 padding (RFC 4880 13.1) before
//! encryption, so the plaintext can be at most `len(p) - 11` bytes.
//!
//! # Provider support
//!
//! - **OpenSSL**: validation, encryption and decryption; key generation
//!   returns [`CryptoError::NotImplemented`]
//! - **SymCrypt**: none

cfg_if::cfg_if! {
    if #[cfg(feature = "use-openssl")] {
        mod elgamal_ossl;
    } else if #[cfg(feature = "use-symcrypt")] {
        mod elgamal_symcrypt;
    }
}

use super::*;

/// ElGamal key in wire format.
#[derive(Clone, PartialEq, Eq)]
pub struct ElgamalKey {
    /// Prime modulus.
    pub p: Mpi,

    /// Group generator.
    pub g: Mpi,

    /// Public value `g^x mod p`.
    pub y: Mpi,

    /// Private exponent, absent for public keys.
    pub x: Option<Mpi>,
}

impl ElgamalKey {
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

impl std::fmt::Debug for ElgamalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElgamalKey")
            .field("p", &self.p)
            .field("g", &self.g)
            .field("y", &self.y)
            .field("x", &self.secret().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// ElGamal ciphertext pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElgamalEncrypted {
    /// `g^k mod p`.
    pub g: Mpi,

    /// `y^k * m mod p`.
    pub m: Mpi,
}

/// ElGamal algorithm component. Key generation takes the size of `p` in
/// bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Elgamal;
