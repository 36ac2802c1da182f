// Copyright (C) Microsoft Corporation. All rights reserved.

//! ECDSA over OpenPGP wire-format keys and signatures.
//!
//! Keys carry the public point as an uncompressed `04 || x || y` MPI and an
//! optional private scalar. Signatures are the `(r, s)` MPI pair; providers
//! that exchange DER are fed through [`EcSignature::to_der`] and
//! [`EcSignature::from_der`].
//!
//! # Provider support
//!
//! - **OpenSSL**: every curve in [`EcCurve`]
//! - **SymCrypt**: NIST P-256, P-384 and P-521; other curves return
//!   [`CryptoError::NotImplemented`]

cfg_if::cfg_if! {
    if #[cfg(feature = "use-openssl")] {
        mod ecdsa_ossl;
    } else if #[cfg(feature = "use-symcrypt")] {
        mod ecdsa_symcrypt;
    }
}

#[cfg(test)]
mod tests;

use super::*;

/// Elliptic-curve key in wire format.
#[derive(Clone, PartialEq, Eq)]
pub struct EcKey {
    /// Curve the key lives on.
    pub curve: EcCurve,

    /// Public point, `04 || x || y`.
    pub p: Mpi,

    /// Private scalar; `None` (or an empty MPI) for public keys.
    pub x: Option<Mpi>,
}

impl EcKey {
    /// Creates a key pair.
    pub fn new(curve: EcCurve, p: Mpi, x: Mpi) -> Self {
        Self {
            curve,
            p,
            x: Some(x),
        }
    }

    /// Creates a public key.
    pub fn public(curve: EcCurve, p: Mpi) -> Self {
        Self { curve, p, x: None }
    }

    /// Private scalar, if one is present and non-empty.
    pub fn secret(&self) -> Option<&Mpi> {
        self.x.as_ref().filter(|x| !x.is_empty())
    }

    /// Copy of the key without its private part.
    pub fn to_public(&self) -> Self {
        Self::public(self.curve, self.p.clone())
    }
}

impl std::fmt::Debug for EcKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcKey")
            .field("curve", &self.curve)
            .field("p", &self.p)
            .field("x", &self.secret().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// `(r, s)` signature in wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EcSignature {
    /// `r` component.
    pub r: Mpi,

    /// `s` component.
    pub s: Mpi,
}

impl EcSignature {
    /// Encodes the signature as DER `SEQUENCE { INTEGER r, INTEGER s }`.
    pub fn to_der(&self) -> Result<Vec<u8>, CryptoError> {
        der::encode_rs(&self.r, &self.s)
    }

    /// Decodes a DER `SEQUENCE { INTEGER r, INTEGER s }`.
    ///
    /// # Returns
    ///
    /// * `Result<EcSignature, CryptoError>` - The signature, or
    ///   `CryptoError::Generic` if the encoding is malformed or a component
    ///   exceeds [`MPI_MAX_BYTES`].
    pub fn from_der(der: &[u8]) -> Result<Self, CryptoError> {
        let (r, s) = der::decode_rs(der)?;
        Ok(Self { r, s })
    }
}

/// ECDSA algorithm component.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ecdsa;
