// Copyright (C) Microsoft Corporation. All rights reserved.

//! Asymmetric cryptography backend for OpenPGP.
//!
//! This crate exposes a uniform algorithm interface (key validation,
//! signing, verification, encryption, decryption and key generation) on top
//! of a native cryptography provider selected at build time, together with
//! the conversions between OpenPGP wire integers and provider-native values.
//!
//! - **ECDSA**: NIST, secp256k1 and Brainpool curves
//! - **RSA**: PKCS#1 v1.5 signatures and encryption
//! - **DSA**: FIPS 186 signatures over precomputed digests
//! - **ElGamal**: OpenPGP session-key encryption
//!
//! # Providers
//!
//! Exactly one of the `use-openssl` (default) and `use-symcrypt` features
//! must be enabled. Operations a provider does not support return
//! [`CryptoError::NotImplemented`].

#[cfg(all(feature = "use-openssl", feature = "use-symcrypt"))]
compile_error!("OpenSSL and SymCrypt cannot be enabled at the same time.");

#[cfg(not(any(feature = "use-openssl", feature = "use-symcrypt")))]
compile_error!("One of the `use-openssl` or `use-symcrypt` features must be enabled.");

mod backend;
mod curve;
mod der;
mod dsa;
mod ecdsa;
mod elgamal;
mod hash;
mod mpi;
mod rand;
mod rsa;
mod traits;

#[cfg(feature = "use-openssl")]
pub mod ossl;

pub use backend::*;
pub use curve::*;
pub use dsa::*;
pub use ecdsa::*;
pub use elgamal::*;
pub use hash::*;
pub use mpi::*;
pub use rand::*;
pub use rsa::*;
use thiserror::Error;
pub use traits::*;

/// Error type shared by every algorithm component.
///
/// Each public operation returns either success or exactly one of these
/// kinds; callers use [`CryptoError::NotImplemented`] to tell a missing
/// provider capability apart from a cryptographic failure.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum CryptoError {
    /// Key material is missing, malformed or out of range.
    #[error("bad parameters")]
    BadParameters,

    /// Verification completed and the provider rejected the signature.
    #[error("signature invalid")]
    SignatureInvalid,

    /// The active provider does not implement this operation.
    #[error("not implemented")]
    NotImplemented,

    /// Allocation, provider-internal or encoding failure.
    #[error("generic error")]
    Generic,

    /// The randomness source failed to produce bytes.
    #[error("random number generation failed")]
    RngError,
}
