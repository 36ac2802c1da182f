// Copyright (C) Microsoft Corporation. All rights reserved.

//! Operation contract shared by every public-key algorithm family.
//!
//! Each family is a unit type ([`Ecdsa`], [`Rsa`], [`Dsa`], [`Elgamal`])
//! implementing [`KeyAlgo`] plus [`SignatureAlgo`] and/or
//! [`EncryptionAlgo`]. Every provider implements the same traits for the
//! same types; where a provider lacks a primitive the operation returns
//! [`CryptoError::NotImplemented`] without touching its inputs.

use super::*;

/// Key validation and generation.
pub trait KeyAlgo {
    /// Key material in wire format.
    type Key;

    /// Parameters selecting the kind of key to generate.
    type GenParams;

    /// Checks that `key` is well formed.
    ///
    /// # Arguments
    ///
    /// * `rng` - Randomness source, for checks that need one.
    /// * `key` - The key to validate.
    /// * `secret` - Also validate the private part, which must be present.
    ///
    /// # Returns
    ///
    /// * `Result<(), CryptoError>` - `CryptoError::BadParameters` if any
    ///   check fails.
    fn validate_key(&self, rng: &dyn RngOp, key: &Self::Key, secret: bool)
        -> Result<(), CryptoError>;

    /// Generates a new key pair.
    ///
    /// # Arguments
    ///
    /// * `rng` - Randomness source.
    /// * `params` - Kind of key to generate.
    ///
    /// # Returns
    ///
    /// * `Result<Self::Key, CryptoError>` - The key pair including its
    ///   private part.
    fn generate(&self, rng: &dyn RngOp, params: Self::GenParams) -> Result<Self::Key, CryptoError>;
}

/// Signing and verification over precomputed digests.
pub trait SignatureAlgo: KeyAlgo {
    /// Signature in wire format.
    type Signature;

    /// Signs `digest`, which was produced by `hash_alg`.
    ///
    /// # Arguments
    ///
    /// * `rng` - Randomness source; left untouched when the key has no
    ///   private part.
    /// * `hash_alg` - Algorithm that produced `digest`.
    /// * `digest` - Digest bytes; never hashed again.
    /// * `key` - Signing key, including its private part.
    ///
    /// # Returns
    ///
    /// * `Result<Self::Signature, CryptoError>` - The signature,
    ///   `CryptoError::BadParameters` if the private part is missing, or
    ///   `CryptoError::Generic` if the provider fails.
    fn sign(
        &self,
        rng: &dyn RngOp,
        hash_alg: HashAlgo,
        digest: &[u8],
        key: &Self::Key,
    ) -> Result<Self::Signature, CryptoError>;

    /// Verifies `sig` over `digest`.
    ///
    /// # Returns
    ///
    /// * `Result<(), CryptoError>` - `Ok(())` only if the provider accepts
    ///   the signature, `CryptoError::SignatureInvalid` otherwise.
    fn verify(
        &self,
        sig: &Self::Signature,
        hash_alg: HashAlgo,
        digest: &[u8],
        key: &Self::Key,
    ) -> Result<(), CryptoError>;
}

/// Encryption and decryption of session-key payloads.
pub trait EncryptionAlgo: KeyAlgo {
    /// Ciphertext in wire format.
    type Ciphertext;

    /// Encrypts `plaintext` to `key`.
    fn encrypt(
        &self,
        rng: &dyn RngOp,
        plaintext: &[u8],
        key: &Self::Key,
    ) -> Result<Self::Ciphertext, CryptoError>;

    /// Decrypts `ciphertext` with the private part of `key`.
    fn decrypt(
        &self,
        rng: &dyn RngOp,
        ciphertext: &Self::Ciphertext,
        key: &Self::Key,
    ) -> Result<Vec<u8>, CryptoError>;
}
