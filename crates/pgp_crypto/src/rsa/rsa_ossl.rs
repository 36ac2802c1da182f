// Copyright (C) Microsoft Corporation. All rights reserved.

use super::*;

impl KeyAlgo for Rsa {
    type Key = RsaKey;
    type GenParams = u32;

    fn validate_key(
        &self,
        _rng: &dyn RngOp,
        _key: &RsaKey,
        _secret: bool,
    ) -> Result<(), CryptoError> {
        Err(CryptoError::NotImplemented)
    }

    fn generate(&self, _rng: &dyn RngOp, _bits: u32) -> Result<RsaKey, CryptoError> {
        Err(CryptoError::NotImplemented)
    }
}

impl SignatureAlgo for Rsa {
    type Signature = RsaSignature;

    fn sign(
        &self,
        _rng: &dyn RngOp,
        _hash_alg: HashAlgo,
        _digest: &[u8],
        _key: &RsaKey,
    ) -> Result<RsaSignature, CryptoError> {
        Err(CryptoError::NotImplemented)
    }

    fn verify(
        &self,
        _sig: &RsaSignature,
        _hash_alg: HashAlgo,
        _digest: &[u8],
        _key: &RsaKey,
    ) -> Result<(), CryptoError> {
        Err(CryptoError::NotImplemented)
    }
}

impl EncryptionAlgo for Rsa {
    type Ciphertext = RsaEncrypted;

    fn encrypt(
        &self,
        _rng: &dyn RngOp,
        _plaintext: &[u8],
        _key: &RsaKey,
    ) -> Result<RsaEncrypted, CryptoError> {
        Err(CryptoError::NotImplemented)
    }

    fn decrypt(
        &self,
        _rng: &dyn RngOp,
        _ciphertext: &RsaEncrypted,
        _key: &RsaKey,
    ) -> Result<Vec<u8>, CryptoError> {
        Err(CryptoError::NotImplemented)
    }
}
