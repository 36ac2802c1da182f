// Copyright (C) Microsoft Corporation. All rights reserved.

use super::*;

impl KeyAlgo for Dsa {
    type Key = DsaKey;
    type GenParams = u32;

    fn validate_key(
        &self,
        _rng: &dyn RngOp,
        _key: &DsaKey,
        _secret: bool,
    ) -> Result<(), CryptoError> {
        Err(CryptoError::NotImplemented)
    }

    fn generate(&self, _rng: &dyn RngOp, _bits: u32) -> Result<DsaKey, CryptoError> {
        Err(CryptoError::NotImplemented)
    }
}

impl SignatureAlgo for Dsa {
    type Signature = DsaSignature;

    fn sign(
        &self,
        _rng: &dyn RngOp,
        _hash_alg: HashAlgo,
        _digest: &[u8],
        _key: &DsaKey,
    ) -> Result<DsaSignature, CryptoError> {
        Err(CryptoError::NotImplemented)
    }

    fn verify(
        &self,
        _sig: &DsaSignature,
        _hash_alg: HashAlgo,
        _digest: &[u8],
        _key: &DsaKey,
    ) -> Result<(), CryptoError> {
        Err(CryptoError::NotImplemented)
    }
}
