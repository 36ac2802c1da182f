// Copyright (C) Microsoft Corporation. All rights reserved.

use super::*;

impl KeyAlgo for Elgamal {
    type Key = ElgamalKey;
    type GenParams = u32;

    fn validate_key(
        &self,
        _rng: &dyn RngOp,
        _key: &ElgamalKey,
        _secret: bool,
    ) -> Result<(), CryptoError> {
        Err(CryptoError::NotImplemented)
    }

    fn generate(&self, _rng: &dyn RngOp, _bits: u32) -> Result<ElgamalKey, CryptoError> {
        Err(CryptoError::NotImplemented)
    }
}

impl EncryptionAlgo for Elgamal {
    type Ciphertext = ElgamalEncrypted;

    fn encrypt(
        &self,
        _rng: &dyn RngOp,
        _plaintext: &[u8],
        _key: &ElgamalKey,
    ) -> Result<ElgamalEncrypted, CryptoError> {
        Err(CryptoError::NotImplemented)
    }

    fn decrypt(
        &self,
        _rng: &dyn RngOp,
        _ciphertext: &ElgamalEncrypted,
        _key: &ElgamalKey,
    ) -> Result<Vec<u8>, CryptoError> {
        Err(CryptoError::NotImplemented)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_elgamal_not_implemented() {
        let rng = CountingRng::default();
        let key = ElgamalKey {
            p: Mpi::from_bytes(&[0xfb; 256]).unwrap(),
            g: Mpi::from_bytes(&[0x05]).unwrap(),
            y: Mpi::from_bytes(&[0x3a; 256]).unwrap(),
            x: Some(Mpi::from_bytes(&[0x17; 32]).unwrap()),
        };
        let ct = ElgamalEncrypted {
            g: Mpi::from_bytes(&[0x02]).unwrap(),
            m: Mpi::from_bytes(&[0x03]).unwrap(),
        };

        assert_eq!(
            Elgamal.validate_key(&rng, &key, true),
            Err(CryptoError::NotImplemented)
        );
        assert_eq!(
            Elgamal.generate(&rng, 2048).unwrap_err(),
            CryptoError::NotImplemented
        );
        assert_eq!(
            Elgamal.encrypt(&rng, b"session key", &key).unwrap_err(),
            CryptoError::NotImplemented
        );
        assert_eq!(
            Elgamal.decrypt(&rng, &ct, &key).unwrap_err(),
            CryptoError::NotImplemented
        );
        assert_eq!(rng.calls(), 0);
    }
}
