// Copyright (C) Microsoft Corporation. All rights reserved.

//! OpenPGP hash algorithm identifiers.
//!
//! Digests are computed by the caller; the algorithm tag only selects the
//! encoding a provider wraps around the digest (for example the PKCS#1
//! DigestInfo prefix).

use super::*;

/// Hash algorithm as registered in the OpenPGP hash algorithm registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HashAlgo {
    /// MD5
    Md5 = 1,

    /// SHA-1
    Sha1 = 2,

    /// RIPEMD-160
    Ripemd160 = 3,

    /// SHA-256
    Sha256 = 8,

    /// SHA-384
    Sha384 = 9,

    /// SHA-512
    Sha512 = 10,

    /// SHA-224
    Sha224 = 11,

    /// SHA3-256
    Sha3_256 = 12,

    /// SHA3-512
    Sha3_512 = 14,

    /// SM3
    Sm3 = 105,
}

impl HashAlgo {
    /// Digest size in bytes.
    pub fn digest_size(self) -> usize {
        match self {
            HashAlgo::Md5 => 16,
            HashAlgo::Sha1 | HashAlgo::Ripemd160 => 20,
            HashAlgo::Sha224 => 28,
            HashAlgo::Sha256 | HashAlgo::Sha3_256 | HashAlgo::Sm3 => 32,
            HashAlgo::Sha384 => 48,
            HashAlgo::Sha512 | HashAlgo::Sha3_512 => 64,
        }
    }

    /// OpenPGP registry value.
    pub fn id(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for HashAlgo {
    type Error = CryptoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HashAlgo::Md5),
            2 => Ok(HashAlgo::Sha1),
            3 => Ok(HashAlgo::Ripemd160),
            8 => Ok(HashAlgo::Sha256),
            9 => Ok(HashAlgo::Sha384),
            10 => Ok(HashAlgo::Sha512),
            11 => Ok(HashAlgo::Sha224),
            12 => Ok(HashAlgo::Sha3_256),
            14 => Ok(HashAlgo::Sha3_512),
            105 => Ok(HashAlgo::Sm3),
            _ => Err(CryptoError::BadParameters),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_hash_algo_ids() {
        for algo in [
            HashAlgo::Md5,
            HashAlgo::Sha1,
            HashAlgo::Ripemd160,
            HashAlgo::Sha256,
            HashAlgo::Sha384,
            HashAlgo::Sha512,
            HashAlgo::Sha224,
            HashAlgo::Sha3_256,
            HashAlgo::Sha3_512,
            HashAlgo::Sm3,
        ] {
            assert_eq!(HashAlgo::try_from(algo.id()).unwrap(), algo);
        }
        assert_eq!(HashAlgo::Sha256.id(), 8);
        assert_eq!(HashAlgo::Sha384.digest_size(), 48);
    }

    #[test]
    fn test_hash_algo_unknown_id() {
        assert_eq!(HashAlgo::try_from(4), Err(CryptoError::BadParameters));
        assert_eq!(HashAlgo::try_from(13), Err(CryptoError::BadParameters));
    }
}
